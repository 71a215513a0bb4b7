//! Command-line shell around the rules engine: loads or starts a game,
//! then applies moves typed as coordinate pairs.

use clap::Parser;
use fortress_chess::{Board, Coord, Snapshot, Variant};
use std::error::Error;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fortress-chess", about = "Four-player fortress chess (and classic chess) at the terminal")]
struct Args {
    /// Rule set to play: classic or fortress.
    #[arg(long, default_value = "fortress")]
    variant: Variant,
    /// Snapshot file to resume from.
    #[arg(long)]
    load: Option<PathBuf>,
    /// Fail instead of falling back to the standard position when --load
    /// cannot be read.
    #[arg(long, requires = "load")]
    require_load: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut board = Board::standard(args.variant);
    if let Some(path) = &args.load {
        match load_snapshot(&mut board, path) {
            Ok(resolved) => info!(path = %resolved.display(), "snapshot loaded"),
            Err(err) => {
                if args.require_load {
                    eprintln!("error: cannot load snapshot {}: {err}", path.display());
                    std::process::exit(1);
                }
                warn!(%err, "could not load snapshot, starting from the standard position");
                board.setup_standard();
            }
        }
    }

    println!("{board}");
    run_loop(&mut board);
}

/// Candidate locations for a snapshot path: as given, under the working
/// directory, next to the executable, and under the home directory.
fn candidate_paths(path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if path.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(path));
        }
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join(path));
            }
        }
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(path));
        }
    }
    candidates
}

fn load_snapshot(board: &mut Board, path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    for candidate in candidate_paths(path) {
        if !candidate.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&candidate)?;
        let snapshot: Snapshot = serde_json::from_str(&text)?;
        board.load(&snapshot)?;
        return Ok(candidate);
    }
    Err(format!("no readable file at {}", path.display()).into())
}

fn save_snapshot(board: &Board, path: &Path) -> Result<(), Box<dyn Error>> {
    let text = serde_json::to_string_pretty(&board.save())?;
    std::fs::write(path, text)?;
    Ok(())
}

fn run_loop(board: &mut Board) {
    let stdin = io::stdin();
    loop {
        print!("{}> ", board.current_player());
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["show"] => println!("{board}"),
            ["save", path] => match save_snapshot(board, Path::new(path)) {
                Ok(()) => println!("saved to {path}"),
                Err(err) => println!("save failed: {err}"),
            },
            [from, to] => match try_move(board, from, to) {
                Ok(()) => {
                    println!("{board}");
                    let active = board.active_colors();
                    if active.len() <= 1 {
                        match active.first() {
                            Some(winner) => println!("{winner} wins"),
                            None => println!("no players remain"),
                        }
                        break;
                    }
                }
                Err(err) => println!("rejected: {err}"),
            },
            _ => println!("commands: <from> <to> | show | save <path> | quit"),
        }
    }
}

fn try_move(board: &mut Board, from: &str, to: &str) -> Result<(), Box<dyn Error>> {
    let source = Coord::from_algebraic(from)?;
    let target = Coord::from_algebraic(to)?;
    board.move_piece(source, target)?;
    Ok(())
}
