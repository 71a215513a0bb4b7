//! Pseudo-legal destination generation for every piece kind.
//!
//! "Pseudo-legal" means geometrically valid for the piece while ignoring
//! whether the move exposes the mover's own king; the board filters that out
//! with its self-check simulation. Shared contract: the origin is never
//! included, friendly-occupied squares are never included, and a sliding
//! scan stops at the first occupied square, including it only when it holds
//! an enemy piece. Void squares and the board edge terminate rays.

use crate::board::Board;
use crate::coord::Coord;
use crate::pieces::{Color, Piece, PieceType};
use rustc_hash::FxHashSet;

const ORTHOGONAL_DIRS: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DIRS: [(i16, i16); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];
const KING_OFFSETS: [(i16, i16); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Destinations the piece on `from` may move to, ignoring self-check.
/// Empty set when `from` holds no piece or is outside the board.
pub fn pseudo_legal_destinations(board: &Board, from: Coord) -> FxHashSet<Coord> {
    let mut out = FxHashSet::default();
    let Some(piece) = board.piece_at(from) else {
        return out;
    };

    match piece.kind {
        PieceType::Rook => slide(board, from, piece.color, &ORTHOGONAL_DIRS, &mut out),
        PieceType::Bishop => slide(board, from, piece.color, &DIAGONAL_DIRS, &mut out),
        PieceType::Queen => {
            slide(board, from, piece.color, &ORTHOGONAL_DIRS, &mut out);
            slide(board, from, piece.color, &DIAGONAL_DIRS, &mut out);
        }
        PieceType::Knight => leap(board, from, piece.color, &KNIGHT_OFFSETS, &mut out),
        PieceType::King => {
            leap(board, from, piece.color, &KING_OFFSETS, &mut out);
            castling_destinations(board, from, &piece, &mut out);
        }
        PieceType::Pawn => pawn_destinations(board, from, &piece, &mut out),
    }
    out
}

/// Walk each ray until blocked, off-board, or void.
fn slide(board: &Board, from: Coord, color: Color, dirs: &[(i16, i16)], out: &mut FxHashSet<Coord>) {
    let size = board.size();
    for &(delta_file, delta_rank) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(delta_file, delta_rank, size) {
            if !board.is_legal_square(next) {
                break;
            }
            match board.piece_at(next) {
                Some(blocker) => {
                    if blocker.color != color {
                        out.insert(next);
                    }
                    break;
                }
                None => {
                    out.insert(next);
                }
            }
            current = next;
        }
    }
}

/// Fixed offsets, each checked independently (no blocking).
fn leap(
    board: &Board,
    from: Coord,
    color: Color,
    offsets: &[(i16, i16)],
    out: &mut FxHashSet<Coord>,
) {
    let size = board.size();
    for &(delta_file, delta_rank) in offsets {
        let Some(target) = from.offset(delta_file, delta_rank, size) else {
            continue;
        };
        if !board.is_legal_square(target) {
            continue;
        }
        match board.piece_at(target) {
            Some(occupant) if occupant.color == color => {}
            _ => {
                out.insert(target);
            }
        }
    }
}

/// Pawn forward/double/capture geometry. The forward axis comes from the
/// variant (fortress side players advance along the file axis), and capture
/// offsets are perpendicular to it rather than assumed diagonal-to-rank.
fn pawn_destinations(board: &Board, from: Coord, piece: &Piece, out: &mut FxHashSet<Coord>) {
    let size = board.size();
    let variant = board.variant();
    let (step_file, step_rank) = variant.pawn_step(piece.color);

    let forward = from.offset(step_file, step_rank, size);
    if let Some(forward) = forward {
        if board.is_legal_square(forward) && board.piece_at(forward).is_none() {
            out.insert(forward);

            // Double advance: only from the starting line, before the first move.
            if !piece.moved && variant.on_pawn_start(piece.color, from) {
                if let Some(double) = from.offset(step_file * 2, step_rank * 2, size) {
                    if board.is_legal_square(double) && board.piece_at(double).is_none() {
                        out.insert(double);
                    }
                }
            }
        }
    }

    let capture_offsets: [(i16, i16); 2] = if step_file == 0 {
        [(1, step_rank), (-1, step_rank)]
    } else {
        [(step_file, 1), (step_file, -1)]
    };
    for (delta_file, delta_rank) in capture_offsets {
        let Some(target) = from.offset(delta_file, delta_rank, size) else {
            continue;
        };
        if !board.is_legal_square(target) {
            continue;
        }
        if let Some(occupant) = board.piece_at(target) {
            if occupant.color != piece.color {
                out.insert(target);
            }
        }
    }
}

/// Castling: the king, if unmoved, scans both directions of its back-line
/// axis; every intervening square must be empty and legal, and the first
/// occupied square must hold a friendly unmoved rook far enough away for the
/// king's two-square hop. The destination is two squares toward the rook.
fn castling_destinations(board: &Board, from: Coord, piece: &Piece, out: &mut FxHashSet<Coord>) {
    if piece.moved {
        return;
    }
    let size = board.size();
    for (delta_file, delta_rank) in board.variant().castle_dirs(piece.color) {
        let mut distance: i16 = 0;
        let mut current = from;
        loop {
            let Some(next) = current.offset(delta_file, delta_rank, size) else {
                break;
            };
            if !board.is_legal_square(next) {
                break;
            }
            distance += 1;
            match board.piece_at(next) {
                None => current = next,
                Some(occupant) => {
                    if occupant.color == piece.color
                        && occupant.kind == PieceType::Rook
                        && !occupant.moved
                        && distance >= 3
                    {
                        if let Some(dest) = from.offset(delta_file * 2, delta_rank * 2, size) {
                            out.insert(dest);
                        }
                    }
                    break;
                }
            }
        }
    }
}
