//! The board aggregate: square map, king-presence table, current player, and
//! the move-execution state machine with elimination and turn rotation.

use crate::coord::Coord;
use crate::error::EngineError;
use crate::moves::pseudo_legal_destinations;
use crate::pieces::{Color, Piece, PieceType};
use crate::snapshot::{PieceState, Snapshot, SquareState};
use crate::variant::Variant;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use tracing::{debug, info};

/// One board cell. Legality is fixed when the board is built; a piece may
/// only ever occupy a legal square.
#[derive(Debug, Clone)]
pub struct Square {
    legal: bool,
    piece: Option<Piece>,
}

impl Square {
    pub fn is_legal(&self) -> bool {
        self.legal
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }
}

pub struct Board {
    variant: Variant,
    squares: FxHashMap<Coord, Square>,
    /// Membership means that color still has a king on the board.
    kings: FxHashSet<Color>,
    current_player: Color,
}

impl Board {
    /// An empty board for the variant: every coordinate in the bounding
    /// rectangle gets a square, void ones flagged illegal. No pieces.
    pub fn new(variant: Variant) -> Self {
        let size = variant.size();
        let mut squares = FxHashMap::default();
        for file in 0..size {
            for rank in 0..size {
                let coord = Coord::new(file, rank);
                squares.insert(
                    coord,
                    Square {
                        legal: !variant.is_void(coord),
                        piece: None,
                    },
                );
            }
        }
        Board {
            variant,
            squares,
            kings: FxHashSet::default(),
            current_player: variant.first_color(),
        }
    }

    /// A board with the variant's standard starting position.
    pub fn standard(variant: Variant) -> Self {
        let mut board = Board::new(variant);
        board.setup_standard();
        board
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn size(&self) -> u8 {
        self.variant.size()
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    fn square(&self, coord: Coord) -> Result<&Square, EngineError> {
        self.squares
            .get(&coord)
            .ok_or_else(|| EngineError::InvalidCoordinate(coord.to_string()))
    }

    fn square_mut(&mut self, coord: Coord) -> Result<&mut Square, EngineError> {
        self.squares
            .get_mut(&coord)
            .ok_or_else(|| EngineError::InvalidCoordinate(coord.to_string()))
    }

    /// False for void squares and for coordinates outside this variant's
    /// rectangle.
    pub fn is_legal_square(&self, coord: Coord) -> bool {
        self.squares.get(&coord).is_some_and(|s| s.legal)
    }

    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.squares.get(&coord).and_then(|s| s.piece)
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.kings.contains(&color)
    }

    /// Pseudo-legal destinations for the piece on `coord` (empty set when
    /// there is none). Callers wanting strictly-legal moves must additionally
    /// reject those that fail the self-check simulation.
    pub fn valid_moves(&self, coord: Coord) -> FxHashSet<Coord> {
        pseudo_legal_destinations(self, coord)
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    /// Place a piece during setup or loading.
    pub fn place_piece(&mut self, piece: Piece, coord: Coord) -> Result<(), EngineError> {
        let square = self.square_mut(coord)?;
        if !square.legal {
            return Err(EngineError::IllegalSquare(coord));
        }
        if square.piece.is_some() {
            return Err(EngineError::OccupiedOnPlace(coord));
        }
        square.piece = Some(piece);
        if piece.kind == PieceType::King {
            self.kings.insert(piece.color);
        }
        Ok(())
    }

    /// Remove and return the piece on `coord`, dropping king-presence when a
    /// king leaves the board.
    pub fn remove_piece(&mut self, coord: Coord) -> Result<Option<Piece>, EngineError> {
        let square = self.square_mut(coord)?;
        if !square.legal {
            return Err(EngineError::IllegalSquare(coord));
        }
        let removed = square.piece.take();
        if let Some(piece) = removed {
            if piece.kind == PieceType::King {
                self.kings.remove(&piece.color);
            }
        }
        Ok(removed)
    }

    /// Reset to the variant's standard starting position.
    pub fn setup_standard(&mut self) {
        for square in self.squares.values_mut() {
            square.piece = None;
        }
        self.kings.clear();
        self.current_player = self.variant.first_color();

        match self.variant {
            Variant::Classic => {
                self.place_army(Color::White, Coord::new(0, 0), (1, 0), (0, 1));
                self.place_army(Color::Black, Coord::new(0, 7), (1, 0), (0, -1));
            }
            Variant::Fortress => {
                self.place_army(Color::Yellow, Coord::new(0, 4), (0, 1), (1, 0));
                self.place_army(Color::Red, Coord::new(4, 0), (1, 0), (0, 1));
                self.place_army(Color::Blue, Coord::new(15, 4), (0, 1), (-1, 0));
                self.place_army(Color::Green, Coord::new(4, 15), (1, 0), (0, -1));
            }
        }
    }

    /// Back line of R,N,B,Q,K,B,N,R from `back_start` along `line_dir`, with
    /// a pawn one `pawn_dir` step in front of each piece.
    fn place_army(
        &mut self,
        color: Color,
        back_start: Coord,
        line_dir: (i16, i16),
        pawn_dir: (i16, i16),
    ) {
        const BACK_LINE: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        let size = self.size();
        let mut at = back_start;
        for (index, kind) in BACK_LINE.iter().enumerate() {
            let pawn_at = at
                .offset(pawn_dir.0, pawn_dir.1, size)
                .expect("standard setup stays on the board");
            self.place_piece(Piece::new(*kind, color), at)
                .expect("standard setup squares are free and legal");
            self.place_piece(Piece::new(PieceType::Pawn, color), pawn_at)
                .expect("standard setup squares are free and legal");
            if index + 1 < BACK_LINE.len() {
                at = at
                    .offset(line_dir.0, line_dir.1, size)
                    .expect("standard setup stays on the board");
            }
        }
    }

    // ------------------------------------------------------------------
    // Move execution
    // ------------------------------------------------------------------

    /// Validate and execute one move, then eliminate any freshly checkmated
    /// colors and advance the turn. On any `Err` the board is unchanged.
    pub fn move_piece(&mut self, source: Coord, target: Coord) -> Result<(), EngineError> {
        let source_square = self.square(source)?;
        let target_square = self.square(target)?;
        if !source_square.legal {
            return Err(EngineError::IllegalSquare(source));
        }
        if !target_square.legal {
            return Err(EngineError::IllegalSquare(target));
        }
        let piece = source_square
            .piece
            .ok_or(EngineError::EmptySource(source))?;
        if piece.color != self.current_player {
            return Err(EngineError::WrongTurn(self.current_player));
        }
        if !pseudo_legal_destinations(self, source).contains(&target) {
            return Err(EngineError::IllegalDestination {
                from: source,
                to: target,
            });
        }
        if self.would_leave_king_in_check(piece.color, source, target) {
            return Err(EngineError::SelfCheck {
                from: source,
                to: target,
            });
        }

        // Execute: capture is discarded, the mover gains its moved flag.
        if let Some(captured) = self.remove_piece(target)? {
            debug!(square = %target, piece = %captured, "capture");
        }
        let mut piece = self
            .square_mut(source)?
            .piece
            .take()
            .expect("validated source holds a piece");
        piece.moved = true;
        self.square_mut(target)?.piece = Some(piece);
        if piece.kind == PieceType::King {
            self.complete_castle(source, target, piece.color);
        }
        debug!(mover = %piece.color, from = %source, to = %target, "move accepted");

        self.eliminate_checkmated();
        self.advance_turn();
        Ok(())
    }

    /// A king that just hopped two squares along a line castled: relocate the
    /// partner rook onto the square the king crossed.
    fn complete_castle(&mut self, source: Coord, target: Coord, color: Color) {
        let delta_file = target.file as i16 - source.file as i16;
        let delta_rank = target.rank as i16 - source.rank as i16;
        if !((delta_file.abs() == 2 && delta_rank == 0) || (delta_rank.abs() == 2 && delta_file == 0))
        {
            return;
        }
        let dir = (delta_file.signum(), delta_rank.signum());
        let crossed = source
            .offset(dir.0, dir.1, self.size())
            .expect("crossed square lies between source and target");

        // First friendly piece beyond the king's destination is the rook.
        let mut scan = target;
        while let Some(next) = scan.offset(dir.0, dir.1, self.size()) {
            if !self.is_legal_square(next) {
                break;
            }
            if let Some(occupant) = self.piece_at(next) {
                if occupant.color == color && occupant.kind == PieceType::Rook {
                    let mut rook = self
                        .square_mut(next)
                        .expect("scanned square exists")
                        .piece
                        .take()
                        .expect("scanned square holds the rook");
                    rook.moved = true;
                    self.square_mut(crossed)
                        .expect("crossed square exists")
                        .piece = Some(rook);
                }
                break;
            }
            scan = next;
        }
    }

    // ------------------------------------------------------------------
    // Check, checkmate, self-check simulation
    // ------------------------------------------------------------------

    fn find_king(&self, color: Color) -> Option<Coord> {
        self.squares.iter().find_map(|(&coord, square)| {
            square
                .piece
                .filter(|p| p.kind == PieceType::King && p.color == color)
                .map(|_| coord)
        })
    }

    /// True iff `color` has a king on a legal square that some enemy piece's
    /// pseudo-legal destination set contains.
    pub fn is_in_check(&self, color: Color) -> bool {
        if !self.kings.contains(&color) {
            return false;
        }
        let Some(king_coord) = self.find_king(color) else {
            return false;
        };
        if !self.is_legal_square(king_coord) {
            return false;
        }
        self.squares.iter().any(|(&coord, square)| {
            square.piece.is_some_and(|p| p.color != color)
                && pseudo_legal_destinations(self, coord).contains(&king_coord)
        })
    }

    /// True iff `color` holds a king, is in check, and no pseudo-legal move of
    /// any of its pieces escapes check. A color with no escaping moves while
    /// NOT in check is never checkmate.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        if !self.kings.contains(&color) {
            return false;
        }
        if !self.is_in_check(color) {
            return false;
        }
        let own_pieces: Vec<Coord> = self
            .squares
            .iter()
            .filter(|(_, square)| square.piece.is_some_and(|p| p.color == color))
            .map(|(&coord, _)| coord)
            .collect();
        for from in own_pieces {
            for to in pseudo_legal_destinations(self, from) {
                if !self.would_leave_king_in_check(color, from, to) {
                    return false;
                }
            }
        }
        true
    }

    /// Simulate `from -> to` and report whether `color`'s king would be
    /// attacked afterward. The guard restores the pre-move arrangement on
    /// every path, so rejection leaves no observable mutation.
    fn would_leave_king_in_check(&mut self, color: Color, from: Coord, to: Coord) -> bool {
        let sim = MoveSim::apply(self, from, to);
        sim.board().is_in_check(color)
    }

    // ------------------------------------------------------------------
    // Elimination and turn rotation
    // ------------------------------------------------------------------

    /// Strip every piece of each currently checkmated color and drop its
    /// king-presence entry. Runs after every executed move, before the turn
    /// advances, so the new current player is never a just-eliminated color.
    fn eliminate_checkmated(&mut self) {
        let candidates: Vec<Color> = self
            .variant
            .colors()
            .iter()
            .copied()
            .filter(|&c| self.kings.contains(&c))
            .collect();
        for color in candidates {
            if self.is_checkmate(color) {
                self.eliminate(color);
                info!(%color, "checkmated and eliminated");
            }
        }
    }

    fn eliminate(&mut self, color: Color) {
        for square in self.squares.values_mut() {
            if square.piece.is_some_and(|p| p.color == color) {
                square.piece = None;
            }
        }
        self.kings.remove(&color);
    }

    /// A color stays in the rotation while it holds a king or owns at least
    /// one piece on a legal square.
    pub fn is_color_active(&self, color: Color) -> bool {
        if self.kings.contains(&color) {
            return true;
        }
        self.squares
            .values()
            .any(|square| square.legal && square.piece.is_some_and(|p| p.color == color))
    }

    /// Active colors in the variant's turn order.
    pub fn active_colors(&self) -> Vec<Color> {
        self.variant
            .colors()
            .iter()
            .copied()
            .filter(|&c| self.is_color_active(c))
            .collect()
    }

    /// Step through the cycle until an active color is found, bounded to one
    /// full cycle so an empty board cannot loop forever.
    fn advance_turn(&mut self) {
        for _ in 0..self.variant.colors().len() {
            self.current_player = self.variant.next_color(self.current_player);
            if self.is_color_active(self.current_player) {
                return;
            }
        }
    }

    // ------------------------------------------------------------------
    // Snapshot save/load
    // ------------------------------------------------------------------

    /// Capture the current player and every occupied square. Empty and void
    /// squares are omitted.
    pub fn save(&self) -> Snapshot {
        let mut squares = std::collections::BTreeMap::new();
        for (&coord, square) in &self.squares {
            if let Some(piece) = square.piece {
                squares.insert(
                    coord.to_algebraic(),
                    SquareState {
                        piece: Some(PieceState {
                            color: piece.color,
                            kind: piece.kind,
                            moved: piece.moved,
                        }),
                    },
                );
            }
        }
        Snapshot {
            current_player: self.current_player,
            squares,
        }
    }

    /// Replace the whole position with the snapshot's. King-presence is
    /// rebuilt as kings are placed. The snapshot's shape is trusted beyond
    /// coordinate validity: no reachability or king-count checks.
    pub fn load(&mut self, snapshot: &Snapshot) -> Result<(), EngineError> {
        if !self.variant.colors().contains(&snapshot.current_player) {
            return Err(EngineError::CorruptSnapshot(
                snapshot.current_player.to_string(),
            ));
        }
        for square in self.squares.values_mut() {
            square.piece = None;
        }
        self.kings.clear();
        self.current_player = snapshot.current_player;

        for (key, state) in &snapshot.squares {
            let coord = Coord::from_algebraic(key)
                .map_err(|_| EngineError::CorruptSnapshot(key.clone()))?;
            if !self.squares.contains_key(&coord) {
                return Err(EngineError::CorruptSnapshot(key.clone()));
            }
            if let Some(piece_state) = &state.piece {
                if !self.variant.colors().contains(&piece_state.color) {
                    return Err(EngineError::CorruptSnapshot(key.clone()));
                }
                let mut piece = Piece::new(piece_state.kind, piece_state.color);
                piece.moved = piece_state.moved;
                self.place_piece(piece, coord)?;
            }
        }
        Ok(())
    }
}

/// Scoped self-check simulation: applies the minimal diff (moving piece,
/// captured piece) on construction and reverses it on drop, so an early
/// return or panic during evaluation can never corrupt the board. The
/// king-presence table is deliberately untouched; check evaluation locates
/// kings by scanning squares.
struct MoveSim<'a> {
    board: &'a mut Board,
    from: Coord,
    to: Coord,
    captured: Option<Piece>,
}

impl<'a> MoveSim<'a> {
    fn apply(board: &'a mut Board, from: Coord, to: Coord) -> Self {
        let moving = board
            .squares
            .get_mut(&from)
            .expect("simulation source exists")
            .piece
            .take()
            .expect("simulation source holds a piece");
        let captured = board
            .squares
            .get_mut(&to)
            .expect("simulation target exists")
            .piece
            .replace(moving);
        MoveSim {
            board,
            from,
            to,
            captured,
        }
    }

    fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for MoveSim<'_> {
    fn drop(&mut self) {
        let moving = self
            .board
            .squares
            .get_mut(&self.to)
            .expect("simulation target exists")
            .piece
            .take()
            .expect("simulation target holds the moving piece");
        self.board
            .squares
            .get_mut(&self.to)
            .expect("simulation target exists")
            .piece = self.captured.take();
        self.board
            .squares
            .get_mut(&self.from)
            .expect("simulation source exists")
            .piece = Some(moving);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for rank in (0..size).rev() {
            write!(f, "{:>2} ", rank + 1)?;
            for file in 0..size {
                let coord = Coord::new(file, rank);
                if !self.is_legal_square(coord) {
                    write!(f, "   ")?;
                } else if let Some(piece) = self.piece_at(coord) {
                    write!(f, " {}{}", piece.color.letter(), piece.kind.symbol())?;
                } else {
                    write!(f, "  .")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for file in 0..size {
            write!(f, "  {}", (b'a' + file) as char)?;
        }
        writeln!(f)?;
        write!(f, "turn: {}", self.current_player)
    }
}
