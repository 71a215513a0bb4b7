use crate::coord::Coord;
use crate::pieces::Color;
use thiserror::Error;

/// Everything a caller can get back from a rejected request. All of these are
/// recoverable at the call site; the board is left untouched when one is
/// returned from a move request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("square {0} is outside the playable region")]
    IllegalSquare(Coord),
    #[error("no piece at {0}")]
    EmptySource(Coord),
    #[error("it is not {0}'s turn")]
    WrongTurn(Color),
    #[error("piece cannot move from {from} to {to}")]
    IllegalDestination { from: Coord, to: Coord },
    #[error("moving from {from} to {to} would leave the king in check")]
    SelfCheck { from: Coord, to: Coord },
    #[error("square {0} is already occupied")]
    OccupiedOnPlace(Coord),
    #[error("corrupt snapshot: unknown square key \"{0}\"")]
    CorruptSnapshot(String),
}
