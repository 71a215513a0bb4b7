//! Rules engine for four-player fortress chess and standard two-player chess.
//!
//! The board owns all state: square legality, per-piece move geometry,
//! check/checkmate detection, player elimination, and turn rotation.
//! Rendering, input handling, and file I/O are the caller's business; the
//! engine exposes a move API and a snapshot contract.

pub mod board;
pub mod coord;
pub mod error;
pub mod moves;
pub mod pieces;
pub mod snapshot;
pub mod variant;

pub use board::Board;
pub use coord::Coord;
pub use error::EngineError;
pub use pieces::{Color, Piece, PieceType};
pub use snapshot::Snapshot;
pub use variant::Variant;
