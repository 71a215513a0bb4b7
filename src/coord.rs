use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest board any variant uses. Algebraic parsing accepts up to this size;
/// a smaller board rejects out-of-rectangle coordinates itself.
pub const MAX_BOARD_SIZE: u8 = 16;

/// A (file, rank) pair, zero-based internally. `a1` is (0, 0), `p16` is (15, 15).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub file: u8,
    pub rank: u8,
}

impl Coord {
    pub const fn new(file: u8, rank: u8) -> Self {
        Coord { file, rank }
    }

    /// Parse algebraic notation like "e4" or "p16" (lowercase file letter).
    pub fn from_algebraic(s: &str) -> Result<Self, EngineError> {
        let mut chars = s.chars();
        let file_char = chars
            .next()
            .ok_or_else(|| EngineError::InvalidCoordinate(s.to_string()))?;
        let rank_str = chars.as_str();

        if !file_char.is_ascii_lowercase() {
            return Err(EngineError::InvalidCoordinate(s.to_string()));
        }
        let file = file_char as u8 - b'a';
        let rank: u8 = rank_str
            .parse::<u8>()
            .ok()
            .and_then(|r| r.checked_sub(1))
            .ok_or_else(|| EngineError::InvalidCoordinate(s.to_string()))?;

        if file >= MAX_BOARD_SIZE || rank >= MAX_BOARD_SIZE {
            return Err(EngineError::InvalidCoordinate(s.to_string()));
        }
        Ok(Coord { file, rank })
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }

    /// Offset by (delta_file, delta_rank), staying inside a `size`-wide board.
    pub fn offset(self, delta_file: i16, delta_rank: i16, size: u8) -> Option<Coord> {
        let file = self.file as i16 + delta_file;
        let rank = self.rank as i16 + delta_rank;
        if file < 0 || rank < 0 || file >= size as i16 || rank >= size as i16 {
            return None;
        }
        Some(Coord {
            file: file as u8,
            rank: rank as u8,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
