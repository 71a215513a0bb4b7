use crate::coord::Coord;
use crate::pieces::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two rule sets the engine implements. Both share the same board
/// machinery; the variant pins down geometry, player cycle, and pawn
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Standard two-player chess on 8x8.
    Classic,
    /// Four-player chess on 16x16 with the four 4x4 corner blocks voided,
    /// leaving a cross-shaped fortress.
    Fortress,
}

impl Variant {
    pub const fn size(self) -> u8 {
        match self {
            Variant::Classic => 8,
            Variant::Fortress => 16,
        }
    }

    /// Void squares are part of the board rectangle but can never be occupied.
    pub fn is_void(self, coord: Coord) -> bool {
        match self {
            Variant::Classic => false,
            Variant::Fortress => {
                (coord.file < 4 || coord.file >= 12) && (coord.rank < 4 || coord.rank >= 12)
            }
        }
    }

    /// The variant's colors in turn order. Fortress rotation is pinned to
    /// Yellow -> Red -> Blue -> Green (counter-clockwise around the board).
    pub const fn colors(self) -> &'static [Color] {
        match self {
            Variant::Classic => &[Color::White, Color::Black],
            Variant::Fortress => &[Color::Yellow, Color::Red, Color::Blue, Color::Green],
        }
    }

    pub fn first_color(self) -> Color {
        self.colors()[0]
    }

    pub fn next_color(self, color: Color) -> Color {
        let cycle = self.colors();
        let index = cycle
            .iter()
            .position(|&c| c == color)
            .expect("color does not play in this variant");
        cycle[(index + 1) % cycle.len()]
    }

    /// A pawn's forward step as a (delta_file, delta_rank) unit vector.
    /// Fortress side players advance along the file axis; Green is pinned to
    /// -rank (from the top edge toward the center).
    pub fn pawn_step(self, color: Color) -> (i16, i16) {
        match (self, color) {
            (Variant::Classic, Color::White) => (0, 1),
            (Variant::Classic, Color::Black) => (0, -1),
            (Variant::Fortress, Color::Red) => (0, 1),
            (Variant::Fortress, Color::Green) => (0, -1),
            (Variant::Fortress, Color::Yellow) => (1, 0),
            (Variant::Fortress, Color::Blue) => (-1, 0),
            _ => panic!("{color} does not play in {self}"),
        }
    }

    /// Whether `coord` lies on the line this color's pawns start from, which
    /// gates the double step.
    pub fn on_pawn_start(self, color: Color, coord: Coord) -> bool {
        match (self, color) {
            (Variant::Classic, Color::White) => coord.rank == 1,
            (Variant::Classic, Color::Black) => coord.rank == 6,
            (Variant::Fortress, Color::Red) => coord.rank == 1,
            (Variant::Fortress, Color::Green) => coord.rank == 14,
            (Variant::Fortress, Color::Yellow) => coord.file == 1,
            (Variant::Fortress, Color::Blue) => coord.file == 14,
            _ => false,
        }
    }

    /// Castling happens along the color's back line, which runs perpendicular
    /// to its pawns' forward axis.
    pub fn castle_dirs(self, color: Color) -> [(i16, i16); 2] {
        let (delta_file, _) = self.pawn_step(color);
        if delta_file == 0 {
            [(1, 0), (-1, 0)]
        } else {
            [(0, 1), (0, -1)]
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Classic => write!(f, "classic"),
            Variant::Fortress => write!(f, "fortress"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Variant::Classic),
            "fortress" => Ok(Variant::Fortress),
            other => Err(format!("unknown variant \"{other}\" (expected classic or fortress)")),
        }
    }
}
