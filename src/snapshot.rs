//! Serde data model for the snapshot text format.
//!
//! The shape is fixed: a `current_player` name plus a map from algebraic
//! square keys to an optional piece record. Only occupied squares are
//! written; an absent `piece` field means an empty square. The engine
//! trusts everything beyond coordinate validity.

use crate::pieces::{Color, PieceType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_player: Color,
    pub squares: BTreeMap<String, SquareState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece: Option<PieceState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceState {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub moved: bool,
}
