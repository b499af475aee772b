//! Read model handed to presentation layers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cells, `height * width` long
    pub board: Vec<Cell>,
    pub current: PieceSnapshot,
    pub ghost_y: i32,
    pub next: PieceKind,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines_cleared: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub back_to_back: bool,
    pub paused: bool,
    pub game_over: bool,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    /// Cell at (x, y), None past the edges
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board.get(y * self.width + x).copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
