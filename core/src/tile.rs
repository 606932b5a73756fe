use serde::{Deserialize, Serialize};

use crate::Coord2;

/// A single square of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub has_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Adjacent mine count, only meaningful when `!has_mine`.
    pub mine_count: u8,
    /// Transient marker set by a hint, cleared when the hint fades.
    pub is_hinted_mine: bool,
    /// Mine the player stepped on and survived by spending a chance.
    pub is_chance_used_mine: bool,
    /// Checkerboard shading, cosmetic only.
    pub is_dark_pattern: bool,
}

impl Tile {
    pub fn at((row, col): Coord2) -> Self {
        Self {
            is_dark_pattern: (u16::from(row) + u16::from(col)) % 2 == 0,
            ..Default::default()
        }
    }

    pub const fn is_revealed_safe(&self) -> bool {
        self.is_revealed && !self.has_mine
    }

    /// Mine that a hint may still point at.
    pub const fn is_hint_candidate(&self) -> bool {
        self.has_mine && !self.is_revealed && !self.is_flagged && !self.is_hinted_mine
    }
}
