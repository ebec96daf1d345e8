use serde::{Deserialize, Serialize};

/// Player-visible state of a single grid position.
///
/// `Mine` only ever appears after the game has been lost, when the board
/// discloses all mine locations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}
