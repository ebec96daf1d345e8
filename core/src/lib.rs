use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub use agent::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use harness::*;
pub use types::*;
pub use view::*;

mod agent;
mod cell;
mod engine;
mod error;
mod generator;
mod harness;
mod types;
mod view;

/// Validated board dimensions and mine total.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Fails when either dimension is zero or the mines would fill (or
    /// overflow) the board. At least one safe cell must always exist.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines >= cell_total(rows, cols) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> Pos {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_total(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Standard difficulty presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(8, 8, 10),
            Self::Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Self::Advanced => GameConfig::new_unchecked(16, 30, 99),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Ground-truth mine placement. Immutable once built: exactly `mine_count`
/// cells carry a mine for the lifetime of the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Test-friendly constructor from explicit mine positions.
    pub fn from_mine_positions(size: Pos, mines: &[Pos]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.grid());
        for &pos in mines {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[pos.grid()] = true;
        }
        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Pos {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    /// Number of mines among the up-to-8 neighbors of `pos`.
    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        neighbors(pos, self.size())
            .filter(|&n| self[n])
            .count()
            .try_into()
            .unwrap()
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let size = self.size();
        if pos.0 < size.0 && pos.1 < size.1 {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

impl Index<Pos> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mine_mask[pos.grid()]
    }
}
