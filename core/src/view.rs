use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::*;

/// Immutable snapshot of the player-visible board. This is the only
/// information channel into the agent and into renderers; it carries no mine
/// positions until a lost game has disclosed them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    size: Pos,
    mine_count: CellCount,
    cells: Array2<Cell>,
}

impl BoardView {
    pub fn from_game(game: &Game) -> Self {
        let size = game.size();
        let mut cells = Array2::default(size.grid());
        for pos in positions(size) {
            cells[pos.grid()] = game.cell(pos);
        }
        Self {
            size,
            mine_count: game.config().mines,
            cells,
        }
    }

    pub fn size(&self) -> Pos {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.grid()]
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        positions(self.size)
    }

    /// Hidden cells without a flag, the agent's guessing pool.
    pub fn hidden_unflagged(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions()
            .filter(|&pos| self.cell(pos) == Cell::Hidden)
    }

    /// Revealed numbered cells, `(position, adjacent mine count)`.
    pub fn revealed_clues(&self) -> impl Iterator<Item = (Pos, u8)> + '_ {
        self.positions().filter_map(|pos| match self.cell(pos) {
            Cell::Revealed(count) => Some((pos, count)),
            _ => None,
        })
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        neighbors(pos, self.size)
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size;
        write!(f, "   ")?;
        for c in 0..cols {
            write!(f, "{:>2}", c)?;
        }
        writeln!(f)?;
        for r in 0..rows {
            write!(f, "{:>2} ", r)?;
            for c in 0..cols {
                let glyph = match self.cell((r, c)) {
                    Cell::Hidden => '.',
                    Cell::Flagged => 'F',
                    Cell::Revealed(0) => ' ',
                    Cell::Revealed(n) => (b'0' + n) as char,
                    Cell::Mine => '*',
                };
                write!(f, " {}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
