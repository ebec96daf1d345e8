use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// Valid transitions: `InProgress -> Won` and `InProgress -> Lost`, nothing
/// else. Terminal states are immutable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was not a hidden cell, nothing happened.
    NoChange,
    Revealed,
    HitMine,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Placed,
    Removed,
}

/// Result of a [`Game::reveal`] call: the outcome plus every position whose
/// cell became visible, so callers can repaint or update beliefs without
/// rescanning the whole board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    pub newly_revealed: Vec<Pos>,
}

impl Reveal {
    fn no_change() -> Self {
        Self {
            outcome: RevealOutcome::NoChange,
            newly_revealed: Vec::new(),
        }
    }
}

/// One game from first reveal to a terminal status.
///
/// Mine placement is lazy: a game created with [`Game::new`] holds no layout
/// until the first reveal, which generates one with the revealed cell's whole
/// neighborhood kept clear. [`Game::with_layout`] skips that and plays on a
/// fixed layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    layout: Option<MineLayout>,
    board: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Pos>,
    seed: u64,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            layout: None,
            board: Array2::default(config.size().grid()),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::default(),
            triggered_mine: None,
            seed,
        }
    }

    /// Play on a fixed layout. First-move safety is whatever the layout says.
    pub fn with_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        let config = GameConfig::new_unchecked(size.0, size.1, layout.mine_count());
        Self {
            config,
            layout: Some(layout),
            board: Array2::default(size.grid()),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::default(),
            triggered_mine: None,
            seed: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Pos {
        self.config.size()
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        self.board[pos.grid()]
    }

    pub fn revealed_cells(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines minus placed flags; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// The visible snapshot, the only channel into agents and renderers.
    pub fn snapshot(&self) -> BoardView {
        BoardView::from_game(self)
    }

    /// Reveal a hidden cell. A zero-adjacency reveal flood-fills its connected
    /// zero region plus the bordering numbered frontier. Revealing a mine
    /// loses the game and discloses every mine on the board.
    pub fn reveal(&mut self, pos: Pos) -> Result<Reveal> {
        let pos = self.validate_pos(pos)?;
        self.check_in_progress()?;

        if !self.board[pos.grid()].is_hidden() {
            return Ok(Reveal::no_change());
        }

        if self.layout.is_none() {
            // First reveal on a lazy game: place the mines now, keeping this
            // cell's neighborhood clear.
            let generator =
                RandomLayoutGenerator::new(self.seed, pos, FirstRevealSafety::ZeroNeighborhood);
            self.layout = Some(generator.generate(self.config));
            log::debug!("placed {} mines after first reveal at {:?}", self.config.mines, pos);
        }

        let hit_mine = self
            .layout
            .as_ref()
            .expect("layout placed above")
            .contains_mine(pos);

        if hit_mine {
            self.board[pos.grid()] = Cell::Mine;
            self.triggered_mine = Some(pos);
            self.status = GameStatus::Lost;
            self.disclose_mines();
            return Ok(Reveal {
                outcome: RevealOutcome::HitMine,
                newly_revealed: vec![pos],
            });
        }

        let newly_revealed = self.reveal_flood(pos);
        debug_assert!(!newly_revealed.is_empty());

        let outcome = if self.revealed_count == self.config.safe_cells() {
            self.status = GameStatus::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };
        Ok(Reveal {
            outcome,
            newly_revealed,
        })
    }

    /// Toggle a flag on a hidden cell.
    pub fn flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        let pos = self.validate_pos(pos)?;
        self.check_in_progress()?;

        match self.board[pos.grid()] {
            Cell::Hidden => {
                self.board[pos.grid()] = Cell::Flagged;
                self.flagged_count += 1;
                Ok(FlagOutcome::Placed)
            }
            Cell::Flagged => {
                self.board[pos.grid()] = Cell::Hidden;
                self.flagged_count -= 1;
                Ok(FlagOutcome::Removed)
            }
            Cell::Revealed(_) | Cell::Mine => Err(GameError::FlagRevealed),
        }
    }

    /// Iterative flood fill from a known-safe cell. Returns every newly
    /// revealed position. Flagged cells are left alone.
    fn reveal_flood(&mut self, start: Pos) -> Vec<Pos> {
        let layout = self.layout.as_ref().expect("layout exists after first reveal");
        let size = self.size();

        let mut opened = Vec::new();
        let mut visited = BTreeSet::from([start]);
        let mut frontier = VecDeque::from([start]);

        while let Some(pos) = frontier.pop_front() {
            if !self.board[pos.grid()].is_hidden() {
                continue;
            }

            let count = layout.adjacent_mines(pos);
            self.board[pos.grid()] = Cell::Revealed(count);
            self.revealed_count += 1;
            opened.push(pos);
            log::trace!("revealed {:?} with count {}", pos, count);

            if count == 0 {
                frontier.extend(
                    neighbors(pos, size)
                        .filter(|&n| self.board[n.grid()].is_hidden())
                        .filter(|n| visited.insert(*n)),
                );
            }
        }

        log::debug!("reveal at {:?} opened {} cells", start, opened.len());
        opened
    }

    /// End-of-game disclosure after a loss: every mine becomes visible,
    /// including flagged ones (the flag was right, the cell still shows the
    /// mine underneath when the game is over).
    fn disclose_mines(&mut self) {
        let layout = self.layout.as_ref().expect("lost games have a layout");
        for pos in positions(layout.size()) {
            if layout.contains_mine(pos) {
                self.board[pos.grid()] = Cell::Mine;
            }
        }
        log::debug!("game lost, disclosed {} mines", layout.mine_count());
    }

    fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let (rows, cols) = self.size();
        if pos.0 < rows && pos.1 < cols {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
