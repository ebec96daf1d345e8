use rand::prelude::*;

use crate::*;

/// A single move chosen by the agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal(Pos),
    Flag(Pos),
}

/// Rule-based player. Works purely from a [`BoardView`], never from ground
/// truth, and picks exactly one action per call.
///
/// Strategies are tried in priority order, each either producing an action or
/// passing to the next:
/// 1. certain-mine: a clue whose unrevealed neighbors all must be mines gets
///    its first unflagged neighbor flagged;
/// 2. certain-safe: a clue already matched by its flags gets its first hidden
///    neighbor revealed;
/// 3. guess: a uniformly random hidden, unflagged cell.
///
/// The deductions scan in row-major order, so with a fixed rng seed the whole
/// play-out is deterministic.
#[derive(Clone, Debug)]
pub struct Agent {
    rng: SmallRng,
}

impl Agent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Choose the next action. `None` only when no hidden unflagged cell is
    /// left, which cannot happen in a consistent in-progress game.
    pub fn decide(&mut self, view: &BoardView) -> Option<Action> {
        if let Some(action) = Self::certain_mine(view) {
            log::debug!("deduced mine: {:?}", action);
            return Some(action);
        }
        if let Some(action) = Self::certain_safe(view) {
            log::debug!("deduced safe: {:?}", action);
            return Some(action);
        }
        let guess = self.guess(view);
        log::debug!("no deduction, guessing: {:?}", guess);
        guess
    }

    /// A clue `k` with exactly `k` unrevealed (hidden or flagged) neighbors
    /// makes every one of them a mine.
    fn certain_mine(view: &BoardView) -> Option<Action> {
        for (clue, count) in view.revealed_clues() {
            let unrevealed = view
                .neighbors(clue)
                .filter(|&n| view.cell(n).is_unrevealed())
                .count();
            if unrevealed != usize::from(count) {
                continue;
            }
            if let Some(target) = view
                .neighbors(clue)
                .find(|&n| view.cell(n) == Cell::Hidden)
            {
                return Some(Action::Flag(target));
            }
        }
        None
    }

    /// A clue `k` with `k` flagged neighbors makes its remaining hidden
    /// neighbors safe.
    fn certain_safe(view: &BoardView) -> Option<Action> {
        for (clue, count) in view.revealed_clues() {
            let flagged = view
                .neighbors(clue)
                .filter(|&n| view.cell(n) == Cell::Flagged)
                .count();
            if flagged != usize::from(count) {
                continue;
            }
            if let Some(target) = view
                .neighbors(clue)
                .find(|&n| view.cell(n) == Cell::Hidden)
            {
                return Some(Action::Reveal(target));
            }
        }
        None
    }

    fn guess(&mut self, view: &BoardView) -> Option<Action> {
        let pool: Vec<Pos> = view.hidden_unflagged().collect();
        pool.choose(&mut self.rng).map(|&pos| Action::Reveal(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_of(game: &Game) -> BoardView {
        game.snapshot()
    }

    #[test]
    fn flags_a_forced_mine() {
        // 2x1 board: revealing the safe cell shows a 1 with a single
        // unrevealed neighbor, which must be the mine.
        let layout = MineLayout::from_mine_positions((2, 1), &[(0, 0)]).unwrap();
        let mut game = Game::with_layout(layout);
        game.reveal((1, 0)).unwrap();

        let action = Agent::new(0).decide(&view_of(&game));

        assert_eq!(action, Some(Action::Flag((0, 0))));
    }

    #[test]
    fn reveals_a_forced_safe_cell() {
        // Clue 1 at (1,0) with its mine already flagged: the remaining hidden
        // neighbor (2,0) is certainly safe.
        let layout = MineLayout::from_mine_positions((3, 1), &[(0, 0)]).unwrap();
        let mut game = Game::with_layout(layout);
        game.reveal((1, 0)).unwrap();
        game.flag((0, 0)).unwrap();

        let action = Agent::new(0).decide(&view_of(&game));

        assert_eq!(action, Some(Action::Reveal((2, 0))));
    }

    #[test]
    fn certain_mine_takes_priority_over_guessing() {
        let layout = MineLayout::from_mine_positions((2, 1), &[(0, 0)]).unwrap();
        let mut game = Game::with_layout(layout);
        game.reveal((1, 0)).unwrap();

        // Any seed must produce the same deduction.
        for seed in 0..10 {
            assert_eq!(
                Agent::new(seed).decide(&view_of(&game)),
                Some(Action::Flag((0, 0)))
            );
        }
    }

    #[test]
    fn guesses_only_hidden_unflagged_cells() {
        let layout = MineLayout::from_mine_positions((2, 2), &[(0, 0)]).unwrap();
        let game = Game::with_layout(layout);

        // Fresh board: no clues, every decision is a guess at a hidden cell.
        for seed in 0..20 {
            match Agent::new(seed).decide(&view_of(&game)) {
                Some(Action::Reveal(pos)) => {
                    assert_eq!(game.cell(pos), Cell::Hidden);
                }
                other => panic!("expected a reveal guess, got {other:?}"),
            }
        }
    }

    #[test]
    fn never_selects_a_revealed_cell() {
        let layout = MineLayout::from_mine_positions((3, 3), &[(0, 0), (0, 2)]).unwrap();
        let mut game = Game::with_layout(layout);
        game.reveal((2, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);

        for seed in 0..20 {
            let action = Agent::new(seed).decide(&view_of(&game)).unwrap();
            let target = match action {
                Action::Reveal(pos) | Action::Flag(pos) => pos,
            };
            assert!(game.cell(target).is_unrevealed(), "picked {target:?}");
        }
    }

    #[test]
    fn exhausted_board_yields_no_action() {
        let layout = MineLayout::from_mine_positions((1, 2), &[(0, 0)]).unwrap();
        let mut game = Game::with_layout(layout);
        game.flag((0, 0)).unwrap();
        game.flag((0, 1)).unwrap();

        assert_eq!(Agent::new(0).decide(&view_of(&game)), None);
    }
}
