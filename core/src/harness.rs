use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialOutcome {
    Won,
    Lost,
}

/// One agent-driven game played to completion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    pub outcome: TrialOutcome,
    pub moves: u32,
}

/// Aggregate statistics over a batch of trials.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub trials: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub avg_moves: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<TrialResult>,
    pub summary: BatchSummary,
}

/// Runs the agent against freshly generated games, one at a time, with no
/// rendering. One harness seed reproduces the whole batch: every trial mixes
/// the batch seed with its index for both the layout and the agent rng.
#[derive(Copy, Clone, Debug)]
pub struct Harness {
    config: GameConfig,
    seed: u64,
}

impl Harness {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    pub fn run(&self, trials: u32) -> Result<BatchReport> {
        if trials == 0 {
            return Err(GameError::NoTrials);
        }

        let mut results = Vec::with_capacity(trials as usize);
        for trial in 0..trials {
            let result = self.run_trial(trial);
            log::debug!(
                "trial {}: {:?} after {} moves",
                trial,
                result.outcome,
                result.moves
            );
            results.push(result);
        }

        let summary = summarize(&results);
        log::info!(
            "{} trials: {} won, {} lost, win rate {:.1}%",
            summary.trials,
            summary.wins,
            summary.losses,
            summary.win_rate * 100.0
        );
        Ok(BatchReport { results, summary })
    }

    fn run_trial(&self, trial: u32) -> TrialResult {
        let trial_seed = mix_seed(self.seed, trial);
        let mut game = Game::new(self.config, trial_seed);
        let mut agent = Agent::new(trial_seed ^ 0x5eed);
        let mut moves = 0u32;

        while !game.is_finished() {
            let view = game.snapshot();
            let action = agent
                .decide(&view)
                .expect("agent must act while the game is in progress");
            moves += 1;

            match action {
                Action::Reveal(pos) => {
                    let reveal = game.reveal(pos).expect("in-progress game accepts reveals");
                    // The agent only targets hidden cells; a no-change reveal
                    // means its view drifted from the board, which would
                    // poison every later statistic.
                    assert_ne!(
                        reveal.outcome,
                        RevealOutcome::NoChange,
                        "agent revealed a non-hidden cell at {pos:?}"
                    );
                }
                Action::Flag(pos) => {
                    game.flag(pos).expect("in-progress game accepts flags");
                }
            }
        }

        let outcome = match game.status() {
            GameStatus::Won => TrialOutcome::Won,
            GameStatus::Lost => TrialOutcome::Lost,
            GameStatus::InProgress => unreachable!("loop exits only on a terminal status"),
        };
        TrialResult { outcome, moves }
    }
}

fn summarize(results: &[TrialResult]) -> BatchSummary {
    let trials = results.len() as u32;
    let wins = results
        .iter()
        .filter(|r| r.outcome == TrialOutcome::Won)
        .count() as u32;
    let total_moves: u64 = results.iter().map(|r| u64::from(r.moves)).sum();
    BatchSummary {
        trials,
        wins,
        losses: trials - wins,
        win_rate: f64::from(wins) / f64::from(trials),
        avg_moves: total_moves as f64 / f64::from(trials),
    }
}

/// SplitMix64 step over the batch seed and trial index.
fn mix_seed(seed: u64, trial: u32) -> u64 {
    let mut z = seed.wrapping_add(u64::from(trial).wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_trials_is_an_error() {
        let harness = Harness::new(Difficulty::Easy.config(), 0);
        assert_eq!(harness.run(0), Err(GameError::NoTrials));
    }

    #[test]
    fn runs_exactly_the_requested_trials() {
        let report = Harness::new(Difficulty::Easy.config(), 1).run(10).unwrap();

        assert_eq!(report.results.len(), 10);
        assert_eq!(report.summary.trials, 10);
        assert_eq!(report.summary.wins + report.summary.losses, 10);
        assert!(report.results.iter().all(|r| r.moves >= 1));
    }

    #[test]
    fn fixed_seed_reproduces_the_batch() {
        let config = Difficulty::Easy.config();
        let a = Harness::new(config, 99).run(5).unwrap();
        let b = Harness::new(config, 99).run(5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_vary_the_trials() {
        let config = Difficulty::Easy.config();
        let a = Harness::new(config, 1).run(8).unwrap();
        let b = Harness::new(config, 2).run(8).unwrap();
        // Move counts differing anywhere is enough to show the seed matters.
        assert_ne!(a.results, b.results);
    }

    #[test]
    fn summary_rates_are_consistent() {
        let report = Harness::new(Difficulty::Easy.config(), 7).run(20).unwrap();
        let s = report.summary;

        assert!((0.0..=1.0).contains(&s.win_rate));
        assert!((s.win_rate - f64::from(s.wins) / 20.0).abs() < 1e-12);
        assert!(s.avg_moves >= 1.0);
    }

    #[test]
    fn agent_loop_plays_a_forced_position_to_a_win() {
        // 3x1 with the mine at one end and the middle already revealed: the
        // deduction rules alone finish the game, no guessing involved.
        let layout = MineLayout::from_mine_positions((3, 1), &[(0, 0)]).unwrap();
        let mut game = Game::with_layout(layout);
        game.reveal((1, 0)).unwrap();
        let mut agent = Agent::new(0);

        while !game.is_finished() {
            match agent.decide(&game.snapshot()).unwrap() {
                Action::Reveal(pos) => {
                    game.reveal(pos).unwrap();
                }
                Action::Flag(pos) => {
                    game.flag(pos).unwrap();
                }
            }
        }

        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.cell((0, 0)), Cell::Flagged);
    }
}
