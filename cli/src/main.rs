use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweeper_core::{BatchReport, Difficulty, Harness};

mod play;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Intermediate,
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

/// Minesweeper with an automated test mode.
///
/// Without `--test` an interactive terminal session starts; with `--test N`
/// the rule-based agent plays N games and only the statistics are printed.
#[derive(Parser, Debug)]
#[command(name = "minesweeper", version, about)]
struct Cli {
    /// Run the agent for this many trials instead of playing interactively
    #[arg(short = 't', long = "test", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    test: Option<u32>,

    /// Board preset used for both modes
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Seed for mine placement and agent guesses; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the batch summary as JSON
    #[arg(long, requires = "test")]
    json: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let difficulty = Difficulty::from(cli.difficulty);
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::debug!("difficulty {:?}, seed {}", difficulty, seed);

    match cli.test {
        Some(trials) => run_batch(difficulty, seed, trials, cli.json),
        None => play::run_session(difficulty, seed),
    }
}

fn run_batch(
    difficulty: Difficulty,
    seed: u64,
    trials: u32,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let harness = Harness::new(difficulty.config(), seed);
    let report = harness.run(trials)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print_summary(&report, difficulty, seed);
    }
    Ok(())
}

fn print_summary(report: &BatchReport, difficulty: Difficulty, seed: u64) {
    let s = &report.summary;
    println!("difficulty: {difficulty:?}  seed: {seed}");
    println!("trials:     {}", s.trials);
    println!("won:        {}", s.wins);
    println!("lost:       {}", s.losses);
    println!("win rate:   {:.1}%", s.win_rate * 100.0);
    println!("avg moves:  {:.1}", s.avg_moves);
}
