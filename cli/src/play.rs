use std::io::{self, BufRead, Write};

use minesweeper_core::{
    Coord, Difficulty, Game, GameError, GameStatus, Pos, RevealOutcome,
};

/// Interactive terminal session. The session owns exactly one `Game` and
/// replaces it wholesale on a new-game command, so a difficulty change never
/// mutates a running board in place.
pub fn run_session(difficulty: Difficulty, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut difficulty = difficulty;
    let mut seed = seed;
    let mut game = Game::new(difficulty.config(), seed);

    println!("minesweeper — {difficulty:?}");
    println!("commands: r ROW COL (reveal), f ROW COL (flag), n [DIFFICULTY] (new game), q (quit)");
    render(&game);

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["q"] | ["quit"] => return Ok(()),
            ["n", rest @ ..] => {
                if let Some(&name) = rest.first() {
                    match parse_difficulty(name) {
                        Some(parsed) => difficulty = parsed,
                        None => {
                            eprintln!("unknown difficulty: {name}");
                            continue;
                        }
                    }
                }
                seed = seed.wrapping_add(1);
                game = Game::new(difficulty.config(), seed);
                println!("new game — {difficulty:?}");
                render(&game);
            }
            ["r", row, col] => match parse_pos(row, col) {
                Some(pos) => {
                    apply_reveal(&mut game, pos);
                    render(&game);
                }
                None => eprintln!("usage: r ROW COL"),
            },
            ["f", row, col] => match parse_pos(row, col) {
                Some(pos) => {
                    apply_flag(&mut game, pos);
                    render(&game);
                }
                None => eprintln!("usage: f ROW COL"),
            },
            _ => eprintln!("unrecognized command: {line}"),
        }
    }
}

fn apply_reveal(game: &mut Game, pos: Pos) {
    match game.reveal(pos) {
        Ok(reveal) => match reveal.outcome {
            RevealOutcome::HitMine => println!("boom — you lost"),
            RevealOutcome::Won => println!("cleared — you won!"),
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        },
        Err(GameError::GameOver) => println!("the game is over, start a new one with n"),
        Err(err) => eprintln!("{err}"),
    }
}

fn apply_flag(game: &mut Game, pos: Pos) {
    match game.flag(pos) {
        Ok(_) => {}
        // Flag on an open cell is harmless, just ignore it.
        Err(GameError::FlagRevealed) => {}
        Err(GameError::GameOver) => println!("the game is over, start a new one with n"),
        Err(err) => eprintln!("{err}"),
    }
}

fn render(game: &Game) {
    print!("{}", game.snapshot());
    if game.status() == GameStatus::InProgress {
        println!("mines left: {}", game.mines_left());
    }
}

fn parse_pos(row: &str, col: &str) -> Option<Pos> {
    let row: Coord = row.parse().ok()?;
    let col: Coord = col.parse().ok()?;
    Some((row, col))
}

fn parse_difficulty(name: &str) -> Option<Difficulty> {
    match name.to_ascii_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "intermediate" => Some(Difficulty::Intermediate),
        "advanced" => Some(Difficulty::Advanced),
        _ => None,
    }
}
