use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs positive dimensions and fewer mines than cells")]
    InvalidConfig,
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Cannot flag a revealed cell")]
    FlagRevealed,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("Trial count must be positive")]
    NoTrials,
}

pub type Result<T> = std::result::Result<T, GameError>;
