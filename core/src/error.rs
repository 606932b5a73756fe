use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, requested {requested} but only {capacity} fit outside the safe zone")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("Invalid difficulty settings: {0}")]
    InvalidConfig(String),
    #[error("Could not parse difficulty table: {0}")]
    ConfigParse(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reported by a score store, logged by the session and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Score store unavailable: {0}")]
    Unavailable(String),
    #[error("Score store rejected the record: {0}")]
    Rejected(String),
}
