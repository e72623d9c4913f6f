// Error types for the standings engine
// Unknown teams and out-of-range positions are not errors; they produce empty results instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("round label '{label}' cannot be ordered")]
    InvalidRoundLabel { label: String },

    #[error("{remaining} remaining fixtures exceed the exact solver ceiling of {limit}")]
    ExactLimitExceeded { remaining: usize, limit: usize },

    #[error("team '{name}' appears more than once")]
    DuplicateTeam { name: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
