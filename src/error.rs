use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Quiz configuration not found: {0}")]
    MissingConfig(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type QfResult<T> = Result<T, QuizError>;

/// Failure of a single clipboard path. Never surfaced to the user.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard mechanism unavailable")]
    Unavailable,

    #[error("clipboard rejected the write: {0}")]
    Rejected(String),

    #[error("clipboard IO Error: {0}")]
    Io(#[from] std::io::Error),
}
