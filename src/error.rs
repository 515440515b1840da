use thiserror::Error;

/// Failures of the scoring engine and the status extractor.
///
/// All of them are deterministic for a given input; none is worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown target rank: {0}")]
    UnknownRank(String),

    #[error("Could not read status from screenshot: {0}")]
    ExtractionFailed(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
