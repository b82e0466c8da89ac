//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or assembling raw data.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// The same symbol appeared twice in one snapshot
    #[error("Duplicate symbol in universe: {0}")]
    DuplicateSymbol(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),
}
