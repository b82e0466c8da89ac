//! Error type for a scoring pass.

use hobart_data::DataError;
use hobart_factors::FactorError;
use hobart_output::ExportError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a scoring pass.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw data could not be loaded or assembled
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Ranking or aggregation failed
    #[error("Factor error: {0}")]
    Factor(#[from] FactorError),

    /// An artifact could not be rendered or stored
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration values are out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
