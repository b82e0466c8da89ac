//! Error types for factor computation.

use crate::category::Category;
use crate::factor::FactorId;
use thiserror::Error;

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;

/// Errors raised while ranking and scoring a universe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactorError {
    /// The universe has no stocks.
    #[error("Universe is empty")]
    EmptyUniverse,

    /// A column has no observed value, so no rank can be assigned.
    #[error("Column has no observed values")]
    NoObservations,

    /// A factor has no observed value for any stock in the universe.
    #[error("Factor {0} has no observed values")]
    EmptyFactor(FactorId),

    /// A factor needed for aggregation was not ranked.
    #[error("Factor {0} has not been ranked")]
    MissingFactor(FactorId),

    /// A category needed for the final score was not aggregated.
    #[error("Category {0} has not been aggregated")]
    MissingCategory(Category),

    /// Columns of one pass disagree on the universe size.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Universe size
        expected: usize,
        /// Length of the offending column
        actual: usize,
    },

    /// A column computation failed inside polars.
    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<polars::prelude::PolarsError> for FactorError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Polars(err.to_string())
    }
}
