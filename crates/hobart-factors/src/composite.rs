//! Final composite score.
//!
//! The final score is the unweighted mean of the five category scores. Like
//! every input it is a rank average, so a lower final score is better.

use crate::category::{Category, CategoryScores};
use crate::error::{FactorError, Result};

/// Mean of the five category scores for every stock.
///
/// Every category in [`Category::ALL`] must be present and cover the same
/// number of stocks.
pub fn final_scores(categories: &[CategoryScores]) -> Result<Vec<f64>> {
    let mut columns = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let scores = categories
            .iter()
            .find(|c| c.category == category)
            .ok_or(FactorError::MissingCategory(category))?;
        columns.push(&scores.scores);
    }

    let n = columns[0].len();
    if let Some(bad) = columns.iter().find(|c| c.len() != n) {
        return Err(FactorError::LengthMismatch {
            expected: n,
            actual: bad.len(),
        });
    }

    let count = columns.len() as f64;
    Ok((0..n)
        .map(|i| columns.iter().map(|c| c[i]).sum::<f64>() / count)
        .collect())
}
