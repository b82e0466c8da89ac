//! Factor categories and rank aggregation.
//!
//! Each category score is the equally weighted mean of its member factors'
//! ranks. Z-scores do not enter the aggregation.

use crate::error::{FactorError, Result};
use crate::factor::FactorId;
use crate::table::RankedFactors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Cheapness relative to earnings, cash flow and sales
    Value,
    /// Trailing price strength
    Momentum,
    /// Market and total risk
    Risk,
    /// Company size and liquidity
    Size,
    /// Balance sheet and margin quality
    Quality,
}

impl Category {
    /// Every category, in final score order.
    pub const ALL: [Self; 5] = [
        Self::Value,
        Self::Momentum,
        Self::Risk,
        Self::Size,
        Self::Quality,
    ];

    /// Lowercase name, used for column headers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Momentum => "momentum",
            Self::Risk => "risk",
            Self::Size => "size",
            Self::Quality => "quality",
        }
    }

    /// Member factors, each weighted equally.
    pub const fn members(self) -> &'static [FactorId] {
        match self {
            Self::Value => &[
                FactorId::EarningsYield,
                FactorId::EbitdaToEv,
                FactorId::SalesYield,
            ],
            Self::Momentum => &[FactorId::Momentum12m1m],
            Self::Risk => &[FactorId::Beta, FactorId::Volatility90d],
            Self::Size => &[FactorId::SqrtMarketCap, FactorId::AvgValueTraded],
            Self::Quality => &[FactorId::DebtToEquity, FactorId::GrossMargin],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-stock scores of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScores {
    /// Category the scores belong to.
    pub category: Category,
    /// Mean member rank per stock, in universe order.
    pub scores: Vec<f64>,
}

/// Mean of the member factors' ranks for every stock.
pub fn aggregate(category: Category, ranked: &RankedFactors) -> Result<CategoryScores> {
    let members = category.members();
    let n = ranked.len();
    let mut sums = vec![0.0_f64; n];

    for &factor in members {
        let column = ranked
            .column(factor)
            .ok_or(FactorError::MissingFactor(factor))?;
        if column.len() != n {
            return Err(FactorError::LengthMismatch {
                expected: n,
                actual: column.len(),
            });
        }
        for (sum, rank) in sums.iter_mut().zip(&column.ranks) {
            *sum += rank;
        }
    }

    let count = members.len() as f64;
    Ok(CategoryScores {
        category,
        scores: sums.into_iter().map(|s| s / count).collect(),
    })
}

/// Aggregate every category.
pub fn aggregate_all(ranked: &RankedFactors) -> Result<Vec<CategoryScores>> {
    Category::ALL
        .into_iter()
        .map(|c| aggregate(c, ranked))
        .collect()
}
