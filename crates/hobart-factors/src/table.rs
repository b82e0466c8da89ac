//! Universe-wide tables produced by each stage of a scoring pass.
//!
//! Every stage takes the previous stage's output by reference and returns a
//! new value: raw records → [`FactorValues`] → [`RankedFactors`] → category
//! and final scores → [`ScoredUniverse`].

use crate::category::{Category, aggregate_all};
use crate::composite::final_scores;
use crate::error::{FactorError, Result};
use crate::factor::FactorId;
use crate::rank::{RankedColumn, ZScore, rank_and_zscore};
use hobart_data::StockRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Raw factor values for every stock, in universe order.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorValues {
    symbols: Vec<String>,
    columns: BTreeMap<FactorId, Vec<Option<f64>>>,
}

impl FactorValues {
    /// Compute every factor for every record.
    pub fn from_records(records: &[StockRecord]) -> Self {
        let symbols = records.iter().map(|r| r.symbol.clone()).collect();
        let columns = FactorId::ALL
            .into_iter()
            .map(|f| (f, records.iter().map(|r| f.compute(r)).collect()))
            .collect();
        Self { symbols, columns }
    }

    /// Symbols in universe order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of stocks.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Values of one factor.
    pub fn column(&self, factor: FactorId) -> Option<&[Option<f64>]> {
        self.columns.get(&factor).map(Vec::as_slice)
    }

    /// Rank the given factors. Factors are ranked in parallel.
    pub fn rank_factors(&self, factors: &[FactorId]) -> Result<RankedFactors> {
        if self.is_empty() {
            return Err(FactorError::EmptyUniverse);
        }

        let columns = factors
            .par_iter()
            .map(|&factor| -> Result<(FactorId, RankedColumn)> {
                let values = self
                    .column(factor)
                    .ok_or(FactorError::MissingFactor(factor))?;
                let column = rank_and_zscore(values, factor.smaller_is_better()).map_err(
                    |e| match e {
                        FactorError::NoObservations => FactorError::EmptyFactor(factor),
                        other => other,
                    },
                )?;
                Ok((factor, column))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        for (factor, column) in &columns {
            if column.is_degenerate() {
                warn!(%factor, observed = column.observed, "zero dispersion, z-scores undefined");
            }
            debug!(
                %factor,
                observed = column.observed,
                missing_rank = column.missing_rank,
                "ranked factor"
            );
        }

        Ok(RankedFactors {
            len: self.len(),
            columns,
        })
    }

    /// Rank every factor.
    pub fn rank_all(&self) -> Result<RankedFactors> {
        self.rank_factors(&FactorId::ALL)
    }
}

/// Rank/z-score columns keyed by factor.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFactors {
    len: usize,
    columns: BTreeMap<FactorId, RankedColumn>,
}

impl RankedFactors {
    /// Number of stocks.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no stock was ranked.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ranked column of one factor.
    pub fn column(&self, factor: FactorId) -> Option<&RankedColumn> {
        self.columns.get(&factor)
    }

    /// Factors whose z-scores are undefined because of zero dispersion.
    pub fn degenerate(&self) -> Vec<FactorId> {
        self.columns
            .iter()
            .filter(|(_, c)| c.is_degenerate())
            .map(|(f, _)| *f)
            .collect()
    }
}

/// Everything computed for one stock and one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    /// Factor identifier.
    pub factor: FactorId,
    /// Raw factor value.
    pub value: Option<f64>,
    /// Rank within the universe, 1 is best.
    pub rank: f64,
    /// Z-score, positive is favorable.
    pub zscore: ZScore,
    /// Z-score clamped to `[-3, 3]`.
    pub capped_zscore: ZScore,
}

/// One fully scored stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStock {
    /// Stock symbol.
    pub symbol: String,
    /// Per-factor results.
    pub factors: BTreeMap<FactorId, FactorRecord>,
    /// Category scores.
    pub categories: BTreeMap<Category, f64>,
    /// Mean of the category scores, lower is better.
    pub final_score: f64,
}

impl ScoredStock {
    /// Result for one factor.
    pub fn factor(&self, factor: FactorId) -> Option<&FactorRecord> {
        self.factors.get(&factor)
    }

    /// Score of one category.
    pub fn category(&self, category: Category) -> Option<f64> {
        self.categories.get(&category).copied()
    }
}

/// Output of a scoring pass over one universe snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUniverse {
    /// Scored stocks, in universe order.
    pub stocks: Vec<ScoredStock>,
    /// Factors with undefined z-scores.
    pub degenerate: Vec<FactorId>,
}

impl ScoredUniverse {
    /// Number of stocks.
    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Look up a stock by symbol.
    pub fn get(&self, symbol: &str) -> Option<&ScoredStock> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }
}

/// Run factor values, ranking, category aggregation and the final score.
pub fn score_universe(records: &[StockRecord]) -> Result<ScoredUniverse> {
    if records.is_empty() {
        return Err(FactorError::EmptyUniverse);
    }

    let values = FactorValues::from_records(records);
    let ranked = values.rank_all()?;
    let categories = aggregate_all(&ranked)?;
    let finals = final_scores(&categories)?;

    let stocks = values
        .symbols()
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let factors = FactorId::ALL
                .into_iter()
                .filter_map(|f| {
                    let column = ranked.column(f)?;
                    let record = FactorRecord {
                        factor: f,
                        value: values.column(f).and_then(|c| c[i]),
                        rank: column.ranks[i],
                        zscore: column.zscores[i],
                        capped_zscore: column.capped_zscores[i],
                    };
                    Some((f, record))
                })
                .collect();
            let categories = categories
                .iter()
                .map(|c| (c.category, c.scores[i]))
                .collect();
            ScoredStock {
                symbol: symbol.clone(),
                factors,
                categories,
                final_score: finals[i],
            }
        })
        .collect();

    let degenerate = ranked.degenerate();
    info!(
        stocks = values.len(),
        factors = FactorId::ALL.len(),
        degenerate = degenerate.len(),
        "scored universe"
    );

    Ok(ScoredUniverse { stocks, degenerate })
}
