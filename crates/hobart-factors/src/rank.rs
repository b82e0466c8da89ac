//! Cross-sectional rank and z-score transform.
//!
//! For one factor column this produces, per stock:
//!
//! - an average-tie rank where rank 1 is the most favorable value, with every
//!   missing value sharing one worst rank (`max observed rank + 1`);
//! - a population z-score over observed values, negated when smaller values
//!   are better so a higher z-score is always more favorable;
//! - the same z-score clamped to `[-3, 3]`.
//!
//! A column whose observed values are all identical (including a column with
//! a single observation) has zero dispersion. Its z-scores are reported as
//! [`ZScore::Degenerate`] rather than being defaulted.

use crate::error::{FactorError, Result};
use crate::numeric::ZSCORE_CAP;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

const VALUE: &str = "value";

/// Standardized value of one stock for one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ZScore {
    /// Defined z-score.
    Value(f64),
    /// The stock has no value for this factor.
    Missing,
    /// The factor has zero dispersion, so no z-score is defined.
    Degenerate,
}

impl ZScore {
    /// The numeric z-score, if defined.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(z) => Some(z),
            Self::Missing | Self::Degenerate => None,
        }
    }

    /// Whether a numeric z-score is defined.
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Location and scale of the observed values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Mean of observed values.
    pub mean: f64,
    /// Population standard deviation of observed values.
    pub std_dev: f64,
}

/// Average-tie ranks of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranks {
    /// Rank per input position, missing values included.
    pub ranks: Vec<f64>,
    /// Rank shared by missing values: one past the worst observed rank.
    pub missing_rank: f64,
}

/// Z-scores of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    /// Z-score per input position.
    pub zscores: Vec<ZScore>,
    /// Z-score clamped to `[-3, 3]` per input position.
    pub capped: Vec<ZScore>,
    /// Moments of the observed values, `None` when the column is degenerate.
    pub moments: Option<Moments>,
}

/// Output of [`rank_and_zscore`] for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedColumn {
    /// Rank per input position.
    pub ranks: Vec<f64>,
    /// Z-score per input position.
    pub zscores: Vec<ZScore>,
    /// Capped z-score per input position.
    pub capped_zscores: Vec<ZScore>,
    /// Moments of the observed values, `None` when the column is degenerate.
    pub moments: Option<Moments>,
    /// Number of observed (non-missing) values.
    pub observed: usize,
    /// Rank shared by missing values: one past the worst observed rank.
    pub missing_rank: f64,
}

impl RankedColumn {
    /// Number of stocks in the column.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the column is empty.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// True when observed values have zero dispersion.
    pub const fn is_degenerate(&self) -> bool {
        self.moments.is_none()
    }
}

fn observed(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Single-column frame with non-finite values turned into nulls.
fn value_frame(values: &[Option<f64>]) -> Result<DataFrame> {
    let column: Vec<Option<f64>> = values.iter().map(|v| observed(*v)).collect();
    Ok(DataFrame::new(vec![Column::new(VALUE.into(), column)])?)
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(df
        .column(name)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .collect())
}

fn f64_scalar(df: &DataFrame, name: &str) -> Result<Option<f64>> {
    Ok(df.column(name)?.as_materialized_series().f64()?.get(0))
}

/// Average-tie ranks with rank 1 for the most favorable value.
///
/// Missing and non-finite values share `max observed rank + 1`. Returns
/// [`FactorError::NoObservations`] when nothing is observed.
pub fn average_ranks(values: &[Option<f64>], smaller_is_better: bool) -> Result<Ranks> {
    if values.iter().all(|v| observed(*v).is_none()) {
        return Err(FactorError::NoObservations);
    }

    let options = RankOptions {
        method: RankMethod::Average,
        descending: !smaller_is_better,
    };
    let ranked = value_frame(values)?
        .lazy()
        .select([col(VALUE)
            .rank(options, None)
            .cast(DataType::Float64)
            .alias("rank")])
        .select([
            col("rank")
                .fill_null(col("rank").max() + lit(1.0))
                .alias("rank"),
            (col("rank").max() + lit(1.0)).alias("missing_rank"),
        ])
        .collect()?;

    let missing_rank = f64_scalar(&ranked, "missing_rank")?.ok_or(FactorError::NoObservations)?;
    let ranks = f64_column(&ranked, "rank")?
        .into_iter()
        .map(|r| r.unwrap_or(missing_rank))
        .collect();

    Ok(Ranks {
        ranks,
        missing_rank,
    })
}

/// Population z-scores over observed values, plain and capped.
///
/// Negated when `smaller_is_better`. Values are divided by their largest
/// magnitude before the moments are taken, so wide columns do not overflow.
/// Only a column whose observed values are all equal is degenerate.
pub fn zscores(values: &[Option<f64>], smaller_is_better: bool) -> Result<Standardized> {
    let df = value_frame(values)?;
    let range = df
        .clone()
        .lazy()
        .select([col(VALUE).min().alias("min"), col(VALUE).max().alias("max")])
        .collect()?;

    let scale = match (f64_scalar(&range, "min")?, f64_scalar(&range, "max")?) {
        (Some(lo), Some(hi)) if lo < hi => Some(lo.abs().max(hi.abs())),
        _ => None,
    };

    let scaled = scale.map(|scale| col(VALUE) / lit(scale));
    let stats = match &scaled {
        Some(scaled) => {
            let moments = df
                .clone()
                .lazy()
                .select([
                    scaled.clone().mean().alias("mean"),
                    scaled.clone().std(0).alias("std"),
                ])
                .collect()?;
            match (f64_scalar(&moments, "mean")?, f64_scalar(&moments, "std")?) {
                (Some(m), Some(s)) if s > 0.0 && s.is_finite() => Some((m, s)),
                _ => None,
            }
        }
        None => None,
    };

    let (Some(scaled), Some((m, s)), Some(scale)) = (scaled, stats, scale) else {
        let marker = |v: &Option<f64>| match observed(*v) {
            Some(_) => ZScore::Degenerate,
            None => ZScore::Missing,
        };
        let zscores: Vec<ZScore> = values.iter().map(marker).collect();
        return Ok(Standardized {
            capped: zscores.clone(),
            zscores,
            moments: None,
        });
    };

    let sign = if smaller_is_better { -1.0 } else { 1.0 };
    let z = (scaled - lit(m)) / lit(s) * lit(sign);
    let standardized = df
        .lazy()
        .select([
            z.clone().alias("zscore"),
            when(z.clone().gt(lit(ZSCORE_CAP)))
                .then(lit(ZSCORE_CAP))
                .when(z.clone().lt(lit(-ZSCORE_CAP)))
                .then(lit(-ZSCORE_CAP))
                .otherwise(z)
                .alias("capped"),
        ])
        .collect()?;

    let to_scores = |column: Vec<Option<f64>>| -> Vec<ZScore> {
        column
            .into_iter()
            .map(|z| z.map_or(ZScore::Missing, ZScore::Value))
            .collect()
    };

    Ok(Standardized {
        zscores: to_scores(f64_column(&standardized, "zscore")?),
        capped: to_scores(f64_column(&standardized, "capped")?),
        moments: Some(Moments {
            mean: m * scale,
            std_dev: s * scale,
        }),
    })
}

/// Rank, z-score and capped z-score for one factor column.
pub fn rank_and_zscore(values: &[Option<f64>], smaller_is_better: bool) -> Result<RankedColumn> {
    let Ranks {
        ranks,
        missing_rank,
    } = average_ranks(values, smaller_is_better)?;
    let Standardized {
        zscores,
        capped,
        moments,
    } = zscores(values, smaller_is_better)?;

    Ok(RankedColumn {
        ranks,
        zscores,
        capped_zscores: capped,
        moments,
        observed: values.iter().filter(|v| observed(**v).is_some()).count(),
        missing_rank,
    })
}
