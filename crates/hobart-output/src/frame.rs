//! Polars view of a scored universe.
//!
//! The CSV export is written from this frame, so column order follows
//! [`score_headers`](crate::export::score_headers). Missing values are null;
//! degenerate z-scores are NaN.

use crate::export::ExportError;
use hobart_factors::{Category, FactorId, ScoredStock, ZScore};
use polars::prelude::*;

fn zscore_value(z: ZScore) -> Option<f64> {
    match z {
        ZScore::Value(v) => Some(v),
        ZScore::Missing => None,
        ZScore::Degenerate => Some(f64::NAN),
    }
}

/// Build a `DataFrame` with one row per stock.
pub fn scores_to_dataframe(stocks: &[ScoredStock]) -> Result<DataFrame, ExportError> {
    let symbols: Vec<&str> = stocks.iter().map(|s| s.symbol.as_str()).collect();
    let mut columns = vec![Column::new("symbol".into(), symbols)];

    for factor in FactorId::ALL {
        let name = factor.name();
        let records: Vec<_> = stocks.iter().map(|s| s.factor(factor)).collect();

        let values: Vec<Option<f64>> = records.iter().map(|r| r.and_then(|r| r.value)).collect();
        let ranks: Vec<Option<f64>> = records.iter().map(|r| r.map(|r| r.rank)).collect();
        let zscores: Vec<Option<f64>> = records
            .iter()
            .map(|r| r.and_then(|r| zscore_value(r.zscore)))
            .collect();
        let capped: Vec<Option<f64>> = records
            .iter()
            .map(|r| r.and_then(|r| zscore_value(r.capped_zscore)))
            .collect();

        columns.push(Column::new(name.into(), values));
        columns.push(Column::new(format!("{name}_rank").into(), ranks));
        columns.push(Column::new(format!("{name}_zscore").into(), zscores));
        columns.push(Column::new(format!("{name}_zscore_capped").into(), capped));
    }

    for category in Category::ALL {
        let scores: Vec<Option<f64>> = stocks.iter().map(|s| s.category(category)).collect();
        columns.push(Column::new(category.name().into(), scores));
    }

    let finals: Vec<f64> = stocks.iter().map(|s| s.final_score).collect();
    columns.push(Column::new("final_score".into(), finals));

    Ok(DataFrame::new(columns)?)
}
