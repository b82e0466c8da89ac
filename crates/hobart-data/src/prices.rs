//! Daily price history and the metrics derived from it.
//!
//! The loader delivers roughly three months of daily closes per symbol. Two
//! raw metrics come out of that history: average value traded (a liquidity
//! proxy) and annualized realized volatility.

use crate::error::Result;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// One daily bar of close-only price history.
///
/// The provider leaves cells blank on halted days, so every numeric field is
/// optional. Bars with a missing close or volume do not contribute to value
/// traded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    /// Stock symbol.
    pub symbol: String,
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: Option<f64>,
    /// Shares traded.
    pub volume: Option<f64>,
    /// Daily change of the close, as reported by the provider.
    pub change_percent: Option<f64>,
}

impl PriceBar {
    /// Dollar value traded on this day, approximated as `close * volume`.
    pub fn value_traded(&self) -> Option<f64> {
        Some(self.close? * self.volume?).filter(|v| v.is_finite())
    }
}

/// Read price bars from CSV with a `symbol,date,close,volume,changePercent` header.
pub fn read_price_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();
    for row in rdr.deserialize() {
        bars.push(row?);
    }
    Ok(bars)
}

/// Price-derived metrics for one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceMetrics {
    /// Mean daily value traded.
    pub avg_value_traded: Option<f64>,
    /// Annualized realized volatility.
    pub volatility: Option<f64>,
}

const SYMBOL: &str = "symbol";
const CLOSE: &str = "close";
const VOLUME: &str = "volume";
const CHANGE: &str = "changePercent";
const AVG_VALUE_TRADED: &str = "avg_value_traded";
const VOLATILITY: &str = "volatility";

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn bars_to_frame(bars: &[PriceBar]) -> Result<DataFrame> {
    let symbols: Vec<&str> = bars.iter().map(|b| b.symbol.as_str()).collect();
    let closes: Vec<Option<f64>> = bars.iter().map(|b| finite(b.close)).collect();
    let volumes: Vec<Option<f64>> = bars.iter().map(|b| finite(b.volume)).collect();
    let changes: Vec<Option<f64>> = bars.iter().map(|b| finite(b.change_percent)).collect();

    Ok(DataFrame::new(vec![
        Column::new(SYMBOL.into(), symbols),
        Column::new(CLOSE.into(), closes),
        Column::new(VOLUME.into(), volumes),
        Column::new(CHANGE.into(), changes),
    ])?)
}

/// Compute [`PriceMetrics`] for every symbol present in `bars`.
///
/// Average value traded is the mean of daily `close * volume` over bars that
/// carry both. Volatility is the sample standard deviation (n - 1
/// denominator) of `changePercent` scaled by `sqrt(252)`, and needs at least
/// two observed changes.
pub fn price_metrics(bars: &[PriceBar]) -> Result<HashMap<String, PriceMetrics>> {
    if bars.is_empty() {
        return Ok(HashMap::new());
    }

    let annualization = TRADING_DAYS_PER_YEAR.sqrt();
    let df = bars_to_frame(bars)?
        .lazy()
        .group_by([col(SYMBOL)])
        .agg([
            (col(CLOSE) * col(VOLUME)).mean().alias(AVG_VALUE_TRADED),
            when(col(CHANGE).count().gt(lit(1)))
                .then(col(CHANGE).std(1) * lit(annualization))
                .otherwise(lit(f64::NAN))
                .alias(VOLATILITY),
        ])
        .collect()?;

    let symbols = df.column(SYMBOL)?.as_materialized_series().str()?;
    let avg = df.column(AVG_VALUE_TRADED)?.as_materialized_series().f64()?;
    let vol = df.column(VOLATILITY)?.as_materialized_series().f64()?;

    let metrics = symbols
        .into_iter()
        .zip(avg.into_iter().zip(vol.into_iter()))
        .filter_map(|(symbol, (avg, vol))| {
            let metrics = PriceMetrics {
                avg_value_traded: finite(avg),
                volatility: finite(vol),
            };
            symbol.map(|s| (s.to_string(), metrics))
        })
        .collect();
    Ok(metrics)
}
