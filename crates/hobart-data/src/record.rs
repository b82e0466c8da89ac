//! Per-symbol raw metrics.
//!
//! [`StockStats`] mirrors the provider's advanced statistics payload (field
//! names included). [`StockRecord`] is the joined, cleaned row the factor
//! engine consumes.

use crate::error::{DataError, Result};
use crate::prices::{PriceBar, PriceMetrics, price_metrics};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use tracing::debug;

/// Advanced statistics for one symbol as delivered by the market data loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStats {
    /// Stock symbol.
    pub symbol: String,
    /// Price to earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Earnings before interest, taxes, depreciation and amortization.
    #[serde(rename = "EBITDA")]
    pub ebitda: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,
    /// Price to sales ratio.
    pub price_to_sales: Option<f64>,
    /// Trailing 12-month price change, as a fraction.
    pub year1_change_percent: Option<f64>,
    /// Trailing 1-month price change, as a fraction.
    pub month1_change_percent: Option<f64>,
    /// Market beta.
    pub beta: Option<f64>,
    /// Market capitalization.
    #[serde(rename = "marketcap")]
    pub market_cap: Option<f64>,
    /// Debt to equity ratio.
    pub debt_to_equity: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Total revenue.
    pub total_revenue: Option<f64>,
}

/// Read statistics rows from CSV using the provider's field names as headers.
pub fn read_stats_csv<R: Read>(reader: R) -> Result<Vec<StockStats>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut stats = Vec::new();
    for row in rdr.deserialize() {
        stats.push(row?);
    }
    Ok(stats)
}

/// Parse a JSON array of statistics objects. Unknown fields are ignored.
pub fn parse_stats_json(json: &str) -> Result<Vec<StockStats>> {
    Ok(serde_json::from_str(json)?)
}

/// All raw metrics for one stock in one snapshot.
///
/// Every metric is optional; non-finite inputs are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Stock symbol (unique within a snapshot).
    pub symbol: String,
    /// Price to earnings ratio.
    pub pe_ratio: Option<f64>,
    /// EBITDA.
    pub ebitda: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,
    /// Price to sales ratio.
    pub price_to_sales: Option<f64>,
    /// Trailing 12-month price change.
    pub year1_change: Option<f64>,
    /// Trailing 1-month price change.
    pub month1_change: Option<f64>,
    /// Market beta.
    pub beta: Option<f64>,
    /// Annualized realized volatility.
    pub volatility: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Average daily value traded.
    pub avg_value_traded: Option<f64>,
    /// Debt to equity ratio.
    pub debt_to_equity: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Total revenue.
    pub total_revenue: Option<f64>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl StockRecord {
    /// Build a record from provider statistics and optional price metrics.
    pub fn from_parts(stats: &StockStats, prices: PriceMetrics) -> Self {
        Self {
            symbol: stats.symbol.trim().to_string(),
            pe_ratio: finite(stats.pe_ratio),
            ebitda: finite(stats.ebitda),
            enterprise_value: finite(stats.enterprise_value),
            price_to_sales: finite(stats.price_to_sales),
            year1_change: finite(stats.year1_change_percent),
            month1_change: finite(stats.month1_change_percent),
            beta: finite(stats.beta),
            volatility: finite(prices.volatility),
            market_cap: finite(stats.market_cap),
            avg_value_traded: finite(prices.avg_value_traded),
            debt_to_equity: finite(stats.debt_to_equity),
            gross_profit: finite(stats.gross_profit),
            total_revenue: finite(stats.total_revenue),
        }
    }
}

/// Left-join price metrics onto statistics rows.
///
/// Symbols without price history keep `None` for the price-derived metrics.
/// Blank symbols and duplicate symbols are rejected.
pub fn assemble_records(stats: &[StockStats], bars: &[PriceBar]) -> Result<Vec<StockRecord>> {
    let metrics = price_metrics(bars)?;
    let mut seen = HashSet::with_capacity(stats.len());
    let mut records = Vec::with_capacity(stats.len());

    for row in stats {
        let symbol = row.symbol.trim();
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol(row.symbol.clone()));
        }
        if !seen.insert(symbol.to_string()) {
            return Err(DataError::DuplicateSymbol(symbol.to_string()));
        }
        let prices = metrics.get(symbol).copied().unwrap_or_default();
        records.push(StockRecord::from_parts(row, prices));
    }

    debug!(
        records = records.len(),
        with_prices = metrics.len(),
        "assembled stock records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const STATS_CSV: &str = "symbol,peRatio,EBITDA,enterpriseValue,priceToSales,year1ChangePercent,month1ChangePercent,beta,marketcap,debtToEquity,grossProfit,totalRevenue\n\
AAPL,28.5,120,2800,7.1,0.35,0.02,1.2,2900,1.5,170,380\n\
MSFT,,95,2700,11.9,0.41,-0.01,0.9,2800,0.4,,210\n";

    #[test]
    fn test_read_stats_csv() {
        let stats = read_stats_csv(STATS_CSV.as_bytes()).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].pe_ratio, Some(28.5));
        assert_eq!(stats[0].ebitda, Some(120.0));
        assert_eq!(stats[0].market_cap, Some(2900.0));
        assert_eq!(stats[1].pe_ratio, None);
        assert_eq!(stats[1].gross_profit, None);
    }

    #[test]
    fn test_parse_stats_json_ignores_extra_fields() {
        let json = r#"[{"symbol":"AAPL","peRatio":28.5,"EBITDA":120.0,"companyName":"Apple"}]"#;
        let stats = parse_stats_json(json).unwrap();
        assert_eq!(stats[0].symbol, "AAPL");
        assert_eq!(stats[0].ebitda, Some(120.0));
        assert_eq!(stats[0].beta, None);
    }

    #[test]
    fn test_non_finite_metrics_become_none() {
        let stats = StockStats {
            symbol: " AAPL ".to_string(),
            pe_ratio: Some(f64::NAN),
            beta: Some(f64::INFINITY),
            market_cap: Some(10.0),
            ..Default::default()
        };
        let record = StockRecord::from_parts(&stats, PriceMetrics::default());
        assert_eq!(record.symbol, "AAPL");
        assert_eq!(record.pe_ratio, None);
        assert_eq!(record.beta, None);
        assert_eq!(record.market_cap, Some(10.0));
    }

    #[test]
    fn test_assemble_left_joins_prices() {
        let stats = read_stats_csv(STATS_CSV.as_bytes()).unwrap();
        let bars = vec![
            PriceBar {
                symbol: "AAPL".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                close: Some(10.0),
                volume: Some(5.0),
                change_percent: Some(0.01),
            },
            PriceBar {
                symbol: "AAPL".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                close: Some(20.0),
                volume: Some(5.0),
                change_percent: Some(0.02),
            },
        ];

        let records = assemble_records(&stats, &bars).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].avg_value_traded, Some(75.0));
        assert!(records[0].volatility.is_some());
        assert_eq!(records[1].avg_value_traded, None);
        assert_eq!(records[1].volatility, None);
    }

    #[test]
    fn test_assemble_rejects_duplicates() {
        let stats = vec![
            StockStats {
                symbol: "AAPL".to_string(),
                ..Default::default()
            },
            StockStats {
                symbol: "AAPL".to_string(),
                ..Default::default()
            },
        ];
        let err = assemble_records(&stats, &[]).unwrap_err();
        assert!(matches!(err, DataError::DuplicateSymbol(s) if s == "AAPL"));
    }

    #[test]
    fn test_assemble_rejects_blank_symbol() {
        let stats = vec![StockStats::default()];
        let err = assemble_records(&stats, &[]).unwrap_err();
        assert!(matches!(err, DataError::InvalidSymbol(_)));
    }
}
