//! Export functionality for scored universes.
//!
//! Rows are flat: one line per stock with the symbol, four columns per factor
//! (`{factor}`, `{factor}_rank`, `{factor}_zscore`, `{factor}_zscore_capped`),
//! the five category scores and `final_score`.

use crate::frame::scores_to_dataframe;
use hobart_factors::{Category, FactorId, ScoredStock};
use polars::prelude::{CsvWriter, SerWriter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Environment tag not recognized.
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Cell written for z-scores undefined by zero dispersion.
pub const DEGENERATE_CELL: &str = "NaN";

/// Column headers of a score table, in row order.
pub fn score_headers() -> Vec<String> {
    let mut headers = vec!["symbol".to_string()];
    for factor in FactorId::ALL {
        let name = factor.name();
        headers.push(name.to_string());
        headers.push(format!("{name}_rank"));
        headers.push(format!("{name}_zscore"));
        headers.push(format!("{name}_zscore_capped"));
    }
    headers.extend(Category::ALL.iter().map(|c| c.name().to_string()));
    headers.push("final_score".to_string());
    headers
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for [ScoredStock] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut df = scores_to_dataframe(self)?;
                let mut buf = Vec::new();
                CsvWriter::new(&mut buf)
                    .include_header(true)
                    .finish(&mut df)?;
                Ok(String::from_utf8(buf)?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hobart_data::StockRecord;
    use hobart_factors::score_universe;

    fn scored() -> Vec<ScoredStock> {
        let records: Vec<StockRecord> = (1..=3)
            .map(|i| {
                let x = f64::from(i);
                StockRecord {
                    symbol: format!("S{i}"),
                    pe_ratio: Some(10.0 * x),
                    ebitda: Some(x),
                    enterprise_value: Some(10.0),
                    price_to_sales: Some(x),
                    year1_change: Some(0.1 * x),
                    month1_change: Some(0.0),
                    beta: Some(1.0),
                    volatility: Some(0.1 * x),
                    market_cap: if i == 2 { None } else { Some(100.0 * x) },
                    avg_value_traded: Some(x),
                    debt_to_equity: Some(x),
                    gross_profit: Some(x),
                    total_revenue: Some(10.0),
                }
            })
            .collect();
        score_universe(&records).unwrap().stocks
    }

    #[test]
    fn test_headers() {
        let headers = score_headers();
        assert_eq!(headers.len(), 1 + 4 * FactorId::ALL.len() + 5 + 1);
        assert_eq!(headers[0], "symbol");
        assert_eq!(headers[1], "earnings_yield");
        assert_eq!(headers[2], "earnings_yield_rank");
        assert_eq!(headers[4], "earnings_yield_zscore_capped");
        assert_eq!(headers.last().unwrap(), "final_score");
    }

    fn cells(csv: &str, row: usize) -> Vec<String> {
        csv.lines()
            .nth(row)
            .unwrap()
            .split(',')
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_rows_align_with_headers() {
        let csv = scored().export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(cells(&csv, 0), score_headers());
        for row in 1..=3 {
            assert_eq!(cells(&csv, row).len(), score_headers().len());
        }
    }

    #[test]
    fn test_csv_export() {
        let stocks = scored();
        let csv = stocks.export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("symbol,earnings_yield,earnings_yield_rank"));
        assert!(lines[1].starts_with("S1,"));
        // Beta is identical across stocks, so its z-scores are degenerate
        assert!(lines[1].contains(DEGENERATE_CELL));
    }

    #[test]
    fn test_missing_value_is_empty_cell() {
        let csv = scored().export_to_string(ExportFormat::Csv).unwrap();
        let row = cells(&csv, 2);
        assert_eq!(row[0], "S2");
        let idx = score_headers()
            .iter()
            .position(|h| h == "sqrt_market_cap")
            .unwrap();
        assert_eq!(row[idx], "");
        assert_eq!(row[idx + 1].parse::<f64>().unwrap(), 3.0);
        assert_eq!(row[idx + 2], "");
    }

    #[test]
    fn test_empty_universe_writes_header_only() {
        let stocks: Vec<ScoredStock> = Vec::new();
        let csv = stocks.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert_eq!(cells(&csv, 0), score_headers());
    }

    #[test]
    fn test_json_export() {
        let stocks = scored();
        let json = stocks.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"S1\""));
        assert!(json.contains("\"final_score\""));
        assert!(json.contains("\"degenerate\""));

        let pretty = stocks.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(pretty.contains("  "));
    }

    #[test]
    fn test_export_to_file() {
        let stocks = scored();
        let path = std::env::temp_dir().join("hobart_export_test.csv");
        stocks.export_to_file(&path, ExportFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("S3"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
