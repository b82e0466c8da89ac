//! Universe management.
//!
//! The tradable universe is the intersection of the symbols the loader
//! returned statistics for and the holdings of a total-market index fund,
//! truncated to the first `cap` holdings.

use crate::error::{DataError, Result};
use crate::record::StockRecord;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Number of descriptive lines preceding the holdings table in a fund file.
pub const HOLDINGS_PREAMBLE_LINES: usize = 8;

/// Column holding the ticker symbol in a fund holdings file.
pub const TICKER_COLUMN: &str = "Ticker";

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Ordered ticker list parsed from an index fund holdings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexHoldings {
    preamble: Vec<String>,
    tickers: Vec<String>,
    members: HashSet<String>,
}

impl IndexHoldings {
    /// Build holdings from an ordered ticker list.
    pub fn from_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tickers: Vec<String> = tickers.into_iter().map(Into::into).collect();
        let members = tickers.iter().cloned().collect();
        Self {
            preamble: Vec::new(),
            tickers,
            members,
        }
    }

    /// Parse a fund holdings CSV.
    ///
    /// The file starts with [`HOLDINGS_PREAMBLE_LINES`] descriptive lines,
    /// followed by a header row with a [`TICKER_COLUMN`] column, the holdings
    /// rows, and a single footer row which is discarded. Blank lines are
    /// ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() <= HOLDINGS_PREAMBLE_LINES {
            return Err(DataError::Parse(format!(
                "holdings file has {} lines, expected more than {}",
                lines.len(),
                HOLDINGS_PREAMBLE_LINES
            )));
        }

        let (preamble, table) = lines.split_at(HOLDINGS_PREAMBLE_LINES);
        let body = table.join("\n");
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(body.as_bytes());

        let ticker_idx = rdr
            .headers()?
            .iter()
            .position(|h| h.trim() == TICKER_COLUMN)
            .ok_or_else(|| {
                DataError::Parse(format!("holdings header has no {TICKER_COLUMN} column"))
            })?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?);
        }
        // Last row is the fund's footer, not a holding.
        rows.pop();

        let tickers: Vec<String> = rows
            .iter()
            .filter_map(|r| r.get(ticker_idx))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let mut holdings = Self::from_tickers(tickers);
        holdings.preamble = preamble.iter().map(|l| (*l).to_string()).collect();
        Ok(holdings)
    }

    /// Descriptive lines preceding the holdings table.
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// Tickers in file order.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Keep only the first `cap` holdings.
    pub fn capped(&self, cap: usize) -> Self {
        let mut capped = Self::from_tickers(self.tickers.iter().take(cap).cloned());
        capped.preamble = self.preamble.clone();
        capped
    }
}

impl Universe for IndexHoldings {
    fn symbols(&self) -> Vec<String> {
        self.tickers.clone()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.members.contains(symbol)
    }

    fn size(&self) -> usize {
        self.tickers.len()
    }
}

/// Restrict `records` to members of `universe`, preserving record order.
pub fn filter_universe<U: Universe + ?Sized>(
    records: &[StockRecord],
    universe: &U,
) -> Vec<StockRecord> {
    let kept: Vec<StockRecord> = records
        .iter()
        .filter(|r| universe.contains(&r.symbol))
        .cloned()
        .collect();

    if kept.is_empty() && !records.is_empty() {
        warn!(
            records = records.len(),
            universe = universe.size(),
            "no record matched the universe"
        );
    }
    debug!(before = records.len(), after = kept.len(), "filtered universe");
    kept
}

/// Restrict `records` to the first `cap` constituents of `holdings`.
pub fn filter_to_holdings(
    records: &[StockRecord],
    holdings: &IndexHoldings,
    cap: usize,
) -> Vec<StockRecord> {
    filter_universe(records, &holdings.capped(cap))
}
