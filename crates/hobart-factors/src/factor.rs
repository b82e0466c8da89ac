//! Factor identifiers and their definitions over raw metrics.

use crate::category::Category;
use crate::numeric::{ratio, sqrt};
use hobart_data::StockRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the ten ranked factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorId {
    /// Earnings over price, `1 / pe_ratio`.
    EarningsYield,
    /// EBITDA over enterprise value.
    EbitdaToEv,
    /// Sales over price, `1 / price_to_sales`.
    SalesYield,
    /// Twelve-month return excluding the most recent month.
    #[serde(rename = "momentum_12m_1m")]
    Momentum12m1m,
    /// Market beta.
    Beta,
    /// Annualized realized volatility over roughly 90 days.
    #[serde(rename = "volatility_90d")]
    Volatility90d,
    /// Square root of market capitalization.
    SqrtMarketCap,
    /// Average daily value traded.
    AvgValueTraded,
    /// Debt to equity ratio.
    DebtToEquity,
    /// Gross profit over total revenue.
    GrossMargin,
}

impl FactorId {
    /// Every factor, grouped by category.
    pub const ALL: [Self; 10] = [
        Self::EarningsYield,
        Self::EbitdaToEv,
        Self::SalesYield,
        Self::Momentum12m1m,
        Self::Beta,
        Self::Volatility90d,
        Self::SqrtMarketCap,
        Self::AvgValueTraded,
        Self::DebtToEquity,
        Self::GrossMargin,
    ];

    /// Stable snake_case name, used for column headers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::EarningsYield => "earnings_yield",
            Self::EbitdaToEv => "ebitda_to_ev",
            Self::SalesYield => "sales_yield",
            Self::Momentum12m1m => "momentum_12m_1m",
            Self::Beta => "beta",
            Self::Volatility90d => "volatility_90d",
            Self::SqrtMarketCap => "sqrt_market_cap",
            Self::AvgValueTraded => "avg_value_traded",
            Self::DebtToEquity => "debt_to_equity",
            Self::GrossMargin => "gross_margin",
        }
    }

    /// Look up a factor by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Category the factor rolls up into.
    pub const fn category(self) -> Category {
        match self {
            Self::EarningsYield | Self::EbitdaToEv | Self::SalesYield => Category::Value,
            Self::Momentum12m1m => Category::Momentum,
            Self::Beta | Self::Volatility90d => Category::Risk,
            Self::SqrtMarketCap | Self::AvgValueTraded => Category::Size,
            Self::DebtToEquity | Self::GrossMargin => Category::Quality,
        }
    }

    /// Whether a smaller raw value is more favorable.
    pub const fn smaller_is_better(self) -> bool {
        match self {
            Self::EarningsYield
            | Self::EbitdaToEv
            | Self::SalesYield
            | Self::Momentum12m1m
            | Self::GrossMargin => false,
            Self::Beta
            | Self::Volatility90d
            | Self::SqrtMarketCap
            | Self::AvgValueTraded
            | Self::DebtToEquity => true,
        }
    }

    /// Factor value for one stock.
    ///
    /// `None` when an input is missing or the arithmetic is undefined.
    pub fn compute(self, record: &StockRecord) -> Option<f64> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        match self {
            Self::EarningsYield => ratio(Some(1.0), record.pe_ratio),
            Self::EbitdaToEv => ratio(record.ebitda, record.enterprise_value),
            Self::SalesYield => ratio(Some(1.0), record.price_to_sales),
            Self::Momentum12m1m => {
                let year = record.year1_change.map(|c| c + 1.0);
                let month = record.month1_change.map(|c| c + 1.0);
                ratio(year, month).map(|r| r - 1.0)
            }
            Self::Beta => finite(record.beta),
            Self::Volatility90d => finite(record.volatility),
            Self::SqrtMarketCap => sqrt(record.market_cap),
            Self::AvgValueTraded => finite(record.avg_value_traded),
            Self::DebtToEquity => finite(record.debt_to_equity),
            Self::GrossMargin => ratio(record.gross_profit, record.total_revenue),
        }
    }
}

impl fmt::Display for FactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
