//! Factor Registry
//!
//! Metadata for every ranked factor: category, direction, description and the
//! raw metrics it is computed from.

use crate::category::Category;
use crate::factor::FactorId;
use std::collections::HashMap;

/// Factor metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorInfo {
    /// Factor identifier
    pub id: FactorId,
    /// Factor name (unique identifier)
    pub name: &'static str,
    /// Category the factor's rank is averaged into
    pub category: Category,
    /// Whether smaller raw values rank better
    pub smaller_is_better: bool,
    /// Brief description of what the factor measures
    pub description: &'static str,
    /// Raw metrics the factor reads
    pub required_metrics: &'static [&'static str],
}

const fn describe(id: FactorId) -> (&'static str, &'static [&'static str]) {
    match id {
        FactorId::EarningsYield => ("Earnings to price (inverse of P/E)", &["pe_ratio"]),
        FactorId::EbitdaToEv => (
            "EBITDA to enterprise value (inverse of EV/EBITDA)",
            &["ebitda", "enterprise_value"],
        ),
        FactorId::SalesYield => ("Sales to price (inverse of P/S)", &["price_to_sales"]),
        FactorId::Momentum12m1m => (
            "12-month price return skipping the most recent month",
            &["year1_change", "month1_change"],
        ),
        FactorId::Beta => ("Market beta - systematic risk exposure", &["beta"]),
        FactorId::Volatility90d => (
            "Annualized realized volatility of daily changes over 3 months",
            &["volatility"],
        ),
        FactorId::SqrtMarketCap => ("Square root of market capitalization", &["market_cap"]),
        FactorId::AvgValueTraded => (
            "Average daily close times volume over 3 months",
            &["avg_value_traded"],
        ),
        FactorId::DebtToEquity => ("Debt to equity - balance sheet leverage", &["debt_to_equity"]),
        FactorId::GrossMargin => (
            "Gross profit divided by total revenue",
            &["gross_profit", "total_revenue"],
        ),
    }
}

/// Metadata for one factor
pub const fn factor_info(id: FactorId) -> FactorInfo {
    let (description, required_metrics) = describe(id);
    FactorInfo {
        id,
        name: id.name(),
        category: id.category(),
        smaller_is_better: id.smaller_is_better(),
        description,
        required_metrics,
    }
}

/// Get all available factor info
pub fn available_factors() -> Vec<FactorInfo> {
    FactorId::ALL.into_iter().map(factor_info).collect()
}

/// Get factors belonging to a category
pub fn factors_by_category(category: Category) -> Vec<FactorInfo> {
    category.members().iter().map(|f| factor_info(*f)).collect()
}

/// Get factor info by name
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    FactorId::from_name(name).map(factor_info)
}

/// List all factor names
pub fn list_factor_names() -> Vec<&'static str> {
    FactorId::ALL.iter().map(|f| f.name()).collect()
}

/// Count factors by category
pub fn count_by_category() -> HashMap<Category, usize> {
    let mut counts = HashMap::new();
    for factor in available_factors() {
        *counts.entry(factor.category).or_insert(0) += 1;
    }
    counts
}
