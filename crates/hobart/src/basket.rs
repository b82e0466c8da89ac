//! Top and bottom basket selection.
//!
//! Stocks are totally ordered by `(final_score, symbol)`. Which end of that
//! order is the "top" basket is a named policy, see [`BasketOrdering`].

use crate::error::Error;
use hobart_factors::ScoredStock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Default number of stocks per basket.
pub const DEFAULT_BASKET_SIZE: usize = 100;

/// Which end of the final score order forms the top basket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasketOrdering {
    /// Lowest final scores are the top basket, best first. Matches the
    /// rank convention where 1 is best.
    #[default]
    #[serde(rename = "lowest-first", alias = "lowest-score-first")]
    LowestScoreFirst,
    /// Highest final scores are the top basket, highest first; the bottom
    /// basket holds the lowest scores, lowest first.
    #[serde(rename = "highest-first", alias = "highest-score-first")]
    HighestScoreFirst,
}

impl BasketOrdering {
    /// Name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::LowestScoreFirst => "lowest-first",
            Self::HighestScoreFirst => "highest-first",
        }
    }
}

impl fmt::Display for BasketOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BasketOrdering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lowest-first" | "lowest-score-first" => Ok(Self::LowestScoreFirst),
            "highest-first" | "highest-score-first" => Ok(Self::HighestScoreFirst),
            _ => Err(Error::InvalidConfig(format!("unknown basket ordering: {s}"))),
        }
    }
}

/// The two baskets of a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Baskets {
    /// Most favorable stocks under the chosen ordering.
    pub top: Vec<ScoredStock>,
    /// Least favorable stocks under the chosen ordering.
    pub bottom: Vec<ScoredStock>,
}

fn by_score(a: &ScoredStock, b: &ScoredStock) -> Ordering {
    a.final_score
        .total_cmp(&b.final_score)
        .then_with(|| a.symbol.cmp(&b.symbol))
}

/// Select `min(basket_size, N)` stocks for each basket.
///
/// The baskets are disjoint whenever `N >= 2 * basket_size`.
pub fn select_baskets(
    stocks: &[ScoredStock],
    basket_size: usize,
    ordering: BasketOrdering,
) -> Baskets {
    let mut ascending: Vec<&ScoredStock> = stocks.iter().collect();
    ascending.sort_by(|a, b| by_score(a, b));

    let n = basket_size.min(ascending.len());
    let lowest: Vec<ScoredStock> = ascending.iter().take(n).map(|s| (*s).clone()).collect();
    let highest: Vec<ScoredStock> = ascending
        .iter()
        .rev()
        .take(n)
        .map(|s| (*s).clone())
        .collect();

    match ordering {
        BasketOrdering::LowestScoreFirst => Baskets {
            top: lowest,
            bottom: highest,
        },
        BasketOrdering::HighestScoreFirst => Baskets {
            top: highest,
            bottom: lowest,
        },
    }
}
