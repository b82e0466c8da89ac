#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod prices;
pub mod record;
pub mod universe;

pub use error::{DataError, Result};
pub use prices::{PriceBar, PriceMetrics, TRADING_DAYS_PER_YEAR, price_metrics, read_price_bars};
pub use record::{StockRecord, StockStats, assemble_records, parse_stats_json, read_stats_csv};
pub use universe::{IndexHoldings, Universe, filter_to_holdings, filter_universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
