#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod basket;
pub mod config;
pub mod error;
pub mod pass;

// Re-export main types from sub-crates
pub use hobart_data as data;
pub use hobart_factors as factors;
pub use hobart_output as output;

pub use basket::{BasketOrdering, Baskets, DEFAULT_BASKET_SIZE, select_baskets};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use pass::{PassOutput, run_indexed_pass, run_pass};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
