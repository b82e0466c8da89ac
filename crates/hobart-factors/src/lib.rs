#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod category;
pub mod composite;
pub mod error;
pub mod factor;
pub mod numeric;
pub mod rank;
pub mod registry;
pub mod table;

pub use category::{Category, CategoryScores, aggregate, aggregate_all};
pub use composite::final_scores;
pub use error::{FactorError, Result};
pub use factor::FactorId;
pub use rank::{Moments, RankedColumn, Ranks, Standardized, ZScore, average_ranks, rank_and_zscore, zscores};
pub use registry::{FactorInfo, available_factors, factors_by_category, get_factor_info};
pub use table::{
    FactorRecord, FactorValues, RankedFactors, ScoredStock, ScoredUniverse, score_universe,
};
