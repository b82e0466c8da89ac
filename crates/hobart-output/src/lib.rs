#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod export;
pub mod frame;
pub mod store;

pub use artifact::{ArtifactKind, ArtifactName, Environment};
pub use export::{DEGENERATE_CELL, ExportError, ExportFormat, Exporter, score_headers};
pub use frame::scores_to_dataframe;
pub use store::{ArtifactStore, DirectoryStore, MemoryStore};
