//! The scoring pass: records in, scored universe and baskets out.

use crate::basket::{Baskets, select_baskets};
use crate::config::PipelineConfig;
use crate::error::Result;
use hobart_data::{IndexHoldings, StockRecord, filter_to_holdings};
use hobart_factors::{FactorId, ScoredStock, ScoredUniverse, score_universe};
use hobart_output::{ArtifactKind, ArtifactName, ArtifactStore, ExportFormat, Exporter};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassOutput {
    /// Configuration the pass ran with.
    pub config: PipelineConfig,
    /// Every scored stock.
    pub scored: ScoredUniverse,
    /// Top and bottom baskets.
    pub baskets: Baskets,
}

impl PassOutput {
    /// Factors whose z-scores were undefined in this pass.
    pub fn degenerate(&self) -> &[FactorId] {
        &self.scored.degenerate
    }

    /// Rows written to the given artifact.
    pub fn rows(&self, kind: ArtifactKind) -> &[ScoredStock] {
        match kind {
            ArtifactKind::Factors => &self.scored.stocks,
            ArtifactKind::TopBasket => &self.baskets.top,
            ArtifactKind::BottomBasket => &self.baskets.bottom,
        }
    }

    /// Storage name of the given artifact.
    pub fn artifact_name(&self, kind: ArtifactKind, format: ExportFormat) -> ArtifactName {
        ArtifactName::new(self.config.environment, self.config.as_of, kind, format)
    }

    /// Render all three artifacts and hand them to `store`.
    ///
    /// Returns the locations reported by the store, in write order.
    pub fn persist(&self, store: &dyn ArtifactStore, format: ExportFormat) -> Result<Vec<String>> {
        let mut locations = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let name = self.artifact_name(kind, format);
            let contents = self.rows(kind).export_to_string(format)?;
            locations.push(store.put(&name.key(), contents.as_bytes())?);
        }
        info!(artifacts = locations.len(), "persisted pass");
        Ok(locations)
    }
}

/// Score `records` and select baskets.
///
/// `records` is the universe as given; use [`run_indexed_pass`] to restrict
/// it to index holdings first.
pub fn run_pass(records: &[StockRecord], config: &PipelineConfig) -> Result<PassOutput> {
    config.validate()?;
    info!(
        environment = %config.environment,
        as_of = %config.as_of,
        stocks = records.len(),
        "starting pass"
    );

    let scored = score_universe(records)?;
    if !scored.degenerate.is_empty() {
        warn!(factors = ?scored.degenerate, "z-scores undefined for some factors");
    }

    let baskets = select_baskets(&scored.stocks, config.basket_size, config.basket_ordering);
    info!(
        top = baskets.top.len(),
        bottom = baskets.bottom.len(),
        ordering = %config.basket_ordering,
        "selected baskets"
    );

    Ok(PassOutput {
        config: config.clone(),
        scored,
        baskets,
    })
}

/// Restrict `records` to the first `universe_cap` index holdings, then score.
pub fn run_indexed_pass(
    records: &[StockRecord],
    holdings: &IndexHoldings,
    config: &PipelineConfig,
) -> Result<PassOutput> {
    config.validate()?;
    let universe = filter_to_holdings(records, holdings, config.effective_universe_cap());
    run_pass(&universe, config)
}
