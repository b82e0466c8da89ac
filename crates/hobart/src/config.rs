//! Pipeline configuration.

use crate::basket::{BasketOrdering, DEFAULT_BASKET_SIZE};
use crate::error::{Error, Result};
use chrono::{NaiveDate, Utc};
use hobart_output::Environment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one scoring pass.
///
/// Missing fields in a JSON config fall back to [`PipelineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Environment tag prefixed to artifact names.
    pub environment: Environment,
    /// Computation date used in artifact names.
    pub as_of: NaiveDate,
    /// Stocks per basket.
    pub basket_size: usize,
    /// Index constituents considered. `None` uses the environment default.
    pub universe_cap: Option<usize>,
    /// Which end of the final score order is the top basket.
    pub basket_ordering: BasketOrdering,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            as_of: Utc::now().date_naive(),
            basket_size: DEFAULT_BASKET_SIZE,
            universe_cap: None,
            basket_ordering: BasketOrdering::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Universe cap after applying the environment default.
    pub fn effective_universe_cap(&self) -> usize {
        self.universe_cap
            .unwrap_or_else(|| self.environment.default_universe_cap())
    }

    /// Check that sizes are positive.
    pub fn validate(&self) -> Result<()> {
        if self.basket_size == 0 {
            return Err(Error::InvalidConfig("basket_size must be positive".to_string()));
        }
        if self.effective_universe_cap() == 0 {
            return Err(Error::InvalidConfig("universe_cap must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.basket_size, 100);
        assert_eq!(config.basket_ordering, BasketOrdering::LowestScoreFirst);
        assert_eq!(config.effective_universe_cap(), 100);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(Environment::Production, None, 500)]
    #[case(Environment::Staging, None, 100)]
    #[case(Environment::Production, Some(50), 50)]
    fn test_effective_universe_cap(
        #[case] environment: Environment,
        #[case] cap: Option<usize>,
        #[case] expected: usize,
    ) {
        let config = PipelineConfig {
            environment,
            universe_cap: cap,
            ..Default::default()
        };
        assert_eq!(config.effective_universe_cap(), expected);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PipelineConfig::from_json_str(
            r#"{"environment": "PRODUCTION", "as_of": "2024-01-02", "basket_ordering": "highest-first"}"#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(config.basket_ordering, BasketOrdering::HighestScoreFirst);
        assert_eq!(config.basket_size, 100);
        assert_eq!(config.effective_universe_cap(), 500);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PipelineConfig {
            environment: Environment::Staging,
            as_of: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            basket_size: 25,
            universe_cap: Some(200),
            basket_ordering: BasketOrdering::HighestScoreFirst,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = PipelineConfig::from_json_file(Path::new("/nonexistent/hobart.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let zero_basket = PipelineConfig {
            basket_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero_basket.validate(), Err(Error::InvalidConfig(_))));

        let zero_cap = PipelineConfig {
            universe_cap: Some(0),
            ..Default::default()
        };
        assert!(matches!(zero_cap.validate(), Err(Error::InvalidConfig(_))));
    }
}
