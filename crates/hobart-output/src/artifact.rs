//! Deployment environments and artifact keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::export::{ExportError, ExportFormat};

/// Deployment environment a pass runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    /// Live run over the full capped universe.
    Production,
    /// Pre-release run.
    Staging,
    /// Local development run.
    #[default]
    Dev,
}

impl Environment {
    /// Upper-case tag used in artifact keys.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Production => "PRODUCTION",
            Self::Staging => "STAGING",
            Self::Dev => "DEV",
        }
    }

    /// Number of index holdings kept when no explicit cap is configured.
    pub const fn default_universe_cap(self) -> usize {
        match self {
            Self::Production => 500,
            Self::Staging | Self::Dev => 100,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Environment {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRODUCTION" => Ok(Self::Production),
            "STAGING" => Ok(Self::Staging),
            "DEV" => Ok(Self::Dev),
            _ => Err(ExportError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// The three artifacts of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Every scored stock.
    Factors,
    /// Most favorable basket.
    TopBasket,
    /// Least favorable basket.
    BottomBasket,
}

impl ArtifactKind {
    /// All artifacts, in write order.
    pub const ALL: [Self; 3] = [Self::TopBasket, Self::BottomBasket, Self::Factors];

    /// File stem of the artifact.
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Factors => "df_factors",
            Self::TopBasket => "df_top_basket",
            Self::BottomBasket => "df_bot_basket",
        }
    }
}

/// Storage key `{ENV}-{YYYYMMDD}-{artifact}.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName {
    /// Environment tag.
    pub environment: Environment,
    /// Computation date.
    pub date: NaiveDate,
    /// Artifact kind.
    pub kind: ArtifactKind,
    /// Serialization format.
    pub format: ExportFormat,
}

impl ArtifactName {
    /// Create a new artifact name.
    pub const fn new(
        environment: Environment,
        date: NaiveDate,
        kind: ArtifactKind,
        format: ExportFormat,
    ) -> Self {
        Self {
            environment,
            date,
            kind,
            format,
        }
    }

    /// Rendered storage key.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}.{}",
            self.environment,
            self.date.format("%Y%m%d"),
            self.kind.stem(),
            self.format.extension()
        )
    }
}
