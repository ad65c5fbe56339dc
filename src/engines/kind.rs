//! Known image engine kinds
//!
//! Engine names from affiliate configuration resolve through a closed
//! mapping; names outside it are rejected.

use crate::error::ImageSearchError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Bing image search API versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BingVariant {
    V6,
    V7,
}

impl BingVariant {
    /// Version used when an affiliate does not name a Bing engine
    pub const LATEST: Self = Self::V7;

    /// Name affiliates use to select this variant
    pub fn engine_name(&self) -> &'static str {
        match self {
            Self::V6 => "BingV6",
            Self::V7 => "BingV7",
        }
    }

    /// Resolve an affiliate's configured engine name to a Bing variant.
    ///
    /// Names outside the Bing family resolve to [`BingVariant::LATEST`].
    pub fn resolve(search_engine: &str) -> Result<Self, ImageSearchError> {
        if search_engine.starts_with("Bing") {
            search_engine.parse()
        } else {
            Ok(Self::LATEST)
        }
    }
}

impl FromStr for BingVariant {
    type Err = ImageSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BingV6" => Ok(Self::V6),
            "BingV7" => Ok(Self::V7),
            _ => Err(ImageSearchError::Configuration(format!(
                "Unknown image search engine: {}",
                s
            ))),
        }
    }
}

/// Provider a search is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EngineKind {
    /// Aggregator engine used on the CR route
    Aggregator,
    /// Bing image search
    Bing(BingVariant),
}

impl EngineKind {
    /// Engine name used in logs, metrics and settings
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aggregator => "aggregator",
            Self::Bing(BingVariant::V6) => "bing_v6",
            Self::Bing(BingVariant::V7) => "bing_v7",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
