//! Engine loader for initializing providers from configuration

use super::aggregator::AggregatorImageSearch;
use super::bing::BingImageSearch;
use super::kind::{BingVariant, EngineKind};
use super::provider::HttpProvider;
use super::registry::ProviderRegistry;
use super::traits::ImageEngine;
use crate::config::{BingSettings, EnginesSettings, Settings};
use crate::network::HttpClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing providers from configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Load all enabled providers from settings
    pub fn load(settings: &Settings, client: &HttpClient) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();

        for kind in Self::available_engines() {
            if Self::is_disabled(&settings.engines, kind) {
                info!("Skipping disabled engine: {}", kind);
                continue;
            }

            let engine = Self::create_engine(&settings.engines, kind);
            if let EngineKind::Bing(variant) = kind {
                if Self::bing_settings(&settings.engines, variant).api_key.is_none() {
                    warn!("Engine {} has no API key configured", kind);
                }
            }

            match HttpProvider::new(engine, client.clone()) {
                Ok(provider) => {
                    registry.register(kind, Arc::new(provider));
                    info!("Loaded engine: {}", kind);
                }
                Err(e) => warn!("Failed to load engine {}: {:#}", kind, e),
            }
        }

        info!("Loaded {} engines", registry.len());
        registry
    }

    /// Create an engine instance for a kind
    fn create_engine(engines: &EnginesSettings, kind: EngineKind) -> Arc<dyn ImageEngine> {
        match kind {
            EngineKind::Aggregator => Arc::new(
                AggregatorImageSearch::new(&engines.aggregator.base_url)
                    .with_timeout(engines.aggregator.timeout),
            ),
            EngineKind::Bing(variant) => Arc::new(BingImageSearch::new(
                variant,
                Self::bing_settings(engines, variant),
            )),
        }
    }

    fn bing_settings(engines: &EnginesSettings, variant: BingVariant) -> &BingSettings {
        match variant {
            BingVariant::V6 => &engines.bing_v6,
            BingVariant::V7 => &engines.bing_v7,
        }
    }

    fn is_disabled(engines: &EnginesSettings, kind: EngineKind) -> bool {
        match kind {
            EngineKind::Aggregator => engines.aggregator.disabled,
            EngineKind::Bing(variant) => Self::bing_settings(engines, variant).disabled,
        }
    }

    /// Get list of engine kinds this build knows about
    pub fn available_engines() -> Vec<EngineKind> {
        vec![
            EngineKind::Aggregator,
            EngineKind::Bing(BingVariant::V6),
            EngineKind::Bing(BingVariant::V7),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let settings = Settings::default();
        let registry = EngineLoader::load(&settings, &HttpClient::new().unwrap());
        assert_eq!(registry.names(), vec!["aggregator", "bing_v6", "bing_v7"]);
    }

    #[test]
    fn test_disabled_engine_skipped() {
        let mut settings = Settings::default();
        settings.engines.bing_v6.disabled = true;

        let registry = EngineLoader::load(&settings, &HttpClient::new().unwrap());
        assert!(!registry.contains(EngineKind::Bing(BingVariant::V6)));
        assert!(registry.contains(EngineKind::Bing(BingVariant::V7)));
    }

    #[test]
    fn test_engine_with_invalid_timeout_skipped() {
        let mut settings = Settings::default();
        settings.engines.aggregator.timeout = Some(-2.0);

        let registry = EngineLoader::load(&settings, &HttpClient::new().unwrap());
        assert!(!registry.contains(EngineKind::Aggregator));
        assert_eq!(registry.len(), 2);
    }
}
