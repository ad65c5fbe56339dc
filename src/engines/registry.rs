//! Provider registry keyed by engine kind

use super::kind::EngineKind;
use super::traits::ImageSearchProvider;
use crate::error::ImageSearchError;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of available image search providers
pub struct ProviderRegistry {
    providers: HashMap<EngineKind, Arc<dyn ImageSearchProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider for an engine kind
    pub fn register(&mut self, kind: EngineKind, provider: Arc<dyn ImageSearchProvider>) {
        self.providers.insert(kind, provider);
    }

    /// Get the provider for an engine kind
    pub fn get(&self, kind: EngineKind) -> Result<Arc<dyn ImageSearchProvider>, ImageSearchError> {
        self.providers.get(&kind).cloned().ok_or_else(|| {
            ImageSearchError::Configuration(format!("No provider registered for engine: {}", kind))
        })
    }

    /// Check if a provider exists
    pub fn contains(&self, kind: EngineKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Get all registered engine names
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().map(|k| k.name()).collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::aggregator::AggregatorImageSearch;
    use crate::engines::{BingVariant, HttpProvider};
    use crate::network::HttpClient;

    #[test]
    fn test_registry() {
        let mut registry = ProviderRegistry::new();
        let engine = Arc::new(AggregatorImageSearch::new("http://agg.test"));
        let provider = Arc::new(HttpProvider::new(engine, HttpClient::new().unwrap()).unwrap());

        registry.register(EngineKind::Aggregator, provider);

        assert!(registry.contains(EngineKind::Aggregator));
        assert_eq!(registry.names(), vec!["aggregator"]);
        assert!(registry.get(EngineKind::Aggregator).is_ok());
    }

    #[test]
    fn test_missing_provider_is_configuration_error() {
        let registry = ProviderRegistry::new();
        let err = registry
            .get(EngineKind::Bing(BingVariant::V6))
            .err()
            .unwrap();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("bing_v6"));
    }
}
