//! Application state shared across handlers

use crate::affiliates::{AffiliateRegistry, SuggestionBlockList};
use crate::config::Settings;
use crate::engines::ProviderRegistry;
use crate::metrics::Metrics;
use crate::search::SearchContext;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Configured affiliates
    pub affiliates: Arc<AffiliateRegistry>,
    /// Collaborators for image searches
    pub search: SearchContext,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: ProviderRegistry) -> Self {
        let affiliates = Arc::new(AffiliateRegistry::from_affiliates(&settings.affiliates));
        let suggestion_blocks = Arc::new(SuggestionBlockList::new(
            settings.suggestion_blocks.iter().cloned(),
        ));
        let search = SearchContext::new(
            Arc::new(registry),
            suggestion_blocks,
            settings.search.clone(),
        )
        .with_metrics(Arc::new(Metrics::new()));

        Self {
            settings: Arc::new(settings),
            affiliates,
            search,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Whether metrics are exposed
    pub fn metrics_enabled(&self) -> bool {
        self.settings.general.enable_metrics
    }
}
