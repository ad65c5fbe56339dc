//! Aggregator image engine
//!
//! Searches the in-house aggregator service that indexes affiliate image
//! feeds. Used on the CR route and as the fallback for empty Bing results.

use super::traits::*;
use crate::results::{AggregatorImage, RawImageResult};
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Module tag for aggregator result sets
pub const MODULE_TAG: &str = "OASIS";

/// Module tag for aggregator spelling suggestions
pub const SPELLING_MODULE_TAG: &str = "OSPELL";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AggregatorResponse {
    total: u64,
    startrecord: Option<u64>,
    endrecord: Option<u64>,
    results: Vec<AggregatorImage>,
    spelling_suggestion: Option<String>,
}

/// Aggregator image search engine
pub struct AggregatorImageSearch {
    base_url: String,
    timeout: Option<f64>,
}

impl AggregatorImageSearch {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set a custom timeout in seconds
    pub fn with_timeout(mut self, timeout: Option<f64>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ImageEngine for AggregatorImageSearch {
    fn name(&self) -> &str {
        "aggregator"
    }

    fn default_module_tag(&self) -> &str {
        MODULE_TAG
    }

    fn default_spelling_module_tag(&self) -> Option<&str> {
        Some(SPELLING_MODULE_TAG)
    }

    fn timeout(&self) -> f64 {
        self.timeout.unwrap_or(5.0)
    }

    fn request(&self, params: &SearchParams) -> AnyhowResult<EngineRequest> {
        let mut request = EngineRequest::get(&self.base_url)
            .param("affiliate", &params.affiliate)
            .param("query", &params.query)
            .param("page", params.page.to_string())
            .param("per_page", params.per_page.to_string());

        if params.skip_log_serp_impressions {
            request = request.param("skip_log_serp_impressions", "true");
        }

        Ok(request)
    }

    fn response(&self, params: &SearchParams, response: EngineResponse) -> AnyhowResult<ProviderResult> {
        let body: AggregatorResponse = response.error_for_status()?.json()?;

        let results: Vec<RawImageResult> = body
            .results
            .into_iter()
            .map(RawImageResult::Aggregator)
            .collect();

        let mut result = ProviderResult::for_page(params, body.total, results)
            .with_spelling_suggestion(body.spelling_suggestion.filter(|s| !s.is_empty()));

        // The service reports its own bounds; trust them when present.
        if !result.is_empty() {
            if let (Some(start), Some(end)) = (body.startrecord, body.endrecord) {
                result.startrecord = start;
                result.endrecord = end;
            }
        }

        Ok(result)
    }
}
