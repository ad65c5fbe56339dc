//! Engine traits and types

use crate::results::RawImageResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for one provider invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Affiliate handle
    pub affiliate: String,
    /// Search query string
    pub query: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Results per page
    pub per_page: u32,
    /// Tell the provider not to record a results-page impression
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip_log_serp_impressions: bool,
}

impl SearchParams {
    /// Create new parameters for the first page
    pub fn new(affiliate: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            affiliate: affiliate.into(),
            query: query.into(),
            page: 1,
            per_page: 20,
            skip_log_serp_impressions: false,
        }
    }

    /// Zero-based offset of the first record on this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

/// What a provider returned for one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderResult {
    /// Number of matches across all pages
    pub total: u64,
    /// 1-based index of the first record on this page, 0 when empty
    pub startrecord: u64,
    /// 1-based index of the last record on this page, 0 when empty
    pub endrecord: u64,
    /// Records on this page, in provider order
    pub results: Vec<RawImageResult>,
    pub spelling_suggestion: Option<String>,
    /// Module tag attached when this result set is shown
    pub default_module_tag: String,
    /// Module tag attached when a spelling suggestion is shown
    pub default_spelling_module_tag: Option<String>,
    /// Engine-specific details for troubleshooting
    pub diagnostics: HashMap<String, serde_json::Value>,
}

impl ProviderResult {
    /// Build a result, deriving the record bounds from the page offset
    pub fn for_page(params: &SearchParams, total: u64, results: Vec<RawImageResult>) -> Self {
        let (startrecord, endrecord) = if results.is_empty() {
            (0, 0)
        } else {
            let offset = params.offset();
            (offset + 1, offset + results.len() as u64)
        };

        Self {
            total,
            startrecord,
            endrecord,
            results,
            ..Default::default()
        }
    }

    pub fn with_module_tags(mut self, tag: impl Into<String>, spelling_tag: Option<&str>) -> Self {
        self.default_module_tag = tag.into();
        self.default_spelling_module_tag = spelling_tag.map(str::to_string);
        self
    }

    pub fn with_spelling_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.spelling_suggestion = suggestion;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// HTTP request to be made by the engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with the status code unless the response is successful
    pub fn error_for_status(self) -> anyhow::Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(anyhow::anyhow!("HTTP error: {}", self.status))
        }
    }
}

/// An upstream image engine reached over HTTP
pub trait ImageEngine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Module tag for result sets from this engine
    fn default_module_tag(&self) -> &str;

    /// Module tag for spelling suggestions from this engine
    fn default_spelling_module_tag(&self) -> Option<&str> {
        None
    }

    /// Default timeout in seconds
    fn timeout(&self) -> f64 {
        5.0
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &SearchParams) -> anyhow::Result<EngineRequest>;

    /// Parse the HTTP response into a provider result
    fn response(
        &self,
        params: &SearchParams,
        response: EngineResponse,
    ) -> anyhow::Result<ProviderResult>;
}

/// Client interface the orchestrator runs searches through
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    /// Provider name, for logs and metrics
    fn name(&self) -> &str;

    /// Run one search
    async fn run(&self, params: &SearchParams) -> anyhow::Result<ProviderResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::AggregatorImage;

    #[test]
    fn test_skip_flag_serialized_only_when_set() {
        let mut params = SearchParams::new("usagov", "cats");
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("skip_log_serp_impressions").is_none());

        params.skip_log_serp_impressions = true;
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["skip_log_serp_impressions"], true);
    }

    #[test]
    fn test_record_bounds_follow_page() {
        let mut params = SearchParams::new("usagov", "cats");
        params.page = 3;
        params.per_page = 10;
        let records = vec![RawImageResult::Aggregator(AggregatorImage::default()); 4];

        let result = ProviderResult::for_page(&params, 24, records);
        assert_eq!((result.startrecord, result.endrecord), (21, 24));

        let empty = ProviderResult::for_page(&params, 0, vec![]);
        assert_eq!((empty.startrecord, empty.endrecord), (0, 0));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_error_for_status() {
        let response = EngineResponse {
            status: 503,
            headers: HashMap::new(),
            text: String::new(),
            url: "http://test".to_string(),
        };
        let err = response.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 503");
    }
}
