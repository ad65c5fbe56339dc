//! Bing image search engine implementation

use super::kind::BingVariant;
use super::traits::*;
use crate::config::BingSettings;
use crate::results::{BingImage, RawImageResult};
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Module tag for Bing image result sets
pub const MODULE_TAG: &str = "IMAG";

/// Module tag for Bing spelling suggestions
pub const SPELLING_MODULE_TAG: &str = "BSPEL";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BingResponse {
    total_estimated_matches: Option<u64>,
    value: Vec<BingImage>,
    query_context: Option<QueryContext>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QueryContext {
    altered_query: Option<String>,
}

/// Bing Images API engine, one instance per API version
pub struct BingImageSearch {
    variant: BingVariant,
    endpoint: String,
    api_key: Option<String>,
    market: String,
    timeout: Option<f64>,
}

impl BingImageSearch {
    pub fn new(variant: BingVariant, settings: &BingSettings) -> Self {
        Self {
            variant,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            market: settings.market.clone(),
            timeout: settings.timeout,
        }
    }

    /// Spelling suggestion carried by a parsed response.
    ///
    /// V7 responses never yield one: the upstream API stopped returning the
    /// altered query for image searches.
    fn spelling_suggestion(&self, context: Option<QueryContext>) -> Option<String> {
        match self.variant {
            BingVariant::V6 => context
                .and_then(|c| c.altered_query)
                .filter(|q| !q.is_empty()),
            BingVariant::V7 => None,
        }
    }
}

impl ImageEngine for BingImageSearch {
    fn name(&self) -> &str {
        match self.variant {
            BingVariant::V6 => "bing_v6",
            BingVariant::V7 => "bing_v7",
        }
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
        let mut request = EngineRequest::get(&self.endpoint)
            .param("q", &params.query)
            .param("count", params.per_page.to_string())
            .param("offset", params.offset().to_string())
            .param("mkt", &self.market);

        if let Some(ref key) = self.api_key {
            request = request.header("Ocp-Apim-Subscription-Key", key);
        }

        Ok(request)
    }

    fn response(&self, params: &SearchParams, response: EngineResponse) -> AnyhowResult<ProviderResult> {
        let body: BingResponse = response.error_for_status()?.json()?;

        let results: Vec<RawImageResult> = body.value.into_iter().map(RawImageResult::Bing).collect();
        let total = body
            .total_estimated_matches
            .unwrap_or(results.len() as u64);
        let suggestion = self.spelling_suggestion(body.query_context);

        Ok(ProviderResult::for_page(params, total, results).with_spelling_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const BODY: &str = r#"{
        "totalEstimatedMatches": 1200,
        "queryContext": {"originalQuery": "yosemitee", "alteredQuery": "yosemite"},
        "value": [
            {
                "name": "Half Dome",
                "contentUrl": "https://img.example.com/halfdome.jpg",
                "hostPageUrl": "https://www.nps.gov/yose/halfdome.htm",
                "thumbnailUrl": "https://tse.example.com/th?id=2",
                "width": 2000,
                "height": 1500,
                "thumbnail": {"width": 474, "height": 355}
            }
        ]
    }"#;

    fn engine(variant: BingVariant) -> BingImageSearch {
        let settings = BingSettings {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        BingImageSearch::new(variant, &settings)
    }

    fn ok(text: &str) -> EngineResponse {
        EngineResponse {
            status: 200,
            headers: HashMap::new(),
            text: text.to_string(),
            url: "https://api.bing.microsoft.com".to_string(),
        }
    }

    #[test]
    fn test_bing_request() {
        let bing = engine(BingVariant::V7);
        let mut params = SearchParams::new("usagov", "yosemite");
        params.page = 3;
        params.per_page = 10;

        let request = bing.request(&params).unwrap();
        assert!(request.url.contains("bing.microsoft.com"));
        assert_eq!(request.params.get("q").map(String::as_str), Some("yosemite"));
        assert_eq!(request.params.get("offset").map(String::as_str), Some("20"));
        assert_eq!(
            request.headers.get("Ocp-Apim-Subscription-Key").map(String::as_str),
            Some("key")
        );
    }

    #[test]
    fn test_v6_reports_altered_query() {
        let bing = engine(BingVariant::V6);
        let params = SearchParams::new("usagov", "yosemitee");

        let result = bing.response(&params, ok(BODY)).unwrap();
        assert_eq!(result.total, 1200);
        assert_eq!((result.startrecord, result.endrecord), (1, 1));
        assert_eq!(result.spelling_suggestion.as_deref(), Some("yosemite"));
        assert_eq!(bing.default_module_tag(), MODULE_TAG);
    }

    #[test]
    fn test_v7_never_reports_suggestion() {
        let bing = engine(BingVariant::V7);
        let params = SearchParams::new("usagov", "yosemitee");

        let result = bing.response(&params, ok(BODY)).unwrap();
        assert_eq!(result.results.len(), 1);
        assert!(result.spelling_suggestion.is_none());
    }

    #[test]
    fn test_empty_value() {
        let bing = engine(BingVariant::V7);
        let params = SearchParams::new("usagov", "zzzz");

        let result = bing.response(&params, ok(r#"{"value": []}"#)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
    }
}
