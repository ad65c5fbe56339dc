//! Search request and outcome models

use super::pagination::Pagination;
use crate::affiliates::{Affiliate, SuggestionBlocks};
use crate::config::SearchSettings;
use crate::results::ImageResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw image search options as they arrive from a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSearchOptions {
    /// Affiliate handle
    pub affiliate: String,
    /// Query text, possibly blank
    pub query: String,
    /// Page number, unparsed
    pub page: Option<String>,
    /// Page size, unparsed
    pub per_page: Option<String>,
    /// "true" routes the search to the aggregator engine
    pub cr: Option<String>,
}

impl ImageSearchOptions {
    pub fn new(affiliate: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            affiliate: affiliate.into(),
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn with_per_page(mut self, per_page: impl ToString) -> Self {
        self.per_page = Some(per_page.to_string());
        self
    }

    pub fn with_cr(mut self, cr: bool) -> Self {
        self.cr = Some(cr.to_string());
        self
    }
}

/// A validated image search request. Immutable once built.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    affiliate: Arc<Affiliate>,
    query: String,
    pagination: Pagination,
    uses_cr: bool,
    spelling_suggestion_eligible: bool,
    queried_at_seconds: i64,
}

impl SearchRequest {
    /// Build a request, deciding routing and spelling eligibility up front
    pub fn new(
        affiliate: Arc<Affiliate>,
        options: &ImageSearchOptions,
        settings: &SearchSettings,
        suggestion_blocks: &dyn SuggestionBlocks,
    ) -> Self {
        let pagination =
            Pagination::resolve(options.page.as_deref(), options.per_page.as_deref(), settings);
        let uses_cr =
            options.cr.as_deref() == Some("true") || affiliate.has_no_social_image_feeds;
        let spelling_suggestion_eligible = !suggestion_blocks.exists(&options.query);

        Self {
            affiliate,
            query: options.query.clone(),
            pagination,
            uses_cr,
            spelling_suggestion_eligible,
            queried_at_seconds: chrono::Utc::now().timestamp(),
        }
    }

    pub fn affiliate(&self) -> &Affiliate {
        &self.affiliate
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query has any non-whitespace text
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page(&self) -> u32 {
        self.pagination.page
    }

    pub fn per_page(&self) -> u32 {
        self.pagination.per_page
    }

    /// Whether the search is routed to the aggregator engine
    pub fn uses_cr(&self) -> bool {
        self.uses_cr
    }

    pub fn spelling_suggestion_eligible(&self) -> bool {
        self.spelling_suggestion_eligible
    }

    pub fn queried_at_seconds(&self) -> i64 {
        self.queried_at_seconds
    }
}

/// Public result envelope of one image search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Error {
        error: String,
    },
    Success {
        total: u64,
        startrecord: u64,
        endrecord: u64,
        results: Vec<ImageResult>,
    },
}

impl SearchOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliates::SuggestionBlockList;

    fn request(affiliate: Affiliate, options: ImageSearchOptions) -> SearchRequest {
        let blocks = SuggestionBlockList::new(["blocked"]);
        SearchRequest::new(
            Arc::new(affiliate),
            &options,
            &SearchSettings::default(),
            &blocks,
        )
    }

    #[test]
    fn test_uses_cr_from_option() {
        let req = request(
            Affiliate::new("usagov"),
            ImageSearchOptions::new("usagov", "cats").with_cr(true),
        );
        assert!(req.uses_cr());

        let req = request(
            Affiliate::new("usagov"),
            ImageSearchOptions::new("usagov", "cats").with_cr(false),
        );
        assert!(!req.uses_cr());
    }

    #[test]
    fn test_uses_cr_from_affiliate_without_feeds() {
        let req = request(
            Affiliate::new("usagov").with_no_social_image_feeds(true),
            ImageSearchOptions::new("usagov", "cats"),
        );
        assert!(req.uses_cr());
    }

    #[test]
    fn test_spelling_eligibility() {
        let req = request(Affiliate::new("usagov"), ImageSearchOptions::new("usagov", "blocked"));
        assert!(!req.spelling_suggestion_eligible());

        let req = request(Affiliate::new("usagov"), ImageSearchOptions::new("usagov", "cats"));
        assert!(req.spelling_suggestion_eligible());
    }

    #[test]
    fn test_pagination_defaults() {
        let req = request(Affiliate::new("usagov"), ImageSearchOptions::new("usagov", "cats"));
        assert_eq!((req.page(), req.per_page()), (1, 20));
        assert!(req.queried_at_seconds() > 0);
    }

    #[test]
    fn test_pagination_from_options() {
        let req = request(
            Affiliate::new("usagov"),
            ImageSearchOptions::new("usagov", "cats")
                .with_page(3)
                .with_per_page(500),
        );
        assert_eq!(req.pagination(), Pagination { page: 3, per_page: 100 });

        let req = request(
            Affiliate::new("usagov"),
            ImageSearchOptions::new("usagov", "cats")
                .with_page("abc")
                .with_per_page(0),
        );
        assert_eq!((req.page(), req.per_page()), (1, 20));
    }

    #[test]
    fn test_outcome_serialization() {
        let error = SearchOutcome::Error {
            error: "Please enter a search term".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({"error": "Please enter a search term"})
        );
        assert!(error.is_error());

        let success = SearchOutcome::Success {
            total: 0,
            startrecord: 0,
            endrecord: 0,
            results: vec![],
        };
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            serde_json::json!({"total": 0, "startrecord": 0, "endrecord": 0, "results": []})
        );
        assert!(!success.is_error());
    }
}
