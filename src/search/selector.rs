//! Provider selection for a search request

use super::models::SearchRequest;
use crate::engines::{BingVariant, EngineKind, SearchParams};
use crate::error::Result;

/// Engine kind plus the parameters to invoke it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: EngineKind,
    pub params: SearchParams,
}

/// Maps an affiliate and routing flag to a provider
pub struct ProviderSelector;

impl ProviderSelector {
    /// Select the provider for a request.
    ///
    /// The CR route always uses the aggregator. Otherwise the affiliate's
    /// engine name picks a Bing variant; an unknown `Bing*` name is a
    /// configuration error.
    pub fn select(request: &SearchRequest, uses_cr: bool) -> Result<Selection> {
        let kind = if uses_cr {
            EngineKind::Aggregator
        } else {
            EngineKind::Bing(BingVariant::resolve(&request.affiliate().search_engine)?)
        };

        Ok(Selection {
            kind,
            params: Self::params(request, uses_cr),
        })
    }

    fn params(request: &SearchRequest, uses_cr: bool) -> SearchParams {
        SearchParams {
            affiliate: request.affiliate().name.clone(),
            query: request.query().to_string(),
            page: request.page(),
            per_page: request.per_page(),
            skip_log_serp_impressions: !uses_cr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliates::{Affiliate, SuggestionBlockList};
    use crate::config::SearchSettings;
    use crate::search::ImageSearchOptions;
    use std::sync::Arc;

    fn request(affiliate: Affiliate, options: ImageSearchOptions) -> SearchRequest {
        SearchRequest::new(
            Arc::new(affiliate),
            &options,
            &SearchSettings::default(),
            &SuggestionBlockList::default(),
        )
    }

    #[test]
    fn test_cr_route_selects_aggregator() {
        let req = request(
            Affiliate::new("usagov").with_search_engine("BingV6"),
            ImageSearchOptions::new("usagov", "cats").with_page(2),
        );
        let selection = ProviderSelector::select(&req, true).unwrap();

        assert_eq!(selection.kind, EngineKind::Aggregator);
        assert!(!selection.params.skip_log_serp_impressions);
        assert_eq!(selection.params.page, 2);
        assert_eq!(selection.params.per_page, 20);
        assert_eq!(selection.params.affiliate, "usagov");
    }

    #[test]
    fn test_bing_route_uses_affiliate_engine() {
        let req = request(
            Affiliate::new("nps").with_search_engine("BingV6"),
            ImageSearchOptions::new("nps", "bears"),
        );
        let selection = ProviderSelector::select(&req, false).unwrap();

        assert_eq!(selection.kind, EngineKind::Bing(BingVariant::V6));
        assert!(selection.params.skip_log_serp_impressions);
    }

    #[test]
    fn test_non_bing_engine_uses_latest_bing() {
        let req = request(
            Affiliate::new("nps").with_search_engine("SearchGov"),
            ImageSearchOptions::new("nps", "bears"),
        );
        let selection = ProviderSelector::select(&req, false).unwrap();
        assert_eq!(selection.kind, EngineKind::Bing(BingVariant::LATEST));
    }

    #[test]
    fn test_unknown_bing_engine_fails() {
        let req = request(
            Affiliate::new("nps").with_search_engine("BingV9"),
            ImageSearchOptions::new("nps", "bears"),
        );
        let err = ProviderSelector::select(&req, false).unwrap_err();
        assert!(err.is_configuration());

        // The CR route never consults the engine name.
        assert!(ProviderSelector::select(&req, true).is_ok());
    }
}
