//! Affiliate configuration and suggestion blocks
//!
//! Affiliates decide which image engine serves their searches. Suggestion
//! blocks suppress spelling suggestions for exact query texts.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A site that embeds image search, with its engine preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Affiliate {
    /// Unique affiliate handle
    pub name: String,
    /// Configured search engine name (e.g. "BingV7")
    pub search_engine: String,
    /// Whether the affiliate has no social image feeds configured
    pub has_no_social_image_feeds: bool,
    /// Whether Bing image search may serve as a fallback
    pub is_bing_image_search_enabled: bool,
    /// Locale for user-facing messages
    pub locale: Option<String>,
}

impl Default for Affiliate {
    fn default() -> Self {
        Self {
            name: String::new(),
            search_engine: "BingV7".to_string(),
            has_no_social_image_feeds: false,
            is_bing_image_search_enabled: false,
            locale: None,
        }
    }
}

impl Affiliate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_search_engine(mut self, engine: impl Into<String>) -> Self {
        self.search_engine = engine.into();
        self
    }

    pub fn with_no_social_image_feeds(mut self, value: bool) -> Self {
        self.has_no_social_image_feeds = value;
        self
    }

    pub fn with_bing_image_search(mut self, enabled: bool) -> Self {
        self.is_bing_image_search_enabled = enabled;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Lookup of affiliates by handle
#[derive(Debug, Default)]
pub struct AffiliateRegistry {
    affiliates: HashMap<String, Arc<Affiliate>>,
}

impl AffiliateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured affiliates
    pub fn from_affiliates(affiliates: &[Affiliate]) -> Self {
        let mut registry = Self::new();
        for affiliate in affiliates {
            registry.register(affiliate.clone());
        }
        registry
    }

    /// Register an affiliate, replacing any with the same name
    pub fn register(&mut self, affiliate: Affiliate) {
        self.affiliates
            .insert(affiliate.name.clone(), Arc::new(affiliate));
    }

    /// Get an affiliate by name
    pub fn get(&self, name: &str) -> Option<Arc<Affiliate>> {
        self.affiliates.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.affiliates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.affiliates.is_empty()
    }
}

/// Existence check for suggestion blocks
pub trait SuggestionBlocks: Send + Sync {
    /// Whether a suggestion block exists for this exact query text
    fn exists(&self, query: &str) -> bool;
}

/// Suggestion blocks held in memory
#[derive(Debug, Default, Clone)]
pub struct SuggestionBlockList {
    queries: HashSet<String>,
}

impl SuggestionBlockList {
    pub fn new<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: queries.into_iter().map(Into::into).collect(),
        }
    }
}

impl SuggestionBlocks for SuggestionBlockList {
    fn exists(&self, query: &str) -> bool {
        self.queries.contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = AffiliateRegistry::from_affiliates(&[
            Affiliate::new("usagov"),
            Affiliate::new("nps").with_search_engine("BingV6"),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("nps").unwrap().search_engine, "BingV6");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_suggestion_blocks_match_exact_text() {
        let blocks = SuggestionBlockList::new(["white house"]);
        assert!(blocks.exists("white house"));
        assert!(!blocks.exists("White House"));
        assert!(!blocks.exists("white house tours"));
    }
}
