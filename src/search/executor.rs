//! Image search execution and orchestration

use super::models::{ImageSearchOptions, SearchOutcome, SearchRequest};
use super::selector::{ProviderSelector, Selection};
use crate::affiliates::{Affiliate, SuggestionBlocks};
use crate::config::SearchSettings;
use crate::engines::{EngineKind, ProviderRegistry, ProviderResult, SearchParams};
use crate::error::{ImageSearchError, Result};
use crate::locales::{self, Translations, EMPTY_QUERY};
use crate::metrics::Metrics;
use crate::results::{ImageResult, ImageResultsPostProcessor, RawImageResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Module tag of commercial (Bing) image results
pub const COMMERCIAL_MODULE_TAG: &str = "IMAG";

/// Collaborators shared by every image search
#[derive(Clone)]
pub struct SearchContext {
    registry: Arc<ProviderRegistry>,
    suggestion_blocks: Arc<dyn SuggestionBlocks>,
    translations: Arc<Translations>,
    settings: Arc<SearchSettings>,
    metrics: Arc<Metrics>,
}

impl SearchContext {
    /// Create a new search context
    pub fn new(
        registry: Arc<ProviderRegistry>,
        suggestion_blocks: Arc<dyn SuggestionBlocks>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            registry,
            suggestion_blocks,
            translations: Arc::new(Translations::new()),
            settings: Arc::new(settings),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Use a shared metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Use a custom translation store
    pub fn with_translations(mut self, translations: Arc<Translations>) -> Self {
        self.translations = translations;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Build a search for one request
    pub fn image_search(
        &self,
        affiliate: Arc<Affiliate>,
        options: &ImageSearchOptions,
    ) -> ImageSearch {
        let request = SearchRequest::new(
            affiliate,
            options,
            &self.settings,
            self.suggestion_blocks.as_ref(),
        );
        ImageSearch::new(request, self.clone())
    }
}

/// One completed provider invocation
#[derive(Debug, Clone)]
pub struct ProviderRun {
    pub kind: EngineKind,
    pub params: SearchParams,
    pub result: ProviderResult,
}

/// Where a search is in its lifecycle
#[derive(Debug, Clone)]
pub enum SearchState {
    /// Not run yet
    Pending,
    /// Query was blank; no provider was called
    EmptyQuery { message: String },
    /// Results come from the routed provider
    Primary(ProviderRun),
    /// The routed provider came back empty and the aggregator was asked instead
    Fallback { primary: EngineKind, run: ProviderRun },
}

/// A single image search request and its orchestration state
pub struct ImageSearch {
    request: SearchRequest,
    state: SearchState,
    module_tag: Option<String>,
    modules: Vec<String>,
    context: SearchContext,
}

impl ImageSearch {
    pub fn new(request: SearchRequest, context: SearchContext) -> Self {
        Self {
            request,
            state: SearchState::Pending,
            module_tag: None,
            modules: Vec::new(),
            context,
        }
    }

    /// Run the search.
    ///
    /// A blank query ends in the error state without resolving or calling
    /// any provider. An unresolvable engine name is a configuration error.
    /// Provider failures are returned as-is.
    pub async fn run(&mut self) -> Result<()> {
        if !matches!(self.state, SearchState::Pending) {
            debug!("Search for '{}' already ran", self.request.query());
            return Ok(());
        }

        if !self.request.has_query() {
            let message = self
                .context
                .translations
                .translate(&self.locale(), EMPTY_QUERY);
            self.state = SearchState::EmptyQuery { message };
            return Ok(());
        }

        let selection = ProviderSelector::select(&self.request, self.request.uses_cr())?;

        self.context.metrics.inc_search();
        info!(
            "Image search '{}' for affiliate {} on {}",
            self.request.query(),
            self.request.affiliate().name,
            selection.kind
        );

        let primary = self.execute(selection).await?;
        let primary_kind = primary.kind;
        let primary_empty = primary.result.is_empty();
        self.state = SearchState::Primary(primary);

        if primary_empty && self.fallback_allowed() {
            warn!(
                "No results from {} for '{}', falling back to aggregator",
                primary_kind,
                self.request.query()
            );
            self.context.metrics.inc_fallback();

            let selection = ProviderSelector::select(&self.request, true)?;
            let run = self.execute(selection).await?;
            self.state = SearchState::Fallback {
                primary: primary_kind,
                run,
            };
        }

        if !self.results().is_empty() {
            self.assign_module_tag();
        }

        Ok(())
    }

    fn fallback_allowed(&self) -> bool {
        self.request.page() == 1
            && !self.request.uses_cr()
            && self.request.affiliate().is_bing_image_search_enabled
    }

    async fn execute(&self, selection: Selection) -> Result<ProviderRun> {
        let provider = self.context.registry.get(selection.kind)?;
        let engine = selection.kind.name();
        let start = Instant::now();

        self.context.metrics.record_engine_search(engine);

        match provider.run(&selection.params).await {
            Ok(result) => {
                self.context.metrics.record_success(engine);
                self.context
                    .metrics
                    .record_response_time(engine, start.elapsed().as_millis() as u64);
                debug!(
                    "Engine {} returned {} results (total {})",
                    engine,
                    result.results.len(),
                    result.total
                );
                Ok(ProviderRun {
                    kind: selection.kind,
                    params: selection.params,
                    result,
                })
            }
            Err(e) => {
                self.context.metrics.record_error(engine);
                Err(ImageSearchError::Provider(e))
            }
        }
    }

    fn assign_module_tag(&mut self) {
        let Some(run) = self.active_run() else {
            return;
        };

        let tag = run.result.default_module_tag.clone();
        let spelling_tag = run
            .result
            .spelling_suggestion
            .as_ref()
            .and(run.result.default_spelling_module_tag.clone());

        self.modules.push(tag.clone());
        self.modules.extend(spelling_tag);
        self.module_tag = Some(tag);
    }

    fn locale(&self) -> String {
        self.request
            .affiliate()
            .locale
            .as_deref()
            .filter(|l| locales::is_supported(l))
            .unwrap_or(&self.context.settings.default_locale)
            .to_string()
    }

    /// Provider run whose results the search currently holds
    pub fn active_run(&self) -> Option<&ProviderRun> {
        match &self.state {
            SearchState::Primary(run) => Some(run),
            SearchState::Fallback { run, .. } => Some(run),
            SearchState::Pending | SearchState::EmptyQuery { .. } => None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Provider chosen by normal routing, once the search has called it
    pub fn primary_kind(&self) -> Option<EngineKind> {
        match &self.state {
            SearchState::Primary(run) => Some(run.kind),
            SearchState::Fallback { primary, .. } => Some(*primary),
            SearchState::Pending | SearchState::EmptyQuery { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SearchState::EmptyQuery { message } => Some(message),
            _ => None,
        }
    }

    pub fn total(&self) -> u64 {
        self.active_run().map_or(0, |r| r.result.total)
    }

    pub fn startrecord(&self) -> u64 {
        self.active_run().map_or(0, |r| r.result.startrecord)
    }

    pub fn endrecord(&self) -> u64 {
        self.active_run().map_or(0, |r| r.result.endrecord)
    }

    /// Raw records of the held run
    pub fn results(&self) -> &[RawImageResult] {
        self.active_run()
            .map(|r| r.result.results.as_slice())
            .unwrap_or(&[])
    }

    pub fn diagnostics(&self) -> Option<&HashMap<String, Value>> {
        self.active_run().map(|r| &r.result.diagnostics)
    }

    pub fn module_tag(&self) -> Option<&str> {
        self.module_tag.as_deref()
    }

    /// Module tags in the order they were assigned
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn uses_cr(&self) -> bool {
        self.request.uses_cr()
    }

    pub fn queried_at_seconds(&self) -> i64 {
        self.request.queried_at_seconds()
    }

    /// Spelling suggestion of the held run, unless the query has a
    /// suggestion block
    pub fn spelling_suggestion(&self) -> Option<&str> {
        if !self.request.spelling_suggestion_eligible() {
            return None;
        }
        self.active_run()
            .and_then(|r| r.result.spelling_suggestion.as_deref())
    }

    /// Whether the results came from a commercial engine
    pub fn commercial_results(&self) -> bool {
        self.module_tag.as_deref() == Some(COMMERCIAL_MODULE_TAG)
    }

    /// Normalized results, or `None` when there are none
    pub fn format_results(&self) -> Option<Vec<ImageResult>> {
        ImageResultsPostProcessor::new(self.total(), self.results()).normalized_results()
    }

    /// Result envelope for the current state
    pub fn outcome(&self) -> SearchOutcome {
        if let Some(message) = self.error_message() {
            return SearchOutcome::Error {
                error: message.to_string(),
            };
        }

        SearchOutcome::Success {
            total: self.total(),
            startrecord: self.startrecord(),
            endrecord: self.endrecord(),
            results: self.format_results().unwrap_or_default(),
        }
    }
}
