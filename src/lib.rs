//! imagesearch-rs: image search orchestration
//!
//! Routes an image search to the aggregator engine or a Bing image engine,
//! falls back to the aggregator when Bing has nothing on the first page, and
//! returns a normalized result envelope.

pub mod affiliates;
pub mod config;
pub mod engines;
pub mod error;
pub mod locales;
pub mod metrics;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engines::{ImageSearchProvider, ProviderResult, SearchParams};
pub use error::ImageSearchError;
pub use results::ImageResult;
pub use search::{ImageSearch, ImageSearchOptions, SearchContext, SearchOutcome};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
