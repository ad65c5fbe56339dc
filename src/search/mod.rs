//! Search orchestration module
//!
//! Resolves pagination, routes a request to a provider, applies the
//! empty-result fallback and builds the result envelope.

mod executor;
mod models;
mod pagination;
mod selector;

pub use executor::{ImageSearch, ProviderRun, SearchContext, SearchState, COMMERCIAL_MODULE_TAG};
pub use models::*;
pub use pagination::Pagination;
pub use selector::{ProviderSelector, Selection};
