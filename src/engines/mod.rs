//! Image search engine module
//!
//! Defines the provider traits, the known engine kinds and a registry of
//! configured providers.

mod kind;
mod loader;
mod provider;
mod registry;
mod traits;

// Engine implementations
pub mod aggregator;
pub mod bing;

pub use kind::{BingVariant, EngineKind};
pub use loader::EngineLoader;
pub use provider::HttpProvider;
pub use registry::ProviderRegistry;
pub use traits::*;
