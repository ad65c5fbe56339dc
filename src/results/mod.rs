//! Result types and normalization for image search results
//!
//! Providers hand back raw records; the post-processor maps them to one shape.

mod post_processor;
mod types;

pub use post_processor::ImageResultsPostProcessor;
pub use types::*;
