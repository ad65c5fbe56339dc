//! Result type definitions

use serde::{Deserialize, Serialize};

/// A raw image record as returned by an upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RawImageResult {
    Aggregator(AggregatorImage),
    Bing(BingImage),
}

/// Image record from the aggregator engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorImage {
    pub title: String,
    /// Page the image appears on
    pub url: String,
    pub thumbnail_url: Option<String>,
    /// Full-size image
    pub media_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Image record from a Bing image search API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BingImage {
    pub name: String,
    pub content_url: String,
    pub host_page_url: String,
    pub host_page_display_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub thumbnail: Option<BingThumbnail>,
}

/// Thumbnail dimensions reported by Bing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BingThumbnail {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Provider-independent image result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub title: String,
    /// Page the image appears on
    pub url: String,
    /// Full-size image
    pub media_url: Option<String>,
    /// Host shown to users
    pub display_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub thumbnail: Thumbnail,
}

/// Normalized thumbnail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
