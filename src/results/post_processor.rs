//! Normalization of raw provider records

use super::types::*;
use url::Url;

/// Turns raw records from any provider into [`ImageResult`]s
pub struct ImageResultsPostProcessor<'a> {
    total: u64,
    results: &'a [RawImageResult],
}

impl<'a> ImageResultsPostProcessor<'a> {
    pub fn new(total: u64, results: &'a [RawImageResult]) -> Self {
        Self { total, results }
    }

    /// Total reported by the provider for the whole result set
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Normalized results in provider order, or `None` for an empty set
    pub fn normalized_results(&self) -> Option<Vec<ImageResult>> {
        if self.results.is_empty() {
            return None;
        }

        Some(self.results.iter().map(normalize).collect())
    }
}

fn normalize(raw: &RawImageResult) -> ImageResult {
    match raw {
        RawImageResult::Aggregator(image) => ImageResult {
            title: image.title.clone(),
            url: image.url.clone(),
            media_url: image.media_url.clone(),
            display_url: display_host(&image.url),
            width: image.width,
            height: image.height,
            thumbnail: Thumbnail {
                url: image.thumbnail_url.clone(),
                width: None,
                height: None,
            },
        },
        RawImageResult::Bing(image) => {
            let thumb = image.thumbnail.clone().unwrap_or_default();
            ImageResult {
                title: image.name.clone(),
                url: image.host_page_url.clone(),
                media_url: Some(image.content_url.clone()).filter(|u| !u.is_empty()),
                display_url: image
                    .host_page_display_url
                    .clone()
                    .or_else(|| display_host(&image.host_page_url)),
                width: image.width,
                height: image.height,
                thumbnail: Thumbnail {
                    url: image.thumbnail_url.clone(),
                    width: thumb.width,
                    height: thumb.height,
                },
            }
        }
    }
}

fn display_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
}
