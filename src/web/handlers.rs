//! HTTP request handlers

use super::state::AppState;
use crate::error::ImageSearchError;
use crate::search::{ImageSearchOptions, SearchOutcome};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

/// Image search handler
pub async fn image_search(
    State(state): State<AppState>,
    Query(options): Query<ImageSearchOptions>,
) -> Response {
    let Some(affiliate) = state.affiliates.get(&options.affiliate) else {
        return error_response(ImageSearchError::UnknownAffiliate(options.affiliate));
    };

    let mut search = state.search.image_search(affiliate, &options);
    if let Err(e) = search.run().await {
        return error_response(e);
    }

    Json(search.outcome()).into_response()
}

fn error_response(err: ImageSearchError) -> Response {
    let status = match err {
        ImageSearchError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ImageSearchError::UnknownAffiliate(_) => StatusCode::NOT_FOUND,
        ImageSearchError::Provider(_) => StatusCode::BAD_GATEWAY,
    };
    tracing::error!("Image search failed: {}", err);

    let body = SearchOutcome::Error {
        error: err.to_string(),
    };
    (status, Json(body)).into_response()
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION
    }))
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    total_searches: u64,
    total_fallbacks: u64,
    engines: Vec<&'static str>,
    engine_stats: HashMap<String, crate::metrics::EngineStats>,
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> Response {
    if !state.metrics_enabled() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let metrics = state.search.metrics();
    Json(StatsResponse {
        total_searches: metrics.get_total_searches(),
        total_fallbacks: metrics.get_total_fallbacks(),
        engines: state.search.registry().names(),
        engine_stats: metrics.get_engine_stats(),
    })
    .into_response()
}
