//! Metrics collection module
//!
//! Tracks provider performance, error rates and fallback usage.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

const RESPONSE_TIME_WINDOW: usize = 100;

/// Process-wide metrics collector
pub struct Metrics {
    /// Total search count
    total_searches: AtomicU64,
    /// Searches answered by the fallback engine
    total_fallbacks: AtomicU64,
    /// Runs per engine
    engine_searches: RwLock<HashMap<String, u64>>,
    /// Engine response times (rolling window in ms)
    engine_response_times: RwLock<HashMap<String, Vec<u64>>>,
    /// Engine error counts
    engine_errors: RwLock<HashMap<String, u64>>,
    /// Engine success counts
    engine_successes: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            total_fallbacks: AtomicU64::new(0),
            engine_searches: RwLock::new(HashMap::new()),
            engine_response_times: RwLock::new(HashMap::new()),
            engine_errors: RwLock::new(HashMap::new()),
            engine_successes: RwLock::new(HashMap::new()),
        }
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment fallback count
    pub fn inc_fallback(&self) {
        self.total_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an engine run
    pub fn record_engine_search(&self, engine: &str) {
        if let Ok(mut searches) = self.engine_searches.write() {
            *searches.entry(engine.to_string()).or_insert(0) += 1;
        }
    }

    /// Record engine response time
    pub fn record_response_time(&self, engine: &str, time_ms: u64) {
        if let Ok(mut times) = self.engine_response_times.write() {
            let entry = times.entry(engine.to_string()).or_default();
            if entry.len() >= RESPONSE_TIME_WINDOW {
                entry.remove(0);
            }
            entry.push(time_ms);
        }
    }

    /// Record engine error
    pub fn record_error(&self, engine: &str) {
        if let Ok(mut errors) = self.engine_errors.write() {
            *errors.entry(engine.to_string()).or_insert(0) += 1;
        }
    }

    /// Record engine success
    pub fn record_success(&self, engine: &str) {
        if let Ok(mut successes) = self.engine_successes.write() {
            *successes.entry(engine.to_string()).or_insert(0) += 1;
        }
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Get total fallbacks
    pub fn get_total_fallbacks(&self) -> u64 {
        self.total_fallbacks.load(Ordering::Relaxed)
    }

    /// Get average response time for an engine
    pub fn get_avg_response_time(&self, engine: &str) -> Option<u64> {
        let times = self.engine_response_times.read().ok()?;
        times.get(engine).and_then(|t| {
            if t.is_empty() {
                None
            } else {
                Some(t.iter().sum::<u64>() / t.len() as u64)
            }
        })
    }

    /// Get reliability percentage for an engine
    pub fn get_reliability(&self, engine: &str) -> f64 {
        let error_count = count(&self.engine_errors, engine);
        let success_count = count(&self.engine_successes, engine);

        let total = error_count + success_count;
        if total == 0 {
            100.0
        } else {
            (success_count as f64 / total as f64) * 100.0
        }
    }

    /// Get all engine statistics
    pub fn get_engine_stats(&self) -> HashMap<String, EngineStats> {
        let engines: Vec<String> = match self.engine_searches.read() {
            Ok(searches) => searches.keys().cloned().collect(),
            Err(_) => return HashMap::new(),
        };

        engines
            .into_iter()
            .map(|engine| {
                let stats = EngineStats {
                    searches: count(&self.engine_searches, &engine),
                    avg_response_time: self.get_avg_response_time(&engine),
                    reliability: self.get_reliability(&engine),
                };
                (engine, stats)
            })
            .collect()
    }
}

fn count(map: &RwLock<HashMap<String, u64>>, engine: &str) -> u64 {
    map.read()
        .ok()
        .and_then(|m| m.get(engine).copied())
        .unwrap_or(0)
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single engine
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub searches: u64,
    pub avg_response_time: Option<u64>,
    pub reliability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = Metrics::new();

        metrics.inc_search();
        metrics.inc_fallback();
        metrics.record_engine_search("bing_v7");
        metrics.record_response_time("bing_v7", 100);
        metrics.record_success("bing_v7");

        assert_eq!(metrics.get_total_searches(), 1);
        assert_eq!(metrics.get_total_fallbacks(), 1);
        assert_eq!(metrics.get_avg_response_time("bing_v7"), Some(100));
        assert_eq!(metrics.get_reliability("bing_v7"), 100.0);
    }

    #[test]
    fn test_reliability_with_errors() {
        let metrics = Metrics::new();
        metrics.record_engine_search("aggregator");
        metrics.record_engine_search("aggregator");
        metrics.record_success("aggregator");
        metrics.record_error("aggregator");

        let stats = metrics.get_engine_stats();
        assert_eq!(stats["aggregator"].searches, 2);
        assert_eq!(stats["aggregator"].reliability, 50.0);
    }

    #[test]
    fn test_response_time_window() {
        let metrics = Metrics::new();
        for _ in 0..RESPONSE_TIME_WINDOW {
            metrics.record_response_time("bing_v6", 10);
        }
        metrics.record_response_time("bing_v6", 110);
        assert_eq!(metrics.get_avg_response_time("bing_v6"), Some(11));
    }
}
