//! Provider backed by an HTTP image engine

use super::traits::*;
use crate::network::HttpClient;
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Runs an [`ImageEngine`] through the shared HTTP client
pub struct HttpProvider {
    engine: Arc<dyn ImageEngine>,
    client: HttpClient,
    timeout: Duration,
}

impl HttpProvider {
    /// Fails when the engine's timeout is negative or not a number
    pub fn new(engine: Arc<dyn ImageEngine>, client: HttpClient) -> anyhow::Result<Self> {
        let timeout = Duration::try_from_secs_f64(engine.timeout())
            .with_context(|| format!("Invalid timeout for engine {}", engine.name()))?;
        Ok(Self {
            engine,
            client,
            timeout,
        })
    }
}

#[async_trait]
impl ImageSearchProvider for HttpProvider {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn run(&self, params: &SearchParams) -> anyhow::Result<ProviderResult> {
        let start = Instant::now();
        let request = self.engine.request(params)?;
        let response = self.client.execute_with_timeout(request, self.timeout).await?;

        let mut result = self
            .engine
            .response(params, response)?
            .with_module_tags(
                self.engine.default_module_tag(),
                self.engine.default_spelling_module_tag(),
            );

        let elapsed = start.elapsed();
        result
            .diagnostics
            .insert("engine".to_string(), self.engine.name().into());
        result
            .diagnostics
            .insert("elapsed_ms".to_string(), (elapsed.as_millis() as u64).into());

        debug!(
            "Engine {} returned {} of {} results in {:?}",
            self.engine.name(),
            result.results.len(),
            result.total,
            elapsed
        );

        Ok(result)
    }
}
