//! HTTP client for making requests to image search providers

use super::user_agent::{accept_json, generate_user_agent};
use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper configured from outgoing settings
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let default_timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .context("Invalid outgoing request timeout")?;

        let mut builder = Client::builder()
            .timeout(default_timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        let mut user_agent = generate_user_agent();
        if let Some(ref suffix) = settings.useragent_suffix {
            user_agent = format!("{} {}", user_agent, suffix);
        }

        Ok(Self {
            client,
            default_timeout,
            user_agent,
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Execute an engine request
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute an engine request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: EngineRequest,
        timeout: Duration,
    ) -> Result<EngineResponse> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_json());

        for (key, value) in self.extra_headers.iter().chain(request.headers.iter()) {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response) -> Result<EngineResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(EngineResponse {
            status,
            headers,
            text,
            url,
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_user_agent_suffix() {
        let settings = OutgoingSettings {
            useragent_suffix: Some("imagesearch".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert!(client.user_agent().ends_with(" imagesearch"));
    }

    #[test]
    fn test_invalid_request_timeout_rejected() {
        let settings = OutgoingSettings {
            request_timeout: -1.0,
            ..Default::default()
        };
        let err = HttpClient::with_settings(&settings).err().unwrap();
        assert_eq!(err.to_string(), "Invalid outgoing request timeout");
    }

    #[tokio::test]
    async fn test_execute_sends_params_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images"))
            .and(query_param("q", "cats"))
            .and(header("X-Test", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = EngineRequest::get(format!("{}/images", server.uri()))
            .param("q", "cats")
            .header("X-Test", "1");

        let response = client.execute(request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text, "{}");
    }
}
