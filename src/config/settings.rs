//! Settings structures for imagesearch-rs configuration

use crate::affiliates::Affiliate;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub engines: EnginesSettings,
    /// Affiliates served by this instance
    pub affiliates: Vec<Affiliate>,
    /// Query texts with a pending suggestion block
    pub suggestion_blocks: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            outgoing: OutgoingSettings::default(),
            engines: EnginesSettings::default(),
            affiliates: vec![Affiliate::new("usagov")],
            suggestion_blocks: vec![],
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (IMAGESEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("IMAGESEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("IMAGESEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("IMAGESEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("IMAGESEARCH_AGGREGATOR_URL") {
            self.engines.aggregator.base_url = val;
        }
        if let Some(val) = var("IMAGESEARCH_BING_API_KEY") {
            self.engines.bing_v6.api_key = Some(val.clone());
            self.engines.bing_v7.api_key = Some(val);
        }
    }

    /// Get affiliate config by name
    pub fn get_affiliate(&self, name: &str) -> Option<&Affiliate> {
        self.affiliates.iter().find(|a| a.name == name)
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name reported by the API
    pub instance_name: String,
    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl GeneralSettings {
    /// Default log level for the service
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "imagesearch".to_string(),
            enable_metrics: true,
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Page size used when a request does not give one
    pub default_per_page: u32,
    /// Largest page size a request may ask for
    pub max_per_page: u32,
    /// Locale used for affiliates without one
    pub default_locale: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            max_per_page: 100,
            default_locale: "en".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// User agent string (none = random)
    pub useragent_suffix: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            useragent_suffix: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Upstream provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginesSettings {
    pub aggregator: AggregatorSettings,
    pub bing_v6: BingSettings,
    pub bing_v7: BingSettings,
}

impl Default for EnginesSettings {
    fn default() -> Self {
        Self {
            aggregator: AggregatorSettings::default(),
            bing_v6: BingSettings {
                endpoint: "https://api.cognitive.microsoft.com/bing/v6.0/images/search".to_string(),
                ..Default::default()
            },
            bing_v7: BingSettings::default(),
        }
    }
}

/// Aggregator engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorSettings {
    /// Search endpoint of the aggregator service
    pub base_url: String,
    /// Whether the engine is disabled
    pub disabled: bool,
    /// Custom timeout in seconds
    pub timeout: Option<f64>,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/api/v1/images".to_string(),
            disabled: false,
            timeout: None,
        }
    }
}

/// Settings for one Bing image search API version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BingSettings {
    /// Image search endpoint
    pub endpoint: String,
    /// Subscription key
    pub api_key: Option<String>,
    /// Market code sent with each request
    pub market: String,
    /// Whether the engine is disabled
    pub disabled: bool,
    /// Custom timeout in seconds
    pub timeout: Option<f64>,
}

impl Default for BingSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.bing.microsoft.com/v7.0/images/search".to_string(),
            api_key: None,
            market: "en-US".to_string(),
            disabled: false,
            timeout: None,
        }
    }
}
