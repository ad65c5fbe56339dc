//! Error types for image search orchestration

use thiserror::Error;

/// Errors surfaced by the image search core
#[derive(Error, Debug)]
pub enum ImageSearchError {
    /// The affiliate's configuration names a provider that cannot be resolved
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request names an affiliate that is not configured
    #[error("Unknown affiliate: {0}")]
    UnknownAffiliate(String),

    /// Failure raised by an upstream provider client, passed through as-is
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl ImageSearchError {
    /// Whether this error stems from configuration rather than the upstream
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result alias for image search operations
pub type Result<T> = std::result::Result<T, ImageSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_is_transparent() {
        let err: ImageSearchError = anyhow::anyhow!("HTTP error: 503").into();
        assert_eq!(err.to_string(), "HTTP error: 503");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_error_message() {
        let err = ImageSearchError::Configuration("Unknown engine: BingV5".to_string());
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Configuration error: Unknown engine: BingV5");
    }
}
