//! Image-generation vendor configuration.

use std::env;
use std::time::Duration;

/// Fallback shown when generation permanently fails for a submission.
pub const DEFAULT_PLACEHOLDER_URL: &str = "/static/images/placeholder.png";

#[derive(Debug, Clone)]
pub struct ImageServiceConfig {
    /// Vendor endpoint for generation requests.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Art-style tag sent with every prompt.
    pub art_style: String,
    /// Fallback image reference for the placeholder path.
    pub placeholder_url: String,
    /// Concurrency cap: the client-side rate control against the vendor.
    pub max_in_flight: usize,
    pub request_timeout: Duration,
}

impl Default for ImageServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7860".to_string(),
            api_key: None,
            art_style: "digital painting".to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            max_in_flight: 2,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ImageServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("ENGINE_IMAGE_API_URL").unwrap_or(defaults.base_url),
            api_key: env::var("ENGINE_IMAGE_API_KEY").ok(),
            art_style: env::var("ENGINE_IMAGE_STYLE").unwrap_or(defaults.art_style),
            placeholder_url: env::var("ENGINE_IMAGE_PLACEHOLDER_URL")
                .unwrap_or(defaults.placeholder_url),
            max_in_flight: env::var("ENGINE_IMAGE_MAX_IN_FLIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_in_flight),
            request_timeout: env::var("ENGINE_IMAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}
