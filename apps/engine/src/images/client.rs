//! HTTP client for the image-generation vendor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::images::ImageServiceConfig;
use crate::images::{GenerationError, ImageGenerator, ImageRequest};

/// Vendor prompt budget; filled sentences are clamped before sending.
pub const MAX_PROMPT_CHARS: usize = 500;

#[derive(Debug, Serialize)]
struct VendorRequest<'a> {
    prompt: &'a str,
    style: &'a str,
}

#[derive(Debug, Deserialize)]
struct VendorResponse {
    url: String,
}

pub struct HttpImageGenerator {
    http: reqwest::Client,
    config: ImageServiceConfig,
}

impl HttpImageGenerator {
    pub fn new(config: ImageServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

/// Clamp a prompt to the vendor budget on a char boundary.
pub fn clamp_prompt(prompt: &str) -> &str {
    match prompt.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &prompt[..idx],
        None => prompt,
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<String, GenerationError> {
        let url = format!("{}/v1/generations", self.config.base_url);
        let body = VendorRequest {
            prompt: clamp_prompt(&request.prompt),
            style: &request.style,
        };

        let mut builder = self
            .http
            .post(&url)
            .timeout(self.config.request_timeout)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::Transport(err.to_string())
            }
        })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(GenerationError::Service {
                status: status.as_u16(),
            });
        }

        let payload: VendorResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::InvalidResponse(err.to_string()))?;
        Ok(payload.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_respects_char_boundaries() {
        let short = "a cat";
        assert_eq!(clamp_prompt(short), short);

        let long = "é".repeat(MAX_PROMPT_CHARS + 50);
        let clamped = clamp_prompt(&long);
        assert_eq!(clamped.chars().count(), MAX_PROMPT_CHARS);
    }
}
