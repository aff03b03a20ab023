//! Image generation: vendor contract, retry policy, and the
//! bounded-concurrency pipeline.

pub mod client;
pub mod pipeline;
pub mod retry;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::state::{PlayerId, SessionId};

/// One generation request for one contributing player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub session_id: SessionId,
    pub round_no: u8,
    pub player_id: PlayerId,
    /// The filled sentence, already clamped to the vendor's prompt budget.
    pub prompt: String,
    pub style: String,
}

/// Vendor failure classification. The pipeline's retry decision depends on
/// this being derivable from the response.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service error: status {status}")]
    Service { status: u16 },
    /// 4xx-class rejection: malformed or unauthorized. Retrying wastes
    /// budget, so this fails fast to the placeholder path.
    #[error("request rejected: status {status}")]
    Rejected { status: u16 },
    #[error("unusable response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Timeout
                | GenerationError::Transport(_)
                | GenerationError::Service { .. }
        )
    }
}

/// The external image-generation vendor, behind a seam so tests and
/// alternative backends can stand in.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns a retrievable image reference for the prompt.
    async fn generate(&self, request: &ImageRequest) -> Result<String, GenerationError>;
}

pub use client::HttpImageGenerator;
pub use pipeline::ImagePipeline;
pub use retry::RetryPolicy;
