//! Bounded-concurrency generation pipeline.
//!
//! One request per contributing player per round. A semaphore caps the
//! number in flight (FIFO among waiters); the cap is the only client-side
//! rate control against the vendor, so a permit is held for a request's
//! whole lifecycle including its backoff sleeps. Every request resolves —
//! to an image or to the placeholder — so a batch always completes and the
//! round can always reach judging.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::images::ImageServiceConfig;
use crate::domain::ranking::ImageOutcome;
use crate::domain::state::PlayerId;
use crate::images::{ImageGenerator, ImageRequest, RetryPolicy};

pub struct ImagePipeline {
    generator: Arc<dyn ImageGenerator>,
    permits: Arc<Semaphore>,
    retry: RetryPolicy,
    placeholder_url: String,
}

impl ImagePipeline {
    pub fn new(generator: Arc<dyn ImageGenerator>, config: &ImageServiceConfig) -> Self {
        Self {
            generator,
            permits: Arc::new(Semaphore::new(config.max_in_flight)),
            retry: RetryPolicy::default(),
            placeholder_url: config.placeholder_url.clone(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Run one round's batch to completion. Settles every request, success
    /// or placeholder; never aborts on individual failures.
    pub async fn generate_batch(
        &self,
        requests: Vec<ImageRequest>,
    ) -> Vec<(PlayerId, ImageOutcome)> {
        join_all(requests.into_iter().map(|req| self.generate_one(req))).await
    }

    async fn generate_one(&self, request: ImageRequest) -> (PlayerId, ImageOutcome) {
        let player_id = request.player_id;
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return (
                    player_id,
                    ImageOutcome::placeholder(self.placeholder_url.clone(), "pipeline closed"),
                )
            }
        };

        let mut attempt = 1u32;
        loop {
            match self.generator.generate(&request).await {
                Ok(url) => {
                    debug!(
                        session_id = %request.session_id,
                        player_id = %player_id,
                        attempt,
                        "image generated"
                    );
                    return (player_id, ImageOutcome::resolved(url));
                }
                Err(err) if self.retry.should_retry(attempt, &err) => {
                    let delay = self.retry.backoff_delay(attempt);
                    warn!(
                        session_id = %request.session_id,
                        player_id = %player_id,
                        attempt,
                        retry_delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "image generation failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(
                        session_id = %request.session_id,
                        player_id = %player_id,
                        attempt,
                        error = %err,
                        "image generation failed permanently, substituting placeholder"
                    );
                    return (
                        player_id,
                        ImageOutcome::placeholder(self.placeholder_url.clone(), err.to_string()),
                    );
                }
            }
        }
    }
}
