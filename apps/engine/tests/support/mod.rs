//! Shared fixtures for the engine integration suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use engine::config::{GameConfig, ImageServiceConfig};
use engine::domain::sentence::{SentenceDeck, SentenceTemplate};
use engine::images::{GenerationError, ImageGenerator, ImageRequest};
use engine::{GameEngine, PlayerProfile};

/// Deck that always deals the same two-blank template.
pub struct FixedDeck;

impl SentenceDeck for FixedDeck {
    fn draw(&self) -> SentenceTemplate {
        SentenceTemplate::new("A _____ chasing a _____.")
    }
}

/// Vendor stub that resolves instantly.
pub struct StubGenerator;

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<String, GenerationError> {
        Ok(format!(
            "https://img.test/{}/{}",
            request.round_no, request.player_id
        ))
    }
}

/// Vendor stub that always times out; counts attempts.
#[derive(Default)]
pub struct TimeoutGenerator {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl ImageGenerator for TimeoutGenerator {
    async fn generate(&self, _request: &ImageRequest) -> Result<String, GenerationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Timeout)
    }
}

/// Vendor stub that rejects as unauthorized; counts attempts.
#[derive(Default)]
pub struct RejectingGenerator {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl ImageGenerator for RejectingGenerator {
    async fn generate(&self, _request: &ImageRequest) -> Result<String, GenerationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Rejected { status: 401 })
    }
}

/// Fails (retryably) for one specific player, succeeds for everyone else.
pub struct FailForPlayer {
    pub failing: Uuid,
}

#[async_trait]
impl ImageGenerator for FailForPlayer {
    async fn generate(&self, request: &ImageRequest) -> Result<String, GenerationError> {
        if request.player_id == self.failing {
            Err(GenerationError::Timeout)
        } else {
            Ok(format!("https://img.test/{}", request.player_id))
        }
    }
}

/// Records the peak number of concurrently running generations.
#[derive(Default)]
pub struct InFlightProbe {
    current: AtomicUsize,
    pub peak: AtomicUsize,
}

#[async_trait]
impl ImageGenerator for InFlightProbe {
    async fn generate(&self, request: &ImageRequest) -> Result<String, GenerationError> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("https://img.test/{}", request.player_id))
    }
}

// Auto-initialize logging for integration tests
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::test_logging::init();
}

pub fn test_engine() -> Arc<GameEngine> {
    test_engine_with(Arc::new(StubGenerator))
}

pub fn test_engine_with(generator: Arc<dyn ImageGenerator>) -> Arc<GameEngine> {
    GameEngine::new(
        GameConfig::default(),
        ImageServiceConfig::default(),
        Arc::new(FixedDeck),
        generator,
    )
}

pub fn profile(name: &str) -> PlayerProfile {
    PlayerProfile {
        id: Uuid::new_v4(),
        display_name: name.to_string(),
        avatar: format!("avatar-{name}"),
    }
}

pub fn two_cards() -> Vec<String> {
    vec!["haunted toaster".to_string(), "tax auditor".to_string()]
}

/// Let spawned work (image batches, timer callbacks) run to quiescence
/// under the paused clock.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
