//! Round orchestration: the engine that drives sessions through the phase
//! lifecycle, racing selection completeness against the submission timer
//! and bridging the image pipeline into the judging phase.
//!
//! Every inbound operation locks its session, mutates it as one discrete
//! step, and releases before anything suspends; the only async work is at
//! the I/O edges (timers, image generation), which dispatch back in by
//! session code and re-validate phase and round, so a late trigger against
//! an advanced session is a no-op.

mod orchestration;
mod player_actions;
mod round_lifecycle;

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::game::GameConfig;
use crate::config::images::ImageServiceConfig;
use crate::domain::sentence::SentenceDeck;
use crate::domain::snapshot::{self, SessionSnapshot};
use crate::errors::domain::DomainError;
use crate::events::{EventBus, EventEnvelope};
use crate::images::{ImageGenerator, ImagePipeline};
use crate::services::registry::SessionRegistry;
use crate::services::timers::TimerScheduler;

pub use orchestration::spawn_session_sweeper;

pub struct GameEngine {
    pub(super) registry: SessionRegistry,
    pub(super) timers: TimerScheduler,
    pub(super) pipeline: ImagePipeline,
    pub(super) events: EventBus,
    pub(super) deck: Arc<dyn SentenceDeck>,
    pub(super) config: GameConfig,
    pub(super) images: ImageServiceConfig,
}

impl GameEngine {
    pub fn new(
        config: GameConfig,
        images: ImageServiceConfig,
        deck: Arc<dyn SentenceDeck>,
        generator: Arc<dyn ImageGenerator>,
    ) -> Arc<Self> {
        let events = EventBus::new(config.event_capacity);
        let pipeline = ImagePipeline::new(generator, &images);
        Arc::new(Self {
            registry: SessionRegistry::new(),
            timers: TimerScheduler::new(),
            pipeline,
            events,
            deck,
            config,
            images,
        })
    }

    /// Outbound notification stream for the broadcaster collaborator.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    pub fn get_snapshot(&self, code: &str) -> Result<SessionSnapshot, DomainError> {
        let handle = self.registry.get(code)?;
        let session = handle.lock();
        Ok(snapshot::snapshot(&session))
    }

    pub fn live_session_count(&self) -> usize {
        self.registry.len()
    }
}
