#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod images;
pub mod services;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::game::GameConfig;
pub use config::images::ImageServiceConfig;
pub use domain::ranking::RankSlot;
pub use domain::rules::SessionOptions;
pub use domain::sentence::{SentenceDeck, SentenceTemplate};
pub use domain::snapshot::SessionSnapshot;
pub use domain::state::{Phase, PlayerId, PlayerProfile, SessionId};
pub use errors::domain::DomainError;
pub use events::EventEnvelope;
pub use images::{HttpImageGenerator, ImageGenerator};
pub use services::game_flow::{spawn_session_sweeper, GameEngine};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
