//! Outbound notification channel.
//!
//! The engine publishes a tagged union of event kinds onto an in-process
//! broadcast channel; the excluded broadcaster collaborator subscribes and
//! fans events out to clients however it likes. Session snapshots ride
//! along on eviction so an external archiver can persist a final state.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::snapshot::{SessionSnapshot, StandingEntry};
use crate::domain::state::{Phase, PlayerId, SessionId};

/// Per-player image reference in a batch-ready notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateImage {
    pub player_id: PlayerId,
    pub url: String,
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    Idle,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    PlayerCountChanged {
        session_id: SessionId,
        players: usize,
    },
    PhaseChanged {
        session_id: SessionId,
        phase: Phase,
        round_no: u8,
    },
    SubmissionProgress {
        session_id: SessionId,
        submitted: usize,
        expected: usize,
    },
    ImageGenerationStarted {
        session_id: SessionId,
        round_no: u8,
        expected: usize,
    },
    ImageBatchReady {
        session_id: SessionId,
        round_no: u8,
        images: Vec<CandidateImage>,
    },
    RoundResults {
        session_id: SessionId,
        round_no: u8,
        first: Option<PlayerId>,
        second: Option<PlayerId>,
        points: Vec<(PlayerId, u32)>,
        standings: Vec<StandingEntry>,
    },
    GameCompleted {
        session_id: SessionId,
        standings: Vec<StandingEntry>,
    },
    HostDisconnected {
        session_id: SessionId,
        host_id: PlayerId,
    },
    SessionEvicted {
        session_id: SessionId,
        reason: EvictionReason,
        snapshot: SessionSnapshot,
    },
}

/// Thin wrapper over a broadcast sender; publishing with no subscribers is
/// not an error.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: EventEnvelope) {
        if self.tx.send(event).is_err() {
            debug!("event dropped: no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn envelope_serializes_snake_case_tagged() {
        let event = EventEnvelope::PhaseChanged {
            session_id: Uuid::nil(),
            phase: Phase::CardSelection,
            round_no: 2,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_changed");
        assert_eq!(json["phase"], "card_selection");
        assert_eq!(json["round_no"], 2);
    }

    #[tokio::test]
    async fn emit_without_subscribers_is_a_no_op() {
        let bus = EventBus::new(8);
        bus.emit(EventEnvelope::PlayerCountChanged {
            session_id: Uuid::nil(),
            players: 1,
        });

        let mut rx = bus.subscribe();
        bus.emit(EventEnvelope::PlayerCountChanged {
            session_id: Uuid::nil(),
            players: 2,
        });
        let got = rx.recv().await.unwrap();
        assert!(matches!(
            got,
            EventEnvelope::PlayerCountChanged { players: 2, .. }
        ));
    }
}
