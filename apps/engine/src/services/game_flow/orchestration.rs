use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::info;

use super::GameEngine;
use crate::domain::rules::{SessionOptions, MIN_PLAYERS_TO_START};
use crate::domain::snapshot::{snapshot, SessionSnapshot};
use crate::domain::state::{Phase, PlayerId, PlayerProfile};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::events::{EventEnvelope, EvictionReason};

impl GameEngine {
    pub fn create_session(
        self: &Arc<Self>,
        host: PlayerProfile,
        options: SessionOptions,
    ) -> Result<SessionSnapshot, DomainError> {
        let handle = self.registry.create(host, options)?;
        let session = handle.lock();
        self.events.emit(EventEnvelope::PlayerCountChanged {
            session_id: session.id,
            players: session.players.len(),
        });
        Ok(snapshot(&session))
    }

    /// Host-only. Needs at least two players; kicks off round one.
    pub fn start_game(self: &Arc<Self>, code: &str, requester: PlayerId) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();

        if session.phase != Phase::Lobby {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyStarted,
                "the game has already started",
            ));
        }
        if requester != session.host_id {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                "only the host may start the game",
            ));
        }
        if session.players.len() < MIN_PLAYERS_TO_START {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!("need at least {MIN_PLAYERS_TO_START} players"),
            ));
        }

        session.touch();
        info!(
            session_id = %session.id,
            players = session.players.len(),
            max_rounds = session.max_rounds,
            "game starting"
        );
        self.begin_next_round(&mut session)
    }

    /// Host-only explicit teardown. Emits the eviction event so an external
    /// archiver can persist the final snapshot before the session is gone.
    pub fn end_session(self: &Arc<Self>, code: &str, requester: PlayerId) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let (session_id, final_snapshot) = {
            let session = handle.lock();
            if requester != session.host_id {
                return Err(DomainError::validation(
                    ValidationKind::NotHost,
                    "only the host may end the session",
                ));
            }
            (session.id, snapshot(&session))
        };

        self.registry.remove(code);
        self.timers.cancel(session_id);
        info!(session_id = %session_id, code, "session ended by host");
        self.events.emit(EventEnvelope::SessionEvicted {
            session_id,
            reason: EvictionReason::Ended,
            snapshot: final_snapshot,
        });
        Ok(())
    }

    /// One sweep pass: evict every session idle past the configured
    /// timeout. A malformed or stalled session is isolated to itself, so
    /// eviction is all the cleanup there is.
    pub fn sweep_idle_sessions(self: &Arc<Self>) {
        let evicted = self.registry.sweep_idle(self.config.idle_timeout);
        for handle in evicted {
            let (session_id, final_snapshot) = {
                let session = handle.lock();
                (session.id, snapshot(&session))
            };
            self.timers.cancel(session_id);
            info!(session_id = %session_id, "idle session evicted");
            self.events.emit(EventEnvelope::SessionEvicted {
                session_id,
                reason: EvictionReason::Idle,
                snapshot: final_snapshot,
            });
        }
    }
}

/// Run the idle sweep on a fixed interval for the engine's lifetime.
pub fn spawn_session_sweeper(engine: Arc<GameEngine>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(engine.config.sweep_interval).await;
            engine.sweep_idle_sessions();
        }
    })
}
