//! The table of live sessions, keyed by join code.
//!
//! The table itself is a `DashMap`; each session sits behind its own mutex
//! so every externally-triggered operation mutates it as one discrete step.
//! Callers clone the `Arc` out of the table and lock after the table guard
//! is gone, keeping lock order table-then-session everywhere.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::domain::rules::{validate_options, SessionOptions};
use crate::domain::state::{GameSession, Phase, Player, PlayerId, PlayerProfile};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::utils::join_code::{generate_join_code, MAX_CODE_ATTEMPTS};

pub type SessionHandle = Arc<Mutex<GameSession>>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a freshly generated unique code and insert it
    /// into the live table. Bounds are rejected before any state exists.
    pub fn create(
        &self,
        host: PlayerProfile,
        options: SessionOptions,
    ) -> Result<SessionHandle, DomainError> {
        validate_options(&options)?;
        let code = self.generate_unique_code()?;
        let session = GameSession::new(Uuid::new_v4(), code.clone(), host, options);
        info!(session_id = %session.id, code = %code, "session created");

        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(code, Arc::clone(&handle));
        Ok(handle)
    }

    /// Generate a code that collides with no live session, within a fixed
    /// attempt budget.
    pub fn generate_unique_code(&self) -> Result<String, DomainError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_join_code();
            if !self.sessions.contains_key(&code) {
                return Ok(code);
            }
        }
        Err(DomainError::conflict(
            ConflictKind::CodeExhausted,
            format!("no unique join code after {MAX_CODE_ATTEMPTS} attempts"),
        ))
    }

    pub fn get(&self, code: &str) -> Result<SessionHandle, DomainError> {
        self.sessions
            .get(code)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Session, format!("no session with code {code}"))
            })
    }

    pub fn remove(&self, code: &str) -> Option<SessionHandle> {
        self.sessions.remove(code).map(|(_, handle)| handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove and return every session idle past `timeout`. The idle check
    /// re-runs under the removal guard so a just-touched session survives.
    pub fn sweep_idle(&self, timeout: Duration) -> Vec<SessionHandle> {
        let candidates: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().lock().is_idle(timeout))
            .map(|entry| entry.key().clone())
            .collect();

        let mut evicted = Vec::new();
        for code in candidates {
            if let Some((_, handle)) = self
                .sessions
                .remove_if(&code, |_, handle| handle.lock().is_idle(timeout))
            {
                evicted.push(handle);
            }
        }
        evicted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    /// Same player id joining again: idempotent, no duplicate entry; the
    /// liveness flag flips back on.
    Rejoined,
}

pub fn join(session: &mut GameSession, profile: PlayerProfile) -> Result<JoinOutcome, DomainError> {
    if let Some(player) = session.player_mut(profile.id) {
        player.connected = true;
        return Ok(JoinOutcome::Rejoined);
    }
    if session.phase != Phase::Lobby {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyStarted,
            "joining is only permitted in the lobby",
        ));
    }
    if session.players.len() >= session.max_players as usize {
        return Err(DomainError::conflict(
            ConflictKind::SessionFull,
            format!("session is at its {}-player limit", session.max_players),
        ));
    }
    session.players.push(Player::from_profile(profile, false));
    Ok(JoinOutcome::Joined)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub was_host: bool,
    /// True when the player entry was dropped (lobby); false when the
    /// player was only marked disconnected (mid-game, keeps scores stable).
    pub removed: bool,
}

pub fn leave(session: &mut GameSession, player_id: PlayerId) -> Result<LeaveOutcome, DomainError> {
    session.require_player(player_id)?;
    let was_host = player_id == session.host_id;

    let removed = if session.phase == Phase::Lobby {
        session.players.retain(|p| p.id != player_id);
        true
    } else {
        if let Some(player) = session.player_mut(player_id) {
            player.connected = false;
        }
        false
    };

    Ok(LeaveOutcome { was_host, removed })
}
