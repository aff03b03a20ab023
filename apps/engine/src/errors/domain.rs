//! Domain-level error type used across the engine's services.
//!
//! This error type is transport-agnostic. The embedding layer (HTTP,
//! websocket, whatever carries client requests) converts kinds to its own
//! status codes; nothing in here knows about wire formats.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation and business-rule violation kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Session options outside the allowed bounds.
    InvalidConfig,
    /// Attempted phase transition not in the fixed table.
    InvalidTransition,
    /// Operation issued against the wrong phase.
    PhaseMismatch,
    /// Selection does not supply exactly one card per blank.
    InvalidSelectionShape,
    /// The round's judge may not submit cards.
    JudgeCannotSubmit,
    /// Ranking operation issued by a player who is not the judge.
    NotJudge,
    /// Operation reserved for the session host.
    NotHost,
    /// Game start requires a minimum player count.
    NotEnoughPlayers,
    /// Ranking selection attempted before every candidate image loaded.
    NotReady,
    /// Finalize attempted with an unfilled rank slot.
    IncompleteRanking,
    Other(String),
}

/// Semantic conflict kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Join attempted against a session at max_players.
    SessionFull,
    /// Join or start attempted after the session left the lobby.
    AlreadyStarted,
    /// Join-code generation exhausted its retry budget. Retryable by caller.
    CodeExhausted,
    /// One entrant cannot hold both rank slots.
    DuplicateAssignment,
    Other(String),
}

/// Missing resources in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Player,
    /// Ranking target is not one of the round's candidates.
    Candidate,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
}
