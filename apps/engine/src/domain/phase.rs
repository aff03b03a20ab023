//! The fixed, directional phase transition table.

use crate::domain::state::{GameSession, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

/// True iff `from -> to` appears in the transition table.
pub fn can_transition(from: Phase, to: Phase) -> bool {
    matches!(
        (from, to),
        (Phase::Lobby, Phase::RoundIntro)
            | (Phase::RoundIntro, Phase::CardSelection)
            | (Phase::CardSelection, Phase::Judging)
            | (Phase::Judging, Phase::Results)
            | (Phase::Results, Phase::RoundIntro)
            | (Phase::Results, Phase::Completed)
    )
}

/// Apply a transition, rejecting anything outside the table. On rejection
/// the session is untouched.
pub fn transition(session: &mut GameSession, to: Phase) -> Result<(), DomainError> {
    let from = session.phase;
    if !can_transition(from, to) {
        return Err(DomainError::validation(
            ValidationKind::InvalidTransition,
            format!("{from} -> {to}"),
        ));
    }
    session.phase = to;
    Ok(())
}

/// Reject an operation issued against the wrong phase.
pub fn require_phase(session: &GameSession, expected: Phase) -> Result<(), DomainError> {
    if session.phase != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("expected {expected}, session is in {}", session.phase),
        ));
    }
    Ok(())
}
