//! Per-round card selection bookkeeping.
//!
//! Holds no timing logic; completeness is polled by the game flow, which
//! races it against the submission window timer.

use std::collections::HashMap;

use time::OffsetDateTime;

use crate::domain::phase::require_phase;
use crate::domain::state::{GameSession, Phase, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

/// One player's submitted cards for the active round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    /// One card text per blank, in blank order.
    pub cards: Vec<String>,
    pub submitted_at: OffsetDateTime,
}

/// Selections for the active round only; cleared on round advance.
#[derive(Debug, Default)]
pub struct SelectionBoard {
    records: HashMap<PlayerId, SelectionRecord>,
}

impl SelectionBoard {
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn submitted_count(&self) -> usize {
        self.records.len()
    }

    pub fn has_submitted(&self, player_id: PlayerId) -> bool {
        self.records.contains_key(&player_id)
    }

    pub fn record(&self, player_id: PlayerId) -> Option<&SelectionRecord> {
        self.records.get(&player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &SelectionRecord)> {
        self.records.iter()
    }
}

/// Validate and record a player's selection. Re-submission overwrites.
pub fn record_selection(
    session: &mut GameSession,
    player_id: PlayerId,
    cards: Vec<String>,
) -> Result<(), DomainError> {
    require_phase(session, Phase::CardSelection)?;
    session.require_player(player_id)?;

    if session.judge_id == Some(player_id) {
        return Err(DomainError::validation(
            ValidationKind::JudgeCannotSubmit,
            "the judge does not submit cards",
        ));
    }

    let blanks = session
        .template
        .as_ref()
        .map(|t| t.blank_count())
        .unwrap_or(0);
    if cards.len() != blanks {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelectionShape,
            format!("expected {blanks} card(s), got {}", cards.len()),
        ));
    }

    session.selections.records.insert(
        player_id,
        SelectionRecord {
            cards,
            submitted_at: OffsetDateTime::now_utc(),
        },
    );
    Ok(())
}

/// True iff every connected non-judge player has submitted. Players who
/// disconnected mid-phase drop out of the expected count, so a departure
/// can itself complete the round.
pub fn is_complete(session: &GameSession) -> bool {
    let submitted = session
        .contributors()
        .filter(|p| session.selections.has_submitted(p.id))
        .count();
    submitted == session.expected_submissions()
}

/// (submitted, expected) for progress notifications.
pub fn progress(session: &GameSession) -> (usize, usize) {
    let submitted = session
        .contributors()
        .filter(|p| session.selections.has_submitted(p.id))
        .count();
    (submitted, session.expected_submissions())
}
