use std::sync::Arc;

use tracing::info;

use super::GameEngine;
use crate::domain::phase::require_phase;
use crate::domain::ranking::RankSlot;
use crate::domain::selection::{is_complete, progress, record_selection};
use crate::domain::snapshot::{snapshot, SessionSnapshot};
use crate::domain::state::{GameSession, Phase, PlayerId, PlayerProfile};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::events::EventEnvelope;
use crate::services::registry::{join, leave, JoinOutcome};

impl GameEngine {
    pub fn join_session(
        self: &Arc<Self>,
        code: &str,
        profile: PlayerProfile,
    ) -> Result<SessionSnapshot, DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();
        let outcome = join(&mut session, profile)?;
        session.touch();

        match outcome {
            JoinOutcome::Joined => info!(
                session_id = %session.id,
                players = session.players.len(),
                "player joined"
            ),
            JoinOutcome::Rejoined => info!(session_id = %session.id, "player reconnected"),
        }
        self.events.emit(EventEnvelope::PlayerCountChanged {
            session_id: session.id,
            players: session.players.len(),
        });
        Ok(snapshot(&session))
    }

    /// A departing host is announced but the session lives on. Mid-game, a
    /// departure shrinks the expected submission count, so it can itself
    /// complete the selection phase.
    pub fn leave_session(self: &Arc<Self>, code: &str, player_id: PlayerId) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();
        let outcome = leave(&mut session, player_id)?;
        session.touch();

        info!(
            session_id = %session.id,
            player_id = %player_id,
            removed = outcome.removed,
            "player left"
        );
        self.events.emit(EventEnvelope::PlayerCountChanged {
            session_id: session.id,
            players: session.players.iter().filter(|p| p.connected).count(),
        });
        if outcome.was_host {
            self.events.emit(EventEnvelope::HostDisconnected {
                session_id: session.id,
                host_id: player_id,
            });
        }

        if session.phase == Phase::CardSelection && is_complete(&session) {
            self.enter_judging(&mut session)?;
        }
        Ok(())
    }

    /// Record a non-judge player's cards for the active round. Completion
    /// races the submission timer; whichever reaches the session first wins
    /// and the loser is a no-op.
    pub fn submit_selection(
        self: &Arc<Self>,
        code: &str,
        player_id: PlayerId,
        cards: Vec<String>,
    ) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();
        record_selection(&mut session, player_id, cards)?;
        session.touch();

        let (submitted, expected) = progress(&session);
        self.events.emit(EventEnvelope::SubmissionProgress {
            session_id: session.id,
            submitted,
            expected,
        });
        if is_complete(&session) {
            self.enter_judging(&mut session)?;
        }
        Ok(())
    }

    /// Client-side report that a candidate's image finished loading on the
    /// judge's screen. Idempotent.
    pub fn mark_image_loaded(
        self: &Arc<Self>,
        code: &str,
        candidate_id: PlayerId,
    ) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();
        require_phase(&session, Phase::Judging)?;
        let board = session.ranking.as_mut().ok_or_else(|| {
            DomainError::validation(ValidationKind::NotReady, "images are still generating")
        })?;
        board.mark_loaded(candidate_id)?;
        session.touch();
        Ok(())
    }

    pub fn submit_judge_ranking(
        self: &Arc<Self>,
        code: &str,
        requester: PlayerId,
        slot: RankSlot,
        target: PlayerId,
    ) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();
        require_phase(&session, Phase::Judging)?;
        require_judge(&session, requester)?;
        let board = session.ranking.as_mut().ok_or_else(|| {
            DomainError::validation(ValidationKind::NotReady, "images are still generating")
        })?;
        board.select(slot, target)?;
        session.touch();
        Ok(())
    }

    /// Commit both rank slots and move the round into results.
    pub fn finalize_judge_ranking(
        self: &Arc<Self>,
        code: &str,
        requester: PlayerId,
    ) -> Result<(), DomainError> {
        let handle = self.registry.get(code)?;
        let mut session = handle.lock();
        require_phase(&session, Phase::Judging)?;
        require_judge(&session, requester)?;
        let board = session.ranking.as_mut().ok_or_else(|| {
            DomainError::validation(ValidationKind::NotReady, "images are still generating")
        })?;
        let (first, second) = board.finalize()?;
        session.touch();

        info!(
            session_id = %session.id,
            round_no = session.round_no,
            first = %first,
            second = %second,
            "judge finalized ranking"
        );
        let awards = crate::domain::scoring::RoundAwards::from_ranking(first, second);
        self.enter_results(&mut session, awards)
    }
}

fn require_judge(session: &GameSession, requester: PlayerId) -> Result<(), DomainError> {
    if session.judge_id != Some(requester) {
        return Err(DomainError::validation(
            ValidationKind::NotJudge,
            "only the round's judge may rank images",
        ));
    }
    Ok(())
}
