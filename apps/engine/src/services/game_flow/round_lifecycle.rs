use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::GameEngine;
use crate::domain::judge::rotate_judge;
use crate::domain::phase::transition;
use crate::domain::ranking::{ImageOutcome, RankingBoard};
use crate::domain::scoring::{apply_round_awards, RoundAwards};
use crate::domain::selection::progress;
use crate::domain::snapshot::standings;
use crate::domain::state::{GameSession, Phase, PlayerId};
use crate::errors::domain::DomainError;
use crate::events::{CandidateImage, EventEnvelope};
use crate::images::ImageRequest;

impl GameEngine {
    /// Advance into the next round's intro, or into `Completed` once the
    /// round counter has reached its bound. Callable from the lobby (game
    /// start) and from results (auto-advance).
    pub(super) fn begin_next_round(
        self: &Arc<Self>,
        session: &mut GameSession,
    ) -> Result<(), DomainError> {
        if session.round_no >= session.max_rounds {
            transition(session, Phase::Completed)?;
            info!(
                session_id = %session.id,
                rounds_played = session.round_no,
                "game completed"
            );
            debug!(session_id = %session.id, "Transition: Results -> Completed");
            self.timers.cancel(session.id);
            self.events.emit(EventEnvelope::PhaseChanged {
                session_id: session.id,
                phase: Phase::Completed,
                round_no: session.round_no,
            });
            self.events.emit(EventEnvelope::GameCompleted {
                session_id: session.id,
                standings: standings(session),
            });
            return Ok(());
        }

        transition(session, Phase::RoundIntro)?;
        session.round_no += 1;
        let judge = rotate_judge(session, &mut rand::rng())?;
        session.template = Some(self.deck.draw());
        session.selections.clear();
        session.ranking = None;

        debug!(
            session_id = %session.id,
            round_no = session.round_no,
            judge = %judge,
            "Transition: -> RoundIntro"
        );
        self.events.emit(EventEnvelope::PhaseChanged {
            session_id: session.id,
            phase: Phase::RoundIntro,
            round_no: session.round_no,
        });
        self.arm_phase_timer(session, Phase::RoundIntro, self.config.round_intro);
        Ok(())
    }

    /// RoundIntro countdown elapsed: open the submission window.
    pub(super) fn open_card_selection(
        self: &Arc<Self>,
        session: &mut GameSession,
    ) -> Result<(), DomainError> {
        transition(session, Phase::CardSelection)?;
        debug!(session_id = %session.id, "Transition: RoundIntro -> CardSelection");

        let (submitted, expected) = progress(session);
        self.events.emit(EventEnvelope::PhaseChanged {
            session_id: session.id,
            phase: Phase::CardSelection,
            round_no: session.round_no,
        });
        self.events.emit(EventEnvelope::SubmissionProgress {
            session_id: session.id,
            submitted,
            expected,
        });
        self.arm_phase_timer(session, Phase::CardSelection, self.config.selection_window);
        Ok(())
    }

    /// Hand the round's submissions to the pipeline and enter judging.
    /// Non-submitters abstain: they contribute no request and are excluded
    /// from this round's scoring. Reached from either completion trigger;
    /// the timer is cancelled so a late expiry cannot fire into judging.
    pub(super) fn enter_judging(
        self: &Arc<Self>,
        session: &mut GameSession,
    ) -> Result<(), DomainError> {
        transition(session, Phase::Judging)?;
        self.timers.cancel(session.id);
        debug!(session_id = %session.id, "Transition: CardSelection -> Judging");

        let template = session.template.clone();
        let requests: Vec<ImageRequest> = session
            .selections
            .iter()
            .map(|(&player_id, record)| {
                let prompt = template
                    .as_ref()
                    .map(|t| t.fill(&record.cards))
                    .unwrap_or_default();
                ImageRequest {
                    session_id: session.id,
                    round_no: session.round_no,
                    player_id,
                    prompt,
                    style: self.images.art_style.clone(),
                }
            })
            .collect();

        self.events.emit(EventEnvelope::PhaseChanged {
            session_id: session.id,
            phase: Phase::Judging,
            round_no: session.round_no,
        });
        self.events.emit(EventEnvelope::ImageGenerationStarted {
            session_id: session.id,
            round_no: session.round_no,
            expected: requests.len(),
        });

        let engine = Arc::clone(self);
        let code = session.code.clone();
        let round_no = session.round_no;
        tokio::spawn(async move {
            let outcomes = engine.pipeline.generate_batch(requests).await;
            engine.complete_generation(&code, round_no, outcomes);
        });
        Ok(())
    }

    /// Image batch settled: seed the ranking board and let the judge at it.
    /// The session may have advanced or vanished while the batch ran, in
    /// which case the results are dropped.
    pub(super) fn complete_generation(
        self: &Arc<Self>,
        code: &str,
        round_no: u8,
        outcomes: Vec<(PlayerId, ImageOutcome)>,
    ) {
        let Ok(handle) = self.registry.get(code) else {
            warn!(code, round_no, "session gone before image batch completed");
            return;
        };
        let mut session = handle.lock();
        if session.phase != Phase::Judging
            || session.round_no != round_no
            || session.ranking.is_some()
        {
            debug!(
                session_id = %session.id,
                round_no,
                "stale image batch ignored"
            );
            return;
        }

        let board = RankingBoard::new(outcomes);
        let images: Vec<CandidateImage> = board
            .candidates()
            .iter()
            .map(|c| CandidateImage {
                player_id: c.player_id,
                url: c.image.url.clone(),
                placeholder: c.image.placeholder,
            })
            .collect();
        let candidate_count = board.candidate_count();
        let sole_entrant = board.candidates().first().map(|c| c.player_id);
        session.ranking = Some(board);

        info!(
            session_id = %session.id,
            round_no,
            candidates = candidate_count,
            "image batch ready"
        );
        self.events.emit(EventEnvelope::ImageBatchReady {
            session_id: session.id,
            round_no,
            images,
        });

        // A two-slot ranking needs at least two entrants; with fewer, the
        // round short-circuits to results so the session cannot stall.
        if candidate_count < 2 {
            let awards = RoundAwards {
                first: sole_entrant,
                second: None,
                audience: None,
            };
            if let Err(err) = self.enter_results(&mut session, awards) {
                error!(session_id = %session.id, error = %err, "failed to short-circuit results");
            }
        }
    }

    /// Apply points, broadcast the outcome, and arm the short auto-advance
    /// countdown into the next round (or completion).
    pub(super) fn enter_results(
        self: &Arc<Self>,
        session: &mut GameSession,
        awards: RoundAwards,
    ) -> Result<(), DomainError> {
        transition(session, Phase::Results)?;
        let points = apply_round_awards(session, &awards);
        debug!(session_id = %session.id, "Transition: Judging -> Results");

        self.events.emit(EventEnvelope::PhaseChanged {
            session_id: session.id,
            phase: Phase::Results,
            round_no: session.round_no,
        });
        self.events.emit(EventEnvelope::RoundResults {
            session_id: session.id,
            round_no: session.round_no,
            first: awards.first,
            second: awards.second,
            points,
            standings: standings(session),
        });
        self.arm_phase_timer(session, Phase::Results, self.config.results_delay);
        Ok(())
    }

    /// Arm the session's phase timer; expiry dispatches by code and
    /// re-validates phase and round at fire time.
    fn arm_phase_timer(self: &Arc<Self>, session: &GameSession, armed_for: Phase, duration: Duration) {
        let engine = Arc::clone(self);
        let code = session.code.clone();
        let round_no = session.round_no;
        self.timers.start(session.id, duration, move || async move {
            engine.on_phase_timer_expired(&code, armed_for, round_no);
        });
    }

    fn on_phase_timer_expired(self: &Arc<Self>, code: &str, armed_for: Phase, round_no: u8) {
        let Ok(handle) = self.registry.get(code) else {
            return;
        };
        let mut session = handle.lock();
        if session.phase != armed_for || session.round_no != round_no {
            debug!(
                session_id = %session.id,
                armed_for = %armed_for,
                "stale timer expiry ignored"
            );
            return;
        }

        let result = match armed_for {
            Phase::RoundIntro => self.open_card_selection(&mut session),
            Phase::CardSelection => {
                let (submitted, expected) = progress(&session);
                if submitted < expected {
                    info!(
                        session_id = %session.id,
                        submitted,
                        expected,
                        "submission window closed, non-submitters abstain"
                    );
                }
                self.enter_judging(&mut session)
            }
            Phase::Results => self.begin_next_round(&mut session),
            _ => Ok(()),
        };
        if let Err(err) = result {
            error!(session_id = %session.id, error = %err, "timer-driven transition failed");
        }
    }
}
