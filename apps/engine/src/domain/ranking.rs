//! The judge's two-slot ranking over one round's generated images.

use serde::{Deserialize, Serialize};

use crate::domain::state::PlayerId;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

/// Outcome of one generation request: a resolved image, or the placeholder
/// substituted after permanent failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOutcome {
    pub url: String,
    pub placeholder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageOutcome {
    pub fn resolved(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            placeholder: false,
            error: None,
        }
    }

    pub fn placeholder(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            placeholder: true,
            error: Some(reason.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSlot {
    First,
    Second,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub player_id: PlayerId,
    pub image: ImageOutcome,
    pub loaded: bool,
}

/// Ranking sub-state for one round. Created when the image batch settles,
/// consumed by `finalize`, discarded at round end.
#[derive(Debug)]
pub struct RankingBoard {
    candidates: Vec<Candidate>,
    first: Option<PlayerId>,
    second: Option<PlayerId>,
    finalized: bool,
}

impl RankingBoard {
    /// Placeholder results have nothing for a client to load, so they start
    /// out marked loaded.
    pub fn new(outcomes: Vec<(PlayerId, ImageOutcome)>) -> Self {
        let candidates = outcomes
            .into_iter()
            .map(|(player_id, image)| {
                let loaded = image.placeholder;
                Candidate {
                    player_id,
                    image,
                    loaded,
                }
            })
            .collect();
        Self {
            candidates,
            first: None,
            second: None,
            finalized: false,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn first(&self) -> Option<PlayerId> {
        self.first
    }

    pub fn second(&self) -> Option<PlayerId> {
        self.second
    }

    fn candidate_mut(&mut self, player_id: PlayerId) -> Result<&mut Candidate, DomainError> {
        self.candidates
            .iter_mut()
            .find(|c| c.player_id == player_id)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Candidate,
                    format!("player {player_id} has no image this round"),
                )
            })
    }

    fn has_candidate(&self, player_id: PlayerId) -> bool {
        self.candidates.iter().any(|c| c.player_id == player_id)
    }

    /// Idempotent: marking an already-loaded candidate changes nothing.
    pub fn mark_loaded(&mut self, player_id: PlayerId) -> Result<(), DomainError> {
        self.candidate_mut(player_id)?.loaded = true;
        Ok(())
    }

    pub fn all_loaded(&self) -> bool {
        self.candidates.iter().all(|c| c.loaded)
    }

    /// Assign a rank slot, overwriting any previous holder of that slot.
    /// A single entrant can never occupy both slots; the prior valid
    /// assignment is retained on rejection.
    pub fn select(&mut self, slot: RankSlot, player_id: PlayerId) -> Result<(), DomainError> {
        if !self.all_loaded() {
            return Err(DomainError::validation(
                ValidationKind::NotReady,
                "cannot rank before every image has loaded",
            ));
        }
        if !self.has_candidate(player_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Candidate,
                format!("player {player_id} has no image this round"),
            ));
        }
        let other = match slot {
            RankSlot::First => self.second,
            RankSlot::Second => self.first,
        };
        if other == Some(player_id) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateAssignment,
                "one entrant cannot hold both rank slots",
            ));
        }
        match slot {
            RankSlot::First => self.first = Some(player_id),
            RankSlot::Second => self.second = Some(player_id),
        }
        Ok(())
    }

    /// Commit the ranking. Both slots must be filled; the pair is consumed
    /// exactly once by the results computation.
    pub fn finalize(&mut self) -> Result<(PlayerId, PlayerId), DomainError> {
        if self.finalized {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "ranking already finalized",
            ));
        }
        match (self.first, self.second) {
            (Some(first), Some(second)) => {
                self.finalized = true;
                Ok((first, second))
            }
            _ => Err(DomainError::validation(
                ValidationKind::IncompleteRanking,
                "both rank slots must be filled",
            )),
        }
    }
}
