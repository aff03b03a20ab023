//! Judge rotation.
//!
//! Each round's judge is drawn uniformly at random from connected players
//! who have not yet judged in the current rotation cycle; once everyone has
//! judged, the cycle resets.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::state::{GameSession, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

pub fn rotate_judge(
    session: &mut GameSession,
    rng: &mut impl Rng,
) -> Result<PlayerId, DomainError> {
    let eligible = eligible_judges(session);
    let eligible = if eligible.is_empty() {
        // Everyone has judged this cycle; start the next one.
        session.judged_this_cycle.clear();
        eligible_judges(session)
    } else {
        eligible
    };

    let Some(&judge_id) = eligible.choose(rng) else {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            "no connected player available to judge",
        ));
    };

    session.judged_this_cycle.insert(judge_id);
    session.judge_id = Some(judge_id);
    Ok(judge_id)
}

fn eligible_judges(session: &GameSession) -> Vec<PlayerId> {
    session
        .players
        .iter()
        .filter(|p| p.connected && !session.judged_this_cycle.contains(&p.id))
        .map(|p| p.id)
        .collect()
}
