use crate::domain::rules::{AUDIENCE_FAVORITE_POINTS, FIRST_PLACE_POINTS, SECOND_PLACE_POINTS};
use crate::domain::state::{GameSession, PlayerId};

/// Awards for one round. `audience` is the extension channel: the judge's
/// ranking never fills it, but an external vote collaborator may.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundAwards {
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub audience: Option<PlayerId>,
}

impl RoundAwards {
    pub fn from_ranking(first: PlayerId, second: PlayerId) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
            audience: None,
        }
    }

    pub const fn none() -> Self {
        Self {
            first: None,
            second: None,
            audience: None,
        }
    }
}

/// Apply round points to cumulative scores. Returns the per-player deltas
/// actually applied, for the results notification.
pub fn apply_round_awards(
    session: &mut GameSession,
    awards: &RoundAwards,
) -> Vec<(PlayerId, u32)> {
    let mut deltas = Vec::new();
    let mut award = |session: &mut GameSession, player_id: Option<PlayerId>, points: u32| {
        if let Some(id) = player_id {
            if let Some(player) = session.player_mut(id) {
                player.score += points;
                deltas.push((id, points));
            }
        }
    };
    award(session, awards.first, FIRST_PLACE_POINTS);
    award(session, awards.second, SECOND_PLACE_POINTS);
    award(session, awards.audience, AUDIENCE_FAVORITE_POINTS);
    deltas
}
