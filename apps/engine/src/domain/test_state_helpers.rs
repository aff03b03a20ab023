//! Test-only session builders for domain unit tests.

use uuid::Uuid;

use crate::domain::rules::SessionOptions;
use crate::domain::sentence::SentenceTemplate;
use crate::domain::state::{GameSession, Phase, Player, PlayerProfile};

pub fn profile(name: &str) -> PlayerProfile {
    PlayerProfile {
        id: Uuid::new_v4(),
        display_name: name.to_string(),
        avatar: format!("avatar-{name}"),
    }
}

/// A lobby session with `player_count` players; players[0] is the host.
pub fn make_session(player_count: usize) -> GameSession {
    let mut session = GameSession::new(
        Uuid::new_v4(),
        "TESTCD".to_string(),
        profile("host"),
        SessionOptions {
            max_rounds: 3,
            max_players: 20,
        },
    );
    for i in 1..player_count {
        session
            .players
            .push(Player::from_profile(profile(&format!("p{i}")), false));
    }
    session
}

/// A session mid-round in CardSelection: players[0] judges, two blanks.
pub fn make_selection_state(player_count: usize) -> GameSession {
    let mut session = make_session(player_count);
    let judge_id = session.players[0].id;
    session.phase = Phase::CardSelection;
    session.round_no = 1;
    session.judge_id = Some(judge_id);
    session.judged_this_cycle.insert(judge_id);
    session.template = Some(SentenceTemplate::new("A _____ chasing a _____."));
    session
}

pub fn two_cards() -> Vec<String> {
    vec!["haunted toaster".to_string(), "tax auditor".to_string()]
}
