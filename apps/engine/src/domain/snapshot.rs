//! Public snapshot API for observing session state without exposing
//! internals. Never panics; produces safe defaults for odd states.

use serde::{Deserialize, Serialize};

use crate::domain::state::{GameSession, Phase, Player, PlayerId, SessionId};

/// Public info about one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub display_name: String,
    pub avatar: String,
    pub score: u32,
    pub connected: bool,
    pub is_host: bool,
}

impl From<&Player> for PlayerPublic {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name.clone(),
            avatar: p.avatar.clone(),
            score: p.score,
            connected: p.connected,
            is_host: p.is_host,
        }
    }
}

/// Session-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeader {
    pub session_id: SessionId,
    pub code: String,
    pub host_id: PlayerId,
    pub round_no: u8,
    pub max_rounds: u8,
    pub max_players: u8,
    pub judge_id: Option<PlayerId>,
    pub players: Vec<PlayerPublic>,
}

/// Top-level snapshot combining header and phase-specific data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: SessionHeader,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum PhaseSnapshot {
    Lobby,
    RoundIntro(RoundIntroSnapshot),
    CardSelection(CardSelectionSnapshot),
    Judging(JudgingSnapshot),
    Results(ResultsSnapshot),
    Completed(CompletedSnapshot),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundIntroSnapshot {
    pub template_text: String,
    pub blanks: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSelectionSnapshot {
    pub template_text: String,
    pub blanks: usize,
    pub submitted: usize,
    pub expected: usize,
}

/// One entrant's image as seen by the judge and spectators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePublic {
    pub player_id: PlayerId,
    pub url: String,
    pub placeholder: bool,
    pub loaded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgingSnapshot {
    pub template_text: String,
    /// True until the image batch has settled and candidates are available.
    pub generating: bool,
    pub candidates: Vec<CandidatePublic>,
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub player_id: PlayerId,
    pub display_name: String,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSnapshot {
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub standings: Vec<StandingEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSnapshot {
    pub standings: Vec<StandingEntry>,
}

/// Entry point: produce a snapshot of the current session state.
pub fn snapshot(session: &GameSession) -> SessionSnapshot {
    let header = SessionHeader {
        session_id: session.id,
        code: session.code.clone(),
        host_id: session.host_id,
        round_no: session.round_no,
        max_rounds: session.max_rounds,
        max_players: session.max_players,
        judge_id: session.judge_id,
        players: session.players.iter().map(PlayerPublic::from).collect(),
    };

    let phase = match session.phase {
        Phase::Lobby => PhaseSnapshot::Lobby,
        Phase::RoundIntro => PhaseSnapshot::RoundIntro(RoundIntroSnapshot {
            template_text: template_text(session),
            blanks: blank_count(session),
        }),
        Phase::CardSelection => {
            let (submitted, expected) = crate::domain::selection::progress(session);
            PhaseSnapshot::CardSelection(CardSelectionSnapshot {
                template_text: template_text(session),
                blanks: blank_count(session),
                submitted,
                expected,
            })
        }
        Phase::Judging => PhaseSnapshot::Judging(snapshot_judging(session)),
        Phase::Results => PhaseSnapshot::Results(ResultsSnapshot {
            first: session.ranking.as_ref().and_then(|r| r.first()),
            second: session.ranking.as_ref().and_then(|r| r.second()),
            standings: standings(session),
        }),
        Phase::Completed => PhaseSnapshot::Completed(CompletedSnapshot {
            standings: standings(session),
        }),
    };

    SessionSnapshot {
        session: header,
        phase,
    }
}

fn template_text(session: &GameSession) -> String {
    session
        .template
        .as_ref()
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

fn blank_count(session: &GameSession) -> usize {
    session
        .template
        .as_ref()
        .map(|t| t.blank_count())
        .unwrap_or(0)
}

fn snapshot_judging(session: &GameSession) -> JudgingSnapshot {
    match session.ranking.as_ref() {
        Some(board) => JudgingSnapshot {
            template_text: template_text(session),
            generating: false,
            candidates: board
                .candidates()
                .iter()
                .map(|c| CandidatePublic {
                    player_id: c.player_id,
                    url: c.image.url.clone(),
                    placeholder: c.image.placeholder,
                    loaded: c.loaded,
                })
                .collect(),
            first: board.first(),
            second: board.second(),
        },
        None => JudgingSnapshot {
            template_text: template_text(session),
            generating: true,
            candidates: Vec::new(),
            first: None,
            second: None,
        },
    }
}

/// Cumulative standings as public entries, highest score first.
pub fn standings(session: &GameSession) -> Vec<StandingEntry> {
    session
        .standings()
        .into_iter()
        .map(|(player_id, display_name, score)| StandingEntry {
            player_id,
            display_name,
            score,
        })
        .collect()
}
