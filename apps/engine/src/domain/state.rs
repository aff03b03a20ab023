use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::domain::ranking::RankingBoard;
use crate::domain::rules::SessionOptions;
use crate::domain::selection::SelectionBoard;
use crate::domain::sentence::SentenceTemplate;
use crate::errors::domain::{DomainError, NotFoundKind};

pub type SessionId = Uuid;
pub type PlayerId = Uuid;

/// Round lifecycle phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Session created, players joining. The only phase that admits joins.
    Lobby,
    /// Round banner: judge and sentence revealed, short countdown.
    RoundIntro,
    /// Non-judge players pick cards against the submission window timer.
    CardSelection,
    /// Images generating, then the judge ranks them. No phase timer; bounded
    /// by pipeline completion plus the judge's decision.
    Judging,
    /// Points applied, standings shown, short auto-advance countdown.
    Results,
    /// All rounds played. Terminal.
    Completed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Phase::Lobby => "lobby",
            Phase::RoundIntro => "round_intro",
            Phase::CardSelection => "card_selection",
            Phase::Judging => "judging",
            Phase::Results => "results",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Identity handed to the engine by the excluded login layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub display_name: String,
    pub avatar: String,
}

/// Participant within one session. Never shared across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub avatar: String,
    pub score: u32,
    pub connected: bool,
    pub is_host: bool,
}

impl Player {
    pub fn from_profile(profile: PlayerProfile, is_host: bool) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            avatar: profile.avatar,
            score: 0,
            connected: true,
            is_host,
        }
    }
}

/// One running game instance. All mutation is serialized behind the
/// registry's per-session lock; nothing in here suspends.
#[derive(Debug)]
pub struct GameSession {
    pub id: SessionId,
    /// 6-character join code, unique among live sessions.
    pub code: String,
    pub host_id: PlayerId,
    pub players: Vec<Player>,
    pub phase: Phase,
    /// 0 while in the lobby, then 1..=max_rounds.
    pub round_no: u8,
    pub max_rounds: u8,
    pub max_players: u8,
    /// Judge for the current round. None only in the lobby.
    pub judge_id: Option<PlayerId>,
    /// Players who have judged in the current rotation cycle.
    pub judged_this_cycle: HashSet<PlayerId>,
    pub template: Option<SentenceTemplate>,
    pub selections: SelectionBoard,
    /// Present from image-batch completion until round end.
    pub ranking: Option<RankingBoard>,
    pub last_activity: Instant,
}

impl GameSession {
    pub fn new(id: SessionId, code: String, host: PlayerProfile, options: SessionOptions) -> Self {
        let host_id = host.id;
        Self {
            id,
            code,
            host_id,
            players: vec![Player::from_profile(host, true)],
            phase: Phase::Lobby,
            round_no: 0,
            max_rounds: options.max_rounds,
            max_players: options.max_players,
            judge_id: None,
            judged_this_cycle: HashSet::new(),
            template: None,
            selections: SelectionBoard::default(),
            ranking: None,
            last_activity: Instant::now(),
        }
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn require_player(&self, player_id: PlayerId) -> Result<&Player, DomainError> {
        self.player(player_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("player {player_id} is not in session {}", self.code),
            )
        })
    }

    /// Connected non-judge players: the pool expected to submit this round.
    pub fn contributors(&self) -> impl Iterator<Item = &Player> {
        self.players
            .iter()
            .filter(move |p| p.connected && Some(p.id) != self.judge_id)
    }

    pub fn expected_submissions(&self) -> usize {
        self.contributors().count()
    }

    /// Record client-driven activity for the idle sweep.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn is_idle(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() >= timeout
    }

    /// Cumulative standings, highest score first.
    pub fn standings(&self) -> Vec<(PlayerId, String, u32)> {
        let mut entries: Vec<(PlayerId, String, u32)> = self
            .players
            .iter()
            .map(|p| (p.id, p.display_name.clone(), p.score))
            .collect();
        entries.sort_by(|a, b| b.2.cmp(&a.2));
        entries
    }
}
