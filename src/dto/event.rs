//! Server -> client messages, wire-shaped `{type, data}`.

use super::snapshot::LobbySnapshot;
use crate::challenges::ChallengeProgress;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct BonusTimer {
    pub player_id: String,
    pub bonus_time: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct WordAward {
    pub word: String,
    pub finders: Vec<Finder>,
    pub is_unique: bool,
    pub points: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Finder {
    pub player_id: String,
    pub username: String,
    pub character: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LongestWordFound {
    pub word: String,
    pub length: usize,
    pub player_id: String,
    pub username: String,
    pub character: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerResult {
    pub player_id: String,
    pub username: String,
    pub character: String,
    pub score: i64,
    pub words: Vec<String>,
    pub all_challenges: Vec<ChallengeProgress>,
    pub best_challenge: Option<ChallengeProgress>,
    pub challenges_completed: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameEnd {
    pub results: Vec<PlayerResult>,
    pub winner: Option<PlayerResult>,
    pub word_awards: Vec<WordAward>,
    pub longest_word_found: Option<LongestWordFound>,
    pub longest_possible_word: Option<String>,
    pub all_possible_words: Vec<String>,
    pub total_possible_words: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    LobbyUpdate(LobbySnapshot),
    GameState(LobbySnapshot),
    TimerUpdate { timer: u32 },
    BonusTimerUpdate(Vec<BonusTimer>),
    WaitingPhase {
        players_finished: Vec<String>,
        players_with_bonus: Vec<BonusTimer>,
    },
    PlayerTimeUp { player_id: String },
    WordResult {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        points: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        powerup: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        total_score: Option<i64>,
    },
    ScoreUpdate {
        player_id: String,
        score: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        powerup: Option<String>,
    },
    PowerupConsumed {
        player_id: String,
        powerups: Vec<String>,
    },
    PowerupEvent {
        #[serde(rename = "type")]
        kind: String,
        by: String,
        #[serde(flatten)]
        fields: HashMap<String, serde_json::Value>,
    },
    BoardUpdate {
        board: crate::board::Board,
        protected_players: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        protected_boards: Option<HashMap<String, crate::board::Board>>,
        shuffled_by: String,
    },
    PlayAgainUpdate {
        player_id: String,
        players_ready: Vec<String>,
        all_ready: bool,
    },
    GameEnd(GameEnd),
    PolicyViolation { reason: String },
}

impl Event {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("failed to encode event: {e}");
            r#"{"type":"internal_error","data":{}}"#.to_string()
        })
    }
}
