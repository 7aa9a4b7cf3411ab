//! Outbound full-lobby snapshot, used by `lobby_update` and `game_state`.

use crate::board::Board;
use crate::challenges::ChallengeInfo;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub username: String,
    pub character: String,
    pub is_ready: bool,
    pub score: i64,
    pub powerups: Vec<String>,
    pub found_words: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LobbySnapshot {
    pub lobby_id: String,
    pub status: String,
    pub board: Option<Board>,
    pub board_size: usize,
    pub timer: u32,
    pub players: Vec<PlayerView>,
    pub host_id: String,
    pub challenges: Vec<ChallengeInfo>,
}
