//! Lobby data model (spec.md §3).

use super::powerups::{PowerupKind, PowerupState};
use crate::board::Board;
use crate::challenges::ChallengeInfo;
use crate::core::{LOBBY_CAPACITY, MAIN_TIMER_LARGE_BOARD, MAIN_TIMER_SMALL_BOARD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Lobby,
    Countdown,
    Playing,
    Waiting,
    Summary,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Lobby => "lobby",
            Status::Countdown => "countdown",
            Status::Playing => "playing",
            Status::Waiting => "waiting",
            Status::Summary => "summary",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: String,
    pub username: String,
    pub character: String,
    pub is_ready: bool,
    pub score: i64,
    pub found_words: Vec<String>,
    pub powerups: Vec<PowerupKind>,
    pub bonus_time_seconds: u32,
    pub is_time_up: bool,
    pub wants_play_again: bool,
    pub remote_address: Option<String>,
    /// Join order, used to reassign host and break ties; not on the wire.
    pub join_sequence: u64,
}

impl Player {
    pub fn new(id: String, username: String, character: String, join_sequence: u64) -> Self {
        Self {
            id,
            username,
            character,
            is_ready: false,
            score: 0,
            found_words: Vec::new(),
            powerups: Vec::new(),
            bonus_time_seconds: 0,
            is_time_up: false,
            wants_play_again: false,
            remote_address: None,
            join_sequence,
        }
    }
}

pub struct Lobby {
    pub id: String,
    pub status: Status,
    pub host_id: String,
    pub players: Vec<Player>,
    pub board_size: usize,
    pub board: Option<Board>,
    pub main_timer_seconds: u32,
    pub countdown_remaining: Option<u32>,
    pub challenges: Vec<ChallengeInfo>,
    pub powerup_state: PowerupState,
    next_join_sequence: u64,
}

impl Lobby {
    /// Starts with no players; the first [`super::engine::join`] call
    /// becomes host.
    pub fn new(id: String) -> Self {
        Self {
            id,
            status: Status::Lobby,
            host_id: String::new(),
            players: Vec::new(),
            board_size: 6,
            board: None,
            main_timer_seconds: 0,
            countdown_remaining: None,
            challenges: Vec::new(),
            powerup_state: PowerupState::default(),
            next_join_sequence: 0,
        }
    }

    pub fn next_sequence(&mut self) -> u64 {
        let seq = self.next_join_sequence;
        self.next_join_sequence += 1;
        seq
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= LOBBY_CAPACITY
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn main_timer_for_size(size: usize) -> u32 {
        if size == 4 {
            MAIN_TIMER_SMALL_BOARD
        } else {
            MAIN_TIMER_LARGE_BOARD
        }
    }

    /// The board a given player should validate submissions against and
    /// see rendered: their override if one is installed, else the lobby
    /// board.
    pub fn effective_board(&self, player_id: &str) -> Option<&Board> {
        self.powerup_state
            .player_board_overrides
            .get(player_id)
            .or(self.board.as_ref())
    }

    /// Reassigns host to the oldest remaining player by join order.
    pub fn reassign_host(&mut self) {
        if let Some(oldest) = self.players.iter().min_by_key(|p| p.join_sequence) {
            self.host_id = oldest.id.clone();
        }
    }
}
