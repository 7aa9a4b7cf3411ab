//! Pure lobby mutation logic: the rule bodies behind each client intent
//! and the summary finalization pass. Kept free of I/O and channels so
//! it can be exercised directly in tests; [`super::actor::LobbyActor`]
//! is the only caller in the running server.

use super::powerups::PowerupKind;
use super::state::{Lobby, Player, Status};
use crate::board::{generate_board, score_word, DictionaryProvider};
use crate::challenges::{self, catalog_info};
use crate::core::{COUNTDOWN_SECONDS, FREEZE_BONUS_SECONDS, MIN_WORD_LENGTH, POWERUP_WORD_LENGTH};
use crate::dto::{Finder, GameEnd, LongestWordFound, PlayerResult, WordAward};
use crate::records::GameOutcome;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashMap;
use std::time::Instant;

pub fn join(
    lobby: &mut Lobby,
    player_id: &str,
    username: String,
    character: String,
    remote_address: Option<String>,
) {
    if lobby.player(player_id).is_some() {
        return; // duplicate join is idempotent, spec.md §4.9
    }
    if lobby.players.is_empty() {
        lobby.host_id = player_id.to_string();
    }
    let sequence = lobby.next_sequence();
    let mut player = Player::new(player_id.to_string(), username, character, sequence);
    player.remote_address = remote_address;
    lobby.players.push(player);
}

/// Returns `true` if the lobby is now empty and should be destroyed.
pub fn leave(lobby: &mut Lobby, player_id: &str) -> bool {
    lobby.players.retain(|p| p.id != player_id);
    if lobby.players.is_empty() {
        return true;
    }
    if lobby.host_id == player_id {
        lobby.reassign_host();
    }
    false
}

pub fn toggle_ready(lobby: &mut Lobby, player_id: &str) {
    if lobby.status != Status::Lobby {
        return;
    }
    if let Some(player) = lobby.player_mut(player_id) {
        player.is_ready = !player.is_ready;
    }
}

pub fn set_board_size(lobby: &mut Lobby, player_id: &str, size: usize) -> bool {
    if lobby.status != Status::Lobby || lobby.host_id != player_id {
        return false;
    }
    if !matches!(size, 4 | 5 | 6) {
        return false;
    }
    lobby.board_size = size;
    true
}

/// True once every seated player is ready and the lobby is non-empty;
/// the caller starts the countdown when this flips.
pub fn ready_to_start(lobby: &Lobby) -> bool {
    lobby.status == Status::Lobby && !lobby.players.is_empty() && lobby.players.iter().all(|p| p.is_ready)
}

/// Board and main timer are valid starting here (spec.md §3), even
/// though ticking the main timer down only begins once PLAYING starts.
pub fn start_countdown(lobby: &mut Lobby) {
    lobby.status = Status::Countdown;
    lobby.countdown_remaining = Some(COUNTDOWN_SECONDS);
    lobby.challenges = catalog_info();
    lobby.board = Some(generate_board(lobby.board_size));
    lobby.main_timer_seconds = Lobby::main_timer_for_size(lobby.board_size);
    for player in &mut lobby.players {
        player.found_words.clear();
        player.powerups.clear();
        player.score = 0;
        player.bonus_time_seconds = 0;
        player.is_time_up = false;
    }
}

pub fn start_playing(lobby: &mut Lobby) {
    lobby.status = Status::Playing;
    lobby.countdown_remaining = None;
}

pub enum SubmitRejection {
    NotInProgress,
    PlayerNotFound,
    AlreadyFound,
    NotOnBoard,
    NotAWord,
}

impl SubmitRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            SubmitRejection::NotInProgress => "not in progress",
            SubmitRejection::PlayerNotFound => "player not found",
            SubmitRejection::AlreadyFound => "already found",
            SubmitRejection::NotOnBoard => "not on board",
            SubmitRejection::NotAWord => "not a word",
        }
    }
}

pub struct SubmitAccepted {
    pub points: i64,
    pub powerup_awarded: Option<PowerupKind>,
    pub total_score: i64,
}

pub fn submit_word(
    lobby: &mut Lobby,
    dictionary: &DictionaryProvider,
    player_id: &str,
    word: &str,
    path: &[(usize, usize)],
    rng: &mut impl Rng,
) -> Result<SubmitAccepted, SubmitRejection> {
    if !matches!(lobby.status, Status::Playing | Status::Waiting) {
        return Err(SubmitRejection::NotInProgress);
    }
    if lobby.player(player_id).is_none() {
        return Err(SubmitRejection::PlayerNotFound);
    }
    if lobby.status == Status::Waiting && lobby.player(player_id).is_some_and(|p| p.is_time_up) {
        return Err(SubmitRejection::NotInProgress);
    }

    let word_upper = word.to_uppercase();
    if lobby
        .player(player_id)
        .is_some_and(|p| p.found_words.contains(&word_upper))
    {
        return Err(SubmitRejection::AlreadyFound);
    }

    let spelled = lobby
        .effective_board(player_id)
        .and_then(|board| board.spell(path));
    if spelled.as_deref() != Some(word_upper.as_str()) || word_upper.len() < MIN_WORD_LENGTH {
        return Err(SubmitRejection::NotOnBoard);
    }
    if !dictionary.contains(&word_upper) {
        return Err(SubmitRejection::NotAWord);
    }

    let points = score_word(&word_upper, true);
    let powerup_awarded = if word_upper.chars().count() >= POWERUP_WORD_LENGTH {
        PowerupKind::EARNABLE.choose(rng).copied()
    } else {
        None
    };

    let player = lobby.player_mut(player_id).expect("checked above");
    player.found_words.push(word_upper);
    player.score += points;
    if let Some(kind) = powerup_awarded {
        player.powerups.push(kind);
    }

    Ok(SubmitAccepted {
        points,
        powerup_awarded,
        total_score: player.score,
    })
}

pub enum UsePowerupOutcome {
    Ignored,
    Freeze {
        bonus_time_seconds: u32,
    },
    Blockout {
        blocked_cells: Vec<(usize, usize)>,
    },
    Shuffle {
        new_board: crate::board::Board,
        protected_players: Vec<String>,
        protected_boards: HashMap<String, crate::board::Board>,
    },
    Lock,
}

pub fn use_powerup(
    lobby: &mut Lobby,
    player_id: &str,
    kind: PowerupKind,
    now: Instant,
    rng: &mut impl Rng,
) -> UsePowerupOutcome {
    let Some(player) = lobby.player_mut(player_id) else {
        return UsePowerupOutcome::Ignored;
    };
    let Some(slot) = player.powerups.iter().position(|&p| p == kind) else {
        return UsePowerupOutcome::Ignored; // not in inventory, spec.md §7
    };
    player.powerups.remove(slot);

    match kind {
        PowerupKind::Freeze => {
            let player = lobby.player_mut(player_id).expect("checked above");
            player.bonus_time_seconds += FREEZE_BONUS_SECONDS;
            let bonus_time_seconds = player.bonus_time_seconds;
            lobby.powerup_state.record_freeze(player_id, now);
            UsePowerupOutcome::Freeze { bonus_time_seconds }
        }
        PowerupKind::Blockout => {
            let blocked_cells = lobby.powerup_state.apply_blockout(lobby.board_size, now, rng);
            UsePowerupOutcome::Blockout { blocked_cells }
        }
        PowerupKind::Shuffle => {
            let new_board = generate_board(lobby.board_size);
            lobby.board = Some(new_board.clone());
            let (protected_players, protected_boards) = lobby.powerup_state.apply_shuffle();
            UsePowerupOutcome::Shuffle {
                new_board,
                protected_players,
                protected_boards,
            }
        }
        PowerupKind::Lock => {
            if let Some(snapshot) = lobby.effective_board(player_id).cloned() {
                lobby.powerup_state.arm_lock(player_id, snapshot);
            }
            UsePowerupOutcome::Lock
        }
    }
}

/// Returns `true` once every player wants a rematch.
pub fn want_play_again(lobby: &mut Lobby, player_id: &str) -> bool {
    if let Some(player) = lobby.player_mut(player_id) {
        player.wants_play_again = true;
    }
    lobby.status == Status::Summary && lobby.players.iter().all(|p| p.wants_play_again)
}

pub fn reset_to_lobby(lobby: &mut Lobby) {
    lobby.status = Status::Lobby;
    lobby.board = None;
    lobby.main_timer_seconds = 0;
    lobby.countdown_remaining = None;
    lobby.challenges = Vec::new();
    lobby.powerup_state = Default::default();
    for player in &mut lobby.players {
        player.is_ready = false;
        player.score = 0;
        player.found_words.clear();
        player.powerups.clear();
        player.bonus_time_seconds = 0;
        player.is_time_up = false;
        player.wants_play_again = false;
    }
}

/// Summary finalization, spec.md §4.8 steps 1-6 and 8 (step 7, the
/// high-score write, is the caller's job since it touches the records
/// store).
pub fn finalize_summary(lobby: &mut Lobby, dictionary: &DictionaryProvider) -> (GameEnd, Vec<GameOutcome>) {
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for player in &lobby.players {
        for word in &player.found_words {
            *occurrences.entry(word.clone()).or_insert(0) += 1;
        }
    }

    for player in &mut lobby.players {
        player.score = player
            .found_words
            .iter()
            .map(|w| score_word(w, occurrences.get(w).copied().unwrap_or(1) == 1))
            .sum();
    }

    let mut players_by_join: Vec<&Player> = lobby.players.iter().collect();
    players_by_join.sort_by_key(|p| p.join_sequence);

    let mut longest_word_found: Option<LongestWordFound> = None;
    for player in &players_by_join {
        for word in &player.found_words {
            let better = longest_word_found
                .as_ref()
                .is_none_or(|current| word.len() > current.length);
            if better {
                longest_word_found = Some(LongestWordFound {
                    word: word.clone(),
                    length: word.len(),
                    player_id: player.id.clone(),
                    username: player.username.clone(),
                    character: player.character.clone(),
                });
            }
        }
    }

    let all_possible_words = lobby
        .board
        .as_ref()
        .map(|board| crate::board::find_all_words(board, dictionary))
        .unwrap_or_default();
    let longest_possible_word = all_possible_words.first().cloned();
    let total_possible_words = all_possible_words.len();

    let mut results: Vec<PlayerResult> = Vec::with_capacity(lobby.players.len());
    let mut outcomes: Vec<GameOutcome> = Vec::with_capacity(lobby.players.len());
    let max_score = lobby.players.iter().map(|p| p.score).max().unwrap_or(0);
    for player in &lobby.players {
        let all_challenges = challenges::evaluate_all(&player.found_words, player.score);
        let best_challenge = all_challenges.first().cloned();
        let challenges_completed = all_challenges.iter().filter(|c| c.completed).count();
        let won = player.score == max_score && max_score > 0;
        if let Some(remote_address) = player.remote_address.clone() {
            outcomes.push(GameOutcome {
                remote_address,
                display_name: player.username.clone(),
                score: player.score,
                words_count: player.found_words.len(),
                won,
                challenges_completed,
            });
        }
        results.push(PlayerResult {
            player_id: player.id.clone(),
            username: player.username.clone(),
            character: player.character.clone(),
            score: player.score,
            words: player.found_words.clone(),
            all_challenges,
            best_challenge,
            challenges_completed,
        });
    }
    results.sort_by(|a, b| b.score.cmp(&a.score));
    let winner = results.first().cloned();

    let mut words: Vec<&String> = occurrences.keys().collect();
    words.sort_by_key(|w| w.len());
    let word_awards: Vec<WordAward> = words
        .into_iter()
        .map(|word| {
            let is_unique = occurrences[word] == 1;
            let finders: Vec<Finder> = lobby
                .players
                .iter()
                .filter(|p| p.found_words.contains(word))
                .map(|p| Finder {
                    player_id: p.id.clone(),
                    username: p.username.clone(),
                    character: p.character.clone(),
                })
                .collect();
            WordAward {
                word: word.clone(),
                finders,
                is_unique,
                points: score_word(word, is_unique),
            }
        })
        .collect();

    lobby.status = Status::Summary;
    lobby.powerup_state = Default::default();

    (
        GameEnd {
            results,
            winner,
            word_awards,
            longest_word_found,
            longest_possible_word,
            all_possible_words,
            total_possible_words,
        },
        outcomes,
    )
}
