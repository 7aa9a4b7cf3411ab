//! Per-lobby worker task: the timer driver and intent dispatcher,
//! spec.md §4.7 and §9 ("the former is recommended because it naturally
//! serializes intents with ticks"). One task per lobby, fed by a
//! command channel; outbound events are fanned out by iterating the
//! lobby's own participant map, since this task is the sole writer of
//! lobby state (§5 shared-resource policy).

use super::engine;
use super::powerups::PowerupKind;
use super::state::{Lobby, Status};
use crate::board::DictionaryProvider;
use crate::dto::{BonusTimer, ConnectMode, Event, Intent, LobbySnapshot, PlayerView};
use crate::records::{now_stamp, RecordsStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

pub enum LobbyCommand {
    Connect {
        player_id: String,
        username: String,
        character: String,
        remote_address: Option<String>,
        mode: ConnectMode,
        outbox: UnboundedSender<String>,
        reply: oneshot::Sender<Result<(), &'static str>>,
    },
    Disconnect {
        player_id: String,
    },
    Intent {
        player_id: String,
        intent: Intent,
    },
}

#[derive(Clone)]
pub struct LobbyHandle {
    pub id: String,
    tx: UnboundedSender<LobbyCommand>,
}

impl LobbyHandle {
    pub fn send(&self, command: LobbyCommand) {
        let _ = self.tx.send(command);
    }
}

struct LobbyActor {
    lobby: Lobby,
    dictionary: Arc<DictionaryProvider>,
    records: Arc<RecordsStore>,
    participants: HashMap<String, UnboundedSender<String>>,
}

/// Spawns the worker task for a brand-new lobby. Returns the handle the
/// connection broker stores, plus a receiver that resolves once the
/// lobby's task has exited (last participant gone) so the broker can
/// evict its entry.
pub fn spawn(
    id: String,
    dictionary: Arc<DictionaryProvider>,
    records: Arc<RecordsStore>,
) -> (LobbyHandle, oneshot::Receiver<()>) {
    let (tx, rx) = unbounded_channel();
    let (done_tx, done_rx) = oneshot::channel();
    let actor = LobbyActor {
        lobby: Lobby::new(id.clone()),
        dictionary,
        records,
        participants: HashMap::new(),
    };
    tokio::spawn(async move {
        actor.run(rx).await;
        let _ = done_tx.send(());
    });
    (LobbyHandle { id, tx }, done_rx)
}

impl LobbyActor {
    async fn run(mut self, mut rx: UnboundedReceiver<LobbyCommand>) {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                command = rx.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                _ = ticker.tick() => self.handle_tick().await,
            }
            if self.participants.is_empty() {
                log::info!("lobby {} emptied, stopping", self.lobby.id);
                break;
            }
        }
    }

    async fn handle_command(&mut self, command: LobbyCommand) {
        match command {
            LobbyCommand::Connect {
                player_id,
                username,
                character,
                remote_address,
                mode: _,
                outbox,
                reply,
            } => {
                if self.lobby.is_full() && self.lobby.player(&player_id).is_none() {
                    let _ = reply.send(Err("lobby is full"));
                    return;
                }
                engine::join(&mut self.lobby, &player_id, username, character, remote_address);
                self.participants.insert(player_id.clone(), outbox);
                let _ = reply.send(Ok(()));
                self.reply(&player_id, &Event::LobbyUpdate(self.snapshot()));
                self.broadcast(&Event::LobbyUpdate(self.snapshot()));
            }
            LobbyCommand::Disconnect { player_id } => {
                self.participants.remove(&player_id);
                if engine::leave(&mut self.lobby, &player_id) {
                    return;
                }
                self.broadcast(&Event::LobbyUpdate(self.snapshot()));
            }
            LobbyCommand::Intent { player_id, intent } => self.handle_intent(player_id, intent).await,
        }
    }

    async fn handle_intent(&mut self, player_id: String, intent: Intent) {
        match intent {
            Intent::ToggleReady => {
                engine::toggle_ready(&mut self.lobby, &player_id);
                self.broadcast(&Event::LobbyUpdate(self.snapshot()));
                if engine::ready_to_start(&self.lobby) {
                    engine::start_countdown(&mut self.lobby);
                    self.broadcast(&Event::GameState(self.snapshot()));
                }
            }
            Intent::SetBoardSize { size } => {
                if engine::set_board_size(&mut self.lobby, &player_id, size) {
                    self.broadcast(&Event::LobbyUpdate(self.snapshot()));
                }
            }
            Intent::SubmitWord { word, path } => self.handle_submit_word(player_id, word, path),
            Intent::UsePowerup { powerup } => self.handle_use_powerup(player_id, powerup),
            Intent::WantPlayAgain => {
                let all_ready = engine::want_play_again(&mut self.lobby, &player_id);
                let players_ready: Vec<String> = self
                    .lobby
                    .players
                    .iter()
                    .filter(|p| p.wants_play_again)
                    .map(|p| p.id.clone())
                    .collect();
                self.broadcast(&Event::PlayAgainUpdate {
                    player_id,
                    players_ready,
                    all_ready,
                });
                if all_ready {
                    engine::reset_to_lobby(&mut self.lobby);
                    self.broadcast(&Event::LobbyUpdate(self.snapshot()));
                }
            }
            Intent::ResetGame => {
                if self.lobby.status == Status::Summary && self.lobby.host_id == player_id {
                    engine::reset_to_lobby(&mut self.lobby);
                    self.broadcast(&Event::LobbyUpdate(self.snapshot()));
                }
            }
        }
    }

    fn handle_submit_word(&mut self, player_id: String, word: String, path: Vec<(usize, usize)>) {
        let mut rng = rand::rng();
        match engine::submit_word(&mut self.lobby, &self.dictionary, &player_id, &word, &path, &mut rng) {
            Ok(accepted) => {
                self.reply(
                    &player_id,
                    &Event::WordResult {
                        valid: true,
                        reason: None,
                        points: Some(accepted.points),
                        powerup: accepted.powerup_awarded.map(|k| k.as_str().to_string()),
                        total_score: Some(accepted.total_score),
                    },
                );
                self.broadcast(&Event::ScoreUpdate {
                    player_id,
                    score: accepted.total_score,
                    powerup: accepted.powerup_awarded.map(|k| k.as_str().to_string()),
                });
            }
            Err(rejection) => self.reply(
                &player_id,
                &Event::WordResult {
                    valid: false,
                    reason: Some(rejection.reason().to_string()),
                    points: None,
                    powerup: None,
                    total_score: None,
                },
            ),
        }
    }

    fn handle_use_powerup(&mut self, player_id: String, powerup: String) {
        let Some(kind) = PowerupKind::parse(&powerup) else {
            return;
        };
        let now = std::time::Instant::now();
        let mut rng = rand::rng();
        let outcome = engine::use_powerup(&mut self.lobby, &player_id, kind, now, &mut rng);
        if matches!(outcome, engine::UsePowerupOutcome::Ignored) {
            return;
        }

        let mut fields = std::collections::HashMap::new();
        match &outcome {
            engine::UsePowerupOutcome::Freeze { bonus_time_seconds } => {
                fields.insert("bonus_time".to_string(), serde_json::json!(bonus_time_seconds));
                self.broadcast(&Event::PowerupEvent {
                    kind: kind.as_str().to_string(),
                    by: player_id.clone(),
                    fields,
                });
            }
            engine::UsePowerupOutcome::Blockout { blocked_cells } => {
                fields.insert("blocked_cells".to_string(), serde_json::json!(blocked_cells));
                self.broadcast(&Event::PowerupEvent {
                    kind: kind.as_str().to_string(),
                    by: player_id.clone(),
                    fields,
                });
            }
            engine::UsePowerupOutcome::Shuffle {
                new_board,
                protected_players,
                protected_boards,
            } => {
                self.broadcast(&Event::BoardUpdate {
                    board: new_board.clone(),
                    protected_players: protected_players.clone(),
                    protected_boards: if protected_boards.is_empty() {
                        None
                    } else {
                        Some(protected_boards.clone())
                    },
                    shuffled_by: player_id.clone(),
                });
            }
            engine::UsePowerupOutcome::Lock => {
                fields.insert("lock_armed".to_string(), serde_json::json!(true));
                self.broadcast(&Event::PowerupEvent {
                    kind: kind.as_str().to_string(),
                    by: player_id.clone(),
                    fields,
                });
            }
            engine::UsePowerupOutcome::Ignored => unreachable!(),
        }

        if let Some(player) = self.lobby.player(&player_id) {
            let powerups = player.powerups.iter().map(|k| k.as_str().to_string()).collect();
            self.broadcast(&Event::PowerupConsumed { player_id, powerups });
        }
    }

    async fn handle_tick(&mut self) {
        let now = std::time::Instant::now();
        self.lobby.powerup_state.clear_expired_blockout(now);
        match self.lobby.status {
            Status::Countdown => self.tick_countdown(),
            Status::Playing => self.tick_playing().await,
            Status::Waiting => self.tick_waiting().await,
            Status::Lobby | Status::Summary => {}
        }
    }

    fn tick_countdown(&mut self) {
        match self.lobby.countdown_remaining {
            Some(remaining) if remaining > 0 => {
                self.lobby.countdown_remaining = Some(remaining - 1);
                self.broadcast(&Event::LobbyUpdate(self.snapshot()));
            }
            _ => {
                engine::start_playing(&mut self.lobby);
                self.broadcast(&Event::GameState(self.snapshot()));
            }
        }
    }

    async fn tick_playing(&mut self) {
        if self.lobby.main_timer_seconds == 0 {
            return;
        }
        self.lobby.main_timer_seconds -= 1;
        if self.lobby.main_timer_seconds > 0 {
            self.broadcast(&Event::TimerUpdate {
                timer: self.lobby.main_timer_seconds,
            });
            return;
        }

        let with_bonus: Vec<String> = self
            .lobby
            .players
            .iter()
            .filter(|p| p.bonus_time_seconds > 0)
            .map(|p| p.id.clone())
            .collect();
        if with_bonus.is_empty() {
            self.finalize_and_broadcast_summary().await;
            return;
        }

        let mut players_finished = Vec::new();
        for player in &mut self.lobby.players {
            if player.bonus_time_seconds == 0 {
                player.is_time_up = true;
                players_finished.push(player.id.clone());
            }
        }
        let players_with_bonus: Vec<BonusTimer> = self
            .lobby
            .players
            .iter()
            .filter(|p| p.bonus_time_seconds > 0)
            .map(|p| BonusTimer {
                player_id: p.id.clone(),
                bonus_time: p.bonus_time_seconds,
            })
            .collect();
        self.lobby.status = Status::Waiting;
        self.broadcast(&Event::WaitingPhase {
            players_finished,
            players_with_bonus,
        });
    }

    async fn tick_waiting(&mut self) {
        let mut time_up_now = Vec::new();
        for player in &mut self.lobby.players {
            if player.is_time_up {
                continue;
            }
            player.bonus_time_seconds = player.bonus_time_seconds.saturating_sub(1);
            if player.bonus_time_seconds == 0 {
                player.is_time_up = true;
                time_up_now.push(player.id.clone());
            }
        }
        for player_id in time_up_now {
            self.broadcast(&Event::PlayerTimeUp { player_id });
        }

        let players_with_bonus: Vec<BonusTimer> = self
            .lobby
            .players
            .iter()
            .filter(|p| !p.is_time_up)
            .map(|p| BonusTimer {
                player_id: p.id.clone(),
                bonus_time: p.bonus_time_seconds,
            })
            .collect();

        if players_with_bonus.is_empty() {
            self.finalize_and_broadcast_summary().await;
        } else {
            self.broadcast(&Event::BonusTimerUpdate(players_with_bonus));
        }
    }

    async fn finalize_and_broadcast_summary(&mut self) {
        let (game_end, outcomes) = engine::finalize_summary(&mut self.lobby, &self.dictionary);
        self.broadcast(&Event::GameEnd(game_end));
        let now = now_stamp();
        for outcome in outcomes {
            self.records.apply(outcome, &now).await;
        }
    }

    fn snapshot(&self) -> LobbySnapshot {
        let timer = match self.lobby.status {
            Status::Countdown => self.lobby.countdown_remaining.unwrap_or(0),
            Status::Playing => self.lobby.main_timer_seconds,
            _ => 0,
        };
        LobbySnapshot {
            lobby_id: self.lobby.id.clone(),
            status: self.lobby.status.as_str().to_string(),
            board: self.lobby.board.clone(),
            board_size: self.lobby.board_size,
            timer,
            players: self
                .lobby
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id.clone(),
                    username: p.username.clone(),
                    character: p.character.clone(),
                    is_ready: p.is_ready,
                    score: p.score,
                    powerups: p.powerups.iter().map(|k| k.as_str().to_string()).collect(),
                    found_words: p.found_words.clone(),
                })
                .collect(),
            host_id: self.lobby.host_id.clone(),
            challenges: self.lobby.challenges.clone(),
        }
    }

    fn broadcast(&self, event: &Event) {
        let json = event.to_json();
        for (player_id, tx) in &self.participants {
            if tx.send(json.clone()).is_err() {
                log::warn!("dropped broadcast to disconnected participant {player_id}");
            }
        }
    }

    fn reply(&self, player_id: &str, event: &Event) {
        if let Some(tx) = self.participants.get(player_id) {
            if tx.send(event.to_json()).is_err() {
                log::warn!("dropped personal reply to disconnected participant {player_id}");
            }
        }
    }
}
