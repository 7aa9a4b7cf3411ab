//! Persistent per-remote-address high-score aggregates (spec.md §4.8
//! step 7, §6). One JSON file, read into memory at startup and
//! rewritten atomically (write-temp-rename) after every update.

use crate::core::LEADERBOARD_MAX;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub display_name: String,
    pub best_score: i64,
    pub best_words_count: usize,
    pub games_played: u64,
    pub wins: u64,
    pub challenges_completed_total: u64,
    pub last_played: String,
    pub best_game_date: String,
}

/// One player's outcome at the end of a single game, the unit
/// [`crate::records::RecordsStore::apply`] folds into a record.
pub struct GameOutcome {
    pub remote_address: String,
    pub display_name: String,
    pub score: i64,
    pub words_count: usize,
    pub won: bool,
    pub challenges_completed: usize,
}

#[derive(Clone, Serialize)]
pub struct LeaderboardEntry {
    pub display_name: String,
    pub best_score: i64,
    pub best_words_count: usize,
    pub games_played: u64,
    pub wins: u64,
    pub challenges_completed_total: u64,
}

#[derive(Clone, Serialize)]
pub struct PlayerStats {
    pub display_name: String,
    pub best_score: i64,
    pub best_words_count: usize,
    pub games_played: u64,
    pub wins: u64,
    pub challenges_completed_total: u64,
    pub win_rate_percent: f64,
}

pub struct RecordsStore {
    path: PathBuf,
    records: RwLock<HashMap<String, HighScoreRecord>>,
}

/// Coarse wall-clock stamp, used only as an opaque, sortable-by-string
/// marker on records; no component parses it back into a date.
pub fn now_stamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string()
}

impl RecordsStore {
    /// Loads the backing file if it exists; a missing file is treated as
    /// an empty store, not a startup failure.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing high-score file at {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e).context("reading high-score file"),
        };
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub async fn apply(&self, outcome: GameOutcome, now: &str) {
        let mut records = self.records.write().await;
        let entry = records
            .entry(outcome.remote_address.clone())
            .or_insert_with(|| HighScoreRecord {
                display_name: outcome.display_name.clone(),
                best_score: 0,
                best_words_count: 0,
                games_played: 0,
                wins: 0,
                challenges_completed_total: 0,
                last_played: now.to_string(),
                best_game_date: now.to_string(),
            });
        entry.display_name = outcome.display_name;
        entry.games_played += 1;
        entry.last_played = now.to_string();
        entry.challenges_completed_total += outcome.challenges_completed as u64;
        if outcome.won {
            entry.wins += 1;
        }
        if outcome.score > entry.best_score {
            entry.best_score = outcome.score;
            entry.best_words_count = outcome.words_count;
            entry.best_game_date = now.to_string();
        }
        drop(records);
        if let Err(e) = self.persist().await {
            log::error!("failed to persist high scores: {e:#}");
        }
    }

    async fn persist(&self) -> Result<()> {
        let records = self.records.read().await;
        let json = serde_json::to_vec_pretty(&*records)?;
        drop(records);
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.context("writing temp high-score file")?;
        tokio::fs::rename(&tmp, &self.path).await.context("renaming temp high-score file")?;
        Ok(())
    }

    pub async fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let records = self.records.read().await;
        let mut entries: Vec<LeaderboardEntry> = records
            .values()
            .map(|r| LeaderboardEntry {
                display_name: r.display_name.clone(),
                best_score: r.best_score,
                best_words_count: r.best_words_count,
                games_played: r.games_played,
                wins: r.wins,
                challenges_completed_total: r.challenges_completed_total,
            })
            .collect();
        entries.sort_by(|a, b| b.best_score.cmp(&a.best_score));
        entries.truncate(limit.min(LEADERBOARD_MAX));
        entries
    }

    pub async fn stats(&self, remote_address: &str) -> Option<PlayerStats> {
        let records = self.records.read().await;
        let r = records.get(remote_address)?;
        let win_rate_percent = if r.games_played > 0 {
            (r.wins as f64 / r.games_played as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };
        Some(PlayerStats {
            display_name: r.display_name.clone(),
            best_score: r.best_score,
            best_words_count: r.best_words_count,
            games_played: r.games_played,
            wins: r.wins,
            challenges_completed_total: r.challenges_completed_total,
            win_rate_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn apply_creates_and_updates_a_record() {
        let dir = std::env::temp_dir().join(format!("boggle-records-test-{}", std::process::id()));
        let path = dir.join("high_scores.json");
        let store = RecordsStore::load(path.clone()).await.unwrap();

        store
            .apply(
                GameOutcome {
                    remote_address: "1.2.3.4".to_string(),
                    display_name: "Ada".to_string(),
                    score: 50,
                    words_count: 5,
                    won: true,
                    challenges_completed: 2,
                },
                "2026-01-01T00:00:00",
            )
            .await;
        store
            .apply(
                GameOutcome {
                    remote_address: "1.2.3.4".to_string(),
                    display_name: "Ada".to_string(),
                    score: 30,
                    words_count: 3,
                    won: false,
                    challenges_completed: 1,
                },
                "2026-01-02T00:00:00",
            )
            .await;

        let stats = store.stats("1.2.3.4").await.unwrap();
        assert_eq!(stats.best_score, 50);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.challenges_completed_total, 3);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn leaderboard_sorts_by_best_score_descending() {
        let dir = std::env::temp_dir().join(format!("boggle-records-test-lb-{}", std::process::id()));
        let path = dir.join("high_scores.json");
        let store = RecordsStore::load(path.clone()).await.unwrap();
        for (addr, score) in [("a", 10), ("b", 90), ("c", 50)] {
            store
                .apply(
                    GameOutcome {
                        remote_address: addr.to_string(),
                        display_name: addr.to_string(),
                        score,
                        words_count: 1,
                        won: false,
                        challenges_completed: 0,
                    },
                    "2026-01-01T00:00:00",
                )
                .await;
        }
        let board = store.leaderboard(10).await;
        assert_eq!(board[0].display_name, "b");
        assert_eq!(board[1].display_name, "c");
        assert_eq!(board[2].display_name, "a");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
