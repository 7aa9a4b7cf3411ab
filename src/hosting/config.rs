//! Environment-derived configuration. Kept as a single struct read once
//! at startup rather than scattered `env::var` calls, so defaults live
//! in one place.

use std::path::PathBuf;

pub struct Config {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub default_board_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BOGGLE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let data_dir = std::env::var("BOGGLE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let default_board_size = std::env::var("BOGGLE_DEFAULT_BOARD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|size| matches!(size, 4 | 5 | 6))
            .unwrap_or(6);
        Self {
            bind_addr,
            data_dir,
            default_board_size,
        }
    }

    pub fn high_scores_path(&self) -> PathBuf {
        self.data_dir.join("high_scores.json")
    }
}
