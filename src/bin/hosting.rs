//! hosting Server Binary
//!
//! Runs the HTTP + WebSocket server for live Family Boggle lobbies.

use boggle_arena::board::DictionaryProvider;
use boggle_arena::hosting::{init_logging, Config, Server};
use boggle_arena::records::RecordsStore;

fn load_words(path: &std::path::Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(|line| line.to_string()).collect(),
        Err(e) => {
            log::warn!("no word list at {}: {e}, falling back to built-in words", path.display());
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = Config::from_env();
    let words = std::env::var("BOGGLE_WORDS_FILE")
        .map(|path| load_words(std::path::Path::new(&path)))
        .unwrap_or_default();
    let dictionary = DictionaryProvider::new(words);

    let records = RecordsStore::load(config.high_scores_path())
        .await
        .expect("load high-score records");

    Server::run(config, dictionary, records).await.expect("run hosting server");
}
