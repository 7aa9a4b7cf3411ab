//! Connection broker (spec.md §4.9): maps lobby ids to running lobby
//! tasks, creating lobbies on CREATE and rejecting unknown ids on JOIN.
//! Grounded on the casino's room table, generalized with a watcher that
//! evicts a lobby once its own worker task exits (our lobbies destroy
//! themselves when the last participant leaves, unlike a room closed by
//! an explicit `/leave` call).

use crate::board::DictionaryProvider;
use crate::dto::ConnectMode;
use crate::lobby::{self, LobbyHandle};
use crate::records::RecordsStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct Broker {
    lobbies: Arc<RwLock<HashMap<String, LobbyHandle>>>,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a lobby id to its running handle, creating it on CREATE
    /// mode if unknown and rejecting unknown ids on JOIN mode.
    pub async fn resolve(
        &self,
        lobby_id: &str,
        mode: ConnectMode,
        dictionary: Arc<DictionaryProvider>,
        records: Arc<RecordsStore>,
    ) -> Result<LobbyHandle, &'static str> {
        if let Some(handle) = self.lobbies.read().await.get(lobby_id) {
            return Ok(handle.clone());
        }
        if mode == ConnectMode::Join {
            return Err("lobby not found");
        }

        let (handle, done) = lobby::spawn(lobby_id.to_string(), dictionary, records);
        self.lobbies.write().await.insert(lobby_id.to_string(), handle.clone());
        log::info!("opened lobby {lobby_id}");

        let lobbies = self.lobbies.clone();
        let id = lobby_id.to_string();
        tokio::spawn(async move {
            let _ = done.await;
            lobbies.write().await.remove(&id);
            log::info!("destroyed lobby {id}");
        });

        Ok(handle)
    }
}
