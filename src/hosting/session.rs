//! WebSocket bridge between an `actix_ws::Session`/`MessageStream` pair
//! and a lobby's command channel, grounded on the casino's `bridge()`
//! loop but driving a typed `Intent`/`Event` wire instead of opaque
//! JSON pass-through, since here the server itself parses and acts on
//! client frames rather than handing them to a game player.

use crate::dto::{ConnectMode, Event, Intent};
use crate::lobby::{LobbyCommand, LobbyHandle};
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

#[derive(Deserialize)]
pub struct ConnectQuery {
    pub username: String,
    pub character: String,
    #[serde(default)]
    pub mode: Option<ConnectMode>,
}

/// Joins `player_id` into the lobby behind `handle` and, once accepted,
/// spawns the bridging task for the lifetime of the connection.
pub async fn bridge(
    handle: LobbyHandle,
    player_id: String,
    query: ConnectQuery,
    remote_address: Option<String>,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    let (outbox_tx, mut outbox_rx) = unbounded_channel::<String>();
    let (reply_tx, reply_rx) = oneshot::channel();
    handle.send(LobbyCommand::Connect {
        player_id: player_id.clone(),
        username: query.username,
        character: query.character,
        remote_address,
        mode: query.mode.unwrap_or(ConnectMode::Join),
        outbox: outbox_tx,
        reply: reply_tx,
    });

    match reply_rx.await {
        Ok(Ok(())) => {}
        Ok(Err(reason)) => {
            let _ = session
                .text(Event::PolicyViolation { reason: reason.to_string() }.to_json())
                .await;
            let _ = session.close(None).await;
            return;
        }
        Err(_) => {
            let _ = session.close(None).await;
            return;
        }
    }

    loop {
        tokio::select! {
            biased;
            outgoing = outbox_rx.recv() => match outgoing {
                Some(json) => if session.text(json).await.is_err() { break },
                None => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(actix_ws::Message::Text(text))) => match serde_json::from_str::<Intent>(&text) {
                    Ok(intent) => handle.send(LobbyCommand::Intent { player_id: player_id.clone(), intent }),
                    Err(e) => log::warn!("malformed intent from {player_id}: {e}"),
                },
                Some(Ok(actix_ws::Message::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() { break }
                }
                Some(Ok(actix_ws::Message::Close(_))) | None => break,
                Some(Err(_)) => break,
                _ => continue,
            },
        }
    }

    handle.send(LobbyCommand::Disconnect { player_id });
}
