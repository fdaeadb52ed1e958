//! WebSocket fan-out of list mutations.
//!
//! Every mutation is published to all connected sockets as a JSON envelope;
//! clients decide which user's events they care about. There is no ordering,
//! replay or delivery guarantee: a lagging socket skips frames, a dead one
//! is dropped.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use domain::Todo;
use serde::Serialize;
use shared::UserDid;
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use crate::AppState;

/// Mutation kinds, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Added,
    Updated,
    Deleted,
}

impl Mutation {
    pub fn event_name(self) -> &'static str {
        match self {
            Mutation::Added => "todo:add",
            Mutation::Updated => "todo:update",
            Mutation::Deleted => "todo:delete",
        }
    }
}

#[derive(Debug, Serialize)]
struct EventEnvelope<'a> {
    event: &'static str,
    data: EventData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventData<'a> {
    todo: &'a Todo,
    user_id: &'a UserDid,
}

/// Pre-serialized frames fanned out over a broadcast channel. Publishing
/// never fails the request: with no subscribers the frame is simply dropped.
#[derive(Clone)]
pub struct BroadcastHub {
    tx: broadcast::Sender<String>,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn publish(&self, mutation: Mutation, todo: &Todo, user: &UserDid) {
        let envelope = EventEnvelope {
            event: mutation.event_name(),
            data: EventData { todo, user_id: user },
        };

        let frame = match serde_json::to_string(&envelope) {
            Ok(frame) => frame,
            Err(e) => {
                error!(error = %e, "Failed to serialize broadcast event");
                return;
            }
        };

        // Err only means nobody is listening right now.
        let _ = self.tx.send(frame);
    }
}

pub async fn websocket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let rx = state.hub.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(mut socket: WebSocket, mut rx: broadcast::Receiver<String>) {
    loop {
        tokio::select! {
            frame = rx.recv() => match frame {
                Ok(frame) => {
                    if socket.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Slow websocket client skipped frames");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Ping(payload))) => {
                    if socket.send(Message::Pong(payload)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Clients only listen; anything else they send is ignored.
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("Websocket client disconnected");
}
