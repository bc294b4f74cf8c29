//! WebSocket connections: one user per socket.
//!
//! Every socket gets an unbounded frame channel. Game updates and lobby
//! notices are pushed into it without waiting, and a dedicated task drains
//! it into the socket, so a slow client never holds up a game.

use crate::users;
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use chess_core::Side;
use chess_engine::{ClientId, Command, Outbox, OutboxClosed, Update};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Lobby notices sent to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Lobby {
    /// First frame on every socket.
    Welcome {
        /// Bearer token for the HTTP API.
        token: String,
        /// Public id other users invite by.
        id: String,
    },
    /// Someone invited this user.
    Invite {
        /// Invite id to pass to `/api/v1/accept`.
        id: String,
        /// Public id of the inviter.
        from: String,
    },
    /// A game started and this user plays `side`.
    Start { side: Side },
    /// A command sent over the socket was rejected.
    Error { message: String },
}

/// Anything written to a socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Frame {
    Lobby(Lobby),
    Game(Update),
}

pub type FrameSender = mpsc::UnboundedSender<Frame>;

/// Engine-facing outbox backed by a socket's frame channel.
pub struct ChannelOutbox(FrameSender);

impl Outbox for ChannelOutbox {
    fn deliver(&self, update: Update) -> Result<(), OutboxClosed> {
        self.0.send(Frame::Game(update)).map_err(|_| OutboxClosed)
    }
}

/// A registered user and the receiving end of its frames.
pub struct Session {
    pub client: ClientId,
    pub token: String,
    pub public_id: String,
    pub frames: FrameSender,
    pub inbox: mpsc::UnboundedReceiver<Frame>,
}

/// Registers a new user with the hub and the user table and greets it.
pub fn connect(state: &AppState) -> Session {
    let (frames, inbox) = mpsc::unbounded_channel();
    let client = state
        .hub
        .register(Arc::new(ChannelOutbox(frames.clone())));
    let (token, public_id) = {
        let mut users = users::lock(&state.users);
        let user = users.add(client, frames.clone());
        (user.token.clone(), user.public_id.clone())
    };

    let _ = frames.send(Frame::Lobby(Lobby::Welcome {
        token: token.clone(),
        id: public_id.clone(),
    }));
    tracing::info!(client_id = %client, public_id = %public_id, "User connected");

    Session {
        client,
        token,
        public_id,
        frames,
        inbox,
    }
}

/// Removes a user, forfeiting any game it is playing.
pub fn disconnect(state: &AppState, token: &str, client: ClientId) {
    users::lock(&state.users).remove(token);
    if let Err(e) = state.hub.unregister(client) {
        tracing::warn!(client_id = %client, error = %e, "Unregister failed");
    }
    tracing::info!(client_id = %client, "User disconnected");
}

/// Axum handler for WebSocket upgrade requests.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drives one socket until the client goes away.
///
/// Text frames holding a [`Command`] are executed for this user; rejections
/// come back as [`Lobby::Error`] frames.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let Session {
        client,
        token,
        frames,
        mut inbox,
        ..
    } = connect(&state);

    let send_task = tokio::spawn(async move {
        while let Some(frame) = inbox.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode frame");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let result = serde_json::from_str::<Command>(&text)
                    .map_err(|e| e.to_string())
                    .and_then(|cmd| state.hub.execute(client, cmd).map_err(|e| e.to_string()));
                if let Err(message) = result {
                    let _ = frames.send(Frame::Lobby(Lobby::Error { message }));
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    disconnect(&state, &token, client);
    send_task.abort();
}
