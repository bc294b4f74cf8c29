//! Connected users, their bearer tokens and pending invites.

use crate::ws::{Frame, FrameSender, Lobby};
use chess_engine::ClientId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Length of the public id users invite each other by.
const PUBLIC_ID_LEN: usize = 6;

/// Errors from invite handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("no user with id {0}")]
    UnknownUser(String),
    #[error("cannot invite yourself")]
    SelfInvite,
    #[error("user is already in a game")]
    Busy,
    #[error("invite is invalid or has expired")]
    InvalidInvite,
}

/// A connected user.
pub struct User {
    pub token: String,
    pub public_id: String,
    pub client: ClientId,
    frames: FrameSender,
    /// Invite id to the inviter's token.
    invites: HashMap<String, String>,
}

impl User {
    /// Pushes a lobby notice to the user's socket. Returns false if it is gone.
    pub fn notify(&self, notice: Lobby) -> bool {
        self.frames.send(Frame::Lobby(notice)).is_ok()
    }
}

/// An invite that was just sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub id: String,
    pub invitee: String,
}

/// All connected users keyed by token.
#[derive(Default)]
pub struct Users {
    by_token: HashMap<String, User>,
}

pub type SharedUsers = Arc<Mutex<Users>>;

pub fn lock(users: &SharedUsers) -> MutexGuard<'_, Users> {
    users.lock().unwrap_or_else(PoisonError::into_inner)
}

fn random_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}

impl Users {
    /// Adds a user for `client` with a fresh token and public id.
    pub fn add(&mut self, client: ClientId, frames: FrameSender) -> &User {
        let token = Uuid::new_v4().simple().to_string();
        let public_id = loop {
            let id = random_id(PUBLIC_ID_LEN);
            if self.find_public(&id).is_none() {
                break id;
            }
        };
        self.by_token.entry(token.clone()).or_insert(User {
            token,
            public_id,
            client,
            frames,
            invites: HashMap::new(),
        })
    }

    pub fn remove(&mut self, token: &str) -> Option<User> {
        self.by_token.remove(token)
    }

    pub fn get(&self, token: &str) -> Option<&User> {
        self.by_token.get(token)
    }

    pub fn find_public(&self, public_id: &str) -> Option<&User> {
        self.by_token.values().find(|u| u.public_id == public_id)
    }

    pub fn find_client(&self, client: ClientId) -> Option<&User> {
        self.by_token.values().find(|u| u.client == client)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.by_token.values()
    }

    /// Records an invite from the user holding `from` to the user whose
    /// public id is `to`, and notifies the invitee.
    pub fn invite(&mut self, from: &str, to: &str) -> Result<Invite, LobbyError> {
        let inviter = self.get(from).ok_or(LobbyError::InvalidInvite)?;
        let inviter_public = inviter.public_id.clone();
        if inviter_public == to {
            return Err(LobbyError::SelfInvite);
        }

        let invitee_token = self
            .find_public(to)
            .map(|u| u.token.clone())
            .ok_or_else(|| LobbyError::UnknownUser(to.to_string()))?;
        let invitee = self
            .by_token
            .get_mut(&invitee_token)
            .ok_or_else(|| LobbyError::UnknownUser(to.to_string()))?;

        let id = random_id(8);
        invitee.invites.insert(id.clone(), from.to_string());
        invitee.notify(Lobby::Invite {
            id: id.clone(),
            from: inviter_public,
        });

        Ok(Invite {
            id,
            invitee: invitee_token,
        })
    }

    /// Drops an invite. Returns true if it was still pending.
    pub fn expire(&mut self, invitee: &str, id: &str) -> bool {
        self.by_token
            .get_mut(invitee)
            .is_some_and(|u| u.invites.remove(id).is_some())
    }

    /// Consumes invite `id` held by `token` and returns the clients of the
    /// invitee and the inviter, in that order. Other invites stay pending
    /// until [`Users::clear_invites`].
    pub fn accept(&mut self, token: &str, id: &str) -> Result<(ClientId, ClientId), LobbyError> {
        let invitee = self.by_token.get_mut(token).ok_or(LobbyError::InvalidInvite)?;
        let inviter = invitee.invites.remove(id).ok_or(LobbyError::InvalidInvite)?;
        let invitee = invitee.client;

        let inviter = self.get(&inviter).ok_or(LobbyError::InvalidInvite)?;
        Ok((invitee, inviter.client))
    }

    /// Drops every invite pending for the user holding `token`.
    pub fn clear_invites(&mut self, token: &str) {
        if let Some(user) = self.by_token.get_mut(token) {
            user.invites.clear();
        }
    }
}

/// Expires `invite` after `after` unless it was accepted first.
pub fn expire_later(users: SharedUsers, invite: Invite, after: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        if lock(&users).expire(&invite.invitee, &invite.id) {
            tracing::debug!(invite_id = %invite.id, "Invite expired");
        }
    })
}
