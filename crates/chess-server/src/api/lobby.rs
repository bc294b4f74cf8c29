//! Matchmaking endpoints: invites, acceptance and the free-user list.

use super::{authenticate, ApiError, JsonBody};
use crate::users::{self, LobbyError};
use crate::ws::Lobby;
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chess_core::Side;
use serde::Deserialize;
use serde_json::{json, Value};

/// Body of invite and accept requests.
#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

/// Invites the user with public id `id` to a game.
///
/// The invitee receives an `invite` frame; the invite expires after the
/// configured lifespan.
///
/// # Endpoint
///
/// `POST /api/v1/invite`
pub async fn invite(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody<IdRequest>,
) -> Result<Json<Value>, ApiError> {
    let caller = authenticate(&state, &headers)?;
    let Json(body) = body?;
    if !state.hub.is_free(caller.client) {
        return Err(LobbyError::Busy.into());
    }

    let invite = {
        let mut users = users::lock(&state.users);
        let invitee = users
            .find_public(&body.id)
            .ok_or_else(|| LobbyError::UnknownUser(body.id.clone()))?;
        if invitee.client != caller.client && !state.hub.is_free(invitee.client) {
            return Err(LobbyError::Busy.into());
        }
        users.invite(&caller.token, &body.id)?
    };

    tracing::info!(from = %caller.public_id, to = %body.id, invite_id = %invite.id, "Invite sent");
    users::expire_later(state.users.clone(), invite, state.invite_lifespan);
    Ok(Json(json!({ "success": true })))
}

/// Accepts invite `id` and starts the game. The accepting user plays side one.
///
/// The caller's other invites are dropped once the game has started.
///
/// # Endpoint
///
/// `POST /api/v1/accept`
pub async fn accept(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody<IdRequest>,
) -> Result<Json<Value>, ApiError> {
    let caller = authenticate(&state, &headers)?;
    let Json(body) = body?;
    let (one, two) = users::lock(&state.users).accept(&caller.token, &body.id)?;
    let game_id = state.hub.start_game(one, two)?;

    let mut users = users::lock(&state.users);
    users.clear_invites(&caller.token);
    for (client, side) in [(one, Side::One), (two, Side::Two)] {
        if let Some(user) = users.find_client(client) {
            user.notify(Lobby::Start { side });
        }
    }
    tracing::info!(game_id = %game_id, one = %one, two = %two, "Invite accepted");
    Ok(Json(json!({ "success": true, "side": Side::One })))
}

/// Lists the public ids of users not currently playing.
///
/// # Endpoint
///
/// `GET /api/v1/avali`
pub async fn avali(State(state): State<AppState>) -> Json<Vec<String>> {
    let users = users::lock(&state.users);
    let mut free: Vec<String> = users
        .iter()
        .filter(|user| state.hub.is_free(user.client))
        .map(|user| user.public_id.clone())
        .collect();
    free.sort();
    Json(free)
}

/// Reports whether the caller's token is valid.
///
/// # Endpoint
///
/// `GET /api/v1/connected`
pub async fn connected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    authenticate(&state, &headers)?;
    Ok(StatusCode::OK)
}
