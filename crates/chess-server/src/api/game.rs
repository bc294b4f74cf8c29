//! Gameplay endpoints: commands, destination queries and board snapshots.

use super::{authenticate, ApiError, JsonBody};
use crate::AppState;
use axum::{extract::State, http::HeaderMap, Json};
use chess_core::Point;
use chess_engine::{Board, Command};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Runs a command in the caller's game.
///
/// # Endpoint
///
/// `POST /api/v1/cmd` with a [`Command`] body.
///
/// # Response
///
/// - `200 OK`: `{"success": true}`
/// - `400 Bad Request`: malformed or unknown command, or the game rejected it
/// - `401 Unauthorized`: missing or unknown token
/// - `404 Not Found`: the caller is not in a game
pub async fn cmd(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody<Command>,
) -> Result<Json<Value>, ApiError> {
    let caller = authenticate(&state, &headers)?;
    let Json(command) = body?;
    state.hub.execute(caller.client, command)?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct PossibRequest {
    pub piece: Point,
}

#[derive(Debug, Serialize)]
pub struct PossibResponse {
    pub points: Vec<Point>,
}

/// Lists where the piece on `piece` may move.
///
/// # Endpoint
///
/// `POST /api/v1/possib` with `{"piece": {"x": .., "y": ..}}`.
pub async fn possib(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonBody<PossibRequest>,
) -> Result<Json<PossibResponse>, ApiError> {
    let caller = authenticate(&state, &headers)?;
    let Json(body) = body?;
    let points = state.hub.legal_destinations(caller.client, body.piece)?;
    Ok(Json(PossibResponse { points }))
}

/// Returns the board of the caller's game as an 8×8 grid.
///
/// # Endpoint
///
/// `GET /api/v1/board`
pub async fn board(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Board>, ApiError> {
    let caller = authenticate(&state, &headers)?;
    Ok(Json(state.hub.board(caller.client)?))
}
