//! HTTP API handlers.
//!
//! Every endpoint except `/api/v1/avali` needs an `Authorization: Bearer`
//! header carrying the token from the socket's welcome frame.

pub mod game;
pub mod lobby;

use crate::users::{self, LobbyError};
use crate::AppState;
use axum::{
    extract::rejection::JsonRejection,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chess_engine::{ClientId, GameError};
use serde_json::json;
use thiserror::Error;

/// Errors returned by API handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or invalid bearer token")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Lobby(#[from] LobbyError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Game(GameError::GameNotFound | GameError::ClientNotFound)
            | ApiError::Lobby(LobbyError::UnknownUser(_)) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Game(_) | ApiError::Lobby(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// A JSON body whose rejection is surfaced only after authentication.
pub type JsonBody<T> = Result<Json<T>, JsonRejection>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::BAD_REQUEST {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// The authenticated user behind a request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub token: String,
    pub public_id: String,
    pub client: ClientId,
}

/// Resolves the bearer token in `headers` to a connected user.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Caller, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let users = users::lock(&state.users);
    let user = users.get(token.trim()).ok_or(ApiError::Unauthorized)?;
    Ok(Caller {
        token: user.token.clone(),
        public_id: user.public_id.clone(),
        client: user.client,
    })
}
