//! Chess Server
//!
//! Hosts two-player chess matches over HTTP and WebSocket:
//! - `/api/v1/ws` streams game updates and lobby notices to each user
//! - `/api/v1/*` accepts commands, invites and board queries
//! - `/health` for liveness checks

mod api;
mod config;
mod middleware;
mod users;
mod ws;

use axum::routing::{get, post};
use axum::Router;
use chess_engine::Hub;
use clap::Parser;
use config::ServerConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use users::{SharedUsers, Users};

/// Chess Server - two-player matches over HTTP and WebSocket.
#[derive(Parser)]
#[command(name = "chess-server")]
#[command(about = "Hosts two-player chess matches over HTTP and WebSocket")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "server.toml")]
    config: PathBuf,

    /// Address to listen on, overriding the configuration file
    #[arg(long)]
    bind: Option<SocketAddr>,
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client and game registry.
    pub hub: Arc<Hub>,
    /// Connected users by bearer token.
    pub users: SharedUsers,
    /// How long an invite stays valid.
    pub invite_lifespan: Duration,
}

impl AppState {
    pub fn new(invite_lifespan: Duration) -> Self {
        AppState {
            hub: Arc::new(Hub::default()),
            users: Arc::new(Mutex::new(Users::default())),
            invite_lifespan,
        }
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Builds the router with every route and layer.
pub fn app(state: AppState, cors_permissive: bool) -> Router {
    let cors = if cors_permissive {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/cmd", post(api::game::cmd))
        .route("/possib", post(api::game::possib))
        .route("/board", get(api::game::board))
        .route("/invite", post(api::lobby::invite))
        .route("/accept", post(api::lobby::accept))
        .route("/avali", get(api::lobby::avali))
        .route("/connected", get(api::lobby::connected));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", routes)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    tracing::info!(config = ?config, "Configuration loaded");

    let state = AppState::new(config.invite_lifespan());
    let app = app(state, config.cors_permissive);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Server running on http://{}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
