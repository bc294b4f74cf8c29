//! Rules engine for two-player networked chess.
//!
//! This crate provides:
//! - [`Board`] - occupancy, the single move legality gate and move listeners
//! - [`Game`] - per-match state machine for turns, promotion, castling and resignation
//! - [`Command`] / [`Update`] - what clients send and what they are told
//! - [`Dispatcher`] - the command kind to handler table
//! - [`Hub`] - client registry that binds clients to games
//!
//! # Example
//!
//! ```
//! use chess_core::{Point, Side};
//! use chess_engine::{ClientId, Game, GameId, Outbox, OutboxClosed, Seat, Update};
//! use std::sync::Arc;
//!
//! struct Discard;
//!
//! impl Outbox for Discard {
//!     fn deliver(&self, _: Update) -> Result<(), OutboxClosed> {
//!         Ok(())
//!     }
//! }
//!
//! let mut game = Game::new(
//!     GameId::new(),
//!     Seat::new(ClientId::new(), Arc::new(Discard)),
//!     Seat::new(ClientId::new(), Arc::new(Discard)),
//! )
//! .unwrap();
//! game.make_move(Side::One, Point::new(1, 1), Point::new(3, 1)).unwrap();
//! assert_eq!(game.turn(), Some(Side::Two));
//! ```

mod board;
pub mod castling;
mod dispatch;
mod game;
mod hub;
mod ids;
mod protocol;

pub use board::{Board, BoardGrid, ListenerId, MoveError, MoveEvent, MoveListener, PieceRecord};
pub use castling::{CastlingRights, Wing};
pub use dispatch::{Dispatcher, Handler};
pub use game::{Game, GameError, Outbox, OutboxClosed, Phase, Seat};
pub use hub::Hub;
pub use ids::{ClientId, GameId};
pub use protocol::{Command, CommandKind, Update};
