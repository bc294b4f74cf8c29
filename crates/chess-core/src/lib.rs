//! Core types for chess.
//!
//! This crate provides the fundamental types used across the server:
//! - [`Point`] and [`Direction`] for board coordinates and line geometry
//! - [`Side`] for the two players
//! - [`Piece`] and [`PieceKind`], including occupancy-blind move generation
//!
//! Nothing in here knows about other pieces on the board; blocking and
//! capture rules live in the engine.

mod piece;
mod point;
mod side;

pub use piece::{Piece, PieceKind};
pub use point::{Direction, Point, BOARD_SIZE};
pub use side::{InvalidSide, Side};
