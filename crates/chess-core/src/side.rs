//! Player side representation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a number does not name a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid side: expected 1 or 2, got {0}")]
pub struct InvalidSide(pub u8);

/// The two players of a match.
///
/// Side one starts on rows 0 and 1 and moves first; side two starts on
/// rows 6 and 7. On the wire a side is the number `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Side {
    One = 1,
    Two = 2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// Returns the opposing side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Returns the index (0 for side one, 1 for side two).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// Returns the row delta of a pawn step (+1 for side one, -1 for side two).
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Side::One => 1,
            Side::Two => -1,
        }
    }

    /// Returns the row holding this side's rooks, knights, bishops, king and queen.
    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Side::One => 0,
            Side::Two => 7,
        }
    }

    /// Returns the row this side's pawns start on.
    #[inline]
    pub const fn pawn_row(self) -> i8 {
        match self {
            Side::One => 1,
            Side::Two => 6,
        }
    }

    /// Returns the row on which this side's pawns promote (the opponent's back row).
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        self.opposite().back_row()
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        side as u8
    }
}

impl TryFrom<u8> for Side {
    type Error = InvalidSide;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::One),
            2 => Ok(Side::Two),
            other => Err(InvalidSide(other)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", *self as u8)
    }
}
