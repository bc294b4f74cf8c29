//! Board coordinates and direction arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: i8 = 8;

/// The eight knight offsets as `(dx, dy)`.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight adjacent offsets as `(dx, dy)`.
const SQUARE_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A set of compass directions between two points.
///
/// `UP` means the row index decreases, `DOWN` that it increases; `LEFT` and
/// `RIGHT` do the same for the column. A diagonal is the union of one
/// vertical and one horizontal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const UP: Direction = Direction(0b0001);
    pub const DOWN: Direction = Direction(0b0010);
    pub const LEFT: Direction = Direction(0b0100);
    pub const RIGHT: Direction = Direction(0b1000);

    /// Classifies the direction that leads from `src` to `dst`.
    ///
    /// Returns [`Direction::NONE`] when both points are equal.
    pub const fn between(src: Point, dst: Point) -> Self {
        let mut bits = 0;
        if dst.x < src.x {
            bits |= Self::UP.0;
        } else if dst.x > src.x {
            bits |= Self::DOWN.0;
        }
        if dst.y < src.y {
            bits |= Self::LEFT.0;
        } else if dst.y > src.y {
            bits |= Self::RIGHT.0;
        }
        Direction(bits)
    }

    /// Returns true if every flag in `other` is also set in `self`.
    #[inline]
    pub const fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the single-square `(dx, dy)` step for this direction.
    pub const fn delta(self) -> (i8, i8) {
        let dx = if self.contains(Self::UP) {
            -1
        } else if self.contains(Self::DOWN) {
            1
        } else {
            0
        };
        let dy = if self.contains(Self::LEFT) {
            -1
        } else if self.contains(Self::RIGHT) {
            1
        } else {
            0
        };
        (dx, dy)
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

/// A coordinate on the board.
///
/// `x` is the row, the axis pawns advance along; `y` is the column. Both are
/// valid in `0..8`. Points outside that range can be constructed (they arrive
/// from the wire, or from offset arithmetic) and are reported by
/// [`Point::is_valid`]; they are never clamped onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Point { x, y }
    }

    /// Returns true if both coordinates are on the board.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// Returns the `(row, column)` array index, or `None` when off-board.
    #[inline]
    pub const fn index(self) -> Option<(usize, usize)> {
        if self.is_valid() {
            Some((self.x as usize, self.y as usize))
        } else {
            None
        }
    }

    /// Returns the point shifted by `(dx, dy)`. The result may be off-board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Point {
        Point {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Returns the neighbouring point one square along `direction`.
    #[inline]
    pub const fn step(self, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Direction classification from `self` towards `other`.
    #[inline]
    pub const fn direction_to(self, other: Point) -> Direction {
        Direction::between(self, other)
    }

    /// Returns true if `other` lies on one of the diagonals through `self`.
    pub const fn is_diagonal_to(self, other: Point) -> bool {
        let dx = (other.x as i16 - self.x as i16).abs();
        let dy = (other.y as i16 - self.y as i16).abs();
        dx != 0 && dx == dy
    }

    /// The square one row up (towards row 0), if on the board.
    pub fn forward(self) -> Option<Point> {
        Some(self.offset(-1, 0)).filter(|p| p.is_valid())
    }

    /// The square one row down (towards row 7), if on the board.
    pub fn backward(self) -> Option<Point> {
        Some(self.offset(1, 0)).filter(|p| p.is_valid())
    }

    /// Every on-board point sharing a diagonal with `self`.
    pub fn diagonal(self) -> Vec<Point> {
        let mut points = Vec::with_capacity(13);
        for (dx, dy) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
            points.extend(self.ray(dx, dy));
        }
        points
    }

    /// Every other on-board point in the same row.
    pub fn horizontal(self) -> Vec<Point> {
        let mut points = self.ray(0, -1);
        points.extend(self.ray(0, 1));
        points
    }

    /// Every other on-board point in the same column.
    pub fn vertical(self) -> Vec<Point> {
        let mut points = self.ray(-1, 0);
        points.extend(self.ray(1, 0));
        points
    }

    /// The on-board points a knight on `self` could reach.
    pub fn knight(self) -> Vec<Point> {
        self.offsets(&KNIGHT_OFFSETS)
    }

    /// The on-board points adjacent to `self`.
    pub fn square(self) -> Vec<Point> {
        self.offsets(&SQUARE_OFFSETS)
    }

    fn offsets(self, offsets: &[(i8, i8)]) -> Vec<Point> {
        offsets
            .iter()
            .map(|&(dx, dy)| self.offset(dx, dy))
            .filter(|p| p.is_valid())
            .collect()
    }

    // Walks outward from `self` (exclusive) until leaving the board.
    fn ray(self, dx: i8, dy: i8) -> Vec<Point> {
        let mut points = Vec::new();
        let mut current = self.offset(dx, dy);
        while current.is_valid() {
            points.push(current);
            current = current.offset(dx, dy);
        }
        points
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
