//! Castling eligibility and the fixed squares castling uses.

use chess_core::{Point, Side};

/// Column the king starts on.
pub const KING_COLUMN: i8 = 3;

/// The two rooks a king can castle with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    /// The rook on column 0, next to the king.
    Kingside,
    /// The rook on column 7, next to the queen.
    Queenside,
}

impl Wing {
    pub const BOTH: [Wing; 2] = [Wing::Kingside, Wing::Queenside];

    /// Column the rook of this wing starts on.
    pub const fn rook_column(self) -> i8 {
        match self {
            Wing::Kingside => 0,
            Wing::Queenside => 7,
        }
    }

    /// Column the king lands on: two squares towards the rook.
    pub const fn king_target_column(self) -> i8 {
        match self {
            Wing::Kingside => KING_COLUMN - 2,
            Wing::Queenside => KING_COLUMN + 2,
        }
    }

    /// Column the rook lands on: beside the king, on the side it came from.
    pub const fn rook_target_column(self) -> i8 {
        match self {
            Wing::Kingside => KING_COLUMN - 1,
            Wing::Queenside => KING_COLUMN + 1,
        }
    }

    /// Columns strictly between the king's and the rook's home squares.
    pub fn between_columns(self) -> std::ops::Range<i8> {
        match self {
            Wing::Kingside => self.rook_column() + 1..KING_COLUMN,
            Wing::Queenside => KING_COLUMN + 1..self.rook_column(),
        }
    }
}

/// Home square of `side`'s king.
pub const fn king_home(side: Side) -> Point {
    Point::new(side.back_row(), KING_COLUMN)
}

/// Home square of `side`'s rook on `wing`.
pub const fn rook_home(side: Side, wing: Wing) -> Point {
    Point::new(side.back_row(), wing.rook_column())
}

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ONE_KINGSIDE: u8 = 0b0001;
    pub const ONE_QUEENSIDE: u8 = 0b0010;
    pub const TWO_KINGSIDE: u8 = 0b0100;
    pub const TWO_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(side: Side, wing: Wing) -> u8 {
        match (side, wing) {
            (Side::One, Wing::Kingside) => Self::ONE_KINGSIDE,
            (Side::One, Wing::Queenside) => Self::ONE_QUEENSIDE,
            (Side::Two, Wing::Kingside) => Self::TWO_KINGSIDE,
            (Side::Two, Wing::Queenside) => Self::TWO_QUEENSIDE,
        }
    }

    /// Returns true if `side` may still castle with the rook on `wing`.
    #[inline]
    pub const fn can_castle(self, side: Side, wing: Wing) -> bool {
        (self.0 & Self::flag(side, wing)) != 0
    }

    /// Returns true if `side` may still castle on either wing.
    #[inline]
    pub const fn any(self, side: Side) -> bool {
        self.can_castle(side, Wing::Kingside) || self.can_castle(side, Wing::Queenside)
    }

    /// Removes one castling right.
    #[inline]
    pub fn remove(&mut self, side: Side, wing: Wing) {
        self.0 &= !Self::flag(side, wing);
    }

    /// Removes both castling rights for a side.
    #[inline]
    pub fn remove_side(&mut self, side: Side) {
        for wing in Wing::BOTH {
            self.remove(side, wing);
        }
    }

    /// Updates the rights after a piece travelled from `src` to `dst`.
    ///
    /// A king leaving home loses both rights; a rook leaving home, or
    /// anything landing on a rook's home square, loses that rook's right.
    pub fn update_for_move(&mut self, src: Point, dst: Point) {
        for side in Side::BOTH {
            if src == king_home(side) {
                self.remove_side(side);
            }
            for wing in Wing::BOTH {
                let home = rook_home(side, wing);
                if src == home || dst == home {
                    self.remove(side, wing);
                }
            }
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castled_squares() {
        assert_eq!(Wing::Kingside.king_target_column(), 1);
        assert_eq!(Wing::Kingside.rook_target_column(), 2);
        assert_eq!(Wing::Queenside.king_target_column(), 5);
        assert_eq!(Wing::Queenside.rook_target_column(), 4);
    }

    #[test]
    fn between_columns_exclude_homes() {
        assert_eq!(Wing::Kingside.between_columns().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            Wing::Queenside.between_columns().collect::<Vec<_>>(),
            vec![4, 5, 6]
        );
    }

    #[test]
    fn king_move_clears_both() {
        let mut rights = CastlingRights::ALL;
        rights.update_for_move(king_home(Side::One), Point::new(1, 3));
        assert!(!rights.any(Side::One));
        assert!(rights.can_castle(Side::Two, Wing::Kingside));
        assert!(rights.can_castle(Side::Two, Wing::Queenside));
    }

    #[test]
    fn rook_move_clears_one() {
        let mut rights = CastlingRights::ALL;
        rights.update_for_move(rook_home(Side::Two, Wing::Queenside), Point::new(5, 7));
        assert!(rights.can_castle(Side::Two, Wing::Kingside));
        assert!(!rights.can_castle(Side::Two, Wing::Queenside));
    }

    #[test]
    fn capture_on_rook_home_clears_it() {
        let mut rights = CastlingRights::ALL;
        rights.update_for_move(Point::new(2, 2), rook_home(Side::One, Wing::Kingside));
        assert!(!rights.can_castle(Side::One, Wing::Kingside));
        assert!(rights.can_castle(Side::One, Wing::Queenside));
    }

    #[test]
    fn unrelated_move_keeps_rights() {
        let mut rights = CastlingRights::ALL;
        rights.update_for_move(Point::new(1, 4), Point::new(3, 4));
        assert_eq!(rights, CastlingRights::ALL);
        assert_eq!(CastlingRights::new(0xff).raw(), 0b1111);
    }
}
