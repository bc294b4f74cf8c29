//! Chess pieces and their occupancy-blind move geometry.

use crate::{Point, Side};
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
///
/// A pawn's direction of travel is not part of its kind; it is derived from
/// the owning [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The back row layout, by column.
    pub const BACK_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// How many pieces of this kind each side starts with.
    pub const fn starting_count(self) -> u8 {
        match self {
            PieceKind::Pawn => 8,
            PieceKind::Bishop | PieceKind::Knight | PieceKind::Rook => 2,
            PieceKind::Queen | PieceKind::King => 1,
        }
    }

    /// Returns true for the kinds a pawn may be promoted to.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Bishop | PieceKind::Knight | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Returns the one-letter symbol for this kind with the given side
    /// (uppercase for side one).
    pub const fn symbol(self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::One => c.to_ascii_uppercase(),
            Side::Two => c,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece standing on the board.
///
/// `pos` mirrors the cell the piece occupies; the board keeps the two in
/// sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub pos: Point,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side, pos: Point) -> Self {
        Piece { kind, side, pos }
    }

    #[inline]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// The square one pawn step ahead of `pos` for this piece's side.
    ///
    /// Meaningful for any kind; used for pawn pushes and pawn captures.
    #[inline]
    pub const fn ahead(&self) -> Point {
        self.pos.offset(self.side.pawn_direction(), 0)
    }

    /// The two squares a pawn of this side attacks from `pos`.
    ///
    /// Either may be off the board.
    pub const fn pawn_attacks(&self) -> [Point; 2] {
        let ahead = self.ahead();
        [ahead.offset(0, -1), ahead.offset(0, 1)]
    }

    /// Returns every destination allowed by this piece's movement pattern,
    /// ignoring other pieces entirely.
    pub fn possible_moves(&self) -> Vec<Point> {
        let src = self.pos;
        match self.kind {
            PieceKind::Pawn => {
                let step = match self.side {
                    Side::One => src.backward(),
                    Side::Two => src.forward(),
                };
                let mut points: Vec<Point> = step.into_iter().collect();
                if src.x == self.side.pawn_row() {
                    let double = src.offset(2 * self.side.pawn_direction(), 0);
                    if double.is_valid() {
                        points.push(double);
                    }
                }
                points
            }
            PieceKind::Bishop => src.diagonal(),
            PieceKind::Knight => src.knight(),
            PieceKind::Rook => {
                let mut points = src.horizontal();
                points.extend(src.vertical());
                points
            }
            PieceKind::Queen => {
                let mut points = src.horizontal();
                points.extend(src.vertical());
                points.extend(src.diagonal());
                points
            }
            PieceKind::King => src.square(),
        }
    }

    /// Returns true if `dst` is on the board, is not the current square and
    /// belongs to [`possible_moves`](Piece::possible_moves).
    ///
    /// Blocking pieces and capture rules are the board's concern.
    pub fn can_go(&self, dst: Point) -> bool {
        dst.is_valid() && dst != self.pos && self.possible_moves().contains(&dst)
    }

    /// One-letter symbol, uppercase for side one.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.kind.symbol(self.side)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.pos, self.side as u8)
    }
}
