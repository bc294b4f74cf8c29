//! The 8×8 board: occupancy, move legality and move notifications.

use chess_core::{Piece, PieceKind, Point, Side, BOARD_SIZE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

const SIZE: usize = BOARD_SIZE as usize;

/// Errors produced by board mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The piece handed in is not what the board holds at its position.
    #[error("stale piece reference at {0}")]
    StalePiece(Point),

    /// The destination is not reachable under the movement or capture rules.
    #[error("illegal move from {src} to {dst}")]
    Illegal { src: Point, dst: Point },

    /// A point outside the board was used for direct placement.
    #[error("point {0} is off the board")]
    OffBoard(Point),

    /// Direct manipulation targeted an empty square.
    #[error("no piece at {0}")]
    EmptySquare(Point),
}

/// Notification sent to listeners after every [`Board::move_piece`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    /// The piece as it stands after the call (its `pos` is `dst` when accepted).
    pub piece: Piece,
    pub src: Point,
    pub dst: Point,
    pub accepted: bool,
}

/// Handle returned by [`Board::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked synchronously after each attempted move.
pub type MoveListener = Box<dyn FnMut(&MoveEvent) + Send>;

/// Serialized form of an occupied cell. Position is implied by the grid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: PieceKind,
    pub side: Side,
}

/// Wire representation of a board: rows of optional pieces.
pub type BoardGrid = [[Option<PieceRecord>; SIZE]; SIZE];

/// The game board.
///
/// The board is the only owner of pieces. Every mutator keeps each piece's
/// `pos` equal to the index of the cell holding it.
pub struct Board {
    cells: [[Option<Piece>; SIZE]; SIZE],
    listeners: Vec<(ListenerId, MoveListener)>,
    next_listener: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board without any pieces.
    pub fn empty() -> Self {
        Board {
            cells: [[None; SIZE]; SIZE],
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Creates a board with the standard starting placement.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for side in Side::BOTH {
            for (y, kind) in PieceKind::BACK_ROW.into_iter().enumerate() {
                board.put(Piece::new(kind, side, Point::new(side.back_row(), y as i8)));
                board.put(Piece::new(
                    PieceKind::Pawn,
                    side,
                    Point::new(side.pawn_row(), y as i8),
                ));
            }
        }
        board
    }

    /// Rebuilds a board from its wire grid, deriving each piece's position
    /// from where it sits in the grid.
    pub fn from_grid(grid: &BoardGrid) -> Self {
        let mut board = Self::empty();
        for (x, row) in grid.iter().enumerate() {
            for (y, record) in row.iter().enumerate() {
                if let Some(record) = record {
                    board.put(Piece::new(
                        record.kind,
                        record.side,
                        Point::new(x as i8, y as i8),
                    ));
                }
            }
        }
        board
    }

    /// Returns the wire grid for this board.
    pub fn to_grid(&self) -> BoardGrid {
        let mut grid: BoardGrid = [[None; SIZE]; SIZE];
        for piece in self.iter() {
            if let Some((x, y)) = piece.pos.index() {
                grid[x][y] = Some(PieceRecord {
                    kind: piece.kind,
                    side: piece.side,
                });
            }
        }
        grid
    }

    /// Returns the piece on `point`, or `None` for empty or off-board points.
    pub fn get(&self, point: Point) -> Option<Piece> {
        point.index().and_then(|(x, y)| self.cells[x][y])
    }

    /// Places `piece` at its own `pos`, bypassing all rules.
    ///
    /// Returns whatever occupied the cell before.
    pub fn set(&mut self, piece: Piece) -> Result<Option<Piece>, MoveError> {
        let (x, y) = piece.pos.index().ok_or(MoveError::OffBoard(piece.pos))?;
        Ok(self.cells[x][y].replace(piece))
    }

    /// Empties `point`, returning the piece that stood there.
    pub fn clear(&mut self, point: Point) -> Option<Piece> {
        let (x, y) = point.index()?;
        self.cells[x][y].take()
    }

    /// Moves whatever stands on `src` to `dst` without checking any rule.
    pub fn relocate(&mut self, src: Point, dst: Point) -> Result<Piece, MoveError> {
        if !dst.is_valid() {
            return Err(MoveError::OffBoard(dst));
        }
        let mut piece = self.clear(src).ok_or(MoveError::EmptySquare(src))?;
        piece.pos = dst;
        self.put(piece);
        Ok(piece)
    }

    /// Changes the kind of the piece on `point` in place.
    pub fn promote(&mut self, point: Point, kind: PieceKind) -> Result<Piece, MoveError> {
        let (x, y) = point.index().ok_or(MoveError::OffBoard(point))?;
        let piece = self.cells[x][y]
            .as_mut()
            .ok_or(MoveError::EmptySquare(point))?;
        piece.kind = kind;
        Ok(*piece)
    }

    /// Iterates over every piece on the board, row by row.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    /// Iterates over the pieces owned by `side`.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |p| p.side == side)
    }

    /// Registers a listener called after every [`move_piece`](Board::move_piece).
    ///
    /// Listeners run in registration order, inline, before `move_piece`
    /// returns.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&MoveEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Decides whether `piece` may move to `dst` on the current board.
    ///
    /// This is the only place blocking and capture rules are applied:
    /// - the piece must be the one the board holds at `piece.pos`;
    /// - the destination must be a geometric candidate, or a pawn's diagonal
    ///   step onto an opposing piece;
    /// - allied pieces are never captured, and pawns never capture straight
    ///   ahead;
    /// - every piece except the knight needs the squares strictly between
    ///   source and destination to be empty.
    pub fn check_move(&self, piece: &Piece, dst: Point) -> Result<(), MoveError> {
        let src = piece.pos;
        if self.get(src) != Some(*piece) {
            return Err(MoveError::StalePiece(src));
        }

        let illegal = MoveError::Illegal { src, dst };
        let occupant = self.get(dst);

        if piece.can_go(dst) {
            if let Some(occupant) = occupant {
                if occupant.side == piece.side || piece.is_pawn() {
                    return Err(illegal);
                }
            }
            if piece.kind != PieceKind::Knight && !self.path_is_clear(src, dst) {
                return Err(illegal);
            }
            Ok(())
        } else if piece.is_pawn()
            && piece.pawn_attacks().contains(&dst)
            && occupant.is_some_and(|o| o.side != piece.side)
        {
            Ok(())
        } else {
            Err(illegal)
        }
    }

    /// Attempts to move `piece` to `dst`.
    ///
    /// On success the source cell is cleared and the piece (with its updated
    /// position) replaces whatever stood on `dst`. On failure the board is
    /// untouched. Listeners are notified either way.
    pub fn move_piece(&mut self, piece: &Piece, dst: Point) -> Result<Piece, MoveError> {
        let src = piece.pos;
        let result = self.check_move(piece, dst).map(|()| {
            self.clear(src);
            let moved = Piece { pos: dst, ..*piece };
            self.put(moved);
            moved
        });

        let event = MoveEvent {
            piece: *result.as_ref().unwrap_or(piece),
            src,
            dst,
            accepted: result.is_ok(),
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }

        result
    }

    /// Returns every square the piece on `point` may legally move to.
    pub fn legal_destinations(&self, point: Point) -> Vec<Point> {
        let Some(piece) = self.get(point) else {
            return Vec::new();
        };

        let mut candidates = piece.possible_moves();
        if piece.is_pawn() {
            candidates.extend(piece.pawn_attacks().into_iter().filter(|p| p.is_valid()));
        }
        candidates.retain(|&dst| self.check_move(&piece, dst).is_ok());
        candidates
    }

    /// Counts, per kind, how many of `side`'s starting pieces are no longer
    /// on the board. Kinds with nothing missing are omitted.
    pub fn dead_pieces(&self, side: Side) -> BTreeMap<PieceKind, u8> {
        let mut missing: BTreeMap<PieceKind, u8> = PieceKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.starting_count()))
            .collect();

        for piece in self.pieces(side) {
            if let Some(count) = missing.get_mut(&piece.kind) {
                *count = count.saturating_sub(1);
            }
        }

        missing.retain(|_, count| *count > 0);
        missing
    }

    fn path_is_clear(&self, src: Point, dst: Point) -> bool {
        let direction = src.direction_to(dst);
        let mut current = src.step(direction);
        while current.is_valid() && current != dst {
            if self.get(current).is_some() {
                return false;
            }
            current = current.step(direction);
        }
        true
    }

    // Callers guarantee `piece.pos` is on the board.
    fn put(&mut self, piece: Piece) {
        if let Some((x, y)) = piece.pos.index() {
            self.cells[x][y] = Some(piece);
        }
    }
}

impl Clone for Board {
    /// Copies the pieces only; listeners stay with the source board.
    fn clone(&self) -> Self {
        Board {
            cells: self.cells,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("cells", &format_args!("\n{}", self))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (x, row) in self.cells.iter().enumerate() {
            if x != 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or('.', |p| p.symbol()).to_string())
                .collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_grid().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grid = <BoardGrid as Deserialize>::deserialize(deserializer)?;
        Ok(Board::from_grid(&grid))
    }
}
