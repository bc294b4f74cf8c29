//! Match state machine: turn order, promotion, castling and resignation.
//!
//! A [`Game`] binds two seats to one [`Board`]. Every command is validated
//! against the current [`Phase`] before the board is consulted, and every
//! accepted transition is broadcast identically to both seats.

use crate::castling::{king_home, rook_home, CastlingRights, Wing};
use crate::{Board, ClientId, CommandKind, GameId, ListenerId, MoveEvent, Update};
use chess_core::{PieceKind, Point, Side};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for game and session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Geometry, blocking or capture rules forbid the move, or the piece
    /// belongs to the other side.
    #[error("illegal move from {src} to {dst}")]
    IllegalMove { src: Point, dst: Point },
    /// The requesting side is not the turn holder.
    #[error("not your turn")]
    IllegalTurn,
    /// No promotion is pending, or the piece or chosen kind is wrong.
    #[error("illegal promotion")]
    IllegalPromotion,
    /// Castling rights are gone, the squares are wrong, or the path is occupied.
    #[error("illegal castling")]
    IllegalCastling,
    /// The referenced square holds no piece.
    #[error("no piece at {0}")]
    EmptyPiece(Point),
    /// The side to move still has to choose a promotion.
    #[error("a promotion must be chosen first")]
    PromotionPending,
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// The client is not bound to a game.
    #[error("game not found")]
    GameNotFound,
    /// The clients cannot be seated in a new game.
    #[error("client is invalid or already in a game")]
    ClientInvalid,
    /// The client is not registered.
    #[error("client not found")]
    ClientNotFound,
    /// No handler is registered for the command.
    #[error("unknown command: {0}")]
    UnknownCommand(CommandKind),
}

/// Delivery failure reported by an [`Outbox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("outbox closed")]
pub struct OutboxClosed;

/// Write side of a client's transport.
///
/// `deliver` must queue and return immediately; a slow or closed client
/// must never hold up the game or the other seat.
pub trait Outbox: Send + Sync {
    fn deliver(&self, update: Update) -> Result<(), OutboxClosed>;
}

/// One of the two participants of a game.
#[derive(Clone)]
pub struct Seat {
    pub client: ClientId,
    pub outbox: Arc<dyn Outbox>,
}

impl Seat {
    pub fn new(client: ClientId, outbox: Arc<dyn Outbox>) -> Self {
        Seat { client, outbox }
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seat").field("client", &self.client).finish()
    }
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The side may move or castle.
    AwaitingMove(Side),
    /// The side must choose a promotion before anything else happens.
    AwaitingPromotion(Side),
    /// The game is over.
    Done { winner: Side },
}

/// A two-player match.
#[derive(Debug)]
pub struct Game {
    id: GameId,
    seats: [Seat; 2],
    board: Board,
    phase: Phase,
    castling: CastlingRights,
}

impl Game {
    /// Creates a game on the standard starting board. `one` moves first.
    pub fn new(id: GameId, one: Seat, two: Seat) -> Result<Self, GameError> {
        Self::with_board(id, one, two, Board::new())
    }

    /// Creates a game on a custom board.
    pub fn with_board(id: GameId, one: Seat, two: Seat, board: Board) -> Result<Self, GameError> {
        if one.client == two.client {
            return Err(GameError::ClientInvalid);
        }
        info!(game_id = %id, one = %one.client, two = %two.client, "Game created");
        Ok(Game {
            id,
            seats: [one, two],
            board,
            phase: Phase::AwaitingMove(Side::One),
            castling: CastlingRights::ALL,
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn seat(&self, side: Side) -> &Seat {
        &self.seats[side.index()]
    }

    /// Returns the side `client` plays, if it is seated here.
    pub fn side_of(&self, client: ClientId) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.seats[side.index()].client == client)
    }

    /// The side allowed to act next, or `None` once the game is over.
    pub fn turn(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingMove(side) | Phase::AwaitingPromotion(side) => Some(side),
            Phase::Done { .. } => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done { .. })
    }

    /// Registers a board move listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&MoveEvent) + Send + 'static,
    {
        self.board.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.board.unsubscribe(id)
    }

    /// Squares the piece on `point` may move to right now.
    pub fn legal_destinations(&self, point: Point) -> Vec<Point> {
        self.board.legal_destinations(point)
    }

    /// Announces the opening turn to both seats.
    pub fn announce(&self) {
        if let Some(side) = self.turn() {
            self.broadcast(Update::Turn { side });
        }
    }

    /// Moves the piece on `piece` to `dst` for `side`.
    ///
    /// A pawn reaching `side`'s promotion row leaves the game awaiting a
    /// promotion choice from `side`; any other move hands the turn over.
    pub fn make_move(&mut self, side: Side, piece: Point, dst: Point) -> Result<(), GameError> {
        self.require_turn(side)?;

        let target = self.board.get(piece).ok_or(GameError::EmptyPiece(piece))?;
        if target.side != side {
            return Err(GameError::IllegalMove { src: piece, dst });
        }

        let moved = self
            .board
            .move_piece(&target, dst)
            .map_err(|_| GameError::IllegalMove { src: piece, dst })?;
        self.castling.update_for_move(piece, dst);

        debug!(game_id = %self.id, %side, src = %piece, %dst, "Move accepted");
        self.broadcast(Update::Move { piece, dst });

        if moved.is_pawn() && dst.x == side.promotion_row() {
            info!(game_id = %self.id, %side, piece = %dst, "Awaiting promotion");
            self.phase = Phase::AwaitingPromotion(side);
            self.broadcast(Update::Promote { side, piece: dst });
        } else {
            self.switch_turn(side.opposite());
        }
        Ok(())
    }

    /// Promotes the pawn waiting on `piece` to `kind`.
    pub fn promote(&mut self, side: Side, piece: Point, kind: PieceKind) -> Result<(), GameError> {
        match self.phase {
            Phase::Done { .. } => return Err(GameError::GameOver),
            Phase::AwaitingPromotion(pending) if pending == side => {}
            _ => return Err(GameError::IllegalPromotion),
        }

        let pawn = self.board.get(piece).ok_or(GameError::EmptyPiece(piece))?;
        if !pawn.is_pawn() || pawn.side != side || piece.x != side.promotion_row() {
            return Err(GameError::IllegalPromotion);
        }
        if !kind.is_promotion_target() {
            return Err(GameError::IllegalPromotion);
        }

        self.board
            .promote(piece, kind)
            .map_err(|_| GameError::IllegalPromotion)?;

        info!(game_id = %self.id, %side, %piece, %kind, "Pawn promoted");
        self.broadcast(Update::Promotion { piece, kind });
        self.switch_turn(side.opposite());
        Ok(())
    }

    /// Castles `side`'s king with the rook named by `src`/`dst`.
    ///
    /// One of the two points must be the king's home square and the other
    /// a rook's home square.
    pub fn castle(&mut self, side: Side, src: Point, dst: Point) -> Result<(), GameError> {
        self.require_turn(side)?;

        let king = king_home(side);
        let wing = Wing::BOTH
            .into_iter()
            .find(|&wing| {
                let rook = rook_home(side, wing);
                (src == king && dst == rook) || (src == rook && dst == king)
            })
            .ok_or(GameError::IllegalCastling)?;
        let rook = rook_home(side, wing);

        if !self.castling.can_castle(side, wing) {
            return Err(GameError::IllegalCastling);
        }

        let in_place = |point: Point, kind: PieceKind| {
            self.board
                .get(point)
                .is_some_and(|p| p.kind == kind && p.side == side)
        };
        if !in_place(king, PieceKind::King) || !in_place(rook, PieceKind::Rook) {
            return Err(GameError::IllegalCastling);
        }

        let row = side.back_row();
        if wing
            .between_columns()
            .any(|y| self.board.get(Point::new(row, y)).is_some())
        {
            return Err(GameError::IllegalCastling);
        }

        let king_dst = Point::new(row, wing.king_target_column());
        let rook_dst = Point::new(row, wing.rook_target_column());
        self.board
            .relocate(king, king_dst)
            .and_then(|_| self.board.relocate(rook, rook_dst))
            .map_err(|_| GameError::IllegalCastling)?;
        self.castling.remove_side(side);

        info!(game_id = %self.id, %side, ?wing, "Castled");
        self.broadcast(Update::Castling {
            king_src: king,
            king_dst,
            rook_src: rook,
            rook_dst,
        });
        self.switch_turn(side.opposite());
        Ok(())
    }

    /// Ends the game in favour of the other side. Returns the winner.
    pub fn resign(&mut self, side: Side) -> Result<Side, GameError> {
        if self.is_done() {
            return Err(GameError::GameOver);
        }

        let winner = side.opposite();
        self.phase = Phase::Done { winner };
        info!(game_id = %self.id, loser = %side, %winner, "Game over");
        self.broadcast(Update::Done { winner });
        Ok(winner)
    }

    fn require_turn(&self, side: Side) -> Result<(), GameError> {
        match self.phase {
            Phase::Done { .. } => Err(GameError::GameOver),
            Phase::AwaitingPromotion(pending) if pending == side => {
                Err(GameError::PromotionPending)
            }
            Phase::AwaitingMove(turn) if turn == side => Ok(()),
            _ => Err(GameError::IllegalTurn),
        }
    }

    fn switch_turn(&mut self, next: Side) {
        self.phase = Phase::AwaitingMove(next);
        self.broadcast(Update::Turn { side: next });
    }

    fn broadcast(&self, update: Update) {
        for seat in &self.seats {
            if seat.outbox.deliver(update).is_err() {
                warn!(game_id = %self.id, client = %seat.client, "Dropped update for closed outbox");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chess_core::Piece;
    use std::sync::Mutex;

    /// Outbox that records everything it is given.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) updates: Mutex<Vec<Update>>,
    }

    impl Recorder {
        pub(crate) fn take(&self) -> Vec<Update> {
            std::mem::take(&mut *self.updates.lock().unwrap())
        }
    }

    impl Outbox for Recorder {
        fn deliver(&self, update: Update) -> Result<(), OutboxClosed> {
            self.updates.lock().unwrap().push(update);
            Ok(())
        }
    }

    struct Closed;

    impl Outbox for Closed {
        fn deliver(&self, _: Update) -> Result<(), OutboxClosed> {
            Err(OutboxClosed)
        }
    }

    fn p(x: i8, y: i8) -> Point {
        Point::new(x, y)
    }

    fn setup(board: Board) -> (Game, Arc<Recorder>, Arc<Recorder>) {
        let one = Arc::new(Recorder::default());
        let two = Arc::new(Recorder::default());
        let game = Game::with_board(
            GameId::new(),
            Seat::new(ClientId::new(), one.clone()),
            Seat::new(ClientId::new(), two.clone()),
            board,
        )
        .unwrap();
        (game, one, two)
    }

    fn new_game() -> (Game, Arc<Recorder>, Arc<Recorder>) {
        setup(Board::new())
    }

    /// Board with both kings home and a side one pawn one step from promotion.
    fn promotion_board() -> Board {
        let mut board = Board::empty();
        for side in Side::BOTH {
            board
                .set(Piece::new(PieceKind::King, side, king_home(side)))
                .unwrap();
        }
        board
            .set(Piece::new(PieceKind::Pawn, Side::One, p(6, 0)))
            .unwrap();
        board
            .set(Piece::new(PieceKind::Pawn, Side::Two, p(1, 7)))
            .unwrap();
        board
    }

    #[test]
    fn new_game_awaits_side_one() {
        let (game, _, _) = new_game();
        assert_eq!(game.phase(), Phase::AwaitingMove(Side::One));
        assert_eq!(game.turn(), Some(Side::One));
        assert!(!game.is_done());
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
    }

    #[test]
    fn same_client_twice_is_invalid() {
        let client = ClientId::new();
        let outbox: Arc<dyn Outbox> = Arc::new(Recorder::default());
        let result = Game::new(
            GameId::new(),
            Seat::new(client, outbox.clone()),
            Seat::new(client, outbox),
        );
        assert!(matches!(result, Err(GameError::ClientInvalid)));
    }

    #[test]
    fn accepted_move_is_broadcast_and_switches_turn() {
        let (mut game, one, two) = new_game();
        game.make_move(Side::One, p(1, 1), p(3, 1)).unwrap();

        let expected = vec![
            Update::Move {
                piece: p(1, 1),
                dst: p(3, 1),
            },
            Update::Turn { side: Side::Two },
        ];
        assert_eq!(one.take(), expected);
        assert_eq!(two.take(), expected);
        assert_eq!(game.phase(), Phase::AwaitingMove(Side::Two));
    }

    #[test]
    fn wrong_side_is_rejected() {
        let (mut game, one, _) = new_game();
        assert_eq!(
            game.make_move(Side::Two, p(6, 1), p(4, 1)),
            Err(GameError::IllegalTurn)
        );
        assert_eq!(game.turn(), Some(Side::One));
        assert!(one.take().is_empty());
    }

    #[test]
    fn moving_enemy_piece_is_illegal() {
        let (mut game, _, _) = new_game();
        assert_eq!(
            game.make_move(Side::One, p(6, 1), p(5, 1)),
            Err(GameError::IllegalMove {
                src: p(6, 1),
                dst: p(5, 1)
            })
        );
    }

    #[test]
    fn empty_square_reference() {
        let (mut game, _, _) = new_game();
        assert_eq!(
            game.make_move(Side::One, p(4, 4), p(5, 4)),
            Err(GameError::EmptyPiece(p(4, 4)))
        );
    }

    #[test]
    fn rejected_move_leaves_everything_unchanged() {
        let (mut game, one, two) = new_game();
        let before = game.board().clone();
        assert!(game.make_move(Side::One, p(0, 0), p(4, 0)).is_err());
        assert_eq!(*game.board(), before);
        assert_eq!(game.phase(), Phase::AwaitingMove(Side::One));
        assert!(one.take().is_empty());
        assert!(two.take().is_empty());
    }

    #[test]
    fn pawn_reaching_far_row_waits_for_promotion() {
        let (mut game, one, two) = setup(promotion_board());
        game.make_move(Side::One, p(6, 0), p(7, 0)).unwrap();

        assert_eq!(game.phase(), Phase::AwaitingPromotion(Side::One));
        let expected = vec![
            Update::Move {
                piece: p(6, 0),
                dst: p(7, 0),
            },
            Update::Promote {
                side: Side::One,
                piece: p(7, 0),
            },
        ];
        assert_eq!(one.take(), expected);
        assert_eq!(two.take(), expected);

        // Nobody may move or castle until the choice is made.
        assert_eq!(
            game.make_move(Side::One, king_home(Side::One), p(1, 3)),
            Err(GameError::PromotionPending)
        );
        assert_eq!(
            game.make_move(Side::Two, p(1, 7), p(0, 7)),
            Err(GameError::IllegalTurn)
        );
        assert_eq!(
            game.castle(Side::One, king_home(Side::One), rook_home(Side::One, Wing::Kingside)),
            Err(GameError::PromotionPending)
        );
    }

    #[test]
    fn promotion_choice_is_validated() {
        let (mut game, one, _) = setup(promotion_board());
        game.make_move(Side::One, p(6, 0), p(7, 0)).unwrap();
        one.take();

        assert_eq!(
            game.promote(Side::One, p(7, 0), PieceKind::King),
            Err(GameError::IllegalPromotion)
        );
        assert_eq!(
            game.promote(Side::One, p(7, 0), PieceKind::Pawn),
            Err(GameError::IllegalPromotion)
        );
        assert_eq!(
            game.promote(Side::Two, p(7, 0), PieceKind::Queen),
            Err(GameError::IllegalPromotion)
        );
        assert_eq!(
            game.promote(Side::One, p(7, 1), PieceKind::Queen),
            Err(GameError::EmptyPiece(p(7, 1)))
        );
        assert_eq!(
            game.promote(Side::One, king_home(Side::One), PieceKind::Queen),
            Err(GameError::IllegalPromotion)
        );

        game.promote(Side::One, p(7, 0), PieceKind::Queen).unwrap();
        assert_eq!(game.board().get(p(7, 0)).unwrap().kind, PieceKind::Queen);
        assert_eq!(game.phase(), Phase::AwaitingMove(Side::Two));
        assert_eq!(
            one.take(),
            vec![
                Update::Promotion {
                    piece: p(7, 0),
                    kind: PieceKind::Queen
                },
                Update::Turn { side: Side::Two },
            ]
        );
    }

    #[test]
    fn promotion_without_pending_is_rejected() {
        let (mut game, _, _) = new_game();
        assert_eq!(
            game.promote(Side::One, p(1, 0), PieceKind::Queen),
            Err(GameError::IllegalPromotion)
        );
    }

    #[test]
    fn side_two_promotes_on_row_zero() {
        let (mut game, _, _) = setup(promotion_board());
        game.make_move(Side::One, p(6, 0), p(7, 0)).unwrap();
        game.promote(Side::One, p(7, 0), PieceKind::Rook).unwrap();
        game.make_move(Side::Two, p(1, 7), p(0, 7)).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingPromotion(Side::Two));
        game.promote(Side::Two, p(0, 7), PieceKind::Knight).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingMove(Side::One));
    }

    fn castling_board() -> Board {
        let mut board = Board::new();
        for y in [1, 2, 4, 5, 6] {
            board.clear(p(0, y));
            board.clear(p(7, y));
        }
        board
    }

    #[test]
    fn castling_kingside_relocates_both() {
        let (mut game, one, two) = setup(castling_board());
        game.castle(Side::One, p(0, 3), p(0, 0)).unwrap();

        let board = game.board();
        assert_eq!(board.get(p(0, 1)).unwrap().kind, PieceKind::King);
        assert_eq!(board.get(p(0, 2)).unwrap().kind, PieceKind::Rook);
        assert!(board.get(p(0, 0)).is_none());
        assert!(board.get(p(0, 3)).is_none());
        assert!(!game.castling_rights().any(Side::One));
        assert_eq!(game.phase(), Phase::AwaitingMove(Side::Two));

        let expected = vec![
            Update::Castling {
                king_src: p(0, 3),
                king_dst: p(0, 1),
                rook_src: p(0, 0),
                rook_dst: p(0, 2),
            },
            Update::Turn { side: Side::Two },
        ];
        assert_eq!(one.take(), expected);
        assert_eq!(two.take(), expected);
    }

    #[test]
    fn castling_queenside_in_either_order() {
        let (mut game, _, _) = setup(castling_board());
        game.make_move(Side::One, p(1, 0), p(2, 0)).unwrap();
        game.castle(Side::Two, p(7, 7), p(7, 3)).unwrap();

        let board = game.board();
        assert_eq!(board.get(p(7, 5)).unwrap().kind, PieceKind::King);
        assert_eq!(board.get(p(7, 4)).unwrap().kind, PieceKind::Rook);
    }

    #[test]
    fn castling_blocked_path() {
        let (mut game, _, _) = new_game();
        assert_eq!(
            game.castle(Side::One, p(0, 3), p(0, 0)),
            Err(GameError::IllegalCastling)
        );
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn castling_wrong_squares_or_turn() {
        let (mut game, _, _) = setup(castling_board());
        assert_eq!(
            game.castle(Side::One, p(0, 3), p(0, 4)),
            Err(GameError::IllegalCastling)
        );
        assert_eq!(
            game.castle(Side::One, p(7, 3), p(7, 0)),
            Err(GameError::IllegalCastling)
        );
        assert_eq!(
            game.castle(Side::Two, p(7, 3), p(7, 0)),
            Err(GameError::IllegalTurn)
        );
    }

    #[test]
    fn castling_revoked_after_king_moves() {
        let (mut game, _, _) = setup(castling_board());
        game.make_move(Side::One, p(0, 3), p(0, 2)).unwrap();
        game.make_move(Side::Two, p(6, 0), p(5, 0)).unwrap();
        game.make_move(Side::One, p(0, 2), p(0, 3)).unwrap();
        game.make_move(Side::Two, p(5, 0), p(4, 0)).unwrap();
        assert_eq!(
            game.castle(Side::One, p(0, 3), p(0, 7)),
            Err(GameError::IllegalCastling)
        );
    }

    #[test]
    fn castling_revoked_only_for_moved_rook() {
        let (mut game, _, _) = setup(castling_board());
        game.make_move(Side::One, p(0, 0), p(0, 1)).unwrap();
        game.make_move(Side::Two, p(6, 0), p(5, 0)).unwrap();
        game.make_move(Side::One, p(0, 1), p(0, 0)).unwrap();
        game.make_move(Side::Two, p(5, 0), p(4, 0)).unwrap();
        assert_eq!(
            game.castle(Side::One, p(0, 3), p(0, 0)),
            Err(GameError::IllegalCastling)
        );
        game.castle(Side::One, p(0, 3), p(0, 7)).unwrap();
    }

    #[test]
    fn resign_ends_game() {
        let (mut game, one, two) = new_game();
        assert_eq!(game.resign(Side::One), Ok(Side::Two));
        assert_eq!(game.phase(), Phase::Done { winner: Side::Two });
        assert_eq!(one.take(), vec![Update::Done { winner: Side::Two }]);
        assert_eq!(two.take(), vec![Update::Done { winner: Side::Two }]);

        assert_eq!(
            game.make_move(Side::Two, p(6, 0), p(5, 0)),
            Err(GameError::GameOver)
        );
        assert_eq!(
            game.castle(Side::Two, p(7, 3), p(7, 0)),
            Err(GameError::GameOver)
        );
        assert_eq!(
            game.promote(Side::Two, p(6, 0), PieceKind::Queen),
            Err(GameError::GameOver)
        );
        assert_eq!(game.resign(Side::Two), Err(GameError::GameOver));
    }

    #[test]
    fn resign_allowed_out_of_turn() {
        let (mut game, _, _) = new_game();
        assert_eq!(game.resign(Side::Two), Ok(Side::One));
    }

    #[test]
    fn closed_outbox_does_not_block_the_other_seat() {
        let two = Arc::new(Recorder::default());
        let mut game = Game::new(
            GameId::new(),
            Seat::new(ClientId::new(), Arc::new(Closed)),
            Seat::new(ClientId::new(), two.clone()),
        )
        .unwrap();
        game.make_move(Side::One, p(1, 4), p(3, 4)).unwrap();
        assert_eq!(two.take().len(), 2);
        assert_eq!(game.turn(), Some(Side::Two));
    }

    #[test]
    fn listeners_observe_game_moves() {
        let (mut game, _, _) = new_game();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = game.subscribe(move |event| sink.lock().unwrap().push(event.accepted));

        game.make_move(Side::One, p(1, 4), p(3, 4)).unwrap();
        let _ = game.make_move(Side::Two, p(7, 0), p(5, 0));
        assert!(game.unsubscribe(id));
        game.make_move(Side::Two, p(6, 4), p(4, 4)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn side_lookup() {
        let (game, _, _) = new_game();
        let one = game.seat(Side::One).client;
        assert_eq!(game.side_of(one), Some(Side::One));
        assert_eq!(game.side_of(ClientId::new()), None);
    }
}
