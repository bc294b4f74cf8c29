//! Routing of client commands to game operations.

use crate::{Command, CommandKind, Game, GameError};
use chess_core::Side;
use std::collections::HashMap;
use std::fmt;

/// A game operation bound to one command kind.
pub type Handler = fn(&mut Game, Side, &Command) -> Result<(), GameError>;

/// Table mapping each command kind to its handler.
///
/// The table is fixed once built; commands whose kind has no entry are
/// rejected with [`GameError::UnknownCommand`].
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<CommandKind, Handler>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl Dispatcher {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `kind` to `handler`, replacing any previous binding.
    pub fn register(&mut self, kind: CommandKind, handler: Handler) -> &mut Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// The table used by every game: move, promote, castling and done.
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        dispatcher
            .register(CommandKind::Move, handle_move)
            .register(CommandKind::Promote, handle_promote)
            .register(CommandKind::Castling, handle_castling)
            .register(CommandKind::Done, handle_done);
        dispatcher
    }

    /// Runs `command` for `side` against `game`.
    pub fn dispatch(&self, game: &mut Game, side: Side, command: &Command) -> Result<(), GameError> {
        let kind = command.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(GameError::UnknownCommand(kind))?;
        handler(game, side, command)
    }
}

fn handle_move(game: &mut Game, side: Side, command: &Command) -> Result<(), GameError> {
    match *command {
        Command::Move { piece, dst } => game.make_move(side, piece, dst),
        other => Err(GameError::UnknownCommand(other.kind())),
    }
}

fn handle_promote(game: &mut Game, side: Side, command: &Command) -> Result<(), GameError> {
    match *command {
        Command::Promote { piece, kind } => game.promote(side, piece, kind),
        other => Err(GameError::UnknownCommand(other.kind())),
    }
}

fn handle_castling(game: &mut Game, side: Side, command: &Command) -> Result<(), GameError> {
    match *command {
        Command::Castling { src, dst } => game.castle(side, src, dst),
        other => Err(GameError::UnknownCommand(other.kind())),
    }
}

fn handle_done(game: &mut Game, side: Side, _: &Command) -> Result<(), GameError> {
    game.resign(side).map(|_| ())
}
