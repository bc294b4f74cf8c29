//! Registry of connected clients and the games they play.
//!
//! The hub binds each client to at most one [`Game`]. Its own lock only
//! guards the registry maps; every game sits behind a separate mutex so
//! commands for one match never wait on another.

use crate::{Board, ClientId, Command, Dispatcher, Game, GameError, GameId, Outbox, Seat};
use chess_core::{Point, Side};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

struct ClientEntry {
    outbox: Arc<dyn Outbox>,
    game: Option<GameId>,
}

#[derive(Default)]
struct HubState {
    clients: HashMap<ClientId, ClientEntry>,
    games: HashMap<GameId, Arc<Mutex<Game>>>,
}

/// Client and match registry shared by every connection.
pub struct Hub {
    state: Mutex<HubState>,
    dispatcher: Dispatcher,
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(Dispatcher::standard())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Hub {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Hub {
            state: Mutex::new(HubState::default()),
            dispatcher,
        }
    }

    /// Adds a client that receives its updates through `outbox`.
    pub fn register(&self, outbox: Arc<dyn Outbox>) -> ClientId {
        let id = ClientId::new();
        lock(&self.state)
            .clients
            .insert(id, ClientEntry { outbox, game: None });
        info!(client_id = %id, "Client registered");
        id
    }

    /// Removes a client, forfeiting its game if it is playing one.
    pub fn unregister(&self, client: ClientId) -> Result<(), GameError> {
        let game = {
            let mut state = lock(&self.state);
            let entry = state.clients.remove(&client).ok_or(GameError::ClientNotFound)?;
            entry.game.and_then(|id| state.games.get(&id).cloned())
        };
        info!(client_id = %client, "Client unregistered");

        if let Some(game) = game {
            let finished = {
                let mut game = lock(&game);
                if let Some(side) = game.side_of(client) {
                    if !game.is_done() {
                        game.resign(side)?;
                    }
                }
                game.id()
            };
            self.finish(finished);
        }
        Ok(())
    }

    /// Seats `one` and `two` in a new game; `one` moves first.
    pub fn start_game(&self, one: ClientId, two: ClientId) -> Result<GameId, GameError> {
        let mut state = lock(&self.state);
        let seat = |id: ClientId| match state.clients.get(&id) {
            Some(entry) if entry.game.is_none() => Ok(Seat::new(id, entry.outbox.clone())),
            _ => Err(GameError::ClientInvalid),
        };
        let seats = (seat(one)?, seat(two)?);

        let id = GameId::new();
        let game = Game::new(id, seats.0, seats.1)?;
        game.announce();

        for client in [one, two] {
            if let Some(entry) = state.clients.get_mut(&client) {
                entry.game = Some(id);
            }
        }
        state.games.insert(id, Arc::new(Mutex::new(game)));
        Ok(id)
    }

    /// Runs `command` on behalf of `client` in its current game.
    ///
    /// A command that ends the game releases both clients.
    pub fn execute(&self, client: ClientId, command: Command) -> Result<(), GameError> {
        let game = self.game_handle(client)?;
        let finished = {
            let mut game = lock(&game);
            let side = game.side_of(client).ok_or(GameError::GameNotFound)?;
            debug!(client_id = %client, %side, kind = %command.kind(), "Executing command");
            self.dispatcher.dispatch(&mut game, side, &command)?;
            game.is_done().then(|| game.id())
        };

        if let Some(id) = finished {
            self.finish(id);
        }
        Ok(())
    }

    /// Squares the piece on `point` may move to in `client`'s game.
    pub fn legal_destinations(&self, client: ClientId, point: Point) -> Result<Vec<Point>, GameError> {
        let game = self.game_handle(client)?;
        let game = lock(&game);
        Ok(game.legal_destinations(point))
    }

    /// Snapshot of the board in `client`'s game.
    pub fn board(&self, client: ClientId) -> Result<Board, GameError> {
        let game = self.game_handle(client)?;
        let game = lock(&game);
        Ok(game.board().clone())
    }

    /// The side `client` plays and the side to act, in that order.
    pub fn sides(&self, client: ClientId) -> Result<(Side, Option<Side>), GameError> {
        let game = self.game_handle(client)?;
        let game = lock(&game);
        let side = game.side_of(client).ok_or(GameError::GameNotFound)?;
        Ok((side, game.turn()))
    }

    pub fn game_of(&self, client: ClientId) -> Option<GameId> {
        lock(&self.state).clients.get(&client).and_then(|e| e.game)
    }

    pub fn is_registered(&self, client: ClientId) -> bool {
        lock(&self.state).clients.contains_key(&client)
    }

    /// True if `client` is registered and not bound to a game.
    pub fn is_free(&self, client: ClientId) -> bool {
        lock(&self.state)
            .clients
            .get(&client)
            .is_some_and(|e| e.game.is_none())
    }

    /// Every registered client not bound to a game.
    pub fn free_clients(&self) -> Vec<ClientId> {
        lock(&self.state)
            .clients
            .iter()
            .filter(|(_, e)| e.game.is_none())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn game_count(&self) -> usize {
        lock(&self.state).games.len()
    }

    fn game_handle(&self, client: ClientId) -> Result<Arc<Mutex<Game>>, GameError> {
        let state = lock(&self.state);
        let entry = state.clients.get(&client).ok_or(GameError::ClientNotFound)?;
        let id = entry.game.ok_or(GameError::GameNotFound)?;
        state.games.get(&id).cloned().ok_or(GameError::GameNotFound)
    }

    fn finish(&self, id: GameId) {
        let mut state = lock(&self.state);
        if state.games.remove(&id).is_none() {
            return;
        }
        for entry in state.clients.values_mut() {
            if entry.game == Some(id) {
                entry.game = None;
            }
        }
        info!(game_id = %id, "Game closed");
    }
}
