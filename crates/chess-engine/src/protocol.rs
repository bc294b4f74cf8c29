//! Inbound commands and outbound updates exchanged with the transport layer.
//!
//! Both use a `type` tag with snake_case names on the wire, e.g.
//! `{"type":"move","piece":{"x":1,"y":1},"dst":{"x":3,"y":1}}`.

use chess_core::{PieceKind, Point, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A command sent by a client to its game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Move the piece standing on `piece` to `dst`.
    Move { piece: Point, dst: Point },
    /// Choose the kind of the pawn waiting on `piece` for promotion.
    Promote { piece: Point, kind: PieceKind },
    /// Castle the king with a rook; `src` and `dst` are their home squares
    /// in either order.
    Castling { src: Point, dst: Point },
    /// Resign the game.
    Done,
}

/// Discriminant of a [`Command`], used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Move,
    Promote,
    Castling,
    Done,
}

impl Command {
    pub const fn kind(&self) -> CommandKind {
        match self {
            Command::Move { .. } => CommandKind::Move,
            Command::Promote { .. } => CommandKind::Promote,
            Command::Castling { .. } => CommandKind::Castling,
            Command::Done => CommandKind::Done,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Move => "move",
            CommandKind::Promote => "promote",
            CommandKind::Castling => "castling",
            CommandKind::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// A state change broadcast to both seats of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    /// A piece moved from `piece` to `dst`.
    Move { piece: Point, dst: Point },
    /// `side` must now choose a promotion for the pawn on `piece`.
    Promote { side: Side, piece: Point },
    /// The pawn on `piece` became `kind`.
    Promotion { piece: Point, kind: PieceKind },
    /// King and rook were relocated by castling.
    Castling {
        king_src: Point,
        king_dst: Point,
        rook_src: Point,
        rook_dst: Point,
    },
    /// `side` is now to move.
    Turn { side: Side },
    /// The game ended; `winner` is the side still standing.
    Done { winner: Side },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_command_deserialization() {
        let json = r#"{"type":"move","piece":{"x":1,"y":1},"dst":{"x":3,"y":1}}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            Command::Move {
                piece: Point::new(1, 1),
                dst: Point::new(3, 1)
            }
        );
        assert_eq!(cmd.kind(), CommandKind::Move);
    }

    #[test]
    fn promote_and_done_commands() {
        let json = r#"{"type":"promote","piece":{"x":7,"y":0},"kind":"queen"}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.kind(), CommandKind::Promote);

        let cmd: Command = serde_json::from_str(r#"{"type":"done"}"#).unwrap();
        assert_eq!(cmd, Command::Done);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"type":"undo"}"#).is_err());
        let bad_kind = r#"{"type":"promote","piece":{"x":7,"y":0},"kind":"wizard"}"#;
        assert!(serde_json::from_str::<Command>(bad_kind).is_err());
    }

    #[test]
    fn update_serialization() {
        let json = serde_json::to_string(&Update::Turn { side: Side::Two }).unwrap();
        assert_eq!(json, r#"{"type":"turn","side":2}"#);

        let json = serde_json::to_string(&Update::Done { winner: Side::One }).unwrap();
        assert_eq!(json, r#"{"type":"done","winner":1}"#);

        let json = serde_json::to_string(&Update::Promotion {
            piece: Point::new(7, 2),
            kind: PieceKind::Knight,
        })
        .unwrap();
        assert!(json.contains(r#""type":"promotion""#));
        assert!(json.contains(r#""kind":"knight""#));
    }

    #[test]
    fn castling_update_names_both_pieces() {
        let update = Update::Castling {
            king_src: Point::new(0, 3),
            king_dst: Point::new(0, 1),
            rook_src: Point::new(0, 0),
            rook_dst: Point::new(0, 2),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "type": "castling",
                "king_src": {"x": 0, "y": 3},
                "king_dst": {"x": 0, "y": 1},
                "rook_src": {"x": 0, "y": 0},
                "rook_dst": {"x": 0, "y": 2},
            })
        );
    }

    #[test]
    fn command_kind_display() {
        assert_eq!(CommandKind::Castling.to_string(), "castling");
    }
}
