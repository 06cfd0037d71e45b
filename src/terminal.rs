//! Text front end helpers for the `peerchess` binary
//!
//! Moves are typed as two algebraic squares (`e2 e4` or `e2e4`) read in the
//! local board's frame, so the guest types the same square names as the
//! host even though its rows are stored mirrored.

use std::fmt::Write as _;

use chess_engine::{ChessEngineError, ChessEngineResult, Coord, Orientation};

use crate::game::GameSession;
use crate::networking::{MessageSink, SyncChannel};

/// What a line of input did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Moved,
    Rejected(String),
    Ignored,
}

/// Parse `"e2 e4"` or `"e2e4"` into a `(from, to)` pair in `orientation`'s frame
pub fn parse_move_command(line: &str, orientation: Orientation) -> ChessEngineResult<(Coord, Coord)> {
    let compact: String = line.split_whitespace().collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(ChessEngineError::InvalidSquare {
            square: line.trim().to_string(),
        });
    }

    let from = Coord::parse_algebraic(&compact[..2], orientation)?;
    let to = Coord::parse_algebraic(&compact[2..], orientation)?;
    Ok((from, to))
}

/// Interpret one line typed by the local player
pub fn apply_input<S: MessageSink>(channel: &mut SyncChannel<S>, line: &str) -> InputAction {
    let line = line.trim();
    match line {
        "" => return InputAction::Ignored,
        "quit" | "exit" | "resign" => return InputAction::Quit,
        _ => {}
    }

    let orientation = channel.session().orientation();
    let (from, to) = match parse_move_command(line, orientation) {
        Ok(squares) => squares,
        Err(e) => return InputAction::Rejected(e.to_string()),
    };

    let Some(piece) = channel.session().board().get(from) else {
        let name = from.to_algebraic(orientation).unwrap_or_default();
        return InputAction::Rejected(format!("No piece on {name}"));
    };

    match channel.try_local_move(from, to, piece) {
        Ok(_) => InputAction::Moved,
        Err(rejection) => InputAction::Rejected(rejection.to_string()),
    }
}

/// Board with rank and file labels plus a status line
pub fn render_board(session: &GameSession) -> String {
    let orientation = session.orientation();
    let board = session.board().to_string();
    let mut out = String::new();

    for (row, line) in board.lines().enumerate() {
        let rank = Coord::new(row as i8, 0)
            .to_algebraic(orientation)
            .and_then(|name| name.chars().nth(1))
            .unwrap_or('?');
        let squares: Vec<String> = line.chars().map(String::from).collect();
        let _ = writeln!(out, "{rank} {}", squares.join(" "));
    }
    out.push_str("  a b c d e f g h\n");

    let status = if session.is_checkmate() {
        format!("Checkmate, {} wins", session.current_player().opponent())
    } else if session.is_finished() {
        "Game over".to_string()
    } else if session.in_check() == Some(session.current_player()) {
        format!("{} to move (in check)", session.current_player())
    } else {
        format!("{} to move", session.current_player())
    };
    out.push_str(&status);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SessionConfig;
    use crate::networking::NullSink;

    #[test]
    fn test_parse_move_command_forms() {
        let expected = (Coord::new(6, 4), Coord::new(4, 4));
        assert_eq!(parse_move_command("e2 e4", Orientation::Normal), Ok(expected));
        assert_eq!(parse_move_command("  e2e4 ", Orientation::Normal), Ok(expected));
        assert_eq!(
            parse_move_command("e2 e4", Orientation::Inverted),
            Ok((Coord::new(1, 4), Coord::new(3, 4)))
        );
        assert!(parse_move_command("e2", Orientation::Normal).is_err());
        assert!(parse_move_command("e2 e9", Orientation::Normal).is_err());
        assert!(parse_move_command("é2e4", Orientation::Normal).is_err());
    }

    #[test]
    fn test_apply_input_moves_and_rejects() {
        let mut channel = SyncChannel::new(SessionConfig::local(), NullSink);

        assert_eq!(apply_input(&mut channel, "e2 e4"), InputAction::Moved);
        assert!(matches!(apply_input(&mut channel, "e4 e5"), InputAction::Rejected(_)));
        assert!(matches!(apply_input(&mut channel, "e3 e4"), InputAction::Rejected(_)));
        assert_eq!(apply_input(&mut channel, ""), InputAction::Ignored);
        assert_eq!(apply_input(&mut channel, "quit"), InputAction::Quit);
    }

    #[test]
    fn test_render_board_labels_follow_orientation() {
        let host = GameSession::new(SessionConfig::host());
        let rendered = render_board(&host);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("8 r n b q k b n r"));
        assert_eq!(lines.nth(6), Some("1 R N B Q K B N R"));
        assert!(rendered.ends_with("white to move"));

        let guest = GameSession::new(SessionConfig::guest());
        let rendered = render_board(&guest);
        assert_eq!(rendered.lines().next(), Some("1 R N B Q K B N R"));
    }
}
