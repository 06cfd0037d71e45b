//! Error types for game module
//!
//! A rejected move is not a failure of the program: the board is left
//! untouched and the reason is logged. [`MoveRejection`] names the reason so
//! callers that care (tests, the terminal driver) can report it.

use chess_engine::{Color, Coord, Piece};

/// Why a move attempt was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    /// Networked game and the piece belongs to the other peer
    #[error("This peer plays {owned}, not {attempted}")]
    NotYourPiece { owned: Color, attempted: Color },

    /// The game has ended (checkmate or closed session)
    #[error("The game is finished")]
    GameFinished,

    /// Checkmate was detected for the side about to move
    #[error("{color} is checkmated")]
    Checkmate { color: Color },

    /// The piece's color is not the side to move
    #[error("It is {current}'s turn")]
    NotYourTurn { current: Color },

    /// The claimed piece is not what stands on the source square
    #[error("No {piece} on {from}")]
    SourceMismatch { from: Coord, piece: Piece },

    /// The destination is not among the piece's generated moves
    #[error("{piece} cannot move from {from} to {to}")]
    IllegalDestination { from: Coord, to: Coord, piece: Piece },
}

/// Result type alias for move attempts
pub type MoveResult<T> = Result<T, MoveRejection>;
