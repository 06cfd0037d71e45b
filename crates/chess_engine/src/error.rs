//! Error types for chess engine
//!
//! Rule checks themselves never fail: an illegal move is simply absent from
//! the generated move list. These errors cover malformed input (squares,
//! text boards) and positions that break the one-king-per-color invariant.

use thiserror::Error;

use crate::types::Color;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Square name could not be parsed
    #[error("Invalid square: {square:?} (expected a1..h8)")]
    InvalidSquare { square: String },

    /// No king of the requested color is on the board
    #[error("No {color} king found on the board")]
    KingNotFound { color: Color },

    /// Text board has the wrong shape
    #[error("Invalid board row {row}: {reason}")]
    InvalidBoardRow { row: usize, reason: String },

    /// Text board contains an unknown piece letter
    #[error("Unknown piece symbol {symbol:?} in row {row}")]
    UnknownPieceSymbol { symbol: char, row: usize },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
