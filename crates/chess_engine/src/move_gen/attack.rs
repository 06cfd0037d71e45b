//! Attack detection and check testing
//!
//! A king is attacked when any enemy piece lists the king's square among its
//! pseudo-legal destinations. This reuses the ordinary generators rather
//! than dedicated attack tables, so the rules for "can reach" and "can move
//! to" never drift apart.

use tracing::warn;

use super::{generate, MoveContext};
use crate::board::Board;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::{Color, Coord, PieceType};

/// Square of the first king of `color` in board order
pub fn king_square(board: &Board, color: Color) -> ChessEngineResult<Coord> {
    board
        .pieces_of(color)
        .find(|(_, piece)| piece.piece_type == PieceType::King)
        .map(|(square, _)| square)
        .ok_or(ChessEngineError::KingNotFound { color })
}

/// Check if the king of `king_color` is attacked on `ctx.board`
///
/// A missing king is an anomaly rather than a failure: it is logged and
/// reported as "not attacked".
///
/// # Examples
///
/// ```rust,ignore
/// if is_attacked(&ctx, Color::White) {
///     // white is in check
/// }
/// ```
pub fn is_attacked(ctx: &MoveContext<'_>, king_color: Color) -> bool {
    let target = match king_square(ctx.board, king_color) {
        Ok(square) => square,
        Err(e) => {
            warn!("[CHECK] {}", e);
            return false;
        }
    };

    ctx.board
        .pieces_of(king_color.opponent())
        .any(|(from, piece)| generate(ctx, from, piece).contains(&target))
}
