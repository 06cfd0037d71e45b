//! Pawn move generation
//!
//! Handles pawn-specific move generation:
//! - Single and double forward pushes
//! - Diagonal captures
//!
//! En passant and promotion are not part of this rule set.
//!
//! ## Direction
//!
//! "Forward" depends on both the pawn's color and the board
//! [`Orientation`](crate::types::Orientation). On the guest's inverted
//! board white pawns walk towards higher rows and start on row 1.

use super::MoveContext;
use crate::types::{Color, Coord};

/// Generate pawn moves from a given square
///
/// - Single push: the square ahead must be empty
/// - Double push: only from the start row, both squares ahead empty
/// - Capture: one step ahead diagonally, onto an opponent piece only
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = Vec::new();
/// generate_pawn_moves(&ctx, Coord::new(6, 4), Color::White, &mut moves);
/// // Moves now contains e3 and e4
/// ```
pub fn generate_pawn_moves(ctx: &MoveContext<'_>, from: Coord, color: Color, moves: &mut Vec<Coord>) {
    let board = ctx.board;
    let direction = ctx.orientation.pawn_direction(color);
    let start_row = ctx.orientation.pawn_start_row(color);

    let single = from.offset(direction, 0);
    if board.is_empty(single) {
        moves.push(single);

        let double = from.offset(2 * direction, 0);
        if from.row == start_row && board.is_empty(double) {
            moves.push(double);
        }
    }

    for d_col in [-1, 1] {
        let target = from.offset(direction, d_col);
        if let Some(occupant) = board.get(target) {
            if occupant.color != color {
                moves.push(target);
            }
        }
    }
}
