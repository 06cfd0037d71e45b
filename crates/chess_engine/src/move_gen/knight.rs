//! Knight move generation
//!
//! Knights move in an L-shape pattern: 2 squares in one direction, then
//! 1 square perpendicular (or vice versa).
//!
//! ## Knight Movement Rules
//!
//! - Knights can jump over pieces (unlike sliding pieces)
//! - 8 possible destinations from most squares (fewer near edges)
//! - Cannot move to squares occupied by own pieces
//! - Can capture opponent pieces on destination squares

use super::{generate_stepping_moves, MoveContext};
use crate::constants::KNIGHT_OFFSETS;
use crate::types::{Color, Coord};

/// Generate knight moves from a given square
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = Vec::new();
/// generate_knight_moves(&ctx, Coord::new(7, 1), Color::White, &mut moves);
/// // Moves now contains a3 and c3 from the starting position
/// ```
pub fn generate_knight_moves(
    ctx: &MoveContext<'_>,
    from: Coord,
    color: Color,
    moves: &mut Vec<Coord>,
) {
    generate_stepping_moves(ctx.board, from, color, &KNIGHT_OFFSETS, moves);
}
