//! Bishop move generation
//!
//! Bishops are sliding pieces that move diagonally until blocked by another
//! piece or the board edge.

use super::{sliding, MoveContext};
use crate::constants::BISHOP_DIRS;
use crate::types::{Color, Coord};

pub fn generate_bishop_moves(
    ctx: &MoveContext<'_>,
    from: Coord,
    color: Color,
    moves: &mut Vec<Coord>,
) {
    sliding::generate_sliding_moves(ctx.board, from, color, &BISHOP_DIRS, moves);
}
