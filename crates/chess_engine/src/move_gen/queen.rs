//! Queen move generation
//!
//! The queen combines the rook's and the bishop's rays. Unlike the rook it
//! never offers a castling destination.

use super::{sliding, MoveContext};
use crate::constants::QUEEN_DIRS;
use crate::types::{Color, Coord};

pub fn generate_queen_moves(
    ctx: &MoveContext<'_>,
    from: Coord,
    color: Color,
    moves: &mut Vec<Coord>,
) {
    sliding::generate_sliding_moves(ctx.board, from, color, &QUEEN_DIRS, moves);
}
