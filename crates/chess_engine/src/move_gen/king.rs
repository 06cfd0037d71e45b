//! King move generation
//!
//! Kings move one square in any direction. Moving next to an attacked
//! square is not filtered here; the self-check filter in `legality` is only
//! consulted by the checkmate test.
//!
//! Castling is not a king move in this engine. See `rook.rs`.

use super::{generate_stepping_moves, MoveContext};
use crate::constants::KING_OFFSETS;
use crate::types::{Color, Coord};

pub fn generate_king_moves(ctx: &MoveContext<'_>, from: Coord, color: Color, moves: &mut Vec<Coord>) {
    generate_stepping_moves(ctx.board, from, color, &KING_OFFSETS, moves);
}
