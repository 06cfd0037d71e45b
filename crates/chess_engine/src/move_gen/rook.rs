//! Rook move generation
//!
//! Handles rook-specific move generation. Rooks are sliding pieces that move
//! horizontally and vertically until blocked by another piece or the board edge.
//!
//! ## Castling
//!
//! Castling is generated here, not in the king generator: when the rook is
//! eligible, the king's home square on the rook's row is appended as an
//! extra destination. Playing that move triggers the compound castle.

use super::{sliding, MoveContext};
use crate::castling::can_castle;
use crate::constants::ROOK_DIRS;
use crate::types::{Color, Coord};

/// Generate rook moves from a given square
///
/// # Arguments
///
/// * `ctx` - Board, orientation, castling rights and check flag
/// * `from` - Source square of the rook
/// * `color` - Color of the rook
/// * `moves` - Output vector to append valid moves to
pub fn generate_rook_moves(ctx: &MoveContext<'_>, from: Coord, color: Color, moves: &mut Vec<Coord>) {
    sliding::generate_sliding_moves(ctx.board, from, color, &ROOK_DIRS, moves);

    if let Some(castle_target) = can_castle(ctx, from, color) {
        moves.push(castle_target);
    }
}
