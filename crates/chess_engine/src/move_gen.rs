//! Pseudo-legal move generation
//!
//! Moves are generated per piece from a read-only [`MoveContext`]. Generated
//! moves respect movement patterns and occupancy but ignore whether the
//! mover's own king is left in check; see [`crate::legality`] for that.
//!
//! Piece types map to strategies through a closed table
//! ([`strategy_for`]), so adding a piece type is a compile error until it
//! has a generator.

mod attack;
mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;
mod sliding;


pub use attack::{is_attacked, king_square};

use crate::board::Board;
use crate::castling::CastlingRights;
use crate::types::{Color, Coord, Orientation, Piece, PieceType};

/// Everything move generation reads
///
/// The rook strategy needs castling rights and the current check flag, the
/// pawn strategy needs the orientation. Copying a context is free; the
/// what-if check in `legality` swaps in a probe board with struct update
/// syntax.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub orientation: Orientation,
    pub rights: &'a CastlingRights,
    pub in_check: Option<Color>,
}

/// One pseudo-legal move of a specific piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMove {
    pub from: Coord,
    pub to: Coord,
    pub piece: Piece,
}

/// Signature shared by every per-piece generator
pub type MoveStrategy = fn(&MoveContext<'_>, Coord, Color, &mut Vec<Coord>);

/// Dispatch table from piece type to generator
pub fn strategy_for(piece_type: PieceType) -> MoveStrategy {
    match piece_type {
        PieceType::Pawn => pawn::generate_pawn_moves,
        PieceType::Knight => knight::generate_knight_moves,
        PieceType::Bishop => bishop::generate_bishop_moves,
        PieceType::Rook => rook::generate_rook_moves,
        PieceType::Queen => queen::generate_queen_moves,
        PieceType::King => king::generate_king_moves,
    }
}

/// Destination squares for `piece` standing on `from`
///
/// The piece does not have to be on the board at `from`; only occupancy of
/// the other squares matters. An off-board `from` yields no moves.
pub fn generate(ctx: &MoveContext<'_>, from: Coord, piece: Piece) -> Vec<Coord> {
    let mut moves = Vec::with_capacity(28);
    if !from.is_on_board() {
        return moves;
    }
    strategy_for(piece.piece_type)(ctx, from, piece.color, &mut moves);
    moves
}

/// All pseudo-legal moves for every piece of `color`, in board order
pub fn generate_for_color(ctx: &MoveContext<'_>, color: Color) -> Vec<CandidateMove> {
    let mut moves = Vec::with_capacity(64);

    for (from, piece) in ctx.board.pieces_of(color) {
        moves.extend(
            generate(ctx, from, piece)
                .into_iter()
                .map(|to| CandidateMove { from, to, piece }),
        );
    }

    moves
}

/// Empty, or held by the opponent of `color`
#[inline]
fn is_open_for(board: &Board, square: Coord, color: Color) -> bool {
    square.is_on_board() && board.get(square).map_or(true, |piece| piece.color != color)
}

/// Shared logic for knights and kings: fixed offsets, no sliding
fn generate_stepping_moves(
    board: &Board,
    from: Coord,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Coord>,
) {
    for &(d_row, d_col) in offsets {
        let to = from.offset(d_row, d_col);
        if is_open_for(board, to, color) {
            moves.push(to);
        }
    }
}
