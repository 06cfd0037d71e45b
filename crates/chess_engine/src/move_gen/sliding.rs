//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces can move multiple squares in a direction until blocked.
//!
//! ## Algorithm
//!
//! For every direction the ray is walked one square at a time:
//! 1. Stop at the board edge
//! 2. Empty square: valid move, keep going
//! 3. Opponent piece: valid capture, then stop
//! 4. Own piece: stop without including the square

use crate::board::Board;
use crate::types::{Color, Coord};

/// Walk each direction in `dirs` from `from` and append reachable squares
///
/// # Arguments
///
/// * `board` - The position to read occupancy from
/// * `from` - Source square of the sliding piece
/// * `color` - Color of the moving piece
/// * `dirs` - `(row, col)` unit steps, one per ray
/// * `moves` - Output vector to append valid moves to
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = Vec::new();
/// generate_sliding_moves(&board, Coord::new(7, 0), Color::White, &ROOK_DIRS, &mut moves);
/// ```
pub fn generate_sliding_moves(
    board: &Board,
    from: Coord,
    color: Color,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Coord>,
) {
    for &(d_row, d_col) in dirs {
        let mut current = from.offset(d_row, d_col);

        while current.is_on_board() {
            match board.get(current) {
                None => moves.push(current),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.push(current);
                    }
                    break;
                }
            }
            current = current.offset(d_row, d_col);
        }
    }
}
