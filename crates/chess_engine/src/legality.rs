//! Self-check filter and checkmate test
//!
//! A move is *legal* when it is pseudo-legal and does not leave the mover's
//! own king attacked. The filter works on a probe copy of the board, so the
//! live position is never touched.
//!
//! Note that the game session does not use this filter to gate ordinary
//! moves; it is consulted by the checkmate test and for move hints.

use crate::move_gen::{generate_for_color, is_attacked, CandidateMove, MoveContext};
use crate::types::{Color, Coord, Piece};

/// Would playing `piece` from `from` to `to` leave its own king attacked?
///
/// The move is applied to a copy of the board as a plain relocation
/// (overwrite destination, clear source). Castling destinations are probed
/// the same way, which removes the king from the probe board; a missing king
/// reads as "not in check".
pub fn leaves_king_in_check(ctx: &MoveContext<'_>, from: Coord, to: Coord, piece: Piece) -> bool {
    let mut probe = *ctx.board;
    probe.relocate(from, to, piece);

    let probe_ctx = MoveContext {
        board: &probe,
        ..*ctx
    };
    is_attacked(&probe_ctx, piece.color)
}

/// Pseudo-legal moves of `color` that keep its king safe
pub fn legal_moves_for(ctx: &MoveContext<'_>, color: Color) -> Vec<CandidateMove> {
    generate_for_color(ctx, color)
        .into_iter()
        .filter(|mv| !leaves_king_in_check(ctx, mv.from, mv.to, mv.piece))
        .collect()
}

/// Checkmate test for `color`
///
/// True when every pseudo-legal move of `color` leaves its king in check.
/// The caller decides when to ask: the session only runs it for the side
/// currently flagged in check. A side with no moves at all counts as mated.
pub fn is_checkmate(ctx: &MoveContext<'_>, color: Color) -> bool {
    generate_for_color(ctx, color)
        .into_iter()
        .all(|mv| leaves_king_in_check(ctx, mv.from, mv.to, mv.piece))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::castling::CastlingRights;
    use crate::types::{Orientation, PieceType};

    fn context<'a>(board: &'a Board, rights: &'a CastlingRights) -> MoveContext<'a> {
        MoveContext {
            board,
            orientation: Orientation::Normal,
            rights,
            in_check: None,
        }
    }

    #[test]
    fn test_pinned_piece_leaves_king_in_check() {
        let board = Board::from_rows([
            "....r...", "........", "........", "........", "........", "........", "....B...",
            "....K...",
        ])
        .unwrap();
        let rights = CastlingRights::default();
        let ctx = context(&board, &rights);
        let bishop = Piece::new(PieceType::Bishop, Color::White);

        assert!(leaves_king_in_check(&ctx, Coord::new(6, 4), Coord::new(5, 3), bishop));
        // The live board is untouched by the probe
        assert_eq!(board.get(Coord::new(6, 4)), Some(bishop));
    }

    #[test]
    fn test_capturing_the_checker_is_legal() {
        let board = Board::from_rows([
            "....k...", "........", "........", "........", "........", "........", "...q....",
            "....K...",
        ])
        .unwrap();
        let rights = CastlingRights::default();
        let ctx = context(&board, &rights);

        let legal = legal_moves_for(&ctx, Color::White);
        assert!(legal
            .iter()
            .any(|mv| mv.to == Coord::new(6, 3) && mv.piece.piece_type == PieceType::King));
        assert!(!is_checkmate(&ctx, Color::White));
    }

    #[test]
    fn test_back_rank_mate() {
        let board = Board::from_rows([
            "R.....k.", ".....ppp", "........", "........", "........", "........", "........",
            "......K.",
        ])
        .unwrap();
        let rights = CastlingRights::default();
        let ctx = context(&board, &rights);

        assert!(is_attacked(&ctx, Color::Black));
        assert!(is_checkmate(&ctx, Color::Black));
        assert!(legal_moves_for(&ctx, Color::Black).is_empty());
    }
}
