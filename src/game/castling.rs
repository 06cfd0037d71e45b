//! Execution of the compound castle move
//!
//! Eligibility lives in the rules engine (`chess_engine::castling`); this
//! module only rearranges the board once a castle has been accepted.

use chess_engine::{Board, CastlePlan, CastlingRights, Color, Piece, PieceType};
use shared::SyncMessage;
use tracing::info;

/// Move rook and king in one step and spend the color's castling rights
///
/// Both home squares are cleared, the rook lands beside the king's home
/// square and the king two squares from it towards the rook. Returns the
/// king move and the rook move, in the order they are announced to the peer.
pub fn execute(
    board: &mut Board,
    rights: &mut CastlingRights,
    plan: &CastlePlan,
    color: Color,
) -> [SyncMessage; 2] {
    let rook = Piece::new(PieceType::Rook, color);
    let king = Piece::new(PieceType::King, color);

    board.clear(plan.rook_from);
    board.clear(plan.king_from);
    board.place(plan.rook_to, rook);
    board.place(plan.king_to, king);
    rights.record_castle(color, plan.side);

    info!("[CASTLING] {} castles {:?}", color, plan.side);

    [
        SyncMessage::Move {
            from: plan.king_from,
            to: plan.king_to,
            piece: king,
        },
        SyncMessage::Move {
            from: plan.rook_from,
            to: plan.rook_to,
            piece: rook,
        },
    ]
}
