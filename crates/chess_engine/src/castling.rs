//! Castling rights and the compound castle move
//!
//! Castling is encoded as a *rook* move whose destination is the king's home
//! square. When that move is played the rook lands next to the king's home
//! square and the king jumps two squares towards the rook's side.
//!
//! ## Rights
//!
//! Each color tracks whether its left rook, right rook and king have ever
//! left their home squares. Flags are monotonic. Eligibility is decided on
//! the union of *both* colors' flags: once any rook or king on either side
//! has moved, nobody may castle for the rest of the game.

use tracing::debug;

use crate::constants::{KING_HOME_COL, LEFT_ROOK_COL, RIGHT_ROOK_COL};
use crate::move_gen::MoveContext;
use crate::types::{Color, Coord, Orientation, Piece, PieceType};

/// Movement flags for one color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideRights {
    pub rook_left_moved: bool,
    pub rook_right_moved: bool,
    pub king_moved: bool,
}

impl SideRights {
    pub fn any_moved(&self) -> bool {
        self.rook_left_moved || self.rook_right_moved || self.king_moved
    }
}

/// Movement flags for both colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    white: SideRights,
    black: SideRights,
}

impl CastlingRights {
    pub fn side(&self, color: Color) -> &SideRights {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut SideRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// True once any of the six flags is set
    pub fn any_moved(&self) -> bool {
        self.white.any_moved() || self.black.any_moved()
    }

    /// Record a rook or king leaving `from`
    ///
    /// Flags are keyed by the home row the square sits on, not by the moving
    /// piece's color. Non-home squares and other piece types are ignored.
    pub fn record_departure(&mut self, from: Coord, piece: Piece, orientation: Orientation) {
        for color in [Color::White, Color::Black] {
            if from.row != orientation.home_row(color) {
                continue;
            }
            let side = self.side_mut(color);
            match (piece.piece_type, from.col) {
                (PieceType::Rook, LEFT_ROOK_COL) => side.rook_left_moved = true,
                (PieceType::Rook, RIGHT_ROOK_COL) => side.rook_right_moved = true,
                (PieceType::King, KING_HOME_COL) => side.king_moved = true,
                _ => {}
            }
        }
    }

    /// Record a completed castle: the king and the castling rook have moved
    pub fn record_castle(&mut self, color: Color, side: CastleSide) {
        let rights = self.side_mut(color);
        rights.king_moved = true;
        match side {
            CastleSide::Queenside => rights.rook_left_moved = true,
            CastleSide::Kingside => rights.rook_right_moved = true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Rook on col 0, king ends on col 2
    Queenside,
    /// Rook on col 7, king ends on col 6
    Kingside,
}

impl CastleSide {
    fn for_rook_col(col: i8) -> Option<CastleSide> {
        match col {
            LEFT_ROOK_COL => Some(CastleSide::Queenside),
            RIGHT_ROOK_COL => Some(CastleSide::Kingside),
            _ => None,
        }
    }

    /// Column step from the king towards the rook
    pub fn direction(self) -> i8 {
        match self {
            CastleSide::Queenside => -1,
            CastleSide::Kingside => 1,
        }
    }

    pub fn rook_col(self) -> i8 {
        match self {
            CastleSide::Queenside => LEFT_ROOK_COL,
            CastleSide::Kingside => RIGHT_ROOK_COL,
        }
    }
}

/// Squares touched by one castle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePlan {
    pub side: CastleSide,
    pub rook_from: Coord,
    pub rook_to: Coord,
    pub king_from: Coord,
    pub king_to: Coord,
}

impl CastlePlan {
    /// Plan for the rook standing on `rook_from` (col 0 or 7)
    pub fn for_rook(rook_from: Coord) -> Option<CastlePlan> {
        let side = CastleSide::for_rook_col(rook_from.col)?;
        Some(Self::build(rook_from.row, side))
    }

    /// Recognize the king half of a castle (`col 4 -> col 4 ± 2` on one row)
    pub fn from_king_move(from: Coord, to: Coord) -> Option<CastlePlan> {
        if from.row != to.row || from.col != KING_HOME_COL || !from.is_on_board() {
            return None;
        }
        let side = match to.col - from.col {
            -2 => CastleSide::Queenside,
            2 => CastleSide::Kingside,
            _ => return None,
        };
        Some(Self::build(from.row, side))
    }

    fn build(row: i8, side: CastleSide) -> CastlePlan {
        let dir = side.direction();
        CastlePlan {
            side,
            rook_from: Coord::new(row, side.rook_col()),
            rook_to: Coord::new(row, KING_HOME_COL + dir),
            king_from: Coord::new(row, KING_HOME_COL),
            king_to: Coord::new(row, KING_HOME_COL + 2 * dir),
        }
    }
}

/// Castling eligibility for the rook on `rook_from`
///
/// Returns the king's home square on the rook's row (the nominal rook
/// destination that triggers the castle), or `None` when:
/// - any rook or king of *either* color has moved,
/// - the rook is not on col 0 or col 7,
/// - a square between rook and king is occupied,
/// - `color` is the side currently flagged in check.
pub fn can_castle(ctx: &MoveContext<'_>, rook_from: Coord, color: Color) -> Option<Coord> {
    if ctx.rights.any_moved() {
        debug!("[CASTLING] Rights spent, no castling for {}", color);
        return None;
    }

    let side = CastleSide::for_rook_col(rook_from.col)?;
    let between = match side {
        CastleSide::Queenside => (LEFT_ROOK_COL + 1)..KING_HOME_COL,
        CastleSide::Kingside => (KING_HOME_COL + 1)..RIGHT_ROOK_COL,
    };
    if between
        .map(|col| Coord::new(rook_from.row, col))
        .any(|square| !ctx.board.is_empty(square))
    {
        return None;
    }

    if ctx.in_check == Some(color) {
        debug!("[CASTLING] {} is in check, no castling", color);
        return None;
    }

    Some(Coord::new(rook_from.row, KING_HOME_COL))
}
