//! Movement tables and fixed board geometry
//!
//! Offsets are `(row delta, col delta)` pairs. The order of each table fixes
//! the order of generated moves, which keeps move generation deterministic.

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// Column the king starts on (in both orientations; files are never mirrored)
pub const KING_HOME_COL: i8 = 4;

/// Column of the queenside ("left") rook
pub const LEFT_ROOK_COL: i8 = 0;

/// Column of the kingside ("right") rook
pub const RIGHT_ROOK_COL: i8 = 7;

/// Knight jumps: two squares one way, one square perpendicular
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps: one square in any direction
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rook rays: up, down, left, right
pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bishop rays: up-left, up-right, down-left, down-right
pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Queen rays: orthogonal first, then diagonal
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Back rank from the queenside rook to the kingside rook
pub const BACK_RANK: &str = "rnbqkbnr";
