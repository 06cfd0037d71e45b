//! Core value types shared by every part of the engine
//!
//! ## Coordinates
//!
//! Squares are addressed as `(row, col)` with both components in `0..8`.
//! Row 0 is the far rank as seen by the player whose board is *not*
//! inverted (the host). Coordinates are stored as `i8` so that offset
//! arithmetic can step off the board and be rejected with
//! [`Coord::is_on_board`] instead of wrapping.
//!
//! ## Orientation
//!
//! The guest draws its board upside-down relative to the host. Rather than
//! translating at the rendering layer, the guest keeps its whole board in the
//! mirrored frame, so rules that depend on "forward" (pawn direction, start
//! row, home row) consult the [`Orientation`]. Files are never mirrored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChessEngineError, ChessEngineResult};

/// Side to move / owner of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// Lowercase letter used by the text board (`p`, `r`, `n`, `b`, `q`, `k`)
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    fn from_letter(letter: char) -> Option<PieceType> {
        match letter {
            'p' => Some(PieceType::Pawn),
            'r' => Some(PieceType::Rook),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A piece is nothing more than its type and color
///
/// Pieces carry no identity: moving or capturing reassigns the whole value
/// to the destination square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Text-board symbol: uppercase for white, lowercase for black
    pub fn symbol(self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    /// Inverse of [`Piece::symbol`]
    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let piece_type = PieceType::from_letter(symbol.to_ascii_lowercase())?;
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(piece_type, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.color, self.piece_type)
    }
}

/// Board square `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Coord { row, col }
    }

    #[inline]
    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// Step by a `(row, col)` delta; the result may be off the board
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Coord {
        Coord::new(
            self.row.saturating_add(d_row),
            self.col.saturating_add(d_col),
        )
    }

    /// Row mirror `row' = 7 - row`, used to translate between the host frame
    /// and the guest's inverted frame. Applying it twice is the identity.
    #[inline]
    pub fn mirrored(self) -> Coord {
        Coord::new(7i8.saturating_sub(self.row), self.col)
    }

    /// Parse an algebraic square such as `e4` into this orientation's frame
    pub fn parse_algebraic(text: &str, orientation: Orientation) -> ChessEngineResult<Coord> {
        let invalid = || ChessEngineError::InvalidSquare {
            square: text.to_string(),
        };

        let mut chars = text.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }

        let col = (file as u8 - b'a') as i8;
        let rank = (rank as u8 - b'0') as i8;
        let row = match orientation {
            Orientation::Normal => 8 - rank,
            Orientation::Inverted => rank - 1,
        };
        Ok(Coord::new(row, col))
    }

    /// Algebraic name of this square in the given frame, `None` when off the board
    pub fn to_algebraic(self, orientation: Orientation) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        let rank = match orientation {
            Orientation::Normal => 8 - self.row,
            Orientation::Inverted => self.row + 1,
        };
        let file = (b'a' + self.col as u8) as char;
        Some(format!("{file}{rank}"))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which frame a board is stored in
///
/// The host (and any local game) uses [`Orientation::Normal`]: black starts
/// on rows 0-1, white on rows 6-7. The guest uses [`Orientation::Inverted`],
/// the same position mirrored by rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Normal,
    Inverted,
}

impl Orientation {
    pub fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Orientation::Inverted
        } else {
            Orientation::Normal
        }
    }

    #[inline]
    pub fn is_inverted(self) -> bool {
        self == Orientation::Inverted
    }

    /// Back rank a color starts on
    pub fn home_row(self, color: Color) -> i8 {
        match (self, color) {
            (Orientation::Normal, Color::White) | (Orientation::Inverted, Color::Black) => 7,
            (Orientation::Normal, Color::Black) | (Orientation::Inverted, Color::White) => 0,
        }
    }

    /// Row a color's pawns start on (the only row allowed a double step)
    pub fn pawn_start_row(self, color: Color) -> i8 {
        match (self, color) {
            (Orientation::Normal, Color::White) | (Orientation::Inverted, Color::Black) => 6,
            (Orientation::Normal, Color::Black) | (Orientation::Inverted, Color::White) => 1,
        }
    }

    /// Row delta of a single pawn step for a color
    pub fn pawn_direction(self, color: Color) -> i8 {
        match (self, color) {
            (Orientation::Normal, Color::White) | (Orientation::Inverted, Color::Black) => -1,
            (Orientation::Normal, Color::Black) | (Orientation::Inverted, Color::White) => 1,
        }
    }
}
