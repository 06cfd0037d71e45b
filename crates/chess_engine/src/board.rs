//! Board representation
//!
//! The board is a fixed 8x8 grid of `Option<Piece>`. It is `Copy`, so a
//! what-if position for check testing is a plain value copy of the grid.
//!
//! The text form is eight lines of eight symbols, row 0 first, using
//! uppercase letters for white, lowercase for black and `.` for empty.

use std::fmt;

use crate::constants::{BACK_RANK, BOARD_SIZE};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::{Color, Coord, Orientation, Piece, PieceType};

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Board with no pieces
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting position in the given frame
    pub fn standard(orientation: Orientation) -> Self {
        let mut board = Board::empty();

        for color in [Color::White, Color::Black] {
            let home = orientation.home_row(color);
            let pawns = orientation.pawn_start_row(color);

            for (col, letter) in BACK_RANK.chars().enumerate() {
                if let Some(piece) = Piece::from_symbol(letter) {
                    board.place(Coord::new(home, col as i8), Piece::new(piece.piece_type, color));
                }
                board.place(
                    Coord::new(pawns, col as i8),
                    Piece::new(PieceType::Pawn, color),
                );
            }
        }

        board
    }

    /// Parse the text form (row 0 first)
    pub fn from_rows(rows: [&str; 8]) -> ChessEngineResult<Self> {
        let mut board = Board::empty();

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE as usize {
                return Err(ChessEngineError::InvalidBoardRow {
                    row,
                    reason: format!("expected 8 squares, found {}", symbols.len()),
                });
            }

            for (col, symbol) in symbols.into_iter().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let piece = Piece::from_symbol(symbol)
                    .ok_or(ChessEngineError::UnknownPieceSymbol { symbol, row })?;
                board.place(Coord::new(row as i8, col as i8), piece);
            }
        }

        Ok(board)
    }

    /// Piece on a square; `None` for empty or off-board squares
    #[inline]
    pub fn get(&self, square: Coord) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.squares[square.row as usize][square.col as usize]
    }

    /// On the board and unoccupied
    #[inline]
    pub fn is_empty(&self, square: Coord) -> bool {
        square.is_on_board() && self.get(square).is_none()
    }

    /// Put a piece on a square, replacing any occupant. Off-board squares are ignored.
    pub fn place(&mut self, square: Coord, piece: Piece) {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize] = Some(piece);
        }
    }

    /// Empty a square. Off-board squares are ignored.
    pub fn clear(&mut self, square: Coord) {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize] = None;
        }
    }

    /// Overwrite the destination with `piece` and clear the source
    pub fn relocate(&mut self, from: Coord, to: Coord, piece: Piece) {
        self.place(to, piece);
        self.clear(from);
    }

    /// All occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, line)| {
            line.iter().enumerate().filter_map(move |(col, square)| {
                square.map(|piece| (Coord::new(row as i8, col as i8), piece))
            })
        })
    }

    /// Occupied squares of one color in row-major order
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// The same position in the opposite frame (rows mirrored)
    pub fn mirrored(&self) -> Board {
        let mut board = Board::empty();
        for (square, piece) in self.pieces() {
            board.place(square.mirrored(), piece);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard(Orientation::Normal)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.squares.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for square in line {
                let symbol = square.map_or('.', Piece::symbol);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        writeln!(f, "{self}")?;
        write!(f, "}}")
    }
}
