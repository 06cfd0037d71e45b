//! Chess rules engine for two-player peer games
//!
//! Pure game logic: board representation, pseudo-legal move generation,
//! check detection, the self-check filter used by the checkmate test, and
//! castling eligibility. Nothing in this crate performs I/O; session state
//! and networking live in the `peerchess` crate.
//!
//! ## Module Organization
//!
//! - `types` - Coordinates, colors, pieces and board orientation
//! - `board` - The 8x8 grid and its text form
//! - `constants` - Offset and direction tables
//! - `castling` - Castling rights and the compound castle plan
//! - `move_gen` - Per-piece pseudo-legal move generation and attack detection
//! - `legality` - Self-check filter and checkmate test

pub mod board;
pub mod castling;
pub mod constants;
pub mod error;
pub mod legality;
pub mod move_gen;
pub mod types;

pub use board::Board;
pub use castling::{CastlePlan, CastleSide, CastlingRights};
pub use error::{ChessEngineError, ChessEngineResult};
pub use move_gen::{generate, CandidateMove, MoveContext};
pub use types::{Color, Coord, Orientation, Piece, PieceType};
