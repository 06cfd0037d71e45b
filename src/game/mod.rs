//! Game session: turn ownership, check tracking and castling execution
//!
//! The rules themselves live in the `chess_engine` crate. This module wraps
//! them in the state machine both peers run.
//!
//! # Module Organization
//!
//! - `session` - [`GameSession`], the single entry point for move attempts
//! - `castling` - Board rearrangement for an accepted castle
//! - `error` - [`MoveRejection`] reasons

pub mod castling;
pub mod error;
pub mod session;


pub use error::{MoveRejection, MoveResult};
pub use session::{GameMode, GamePhase, GameSession, MoveOutcome, Role, SessionConfig};
