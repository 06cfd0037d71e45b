//! Two-player chess over a direct peer link
//!
//! Each peer runs its own [`game::GameSession`] and keeps it consistent
//! with the other side by exchanging move, turn and castle messages. The
//! rules live in the `chess_engine` crate, the wire format in `shared`.

pub mod core;
pub mod game;
pub mod networking;
pub mod terminal;
