//! Types shared by both peers of a game
//!
//! Everything that crosses the wire lives here so that the host and the
//! guest agree on one message format.

pub mod protocol;

pub use protocol::{decode_frame, encode_frame, ProtocolError, ProtocolResult, SyncMessage};
