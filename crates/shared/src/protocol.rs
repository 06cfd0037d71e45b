//! Peer synchronization messages and their JSON framing
//!
//! Every frame is one JSON object with a `type` tag and a `payload`:
//!
//! ```text
//! {"type":"move","payload":{"from":{"row":6,"col":5},"to":{"row":5,"col":5},"piece":{"type":"pawn","color":"white"}}}
//! {"type":"turn","payload":{"player":"black"}}
//! ```
//!
//! Coordinates on the wire are always in the host's frame. There is no
//! version field; a frame whose `type` is not recognized decodes to `None`
//! and is skipped by the receiver.

use chess_engine::{Color, Coord, Piece};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Messages exchanged between the two peers
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum SyncMessage {
    /// A single piece relocation
    Move { from: Coord, to: Coord, piece: Piece },
    /// Authoritative turn-owner update
    Turn { player: Color },
    /// Compound castling notification: the rook's move onto the king's home square
    Castle { from: Coord, to: Coord, piece: Piece },
}

impl SyncMessage {
    /// The `type` tag used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            SyncMessage::Move { .. } => "move",
            SyncMessage::Turn { .. } => "turn",
            SyncMessage::Castle { .. } => "castle",
        }
    }

    /// Same message with every coordinate row-mirrored (`7 - row`)
    pub fn mirrored(self) -> SyncMessage {
        match self {
            SyncMessage::Move { from, to, piece } => SyncMessage::Move {
                from: from.mirrored(),
                to: to.mirrored(),
                piece,
            },
            SyncMessage::Castle { from, to, piece } => SyncMessage::Castle {
                from: from.mirrored(),
                to: to.mirrored(),
                piece,
            },
            turn @ SyncMessage::Turn { .. } => turn,
        }
    }
}

const KNOWN_KINDS: [&str; 3] = ["move", "turn", "castle"];

/// Only the tag, so unknown message types can be told apart from broken ones
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

/// Errors from the frame codec
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Failed to encode {kind} message: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Serialize a message to a single-line JSON frame (without the trailing newline)
pub fn encode_frame(message: &SyncMessage) -> ProtocolResult<String> {
    serde_json::to_string(message).map_err(|source| ProtocolError::Encode {
        kind: message.kind(),
        source,
    })
}

/// Parse one frame
///
/// Returns `Ok(None)` for a well-formed frame of an unknown type, and an
/// error when the frame is not JSON, has no `type`, or a known type carries
/// a bad payload.
pub fn decode_frame(frame: &str) -> ProtocolResult<Option<SyncMessage>> {
    let envelope: Envelope = serde_json::from_str(frame)?;
    if !KNOWN_KINDS.contains(&envelope.kind.as_str()) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(frame)?))
}
