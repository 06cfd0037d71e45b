//! Peer-to-peer synchronization
//!
//! - `sync` - [`SyncChannel`], translating between session actions and messages
//! - `sink` - Outbound [`MessageSink`]s (in-memory, crossbeam, null)
//! - `link` - Newline-delimited JSON over TCP

pub mod link;
pub mod sink;
pub mod sync;

pub use link::{LinkEvent, LinkSink, PeerLink};
pub use sink::{ChannelSink, MessageSink, NullSink, TransportError, TransportResult};
pub use sync::SyncChannel;
