//! Outbound message sinks
//!
//! A [`MessageSink`] is the sending half of the reliable ordered peer
//! channel. Sends are fire-and-forget: a failure is reported once to the
//! caller and never retried.

use crossbeam_channel::{Receiver, Sender};
use shared::{encode_frame, ProtocolError, SyncMessage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// The other end of the channel is gone
    #[error("Peer channel closed")]
    Closed,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Link I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Link writer task failed: {0}")]
    WriterFailed(String),
}

pub type TransportResult<T> = Result<T, TransportError>;

pub trait MessageSink {
    fn send(&mut self, message: &SyncMessage) -> TransportResult<()>;
}

/// Collects messages in memory
impl MessageSink for Vec<SyncMessage> {
    fn send(&mut self, message: &SyncMessage) -> TransportResult<()> {
        self.push(*message);
        Ok(())
    }
}

/// Discards everything; used by local games
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn send(&mut self, _message: &SyncMessage) -> TransportResult<()> {
        Ok(())
    }
}

/// Encodes messages to frames and pushes them onto a crossbeam channel
///
/// The receiving side sees exactly the frames a TCP peer would, which makes
/// it a stand-in link for in-process games and tests.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: Sender<String>) -> Self {
        ChannelSink { tx }
    }

    /// A sink and the receiver of its frames
    pub fn pair() -> (ChannelSink, Receiver<String>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (ChannelSink::new(tx), rx)
    }
}

impl MessageSink for ChannelSink {
    fn send(&mut self, message: &SyncMessage) -> TransportResult<()> {
        let frame = encode_frame(message)?;
        self.tx.send(frame).map_err(|_| TransportError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::Color;

    #[test]
    fn test_channel_sink_carries_frames() {
        let (mut sink, rx) = ChannelSink::pair();
        sink.send(&SyncMessage::Turn {
            player: Color::Black,
        })
        .expect("Receiver is alive");

        let frame = rx.try_recv().expect("One frame queued");
        assert_eq!(frame, r#"{"type":"turn","payload":{"player":"black"}}"#);
    }

    #[test]
    fn test_channel_sink_reports_closed_peer() {
        let (mut sink, rx) = ChannelSink::pair();
        drop(rx);

        let result = sink.send(&SyncMessage::Turn {
            player: Color::White,
        });
        assert!(matches!(result, Err(TransportError::Closed)));
    }
}
