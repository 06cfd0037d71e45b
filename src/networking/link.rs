//! TCP peer link
//!
//! Frames are single-line JSON objects terminated by `\n`. A link owns two
//! tokio tasks: the reader turns lines into [`LinkEvent`]s, the writer
//! drains an unbounded queue onto the socket. Neither touches game state;
//! the driver task consumes events and feeds the [`SyncChannel`].
//!
//! [`SyncChannel`]: crate::networking::SyncChannel

use std::net::SocketAddr;

use shared::{encode_frame, SyncMessage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::networking::sink::{MessageSink, TransportError, TransportResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// One raw frame, newline stripped
    Frame(String),
    /// The peer went away; `clean` is false when the socket errored
    Closed { clean: bool, reason: Option<String> },
}

pub struct PeerLink {
    peer_addr: SocketAddr,
    outbound: mpsc::UnboundedSender<String>,
    inbound: mpsc::UnboundedReceiver<LinkEvent>,
    writer: JoinHandle<()>,
}

impl PeerLink {
    /// Bind `addr` and wait for exactly one peer
    pub async fn listen(addr: &str) -> TransportResult<PeerLink> {
        let listener = TcpListener::bind(addr).await?;
        info!("[NETWORK] Waiting for a peer on {}", listener.local_addr()?);
        Self::accept(&listener).await
    }

    /// Accept one peer from an already bound listener
    pub async fn accept(listener: &TcpListener) -> TransportResult<PeerLink> {
        let (stream, addr) = listener.accept().await?;
        info!("[NETWORK] Peer connected from {}", addr);
        Self::from_stream(stream)
    }

    pub async fn connect(addr: &str) -> TransportResult<PeerLink> {
        let stream = TcpStream::connect(addr).await?;
        info!("[NETWORK] Connected to {}", addr);
        Self::from_stream(stream)
    }

    /// Wrap a connected stream; must be called inside a tokio runtime
    pub fn from_stream(stream: TcpStream) -> TransportResult<PeerLink> {
        let peer_addr = stream.peer_addr()?;
        stream.set_nodelay(true)?;
        let (read_half, mut write_half) = stream.into_split();

        let (event_tx, inbound) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(read_half).lines();
            loop {
                let event = match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => LinkEvent::Frame(line),
                    Ok(None) => LinkEvent::Closed {
                        clean: true,
                        reason: None,
                    },
                    Err(e) => LinkEvent::Closed {
                        clean: false,
                        reason: Some(e.to_string()),
                    },
                };
                let closed = matches!(event, LinkEvent::Closed { .. });
                if event_tx.send(event).is_err() || closed {
                    break;
                }
            }
            debug!("[NETWORK] Reader for {} finished", peer_addr);
        });

        let (outbound, mut frame_rx) = mpsc::unbounded_channel::<String>();
        let writer = tokio::spawn(async move {
            while let Some(mut frame) = frame_rx.recv().await {
                frame.push('\n');
                if let Err(e) = write_half.write_all(frame.as_bytes()).await {
                    warn!("[NETWORK] Write to {} failed: {}", peer_addr, e);
                    break;
                }
            }
            let _ = write_half.shutdown().await;
            debug!("[NETWORK] Writer for {} finished", peer_addr);
        });

        Ok(PeerLink {
            peer_addr,
            outbound,
            inbound,
            writer,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// A cloneable sending half for a [`SyncChannel`](crate::networking::SyncChannel)
    pub fn sink(&self) -> LinkSink {
        LinkSink {
            tx: self.outbound.clone(),
        }
    }

    /// Next inbound event; `None` once the reader has stopped and the queue is empty
    pub async fn next_event(&mut self) -> Option<LinkEvent> {
        self.inbound.recv().await
    }

    /// Flush every queued frame and shut the socket's write side down
    ///
    /// Waits until all [`LinkSink`]s handed out by [`PeerLink::sink`] are
    /// dropped, so drop them first.
    pub async fn close(self) -> TransportResult<()> {
        let PeerLink {
            peer_addr,
            outbound,
            writer,
            ..
        } = self;
        drop(outbound);
        writer.await.map_err(|e| TransportError::WriterFailed(e.to_string()))?;
        debug!("[NETWORK] Link to {} closed", peer_addr);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LinkSink {
    tx: mpsc::UnboundedSender<String>,
}

impl MessageSink for LinkSink {
    fn send(&mut self, message: &SyncMessage) -> TransportResult<()> {
        let frame = encode_frame(message)?;
        self.tx.send(frame).map_err(|_| TransportError::Closed)
    }
}
