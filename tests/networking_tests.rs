//! Networking Tests
//!
//! Host and guest sessions kept in sync through in-memory sinks, raw frames
//! and a real TCP loopback link.

use std::io::Read;
use std::time::Duration;

use chess_engine::{Color, Coord, Orientation, Piece, PieceType};
use crossbeam_channel::Receiver;
use peerchess::game::SessionConfig;
use peerchess::networking::{ChannelSink, LinkEvent, MessageSink, PeerLink, SyncChannel};
use shared::{encode_frame, SyncMessage};
use tokio::net::TcpListener;

fn white(piece_type: PieceType) -> Piece {
    Piece::new(piece_type, Color::White)
}

fn black(piece_type: PieceType) -> Piece {
    Piece::new(piece_type, Color::Black)
}

/// Play a move typed on `channel`'s own board, squares named in its frame
fn play<S: MessageSink>(channel: &mut SyncChannel<S>, from: &str, to: &str) {
    let orientation = channel.session().orientation();
    let from = Coord::parse_algebraic(from, orientation).unwrap();
    let to = Coord::parse_algebraic(to, orientation).unwrap();
    let piece = channel
        .session()
        .board()
        .get(from)
        .unwrap_or_else(|| panic!("No piece on {from}"));
    assert!(
        channel.attempt_local_move(from, to, piece),
        "{from} -> {to} should be accepted"
    );
}

/// Deliver every queued frame to the other side
fn pump(frames: &Receiver<String>, receiver: &mut SyncChannel<ChannelSink>) {
    while let Ok(frame) = frames.try_recv() {
        receiver.handle_frame(&frame);
    }
}

struct Pair {
    host: SyncChannel<ChannelSink>,
    guest: SyncChannel<ChannelSink>,
    to_guest: Receiver<String>,
    to_host: Receiver<String>,
}

impl Pair {
    fn new() -> Self {
        let (host_sink, to_guest) = ChannelSink::pair();
        let (guest_sink, to_host) = ChannelSink::pair();
        Pair {
            host: SyncChannel::new(SessionConfig::host(), host_sink),
            guest: SyncChannel::new(SessionConfig::guest(), guest_sink),
            to_guest,
            to_host,
        }
    }

    fn host_plays(&mut self, from: &str, to: &str) {
        play(&mut self.host, from, to);
        pump(&self.to_guest, &mut self.guest);
    }

    fn guest_plays(&mut self, from: &str, to: &str) {
        play(&mut self.guest, from, to);
        pump(&self.to_host, &mut self.host);
    }

    fn assert_in_sync(&self) {
        assert_eq!(
            *self.guest.session().board(),
            self.host.session().board().mirrored(),
            "guest board should be the host board mirrored"
        );
        assert_eq!(
            self.guest.session().current_player(),
            self.host.session().current_player()
        );
    }
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn test_host_move_is_mirrored_on_guest() {
    let mut host = SyncChannel::new(SessionConfig::host(), Vec::<SyncMessage>::new());
    let mut guest = SyncChannel::new(SessionConfig::guest(), Vec::<SyncMessage>::new());

    play(&mut host, "e2", "e4");
    assert_eq!(
        host.sink().as_slice(),
        &[
            SyncMessage::Move {
                from: Coord::new(6, 4),
                to: Coord::new(4, 4),
                piece: white(PieceType::Pawn),
            },
            SyncMessage::Turn {
                player: Color::Black
            },
        ]
    );

    for message in host.sink().clone() {
        assert!(guest.handle_message(message));
    }

    assert_eq!(guest.session().board().get(Coord::new(3, 4)), Some(white(PieceType::Pawn)));
    assert_eq!(guest.session().board().get(Coord::new(1, 4)), None);
    assert_eq!(*guest.session().board(), host.session().board().mirrored());
    assert_eq!(guest.session().current_player(), Color::Black);
}

#[test]
fn test_guest_sends_host_frame_coordinates() {
    let mut guest = SyncChannel::new(SessionConfig::guest(), Vec::<SyncMessage>::new());
    guest.session_mut().set_current_player(Color::Black);

    play(&mut guest, "e7", "e5");

    let e7 = Coord::parse_algebraic("e7", Orientation::Normal).unwrap();
    let e5 = Coord::parse_algebraic("e5", Orientation::Normal).unwrap();
    assert_eq!(
        guest.sink().first(),
        Some(&SyncMessage::Move {
            from: e7,
            to: e5,
            piece: black(PieceType::Pawn),
        })
    );
}

#[test]
fn test_inbound_moves_are_not_echoed() {
    let mut host = SyncChannel::new(SessionConfig::host(), Vec::<SyncMessage>::new());
    let mut guest = SyncChannel::new(SessionConfig::guest(), Vec::<SyncMessage>::new());

    play(&mut host, "d2", "d4");
    for message in host.sink().clone() {
        guest.handle_message(message);
    }

    assert!(guest.sink().is_empty());
    assert!(guest.session_mut().drain_outbox().is_empty());
}

#[test]
fn test_local_ownership_but_trusted_peer() {
    let mut guest = SyncChannel::new(SessionConfig::guest(), Vec::<SyncMessage>::new());
    let e2 = Coord::parse_algebraic("e2", Orientation::Inverted).unwrap();
    let e4 = Coord::parse_algebraic("e4", Orientation::Inverted).unwrap();

    // The guest may not push white's pawn from its own keyboard
    assert!(!guest.attempt_local_move(e2, e4, white(PieceType::Pawn)));
    assert!(guest.sink().is_empty());

    // ...but the same move from the host is applied
    let from_host = SyncMessage::Move {
        from: e2.mirrored(),
        to: e4.mirrored(),
        piece: white(PieceType::Pawn),
    };
    assert!(guest.handle_message(from_host));
}

// ============================================================================
// Full games over frames
// ============================================================================

#[test]
fn test_boards_stay_in_sync_through_a_castle() {
    let mut pair = Pair::new();

    pair.host_plays("e2", "e4");
    pair.guest_plays("e7", "e5");
    pair.host_plays("g1", "f3");
    pair.guest_plays("b8", "c6");
    pair.host_plays("f1", "c4");
    pair.guest_plays("g8", "f6");
    pair.assert_in_sync();

    // White castles kingside: rook h1 onto the king's square
    pair.host_plays("h1", "e1");
    pair.assert_in_sync();

    let g1 = Coord::parse_algebraic("g1", Orientation::Inverted).unwrap();
    let f1 = Coord::parse_algebraic("f1", Orientation::Inverted).unwrap();
    assert_eq!(pair.guest.session().board().get(g1), Some(white(PieceType::King)));
    assert_eq!(pair.guest.session().board().get(f1), Some(white(PieceType::Rook)));
    assert_eq!(pair.guest.session().current_player(), Color::Black);

    pair.guest_plays("d7", "d6");
    pair.host_plays("d2", "d3");
    pair.assert_in_sync();
}

#[test]
fn test_guest_castle_replays_on_host() {
    let mut pair = Pair::new();

    pair.host_plays("e2", "e4");
    pair.guest_plays("g8", "f6");
    pair.host_plays("d2", "d4");
    pair.guest_plays("e7", "e6");
    pair.host_plays("b1", "c3");
    pair.guest_plays("f8", "e7");
    pair.host_plays("g1", "f3");

    // Black castles kingside from the inverted board
    pair.guest_plays("h8", "e8");
    pair.assert_in_sync();

    let host_board = pair.host.session().board();
    assert_eq!(host_board.get(Coord::new(0, 6)), Some(black(PieceType::King)));
    assert_eq!(host_board.get(Coord::new(0, 5)), Some(black(PieceType::Rook)));
    assert_eq!(host_board.get(Coord::new(0, 4)), None);
    assert_eq!(host_board.get(Coord::new(0, 7)), None);
    assert_eq!(pair.host.session().current_player(), Color::White);

    pair.host_plays("f1", "d3");
    pair.assert_in_sync();
}

#[test]
fn test_fools_mate_over_the_wire() {
    let mut pair = Pair::new();

    pair.host_plays("f2", "f3");
    pair.guest_plays("e7", "e5");
    pair.host_plays("g2", "g4");
    pair.guest_plays("d8", "h4");

    pair.assert_in_sync();
    for channel in [&pair.host, &pair.guest] {
        assert!(channel.session().is_checkmate());
        assert!(channel.session().is_finished());
    }

    let h2 = Coord::parse_algebraic("h2", Orientation::Normal).unwrap();
    let h3 = Coord::parse_algebraic("h3", Orientation::Normal).unwrap();
    assert!(!pair.host.attempt_local_move(h2, h3, white(PieceType::Pawn)));
}

#[test]
fn test_castle_message_replays_compound_move() {
    let mut pair = Pair::new();
    pair.host_plays("e2", "e4");
    pair.guest_plays("e7", "e5");
    pair.host_plays("g1", "f3");
    pair.guest_plays("b8", "c6");
    pair.host_plays("f1", "c4");
    pair.guest_plays("g8", "f6");

    let h1 = Coord::parse_algebraic("h1", Orientation::Normal).unwrap();
    let e1 = Coord::parse_algebraic("e1", Orientation::Normal).unwrap();
    let castle = SyncMessage::Castle {
        from: h1,
        to: e1,
        piece: white(PieceType::Rook),
    };
    let frame = encode_frame(&castle).unwrap();

    assert!(pair.guest.handle_frame(&frame));

    let g1 = Coord::parse_algebraic("g1", Orientation::Inverted).unwrap();
    assert_eq!(pair.guest.session().board().get(g1), Some(white(PieceType::King)));
    assert_eq!(pair.guest.session().current_player(), Color::Black);
}

// ============================================================================
// Frame handling
// ============================================================================

#[test]
fn test_unknown_and_malformed_frames_are_ignored() {
    let mut guest = SyncChannel::new(SessionConfig::guest(), Vec::<SyncMessage>::new());
    let before = *guest.session().board();

    assert!(!guest.handle_frame(r#"{"type":"chat","payload":{"text":"good luck"}}"#));
    assert!(!guest.handle_frame("{not json"));
    assert!(!guest.handle_frame(r#"{"type":"move","payload":{}}"#));

    assert_eq!(*guest.session().board(), before);
    assert_eq!(guest.session().current_player(), Color::White);
}

#[test]
fn test_turn_frame_sets_player_without_validation() {
    let mut host = SyncChannel::new(SessionConfig::host(), Vec::<SyncMessage>::new());

    assert!(host.handle_frame(r#"{"type":"turn","payload":{"player":"black"}}"#));
    assert_eq!(host.session().current_player(), Color::Black);
    assert!(host.handle_frame(r#"{"type":"turn","payload":{"player":"black"}}"#));
    assert_eq!(host.session().current_player(), Color::Black);
}

// ============================================================================
// TCP link
// ============================================================================

async fn next_frame(link: &mut PeerLink) -> String {
    match tokio::time::timeout(Duration::from_secs(5), link.next_event()).await {
        Ok(Some(LinkEvent::Frame(frame))) => frame,
        other => panic!("Expected a frame, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tcp_link_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let accept = tokio::spawn(async move { PeerLink::accept(&listener).await });

    let mut guest_link = PeerLink::connect(&addr).await.unwrap();
    let mut host_link = accept.await.unwrap().unwrap();

    let mut host = SyncChannel::new(SessionConfig::host(), host_link.sink());
    let mut guest = SyncChannel::new(SessionConfig::guest(), guest_link.sink());

    play(&mut host, "e2", "e4");
    for _ in 0..2 {
        let frame = next_frame(&mut guest_link).await;
        assert!(guest.handle_frame(&frame));
    }

    play(&mut guest, "c7", "c5");
    for _ in 0..2 {
        let frame = next_frame(&mut host_link).await;
        assert!(host.handle_frame(&frame));
    }

    assert_eq!(*guest.session().board(), host.session().board().mirrored());
    assert_eq!(host.session().current_player(), Color::White);

    // Dropping every sending half closes the socket cleanly
    drop(host);
    drop(host_link);
    let event = tokio::time::timeout(Duration::from_secs(5), guest_link.next_event())
        .await
        .unwrap();
    assert_eq!(
        event,
        Some(LinkEvent::Closed {
            clean: true,
            reason: None
        })
    );
}

#[test]
fn test_close_flushes_final_frames_before_runtime_exits() {
    //! The binary returns from `main` right after the mating move; frames
    //! still queued for the writer must reach the peer.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let link = PeerLink::connect(&addr).await.unwrap();
        let mut host = SyncChannel::new(SessionConfig::host(), link.sink());
        play(&mut host, "e2", "e4");

        drop(host);
        link.close().await.unwrap();
    });
    drop(runtime);

    let (mut peer, _) = listener.accept().unwrap();
    peer.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut received = String::new();
    peer.read_to_string(&mut received).unwrap();

    let frames: Vec<SyncMessage> = received
        .lines()
        .filter_map(|line| shared::decode_frame(line).unwrap())
        .collect();
    assert_eq!(
        frames.last(),
        Some(&SyncMessage::Turn {
            player: Color::Black
        })
    );
    assert_eq!(frames.len(), 2);
}
