//! Synchronizes one [`GameSession`] with its peer
//!
//! Local moves are applied first and then announced; inbound messages are
//! replayed through the same session entry point with `from_remote = true`.
//!
//! ## Frames
//!
//! The wire always carries host-frame coordinates. The guest keeps its board
//! mirrored by rows, so it mirrors (`row' = 7 - row`) everything it sends and
//! everything it receives. The host never translates.
//!
//! ## Castling
//!
//! A castle goes out as the king's two-square move, then the rook's move,
//! then the turn. The receiver cannot replay the king half on its own (a
//! king never moves two squares), so it recognizes it and replays the whole
//! castle as the rook move onto the king's home square, then drops the
//! rook half that follows.

use chess_engine::{CastlePlan, Color, Coord, Piece, PieceType};
use shared::{decode_frame, SyncMessage};
use tracing::{debug, info, warn};

use crate::game::{GameSession, MoveOutcome, MoveResult, SessionConfig};
use crate::networking::sink::MessageSink;

pub struct SyncChannel<S> {
    session: GameSession,
    sink: S,
    /// Rook half of a castle already replayed, `(from, to)` in the local frame
    absorbed_rook_move: Option<(Coord, Coord)>,
}

impl<S: MessageSink> SyncChannel<S> {
    pub fn new(config: SessionConfig, sink: S) -> Self {
        Self::with_session(GameSession::new(config), sink)
    }

    pub fn with_session(session: GameSession, sink: S) -> Self {
        SyncChannel {
            session,
            sink,
            absorbed_rook_move: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn is_inverted(&self) -> bool {
        self.session.orientation().is_inverted()
    }

    /// Translate between the local frame and the host frame (either way)
    fn translate(&self, message: SyncMessage) -> SyncMessage {
        if self.is_inverted() {
            message.mirrored()
        } else {
            message
        }
    }

    /// Apply a move typed on this board and announce it; `true` iff applied
    pub fn attempt_local_move(&mut self, from: Coord, to: Coord, piece: Piece) -> bool {
        let applied = self.session.attempt_move(from, to, piece, false);
        self.flush();
        applied
    }

    /// Like [`Self::attempt_local_move`] but with the rejection reason
    pub fn try_local_move(&mut self, from: Coord, to: Coord, piece: Piece) -> MoveResult<MoveOutcome> {
        let outcome = self.session.try_move(from, to, piece, false);
        self.flush();
        outcome
    }

    fn flush(&mut self) {
        for message in self.session.drain_outbox() {
            match message {
                SyncMessage::Move { from, to, piece } => self.send_move(from, to, piece),
                SyncMessage::Turn { player } => self.send_turn(player),
                SyncMessage::Castle { from, to, piece } => self.send_castle(from, to, piece),
            }
        }
    }

    /// Announce a single piece relocation (local frame coordinates)
    pub fn send_move(&mut self, from: Coord, to: Coord, piece: Piece) {
        self.send(SyncMessage::Move { from, to, piece });
    }

    pub fn send_turn(&mut self, player: Color) {
        self.send(SyncMessage::Turn { player });
    }

    /// Announce a castle as the rook's move onto the king's home square
    pub fn send_castle(&mut self, from: Coord, to: Coord, piece: Piece) {
        self.send(SyncMessage::Castle { from, to, piece });
    }

    fn send(&mut self, message: SyncMessage) {
        let wire = self.translate(message);
        debug!("[SYNC] -> {:?}", wire);
        if let Err(e) = self.sink.send(&wire) {
            warn!("[NETWORK] Failed to send {} message: {}", wire.kind(), e);
        }
    }

    /// Decode and apply one raw frame; unknown or malformed frames are skipped
    pub fn handle_frame(&mut self, frame: &str) -> bool {
        match decode_frame(frame) {
            Ok(Some(message)) => self.handle_message(message),
            Ok(None) => {
                debug!("[SYNC] Ignoring frame of unknown type: {}", frame);
                false
            }
            Err(e) => {
                warn!("[SYNC] Dropping malformed frame: {}", e);
                false
            }
        }
    }

    /// Apply one message from the peer (host-frame coordinates)
    ///
    /// Returns `true` when the message changed the session. Nothing is sent
    /// back: whatever the replayed move queued is discarded.
    pub fn handle_message(&mut self, message: SyncMessage) -> bool {
        debug!("[SYNC] <- {:?}", message);
        let local = self.translate(message);
        let absorbed = self.absorbed_rook_move.take();

        let changed = match local {
            SyncMessage::Turn { player } => {
                self.session.set_current_player(player);
                true
            }
            SyncMessage::Move { from, to, piece } => {
                if absorbed == Some((from, to)) && piece.piece_type == PieceType::Rook {
                    debug!("[SYNC] Rook half of castle already applied");
                    true
                } else if let Some(plan) = self.castle_started_by(from, to, piece) {
                    self.replay_castle(plan, piece.color)
                } else {
                    self.session.attempt_move(from, to, piece, true)
                }
            }
            SyncMessage::Castle { from, to, piece } => self.session.attempt_move(from, to, piece, true),
        };

        let discarded = self.session.drain_outbox();
        if !discarded.is_empty() {
            debug!("[SYNC] Not echoing {} replayed messages", discarded.len());
        }
        changed
    }

    /// A king moving two files from its home square, with its rook in place
    fn castle_started_by(&self, from: Coord, to: Coord, piece: Piece) -> Option<CastlePlan> {
        if piece.piece_type != PieceType::King {
            return None;
        }
        let plan = CastlePlan::from_king_move(from, to)?;
        let rook = Piece::new(PieceType::Rook, piece.color);
        let board = self.session.board();
        (board.get(plan.king_from) == Some(piece) && board.get(plan.rook_from) == Some(rook))
            .then_some(plan)
    }

    fn replay_castle(&mut self, plan: CastlePlan, color: Color) -> bool {
        let rook = Piece::new(PieceType::Rook, color);
        match self.session.try_move(plan.rook_from, plan.king_from, rook, true) {
            Ok(MoveOutcome::Castled(_)) => {
                info!("[SYNC] Replayed {} castle {:?}", color, plan.side);
                self.absorbed_rook_move = Some((plan.rook_from, plan.rook_to));
                true
            }
            Ok(MoveOutcome::Moved) => {
                warn!("[SYNC] Castle replay applied as a plain rook move");
                true
            }
            Err(rejection) => {
                warn!("[SYNC] Castle from peer rejected: {}", rejection);
                false
            }
        }
    }
}
