//! Turn, check and checkmate state machine
//!
//! [`GameSession`] owns the board, castling rights and status flags of one
//! game. Every mutation goes through [`GameSession::try_move`] (or its boolean
//! wrapper [`GameSession::attempt_move`]), which is shared by locally typed
//! moves and moves replayed from the peer.
//!
//! Applied moves queue [`SyncMessage`]s in an outbox. The session never talks
//! to the network itself; the sync layer drains the outbox and decides what
//! to forward.

use chess_engine::castling::can_castle;
use chess_engine::legality;
use chess_engine::move_gen::{self, is_attacked};
use chess_engine::{
    Board, CandidateMove, CastlePlan, CastlingRights, Color, Coord, MoveContext, Orientation,
    Piece, PieceType,
};
use shared::SyncMessage;
use tracing::{debug, info, warn};

use crate::game::castling;
use crate::game::error::{MoveRejection, MoveResult};

/// Which end of the peer link this session sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Plays white, keeps the board in the authoritative frame
    #[default]
    Host,
    /// Plays black, keeps the board mirrored by rows
    Guest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Both colors played at one board; no ownership checks
    #[default]
    Local,
    /// Two peers, each moving only its own color
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionConfig {
    pub role: Role,
    pub mode: GameMode,
}

impl SessionConfig {
    pub fn local() -> Self {
        SessionConfig::default()
    }

    pub fn host() -> Self {
        SessionConfig {
            role: Role::Host,
            mode: GameMode::Remote,
        }
    }

    pub fn guest() -> Self {
        SessionConfig {
            role: Role::Guest,
            mode: GameMode::Remote,
        }
    }

    /// Remote session from the single `is_host` flag handed over at connect time
    pub fn remote(is_host: bool) -> Self {
        if is_host {
            Self::host()
        } else {
            Self::guest()
        }
    }

    pub fn is_host(&self) -> bool {
        self.role == Role::Host
    }

    /// Only the guest of a remote game draws its board inverted
    pub fn orientation(&self) -> Orientation {
        Orientation::from_inverted(self.role == Role::Guest && self.mode == GameMode::Remote)
    }

    /// Color this peer may move locally, `None` for local games
    pub fn owned_color(&self) -> Option<Color> {
        match (self.mode, self.role) {
            (GameMode::Local, _) => None,
            (GameMode::Remote, Role::Host) => Some(Color::White),
            (GameMode::Remote, Role::Guest) => Some(Color::Black),
        }
    }
}

/// Coarse lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// No move applied yet
    Idle,
    InProgress,
    /// Terminal: a side was checkmated
    Checkmate,
    /// Terminal: the session was ended without a result
    Abandoned,
}

/// What an accepted move did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Plain relocation (with or without capture)
    Moved,
    /// Rook move onto the king's home square, played as a castle
    Castled(CastlePlan),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    orientation: Orientation,
    board: Board,
    rights: CastlingRights,
    current_player: Color,
    in_check: Option<Color>,
    game_finished: bool,
    checkmate: bool,
    moves_applied: u32,
    outbox: Vec<SyncMessage>,
}

impl GameSession {
    /// New game from the standard position, white to move
    pub fn new(config: SessionConfig) -> Self {
        let orientation = config.orientation();
        Self::with_board(config, Board::standard(orientation))
    }

    /// New game from an arbitrary position (stored in the session's frame)
    ///
    /// The check flag is taken from the position. Whether a checked side is
    /// already mated is decided on its first move attempt.
    pub fn with_board(config: SessionConfig, board: Board) -> Self {
        let orientation = config.orientation();
        info!(
            "[GAME] New {:?} session as {:?} ({:?} board)",
            config.mode, config.role, orientation
        );
        let mut session = GameSession {
            config,
            orientation,
            board,
            rights: CastlingRights::default(),
            current_player: Color::White,
            in_check: None,
            game_finished: false,
            checkmate: false,
            moves_applied: 0,
            outbox: Vec::new(),
        };
        if is_attacked(&session.move_context(), session.current_player) {
            session.in_check = Some(session.current_player);
        }
        session
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rights(&self) -> &CastlingRights {
        &self.rights
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// The color whose king was attacked after the last applied move
    pub fn in_check(&self) -> Option<Color> {
        self.in_check
    }

    pub fn is_finished(&self) -> bool {
        self.game_finished
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn moves_applied(&self) -> u32 {
        self.moves_applied
    }

    pub fn phase(&self) -> GamePhase {
        if self.checkmate {
            GamePhase::Checkmate
        } else if self.game_finished {
            GamePhase::Abandoned
        } else if self.moves_applied == 0 {
            GamePhase::Idle
        } else {
            GamePhase::InProgress
        }
    }

    /// Read-only view handed to the rules engine
    pub fn move_context(&self) -> MoveContext<'_> {
        MoveContext {
            board: &self.board,
            orientation: self.orientation,
            rights: &self.rights,
            in_check: self.in_check,
        }
    }

    /// Pseudo-legal destinations of whatever stands on `from`
    pub fn valid_moves(&self, from: Coord) -> Vec<Coord> {
        match self.board.get(from) {
            Some(piece) => move_gen::generate(&self.move_context(), from, piece),
            None => Vec::new(),
        }
    }

    /// Moves of `color` that do not leave its own king attacked (hints only)
    pub fn legal_moves(&self, color: Color) -> Vec<CandidateMove> {
        legality::legal_moves_for(&self.move_context(), color)
    }

    /// Try a move; `true` iff it was applied
    ///
    /// Rejections leave the session untouched (except a checkmate found
    /// before the move, which ends the game) and are logged.
    pub fn attempt_move(&mut self, from: Coord, to: Coord, piece: Piece, from_remote: bool) -> bool {
        match self.try_move(from, to, piece, from_remote) {
            Ok(_) => true,
            Err(rejection) if from_remote => {
                warn!("[GAME] Remote move {} -> {} rejected: {}", from, to, rejection);
                false
            }
            Err(rejection) => {
                info!("[GAME] Move {} -> {} rejected: {}", from, to, rejection);
                false
            }
        }
    }

    /// Try a move and report why it was refused
    ///
    /// Ownership is only checked for locally originated attempts in remote
    /// games; the peer is trusted to move its own pieces.
    pub fn try_move(
        &mut self,
        from: Coord,
        to: Coord,
        piece: Piece,
        from_remote: bool,
    ) -> MoveResult<MoveOutcome> {
        self.validate(from, to, piece, from_remote)?;

        // Only a loaded position reaches this; played moves are tested in
        // update_check_status
        if let Some(checked) = self.in_check {
            if legality::is_checkmate(&self.move_context(), checked) {
                self.declare_checkmate(checked);
                return Err(MoveRejection::Checkmate { color: checked });
            }
        }

        if let Some(plan) = self.castle_plan(from, to, piece) {
            self.execute_castle(plan, piece.color);
            self.update_check_status();
            return Ok(MoveOutcome::Castled(plan));
        }

        self.board.relocate(from, to, piece);
        self.rights.record_departure(from, piece, self.orientation);
        self.moves_applied += 1;
        self.current_player = self.current_player.opponent();
        debug!("[GAME] {} {} -> {}, {} to move", piece, from, to, self.current_player);

        self.outbox.push(SyncMessage::Move { from, to, piece });
        self.outbox.push(SyncMessage::Turn {
            player: self.current_player,
        });

        self.update_check_status();
        Ok(MoveOutcome::Moved)
    }

    fn validate(&self, from: Coord, to: Coord, piece: Piece, from_remote: bool) -> MoveResult<()> {
        if let (false, Some(owned)) = (from_remote, self.config.owned_color()) {
            if piece.color != owned {
                return Err(MoveRejection::NotYourPiece {
                    owned,
                    attempted: piece.color,
                });
            }
        }

        if self.game_finished || self.checkmate {
            return Err(MoveRejection::GameFinished);
        }
        if piece.color != self.current_player {
            return Err(MoveRejection::NotYourTurn {
                current: self.current_player,
            });
        }
        if self.board.get(from) != Some(piece) {
            return Err(MoveRejection::SourceMismatch { from, piece });
        }
        if !move_gen::generate(&self.move_context(), from, piece).contains(&to) {
            return Err(MoveRejection::IllegalDestination { from, to, piece });
        }

        Ok(())
    }

    /// A rook move onto the king's home square with the king still there
    fn castle_plan(&self, from: Coord, to: Coord, piece: Piece) -> Option<CastlePlan> {
        if piece.piece_type != PieceType::Rook {
            return None;
        }
        if can_castle(&self.move_context(), from, piece.color) != Some(to) {
            return None;
        }
        let plan = CastlePlan::for_rook(from)?;
        let king = Piece::new(PieceType::King, piece.color);
        (self.board.get(plan.king_from) == Some(king)).then_some(plan)
    }

    fn execute_castle(&mut self, plan: CastlePlan, color: Color) {
        let [king_move, rook_move] = castling::execute(&mut self.board, &mut self.rights, &plan, color);
        self.moves_applied += 1;
        self.current_player = self.current_player.opponent();

        self.outbox.push(king_move);
        self.outbox.push(rook_move);
        self.outbox.push(SyncMessage::Turn {
            player: self.current_player,
        });
    }

    /// Flag the side to move if its king is attacked, and end the game if
    /// that side has no way out
    fn update_check_status(&mut self) {
        let defender = self.current_player;
        let attacked = is_attacked(&self.move_context(), defender);
        self.in_check = attacked.then_some(defender);

        if !attacked {
            return;
        }
        info!("[CHECK] {} is in check", defender);

        if legality::is_checkmate(&self.move_context(), defender) {
            self.declare_checkmate(defender);
        }
    }

    fn declare_checkmate(&mut self, loser: Color) {
        self.game_finished = true;
        self.checkmate = true;
        info!("[GAME] Checkmate! {} wins", loser.opponent());
    }

    /// Authoritative turn update from the peer; not validated
    pub fn set_current_player(&mut self, player: Color) {
        if player != self.current_player {
            debug!("[GAME] Turn set to {} by peer", player);
        }
        self.current_player = player;
    }

    /// Stop accepting moves without declaring a result (link torn down)
    pub fn end_session(&mut self) {
        if !self.game_finished {
            info!("[GAME] Session ended after {} moves", self.moves_applied);
        }
        self.game_finished = true;
    }

    /// Take the messages queued by applied moves, oldest first
    pub fn drain_outbox(&mut self) -> Vec<SyncMessage> {
        std::mem::take(&mut self.outbox)
    }
}
