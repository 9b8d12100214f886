//! Board interaction and engine turn handling for one match.
//!
//! The controller owns the game, turns pointer and keyboard gestures into
//! move attempts, and queues UCI commands for the session to forward. It
//! never talks to the engine process itself, which keeps it synchronous and
//! easy to drive from tests.

use std::collections::VecDeque;

use chess::{format_uci_move, AnalysisScore, Game, GameError, MoveAttempt, PieceColor, PieceKind, Position};
use cozy_chess::Square;
use engine::{EngineCommand, EngineEvent, EngineInfo, GoParams};

use crate::board_view::{BoardGeometry, BoardView};
use crate::roster::{OpponentProfile, ADVISORY_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Detected position: waiting for the user to say who moves first.
    AwaitingSideToMove,
    PlayerToMove,
    OpponentToMove,
    GameOver,
}

/// Who makes the first move of a detected position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mover {
    Player,
    Opponent,
}

/// A drag in progress: the source square and the live pointer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub from: Square,
    pub x: u16,
    pub y: u16,
}

/// What the engine has told us so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Telemetry {
    /// Latest score, from the human player's point of view.
    pub score: Option<AnalysisScore>,
    /// Head of the latest principal variation, as a UCI token.
    pub best_move: Option<String>,
    /// Depth reached by the latest search report.
    pub depth: Option<u8>,
    /// Moves played so far, in SAN.
    pub history: Vec<String>,
    /// The opponent is searching for its move.
    pub thinking: bool,
}

impl Telemetry {
    /// Evaluation in pawns, 0.0 until the first score arrives.
    pub fn evaluation(&self) -> f64 {
        self.score.map(|s| s.pawns()).unwrap_or(0.0)
    }

    /// Fill level of the evaluation bar in percent, kept within 5..=95.
    pub fn eval_bar_percent(&self) -> u16 {
        (50.0 + self.evaluation() * 5.0).clamp(5.0, 95.0).round() as u16
    }
}

type ViewKey = (String, Option<Square>, Option<Square>, Option<(Square, Square)>);

pub struct MatchController {
    profile: OpponentProfile,
    game: Game,
    phase: MatchPhase,
    human_side: PieceColor,
    selected: Option<Square>,
    drag: Option<DragState>,
    promotion: PieceKind,
    geometry: Option<BoardGeometry>,
    telemetry: Telemetry,
    outbox: VecDeque<EngineCommand>,
    searches_in_flight: u32,
    engine_online: bool,
    status_message: Option<String>,
    view_key: ViewKey,
    view: BoardView,
}

impl MatchController {
    /// Match from the standard start. The human plays White.
    pub fn new_standard(profile: OpponentProfile) -> Self {
        let mut controller = Self::with_game(profile, Game::new(), MatchPhase::PlayerToMove);
        controller.on_position_changed();
        controller
    }

    /// Match from a detected position. No engine traffic until the side to
    /// move has been chosen.
    pub fn from_detected(profile: OpponentProfile, fen: &str) -> Result<Self, GameError> {
        let game = Game::from_detected(fen)?;
        let mut controller = Self::with_game(profile, game, MatchPhase::AwaitingSideToMove);
        controller.status_message = Some("Who is to move? w/b: you, W/B: opponent.".to_string());
        Ok(controller)
    }

    fn with_game(profile: OpponentProfile, game: Game, phase: MatchPhase) -> Self {
        let view = BoardView::project(game.position(), None, None, None);
        let view_key = (game.position().fen(), None, None, None);
        Self {
            profile,
            game,
            phase,
            human_side: PieceColor::White,
            selected: None,
            drag: None,
            promotion: PieceKind::Queen,
            geometry: None,
            telemetry: Telemetry::default(),
            outbox: VecDeque::new(),
            searches_in_flight: 0,
            engine_online: true,
            status_message: None,
            view_key,
            view,
        }
    }

    pub fn profile(&self) -> &OpponentProfile {
        &self.profile
    }

    pub fn position(&self) -> &Position {
        self.game.position()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn human_side(&self) -> PieceColor {
        self.human_side
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn promotion(&self) -> PieceKind {
        self.promotion
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Colour that played the first recorded move.
    pub fn first_mover(&self) -> Option<PieceColor> {
        self.game.history().first().map(|entry| entry.piece_color)
    }

    pub fn geometry(&self) -> Option<BoardGeometry> {
        self.geometry
    }

    /// Memoised render state. Recomputed only when the position, selection,
    /// drag source or last move changes.
    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = Some(geometry);
    }

    /// Overwrite the side to move of a detected position and start play.
    /// `mover` says whether the human or the engine owns that side; the
    /// phase then follows from whose turn it is.
    pub fn choose_side_to_move(&mut self, side: PieceColor, mover: Mover) {
        if self.phase != MatchPhase::AwaitingSideToMove {
            return;
        }
        match self.game.set_side_to_move(side) {
            Ok(()) => {
                tracing::info!("Side to move set to {} ({:?})", side, mover);
                self.human_side = match mover {
                    Mover::Player => side,
                    Mover::Opponent => side.opposite(),
                };
                self.status_message = Some(format!("You play {}.", self.human_side));
                self.on_position_changed();
            }
            Err(e) => {
                tracing::warn!("Rejected side to move {}: {}", side, e);
                self.status_message = Some(format!(
                    "This position is not legal with {} to move.",
                    side
                ));
            }
        }
    }

    pub fn cycle_promotion(&mut self) {
        self.promotion = self.promotion.next_promotion();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.drag = None;
        self.refresh_view();
    }

    /// Pointer pressed. Starts a drag on one of the mover's pieces, or
    /// completes a click move when a square is already selected.
    pub fn pointer_down(&mut self, x: u16, y: u16) {
        if self.phase != MatchPhase::PlayerToMove {
            return;
        }
        let Some(square) = self.geometry.and_then(|g| g.square_at(x, y)) else {
            return;
        };
        if self.is_movable(square) {
            self.selected = Some(square);
            self.drag = Some(DragState { from: square, x, y });
            self.refresh_view();
        } else if let Some(from) = self.selected {
            self.submit(from, square);
        }
    }

    pub fn pointer_move(&mut self, x: u16, y: u16) {
        if let Some(drag) = self.drag.as_mut() {
            drag.x = x;
            drag.y = y;
        }
    }

    /// Pointer released. A drop on another square submits a move; a drop
    /// outside the board or back on the source only ends the drag.
    pub fn pointer_up(&mut self, x: u16, y: u16) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let target = self.geometry.and_then(|g| g.square_at(x, y));
        match target {
            Some(to) if to != drag.from && self.phase == MatchPhase::PlayerToMove => {
                self.submit(drag.from, to);
            }
            _ => self.refresh_view(),
        }
    }

    /// Keyboard equivalent of clicking a square.
    pub fn select_square(&mut self, square: Square) {
        if self.phase != MatchPhase::PlayerToMove {
            return;
        }
        if self.is_movable(square) {
            self.selected = if self.selected == Some(square) {
                None
            } else {
                Some(square)
            };
            self.refresh_view();
        } else if let Some(from) = self.selected {
            self.submit(from, square);
        }
    }

    fn is_movable(&self, square: Square) -> bool {
        let position = self.game.position();
        matches!(position.piece_at(square), Some((_, color)) if color == position.side_to_move())
    }

    fn submit(&mut self, from: Square, to: Square) {
        let attempt = MoveAttempt::Squares {
            from,
            to,
            promotion: self.promotion,
        };
        if !self.apply_move(&attempt) {
            tracing::debug!("Rejected move attempt {:?}", attempt);
            self.selected = None;
            self.drag = None;
            self.refresh_view();
        }
    }

    /// Apply a move through the rules engine. Returns false if rejected, in
    /// which case nothing changes.
    fn apply_move(&mut self, attempt: &MoveAttempt) -> bool {
        let mover_is_human = self.game.position().side_to_move() == self.human_side;
        let san = match self.game.apply(attempt) {
            Ok(entry) => entry.san.clone(),
            Err(_) => return false,
        };
        tracing::info!("Move played: {}", san);

        self.status_message = Some(if mover_is_human {
            format!("You played {}", san)
        } else {
            format!("{} played {}", self.profile.name, san)
        });
        self.selected = None;
        self.drag = None;
        self.on_position_changed();
        true
    }

    fn on_position_changed(&mut self) {
        self.telemetry.history = self.game.san_history();
        self.refresh_view();

        let position = self.game.position();
        if let Some(outcome) = position.outcome() {
            tracing::info!("Game over: {}", outcome);
            self.phase = MatchPhase::GameOver;
            self.telemetry.thinking = false;
            self.status_message = Some(outcome);
            return;
        }
        self.phase = if position.side_to_move() == self.human_side {
            MatchPhase::PlayerToMove
        } else {
            MatchPhase::OpponentToMove
        };
        self.start_search();
    }

    /// Queue a search for the current position, superseding any search
    /// still running.
    fn start_search(&mut self) {
        if !self.engine_online {
            return;
        }
        if self.searches_in_flight > 0 {
            self.outbox.push_back(EngineCommand::Stop);
        }
        self.outbox.push_back(EngineCommand::SetPosition {
            fen: self.game.position().fen(),
        });
        let params = if self.phase == MatchPhase::OpponentToMove {
            self.telemetry.thinking = true;
            GoParams::movetime(self.profile.move_time_ms())
        } else {
            self.telemetry.thinking = false;
            GoParams::depth(ADVISORY_DEPTH)
        };
        self.outbox.push_back(EngineCommand::Go(params));
        self.searches_in_flight += 1;
        self.telemetry.best_move = None;
    }

    /// Commands queued since the last drain, in send order.
    pub fn drain_engine_commands(&mut self) -> Vec<EngineCommand> {
        self.outbox.drain(..).collect()
    }

    /// The engine is gone or never started. Play continues without an
    /// opponent reply.
    pub fn set_engine_offline(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("Engine offline: {}", reason);
        self.engine_online = false;
        self.outbox.clear();
        self.searches_in_flight = 0;
        self.telemetry.thinking = false;
        self.status_message = Some(reason);
    }

    pub fn engine_online(&self) -> bool {
        self.engine_online
    }

    pub fn on_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready => {}
            EngineEvent::Info(info) => {
                // Only the newest search may update telemetry.
                if self.searches_in_flight == 1 {
                    self.record_info(&info);
                }
            }
            EngineEvent::BestMove(mv) => {
                self.searches_in_flight = self.searches_in_flight.saturating_sub(1);
                if self.searches_in_flight > 0 {
                    tracing::debug!("Dropping bestmove from superseded search");
                    return;
                }
                self.telemetry.thinking = false;
                if self.phase != MatchPhase::OpponentToMove {
                    return;
                }
                match mv {
                    Some(mv) => {
                        let token = format_uci_move(mv);
                        if !self.apply_move(&MoveAttempt::Token(token.clone())) {
                            tracing::error!("Engine move {} rejected by rules engine", token);
                            self.set_engine_offline(format!(
                                "{} suggested an illegal move ({})",
                                self.profile.name, token
                            ));
                        }
                    }
                    None => self.set_engine_offline(format!("{} has no move", self.profile.name)),
                }
            }
        }
    }

    fn record_info(&mut self, info: &EngineInfo) {
        if let Some(score) = info.score {
            let score = AnalysisScore::from(score);
            // Engine scores are from the side to move's point of view.
            let score = if self.game.position().side_to_move() == self.human_side {
                score
            } else {
                score.negate()
            };
            self.telemetry.score = Some(score);
        }
        if info.depth.is_some() {
            self.telemetry.depth = info.depth;
        }
        if let Some(head) = info.pv.first() {
            self.telemetry.best_move = Some(format_uci_move(*head));
        }
    }

    fn refresh_view(&mut self) {
        let last_move = self.game.last_move().map(|e| (e.from, e.to));
        let key = (
            self.game.position().fen(),
            self.selected,
            self.drag.map(|d| d.from),
            last_move,
        );
        if key != self.view_key {
            self.view = BoardView::project(self.game.position(), key.1, key.2, key.3);
            self.view_key = key;
        }
    }
}
