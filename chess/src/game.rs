use cozy_chess::Square;

use crate::fen::FenError;
use crate::position::{MoveAttempt, Position};
use crate::san::format_san;
use crate::types::PieceColor;

/// A match in progress: where it is and how it got there.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<HistoryEntry>,
}

/// One applied move. `to` is the rook square for castling.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub from: Square,
    pub to: Square,
    pub piece_color: PieceColor,
    pub san: String,
}

impl Game {
    /// Create a new game from the standard starting position
    pub fn new() -> Self {
        Self {
            position: Position::standard(),
            history: Vec::new(),
        }
    }

    /// Create a game from a detected board. Castling rights and side to move
    /// are repaired where the rules engine would otherwise reject the FEN.
    pub fn from_detected(fen: &str) -> Result<Self, GameError> {
        let position = Position::from_detected(fen)?;
        Ok(Self {
            position,
            history: Vec::new(),
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn san_history(&self) -> Vec<String> {
        self.history.iter().map(|e| e.san.clone()).collect()
    }

    pub fn last_move(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Overwrite the side to move. Only allowed before any move is played.
    pub fn set_side_to_move(&mut self, side: PieceColor) -> Result<(), GameError> {
        if !self.history.is_empty() {
            return Err(GameError::AlreadyStarted);
        }
        self.position = self.position.with_side_to_move(side)?;
        Ok(())
    }

    /// Apply a move. On rejection the game is unchanged.
    pub fn apply(&mut self, attempt: &MoveAttempt) -> Result<&HistoryEntry, GameError> {
        let (next, mv) = self.position.play(attempt)?;
        let board = self.position.board();

        let piece_color = board.color_on(mv.from).ok_or(GameError::IllegalMove)?;
        let entry = HistoryEntry {
            from: mv.from,
            to: mv.to,
            piece_color: piece_color.into(),
            san: format_san(board, mv),
        };

        self.position = next;
        self.history.push(entry);
        self.history.last().ok_or(GameError::IllegalMove)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move")]
    IllegalMove,
    #[error("Side to move can only be chosen before the first move")]
    AlreadyStarted,
    #[error("FEN parse error: {0}")]
    FenError(#[from] FenError),
}
