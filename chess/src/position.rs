//! Immutable position facade over the cozy-chess board.

use cozy_chess::{Board, Color, File, GameStatus, Move, Piece, Square};

use crate::board_display::DisplayBoard;
use crate::fen::{self, FenError};
use crate::game::GameError;
use crate::types::{PieceColor, PieceKind};
use crate::uci::{convert_uci_castling_to_cozy, parse_uci_move};

/// A move request coming from the UI or the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveAttempt {
    /// Compact UCI token, e.g. `e2e4`, `e7e8q`, `e1g1`.
    Token(String),
    /// Source and destination squares. `promotion` only applies when the
    /// move actually promotes.
    Squares {
        from: Square,
        to: Square,
        promotion: PieceKind,
    },
}

/// A legal chess position. Every `Position` has been accepted by the rules
/// engine, so its FEN is always parseable.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
}

impl Position {
    pub fn standard() -> Self {
        Self {
            board: Board::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self {
            board: fen::parse_fen(fen)?,
        })
    }

    /// Build a position from a photo-derived FEN.
    ///
    /// Detection always claims full castling rights and White to move. The
    /// first candidate the rules engine accepts wins: the FEN as given, then
    /// with castling rights pruned to kings and rooks on their home squares,
    /// then the pruned FEN with Black to move.
    pub fn from_detected(fen: &str) -> Result<Self, FenError> {
        if let Ok(position) = Self::from_fen(fen) {
            return Ok(position);
        }

        let layout = DisplayBoard::from_fen(fen).map_err(|_| FenError::InvalidFormat)?;
        let pruned = fen::with_castling(fen, &layout.plausible_castling())?;
        if let Ok(position) = Self::from_fen(&pruned) {
            return Ok(position);
        }

        let flipped = fen::with_side_to_move(&pruned, PieceColor::Black)?;
        Self::from_fen(&flipped)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        fen::format_fen(&self.board)
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.board.side_to_move().into()
    }

    /// Same placement with `side` to move. Castling rights that no longer
    /// make sense are pruned if the plain rewrite is rejected.
    pub fn with_side_to_move(&self, side: PieceColor) -> Result<Self, FenError> {
        if self.side_to_move() == side {
            return Ok(self.clone());
        }
        let rewritten = fen::with_side_to_move(&self.fen(), side)?;
        match Self::from_fen(&rewritten) {
            Ok(position) => Ok(position),
            Err(err) => {
                let layout =
                    DisplayBoard::from_fen(&rewritten).map_err(|_| FenError::InvalidFormat)?;
                let pruned = fen::with_castling(&rewritten, &layout.plausible_castling())?;
                Self::from_fen(&pruned).map_err(|_| err)
            }
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<(PieceKind, PieceColor)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece.into(), color.into()))
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    /// Squares the piece on `from` can reach. Castling shows both the
    /// king's landing square and the rook square.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut targets = Vec::new();
        for mv in self.legal_moves().into_iter().filter(|m| m.from == from) {
            if !targets.contains(&mv.to) {
                targets.push(mv.to);
            }
            if let Some(landing) = self.castle_landing(mv) {
                if !targets.contains(&landing) {
                    targets.push(landing);
                }
            }
        }
        targets
    }

    /// Resolve a move request against the legal moves of this position.
    pub fn resolve(&self, attempt: &MoveAttempt) -> Option<Move> {
        let legal = self.legal_moves();
        match attempt {
            MoveAttempt::Token(token) => {
                let mv = convert_uci_castling_to_cozy(parse_uci_move(token)?, &legal);
                legal.contains(&mv).then_some(mv)
            }
            MoveAttempt::Squares {
                from,
                to,
                promotion,
            } => {
                let to = convert_uci_castling_to_cozy(
                    Move {
                        from: *from,
                        to: *to,
                        promotion: None,
                    },
                    &legal,
                )
                .to;
                let candidates: Vec<Move> = legal
                    .into_iter()
                    .filter(|m| m.from == *from && m.to == to)
                    .collect();
                let wanted = Piece::from(*promotion);
                candidates
                    .iter()
                    .find(|m| m.promotion == Some(wanted))
                    .or_else(|| candidates.iter().find(|m| m.promotion.is_none()))
                    .copied()
            }
        }
    }

    /// Play a move, returning the resulting position. `self` is untouched.
    pub fn play(&self, attempt: &MoveAttempt) -> Result<(Position, Move), GameError> {
        let mv = self.resolve(attempt).ok_or(GameError::IllegalMove)?;
        let mut board = self.board.clone();
        board.play_unchecked(mv);
        Ok((Position { board }, mv))
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn is_game_over(&self) -> bool {
        self.status() != GameStatus::Ongoing
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// Human-readable result once the game is over.
    pub fn outcome(&self) -> Option<String> {
        match self.status() {
            GameStatus::Ongoing => None,
            GameStatus::Drawn => Some("Draw".to_string()),
            GameStatus::Won => {
                let winner = match self.board.side_to_move() {
                    Color::White => "Black",
                    Color::Black => "White",
                };
                Some(format!("Checkmate, {} wins", winner))
            }
        }
    }

    /// Standard king landing square for a king-takes-own-rook castling move.
    fn castle_landing(&self, mv: Move) -> Option<Square> {
        if self.board.piece_on(mv.from) != Some(Piece::King) {
            return None;
        }
        if !self.board.colors(self.board.side_to_move()).has(mv.to) {
            return None;
        }
        let file = if mv.to.file() as usize > mv.from.file() as usize {
            File::G
        } else {
            File::C
        };
        Some(Square::new(file, mv.from.rank()))
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen()
    }
}

impl Eq for Position {}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::STANDARD_START_FEN;

    fn squares(from: Square, to: Square) -> MoveAttempt {
        MoveAttempt::Squares {
            from,
            to,
            promotion: PieceKind::Queen,
        }
    }

    #[test]
    fn play_leaves_original_untouched() {
        let start = Position::standard();
        let (next, _) = start.play(&MoveAttempt::Token("e2e4".into())).unwrap();
        assert_eq!(start.fen(), STANDARD_START_FEN);
        assert_eq!(next.side_to_move(), PieceColor::Black);
        assert_eq!(next.piece_at(Square::E4), Some((PieceKind::Pawn, PieceColor::White)));
    }

    #[test]
    fn same_move_twice_is_rejected_the_second_time() {
        let start = Position::standard();
        let attempt = squares(Square::E2, Square::E4);
        let (after, _) = start.play(&attempt).unwrap();
        assert!(matches!(after.play(&attempt), Err(GameError::IllegalMove)));
    }

    #[test]
    fn promotion_choice_is_ignored_for_ordinary_moves() {
        let start = Position::standard();
        let mv = start
            .resolve(&MoveAttempt::Squares {
                from: Square::G1,
                to: Square::F3,
                promotion: PieceKind::Knight,
            })
            .unwrap();
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn promotion_defaults_to_requested_piece() {
        let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mv = pos.resolve(&squares(Square::A7, Square::A8)).unwrap();
        assert_eq!(mv.promotion, Some(Piece::Queen));

        let under = pos
            .resolve(&MoveAttempt::Squares {
                from: Square::A7,
                to: Square::A8,
                promotion: PieceKind::Knight,
            })
            .unwrap();
        assert_eq!(under.promotion, Some(Piece::Knight));
    }

    #[test]
    fn castling_accepts_standard_and_rook_targets() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let standard = pos.resolve(&squares(Square::E1, Square::G1)).unwrap();
        let rook = pos.resolve(&squares(Square::E1, Square::H1)).unwrap();
        assert_eq!(standard, rook);

        let token = pos.resolve(&MoveAttempt::Token("e1c1".into())).unwrap();
        assert_eq!(token.to, Square::A1);

        let targets = pos.legal_destinations(Square::E1);
        assert!(targets.contains(&Square::G1));
        assert!(targets.contains(&Square::C1));
    }

    #[test]
    fn legal_destinations_for_knight() {
        let targets = Position::standard().legal_destinations(Square::G1);
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&Square::F3));
        assert!(targets.contains(&Square::H3));
        assert!(Position::standard().legal_destinations(Square::E4).is_empty());
    }

    #[test]
    fn malformed_token_is_illegal() {
        let start = Position::standard();
        assert!(start.play(&MoveAttempt::Token("zz".into())).is_err());
        assert!(start.play(&MoveAttempt::Token("e2e5".into())).is_err());
    }

    #[test]
    fn detected_position_with_impossible_castling_is_repaired() {
        // Kings off their home squares but detection claims KQkq.
        let pos = Position::from_detected("8/8/3k4/8/8/3K4/8/8 w KQkq - 0 1").unwrap();
        assert!(pos.fen().contains(" w - "));
    }

    #[test]
    fn detected_position_falls_back_to_black_to_move() {
        // Black king is in check from the rook, so White cannot be to move.
        let pos = Position::from_detected("4k3/8/8/8/8/8/8/K3R3 w KQkq - 0 1").unwrap();
        assert_eq!(pos.side_to_move(), PieceColor::Black);
    }

    #[test]
    fn detected_position_without_kings_is_rejected() {
        assert!(Position::from_detected("8/8/8/8/8/8/8/8 w KQkq - 0 1").is_err());
    }

    #[test]
    fn side_to_move_can_be_overwritten() {
        let start = Position::standard();
        let black = start.with_side_to_move(PieceColor::Black).unwrap();
        assert_eq!(black.side_to_move(), PieceColor::Black);
        assert!(black.legal_destinations(Square::G8).contains(&Square::F6));
    }

    #[test]
    fn side_to_move_rejected_when_opponent_would_be_in_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/K3R3 b - - 0 1").unwrap();
        assert!(pos.with_side_to_move(PieceColor::White).is_err());
    }

    #[test]
    fn fools_mate_is_game_over() {
        let mut pos = Position::standard();
        for token in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            pos = pos.play(&MoveAttempt::Token(token.into())).unwrap().0;
        }
        assert!(pos.is_game_over());
        assert_eq!(pos.outcome().as_deref(), Some("Checkmate, Black wins"));
    }
}
