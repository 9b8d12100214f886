//! Lightweight board read straight from a FEN placement field.
//!
//! Unlike `Position` this accepts placements the rules engine would reject,
//! which is what lets detected boards be inspected before they are repaired.

use crate::types::{PieceColor, PieceKind};

/// An 8x8 board for inspection only.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    squares: [[Option<(PieceKind, PieceColor)>; 8]; 8],
}

impl DisplayBoard {
    /// Parse the board placement from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, DisplayBoardError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or(DisplayBoardError::InvalidFen)?;

        let mut squares = [[None; 8]; 8];
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(DisplayBoardError::InvalidFen);
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file > 7 {
                        return Err(DisplayBoardError::InvalidFen);
                    }
                    let color = if c.is_uppercase() {
                        PieceColor::White
                    } else {
                        PieceColor::Black
                    };
                    let kind =
                        PieceKind::from_char(c).ok_or(DisplayBoardError::InvalidPiece(c))?;
                    squares[rank][file] = Some((kind, color));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(DisplayBoardError::InvalidFen);
            }
        }

        Ok(DisplayBoard { squares })
    }

    pub fn piece_at(&self, file: u8, rank: u8) -> Option<(PieceKind, PieceColor)> {
        if file > 7 || rank > 7 {
            return None;
        }
        self.squares[rank as usize][file as usize]
    }

    /// Castling field containing only the rights whose king and rook are
    /// still on their home squares. Returns "-" when none survive.
    pub fn plausible_castling(&self) -> String {
        let mut rights = String::new();
        for (color, rank, king_side, queen_side) in [
            (PieceColor::White, 0u8, 'K', 'Q'),
            (PieceColor::Black, 7u8, 'k', 'q'),
        ] {
            if self.piece_at(4, rank) != Some((PieceKind::King, color)) {
                continue;
            }
            if self.piece_at(7, rank) == Some((PieceKind::Rook, color)) {
                rights.push(king_side);
            }
            if self.piece_at(0, rank) == Some((PieceKind::Rook, color)) {
                rights.push(queen_side);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        rights
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayBoardError {
    #[error("Invalid FEN string")]
    InvalidFen,
    #[error("Invalid piece character: {0}")]
    InvalidPiece(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let board =
            DisplayBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(
            board.piece_at(0, 0),
            Some((PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(
            board.piece_at(4, 7),
            Some((PieceKind::King, PieceColor::Black))
        );
        assert_eq!(board.piece_at(4, 4), None);
        assert_eq!(board.plausible_castling(), "KQkq");
    }

    #[test]
    fn short_rank_is_rejected() {
        assert!(DisplayBoard::from_fen("8/8/8/8/8/8/8/7 w - - 0 1").is_err());
        assert!(DisplayBoard::from_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn castling_pruned_to_home_squares() {
        // White king moved, black queen rook gone.
        let board = DisplayBoard::from_fen("1n2k2r/8/8/8/8/8/8/R4K1R w KQkq - 0 1").unwrap();
        assert_eq!(board.plausible_castling(), "k");

        let bare = DisplayBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1").unwrap();
        assert_eq!(bare.plausible_castling(), "-");
    }
}
