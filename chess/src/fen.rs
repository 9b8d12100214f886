use cozy_chess::Board;

use crate::types::PieceColor;

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a Board
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    if fen.split_whitespace().count() < 4 {
        return Err(FenError::InvalidFormat);
    }
    fen.trim()
        .parse()
        .map_err(|_| FenError::Rejected(fen.trim().to_string()))
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

/// Rewrite the side-to-move field. The en passant target is cleared since it
/// is only meaningful for the side that was to move.
pub fn with_side_to_move(fen: &str, side: PieceColor) -> Result<String, FenError> {
    let mut fields = split_fields(fen)?;
    let side = side.fen_char().to_string();
    fields[1] = &side;
    fields[3] = "-";
    Ok(fields.join(" "))
}

/// Rewrite the castling-rights field.
pub fn with_castling(fen: &str, castling: &str) -> Result<String, FenError> {
    let mut fields = split_fields(fen)?;
    fields[2] = castling;
    Ok(fields.join(" "))
}

fn split_fields(fen: &str) -> Result<Vec<&str>, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::InvalidFormat);
    }
    Ok(fields)
}

#[derive(Debug, thiserror::Error)]
pub enum FenError {
    #[error("Invalid FEN format")]
    InvalidFormat,
    #[error("Rules engine rejected position: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_round_trips() {
        let board = parse_fen(STANDARD_START_FEN).unwrap();
        assert_eq!(format_fen(&board), STANDARD_START_FEN);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(parse_fen(""), Err(FenError::InvalidFormat)));
        assert!(matches!(
            parse_fen("not a fen at all"),
            Err(FenError::Rejected(_))
        ));
    }

    #[test]
    fn side_to_move_rewrite_clears_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(
            with_side_to_move(fen, PieceColor::White).unwrap(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn castling_rewrite_touches_only_that_field() {
        assert_eq!(
            with_castling(STANDARD_START_FEN, "Kq").unwrap(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1"
        );
    }
}
