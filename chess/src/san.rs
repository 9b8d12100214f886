//! Standard Algebraic Notation for move history.

use cozy_chess::{Board, GameStatus, Move, Piece};

use crate::converters::format_square;

/// Format a legal move as SAN, including disambiguation and check markers.
/// Falls back to the UCI token if `mv.from` is empty.
pub fn format_san(board: &Board, mv: Move) -> String {
    let Some(piece) = board.piece_on(mv.from) else {
        return crate::uci::format_uci_move(mv);
    };
    let mover = board.side_to_move();

    let mut san = if piece == Piece::King && board.colors(mover).has(mv.to) {
        if (mv.to.file() as usize) > (mv.from.file() as usize) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let from = format_square(mv.from);
        let is_capture = board.piece_on(mv.to).is_some()
            || (piece == Piece::Pawn && mv.from.file() != mv.to.file());
        let mut s = String::new();

        if piece == Piece::Pawn {
            if is_capture {
                s.push_str(&from[..1]);
            }
        } else {
            s.push(piece_letter(piece));
            s.push_str(&disambiguation(board, mv, piece));
        }
        if is_capture {
            s.push('x');
        }
        s.push_str(&format_square(mv.to));
        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(piece_letter(promo));
        }
        s
    };

    let mut after = board.clone();
    after.play_unchecked(mv);
    if after.status() == GameStatus::Won {
        san.push('#');
    } else if !after.checkers().is_empty() {
        san.push('+');
    }
    san
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::King => 'K',
        Piece::Queen => 'Q',
        Piece::Rook => 'R',
        Piece::Bishop => 'B',
        Piece::Knight => 'N',
        Piece::Pawn => 'P',
    }
}

/// File, rank, or both, whichever singles out the moving piece among
/// same-kind pieces that can reach the same square.
fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let mut rivals = Vec::new();
    board.generate_moves(|mvs| {
        for other in mvs {
            if other.to == mv.to
                && other.from != mv.from
                && board.piece_on(other.from) == Some(piece)
            {
                rivals.push(other.from);
            }
        }
        false
    });
    if rivals.is_empty() {
        return String::new();
    }

    let from = format_square(mv.from);
    let shares_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
    let shares_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());
    match (shares_file, shares_rank) {
        (false, _) => from[..1].to_string(),
        (true, false) => from[1..].to_string(),
        (true, true) => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci::parse_uci_move;

    fn san(fen: &str, token: &str) -> String {
        let board: Board = fen.parse().unwrap();
        format_san(&board, parse_uci_move(token).unwrap())
    }

    #[test]
    fn pawn_and_piece_moves() {
        let start = crate::fen::STANDARD_START_FEN;
        assert_eq!(san(start, "e2e4"), "e4");
        assert_eq!(san(start, "g1f3"), "Nf3");
    }

    #[test]
    fn captures_and_promotions() {
        assert_eq!(
            san("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", "e4d5"),
            "exd5"
        );
        assert_eq!(san("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8q"), "a8=Q");
    }

    #[test]
    fn castling_uses_king_to_rook_encoding() {
        assert_eq!(san("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1h1"), "O-O");
        assert_eq!(san("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1a1"), "O-O-O");
    }

    #[test]
    fn knights_on_same_rank_are_disambiguated_by_file() {
        assert_eq!(san("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
    }

    #[test]
    fn mate_and_check_suffixes() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
        assert_eq!(san(fen, "d8h4"), "Qh4#");
        assert_eq!(san("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a8"), "Ra8+");
    }
}
