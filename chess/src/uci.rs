//! UCI (Universal Chess Interface) move utilities

use cozy_chess::{File, Move, Rank, Square};

use crate::converters::{format_piece, format_square, parse_piece, parse_square};

/// Convert UCI castling notation to cozy_chess notation
///
/// UCI uses standard notation (king moves 2 squares): e1g1, e1c1, e8g8, e8c8
/// cozy_chess uses king-to-rook notation: e1h1, e1a1, e8h8, e8a8
///
/// The converted move is only returned if it is in `legal_moves`; anything
/// else comes back unchanged.
pub fn convert_uci_castling_to_cozy(mv: Move, legal_moves: &[Move]) -> Move {
    let is_home_rank = matches!(mv.from.rank(), Rank::First | Rank::Eighth);
    let is_e_file = matches!(mv.from.file(), File::E);

    if !is_home_rank || !is_e_file || mv.promotion.is_some() || mv.to.rank() != mv.from.rank() {
        return mv;
    }

    let rook_file = match mv.to.file() {
        File::G => File::H,
        File::C => File::A,
        _ => return mv,
    };
    let converted = Move {
        from: mv.from,
        to: Square::new(rook_file, mv.from.rank()),
        promotion: None,
    };

    if legal_moves.contains(&converted) {
        converted
    } else {
        mv
    }
}

/// Format a move in UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_uci_move(mv: Move) -> String {
    let mut s = format!("{}{}", format_square(mv.from), format_square(mv.to));
    if let Some(promo) = mv.promotion {
        s.push(format_piece(promo));
    }
    s
}

/// Parse a compact UCI token. Castling stays in standard notation; run the
/// result through [`convert_uci_castling_to_cozy`] before playing it.
pub fn parse_uci_move(token: &str) -> Option<Move> {
    let token = token.trim();
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        return None;
    }
    let from = parse_square(&token[0..2])?;
    let to = parse_square(&token[2..4])?;
    let promotion = match token[4..].chars().next() {
        Some(c) => Some(parse_piece(c)?),
        None => None,
    };
    Some(Move {
        from,
        to,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Piece;

    #[test]
    fn test_format_uci_move() {
        let mv = Move {
            from: Square::new(File::E, Rank::Second),
            to: Square::new(File::E, Rank::Fourth),
            promotion: None,
        };
        assert_eq!(format_uci_move(mv), "e2e4");
    }

    #[test]
    fn test_format_uci_move_with_promotion() {
        let mv = Move {
            from: Square::new(File::E, Rank::Seventh),
            to: Square::new(File::E, Rank::Eighth),
            promotion: Some(Piece::Queen),
        };
        assert_eq!(format_uci_move(mv), "e7e8q");
    }

    #[test]
    fn parses_tokens_with_and_without_promotion() {
        let mv = parse_uci_move("e7e8q").unwrap();
        assert_eq!(mv.promotion, Some(Piece::Queen));
        assert_eq!(parse_uci_move("g1f3").unwrap().to, Square::F3);
        assert!(parse_uci_move("e2").is_none());
        assert!(parse_uci_move("e2e4x").is_none());
        assert!(parse_uci_move("(none)").is_none());
    }

    #[test]
    fn castling_only_converted_when_legal() {
        let e1g1 = parse_uci_move("e1g1").unwrap();
        let e1h1 = parse_uci_move("e1h1").unwrap();
        assert_eq!(convert_uci_castling_to_cozy(e1g1, &[e1h1]), e1h1);
        assert_eq!(convert_uci_castling_to_cozy(e1g1, &[]), e1g1);
    }
}
