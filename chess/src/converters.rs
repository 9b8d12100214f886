//! String conversions for squares and pieces.

use cozy_chess::{File, Piece, Rank, Square};

/// Format a square as its algebraic name ("e4").
pub fn format_square(sq: Square) -> String {
    let file = (b'a' + sq.file() as u8) as char;
    let rank = (b'1' + sq.rank() as u8) as char;
    format!("{}{}", file, rank)
}

/// Parse an algebraic square name. Case-insensitive on the file letter.
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars = s.chars();
    let file = chars.next()?.to_ascii_lowercase();
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(Square::new(
        File::index(file as usize - 'a' as usize),
        Rank::index(rank as usize - '1' as usize),
    ))
}

/// Lowercase piece letter as used in UCI promotion suffixes.
pub fn format_piece(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

pub fn parse_piece(c: char) -> Option<Piece> {
    match c.to_ascii_lowercase() {
        'p' => Some(Piece::Pawn),
        'n' => Some(Piece::Knight),
        'b' => Some(Piece::Bishop),
        'r' => Some(Piece::Rook),
        'q' => Some(Piece::Queen),
        'k' => Some(Piece::King),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip_across_the_board() {
        assert_eq!(format_square(Square::A1), "a1");
        assert_eq!(format_square(Square::H8), "h8");
        assert_eq!(parse_square("e4"), Some(Square::E4));
        assert_eq!(parse_square("E4"), Some(Square::E4));
    }

    #[test]
    fn rejects_malformed_squares() {
        assert_eq!(parse_square(""), None);
        assert_eq!(parse_square("e"), None);
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a10"), None);
    }

    #[test]
    fn piece_letters() {
        assert_eq!(format_piece(Piece::Queen), 'q');
        assert_eq!(parse_piece('N'), Some(Piece::Knight));
        assert_eq!(parse_piece('x'), None);
    }
}
