//! Piece and color types exposed to the UI.
//! cozy-chess types stay behind the `Position` facade where possible.

/// Project-owned piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Project-owned color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceKind {
    /// FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self, color: PieceColor) -> char {
        let c = match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        };
        match color {
            PieceColor::White => c.to_ascii_uppercase(),
            PieceColor::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// Figurine glyph for terminal rendering.
    pub fn glyph(self, color: PieceColor) -> char {
        match (color, self) {
            (PieceColor::White, Self::King) => '♔',
            (PieceColor::White, Self::Queen) => '♕',
            (PieceColor::White, Self::Rook) => '♖',
            (PieceColor::White, Self::Bishop) => '♗',
            (PieceColor::White, Self::Knight) => '♘',
            (PieceColor::White, Self::Pawn) => '♙',
            (PieceColor::Black, Self::King) => '♚',
            (PieceColor::Black, Self::Queen) => '♛',
            (PieceColor::Black, Self::Rook) => '♜',
            (PieceColor::Black, Self::Bishop) => '♝',
            (PieceColor::Black, Self::Knight) => '♞',
            (PieceColor::Black, Self::Pawn) => '♟',
        }
    }

    /// Next promotion choice in the cycle Queen → Rook → Bishop → Knight.
    pub fn next_promotion(self) -> Self {
        match self {
            Self::Queen => Self::Rook,
            Self::Rook => Self::Bishop,
            Self::Bishop => Self::Knight,
            _ => Self::Queen,
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Side-to-move field of a FEN record.
    pub fn fen_char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(p: cozy_chess::Piece) -> Self {
        match p {
            cozy_chess::Piece::Pawn => Self::Pawn,
            cozy_chess::Piece::Knight => Self::Knight,
            cozy_chess::Piece::Bishop => Self::Bishop,
            cozy_chess::Piece::Rook => Self::Rook,
            cozy_chess::Piece::Queen => Self::Queen,
            cozy_chess::Piece::King => Self::King,
        }
    }
}

impl From<PieceKind> for cozy_chess::Piece {
    fn from(p: PieceKind) -> Self {
        match p {
            PieceKind::Pawn => Self::Pawn,
            PieceKind::Knight => Self::Knight,
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Rook => Self::Rook,
            PieceKind::Queen => Self::Queen,
            PieceKind::King => Self::King,
        }
    }
}

impl From<cozy_chess::Color> for PieceColor {
    fn from(c: cozy_chess::Color) -> Self {
        match c {
            cozy_chess::Color::White => Self::White,
            cozy_chess::Color::Black => Self::Black,
        }
    }
}

impl From<PieceColor> for cozy_chess::Color {
    fn from(c: PieceColor) -> Self {
        match c {
            PieceColor::White => Self::White,
            PieceColor::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_cycle_visits_all_four_pieces() {
        let mut p = PieceKind::Queen;
        let mut seen = vec![p];
        for _ in 0..3 {
            p = p.next_promotion();
            seen.push(p);
        }
        assert_eq!(
            seen,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight
            ]
        );
        assert_eq!(p.next_promotion(), PieceKind::Queen);
    }

    #[test]
    fn fen_letters_follow_color() {
        assert_eq!(PieceKind::Knight.fen_char(PieceColor::White), 'N');
        assert_eq!(PieceKind::Knight.fen_char(PieceColor::Black), 'n');
    }
}
