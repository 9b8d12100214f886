//! Engine evaluation score.

/// Centipawns: positive = the viewing side is better.
/// Mate: positive N = the viewing side mates in N moves,
/// negative N = the viewing side gets mated in N moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisScore {
    Centipawns(i32),
    Mate(i32),
}

impl AnalysisScore {
    pub fn display(&self) -> String {
        match self {
            Self::Centipawns(cp) => format!("{:+.2}", *cp as f64 / 100.0),
            Self::Mate(m) => {
                if *m > 0 {
                    format!("+M{}", m)
                } else {
                    format!("-M{}", m.abs())
                }
            }
        }
    }

    /// Score in pawns. Mate scores saturate at ±100.
    pub fn pawns(&self) -> f64 {
        match self {
            Self::Centipawns(cp) => *cp as f64 / 100.0,
            Self::Mate(m) if *m >= 0 => 100.0,
            Self::Mate(_) => -100.0,
        }
    }

    /// Negate the score (flip perspective).
    pub fn negate(&self) -> Self {
        match self {
            Self::Centipawns(cp) => Self::Centipawns(-cp),
            Self::Mate(m) => Self::Mate(-m),
        }
    }
}

impl std::fmt::Display for AnalysisScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
