//! Opponent profiles and how they map onto engine settings.

use ratatui::style::Color;

pub const MIN_CUSTOM_RATING: u32 = 400;
pub const MAX_CUSTOM_RATING: u32 = 3200;
pub const CUSTOM_RATING_STEP: u32 = 50;
pub const DEFAULT_CUSTOM_RATING: u32 = 1200;

/// Depth of the advisory search run while the player is to move.
pub const ADVISORY_DEPTH: u8 = 12;

/// Profiles rated at or above this get the long think time.
const LONG_THINK_RATING: u32 = 4000;
const LONG_THINK_MS: u64 = 2000;
const SHORT_THINK_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentProfile {
    pub id: String,
    pub name: String,
    pub rating: u32,
    pub description: String,
    pub accent: Color,
    pub icon: char,
}

impl OpponentProfile {
    fn fixed(id: &str, name: &str, rating: u32, description: &str, accent: Color, icon: char) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rating,
            description: description.to_string(),
            accent,
            icon,
        }
    }

    /// The built-in opponents, weakest first.
    pub fn roster() -> Vec<Self> {
        vec![
            Self::fixed(
                "novice",
                "Sparky",
                600,
                "Plays fast and loose. Hangs pieces to tactics.",
                Color::Green,
                '♙',
            ),
            Self::fixed(
                "intermediate",
                "Sentinel",
                1500,
                "Sound positional play and basic endgame technique.",
                Color::Yellow,
                '♘',
            ),
            Self::fixed(
                "expert",
                "Oracle",
                2800,
                "Master-level precision with deep calculation.",
                Color::Magenta,
                '♕',
            ),
            Self::fixed(
                "boss",
                "Final Boss",
                4572,
                "Full-strength search with extra thinking time.",
                Color::Red,
                '♚',
            ),
        ]
    }

    /// Profile synthesised from the rating selector. The rating is clamped
    /// to the selector range.
    pub fn custom(rating: u32) -> Self {
        let rating = clamp_rating(rating);
        Self {
            id: "custom".to_string(),
            name: "Neural Link".to_string(),
            rating,
            description: format!("Tuned to play at about {} Elo.", rating),
            accent: Color::LightBlue,
            icon: '♖',
        }
    }

    /// UCI skill level: one step per 200 rating points, capped at 20.
    pub fn skill_level(&self) -> u8 {
        (self.rating / 200).min(20) as u8
    }

    /// Time budget for the opponent's own moves.
    pub fn move_time_ms(&self) -> u64 {
        if self.rating >= LONG_THINK_RATING {
            LONG_THINK_MS
        } else {
            SHORT_THINK_MS
        }
    }
}

pub fn clamp_rating(rating: u32) -> u32 {
    let snapped = (rating / CUSTOM_RATING_STEP) * CUSTOM_RATING_STEP;
    snapped.clamp(MIN_CUSTOM_RATING, MAX_CUSTOM_RATING)
}

/// Move the rating selector by `steps` increments.
pub fn step_rating(rating: u32, steps: i32) -> u32 {
    let delta = steps.unsigned_abs() * CUSTOM_RATING_STEP;
    let moved = if steps >= 0 {
        rating.saturating_add(delta)
    } else {
        rating.saturating_sub(delta)
    };
    clamp_rating(moved)
}
