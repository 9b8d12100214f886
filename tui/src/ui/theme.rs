use ratatui::style::Color;

/// All colors used by the TUI, grouped by purpose.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Board ──────────────────────────────────────────────────────
    pub light_square: Color,
    pub dark_square: Color,
    pub white_piece: Color,
    pub black_piece: Color,
    pub board_label: Color,

    // ── Overlays (light-square variant, dark-square variant) ──────
    pub overlay_selected: (Color, Color),
    pub overlay_legal_move: (Color, Color),
    pub overlay_last_move: (Color, Color),
    pub overlay_drag_source: (Color, Color),

    // ── Panel chrome ──────────────────────────────────────────────
    pub panel_border: Color,
    pub panel_border_selected: Color,
    pub panel_border_dimmed: Color,

    // ── Semantic status ───────────────────────────────────────────
    pub positive: Color,
    pub warning: Color,
    pub negative: Color,
    pub info: Color,
    pub muted: Color,

    // ── Text ──────────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_secondary: Color,

    // ── Dialogs / menus ───────────────────────────────────────────
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub dialog_highlight: Color,
    pub dialog_highlight_bg: Color,

    // ── Evaluation ────────────────────────────────────────────────
    pub eval_white: Color,
    pub eval_black: Color,
}

impl Theme {
    /// For terminals with a dark background.
    pub fn dark() -> Self {
        Self {
            light_square: Color::Rgb(240, 217, 181),
            dark_square: Color::Rgb(181, 136, 99),
            // Explicit RGB: many terminals remap ANSI white/black.
            white_piece: Color::Rgb(255, 255, 255),
            black_piece: Color::Rgb(0, 0, 0),
            board_label: Color::Yellow,

            overlay_selected: (Color::LightYellow, Color::Yellow),
            overlay_legal_move: (Color::LightBlue, Color::Blue),
            overlay_last_move: (Color::Rgb(205, 210, 106), Color::Rgb(170, 162, 58)),
            overlay_drag_source: (Color::Gray, Color::DarkGray),

            panel_border: Color::Cyan,
            panel_border_selected: Color::Yellow,
            panel_border_dimmed: Color::DarkGray,

            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            info: Color::Cyan,
            muted: Color::DarkGray,

            text_primary: Color::White,
            text_secondary: Color::Gray,

            dialog_bg: Color::Black,
            dialog_border: Color::Yellow,
            dialog_highlight: Color::Yellow,
            dialog_highlight_bg: Color::DarkGray,

            eval_white: Color::Rgb(235, 235, 235),
            eval_black: Color::Rgb(60, 60, 60),
        }
    }

    /// Pick the light- or dark-square variant of an overlay pair.
    pub fn overlay(pair: (Color, Color), is_dark: bool) -> Color {
        if is_dark {
            pair.1
        } else {
            pair.0
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
