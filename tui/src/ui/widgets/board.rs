use crate::board_view::{BoardGeometry, BoardView, SquareView, RANK_LABEL_WIDTH};
use crate::controller::DragState;
use crate::ui::theme::Theme;
use chess::{PieceColor, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Draws the 8x8 grid at a fixed geometry. The same geometry is handed to
/// the controller so pointer hits line up with what is on screen.
pub struct BoardWidget<'a> {
    pub view: &'a BoardView,
    pub geometry: BoardGeometry,
    pub drag: Option<DragState>,
    pub theme: &'a Theme,
}

impl<'a> BoardWidget<'a> {
    pub fn new(
        view: &'a BoardView,
        geometry: BoardGeometry,
        drag: Option<DragState>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            view,
            geometry,
            drag,
            theme,
        }
    }

    fn background(&self, square: &SquareView) -> Color {
        let theme = self.theme;
        let pair = if square.is_being_dragged {
            theme.overlay_drag_source
        } else if square.is_selected {
            theme.overlay_selected
        } else if square.is_valid_target {
            theme.overlay_legal_move
        } else if square.is_last_move {
            theme.overlay_last_move
        } else {
            (theme.light_square, theme.dark_square)
        };
        Theme::overlay(pair, square.is_dark)
    }

    fn piece_style(&self, color: PieceColor, bg: Color) -> Style {
        let fg = match color {
            PieceColor::White => self.theme.white_piece,
            PieceColor::Black => self.theme.black_piece,
        };
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let g = self.geometry;
        let label_style = Style::default().fg(self.theme.board_label);

        for rank_idx in 0..8u16 {
            let y = g.top + rank_idx * g.square_height + g.square_height / 2;
            let x = g.left.saturating_sub(RANK_LABEL_WIDTH - 1);
            if y < area.bottom() && x >= area.x {
                buf.set_string(x, y, format!("{}", 8 - rank_idx), label_style);
            }
        }

        let file_y = g.top + g.height();
        for file_idx in 0..8u16 {
            let x = g.left + file_idx * g.square_width + g.square_width / 2;
            if x < area.right() && file_y < area.bottom() {
                let file = (b'a' + file_idx as u8) as char;
                buf.set_string(x, file_y, file.to_string(), label_style);
            }
        }

        for square in self.view.squares() {
            let (x, y) = g.square_origin(square.square);
            let bg = self.background(square);
            render_square(buf, x, y, bg, g, area);

            // The dragged piece is drawn at the pointer instead.
            if square.is_being_dragged && self.drag.is_some() {
                continue;
            }
            if let Some((kind, color)) = square.piece {
                let cx = x + g.square_width / 2;
                let cy = y + g.square_height / 2;
                if cx < area.right() && cy < area.bottom() {
                    buf.set_string(cx, cy, glyph(kind, color), self.piece_style(color, bg));
                }
            }
        }

        if let Some(drag) = self.drag {
            if let Some((kind, color)) = self.view.square(drag.from).piece {
                if area.contains((drag.x, drag.y).into()) {
                    let bg = buf[(drag.x, drag.y)].bg;
                    buf.set_string(drag.x, drag.y, glyph(kind, color), self.piece_style(color, bg));
                }
            }
        }
    }
}

fn glyph(kind: PieceKind, color: PieceColor) -> String {
    kind.glyph(color).to_string()
}

fn render_square(buf: &mut Buffer, x: u16, y: u16, bg: Color, g: BoardGeometry, bounds: Rect) {
    let style = Style::default().bg(bg);
    for dy in 0..g.square_height {
        for dx in 0..g.square_width {
            let px = x + dx;
            let py = y + dy;
            if px < bounds.right() && py < bounds.bottom() {
                buf[(px, py)].set_style(style);
            }
        }
    }
}
