use crate::shell::DetectionState;
use crate::ui::theme::Theme;
use chess::DisplayBoard;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Photo summary, scan progress and, once detected, a preview of the board.
pub struct UploadPanel<'a> {
    pub image_name: Option<&'a str>,
    pub image_len: usize,
    pub detection: &'a DetectionState,
    pub scan_label: Option<String>,
    pub theme: &'a Theme,
}

impl Widget for UploadPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" 📷 Photo ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(10), Constraint::Length(2)])
            .split(inner);

        let name = self.image_name.unwrap_or("image");
        let mut lines = vec![Line::from(vec![
            Span::styled("File: ", Style::default().fg(self.theme.warning)),
            Span::raw(format!("{} ({} KB)", name, self.image_len.div_ceil(1024))),
        ])];

        let (status, hint) = match self.detection {
            DetectionState::Idle => ("Ready to scan".to_string(), "Enter to analyse"),
            DetectionState::Scanning { .. } => (
                format!(
                    "Scanning sector {} …",
                    self.scan_label.as_deref().unwrap_or("a8")
                ),
                "Waiting for the vision model",
            ),
            DetectionState::Detected(_) => (
                "Position detected".to_string(),
                "Enter to choose an opponent · s to ignore it",
            ),
            DetectionState::Failed => ("Scan failed".to_string(), "Enter to try again"),
        };
        let status_color = match self.detection {
            DetectionState::Detected(_) => self.theme.positive,
            DetectionState::Failed => self.theme.negative,
            _ => self.theme.info,
        };
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            status,
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(hint, Style::default().fg(self.theme.text_secondary)));
        Paragraph::new(lines).render(chunks[0], buf);

        if let DetectionState::Detected(fen) = self.detection {
            render_preview(fen, chunks[1], buf, self.theme);
        }

        Paragraph::new(Line::styled(
            "n home · s skip vision · q quit",
            Style::default().fg(self.theme.muted),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }
}

/// Compact 8-line preview of a detected placement.
fn render_preview(fen: &str, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let Ok(board) = DisplayBoard::from_fen(fen) else {
        return;
    };
    let mut lines = Vec::with_capacity(9);
    for rank in (0..8).rev() {
        let mut spans = vec![Span::styled(
            format!("{} ", rank + 1),
            Style::default().fg(theme.board_label),
        )];
        for file in 0..8 {
            let is_dark = (file + rank) % 2 == 0;
            let bg = if is_dark { theme.dark_square } else { theme.light_square };
            let (text, fg) = match board.piece_at(file, rank) {
                Some((kind, color)) => (
                    format!("{} ", kind.glyph(color)),
                    match color {
                        chess::PieceColor::White => theme.white_piece,
                        chess::PieceColor::Black => theme.black_piece,
                    },
                ),
                None => ("  ".to_string(), bg),
            };
            spans.push(Span::styled(text, Style::default().fg(fg).bg(bg)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::styled(
        "  a b c d e f g h",
        Style::default().fg(theme.board_label),
    ));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}
