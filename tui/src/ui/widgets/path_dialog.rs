use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::centered;

/// Single-line prompt for the photo's file path.
pub struct PathDialog<'a> {
    pub input: &'a str,
    pub theme: &'a Theme,
}

impl Widget for PathDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered(area, 70, 7);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Open photo ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.dialog_border))
            .style(Style::default().bg(self.theme.dialog_bg));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let input = if self.input.is_empty() {
            Span::styled(
                "Type the path to a JPEG, PNG or WebP image…",
                Style::default().fg(self.theme.muted),
            )
        } else {
            Span::styled(
                format!("{}▏", self.input),
                Style::default().fg(self.theme.text_primary),
            )
        };

        Paragraph::new(vec![
            Line::raw(""),
            Line::from(input),
            Line::raw(""),
            Line::styled(
                "Enter open · Esc cancel",
                Style::default().fg(self.theme.muted),
            ),
        ])
        .render(inner, buf);
    }
}
