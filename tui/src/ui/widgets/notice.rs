use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered;

/// Blocking error notice. Any dismissal leaves the view unchanged.
pub struct Notice<'a> {
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered(area, 60, 9);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" ⚠ Optical Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.negative))
            .style(Style::default().bg(self.theme.dialog_bg));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                self.message,
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                "Enter to recalibrate",
                Style::default().fg(self.theme.muted),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
    }
}
