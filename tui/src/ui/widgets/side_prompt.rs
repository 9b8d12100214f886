use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::centered;

/// Asks who is to move in a detected position.
pub struct SidePrompt<'a> {
    pub message: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for SidePrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered(area, 44, 9);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Who moves next? ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.dialog_border))
            .style(Style::default().bg(self.theme.dialog_bg));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let key = Style::default()
            .fg(self.theme.dialog_highlight)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw("You move:      "),
                Span::styled("w", key),
                Span::raw(" White  "),
                Span::styled("b", key),
                Span::raw(" Black"),
            ]),
            Line::from(vec![
                Span::raw("Opponent moves: "),
                Span::styled("W", key),
                Span::raw(" White  "),
                Span::styled("B", key),
                Span::raw(" Black"),
            ]),
            Line::raw(""),
        ];
        if let Some(message) = self.message {
            lines.push(Line::styled(message, Style::default().fg(self.theme.warning)));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
