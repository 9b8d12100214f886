use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct MoveHistoryPanel<'a> {
    pub history: &'a [String],
    /// True when the first recorded move was Black's.
    pub black_first: bool,
    pub theme: &'a Theme,
}

impl<'a> MoveHistoryPanel<'a> {
    pub fn new(history: &'a [String], black_first: bool, theme: &'a Theme) -> Self {
        Self {
            history,
            black_first,
            theme,
        }
    }
}

impl Widget for MoveHistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" ♔ Moves ♕ ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            Paragraph::new("No moves yet").render(inner, buf);
            return;
        }

        let number_style = Style::default().fg(self.theme.warning);
        let move_style = |white: bool| {
            let fg = if white {
                self.theme.text_primary
            } else {
                self.theme.text_secondary
            };
            Style::default().fg(fg).add_modifier(Modifier::BOLD)
        };

        let mut lines: Vec<Line> = vec![];
        // Ply offset so that pairs line up when Black moved first.
        let offset = usize::from(self.black_first);
        if self.black_first {
            lines.push(Line::from(vec![
                Span::styled("1. ", number_style),
                Span::raw("…"),
            ]));
        }

        for (i, san) in self.history.iter().enumerate() {
            let ply = i + offset;
            let is_white = ply % 2 == 0;
            if is_white {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}. ", ply / 2 + 1), number_style),
                    Span::styled(san.clone(), move_style(true)),
                ]));
            } else if let Some(last) = lines.last_mut() {
                last.spans.push(Span::raw("  "));
                last.spans.push(Span::styled(san.clone(), move_style(false)));
            }
        }

        // Keep the latest moves in view.
        let visible = inner.height as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;
        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}
