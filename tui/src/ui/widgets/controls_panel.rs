use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ControlsPanel<'a> {
    pub input_buffer: &'a str,
    pub theme: &'a Theme,
}

impl<'a> ControlsPanel<'a> {
    pub fn new(input_buffer: &'a str, theme: &'a Theme) -> Self {
        Self {
            input_buffer,
            theme,
        }
    }
}

fn key_line(key: &str, action: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} ", key),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(action.to_string()),
    ])
}

impl Widget for ControlsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" ⌨ Controls ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![];

        if !self.input_buffer.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(
                    "Input: ",
                    Style::default()
                        .fg(self.theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("> {}", self.input_buffer),
                    Style::default()
                        .fg(self.theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        lines.push(key_line("drag/click", "Move a piece", self.theme.positive));
        lines.push(key_line("e2", "Type a square", self.theme.positive));
        lines.push(key_line("p", "Cycle promotion", self.theme.info));
        lines.push(key_line("Esc", "Clear selection", self.theme.info));
        lines.push(key_line("n", "New scan", self.theme.warning));
        lines.push(key_line("q", "Quit", self.theme.negative));

        Paragraph::new(lines).render(inner, buf);
    }
}
