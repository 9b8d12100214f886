use crate::shell::HomeItem;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const BANNER: [&str; 3] = [
    "╔╗ ╔═╗╔═╗╦═╗╔╦╗╔═╗╔═╗╔═╗╔╗╔",
    "╠╩╗║ ║╠═╣╠╦╝ ║║╚═╗║  ╠═╣║║║",
    "╚═╝╚═╝╩ ╩╩╚══╩╝╚═╝╚═╝╩ ╩╝╚╝",
];

pub struct HomeMenu<'a> {
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl<'a> HomeMenu<'a> {
    pub fn new(cursor: usize, theme: &'a Theme) -> Self {
        Self { cursor, theme }
    }
}

impl Widget for HomeMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" ♞ Board Scan ♞ ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = BANNER
            .iter()
            .map(|row| Line::styled(*row, Style::default().fg(self.theme.info)))
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Photograph a real board, then play on from that position.",
            Style::default().fg(self.theme.text_secondary),
        ));
        lines.push(Line::raw(""));

        for (i, item) in HomeItem::ALL.iter().enumerate() {
            let selected = i == self.cursor;
            let style = if selected {
                Style::default()
                    .fg(self.theme.dialog_highlight)
                    .bg(self.theme.dialog_highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_primary)
            };
            let marker = if selected { "▶ " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, item.label()),
                style,
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "↑/↓ choose · Enter select · o open photo · s skip · q quit",
            Style::default().fg(self.theme.muted),
        ));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
