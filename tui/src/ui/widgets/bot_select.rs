use crate::roster::{OpponentProfile, MAX_CUSTOM_RATING, MIN_CUSTOM_RATING};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Roster list with a trailing custom-rating row.
pub struct BotSelect<'a> {
    pub roster: &'a [OpponentProfile],
    pub cursor: usize,
    pub custom_rating: u32,
    pub starting_from_photo: bool,
    pub theme: &'a Theme,
}

impl BotSelect<'_> {
    fn row_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(self.theme.dialog_highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }
}

impl Widget for BotSelect<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Choose your opponent ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));
        let inner = block.inner(area);
        block.render(area, buf);

        let origin = if self.starting_from_photo {
            "Starting from the scanned position"
        } else {
            "Starting from the standard position"
        };
        let mut lines = vec![
            Line::styled(origin, Style::default().fg(self.theme.text_secondary)),
            Line::raw(""),
        ];

        for (i, profile) in self.roster.iter().enumerate() {
            let selected = i == self.cursor;
            let style = self.row_style(selected);
            lines.push(Line::from(vec![
                Span::styled(if selected { "▶ " } else { "  " }, style),
                Span::styled(
                    format!("{} ", profile.icon),
                    style.fg(profile.accent),
                ),
                Span::styled(format!("{:<12}", profile.name), style.fg(self.theme.text_primary)),
                Span::styled(format!("{:>5} Elo", profile.rating), style.fg(self.theme.warning)),
            ]));
            lines.push(Line::styled(
                format!("     {}", profile.description),
                Style::default().fg(self.theme.muted),
            ));
        }

        let custom = OpponentProfile::custom(self.custom_rating);
        let selected = self.cursor == self.roster.len();
        let style = self.row_style(selected);
        lines.push(Line::from(vec![
            Span::styled(if selected { "▶ " } else { "  " }, style),
            Span::styled(format!("{} ", custom.icon), style.fg(custom.accent)),
            Span::styled(format!("{:<12}", custom.name), style.fg(self.theme.text_primary)),
            Span::styled(
                format!("◀ {:>4} ▶", custom.rating),
                style.fg(self.theme.warning),
            ),
        ]));
        lines.push(Line::styled(
            format!(
                "     Custom rating {}–{}, skill level {}",
                MIN_CUSTOM_RATING,
                MAX_CUSTOM_RATING,
                custom.skill_level()
            ),
            Style::default().fg(self.theme.muted),
        ));

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "↑/↓ choose · ←/→ adjust rating · Enter play · n home",
            Style::default().fg(self.theme.muted),
        ));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
