use crate::controller::{MatchController, MatchPhase};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

/// Opponent card, evaluation bar and engine hints.
pub struct IntelPanel<'a> {
    pub controller: &'a MatchController,
    pub theme: &'a Theme,
}

impl<'a> IntelPanel<'a> {
    pub fn new(controller: &'a MatchController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }
}

impl Widget for IntelPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let controller = self.controller;
        let profile = controller.profile();
        let telemetry = controller.telemetry();

        let block = Block::default()
            .title(format!(" {} {} ", profile.icon, profile.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(profile.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(4)])
            .split(inner);

        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("{} Elo", profile.rating), Style::default().fg(theme.warning)),
                Span::styled(
                    format!("  skill {}", profile.skill_level()),
                    Style::default().fg(theme.muted),
                ),
            ]),
            Line::styled(
                profile.description.as_str(),
                Style::default().fg(theme.text_secondary),
            ),
        ])
        .render(chunks[0], buf);

        let eval_label = match telemetry.score {
            Some(score) => score.display(),
            None => "0.00".to_string(),
        };
        Gauge::default()
            .gauge_style(Style::default().fg(theme.eval_white).bg(theme.eval_black))
            .percent(telemetry.eval_bar_percent())
            .label(Span::styled(
                eval_label,
                Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
            ))
            .render(chunks[1], buf);

        let mut lines = vec![Line::raw("")];
        let best = telemetry.best_move.as_deref().unwrap_or("—");
        lines.push(Line::from(vec![
            Span::styled("Best move: ", Style::default().fg(theme.warning)),
            Span::styled(best, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        if let Some(depth) = telemetry.depth {
            lines.push(Line::styled(
                format!("Depth {}", depth),
                Style::default().fg(theme.muted),
            ));
        }

        let turn = match controller.phase() {
            MatchPhase::AwaitingSideToMove => Span::styled(
                "Waiting for side to move",
                Style::default().fg(theme.warning),
            ),
            MatchPhase::PlayerToMove => Span::styled(
                format!("Your move ({})", controller.human_side()),
                Style::default().fg(theme.positive),
            ),
            MatchPhase::OpponentToMove if telemetry.thinking => Span::styled(
                format!("{} is thinking…", profile.name),
                Style::default().fg(theme.info),
            ),
            MatchPhase::OpponentToMove => Span::styled(
                format!("{} to move", profile.name),
                Style::default().fg(theme.info),
            ),
            MatchPhase::GameOver => Span::styled(
                "Game over",
                Style::default().fg(theme.negative).add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(turn));
        if controller.phase() != MatchPhase::GameOver && controller.position().in_check() {
            lines.push(Line::styled(
                "Check!",
                Style::default().fg(theme.negative).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(vec![
            Span::styled("Promotion: ", Style::default().fg(theme.warning)),
            Span::raw(format!(
                "{} (p to change)",
                controller.promotion().glyph(controller.human_side())
            )),
        ]));
        if !controller.engine_online() {
            lines.push(Line::styled(
                "Engine offline",
                Style::default().fg(theme.negative),
            ));
        }
        if let Some(message) = controller.status_message() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(message, Style::default().fg(theme.text_primary)));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
    }
}
