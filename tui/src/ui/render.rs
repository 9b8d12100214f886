//! Frame layout per view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::board_view::BoardGeometry;
use crate::controller::MatchPhase;
use crate::shell::View;
use crate::ui::app::App;
use crate::ui::widgets::{
    BoardWidget, BotSelect, ControlsPanel, HomeMenu, IntelPanel, MoveHistoryPanel, Notice,
    PathDialog, SidePrompt, UploadPanel,
};

/// Width of the side column in the play view.
const SIDE_PANEL_WIDTH: u16 = 36;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    match app.shell.view() {
        View::Home => f.render_widget(HomeMenu::new(app.shell.home_cursor(), &app.theme), area),
        View::Upload => {
            let panel = UploadPanel {
                image_name: app.shell.image_name(),
                image_len: app.shell.image().map(|i| i.bytes.len()).unwrap_or(0),
                detection: app.shell.detection(),
                scan_label: app.shell.scan_label(),
                theme: &app.theme,
            };
            f.render_widget(panel, area);
        }
        View::BotSelection => {
            let select = BotSelect {
                roster: app.shell.roster(),
                cursor: app.shell.bot_cursor(),
                custom_rating: app.shell.custom_rating(),
                starting_from_photo: app.shell.detected_fen().is_some(),
                theme: &app.theme,
            };
            f.render_widget(select, area);
        }
        View::Play => draw_play(f, app, area),
    }

    if let Some(input) = app.shell.path_input() {
        f.render_widget(
            PathDialog {
                input,
                theme: &app.theme,
            },
            area,
        );
    }
    if let Some(message) = app.shell.error() {
        f.render_widget(
            Notice {
                message,
                theme: &app.theme,
            },
            area,
        );
    }
}

fn draw_play(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(session) = app.session.as_mut() else {
        let waiting = Paragraph::new(Line::raw("Starting match…")).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.panel_border_dimmed)),
        );
        f.render_widget(waiting, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(area);

    let board_block = Block::default()
        .title(" ♟ Board ♟ ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.panel_border));
    let board_inner = board_block.inner(columns[0]);
    f.render_widget(board_block, columns[0]);

    // The geometry drawn this frame is the one pointer hits resolve against.
    let geometry = BoardGeometry::fit(board_inner);
    session.controller.set_geometry(geometry);
    let controller = &session.controller;

    f.render_widget(
        BoardWidget::new(controller.view(), geometry, controller.drag(), &app.theme),
        board_inner,
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(9),
        ])
        .split(columns[1]);

    f.render_widget(IntelPanel::new(controller, &app.theme), side[0]);
    let black_first = controller.first_mover() == Some(chess::PieceColor::Black);
    f.render_widget(
        MoveHistoryPanel::new(&controller.telemetry().history, black_first, &app.theme),
        side[1],
    );
    f.render_widget(ControlsPanel::new(app.input.as_str(), &app.theme), side[2]);

    if controller.phase() == MatchPhase::AwaitingSideToMove {
        f.render_widget(
            SidePrompt {
                message: controller.status_message(),
                theme: &app.theme,
            },
            board_inner,
        );
    }
}
