//! Terminal events to shell and controller calls.
//!
//! Nothing here does I/O. Work that needs it comes back as a
//! [`ShellEffect`] for the render loop.

use chess::PieceColor;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::controller::{MatchPhase, Mover};
use crate::shell::{ShellEffect, View};
use crate::ui::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) -> ShellEffect {
    if key.kind == KeyEventKind::Release {
        return ShellEffect::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return ShellEffect::Quit;
    }

    // The notice blocks everything else until dismissed.
    if app.shell.notice_visible() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.shell.dismiss_notice();
        }
        return ShellEffect::None;
    }

    if app.shell.path_input().is_some() {
        return handle_path_dialog_key(app, key);
    }

    match app.shell.view() {
        View::Home => handle_home_key(app, key),
        View::Upload => handle_upload_key(app, key),
        View::BotSelection => handle_bot_key(app, key),
        View::Play => handle_play_key(app, key),
    }
}

fn handle_path_dialog_key(app: &mut App, key: KeyEvent) -> ShellEffect {
    match key.code {
        KeyCode::Enter => app.shell.submit_path(),
        KeyCode::Esc => {
            app.shell.close_path_dialog();
            ShellEffect::None
        }
        KeyCode::Backspace => {
            app.shell.path_backspace();
            ShellEffect::None
        }
        KeyCode::Char(c) => {
            app.shell.path_push(c);
            ShellEffect::None
        }
        _ => ShellEffect::None,
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) -> ShellEffect {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.shell.home_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.shell.home_move(1),
        KeyCode::Enter => return app.shell.home_activate(),
        KeyCode::Char('o') => app.shell.open_path_dialog(),
        KeyCode::Char('s') => app.shell.skip_vision(),
        KeyCode::Char('q') => return ShellEffect::Quit,
        _ => {}
    }
    ShellEffect::None
}

fn handle_upload_key(app: &mut App, key: KeyEvent) -> ShellEffect {
    match key.code {
        KeyCode::Enter => {
            if app.shell.detected_fen().is_some() {
                app.shell.proceed_to_bots();
                ShellEffect::None
            } else {
                app.shell.start_detection()
            }
        }
        KeyCode::Char('s') => {
            app.shell.skip_vision();
            ShellEffect::EndMatch
        }
        KeyCode::Char('o') => {
            app.shell.open_path_dialog();
            ShellEffect::None
        }
        KeyCode::Char('n') | KeyCode::Esc => app.shell.reset(),
        KeyCode::Char('q') => ShellEffect::Quit,
        _ => ShellEffect::None,
    }
}

fn handle_bot_key(app: &mut App, key: KeyEvent) -> ShellEffect {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.shell.bot_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.shell.bot_move(1),
        KeyCode::Left | KeyCode::Char('h') => app.shell.adjust_custom_rating(-1),
        KeyCode::Right | KeyCode::Char('l') => app.shell.adjust_custom_rating(1),
        KeyCode::Enter => return app.shell.choose_opponent(),
        KeyCode::Char('n') | KeyCode::Esc => return app.shell.reset(),
        KeyCode::Char('q') => return ShellEffect::Quit,
        _ => {}
    }
    ShellEffect::None
}

fn handle_play_key(app: &mut App, key: KeyEvent) -> ShellEffect {
    match key.code {
        KeyCode::Char('q') => return ShellEffect::Quit,
        KeyCode::Char('n') => {
            app.input.clear();
            return app.shell.reset();
        }
        _ => {}
    }

    let Some(session) = app.session.as_mut() else {
        return ShellEffect::None;
    };
    let controller = &mut session.controller;

    if controller.phase() == MatchPhase::AwaitingSideToMove {
        match key.code {
            KeyCode::Char('w') => controller.choose_side_to_move(PieceColor::White, Mover::Player),
            KeyCode::Char('b') => controller.choose_side_to_move(PieceColor::Black, Mover::Player),
            KeyCode::Char('W') => {
                controller.choose_side_to_move(PieceColor::White, Mover::Opponent)
            }
            KeyCode::Char('B') => {
                controller.choose_side_to_move(PieceColor::Black, Mover::Opponent)
            }
            _ => {}
        }
        return ShellEffect::None;
    }

    match key.code {
        KeyCode::Esc => {
            app.input.clear();
            controller.clear_selection();
        }
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Char('p') => controller.cycle_promotion(),
        KeyCode::Char(c) => {
            app.input.push_char(c);
            if let Some(square) = app.input.take_square() {
                controller.select_square(square);
            }
        }
        _ => {}
    }
    ShellEffect::None
}

/// Mouse input only matters on the board in the play view.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.shell.view() != View::Play || app.shell.notice_visible() {
        return;
    }
    let Some(session) = app.session.as_mut() else {
        return;
    };
    let controller = &mut session.controller;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => controller.pointer_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => controller.pointer_move(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => controller.pointer_up(mouse.column, mouse.row),
        _ => {}
    }
}
