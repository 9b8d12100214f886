use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use vision::{DetectionResult, GeminiClient, GeminiConfig, ImageData, VisionModel};

use crate::session::{next_engine_event, PlaySession};
use crate::shell::{ShellEffect, SCAN_TICK};
use crate::ui::app::App;
use crate::ui::{input, render};

/// ~30 fps. Input, detection and engine events wake the loop immediately.
const RENDER_TICK: Duration = Duration::from_millis(33);

/// Startup settings resolved from flags, environment and defaults.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub vision: GeminiConfig,
    pub engine_path: Option<PathBuf>,
    /// Photo to load straight into the upload view.
    pub initial_image: Option<PathBuf>,
}

type DetectionReply = (u64, DetectionResult<String>);

pub async fn run_app(settings: AppSettings) -> anyhow::Result<()> {
    let model: Arc<dyn VisionModel> = Arc::new(GeminiClient::new(settings.vision.clone())?);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_ui_loop(&mut terminal, model, &settings).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_ui_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    model: Arc<dyn VisionModel>,
    settings: &AppSettings,
) -> anyhow::Result<()> {
    let mut app = App::new();
    if let Some(path) = settings.initial_image.as_deref() {
        app.shell.load_image(path);
    }

    let mut term_events = EventStream::new();
    let mut render_tick = tokio::time::interval(RENDER_TICK);
    let mut scan_tick = scan_interval();
    let (detect_tx, mut detect_rx) = mpsc::channel::<DetectionReply>(4);
    let mut detection_task: Option<JoinHandle<()>> = None;

    loop {
        terminal.draw(|f| render::draw(f, &mut app))?;

        let scanning = app.shell.is_scanning();
        let effect = tokio::select! {
            biased;

            // Keyboard / mouse (highest priority)
            maybe_event = term_events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => input::handle_key(&mut app, key),
                    Some(Ok(Event::Mouse(mouse))) => {
                        input::handle_mouse(&mut app, mouse);
                        ShellEffect::None
                    }
                    Some(Ok(_)) => ShellEffect::None,
                    Some(Err(e)) => {
                        tracing::warn!("Terminal event error: {}", e);
                        ShellEffect::None
                    }
                    None => ShellEffect::Quit,
                }
            }

            Some((request_id, result)) = detect_rx.recv() => {
                app.shell.finish_detection(request_id, result);
                ShellEffect::None
            }

            event = next_engine_event(&mut app.session) => {
                if let Some(session) = app.session.as_mut() {
                    session.handle_engine_event(event).await;
                }
                ShellEffect::None
            }

            _ = scan_tick.tick(), if scanning => {
                app.shell.tick_scan();
                ShellEffect::None
            }

            _ = render_tick.tick() => ShellEffect::None,
        };

        // Moves made by input queue engine commands.
        if let Some(session) = app.session.as_mut() {
            session.flush_engine_commands().await;
        }

        match effect {
            ShellEffect::None => {}
            ShellEffect::StartDetection { request_id, image } => {
                if let Some(task) = detection_task.take() {
                    task.abort();
                }
                scan_tick.reset();
                detection_task = Some(spawn_detection(
                    Arc::clone(&model),
                    request_id,
                    image,
                    detect_tx.clone(),
                ));
            }
            ShellEffect::StartMatch(setup) => {
                // Show the play view while the engine starts.
                terminal.draw(|f| render::draw(f, &mut app))?;
                match PlaySession::start(setup, settings.engine_path.clone()).await {
                    Ok(session) => app.session = Some(session),
                    Err(e) => {
                        tracing::error!("Failed to start match: {}", e);
                        app.shell
                            .match_failed(format!("Could not set up the position: {}", e));
                    }
                }
            }
            ShellEffect::EndMatch => {
                if let Some(task) = detection_task.take() {
                    task.abort();
                }
                app.input.clear();
                if let Some(session) = app.session.take() {
                    session.shutdown().await;
                }
            }
            ShellEffect::Quit => {
                if let Some(task) = detection_task.take() {
                    task.abort();
                }
                if let Some(session) = app.session.take() {
                    session.shutdown().await;
                }
                return Ok(());
            }
        }
    }
}

/// Scan indicator clock. Missed ticks are skipped, and the loop resets it
/// whenever a scan starts.
fn scan_interval() -> Interval {
    let mut tick = tokio::time::interval(SCAN_TICK);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tick
}

/// Exactly one model call. The reply is tagged so the shell can drop it if
/// the request was abandoned meanwhile.
fn spawn_detection(
    model: Arc<dyn VisionModel>,
    request_id: u64,
    image: ImageData,
    reply_tx: mpsc::Sender<DetectionReply>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = vision::detect(model.as_ref(), &image).await;
        if reply_tx.send((request_id, result)).await.is_err() {
            tracing::debug!("Detection reply {} dropped, loop is gone", request_id);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout, Instant};

    async fn ready_ticks(tick: &mut Interval) -> usize {
        let mut ready = 0;
        while timeout(Duration::from_millis(1), tick.tick()).await.is_ok() {
            ready += 1;
        }
        ready
    }

    #[tokio::test(start_paused = true)]
    async fn idle_scan_clock_does_not_burst() {
        let mut tick = scan_interval();
        tick.tick().await;
        sleep(Duration::from_millis(3010)).await;
        assert!(ready_ticks(&mut tick).await <= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_scan_clock_steps_at_the_scan_rate() {
        let mut tick = scan_interval();
        tick.tick().await;
        sleep(Duration::from_secs(3)).await;

        tick.reset();
        assert_eq!(ready_ticks(&mut tick).await, 0);

        let start = Instant::now();
        for _ in 0..3 {
            tick.tick().await;
        }
        assert!(start.elapsed() >= SCAN_TICK * 2);
    }
}
