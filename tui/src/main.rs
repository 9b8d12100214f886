//! boardscan - photograph a chessboard, then play the position out against
//! Stockfish in the terminal.
//!
//! All tunables have environment overrides (see [`boardscan::config`]); the
//! flags below take precedence over those.

use std::path::PathBuf;

use boardscan::config;
use boardscan::ui::{self, AppSettings};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vision::GeminiConfig;

#[derive(Parser)]
#[command(name = "boardscan", about = "Scan a chessboard photo and play on against Stockfish")]
struct Cli {
    /// Photo to load on startup, skipping the file prompt.
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Stockfish executable. Searched for in common locations when omitted.
    #[arg(long)]
    stockfish: Option<PathBuf>,

    /// Vision model name.
    #[arg(long)]
    model: Option<String>,

    /// Directory for the rolling log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let log_dir = cli.log_dir.unwrap_or_else(config::get_log_dir);
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "boardscan");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("boardscan starting up");

    let mut vision = GeminiConfig::new(config::get_api_key());
    vision.model = cli.model.unwrap_or_else(config::get_vision_model);
    vision.endpoint = config::get_vision_endpoint();
    vision.timeout = config::get_vision_timeout();
    if vision.api_key.is_empty() {
        tracing::warn!("No GEMINI_API_KEY set, photo scans will fail");
    }

    let settings = AppSettings {
        vision,
        engine_path: cli.stockfish.or_else(config::get_stockfish_path),
        initial_image: cli.image,
    };

    ui::run_app(settings).await?;

    tracing::info!("boardscan shutting down");
    Ok(())
}
