//! Runtime configuration.
//!
//! Every value has a compile-time default and can be overridden through an
//! environment variable. Command-line flags (see `main.rs`) take precedence
//! over both.

use std::path::PathBuf;
use std::time::Duration;

/// Default log directory, relative to the working directory.
const DEFAULT_LOG_DIR: &str = "logs";

/// Default timeout for one vision model request (in seconds).
const DEFAULT_VISION_TIMEOUT_SECS: u64 = 60;

/// Get the vision model API key.
///
/// Priority:
/// 1. `GEMINI_API_KEY` env variable if set
/// 2. `API_KEY` env variable if set
/// 3. empty, in which case every detection fails with a general error
pub fn get_api_key() -> String {
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .unwrap_or_default()
}

/// Get the vision model name.
///
/// Priority:
/// 1. `BOARDSCAN_VISION_MODEL` env variable if set
/// 2. `gemini-3-pro-preview` as fallback
pub fn get_vision_model() -> String {
    std::env::var("BOARDSCAN_VISION_MODEL").unwrap_or_else(|_| vision::DEFAULT_MODEL.to_string())
}

/// Get the vision API base URL.
///
/// Priority:
/// 1. `BOARDSCAN_VISION_ENDPOINT` env variable if set
/// 2. the public Generative Language v1beta endpoint
pub fn get_vision_endpoint() -> String {
    std::env::var("BOARDSCAN_VISION_ENDPOINT")
        .unwrap_or_else(|_| vision::DEFAULT_ENDPOINT.to_string())
}

/// Get the vision request timeout.
///
/// Priority:
/// 1. `BOARDSCAN_VISION_TIMEOUT_SECS` env variable if set (falls back to the
///    default if it cannot be parsed as a `u64`)
/// 2. `60` seconds as fallback
pub fn get_vision_timeout() -> Duration {
    let secs = std::env::var("BOARDSCAN_VISION_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_VISION_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Get an explicit Stockfish path.
///
/// Priority:
/// 1. `BOARDSCAN_STOCKFISH_PATH` env variable if set
/// 2. `None`, meaning common install locations and `PATH` are searched
pub fn get_stockfish_path() -> Option<PathBuf> {
    std::env::var_os("BOARDSCAN_STOCKFISH_PATH").map(PathBuf::from)
}

/// Get the directory for rolling log files.
///
/// Priority:
/// 1. `BOARDSCAN_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BOARDSCAN_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}
