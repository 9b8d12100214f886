use crate::uci::{parse_uci_message, UciMessage};
use crate::{EngineCommand, EngineError, EngineEvent};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::sync::mpsc;

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// A running Stockfish process. Commands go in through `send_command`,
/// parsed output comes back through `recv_event`.
pub struct StockfishEngine {
    process: Child,
    command_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

/// How to launch the engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Executable to run. Searched for in common locations when unset.
    pub path: Option<PathBuf>,
    /// UCI "Skill Level", 0..=20.
    pub skill_level: Option<u8>,
}

impl StockfishEngine {
    #[tracing::instrument(level = "info")]
    pub async fn spawn_with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let path = match config.path.clone() {
            Some(path) => path,
            None => find_stockfish_path().ok_or(EngineError::NotFound)?,
        };
        tracing::info!("Starting engine at {:?}", path);

        let mut process = tokio::process::Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::error!("Failed to spawn engine: {}", e);
                EngineError::Spawn(e)
            })?;

        let mut stdin = process.stdin.take().ok_or(EngineError::MissingPipe("stdin"))?;
        let stdout = process
            .stdout
            .take()
            .ok_or(EngineError::MissingPipe("stdout"))?;

        write_line(&mut stdin, "uci").await?;

        let (event_tx, mut event_rx) = mpsc::channel::<EngineEvent>(32);
        tokio::spawn(read_engine_output(stdout, event_tx));

        let handshake = tokio::time::timeout(STARTUP_TIMEOUT, async {
            while let Some(event) = event_rx.recv().await {
                if matches!(event, EngineEvent::Ready) {
                    return Ok(());
                }
            }
            Err(EngineError::ClosedDuringStartup)
        })
        .await;

        match handshake {
            Ok(Ok(())) => tracing::debug!("Received uciok, engine ready"),
            Ok(Err(e)) => {
                tracing::error!("Engine initialization failed: {}", e);
                let _ = process.kill().await;
                return Err(e);
            }
            Err(_) => {
                tracing::error!("Timeout waiting for uciok");
                let _ = process.kill().await;
                return Err(EngineError::StartupTimeout(STARTUP_TIMEOUT));
            }
        }

        if let Some(level) = config.skill_level {
            let level = level.min(20);
            tracing::info!("Setting skill level to {}", level);
            let option = EngineCommand::SetOption {
                name: "Skill Level".to_string(),
                value: level.to_string(),
            };
            write_line(&mut stdin, &option.to_uci()).await?;
        }
        write_line(&mut stdin, "isready").await?;

        let (command_tx, command_rx) = mpsc::channel::<EngineCommand>(32);
        tokio::spawn(write_engine_input(stdin, command_rx));

        tracing::info!("Engine spawned and initialized");
        Ok(Self {
            process,
            command_tx,
            event_rx,
        })
    }

    /// Queue a command. Commands reach the engine in the order they are sent.
    pub async fn send_command(&self, cmd: EngineCommand) -> Result<(), EngineError> {
        tracing::debug!("Queueing command: {:?}", cmd);
        self.command_tx.send(cmd).await.map_err(|e| {
            tracing::error!("Failed to queue engine command: {}", e);
            EngineError::ChannelClosed
        })
    }

    /// Next parsed event. `None` once the engine's output has closed.
    pub async fn recv_event(&mut self) -> Option<EngineEvent> {
        self.event_rx.recv().await
    }

    /// Ask the engine to quit, then kill it if it lingers.
    pub async fn shutdown(mut self) {
        let _ = self.send_command(EngineCommand::Quit).await;
        let _ = tokio::time::timeout(SHUTDOWN_GRACE, self.process.wait()).await;
        let _ = self.process.kill().await;
        tracing::info!("Engine shut down");
    }
}

async fn write_line(stdin: &mut ChildStdin, line: &str) -> Result<(), EngineError> {
    tracing::trace!("UCI >> {}", line);
    stdin.write_all(line.as_bytes()).await?;
    stdin.write_all(b"\n").await?;
    stdin.flush().await?;
    Ok(())
}

/// Turns engine stdout into events until EOF. Lines that do not parse are
/// dropped.
async fn read_engine_output(stdout: ChildStdout, event_tx: mpsc::Sender<EngineEvent>) {
    let mut reader = BufReader::new(stdout);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                tracing::warn!("Engine stdout EOF");
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                tracing::trace!("UCI << {}", trimmed);

                let event = match parse_uci_message(trimmed) {
                    Ok(UciMessage::UciOk) | Ok(UciMessage::ReadyOk) => EngineEvent::Ready,
                    Ok(UciMessage::BestMove { mv }) => {
                        tracing::debug!("Received bestmove: {:?}", mv);
                        EngineEvent::BestMove(mv)
                    }
                    Ok(UciMessage::Info(info)) => EngineEvent::Info(info),
                    Ok(UciMessage::Id { name, value }) => {
                        tracing::debug!("Engine id {}: {}", name, value);
                        continue;
                    }
                    Err(e) => {
                        tracing::trace!("Ignoring engine line: {}", e);
                        continue;
                    }
                };

                if event_tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Error reading engine stdout: {}", e);
                break;
            }
        }
    }
    tracing::debug!("Engine output reader exiting");
}

async fn write_engine_input(mut stdin: ChildStdin, mut command_rx: mpsc::Receiver<EngineCommand>) {
    while let Some(cmd) = command_rx.recv().await {
        let quit = cmd == EngineCommand::Quit;
        if let Err(e) = write_line(&mut stdin, &cmd.to_uci()).await {
            tracing::error!("Failed to write to engine: {}", e);
            break;
        }
        if quit {
            break;
        }
    }
    tracing::debug!("Engine input writer exiting");
}

/// Find a Stockfish executable in common locations, then on `PATH`.
pub fn find_stockfish_path() -> Option<PathBuf> {
    let candidates = [
        "/usr/local/bin/stockfish",
        "/usr/bin/stockfish",
        "/opt/homebrew/bin/stockfish",
        "/usr/games/stockfish",
    ];

    if let Some(found) = candidates.iter().map(Path::new).find(|p| p.exists()) {
        return Some(found.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join("stockfish"))
        .find(|p| p.is_file())
}
