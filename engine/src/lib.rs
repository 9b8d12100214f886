pub mod stockfish;
pub mod uci;

pub use stockfish::{find_stockfish_path, EngineConfig, StockfishEngine};
pub use uci::{UciError, UciMessage};

use std::time::Duration;

use cozy_chess::Move;

/// Commands sent to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    SetPosition { fen: String },
    SetOption { name: String, value: String },
    Go(GoParams),
    Stop,
    Quit,
}

/// Parameters for the "go" command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub movetime: Option<u64>, // Move time in milliseconds
    pub depth: Option<u8>,     // Search depth
}

impl GoParams {
    pub fn movetime(ms: u64) -> Self {
        Self {
            movetime: Some(ms),
            depth: None,
        }
    }

    pub fn depth(depth: u8) -> Self {
        Self {
            movetime: None,
            depth: Some(depth),
        }
    }
}

impl EngineCommand {
    /// The UCI line for this command, without the trailing newline.
    pub fn to_uci(&self) -> String {
        match self {
            Self::SetPosition { fen } => format!("position fen {}", fen),
            Self::SetOption { name, value } => format!("setoption name {} value {}", name, value),
            Self::Go(GoParams {
                movetime: Some(ms), ..
            }) => format!("go movetime {}", ms),
            Self::Go(GoParams {
                depth: Some(depth), ..
            }) => format!("go depth {}", depth),
            Self::Go(_) => "go movetime 1000".to_string(),
            Self::Stop => "stop".to_string(),
            Self::Quit => "quit".to_string(),
        }
    }
}

/// Events received from the engine
#[derive(Debug, Clone)]
pub enum EngineEvent {
    Ready,
    /// End of a search. `None` when the engine had no legal move to offer.
    BestMove(Option<Move>),
    Info(EngineInfo),
}

/// Engine analysis information
#[derive(Debug, Clone, Default)]
pub struct EngineInfo {
    pub depth: Option<u8>,
    pub score: Option<Score>,
    pub pv: Vec<Move>, // Principal variation
}

/// Score from the side to move's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32),
    Mate(i32), // Negative for being mated
}

impl From<Score> for chess::AnalysisScore {
    fn from(score: Score) -> Self {
        match score {
            Score::Centipawns(cp) => Self::Centipawns(cp),
            Score::Mate(m) => Self::Mate(m),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Stockfish executable not found")]
    NotFound,
    #[error("Failed to spawn engine: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Engine process has no {0}")]
    MissingPipe(&'static str),
    #[error("Engine did not answer uciok within {0:?}")]
    StartupTimeout(Duration),
    #[error("Engine closed before sending uciok")]
    ClosedDuringStartup,
    #[error("Engine command channel closed")]
    ChannelClosed,
}
