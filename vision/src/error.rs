//! Error types for board detection

use thiserror::Error;

pub type DetectionResult<T> = Result<T, DetectionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The model looked and found no chessboard.
    #[error("No chessboard found in image")]
    NoBoardFound,

    /// Anything else: transport failure, bad credentials, malformed reply.
    #[error("Board detection failed: {0}")]
    General(String),
}

impl From<reqwest::Error> for DetectionError {
    fn from(err: reqwest::Error) -> Self {
        Self::General(err.to_string())
    }
}

impl From<serde_json::Error> for DetectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::General(format!("reply is not valid JSON: {}", err))
    }
}

impl From<std::io::Error> for DetectionError {
    fn from(err: std::io::Error) -> Self {
        Self::General(format!("could not read image: {}", err))
    }
}
