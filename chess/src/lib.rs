pub mod analysis;
pub mod board_display;
pub mod converters;
pub mod fen;
pub mod game;
pub mod position;
pub mod san;
pub mod types;
pub mod uci;

pub use analysis::AnalysisScore;
pub use board_display::{DisplayBoard, DisplayBoardError};
pub use converters::*;
pub use fen::{FenError, STANDARD_START_FEN};
pub use game::{Game, GameError, HistoryEntry};
pub use position::{MoveAttempt, Position};
pub use types::{PieceColor, PieceKind};
pub use uci::{convert_uci_castling_to_cozy, format_uci_move, parse_uci_move};
