// Re-export the types integration tests and the binary reach for most.
pub use crate::board_view::{BoardGeometry, BoardView, SquareView};
pub use crate::controller::{DragState, MatchController, MatchPhase, Mover, Telemetry};
pub use crate::input_buffer::InputBuffer;
pub use crate::roster::OpponentProfile;
pub use crate::session::PlaySession;
pub use crate::shell::{
    DetectionState, HomeItem, MatchSetup, ScanTicker, Shell, ShellEffect, View,
    GENERAL_ERROR_MESSAGE, NO_BOARD_MESSAGE, SCAN_TICK,
};
pub use crate::ui::{App, AppSettings};
