//! View routing and the state that outlives a single match.
//!
//! The shell is a plain state machine. Anything that needs I/O (starting a
//! detection, spawning an engine) is handed back to the render loop as a
//! [`ShellEffect`].

use std::path::Path;
use std::time::Duration;

use chess::Position;
use vision::{DetectionError, DetectionResult, ImageData};

use crate::roster::{step_rating, OpponentProfile, DEFAULT_CUSTOM_RATING};

/// Interval between scan indicator steps.
pub const SCAN_TICK: Duration = Duration::from_millis(150);

pub const NO_BOARD_MESSAGE: &str =
    "No chessboard detected. Retake the photo from directly above with the whole board in frame.";
pub const GENERAL_ERROR_MESSAGE: &str = "Unexpected analysis error.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Upload,
    BotSelection,
    Play,
}

/// Entries of the home screen menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    OpenImage,
    SkipVision,
    Quit,
}

impl HomeItem {
    pub const ALL: [HomeItem; 3] = [HomeItem::OpenImage, HomeItem::SkipVision, HomeItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            Self::OpenImage => "Scan a photo",
            Self::SkipVision => "Play from the start position",
            Self::Quit => "Quit",
        }
    }
}

/// Cycles a8, a7, … a1, b8, … h1 and wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanTicker {
    index: u8,
}

impl ScanTicker {
    pub fn label(&self) -> String {
        let file = (b'a' + self.index / 8) as char;
        let rank = 8 - self.index % 8;
        format!("{}{}", file, rank)
    }

    pub fn tick(&mut self) {
        self.index = (self.index + 1) % 64;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionState {
    Idle,
    Scanning { request_id: u64 },
    Detected(String),
    Failed,
}

/// Everything needed to start a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    pub profile: OpponentProfile,
    /// `None` plays from the standard start.
    pub detected_fen: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEffect {
    None,
    StartDetection { request_id: u64, image: ImageData },
    StartMatch(MatchSetup),
    /// Tear down the running match and any detection in flight.
    EndMatch,
    Quit,
}

pub struct Shell {
    view: View,
    image: Option<ImageData>,
    image_name: Option<String>,
    detection: DetectionState,
    next_request_id: u64,
    ticker: ScanTicker,
    error: Option<String>,
    path_input: Option<String>,
    home_cursor: usize,
    bot_cursor: usize,
    custom_rating: u32,
    opponent: Option<OpponentProfile>,
    roster: Vec<OpponentProfile>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self {
            view: View::Home,
            image: None,
            image_name: None,
            detection: DetectionState::Idle,
            next_request_id: 1,
            ticker: ScanTicker::default(),
            error: None,
            path_input: None,
            home_cursor: 0,
            bot_cursor: 0,
            custom_rating: DEFAULT_CUSTOM_RATING,
            opponent: None,
            roster: OpponentProfile::roster(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn image_name(&self) -> Option<&str> {
        self.image_name.as_deref()
    }

    pub fn detection(&self) -> &DetectionState {
        &self.detection
    }

    pub fn detected_fen(&self) -> Option<&str> {
        match &self.detection {
            DetectionState::Detected(fen) => Some(fen),
            _ => None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.detection, DetectionState::Scanning { .. })
    }

    /// Square name shown by the scan indicator, only while scanning.
    pub fn scan_label(&self) -> Option<String> {
        self.is_scanning().then(|| self.ticker.label())
    }

    pub fn tick_scan(&mut self) {
        if self.is_scanning() {
            self.ticker.tick();
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice_visible(&self) -> bool {
        self.error.is_some()
    }

    pub fn dismiss_notice(&mut self) {
        self.error = None;
    }

    pub fn opponent(&self) -> Option<&OpponentProfile> {
        self.opponent.as_ref()
    }

    pub fn roster(&self) -> &[OpponentProfile] {
        &self.roster
    }

    // Path dialog

    pub fn path_input(&self) -> Option<&str> {
        self.path_input.as_deref()
    }

    pub fn open_path_dialog(&mut self) {
        self.path_input = Some(String::new());
    }

    pub fn close_path_dialog(&mut self) {
        self.path_input = None;
    }

    pub fn path_push(&mut self, c: char) {
        if let Some(input) = self.path_input.as_mut() {
            input.push(c);
        }
    }

    pub fn path_backspace(&mut self) {
        if let Some(input) = self.path_input.as_mut() {
            input.pop();
        }
    }

    /// Load the typed path. An empty path just closes the dialog.
    pub fn submit_path(&mut self) -> ShellEffect {
        let Some(input) = self.path_input.take() else {
            return ShellEffect::None;
        };
        let path = input.trim();
        if path.is_empty() {
            return ShellEffect::None;
        }
        self.load_image(Path::new(path))
    }

    /// Read an image from disk and move to the upload view. A read failure
    /// raises the notice and leaves the view alone.
    pub fn load_image(&mut self, path: &Path) -> ShellEffect {
        match ImageData::from_path(path) {
            Ok(image) => {
                tracing::info!("Loaded {} byte image from {:?}", image.bytes.len(), path);
                self.image_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                self.set_image(image);
                ShellEffect::None
            }
            Err(e) => {
                tracing::warn!("Could not read image {:?}: {}", path, e);
                self.error = Some(format!("Could not read {}: {}", path.display(), e));
                ShellEffect::None
            }
        }
    }

    /// Use an image that is already in memory.
    pub fn set_image(&mut self, image: ImageData) {
        self.image = Some(image);
        self.detection = DetectionState::Idle;
        self.error = None;
        self.ticker.reset();
        self.view = View::Upload;
    }

    // Detection

    /// Ask for a detection of the current image. Ignored while one is already
    /// running or when no image is loaded.
    pub fn start_detection(&mut self) -> ShellEffect {
        if self.view != View::Upload || self.is_scanning() {
            return ShellEffect::None;
        }
        let Some(image) = self.image.clone() else {
            return ShellEffect::None;
        };
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.detection = DetectionState::Scanning { request_id };
        self.error = None;
        self.ticker.reset();
        tracing::info!("Starting detection request {}", request_id);
        ShellEffect::StartDetection { request_id, image }
    }

    /// Deliver a detection result. Results for a request that is no longer
    /// awaited are dropped.
    pub fn finish_detection(&mut self, request_id: u64, result: DetectionResult<String>) {
        if self.detection != (DetectionState::Scanning { request_id }) {
            tracing::debug!("Dropping stale detection result {}", request_id);
            return;
        }
        self.ticker.reset();

        let result = result.and_then(|fen| match Position::from_detected(&fen) {
            Ok(_) => Ok(fen),
            Err(e) => Err(DetectionError::General(format!(
                "detected position is not playable: {}",
                e
            ))),
        });

        match result {
            Ok(fen) => {
                tracing::info!("Detected position {}", fen);
                self.detection = DetectionState::Detected(fen);
            }
            Err(e) => {
                tracing::warn!("Detection failed: {}", e);
                self.error = Some(
                    match e {
                        DetectionError::NoBoardFound => NO_BOARD_MESSAGE,
                        DetectionError::General(_) => GENERAL_ERROR_MESSAGE,
                    }
                    .to_string(),
                );
                self.detection = DetectionState::Failed;
            }
        }
    }

    /// Upload → BotSelection, only once a position has been detected.
    pub fn proceed_to_bots(&mut self) {
        if self.view == View::Upload && self.detected_fen().is_some() {
            self.view = View::BotSelection;
        }
    }

    /// Home or Upload → BotSelection from the standard start.
    pub fn skip_vision(&mut self) {
        if !matches!(self.view, View::Home | View::Upload) {
            return;
        }
        self.image = None;
        self.image_name = None;
        self.detection = DetectionState::Idle;
        self.ticker.reset();
        self.view = View::BotSelection;
    }

    // Home menu

    pub fn home_cursor(&self) -> usize {
        self.home_cursor
    }

    pub fn home_move(&mut self, delta: i32) {
        self.home_cursor = wrap(self.home_cursor, delta, HomeItem::ALL.len());
    }

    pub fn home_activate(&mut self) -> ShellEffect {
        match HomeItem::ALL[self.home_cursor] {
            HomeItem::OpenImage => {
                self.open_path_dialog();
                ShellEffect::None
            }
            HomeItem::SkipVision => {
                self.skip_vision();
                ShellEffect::None
            }
            HomeItem::Quit => ShellEffect::Quit,
        }
    }

    // Opponent selection. The cursor runs over the roster plus one extra
    // row for the custom rating.

    pub fn bot_cursor(&self) -> usize {
        self.bot_cursor
    }

    pub fn bot_move(&mut self, delta: i32) {
        self.bot_cursor = wrap(self.bot_cursor, delta, self.roster.len() + 1);
    }

    pub fn custom_selected(&self) -> bool {
        self.bot_cursor == self.roster.len()
    }

    pub fn custom_rating(&self) -> u32 {
        self.custom_rating
    }

    pub fn adjust_custom_rating(&mut self, steps: i32) {
        self.custom_rating = step_rating(self.custom_rating, steps);
    }

    /// Profile under the cursor.
    pub fn highlighted_profile(&self) -> OpponentProfile {
        self.roster
            .get(self.bot_cursor)
            .cloned()
            .unwrap_or_else(|| OpponentProfile::custom(self.custom_rating))
    }

    /// BotSelection → Play with the highlighted profile.
    pub fn choose_opponent(&mut self) -> ShellEffect {
        if self.view != View::BotSelection {
            return ShellEffect::None;
        }
        let profile = self.highlighted_profile();
        tracing::info!("Opponent chosen: {} ({})", profile.name, profile.rating);
        self.opponent = Some(profile.clone());
        self.view = View::Play;
        ShellEffect::StartMatch(MatchSetup {
            profile,
            detected_fen: self.detected_fen().map(str::to_string),
        })
    }

    /// The match could not be set up. Back to opponent selection with the
    /// reason on the notice.
    pub fn match_failed(&mut self, message: impl Into<String>) {
        self.opponent = None;
        self.view = View::BotSelection;
        self.error = Some(message.into());
    }

    /// Any → Home, discarding everything downstream.
    pub fn reset(&mut self) -> ShellEffect {
        tracing::info!("Resetting to home");
        self.view = View::Home;
        self.image = None;
        self.image_name = None;
        self.detection = DetectionState::Idle;
        self.ticker.reset();
        self.error = None;
        self.path_input = None;
        self.opponent = None;
        self.bot_cursor = 0;
        ShellEffect::EndMatch
    }
}

fn wrap(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as i64 + delta as i64).rem_euclid(len as i64) as usize
}
