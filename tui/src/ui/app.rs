//! Everything the render loop mutates, in one place.

use crate::input_buffer::InputBuffer;
use crate::session::PlaySession;
use crate::shell::Shell;
use crate::ui::theme::Theme;

#[derive(Default)]
pub struct App {
    pub shell: Shell,
    pub session: Option<PlaySession>,
    /// Typed square name in the play view.
    pub input: InputBuffer,
    pub theme: Theme,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }
}
