pub mod board;
pub mod bot_select;
pub mod controls_panel;
pub mod home_menu;
pub mod intel_panel;
pub mod move_history_panel;
pub mod notice;
pub mod path_dialog;
pub mod side_prompt;
pub mod upload_panel;

pub use board::BoardWidget;
pub use bot_select::BotSelect;
pub use controls_panel::ControlsPanel;
pub use home_menu::HomeMenu;
pub use intel_panel::IntelPanel;
pub use move_history_panel::MoveHistoryPanel;
pub use notice::Notice;
pub use path_dialog::PathDialog;
pub use side_prompt::SidePrompt;
pub use upload_panel::UploadPanel;

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
