pub mod board_view;
pub mod config;
pub mod controller;
pub mod input_buffer;
pub mod prelude;
pub mod roster;
pub mod session;
pub mod shell;
pub mod ui;

pub use ui::widgets;
