//! Application state module

mod app_state;
mod forms;
mod image_editor;
mod preview;
mod ui_area;

pub use app_state::*;
pub use forms::*;
pub use image_editor::*;
pub use preview::*;
pub use ui_area::*;
