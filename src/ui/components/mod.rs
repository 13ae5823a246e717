//! Reusable UI components

mod button;
mod card;
mod dialog;

pub use button::{render_button, render_tab, BUTTON_HEIGHT};
pub use card::render_card;
pub use dialog::render_error_dialog;
