//! UI module for rendering the TUI

mod builder;
mod components;
mod forms;
mod image_editor;
mod layout;
mod preview;

pub use builder::{hit_test as builder_hit_test, BuilderHit};
pub use image_editor::hit_test as image_editor_hit_test;
pub use layout::{create_layout, tab_segments};
pub use preview::{hit_test as preview_hit_test, PreviewHit};

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, content_area, status_area) = create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Builder => builder::draw(frame, content_area, app),
        View::Preview => preview::draw(frame, content_area, app),
        View::ImageEditor => image_editor::draw(frame, content_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Errors are modal and drawn last
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.error_count());
    }
}
