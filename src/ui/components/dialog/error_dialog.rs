//! Error dialog component

use super::base::Dialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the oldest queued error as a modal overlay
pub fn render_error_dialog(frame: &mut Frame, error_message: &str, queued: usize) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ];
    if queued > 1 {
        hint.push(Span::styled(
            format!(" ({} more)", queued - 1),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Dialog {
        title: "Error",
        accent: Color::Red,
        message: error_message,
        hint: Some(Line::from(hint)),
        max_width: 60,
    }
    .render(frame);
}
