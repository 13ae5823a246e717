//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a text input backed by a `FormField`
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    placeholder: &str,
    is_active: bool,
) {
    let accent = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = Span::styled(if is_active { "▌" } else { "" }, accent);

    let value = field.as_text();
    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else if field.is_multiline {
        value.split('\n').map(|l| Line::from(l.to_string())).collect()
    } else {
        vec![Line::from(value.to_string())]
    };

    if is_active {
        if value.is_empty() {
            lines = vec![Line::from(cursor)];
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(accent);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
