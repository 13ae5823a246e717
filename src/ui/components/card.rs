//! Bordered card used by the builder and preview

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render `content` inside a bordered card with one column of padding.
///
/// Lines are not wrapped, so a card is exactly as tall as its line count
/// plus borders. Selected cards take the accent color (cyan when none is given).
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    content: Paragraph,
    is_selected: bool,
    accent: Option<Color>,
) {
    let border_style = if is_selected {
        Style::default().fg(accent.unwrap_or(Color::Cyan))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    frame.render_widget(content.block(block), area);
}
