//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A centered modal box: bold title, wrapped message, optional hint line
pub struct Dialog<'a> {
    pub title: &'a str,
    pub accent: Color,
    pub message: &'a str,
    pub hint: Option<Line<'a>>,
    pub max_width: u16,
}

impl Dialog<'_> {
    /// Outer width and height for the wrapped message
    fn size(&self, line_count: usize, widest: usize) -> (u16, u16) {
        let width = (widest.max(self.title.chars().count()) as u16 + 6).min(self.max_width);
        let hint_rows = if self.hint.is_some() { 2 } else { 0 };
        let height = (line_count as u16 + 4 + hint_rows).max(5);
        (width, height)
    }

    pub fn render(self, frame: &mut Frame) {
        let area = frame.area();
        let lines = wrap_text(self.message, self.max_width.saturating_sub(6) as usize);
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let (width, height) = self.size(lines.len(), widest);

        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width: width.min(area.width),
            height: height.min(area.height),
        };
        frame.render_widget(Clear, dialog_area);

        let mut content = vec![
            Line::from(Span::styled(
                self.title,
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        content.extend(lines.into_iter().map(Line::from));
        if let Some(hint) = self.hint {
            content.push(Line::from(""));
            content.push(hint);
        }

        let dialog = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent)),
            )
            .style(Style::default().bg(Color::Black));
        frame.render_widget(dialog, dialog_area);
    }
}

/// Greedy word wrap; words longer than `max_width` get a line of their own
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if !current.is_empty() && needed > max_width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("Invalid image format", 40), vec!["Invalid image format"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("No image data found in response.", 14),
            vec!["No image data", "found in", "response."]
        );
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }
}
