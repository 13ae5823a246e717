//! AI image editor view: picker and instruction on the left, result on the right

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_field;
use crate::app::App;
use crate::state::{EditRequest, ImageEditorFocus, ImageEditorState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rectangles of every panel, shared by drawing and mouse handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub file_path: Rect,
    pub original: Rect,
    pub prompt: Rect,
    pub generate: Rect,
    pub error: Rect,
    pub result: Rect,
    pub download: Rect,
}

pub fn editor_layout(area: Rect) -> EditorLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // File path
            Constraint::Min(5),                // Original image
            Constraint::Length(6),             // Instruction
            Constraint::Length(BUTTON_HEIGHT), // Generate
            Constraint::Length(3),             // Error region
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),                // Result
            Constraint::Length(BUTTON_HEIGHT), // Download
        ])
        .split(columns[1]);

    EditorLayout {
        file_path: left[0],
        original: left[1],
        prompt: left[2],
        generate: left[3],
        error: left[4],
        result: right[0],
        download: right[1],
    }
}

/// Element under an absolute screen position
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<ImageEditorFocus> {
    let layout = editor_layout(area);
    let inside = |r: Rect| column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height;
    [
        (layout.file_path, ImageEditorFocus::FilePath),
        (layout.original, ImageEditorFocus::FilePath),
        (layout.prompt, ImageEditorFocus::Prompt),
        (layout.generate, ImageEditorFocus::Generate),
        (layout.download, ImageEditorFocus::Download),
    ]
    .into_iter()
    .find(|(rect, _)| inside(*rect))
    .map(|(_, focus)| focus)
}

fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < KIB * KIB {
        format!("{:.1} KB", bytes / KIB)
    } else {
        format!("{:.1} MB", bytes / (KIB * KIB))
    }
}

fn label_value<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<6}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn draw_original(frame: &mut Frame, area: Rect, editor: &ImageEditorState) {
    let lines = match editor.image() {
        Some(image) => {
            let mime_type = image
                .data_url
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("unknown")
                .to_string();
            vec![
                label_value("File", image.file_name.clone()),
                label_value("Size", format_bytes(image.size)),
                label_value("Type", mime_type),
            ]
        }
        None => vec![
            Line::from(Span::styled(
                "No image selected",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Type a file path above and press Enter (PNG, JPG, GIF, WebP up to 5MB)",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Original")),
        area,
    );
}

fn draw_result(frame: &mut Frame, area: Rect, editor: &ImageEditorState) {
    let dim = Style::default().fg(Color::DarkGray);
    let lines = match editor.request() {
        EditRequest::Requesting { started, .. } => {
            let frame_index = (started.elapsed().as_millis() / 100) as usize % SPINNER.len();
            vec![Line::from(vec![
                Span::styled(SPINNER[frame_index], Style::default().fg(Color::Cyan)),
                Span::raw(" Generating..."),
            ])]
        }
        EditRequest::Succeeded(image) => vec![
            Line::from(Span::styled(
                "Edited image ready",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            label_value("Type", image.mime_type.clone()),
            label_value("Size", format_bytes(image.approx_byte_len() as u64)),
        ],
        EditRequest::Idle | EditRequest::Failed(_) => vec![Line::from(Span::styled(
            "Edited image will appear here",
            dim,
        ))],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Result")),
        area,
    );
}

/// Draw the image editor view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let editor = &app.state.image_editor;
    let layout = editor_layout(area);

    draw_field(
        frame,
        layout.file_path,
        &editor.file_path,
        "/path/to/image.png",
        editor.focus == ImageEditorFocus::FilePath,
    );
    draw_original(frame, layout.original, editor);
    draw_field(
        frame,
        layout.prompt,
        &editor.prompt,
        "Describe the edit, e.g. \"add a retro filter\"",
        editor.focus == ImageEditorFocus::Prompt,
    );

    let generate_label = if editor.is_requesting() {
        "Generating..."
    } else {
        "Generate"
    };
    render_button(
        frame,
        layout.generate,
        generate_label,
        editor.focus == ImageEditorFocus::Generate,
        editor.can_generate(),
    );

    if let Some(message) = editor.error_message() {
        let error = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red),
        )))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(error, layout.error);
    }

    draw_result(frame, layout.result, editor);
    render_button(
        frame,
        layout.download,
        "Download",
        editor.focus == ImageEditorFocus::Download,
        editor.result().is_some(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 3,
        width: 100,
        height: 36,
    };

    #[test]
    fn test_layout_columns() {
        let layout = editor_layout(AREA);
        assert_eq!(layout.file_path.x, 0);
        assert_eq!(layout.result.x, 50);
        assert_eq!(layout.file_path.height, 3);
        assert_eq!(layout.download.height, BUTTON_HEIGHT);
        assert_eq!(layout.download.y + layout.download.height, AREA.y + AREA.height);
    }

    #[test]
    fn test_hit_test_buttons() {
        let layout = editor_layout(AREA);
        assert_eq!(
            hit_test(AREA, layout.generate.x + 1, layout.generate.y + 1),
            Some(ImageEditorFocus::Generate)
        );
        assert_eq!(
            hit_test(AREA, layout.download.x + 1, layout.download.y),
            Some(ImageEditorFocus::Download)
        );
        assert_eq!(
            hit_test(AREA, layout.prompt.x + 2, layout.prompt.y + 2),
            Some(ImageEditorFocus::Prompt)
        );
        assert_eq!(hit_test(AREA, layout.result.x + 2, layout.result.y + 2), None);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
