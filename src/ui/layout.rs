//! Layout components (header tabs, status bar)

use super::components::render_tab;
use crate::app::App;
use crate::platform::{DOWNLOAD_SHORTCUT, EXPORT_SHORTCUT, NEW_QUESTION_SHORTCUT};
use crate::state::{View, HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Brand shown at the left of the header
const APP_TITLE: &str = "✦ FormGenie";

/// Blank columns between tabs
const TAB_SPACING: u16 = 3;

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Clickable tab areas inside the header, one per view
pub fn tab_segments(header: Rect) -> Vec<(Rect, View)> {
    let mut x = header.x + 1 + APP_TITLE.chars().count() as u16 + TAB_SPACING + 1;
    let y = header.y + 1;
    let right = header.x + header.width.saturating_sub(1);

    let mut segments = Vec::new();
    for view in View::ALL {
        let width = (view.hotkey().len() + 1 + view.label().len()) as u16;
        if x + width > right {
            break;
        }
        segments.push((
            Rect {
                x,
                y,
                width,
                height: 1,
            },
            view,
        ));
        x += width + TAB_SPACING;
    }
    segments
}

/// Draw the header bar with the brand, view tabs, model indicator and form title
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let form_title = &app.state.editor.form().title;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    if !form_title.is_empty() {
        block = block.title_bottom(Line::from(format!(" {form_title} ")).right_aligned());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let brand = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(brand, inner);

    for (rect, view) in tab_segments(area) {
        render_tab(
            frame,
            rect,
            view.hotkey(),
            view.label(),
            app.state.current_view == view,
        );
    }

    let (dot, color) = if app.api_key_configured {
        ("●", Color::Green)
    } else {
        ("○ no API key", Color::Red)
    };
    let indicator = Line::from(vec![
        Span::styled(dot, Style::default().fg(color)),
        Span::styled(
            format!(" {}", app.model_name),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(indicator).right_aligned(), inner);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {}", view_hints(app.state.current_view)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(message) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn view_hints(view: View) -> String {
    match view {
        View::Builder => format!(
            "↑/↓:move  ←/→:type  Enter:apply  {NEW_QUESTION_SHORTCUT}:add  ^D:dup  {EXPORT_SHORTCUT}:export  Esc:collapse"
        ),
        View::Preview => "↑/↓:question  ←/→:option  Space/Enter:select".to_string(),
        View::ImageEditor => {
            format!("Tab:next  Enter:load/generate  {DOWNLOAD_SHORTCUT}:download")
        }
    }
}
