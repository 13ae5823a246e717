//! Application state and core logic

use crate::config::TuiConfig;
use crate::export::export_form;
use crate::gemini::{GeminiClient, GenerativeImageApi};
use crate::platform::is_shortcut;
use crate::state::{
    AppState, BuilderCursor, ImageEditorFocus, PreviewCursor, UiArea, View, HEADER_HEIGHT,
};
use crate::ui::{
    builder_hit_test, create_layout, image_editor_hit_test, preview_hit_test, tab_segments,
    BuilderHit, PreviewHit,
};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// User configuration
    pub config: TuiConfig,
    /// Image editing service
    api: Arc<dyn GenerativeImageApi>,
    /// Model shown in the header
    pub model_name: String,
    /// Whether an API key was found at startup
    pub api_key_configured: bool,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for mouse hit-testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create the app with the Gemini client described by `config`
    pub fn new(config: TuiConfig) -> Self {
        let client = GeminiClient::from_config(&config);
        let model_name = client.model().to_string();
        let api_key_configured = client.has_api_key();
        if !api_key_configured {
            tracing::warn!("No API key configured; image edits will fail until one is set");
        }
        Self::with_api(config, Arc::new(client), model_name, api_key_configured)
    }

    pub fn with_api(
        config: TuiConfig,
        api: Arc<dyn GenerativeImageApi>,
        model_name: String,
        api_key_configured: bool,
    ) -> Self {
        Self {
            state: AppState::default(),
            config,
            api,
            model_name,
            api_key_configured,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether an image edit is in flight (the loop polls faster then)
    pub fn is_busy(&self) -> bool {
        self.state.image_editor.is_requesting()
    }

    /// Settle a finished image edit request, once per frame
    pub fn poll_image_request(&mut self) {
        if !self.state.image_editor.poll() {
            return;
        }
        match self.state.image_editor.error_message() {
            Some(message) => tracing::warn!("Image edit failed: {message}"),
            None => {
                tracing::info!("Image edit finished");
                self.state.status_message = Some("Edited image ready".to_string());
            }
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message);
    }

    /// Content area between the header and the status bar
    fn content_area(&self) -> Rect {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        create_layout(Rect::new(0, 0, width, height)).1
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        let view = match key.code {
            KeyCode::F(1) => Some(View::Builder),
            KeyCode::F(2) => Some(View::Preview),
            KeyCode::F(3) => Some(View::ImageEditor),
            _ => None,
        };
        if let Some(view) = view {
            self.state.set_view(view);
            return Ok(());
        }

        if is_shortcut(&key, 'q') {
            self.quit = true;
            return Ok(());
        }

        if is_shortcut(&key, 'e') {
            self.export_form();
            return Ok(());
        }

        match self.state.current_view {
            View::Builder => self.handle_builder_key(key),
            View::Preview => self.handle_preview_key(key),
            View::ImageEditor => self.handle_image_editor_key(key),
        }
        Ok(())
    }

    fn handle_builder_key(&mut self, key: KeyEvent) {
        let state = &mut self.state;

        if is_shortcut(&key, 'n') {
            state.add_question();
            return;
        }
        if is_shortcut(&key, 'd') {
            if let Some(id) = state.cursor_question_id() {
                state.duplicate_question(&id);
            }
            return;
        }
        if is_shortcut(&key, 'r') {
            if let Some(id) = state.cursor_question_id() {
                state.toggle_required(&id);
            }
            return;
        }

        match key.code {
            KeyCode::Esc => state.collapse_question(),
            KeyCode::Down | KeyCode::Tab => state.builder_step(true),
            KeyCode::Up | KeyCode::BackTab => state.builder_step(false),
            KeyCode::Left => state.builder_cycle_type(false),
            KeyCode::Right => state.builder_cycle_type(true),
            KeyCode::Enter => state.builder_activate(),
            KeyCode::Backspace => state.builder_backspace(),
            KeyCode::Delete => state.builder_remove_option(),
            KeyCode::Char(' ') if !state.builder_cursor.accepts_text() => {
                state.builder_activate()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.builder_input_char(c)
            }
            _ => {}
        }
    }

    fn handle_preview_key(&mut self, key: KeyEvent) {
        let state = &mut self.state;
        match key.code {
            KeyCode::Down | KeyCode::Tab => state.preview_step(true),
            KeyCode::Up | KeyCode::BackTab => state.preview_step(false),
            KeyCode::Left => state.preview_horizontal(false),
            KeyCode::Right => state.preview_horizontal(true),
            KeyCode::Enter => state.preview_activate(),
            KeyCode::Backspace => state.preview_backspace(),
            KeyCode::Char(' ') => state.preview_space(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.preview_input_char(c)
            }
            _ => {}
        }
    }

    fn handle_image_editor_key(&mut self, key: KeyEvent) {
        if is_shortcut(&key, 's') {
            self.download_result();
            return;
        }
        if is_shortcut(&key, 'g') {
            self.generate();
            return;
        }

        let editor = &mut self.state.image_editor;
        match (key.code, editor.focus) {
            (KeyCode::Tab | KeyCode::Down, _) => editor.focus = editor.focus.next(),
            (KeyCode::BackTab | KeyCode::Up, _) => editor.focus = editor.focus.prev(),
            (KeyCode::Enter, ImageEditorFocus::FilePath) => self.load_image(),
            (KeyCode::Enter, ImageEditorFocus::Prompt) => editor.prompt.push_newline(),
            (KeyCode::Enter, ImageEditorFocus::Generate) => self.generate(),
            (KeyCode::Enter, ImageEditorFocus::Download) => self.download_result(),
            (KeyCode::Backspace, ImageEditorFocus::FilePath) => editor.file_path.pop_char(),
            (KeyCode::Backspace, ImageEditorFocus::Prompt) => editor.prompt.pop_char(),
            (KeyCode::Esc, ImageEditorFocus::FilePath) => editor.file_path.clear(),
            (KeyCode::Char(c), ImageEditorFocus::FilePath)
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                editor.file_path.push_char(c)
            }
            (KeyCode::Char(c), ImageEditorFocus::Prompt)
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                editor.prompt.push_char(c)
            }
            _ => {}
        }
    }

    fn load_image(&mut self) {
        let max_bytes = self.config.max_upload_bytes();
        if self.state.image_editor.load_from_path(max_bytes) {
            self.state.image_editor.focus = ImageEditorFocus::Prompt;
            self.state.status_message = self
                .state
                .image_editor
                .image()
                .map(|image| format!("Loaded {}", image.file_name));
        }
    }

    fn generate(&mut self) {
        if self.state.image_editor.can_generate() {
            self.state.image_editor.start_request(self.api.clone());
            self.state.status_message = None;
        }
    }

    fn download_result(&mut self) {
        let dir = self.config.download_dir();
        match self.state.image_editor.save_result(&dir) {
            Ok(Some(path)) => {
                self.state.status_message = Some(format!("Saved {}", path.display()));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!("Failed to save edited image: {err}");
                self.push_error(format!("Could not save the edited image: {err}"));
            }
        }
    }

    fn export_form(&mut self) {
        let dir = self.config.download_dir();
        match export_form(&dir, self.state.editor.form(), Utc::now()) {
            Ok(path) => {
                self.state.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(err) => {
                tracing::error!("Failed to export form: {err:#}");
                self.push_error(format!("Could not export the form: {err}"));
            }
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.has_errors() {
            return Ok(());
        }

        let forward = match mouse.kind {
            MouseEventKind::ScrollDown => Some(true),
            MouseEventKind::ScrollUp => Some(false),
            _ => None,
        };
        if let Some(forward) = forward {
            match self.state.current_view {
                View::Builder => self.state.builder_step(forward),
                View::Preview => self.state.preview_step(forward),
                View::ImageEditor => {}
            }
            return Ok(());
        }

        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }

        let (height, _) = self.terminal_size.unwrap_or((24, 80));
        if UiArea::Header.contains_row(mouse.row, height) {
            self.handle_header_click(mouse);
            return Ok(());
        }
        if !UiArea::Content.contains_row(mouse.row, height) {
            return Ok(());
        }

        let area = self.content_area();
        match self.state.current_view {
            View::Builder => self.handle_builder_click(area, mouse),
            View::Preview => self.handle_preview_click(area, mouse),
            View::ImageEditor => {
                if let Some(focus) = image_editor_hit_test(area, mouse.column, mouse.row) {
                    self.state.image_editor.focus = focus;
                    match focus {
                        ImageEditorFocus::Generate => self.generate(),
                        ImageEditorFocus::Download => self.download_result(),
                        ImageEditorFocus::FilePath | ImageEditorFocus::Prompt => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_header_click(&mut self, mouse: MouseEvent) {
        let (_, width) = self.terminal_size.unwrap_or((24, 80));
        let header = Rect::new(0, 0, width, HEADER_HEIGHT);
        let clicked = tab_segments(header).into_iter().find(|(rect, _)| {
            mouse.row == rect.y && mouse.column >= rect.x && mouse.column < rect.x + rect.width
        });
        if let Some((_, view)) = clicked {
            self.state.set_view(view);
        }
    }

    fn handle_builder_click(&mut self, area: Rect, mouse: MouseEvent) {
        let state = &mut self.state;
        let hit = builder_hit_test(
            state.editor.form(),
            state.editor.focus(),
            &state.builder_cursor,
            area,
            mouse.column,
            mouse.row,
        );
        match hit {
            Some(BuilderHit::FormTitle) => state.builder_cursor = BuilderCursor::FormTitle,
            Some(BuilderHit::FormDescription) => {
                state.builder_cursor = BuilderCursor::FormDescription
            }
            Some(BuilderHit::Card(id)) => {
                if !state.editor.is_focused(&id) {
                    state.focus_question(&id);
                }
            }
            Some(BuilderHit::Element(id, element)) => {
                state.select_element(&id, element);
                if !element.accepts_text() {
                    state.builder_activate();
                }
            }
            None => {}
        }
    }

    fn handle_preview_click(&mut self, area: Rect, mouse: MouseEvent) {
        let state = &mut self.state;
        let hit = preview_hit_test(
            state.editor.form(),
            &state.respondent,
            area,
            mouse.column,
            mouse.row,
        );
        let Some(hit) = hit else {
            return;
        };
        let (cursor, option) = match hit {
            PreviewHit::Question(i) => (PreviewCursor::Question(i), None),
            PreviewHit::Option(i, option) => (PreviewCursor::Question(i), Some(option)),
            PreviewHit::Submit => (PreviewCursor::Submit, None),
            PreviewHit::ClearForm => (PreviewCursor::ClearForm, None),
        };
        if state.respondent.cursor != cursor {
            state.respondent.option_cursor = 0;
        }
        state.respondent.cursor = cursor;
        match (cursor, option) {
            (PreviewCursor::Question(_), Some(option)) => {
                state.respondent.option_cursor = option;
                state.preview_activate();
            }
            (PreviewCursor::Question(_), None) => {}
            (PreviewCursor::Submit | PreviewCursor::ClearForm, _) => state.preview_activate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::MockGenerativeImageApi;
    use crate::state::QuestionElement;
    use pretty_assertions::assert_eq;

    fn test_app(download_dir: Option<std::path::PathBuf>) -> App {
        let config = TuiConfig {
            download_dir,
            ..TuiConfig::default()
        };
        let mut app = App::with_api(
            config,
            Arc::new(MockGenerativeImageApi::new()),
            "test-model".to_string(),
            true,
        );
        app.terminal_size = Some((40, 100));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_should_quit_initially_false() {
        let app = test_app(None);
        assert!(!app.should_quit());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = test_app(None);
        app.handle_key(ctrl('q')).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_function_keys_switch_views() {
        let mut app = test_app(None);
        app.handle_key(key(KeyCode::F(2))).unwrap();
        assert_eq!(app.state.current_view, View::Preview);
        app.handle_key(key(KeyCode::F(3))).unwrap();
        assert_eq!(app.state.current_view, View::ImageEditor);
        app.handle_key(key(KeyCode::F(1))).unwrap();
        assert_eq!(app.state.current_view, View::Builder);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = test_app(None);
        let mut release = key(KeyCode::F(2));
        release.kind = KeyEventKind::Release;
        app.handle_key(release).unwrap();
        assert_eq!(app.state.current_view, View::Builder);
    }

    #[test]
    fn test_error_dialog_is_modal() {
        let mut app = test_app(None);
        app.push_error("boom");
        app.handle_key(key(KeyCode::F(2))).unwrap();
        assert_eq!(app.state.current_view, View::Builder);
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!app.state.has_errors());
    }

    #[test]
    fn test_typing_in_builder_edits_title() {
        let mut app = test_app(None);
        for _ in 0.."Untitled Form".len() {
            app.handle_key(key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "Survey");
        assert_eq!(app.state.editor.form().title, "Survey");
    }

    #[test]
    fn test_builder_shortcuts() {
        let mut app = test_app(None);
        app.handle_key(ctrl('n')).unwrap();
        assert_eq!(app.state.editor.form().questions.len(), 2);
        let new_id = app.state.editor.form().questions[1].id.clone();
        assert_eq!(app.state.editor.focus(), Some(new_id.as_str()));

        app.handle_key(ctrl('r')).unwrap();
        assert!(app.state.editor.form().questions[1].required);

        app.handle_key(ctrl('d')).unwrap();
        assert_eq!(app.state.editor.form().questions.len(), 3);
        assert!(app.state.editor.form().questions[2].required);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state.editor.focus(), None);
    }

    #[test]
    fn test_space_toggles_required_on_footer() {
        let mut app = test_app(None);
        app.state.select_element("q1", QuestionElement::Required);
        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        assert!(app.state.editor.form().questions[0].required);
    }

    #[test]
    fn test_clicking_tab_switches_view() {
        let mut app = test_app(None);
        let header = Rect::new(0, 0, 100, HEADER_HEIGHT);
        let (rect, view) = tab_segments(header)[2];
        app.handle_mouse(click(rect.x + 1, rect.y)).unwrap();
        assert_eq!(app.state.current_view, view);
    }

    #[test]
    fn test_clicking_card_focuses_question() {
        let mut app = test_app(None);
        let area = app.content_area();
        // Question card starts after the header card and the gap
        app.handle_mouse(click(area.width / 2, area.y + 6)).unwrap();
        assert_eq!(app.state.editor.focus(), Some("q1"));
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(Some(dir.path().to_path_buf()));
        app.handle_key(ctrl('e')).unwrap();
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        assert!(app
            .state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Exported")));
    }

    #[test]
    fn test_image_editor_loads_typed_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, b"png").unwrap();

        let mut app = test_app(None);
        app.handle_key(key(KeyCode::F(3))).unwrap();
        type_text(&mut app, &path.display().to_string());
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            app.state.image_editor.image().map(|i| i.file_name.as_str()),
            Some("cat.png")
        );
        assert_eq!(app.state.image_editor.focus, ImageEditorFocus::Prompt);
    }

    #[test]
    fn test_generate_without_image_does_nothing() {
        let mut app = test_app(None);
        app.handle_key(key(KeyCode::F(3))).unwrap();
        app.state.image_editor.focus = ImageEditorFocus::Generate;
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!app.is_busy());
    }
}
