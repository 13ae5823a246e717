//! Application state definitions

use super::forms::{BuilderCursor, FormEditor, QuestionElement, QuestionUpdate};
use super::image_editor::ImageEditorState;
use super::preview::{InputSurface, PreviewCursor, RespondentState};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Builder,
    Preview,
    ImageEditor,
}

impl View {
    pub const ALL: [View; 3] = [View::Builder, View::Preview, View::ImageEditor];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Builder => "Form Builder",
            Self::Preview => "Preview",
            Self::ImageEditor => "AI Image Editor",
        }
    }

    /// Function key that switches to this view
    pub fn hotkey(&self) -> &'static str {
        match self {
            Self::Builder => "F1",
            Self::Preview => "F2",
            Self::ImageEditor => "F3",
        }
    }
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub editor: FormEditor,
    pub builder_cursor: BuilderCursor,
    pub respondent: RespondentState,
    pub image_editor: ImageEditorState,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn set_view(&mut self, view: View) {
        if self.current_view != view {
            tracing::debug!("Switching to {:?}", view);
            self.current_view = view;
            self.status_message = None;
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Re-align focus, cursor and answers after the form changed
    fn form_changed(&mut self) {
        self.editor.drop_dangling_focus();
        self.builder_cursor = self
            .builder_cursor
            .normalize(self.editor.form(), self.editor.focus());
        self.respondent.sync(self.editor.form());
    }

    /// Move the builder cursor; landing on another card activates it
    pub fn builder_step(&mut self, forward: bool) {
        let next = self
            .builder_cursor
            .step(self.editor.form(), self.editor.focus(), forward);
        if let Some(id) = next.question_id() {
            if !self.editor.is_focused(id) {
                let id = id.to_string();
                self.focus_question(&id);
                return;
            }
        }
        self.builder_cursor = next;
    }

    /// Activate a question card and put the cursor on its title
    pub fn focus_question(&mut self, id: &str) {
        self.editor.set_focus(id);
        if self.editor.is_focused(id) {
            self.builder_cursor = BuilderCursor::question(id, QuestionElement::Title);
        }
    }

    /// Put the cursor on one element of a card, activating it first
    pub fn select_element(&mut self, id: &str, element: QuestionElement) {
        self.editor.set_focus(id);
        self.builder_cursor = BuilderCursor::question(id, element)
            .normalize(self.editor.form(), self.editor.focus());
    }

    /// Collapse the active card, keeping the cursor on it
    pub fn collapse_question(&mut self) {
        self.editor.clear_focus();
        self.form_changed();
    }

    fn cursor_text(&self) -> Option<String> {
        let form = self.editor.form();
        match &self.builder_cursor {
            BuilderCursor::FormTitle => Some(form.title.clone()),
            BuilderCursor::FormDescription => Some(form.description.clone()),
            BuilderCursor::Question { id, element } => {
                let question = form.question(id)?;
                match element {
                    QuestionElement::Title => Some(question.title.clone()),
                    QuestionElement::Option(i) => question.options.get(*i).map(|o| o.text.clone()),
                    _ => None,
                }
            }
        }
    }

    fn set_cursor_text(&mut self, text: &str) {
        match self.builder_cursor.clone() {
            BuilderCursor::FormTitle => self.editor.set_title(text),
            BuilderCursor::FormDescription => self.editor.set_description(text),
            BuilderCursor::Question { id, element } => match element {
                QuestionElement::Title => {
                    self.editor.update_question(&id, QuestionUpdate::title(text))
                }
                QuestionElement::Option(i) => {
                    let option_id = self
                        .editor
                        .form()
                        .question(&id)
                        .and_then(|q| q.options.get(i))
                        .map(|o| o.id.clone());
                    if let Some(option_id) = option_id {
                        self.editor.update_option_text(&id, &option_id, text);
                    }
                }
                _ => {}
            },
        }
        self.form_changed();
    }

    /// Type into the text element under the builder cursor
    pub fn builder_input_char(&mut self, c: char) {
        if let Some(mut text) = self.cursor_text() {
            text.push(c);
            self.set_cursor_text(&text);
        }
    }

    pub fn builder_backspace(&mut self) {
        if let Some(mut text) = self.cursor_text() {
            text.pop();
            self.set_cursor_text(&text);
        }
    }

    /// Cycle the type of the question under the cursor
    pub fn builder_cycle_type(&mut self, forward: bool) {
        let Some(id) = self.builder_cursor.question_id().map(str::to_string) else {
            return;
        };
        let Some(current) = self.editor.form().question(&id).map(|q| q.question_type) else {
            return;
        };
        let next = if forward { current.next() } else { current.prev() };
        self.editor
            .update_question(&id, QuestionUpdate::question_type(next));
        self.form_changed();
    }

    /// Enter on the element under the cursor
    pub fn builder_activate(&mut self) {
        let BuilderCursor::Question { id, element } = self.builder_cursor.clone() else {
            self.builder_step(true);
            return;
        };
        if !self.editor.is_focused(&id) {
            self.focus_question(&id);
            return;
        }
        match element {
            QuestionElement::Title | QuestionElement::Option(_) => self.builder_step(true),
            QuestionElement::Type => self.builder_cycle_type(true),
            QuestionElement::AddOption => self.add_option(&id),
            QuestionElement::Duplicate => self.duplicate_question(&id),
            QuestionElement::Delete => self.delete_question(&id),
            QuestionElement::Required => self.toggle_required(&id),
        }
    }

    /// Remove the option under the cursor
    pub fn builder_remove_option(&mut self) {
        let BuilderCursor::Question {
            id,
            element: QuestionElement::Option(i),
        } = self.builder_cursor.clone()
        else {
            return;
        };
        let option_id = self
            .editor
            .form()
            .question(&id)
            .and_then(|q| q.options.get(i))
            .map(|o| o.id.clone());
        if let Some(option_id) = option_id {
            self.editor.remove_option(&id, &option_id);
            self.form_changed();
        }
    }

    pub fn add_question(&mut self) {
        let id = self.editor.add_question();
        self.builder_cursor = BuilderCursor::question(id, QuestionElement::Title);
        self.form_changed();
    }

    pub fn add_option(&mut self, question_id: &str) {
        if self.editor.add_option(question_id).is_some() {
            self.editor.set_focus(question_id);
            let last = self
                .editor
                .form()
                .question(question_id)
                .map(|q| q.options.len().saturating_sub(1))
                .unwrap_or(0);
            self.builder_cursor =
                BuilderCursor::question(question_id, QuestionElement::Option(last));
            self.form_changed();
        }
    }

    pub fn duplicate_question(&mut self, question_id: &str) {
        if let Some(copy_id) = self.editor.duplicate_question(question_id) {
            self.builder_cursor = BuilderCursor::question(copy_id, QuestionElement::Title);
            self.form_changed();
        }
    }

    /// Delete a question; the cursor lands on its neighbour, or the header
    pub fn delete_question(&mut self, question_id: &str) {
        let Some(index) = self.editor.form().question_index(question_id) else {
            return;
        };
        self.editor.delete_question(question_id);
        let questions = &self.editor.form().questions;
        self.builder_cursor = questions
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| questions.get(i)))
            .map(|q| BuilderCursor::question(q.id.clone(), QuestionElement::Title))
            .unwrap_or(BuilderCursor::FormTitle);
        self.form_changed();
    }

    pub fn toggle_required(&mut self, question_id: &str) {
        let Some(required) = self.editor.form().question(question_id).map(|q| q.required) else {
            return;
        };
        self.editor
            .update_question(question_id, QuestionUpdate::required(!required));
        self.form_changed();
    }

    /// Id of the question the builder cursor is on
    pub fn cursor_question_id(&self) -> Option<String> {
        self.builder_cursor.question_id().map(str::to_string)
    }

    /// Question under the preview cursor
    fn preview_question_index(&self) -> Option<usize> {
        match self.respondent.cursor {
            PreviewCursor::Question(i) if i < self.editor.form().questions.len() => Some(i),
            _ => None,
        }
    }

    pub fn preview_step(&mut self, forward: bool) {
        let count = self.editor.form().questions.len();
        self.respondent.step(count, forward);
    }

    pub fn preview_input_char(&mut self, c: char) {
        if let Some(i) = self.preview_question_index() {
            let question = &self.editor.form().questions[i];
            self.respondent.type_char(question, c);
        }
    }

    pub fn preview_backspace(&mut self) {
        if let Some(i) = self.preview_question_index() {
            let question = &self.editor.form().questions[i];
            self.respondent.backspace(question);
        }
    }

    /// Left/Right: highlight options, or cycle a dropdown
    pub fn preview_horizontal(&mut self, forward: bool) {
        let Some(i) = self.preview_question_index() else {
            return;
        };
        let question = &self.editor.form().questions[i];
        match InputSurface::for_question(question) {
            InputSurface::Select { .. } => {
                self.respondent.cycle_dropdown(question, forward)
            }
            InputSurface::RadioGroup(_)
            | InputSurface::CheckboxGroup(_) => {
                self.respondent.move_option_cursor(question, forward)
            }
            InputSurface::TextLine | InputSurface::TextArea => {}
        }
    }

    /// Enter in the preview: select options, newline in paragraphs, or press a button
    pub fn preview_activate(&mut self) {
        match self.respondent.cursor {
            PreviewCursor::Submit => self.submit_preview(),
            PreviewCursor::ClearForm => {
                self.respondent.clear();
                self.status_message = Some("Form cleared".to_string());
            }
            PreviewCursor::Question(i) => {
                let Some(question) = self.editor.form().questions.get(i) else {
                    return;
                };
                if question.question_type.is_choice() {
                    self.respondent.select_highlighted(question);
                } else {
                    self.respondent.newline(question);
                }
            }
        }
    }

    /// Space in the preview: toggles options, types a space in text answers
    pub fn preview_space(&mut self) {
        let Some(i) = self.preview_question_index() else {
            self.preview_activate();
            return;
        };
        let question = &self.editor.form().questions[i];
        if question.question_type.is_choice() {
            self.respondent.select_highlighted(question);
        } else {
            self.respondent.type_char(question, ' ');
        }
    }

    /// Submit goes nowhere; it only acknowledges
    pub fn submit_preview(&mut self) {
        tracing::info!("Preview submitted (answers are not stored)");
        self.status_message = Some("Response recorded (preview only, nothing was sent)".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::QuestionType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_view_is_builder() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Builder);
        assert_eq!(state.editor.form().title, "Untitled Form");
        assert_eq!(state.editor.focus(), None);
    }

    #[test]
    fn test_view_labels() {
        assert_eq!(View::ALL.len(), 3);
        assert_eq!(View::ImageEditor.label(), "AI Image Editor");
        assert_eq!(View::Preview.hotkey(), "F2");
    }

    #[test]
    fn test_error_queue() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first");
        state.push_error("second");
        assert_eq!(state.error_count(), 2);
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_typing_edits_form_title() {
        let mut state = AppState::default();
        state.builder_backspace();
        state.builder_input_char('!');
        assert_eq!(state.editor.form().title, "Untitled For!");
    }

    #[test]
    fn test_stepping_onto_card_focuses_it() {
        let mut state = AppState::default();
        state.builder_step(true);
        assert_eq!(state.builder_cursor, BuilderCursor::FormDescription);
        state.builder_step(true);
        assert_eq!(state.editor.focus(), Some("q1"));
        assert_eq!(
            state.builder_cursor,
            BuilderCursor::question("q1", QuestionElement::Title)
        );
    }

    #[test]
    fn test_typing_edits_question_title_and_option() {
        let mut state = AppState::default();
        state.select_element("q1", QuestionElement::Title);
        state.builder_input_char('?');
        assert_eq!(state.editor.form().questions[0].title, "Untitled Question?");

        state.select_element("q1", QuestionElement::Option(0));
        state.builder_backspace();
        state.builder_input_char('A');
        assert_eq!(state.editor.form().questions[0].options[0].text, "Option A");
    }

    #[test]
    fn test_activate_add_option_moves_cursor_to_new_option() {
        let mut state = AppState::default();
        state.select_element("q1", QuestionElement::AddOption);
        state.builder_activate();
        let question = &state.editor.form().questions[0];
        assert_eq!(question.options.len(), 2);
        assert_eq!(question.options[1].text, "Option 2");
        assert_eq!(
            state.builder_cursor,
            BuilderCursor::question("q1", QuestionElement::Option(1))
        );
    }

    #[test]
    fn test_changing_type_to_text_moves_cursor_off_options() {
        let mut state = AppState::default();
        state.select_element("q1", QuestionElement::Type);
        state.builder_cycle_type(false);
        assert_eq!(
            state.editor.form().questions[0].question_type,
            QuestionType::Paragraph
        );
        assert_eq!(state.builder_cursor.element(), Some(QuestionElement::Type));
    }

    #[test]
    fn test_delete_focused_question_clears_focus() {
        let mut state = AppState::default();
        state.select_element("q1", QuestionElement::Delete);
        state.builder_activate();
        assert!(state.editor.form().questions.is_empty());
        assert_eq!(state.editor.focus(), None);
        assert_eq!(state.builder_cursor, BuilderCursor::FormTitle);
    }

    #[test]
    fn test_delete_moves_cursor_to_neighbour() {
        let mut state = AppState::default();
        state.add_question();
        let second = state.editor.form().questions[1].id.clone();
        state.delete_question("q1");
        assert_eq!(state.builder_cursor.question_id(), Some(second.as_str()));
    }

    #[test]
    fn test_duplicate_focuses_copy() {
        let mut state = AppState::default();
        state.duplicate_question("q1");
        let copy = &state.editor.form().questions[1];
        assert_eq!(state.editor.focus(), Some(copy.id.as_str()));
        assert_eq!(state.builder_cursor.question_id(), Some(copy.id.as_str()));
    }

    #[test]
    fn test_toggle_required() {
        let mut state = AppState::default();
        state.toggle_required("q1");
        assert!(state.editor.form().questions[0].required);
        state.toggle_required("q1");
        assert!(!state.editor.form().questions[0].required);
    }

    #[test]
    fn test_remove_option_clamps_cursor() {
        let mut state = AppState::default();
        state.add_option("q1");
        state.builder_remove_option();
        assert_eq!(state.editor.form().questions[0].options.len(), 1);
        assert_eq!(
            state.builder_cursor,
            BuilderCursor::question("q1", QuestionElement::Option(0))
        );

        state.builder_remove_option();
        assert!(state.editor.form().questions[0].options.is_empty());
        assert_eq!(state.builder_cursor.element(), Some(QuestionElement::AddOption));
    }

    #[test]
    fn test_collapse_keeps_cursor_on_card() {
        let mut state = AppState::default();
        state.select_element("q1", QuestionElement::Required);
        state.collapse_question();
        assert_eq!(state.editor.focus(), None);
        assert_eq!(
            state.builder_cursor,
            BuilderCursor::question("q1", QuestionElement::Title)
        );
    }

    #[test]
    fn test_preview_select_and_clear() {
        let mut state = AppState::default();
        state.add_option("q1");
        state.set_view(View::Preview);
        state.preview_horizontal(true);
        state.preview_activate();
        let question = state.editor.form().questions[0].clone();
        assert_eq!(state.respondent.selected_labels(&question), vec!["Option 2"]);

        state.respondent.cursor = PreviewCursor::ClearForm;
        state.preview_activate();
        assert!(state.respondent.selected_labels(&question).is_empty());
        assert_eq!(state.status_message.as_deref(), Some("Form cleared"));
    }

    #[test]
    fn test_preview_text_answer_and_submit() {
        let mut state = AppState::default();
        state.select_element("q1", QuestionElement::Type);
        state.builder_cycle_type(false);
        state.builder_cycle_type(false);
        assert_eq!(
            state.editor.form().questions[0].question_type,
            QuestionType::ShortAnswer
        );

        state.preview_input_char('o');
        state.preview_space();
        state.preview_input_char('k');
        let question = state.editor.form().questions[0].clone();
        assert_eq!(state.respondent.text(&question), "o k");

        state.respondent.cursor = PreviewCursor::Submit;
        state.preview_activate();
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_editing_form_prunes_preview_answers() {
        let mut state = AppState::default();
        state.preview_activate();
        let question = state.editor.form().questions[0].clone();
        assert_eq!(state.respondent.selected_labels(&question), vec!["Option 1"]);

        state.select_element("q1", QuestionElement::Option(0));
        state.builder_remove_option();
        let question = state.editor.form().questions[0].clone();
        assert!(state.respondent.selected_labels(&question).is_empty());
    }
}
