//! Form editor: the schema plus the single focused question

use super::schema::{FormSchema, Question, QuestionUpdate};

/// Owns the form being built and which question is in edit mode.
///
/// Focus is a single optional id, so at most one question can be active.
/// Every operation is total: unknown ids leave the form untouched.
#[derive(Debug, Clone, Default)]
pub struct FormEditor {
    form: FormSchema,
    focus: Option<String>,
}

impl FormEditor {
    pub fn new(form: FormSchema) -> Self {
        Self { form, focus: None }
    }

    pub fn form(&self) -> &FormSchema {
        &self.form
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn is_focused(&self, question_id: &str) -> bool {
        self.focus.as_deref() == Some(question_id)
    }

    /// The focused question, if it still exists
    pub fn focused_question(&self) -> Option<&Question> {
        self.focus.as_deref().and_then(|id| self.form.question(id))
    }

    /// Move focus to a question; the previously focused one becomes inactive
    pub fn set_focus(&mut self, question_id: &str) {
        if self.form.question(question_id).is_some() {
            self.focus = Some(question_id.to_string());
        }
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn set_title(&mut self, title: &str) {
        self.form.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.form.description = description.to_string();
    }

    pub fn add_question(&mut self) -> String {
        let id = self.form.add_question();
        tracing::debug!("Added question {id}");
        self.focus = Some(id.clone());
        id
    }

    pub fn update_question(&mut self, id: &str, update: QuestionUpdate) {
        self.form.update_question(id, update);
    }

    /// Remove a question. Focus is left alone; the view drops a dangling focus.
    pub fn delete_question(&mut self, id: &str) {
        self.form.delete_question(id);
        tracing::debug!("Deleted question {id}");
    }

    pub fn duplicate_question(&mut self, id: &str) -> Option<String> {
        let copy_id = self.form.duplicate_question(id)?;
        tracing::debug!("Duplicated question {id} as {copy_id}");
        self.focus = Some(copy_id.clone());
        Some(copy_id)
    }

    pub fn add_option(&mut self, question_id: &str) -> Option<String> {
        self.form.add_option(question_id)
    }

    pub fn update_option_text(&mut self, question_id: &str, option_id: &str, text: &str) {
        self.form.update_option_text(question_id, option_id, text);
    }

    pub fn remove_option(&mut self, question_id: &str, option_id: &str) {
        self.form.remove_option(question_id, option_id);
    }

    /// Clear focus if it points at a question that no longer exists
    pub fn drop_dangling_focus(&mut self) {
        if self.focus.is_some() && self.focused_question().is_none() {
            self.focus = None;
        }
    }
}
