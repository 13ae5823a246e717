//! Form schema value objects and their mutation operations

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque identifier for a question or option
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The closed set of question types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    ShortAnswer,
    Paragraph,
    #[default]
    MultipleChoice,
    Checkboxes,
    Dropdown,
}

impl QuestionType {
    /// All types in type-selector order
    pub const ALL: [QuestionType; 5] = [
        Self::ShortAnswer,
        Self::Paragraph,
        Self::MultipleChoice,
        Self::Checkboxes,
        Self::Dropdown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortAnswer => "Short Answer",
            Self::Paragraph => "Paragraph",
            Self::MultipleChoice => "Multiple Choice",
            Self::Checkboxes => "Checkboxes",
            Self::Dropdown => "Dropdown",
        }
    }

    /// Whether answers are picked from the question's options
    pub fn is_choice(&self) -> bool {
        match self {
            Self::ShortAnswer | Self::Paragraph => false,
            Self::MultipleChoice | Self::Checkboxes | Self::Dropdown => true,
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// One selectable choice of a choice-based question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
        }
    }
}

/// A single question of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    pub required: bool,
    /// Kept across type changes, so text questions may carry stale options
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// A blank multiple-choice question with a single default option
    pub fn new() -> Self {
        Self {
            id: new_id(),
            question_type: QuestionType::MultipleChoice,
            title: String::new(),
            required: false,
            options: vec![QuestionOption::new("Option 1")],
        }
    }

    /// Copy of this question with fresh ids for itself and every option
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            options: self
                .options
                .iter()
                .map(|o| QuestionOption::new(o.text.clone()))
                .collect(),
            ..self.clone()
        }
    }

    pub fn option_index(&self, option_id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.id == option_id)
    }
}

impl Default for Question {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial replacement of a question's fields; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct QuestionUpdate {
    pub title: Option<String>,
    pub question_type: Option<QuestionType>,
    pub required: Option<bool>,
    pub options: Option<Vec<QuestionOption>>,
}

impl QuestionUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn question_type(question_type: QuestionType) -> Self {
        Self {
            question_type: Some(question_type),
            ..Default::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Default::default()
        }
    }

    fn apply(self, question: &mut Question) {
        if let Some(title) = self.title {
            question.title = title;
        }
        if let Some(question_type) = self.question_type {
            question.question_type = question_type;
        }
        if let Some(required) = self.required {
            question.required = required;
        }
        if let Some(options) = self.options {
            question.options = options;
        }
    }
}

/// The complete editable definition of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
}

impl FormSchema {
    /// The form every session starts with
    pub fn seeded() -> Self {
        Self {
            id: "1".to_string(),
            title: "Untitled Form".to_string(),
            description: String::new(),
            questions: vec![Question {
                id: "q1".to_string(),
                question_type: QuestionType::MultipleChoice,
                title: "Untitled Question".to_string(),
                required: false,
                options: vec![QuestionOption {
                    id: "o1".to_string(),
                    text: "Option 1".to_string(),
                }],
            }],
            header_image: None,
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn question_index(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    /// Append a blank question and return its id
    pub fn add_question(&mut self) -> String {
        let question = Question::new();
        let id = question.id.clone();
        self.questions.push(question);
        id
    }

    pub fn update_question(&mut self, id: &str, update: QuestionUpdate) {
        if let Some(question) = self.question_mut(id) {
            update.apply(question);
        }
    }

    pub fn delete_question(&mut self, id: &str) {
        self.questions.retain(|q| q.id != id);
    }

    /// Insert a copy right after the original and return the copy's id
    pub fn duplicate_question(&mut self, id: &str) -> Option<String> {
        let index = self.question_index(id)?;
        let copy = self.questions[index].duplicate();
        let copy_id = copy.id.clone();
        self.questions.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Append an option labelled after the current count and return its id
    pub fn add_option(&mut self, question_id: &str) -> Option<String> {
        let question = self.question_mut(question_id)?;
        let option = QuestionOption::new(format!("Option {}", question.options.len() + 1));
        let option_id = option.id.clone();
        question.options.push(option);
        Some(option_id)
    }

    pub fn update_option_text(&mut self, question_id: &str, option_id: &str, text: &str) {
        if let Some(option) = self
            .question_mut(question_id)
            .and_then(|q| q.options.iter_mut().find(|o| o.id == option_id))
        {
            option.text = text.to_string();
        }
    }

    pub fn remove_option(&mut self, question_id: &str, option_id: &str) {
        if let Some(question) = self.question_mut(question_id) {
            question.options.retain(|o| o.id != option_id);
        }
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::seeded()
    }
}
