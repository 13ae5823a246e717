//! Respondent preview state: answers typed into the form preview
//!
//! Answers live only for the session and are never submitted anywhere.

use crate::state::forms::{FormSchema, Question, QuestionType};
use std::collections::{BTreeSet, HashMap};

/// How a question is answered in the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSurface<'a> {
    /// Single-line text input
    TextLine,
    /// Multi-line text area
    TextArea,
    /// Mutually exclusive choices
    RadioGroup(Vec<&'a str>),
    /// Independent toggles
    CheckboxGroup(Vec<&'a str>),
    /// Single select with a placeholder
    Select {
        placeholder: &'static str,
        choices: Vec<&'a str>,
    },
}

impl<'a> InputSurface<'a> {
    pub fn for_question(question: &'a Question) -> Self {
        let labels = || question.options.iter().map(|o| o.text.as_str()).collect();
        match question.question_type {
            QuestionType::ShortAnswer => Self::TextLine,
            QuestionType::Paragraph => Self::TextArea,
            QuestionType::MultipleChoice => Self::RadioGroup(labels()),
            QuestionType::Checkboxes => Self::CheckboxGroup(labels()),
            QuestionType::Dropdown => Self::Select {
                placeholder: "Choose",
                choices: labels(),
            },
        }
    }
}

/// A respondent's answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    /// Selected option id for radio groups and dropdowns
    Single(Option<String>),
    /// Selected option ids for checkboxes
    Multiple(BTreeSet<String>),
}

impl Answer {
    fn empty_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::ShortAnswer | QuestionType::Paragraph => Self::Text(String::new()),
            QuestionType::MultipleChoice | QuestionType::Dropdown => Self::Single(None),
            QuestionType::Checkboxes => Self::Multiple(BTreeSet::new()),
        }
    }

    fn fits(&self, question_type: QuestionType) -> bool {
        matches!(
            (self, question_type),
            (
                Self::Text(_),
                QuestionType::ShortAnswer | QuestionType::Paragraph
            ) | (
                Self::Single(_),
                QuestionType::MultipleChoice | QuestionType::Dropdown
            ) | (Self::Multiple(_), QuestionType::Checkboxes)
        )
    }
}

/// Where keyboard input goes in the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCursor {
    Question(usize),
    Submit,
    ClearForm,
}

impl Default for PreviewCursor {
    fn default() -> Self {
        Self::Question(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RespondentState {
    answers: HashMap<String, Answer>,
    pub cursor: PreviewCursor,
    /// Highlighted option within the current choice question
    pub option_cursor: usize,
}

impl RespondentState {
    fn answer_mut(&mut self, question: &Question) -> &mut Answer {
        let answer = self
            .answers
            .entry(question.id.clone())
            .or_insert_with(|| Answer::empty_for(question.question_type));
        if !answer.fits(question.question_type) {
            *answer = Answer::empty_for(question.question_type);
        }
        answer
    }

    /// Typed text for a text question
    pub fn text(&self, question: &Question) -> &str {
        match self.answers.get(&question.id) {
            Some(Answer::Text(text)) => text,
            _ => "",
        }
    }

    pub fn is_selected(&self, question: &Question, option_id: &str) -> bool {
        match self.answers.get(&question.id) {
            Some(Answer::Single(Some(selected))) => selected == option_id,
            Some(Answer::Multiple(selected)) => selected.contains(option_id),
            _ => false,
        }
    }

    /// Selected option texts, in option order
    pub fn selected_labels<'q>(&self, question: &'q Question) -> Vec<&'q str> {
        question
            .options
            .iter()
            .filter(|o| self.is_selected(question, &o.id))
            .map(|o| o.text.as_str())
            .collect()
    }

    pub fn type_char(&mut self, question: &Question, c: char) {
        if let Answer::Text(text) = self.answer_mut(question) {
            text.push(c);
        }
    }

    /// Only paragraph answers take newlines
    pub fn newline(&mut self, question: &Question) {
        if question.question_type == QuestionType::Paragraph {
            self.type_char(question, '\n');
        }
    }

    pub fn backspace(&mut self, question: &Question) {
        if let Answer::Text(text) = self.answer_mut(question) {
            text.pop();
        }
    }

    /// Select an option: exclusive for radio/dropdown, toggling for checkboxes
    pub fn select_option(&mut self, question: &Question, option_id: &str) {
        if question.option_index(option_id).is_none() {
            return;
        }
        match self.answer_mut(question) {
            Answer::Single(selected) => *selected = Some(option_id.to_string()),
            Answer::Multiple(selected) => {
                if !selected.remove(option_id) {
                    selected.insert(option_id.to_string());
                }
            }
            Answer::Text(_) => {}
        }
    }

    /// Step a dropdown's selection through its options
    pub fn cycle_dropdown(&mut self, question: &Question, forward: bool) {
        let count = question.options.len();
        if question.question_type != QuestionType::Dropdown || count == 0 {
            return;
        }
        let current = match self.answers.get(&question.id) {
            Some(Answer::Single(Some(id))) => question.option_index(id),
            _ => None,
        };
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        let option_id = question.options[next].id.clone();
        self.select_option(question, &option_id);
    }

    /// Reset every answer ("Clear form")
    pub fn clear(&mut self) {
        self.answers.clear();
        self.option_cursor = 0;
    }

    /// Drop answers that no longer match the form after it was edited
    pub fn sync(&mut self, form: &FormSchema) {
        self.answers.retain(|id, answer| {
            let Some(question) = form.question(id) else {
                return false;
            };
            if !answer.fits(question.question_type) {
                return false;
            }
            match answer {
                Answer::Single(selected) => {
                    if selected
                        .as_deref()
                        .is_some_and(|s| question.option_index(s).is_none())
                    {
                        *selected = None;
                    }
                }
                Answer::Multiple(selected) => {
                    selected.retain(|s| question.option_index(s).is_some());
                }
                Answer::Text(_) => {}
            }
            true
        });
        if let PreviewCursor::Question(i) = self.cursor {
            if i >= form.questions.len() {
                self.cursor = if form.questions.is_empty() {
                    PreviewCursor::Submit
                } else {
                    PreviewCursor::Question(form.questions.len() - 1)
                };
            }
        }
    }

    /// Move between questions and the two trailing buttons
    pub fn step(&mut self, question_count: usize, forward: bool) {
        let stops = question_count + 2;
        let index = match self.cursor {
            PreviewCursor::Question(i) => i.min(question_count),
            PreviewCursor::Submit => question_count,
            PreviewCursor::ClearForm => question_count + 1,
        };
        let next = if forward {
            (index + 1) % stops
        } else {
            (index + stops - 1) % stops
        };
        self.cursor = if next < question_count {
            PreviewCursor::Question(next)
        } else if next == question_count {
            PreviewCursor::Submit
        } else {
            PreviewCursor::ClearForm
        };
        self.option_cursor = 0;
    }

    /// Move the option highlight within a choice question
    pub fn move_option_cursor(&mut self, question: &Question, forward: bool) {
        let count = question.options.len();
        if count == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1).min(count - 1)
        } else {
            self.option_cursor.saturating_sub(1)
        };
    }

    /// Select (or toggle) the highlighted option
    pub fn select_highlighted(&mut self, question: &Question) {
        if let Some(option) = question.options.get(self.option_cursor) {
            let option_id = option.id.clone();
            self.select_option(question, &option_id);
        }
    }
}
