//! Keyboard cursor for the form builder view

use super::schema::{FormSchema, Question};

/// Editable part of the active question card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionElement {
    #[default]
    Title,
    Type,
    Option(usize),
    AddOption,
    Duplicate,
    Delete,
    Required,
}

impl QuestionElement {
    /// Elements of an active card, top to bottom
    pub fn for_question(question: &Question) -> Vec<QuestionElement> {
        let mut elements = vec![Self::Title, Self::Type];
        if question.question_type.is_choice() {
            elements.extend((0..question.options.len()).map(Self::Option));
            elements.push(Self::AddOption);
        }
        elements.extend([Self::Duplicate, Self::Delete, Self::Required]);
        elements
    }

    /// Whether typed characters edit this element
    pub fn accepts_text(&self) -> bool {
        matches!(self, Self::Title | Self::Option(_))
    }
}

/// Where keyboard input goes in the builder
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BuilderCursor {
    #[default]
    FormTitle,
    FormDescription,
    Question {
        id: String,
        element: QuestionElement,
    },
}

impl BuilderCursor {
    pub fn question(id: impl Into<String>, element: QuestionElement) -> Self {
        Self::Question {
            id: id.into(),
            element,
        }
    }

    pub fn question_id(&self) -> Option<&str> {
        match self {
            Self::Question { id, .. } => Some(id),
            Self::FormTitle | Self::FormDescription => None,
        }
    }

    pub fn element(&self) -> Option<QuestionElement> {
        match self {
            Self::Question { element, .. } => Some(*element),
            Self::FormTitle | Self::FormDescription => None,
        }
    }

    /// Whether typed characters edit the element under the cursor
    pub fn accepts_text(&self) -> bool {
        match self {
            Self::FormTitle | Self::FormDescription => true,
            Self::Question { element, .. } => element.accepts_text(),
        }
    }

    /// Pull the cursor back onto a valid stop after the form changed
    pub fn normalize(&self, form: &FormSchema, focus: Option<&str>) -> Self {
        let Self::Question { id, element } = self else {
            return self.clone();
        };
        let Some(question) = form.question(id) else {
            return Self::FormTitle;
        };
        if focus != Some(id.as_str()) {
            return Self::question(id.clone(), QuestionElement::Title);
        }
        let is_choice = question.question_type.is_choice();
        let element = match *element {
            QuestionElement::Option(i) if is_choice => {
                if question.options.is_empty() {
                    QuestionElement::AddOption
                } else {
                    QuestionElement::Option(i.min(question.options.len() - 1))
                }
            }
            QuestionElement::Option(_) | QuestionElement::AddOption if !is_choice => {
                QuestionElement::Type
            }
            other => other,
        };
        Self::question(id.clone(), element)
    }

    /// Step to the next (or previous) stop, wrapping around
    pub fn step(&self, form: &FormSchema, focus: Option<&str>, forward: bool) -> Self {
        let stops = builder_stops(form, focus);
        let current = self.normalize(form, focus);
        let index = stops.iter().position(|s| *s == current).unwrap_or(0);
        let next = if forward {
            (index + 1) % stops.len()
        } else if index == 0 {
            stops.len() - 1
        } else {
            index - 1
        };
        stops[next].clone()
    }
}

/// All cursor stops: header fields, then one stop per inactive card and
/// one per element of the active card
pub fn builder_stops(form: &FormSchema, focus: Option<&str>) -> Vec<BuilderCursor> {
    let mut stops = vec![BuilderCursor::FormTitle, BuilderCursor::FormDescription];
    for question in &form.questions {
        if focus == Some(question.id.as_str()) {
            stops.extend(
                QuestionElement::for_question(question)
                    .into_iter()
                    .map(|e| BuilderCursor::question(question.id.clone(), e)),
            );
        } else {
            stops.push(BuilderCursor::question(
                question.id.clone(),
                QuestionElement::Title,
            ));
        }
    }
    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{QuestionType, QuestionUpdate};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_elements_for_choice_question() {
        let form = FormSchema::seeded();
        let elements = QuestionElement::for_question(&form.questions[0]);
        assert_eq!(
            elements,
            vec![
                QuestionElement::Title,
                QuestionElement::Type,
                QuestionElement::Option(0),
                QuestionElement::AddOption,
                QuestionElement::Duplicate,
                QuestionElement::Delete,
                QuestionElement::Required,
            ]
        );
    }

    #[test]
    fn test_elements_for_text_question_skip_options() {
        let mut form = FormSchema::seeded();
        form.update_question("q1", QuestionUpdate::question_type(QuestionType::Paragraph));
        let elements = QuestionElement::for_question(&form.questions[0]);
        assert!(!elements.contains(&QuestionElement::AddOption));
        assert!(!elements.contains(&QuestionElement::Option(0)));
    }

    #[test]
    fn test_cursor_accepts_text() {
        assert!(BuilderCursor::FormDescription.accepts_text());
        assert!(BuilderCursor::question("q1", QuestionElement::Option(0)).accepts_text());
        assert!(!BuilderCursor::question("q1", QuestionElement::Required).accepts_text());
    }

    #[test]
    fn test_inactive_questions_are_single_stops() {
        let mut form = FormSchema::seeded();
        form.add_question();
        let stops = builder_stops(&form, None);
        assert_eq!(stops.len(), 4);
    }

    #[test]
    fn test_step_wraps_around() {
        let form = FormSchema::seeded();
        let last = BuilderCursor::question("q1", QuestionElement::Title);
        assert_eq!(last.step(&form, None, true), BuilderCursor::FormTitle);
        assert_eq!(BuilderCursor::FormTitle.step(&form, None, false), last);
    }

    #[test]
    fn test_step_through_active_card() {
        let form = FormSchema::seeded();
        let cursor = BuilderCursor::question("q1", QuestionElement::Type);
        assert_eq!(
            cursor.step(&form, Some("q1"), true),
            BuilderCursor::question("q1", QuestionElement::Option(0))
        );
    }

    #[test]
    fn test_normalize_clamps_removed_option() {
        let mut form = FormSchema::seeded();
        form.add_option("q1");
        let cursor = BuilderCursor::question("q1", QuestionElement::Option(1));
        let option_id = form.questions[0].options[1].id.clone();
        form.remove_option("q1", &option_id);
        assert_eq!(
            cursor.normalize(&form, Some("q1")),
            BuilderCursor::question("q1", QuestionElement::Option(0))
        );
    }

    #[test]
    fn test_normalize_empty_options_lands_on_add_option() {
        let mut form = FormSchema::seeded();
        form.remove_option("q1", "o1");
        let cursor = BuilderCursor::question("q1", QuestionElement::Option(0));
        assert_eq!(
            cursor.normalize(&form, Some("q1")),
            BuilderCursor::question("q1", QuestionElement::AddOption)
        );
    }

    #[test]
    fn test_normalize_deleted_question_goes_to_header() {
        let mut form = FormSchema::seeded();
        let cursor = BuilderCursor::question("q1", QuestionElement::Delete);
        form.delete_question("q1");
        assert_eq!(cursor.normalize(&form, None), BuilderCursor::FormTitle);
    }

    #[test]
    fn test_normalize_type_switch_leaves_option_rows() {
        let mut form = FormSchema::seeded();
        form.update_question("q1", QuestionUpdate::question_type(QuestionType::ShortAnswer));
        let cursor = BuilderCursor::question("q1", QuestionElement::AddOption);
        assert_eq!(
            cursor.normalize(&form, Some("q1")),
            BuilderCursor::question("q1", QuestionElement::Type)
        );
    }
}
