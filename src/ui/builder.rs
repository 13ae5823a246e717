//! Form builder view: the header card and one card per question
//!
//! Card geometry is computed by pure functions so the mouse handler can
//! hit-test with exactly the layout that was drawn.

use super::components::render_card;
use crate::app::App;
use crate::state::{BuilderCursor, FormSchema, Question, QuestionElement, QuestionType};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Header card: borders + title + description
pub const HEADER_CARD_HEIGHT: u16 = 4;
/// Blank rows between cards
pub const CARD_GAP: u16 = 1;
/// Cards never grow wider than this
pub const MAX_CARD_WIDTH: u16 = 84;

/// Footer buttons of the active card as (start, end, element), relative to
/// the card's inner left edge
pub const FOOTER_SEGMENTS: [(u16, u16, QuestionElement); 3] = [
    (0, 11, QuestionElement::Duplicate),
    (13, 21, QuestionElement::Delete),
    (23, 37, QuestionElement::Required),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Header,
    Question(usize),
}

/// Vertical placement of one card, in content rows before scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub kind: CardKind,
    pub top: u16,
    pub height: u16,
}

/// What a click in the builder landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderHit {
    FormTitle,
    FormDescription,
    Card(String),
    Element(String, QuestionElement),
}

/// Rows of the collapsed body: one stand-in row, or one row per option
fn body_rows(question: &Question) -> u16 {
    match question.question_type {
        QuestionType::ShortAnswer | QuestionType::Paragraph | QuestionType::Dropdown => 1,
        QuestionType::MultipleChoice | QuestionType::Checkboxes => question.options.len() as u16,
    }
}

/// Element shown on each inner row of an active card
pub fn active_rows(question: &Question) -> Vec<Option<QuestionElement>> {
    let mut rows = vec![
        Some(QuestionElement::Title),
        Some(QuestionElement::Type),
        None,
    ];
    if question.question_type.is_choice() {
        rows.extend((0..question.options.len()).map(|i| Some(QuestionElement::Option(i))));
        rows.push(Some(QuestionElement::AddOption));
    } else {
        rows.push(None);
    }
    rows.push(None);
    // Footer row; the column decides between its buttons
    rows.push(Some(QuestionElement::Duplicate));
    rows
}

pub fn card_height(question: &Question, active: bool) -> u16 {
    if active {
        active_rows(question).len() as u16 + 2
    } else {
        body_rows(question) + 3
    }
}

pub fn card_slots(form: &FormSchema, focus: Option<&str>) -> Vec<CardSlot> {
    let mut slots = vec![CardSlot {
        kind: CardKind::Header,
        top: 0,
        height: HEADER_CARD_HEIGHT,
    }];
    let mut top = HEADER_CARD_HEIGHT + CARD_GAP;
    for (index, question) in form.questions.iter().enumerate() {
        let height = card_height(question, focus == Some(question.id.as_str()));
        slots.push(CardSlot {
            kind: CardKind::Question(index),
            top,
            height,
        });
        top += height + CARD_GAP;
    }
    slots
}

/// Rows scrolled off the top so the cursor's card fits the viewport
pub fn scroll_offset(
    form: &FormSchema,
    slots: &[CardSlot],
    cursor: &BuilderCursor,
    viewport: u16,
) -> u16 {
    let target = match cursor.question_id().and_then(|id| form.question_index(id)) {
        Some(index) => CardKind::Question(index),
        None => CardKind::Header,
    };
    let Some(slot) = slots.iter().find(|s| s.kind == target) else {
        return 0;
    };
    let bottom = slot.top + slot.height;
    if bottom <= viewport {
        0
    } else if slot.height >= viewport {
        slot.top
    } else {
        bottom - viewport
    }
}

/// Centered column the cards are drawn in
pub fn card_column(area: Rect) -> Rect {
    let width = area.width.saturating_sub(2).min(MAX_CARD_WIDTH);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Map an absolute screen position inside `area` to a builder target
pub fn hit_test(
    form: &FormSchema,
    focus: Option<&str>,
    cursor: &BuilderCursor,
    area: Rect,
    column: u16,
    row: u16,
) -> Option<BuilderHit> {
    let cards = card_column(area);
    if row < area.y || column < cards.x || column >= cards.x + cards.width {
        return None;
    }
    let slots = card_slots(form, focus);
    let offset = scroll_offset(form, &slots, cursor, area.height);
    let content_row = row - area.y + offset;

    let slot = slots
        .iter()
        .find(|s| content_row >= s.top && content_row < s.top + s.height)?;
    let inner_row = (content_row - slot.top).checked_sub(1);

    match slot.kind {
        CardKind::Header => match inner_row {
            Some(0) => Some(BuilderHit::FormTitle),
            _ => Some(BuilderHit::FormDescription),
        },
        CardKind::Question(index) => {
            let question = form.questions.get(index)?;
            if focus != Some(question.id.as_str()) {
                return Some(BuilderHit::Card(question.id.clone()));
            }
            let rows = active_rows(question);
            let element = inner_row.and_then(|r| rows.get(r as usize).copied().flatten());
            let element = match element {
                Some(QuestionElement::Duplicate) => {
                    let inner_col = column.saturating_sub(cards.x + 2);
                    FOOTER_SEGMENTS
                        .iter()
                        .find(|(start, end, _)| inner_col >= *start && inner_col < *end)
                        .map(|(_, _, element)| *element)
                }
                other => other,
            };
            Some(match element {
                Some(element) => BuilderHit::Element(question.id.clone(), element),
                None => BuilderHit::Card(question.id.clone()),
            })
        }
    }
}

fn cursor_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn caret(selected: bool) -> Span<'static> {
    Span::styled(
        if selected { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    )
}

/// Marker in front of an option for the builder's read-only rendering
fn option_marker(question_type: QuestionType, index: usize) -> String {
    match question_type {
        QuestionType::MultipleChoice => "( )".to_string(),
        QuestionType::Checkboxes => "[ ]".to_string(),
        QuestionType::Dropdown => format!("{}.", index + 1),
        QuestionType::ShortAnswer | QuestionType::Paragraph => String::new(),
    }
}

fn title_spans(question: &Question) -> Vec<Span<'_>> {
    let mut spans = vec![if question.title.is_empty() {
        Span::styled(
            "Untitled Question",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            question.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )
    }];
    if question.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    spans
}

fn placeholder_line(question_type: QuestionType) -> Option<Line<'static>> {
    let text = match question_type {
        QuestionType::ShortAnswer => "Short answer text",
        QuestionType::Paragraph => "Long answer text",
        QuestionType::MultipleChoice | QuestionType::Checkboxes | QuestionType::Dropdown => {
            return None
        }
    };
    Some(Line::from(Span::styled(
        format!("  {text}"),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
}

/// Underline width standing in for a text input
const ANSWER_LINE_WIDTH: usize = 30;

fn collapsed_lines(question: &Question) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(title_spans(question))];
    match question.question_type {
        QuestionType::ShortAnswer | QuestionType::Paragraph => {
            let width = match question.question_type {
                QuestionType::Paragraph => ANSWER_LINE_WIDTH * 2,
                _ => ANSWER_LINE_WIDTH,
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", "_".repeat(width)),
                dim,
            )));
        }
        QuestionType::Dropdown => {
            lines.push(Line::from(Span::styled("  [ Dropdown ▾ ]", dim)));
        }
        QuestionType::MultipleChoice | QuestionType::Checkboxes => {
            lines.extend(question.options.iter().enumerate().map(|(i, option)| {
                Line::from(format!(
                    "  {} {}",
                    option_marker(question.question_type, i),
                    option.text
                ))
            }))
        }
    }
    lines
}

fn active_lines<'a>(question: &'a Question, element: Option<QuestionElement>) -> Vec<Line<'a>> {
    let on = |e: QuestionElement| element == Some(e);
    let mut lines = Vec::new();

    let mut title = vec![Span::styled(
        question.title.as_str(),
        cursor_style(on(QuestionElement::Title)),
    )];
    title.push(caret(on(QuestionElement::Title)));
    lines.push(Line::from(title));

    lines.push(Line::from(vec![
        Span::styled("Type: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("◀ {} ▶", question.question_type.label()),
            cursor_style(on(QuestionElement::Type)),
        ),
    ]));
    lines.push(Line::from(""));

    match placeholder_line(question.question_type) {
        Some(line) => lines.push(line),
        None => {
            for (i, option) in question.options.iter().enumerate() {
                let selected = on(QuestionElement::Option(i));
                lines.push(Line::from(vec![
                    Span::raw(format!(
                        "  {} ",
                        option_marker(question.question_type, i)
                    )),
                    Span::styled(option.text.as_str(), cursor_style(selected)),
                    caret(selected),
                    Span::styled(
                        if selected { "   Del:remove" } else { "" },
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            lines.push(Line::from(Span::styled(
                "  + Add option",
                if on(QuestionElement::AddOption) {
                    cursor_style(true)
                } else {
                    Style::default().fg(Color::Blue)
                },
            )));
        }
    }
    lines.push(Line::from(""));

    let required_box = if question.required { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled("[Duplicate]", cursor_style(on(QuestionElement::Duplicate))),
        Span::raw("  "),
        Span::styled(
            "[Delete]",
            if on(QuestionElement::Delete) {
                cursor_style(true)
            } else {
                Style::default().fg(Color::Red)
            },
        ),
        Span::raw("  "),
        Span::styled(
            format!("Required {required_box}"),
            cursor_style(on(QuestionElement::Required)),
        ),
    ]));
    lines
}

fn header_lines<'a>(form: &'a FormSchema, cursor: &BuilderCursor) -> Vec<Line<'a>> {
    let on_title = *cursor == BuilderCursor::FormTitle;
    let on_description = *cursor == BuilderCursor::FormDescription;

    let title_style = cursor_style(on_title).add_modifier(Modifier::BOLD);
    let description = if form.description.is_empty() && !on_description {
        Span::styled(
            "Form description",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(form.description.as_str(), cursor_style(on_description))
    };

    vec![
        Line::from(vec![
            Span::styled(form.title.as_str(), title_style),
            caret(on_title),
        ]),
        Line::from(vec![description, caret(on_description)]),
    ]
}

/// Draw the builder view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let editor = &app.state.editor;
    let form = editor.form();
    let cursor = &app.state.builder_cursor;
    let cards = card_column(area);

    let slots = card_slots(form, editor.focus());
    let offset = scroll_offset(form, &slots, cursor, area.height);

    for slot in &slots {
        // Cards scrolled partly above the viewport are skipped
        if slot.top < offset {
            continue;
        }
        let y = area.y + (slot.top - offset);
        if y >= area.y + area.height {
            break;
        }
        let card_area = Rect {
            x: cards.x,
            y,
            width: cards.width,
            height: slot.height.min(area.y + area.height - y),
        };

        match slot.kind {
            CardKind::Header => {
                let selected = matches!(
                    cursor,
                    BuilderCursor::FormTitle | BuilderCursor::FormDescription
                );
                render_card(
                    frame,
                    card_area,
                    Paragraph::new(header_lines(form, cursor)),
                    selected,
                    Some(Color::Magenta),
                );
            }
            CardKind::Question(index) => {
                let Some(question) = form.questions.get(index) else {
                    continue;
                };
                let active = editor.is_focused(&question.id);
                let lines = if active {
                    active_lines(question, cursor.element())
                } else {
                    collapsed_lines(question)
                };
                let on_card = cursor.question_id() == Some(question.id.as_str());
                render_card(
                    frame,
                    card_area,
                    Paragraph::new(lines),
                    active || on_card,
                    active.then_some(Color::Blue),
                );
            }
        }
    }

    if form.questions.is_empty() && HEADER_CARD_HEIGHT + CARD_GAP < area.height {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No questions yet. Press Ctrl+N to add one.",
            Style::default().fg(Color::DarkGray),
        )));
        let hint_area = Rect {
            x: cards.x + 1,
            y: area.y + HEADER_CARD_HEIGHT + CARD_GAP,
            width: cards.width.saturating_sub(1),
            height: 1,
        };
        frame.render_widget(hint, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::QuestionUpdate;
    use pretty_assertions::assert_eq;

    const AREA: Rect = Rect {
        x: 0,
        y: 3,
        width: 90,
        height: 40,
    };

    #[test]
    fn test_card_heights() {
        let form = FormSchema::seeded();
        let question = &form.questions[0];
        // borders + title + one option
        assert_eq!(card_height(question, false), 4);
        // borders + title + type + blank + option + add + blank + footer
        assert_eq!(card_height(question, true), 9);
    }

    #[test]
    fn test_text_question_heights() {
        let mut form = FormSchema::seeded();
        form.update_question("q1", QuestionUpdate::question_type(QuestionType::Paragraph));
        assert_eq!(card_height(&form.questions[0], false), 4);
        assert_eq!(card_height(&form.questions[0], true), 8);
    }

    #[test]
    fn test_card_slots_stack_with_gaps() {
        let mut form = FormSchema::seeded();
        form.add_question();
        let slots = card_slots(&form, Some("q1"));
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1].top, 5);
        assert_eq!(slots[1].height, 9);
        assert_eq!(slots[2].top, 15);
    }

    #[test]
    fn test_scroll_keeps_cursor_card_visible() {
        let mut form = FormSchema::seeded();
        for _ in 0..5 {
            form.add_question();
        }
        let slots = card_slots(&form, None);
        let last = form.questions[5].id.clone();
        let cursor = BuilderCursor::question(last, QuestionElement::Title);
        let offset = scroll_offset(&form, &slots, &cursor, 20);
        let slot = slots[6];
        assert_eq!(slot.top + slot.height - offset, 20);
        assert_eq!(
            scroll_offset(&form, &slots, &BuilderCursor::FormTitle, 20),
            0
        );
    }

    #[test]
    fn test_hit_test_header() {
        let form = FormSchema::seeded();
        let cursor = BuilderCursor::FormTitle;
        let cards = card_column(AREA);
        assert_eq!(
            hit_test(&form, None, &cursor, AREA, cards.x + 2, AREA.y + 1),
            Some(BuilderHit::FormTitle)
        );
        assert_eq!(
            hit_test(&form, None, &cursor, AREA, cards.x + 2, AREA.y + 2),
            Some(BuilderHit::FormDescription)
        );
        assert_eq!(hit_test(&form, None, &cursor, AREA, 0, AREA.y + 1), None);
    }

    #[test]
    fn test_hit_test_collapsed_card() {
        let form = FormSchema::seeded();
        let cursor = BuilderCursor::FormTitle;
        let cards = card_column(AREA);
        assert_eq!(
            hit_test(&form, None, &cursor, AREA, cards.x + 4, AREA.y + 6),
            Some(BuilderHit::Card("q1".to_string()))
        );
    }

    #[test]
    fn test_hit_test_active_card_rows() {
        let form = FormSchema::seeded();
        let cursor = BuilderCursor::question("q1", QuestionElement::Title);
        let cards = card_column(AREA);
        let top = AREA.y + 5;
        let hit = |col: u16, row: u16| hit_test(&form, Some("q1"), &cursor, AREA, col, row);

        assert_eq!(
            hit(cards.x + 4, top + 1),
            Some(BuilderHit::Element("q1".into(), QuestionElement::Title))
        );
        assert_eq!(
            hit(cards.x + 4, top + 4),
            Some(BuilderHit::Element("q1".into(), QuestionElement::Option(0)))
        );
        assert_eq!(
            hit(cards.x + 4, top + 5),
            Some(BuilderHit::Element("q1".into(), QuestionElement::AddOption))
        );
        // Footer buttons by column
        assert_eq!(
            hit(cards.x + 2, top + 7),
            Some(BuilderHit::Element("q1".into(), QuestionElement::Duplicate))
        );
        assert_eq!(
            hit(cards.x + 16, top + 7),
            Some(BuilderHit::Element("q1".into(), QuestionElement::Delete))
        );
        assert_eq!(
            hit(cards.x + 28, top + 7),
            Some(BuilderHit::Element("q1".into(), QuestionElement::Required))
        );
        // Blank row falls back to the card
        assert_eq!(hit(cards.x + 4, top + 3), Some(BuilderHit::Card("q1".into())));
    }

    #[test]
    fn test_option_markers() {
        assert_eq!(option_marker(QuestionType::MultipleChoice, 0), "( )");
        assert_eq!(option_marker(QuestionType::Checkboxes, 3), "[ ]");
        assert_eq!(option_marker(QuestionType::Dropdown, 1), "2.");
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_collapsed_body_per_type() {
        let mut form = FormSchema::seeded();
        form.add_option("q1");

        for question_type in QuestionType::ALL {
            form.update_question("q1", QuestionUpdate::question_type(question_type));
            let question = &form.questions[0];
            let lines = collapsed_lines(question);
            let body: Vec<String> = lines[1..].iter().map(line_text).collect();

            assert_eq!(lines.len() as u16, 1 + body_rows(question));
            assert_eq!(card_height(question, false), body_rows(question) + 3);
            match question_type {
                QuestionType::ShortAnswer | QuestionType::Paragraph => {
                    assert_eq!(body.len(), 1);
                    assert!(body[0].trim().chars().all(|c| c == '_'));
                    assert!(!body[0].contains("answer text"));
                }
                QuestionType::Dropdown => {
                    assert_eq!(body, vec!["  [ Dropdown ▾ ]".to_string()]);
                }
                QuestionType::MultipleChoice => {
                    assert_eq!(body, vec!["  ( ) Option 1", "  ( ) Option 2"]);
                }
                QuestionType::Checkboxes => {
                    assert_eq!(body, vec!["  [ ] Option 1", "  [ ] Option 2"]);
                }
            }
        }
    }
}
