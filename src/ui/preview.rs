//! Respondent preview: the form as someone filling it in would see it

use super::builder::{card_column, CARD_GAP};
use super::components::{render_button, render_card, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{FormSchema, InputSurface, PreviewCursor, Question, RespondentState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SUBMIT_WIDTH: u16 = 12;
const CLEAR_WIDTH: u16 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Question(usize),
    Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    section: Section,
    top: u16,
    height: u16,
}

/// What a click in the preview landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewHit {
    Question(usize),
    Option(usize, usize),
    Submit,
    ClearForm,
}

fn header_height(form: &FormSchema) -> u16 {
    let required_note = form.questions.iter().any(|q| q.required) as u16;
    3 + required_note + (!form.description.is_empty()) as u16
}

fn body_rows(question: &Question, answers: &RespondentState) -> u16 {
    match InputSurface::for_question(question) {
        InputSurface::TextLine | InputSurface::Select { .. } => 1,
        InputSurface::TextArea => answers.text(question).split('\n').count().max(2) as u16,
        InputSurface::RadioGroup(labels) | InputSurface::CheckboxGroup(labels) => {
            labels.len() as u16
        }
    }
}

fn slots(form: &FormSchema, answers: &RespondentState) -> Vec<Slot> {
    let mut slots = vec![Slot {
        section: Section::Header,
        top: 0,
        height: header_height(form),
    }];
    let mut top = slots[0].height + CARD_GAP;
    for (index, question) in form.questions.iter().enumerate() {
        let height = body_rows(question, answers) + 3;
        slots.push(Slot {
            section: Section::Question(index),
            top,
            height,
        });
        top += height + CARD_GAP;
    }
    slots.push(Slot {
        section: Section::Buttons,
        top,
        height: BUTTON_HEIGHT,
    });
    slots
}

fn scroll_offset(slots: &[Slot], cursor: PreviewCursor, viewport: u16) -> u16 {
    let target = match cursor {
        PreviewCursor::Question(i) => Section::Question(i),
        PreviewCursor::Submit | PreviewCursor::ClearForm => Section::Buttons,
    };
    let Some(slot) = slots.iter().find(|s| s.section == target) else {
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

fn button_rects(row: Rect) -> (Rect, Rect) {
    let submit = Rect {
        width: SUBMIT_WIDTH.min(row.width),
        ..row
    };
    let clear = Rect {
        x: row.x + row.width.saturating_sub(CLEAR_WIDTH),
        width: CLEAR_WIDTH.min(row.width),
        ..row
    };
    (submit, clear)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Map an absolute screen position inside `area` to a preview target
pub fn hit_test(
    form: &FormSchema,
    answers: &RespondentState,
    area: Rect,
    column: u16,
    row: u16,
) -> Option<PreviewHit> {
    let cards = card_column(area);
    if row < area.y || column < cards.x || column >= cards.x + cards.width {
        return None;
    }
    let slots = slots(form, answers);
    let offset = scroll_offset(&slots, answers.cursor, area.height);
    let content_row = row - area.y + offset;
    let slot = slots
        .iter()
        .find(|s| content_row >= s.top && content_row < s.top + s.height)?;

    match slot.section {
        Section::Header => None,
        Section::Question(index) => {
            let question = form.questions.get(index)?;
            // Options start below the top border and the title line
            let option = (content_row - slot.top).checked_sub(2).map(usize::from);
            match (InputSurface::for_question(question), option) {
                (InputSurface::RadioGroup(labels), Some(i))
                | (InputSurface::CheckboxGroup(labels), Some(i))
                    if i < labels.len() =>
                {
                    Some(PreviewHit::Option(index, i))
                }
                _ => Some(PreviewHit::Question(index)),
            }
        }
        Section::Buttons => {
            let top = area.y + slot.top - offset;
            let (submit, clear) = button_rects(Rect {
                x: cards.x,
                y: top,
                width: cards.width,
                height: slot.height,
            });
            if contains(submit, column, row) {
                Some(PreviewHit::Submit)
            } else if contains(clear, column, row) {
                Some(PreviewHit::ClearForm)
            } else {
                None
            }
        }
    }
}

fn header_lines(form: &FormSchema) -> Vec<Line<'_>> {
    let title = if form.title.is_empty() {
        "Untitled Form"
    } else {
        form.title.as_str()
    };
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !form.description.is_empty() {
        lines.push(Line::from(form.description.as_str()));
    }
    if form.questions.iter().any(|q| q.required) {
        lines.push(Line::from(Span::styled(
            "* Indicates required question",
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// One row per option, marked selected or not
fn choice_lines<'a>(
    question: &'a Question,
    answers: &RespondentState,
    [on, off]: [&str; 2],
    highlight: impl Fn(usize) -> Style,
) -> Vec<Line<'a>> {
    question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if answers.is_selected(question, &option.id) {
                on
            } else {
                off
            };
            Line::from(Span::styled(format!("{marker} {}", option.text), highlight(i)))
        })
        .collect()
}

fn question_lines<'a>(
    question: &'a Question,
    answers: &'a RespondentState,
    is_current: bool,
) -> Vec<Line<'a>> {
    let mut title = vec![Span::raw(question.title.as_str())];
    if question.required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    let mut lines = vec![Line::from(title)];

    let dim = Style::default().fg(Color::DarkGray);
    let caret = Span::styled(
        if is_current { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );
    let highlight = |i: usize| {
        if is_current && answers.option_cursor == i {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    match InputSurface::for_question(question) {
        InputSurface::TextLine | InputSurface::TextArea => {
            let text = answers.text(question);
            if text.is_empty() {
                lines.push(Line::from(vec![caret, Span::styled("Your answer", dim)]));
            } else {
                let mut rows: Vec<Line> =
                    text.split('\n').map(|l| Line::from(l.to_string())).collect();
                if let Some(last) = rows.last_mut() {
                    last.spans.push(caret);
                }
                lines.extend(rows);
            }
        }
        InputSurface::RadioGroup(_) => {
            lines.extend(choice_lines(question, answers, ["(•)", "( )"], highlight))
        }
        InputSurface::CheckboxGroup(_) => {
            lines.extend(choice_lines(question, answers, ["[x]", "[ ]"], highlight))
        }
        InputSurface::Select { placeholder, .. } => {
            let chosen = answers.selected_labels(question);
            let label = chosen.first().copied().unwrap_or(placeholder);
            let style = if chosen.is_empty() { dim } else { Style::default() };
            lines.push(Line::from(vec![
                Span::styled(format!("▾ {label}"), style),
                Span::styled(if is_current { "   ◀ ▶ to choose" } else { "" }, dim),
            ]));
        }
    }
    lines
}

/// Draw the respondent preview
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.editor.form();
    let answers = &app.state.respondent;
    let cards = card_column(area);

    let slots = slots(form, answers);
    let offset = scroll_offset(&slots, answers.cursor, area.height);

    for slot in &slots {
        if slot.top < offset {
            continue;
        }
        let y = area.y + (slot.top - offset);
        if y >= area.y + area.height {
            break;
        }
        let slot_area = Rect {
            x: cards.x,
            y,
            width: cards.width,
            height: slot.height.min(area.y + area.height - y),
        };

        match slot.section {
            Section::Header => render_card(
                frame,
                slot_area,
                Paragraph::new(header_lines(form)),
                true,
                Some(Color::Magenta),
            ),
            Section::Question(index) => {
                let Some(question) = form.questions.get(index) else {
                    continue;
                };
                let is_current = answers.cursor == PreviewCursor::Question(index);
                render_card(
                    frame,
                    slot_area,
                    Paragraph::new(question_lines(question, answers, is_current)),
                    is_current,
                    None,
                );
            }
            Section::Buttons => {
                let (submit, clear) = button_rects(slot_area);
                render_button(
                    frame,
                    submit,
                    "Submit",
                    answers.cursor == PreviewCursor::Submit,
                    true,
                );
                render_button(
                    frame,
                    clear,
                    "Clear form",
                    answers.cursor == PreviewCursor::ClearForm,
                    true,
                );
            }
        }
    }
}
