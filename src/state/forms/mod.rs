//! Form domain layer
//!
//! The form schema being built, the editor that owns it together with the
//! focused question, and the builder's keyboard cursor.

mod cursor;
mod editor;
mod field;
mod schema;

pub use cursor::{BuilderCursor, QuestionElement};
pub use editor::FormEditor;
pub use field::FormField;
pub use schema::{FormSchema, Question, QuestionOption, QuestionType, QuestionUpdate};
