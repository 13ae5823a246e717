//! Text input value object used by the image editor inputs

/// A single labelled text input
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    value: String,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new empty text field
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            is_multiline,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// True when the value is empty after trimming whitespace
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Newlines are only accepted by multiline fields
    pub fn push_newline(&mut self) {
        if self.is_multiline {
            self.value.push('\n');
        }
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut field = FormField::text("Prompt", true);
        field.push_char('h');
        field.push_char('i');
        assert_eq!(field.as_text(), "hi");
        field.pop_char();
        assert_eq!(field.as_text(), "h");
    }

    #[test]
    fn test_is_blank_trims_whitespace() {
        let mut field = FormField::text("Prompt", true);
        assert!(field.is_blank());
        field.set_text("   \n ");
        assert!(field.is_blank());
        field.set_text(" add a hat ");
        assert!(!field.is_blank());
    }

    #[test]
    fn test_newline_only_in_multiline() {
        let mut single = FormField::text("Path", false);
        single.push_newline();
        assert_eq!(single.as_text(), "");

        let mut multi = FormField::text("Prompt", true);
        multi.push_newline();
        assert_eq!(multi.as_text(), "\n");
    }

    #[test]
    fn test_clear() {
        let mut field = FormField::text("Path", false);
        field.set_text("/tmp/cat.png");
        field.clear();
        assert_eq!(field.as_text(), "");
    }
}
