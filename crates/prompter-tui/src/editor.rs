/// Multi-line text buffer behind the "edit text" overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditor {
    buffer: String,
    /// Cursor position as a char index into `buffer`
    cursor: usize,
}

impl TextEditor {
    /// Start editing `text` with the cursor at the end
    pub fn new(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn into_text(self) -> String {
        self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.buffer.insert(idx, c);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.buffer.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Cursor as (line, column in chars)
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before: String = self.buffer.chars().take(self.cursor).collect();
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|s| s.chars().count())
            .unwrap_or(0);
        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut editor = TextEditor::new("ab");
        editor.insert_char('c');
        assert_eq!(editor.text(), "abc");
        editor.backspace();
        editor.backspace();
        assert_eq!(editor.text(), "a");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn test_insert_in_the_middle_with_multibyte() {
        let mut editor = TextEditor::new("héllo");
        editor.move_left();
        editor.move_left();
        editor.insert_char('X');
        assert_eq!(editor.text(), "hélXlo");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = TextEditor::new("x");
        editor.move_left();
        editor.move_left();
        editor.backspace();
        assert_eq!(editor.text(), "x");
    }

    #[test]
    fn test_cursor_line_col() {
        let mut editor = TextEditor::new("one\ntwo");
        assert_eq!(editor.cursor_line_col(), (1, 3));
        editor.insert_newline();
        assert_eq!(editor.cursor_line_col(), (2, 0));
    }
}
