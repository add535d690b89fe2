/// Starting draft shown in a fresh session.
pub const DEFAULT_SNIPPET: &str = "def factorial(n):\n    # write your code here\n    pass";

/// Spaces inserted by the Tab key.
pub const TAB_WIDTH: usize = 4;

/// Editor draft with a caret and an optional selection.
///
/// Positions are character offsets into the text, so a caret never lands
/// inside a multi-byte character. The selection is the range between
/// `anchor` and `caret`, in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    caret: usize,
    anchor: Option<usize>,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SNIPPET)
    }
}

impl EditorBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            caret: 0,
            anchor: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replace the whole draft; caret goes to the start, selection is dropped.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = 0;
        self.anchor = None;
    }

    /// Ordered `(start, end)` of the selection, `None` when it is empty.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// Place the caret at `caret` with the selection anchored at `anchor`.
    /// Both are clamped to the text length.
    pub fn set_selection(&mut self, anchor: usize, caret: usize) {
        let len = self.char_len();
        self.anchor = Some(anchor.min(len));
        self.caret = caret.min(len);
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.char_len();
    }

    /// Tab key: four spaces replace the selection (or go in at the caret),
    /// and the caret ends right after them.
    pub fn insert_tab(&mut self) {
        self.insert_str(&" ".repeat(TAB_WIDTH));
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    pub fn insert_str(&mut self, s: &str) {
        let start = self.delete_selection().unwrap_or(self.caret);
        let at = self.byte_index(start);
        self.text.insert_str(at, s);
        self.caret = start + s.chars().count();
        self.anchor = None;
    }

    pub fn backspace(&mut self) {
        if self.delete_selection().is_some() || self.caret == 0 {
            return;
        }
        let at = self.byte_index(self.caret - 1);
        self.text.remove(at);
        self.caret -= 1;
    }

    pub fn delete(&mut self) {
        if self.delete_selection().is_some() || self.caret >= self.char_len() {
            return;
        }
        let at = self.byte_index(self.caret);
        self.text.remove(at);
    }

    pub fn move_left(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.caret = (self.caret + 1).min(self.char_len());
    }

    pub fn move_up(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (row, col) = self.line_col();
        if row == 0 {
            self.caret = 0;
        } else {
            self.caret = self.offset_of(row - 1, col);
        }
    }

    pub fn move_down(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (row, col) = self.line_col();
        if row + 1 >= self.line_count() {
            self.caret = self.char_len();
        } else {
            self.caret = self.offset_of(row + 1, col);
        }
    }

    pub fn move_home(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (row, _) = self.line_col();
        self.caret = self.offset_of(row, 0);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (row, _) = self.line_col();
        self.caret = self.offset_of(row, usize::MAX);
    }

    /// Zero-based `(line, column)` of the caret, column in characters.
    pub fn line_col(&self) -> (usize, usize) {
        let mut row = 0;
        let mut col = 0;
        for ch in self.text.chars().take(self.caret) {
            if ch == '\n' {
                row += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (row, col)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Character offset of `col` on line `row`, clamped to the line end.
    fn offset_of(&self, row: usize, col: usize) -> usize {
        let mut offset = 0;
        for (i, line) in self.text.split('\n').enumerate() {
            let len = line.chars().count();
            if i == row {
                return offset + col.min(len);
            }
            offset += len + 1;
        }
        self.char_len()
    }

    fn begin_motion(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else {
            self.anchor = None;
        }
    }

    /// Remove the selected range, returning where it started.
    fn delete_selection(&mut self) -> Option<usize> {
        let (start, end) = self.selection()?;
        let from = self.byte_index(start);
        let to = self.byte_index(end);
        self.text.replace_range(from..to, "");
        self.caret = start;
        self.anchor = None;
        Some(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_snippet() {
        let buffer = EditorBuffer::default();
        assert_eq!(
            buffer.text(),
            "def factorial(n):\n    # write your code here\n    pass"
        );
        assert_eq!(buffer.caret(), 0);
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn tab_inserts_four_spaces_at_caret() {
        let mut buffer = EditorBuffer::new("ab");
        buffer.set_caret(1);
        buffer.insert_tab();
        assert_eq!(buffer.text(), "a    b");
        assert_eq!(buffer.caret(), 5);
    }

    #[test]
    fn tab_replaces_selection() {
        let mut buffer = EditorBuffer::new("return n");
        buffer.set_selection(0, 6);
        buffer.insert_tab();
        assert_eq!(buffer.text(), "     n");
        assert_eq!(buffer.caret(), 4);
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn tab_replaces_backwards_selection() {
        let mut buffer = EditorBuffer::new("abcdef");
        buffer.set_selection(5, 2);
        buffer.insert_tab();
        assert_eq!(buffer.text(), "ab    f");
        assert_eq!(buffer.caret(), 6);
    }

    #[test]
    fn tab_respects_multibyte_text() {
        let mut buffer = EditorBuffer::new("é!");
        buffer.set_caret(1);
        buffer.insert_tab();
        assert_eq!(buffer.text(), "é    !");
        assert_eq!(buffer.caret(), 5);
    }

    #[test]
    fn backspace_and_delete_edit_around_caret() {
        let mut buffer = EditorBuffer::new("abc");
        buffer.set_caret(2);
        buffer.backspace();
        assert_eq!(buffer.text(), "ac");
        assert_eq!(buffer.caret(), 1);
        buffer.delete();
        assert_eq!(buffer.text(), "a");
        buffer.delete();
        assert_eq!(buffer.text(), "a");
        buffer.set_caret(0);
        buffer.backspace();
        assert_eq!(buffer.text(), "a");
    }

    #[test]
    fn vertical_motion_clamps_column() {
        let mut buffer = EditorBuffer::new("long line\nab\nlonger line");
        buffer.set_caret(7);
        buffer.move_down(false);
        assert_eq!(buffer.line_col(), (1, 2));
        buffer.move_down(false);
        assert_eq!(buffer.line_col(), (2, 2));
        buffer.move_up(false);
        buffer.move_up(false);
        assert_eq!(buffer.line_col(), (0, 2));
        buffer.move_up(false);
        assert_eq!(buffer.caret(), 0);
    }

    #[test]
    fn shift_motion_extends_selection() {
        let mut buffer = EditorBuffer::new("pass");
        buffer.move_end(true);
        assert_eq!(buffer.selection(), Some((0, 4)));
        buffer.insert_str("return 1");
        assert_eq!(buffer.text(), "return 1");
        buffer.move_left(false);
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn home_and_end_stay_on_line() {
        let mut buffer = EditorBuffer::new("def f():\n    pass");
        buffer.set_caret(12);
        buffer.move_home(false);
        assert_eq!(buffer.caret(), 9);
        buffer.move_end(false);
        assert_eq!(buffer.caret(), 17);
    }
}
