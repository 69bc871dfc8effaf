//! Editable text surfaces.
//!
//! A trigger or search field does not need to be a particular widget: any
//! type implementing [`TextSurface`] can receive the picker's text and
//! forward its edits. [`SearchBox`] is the built-in single-line editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Capability contract for an editable single-line text field.
pub trait TextSurface {
    /// Current text.
    fn text(&self) -> &str;

    /// Replace the text (cursor moves to the end).
    fn set_text(&mut self, text: &str);

    /// Apply an editing key. Returns true if the text changed.
    ///
    /// Keys that are not edits are left for the caller.
    fn apply_edit(&mut self, key: KeyEvent) -> bool;
}

/// Single-line editor with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    text: String,
    /// Cursor position in characters, `0..=char_count`.
    cursor: usize,
}

impl SearchBox {
    /// Empty box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Insert at the cursor and advance it.
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns false at position 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor. Returns false at the end.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        true
    }

    /// Saturates at 0.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Saturates at the text length.
    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Move the cursor to the start.
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn cursor_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Empty the box.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Text split at the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_offset(self.cursor))
    }
}

impl TextSurface for SearchBox {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.cursor = self.char_count();
        }
    }

    fn apply_edit(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(ch);
                true
            }
            KeyCode::Char('u') => {
                let changed = !self.text.is_empty();
                self.clear();
                changed
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.cursor_left();
                false
            }
            KeyCode::Right => {
                self.cursor_right();
                false
            }
            KeyCode::Home => {
                self.cursor_home();
                false
            }
            KeyCode::End => {
                self.cursor_end();
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(text: &str) -> SearchBox {
        let mut b = SearchBox::new();
        for ch in text.chars() {
            b.insert_char(ch);
        }
        b
    }

    #[test]
    fn insert_advances_cursor() {
        let b = typed("jp");
        assert_eq!(b.text(), "jp");
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn insert_in_middle() {
        let mut b = typed("jn");
        b.cursor_left();
        b.insert_char('p');
        assert_eq!(b.text(), "jpn");
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut b = typed("a");
        b.cursor_home();
        assert!(!b.backspace());
        assert_eq!(b.text(), "a");
    }

    #[test]
    fn backspace_handles_multibyte_characters() {
        let mut b = typed("台灣");
        assert!(b.backspace());
        assert_eq!(b.text(), "台");
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut b = typed("abc");
        b.cursor_home();
        assert!(b.delete());
        assert_eq!(b.text(), "bc");
        b.cursor_end();
        assert!(!b.delete());
    }

    #[test]
    fn cursor_movement_saturates() {
        let mut b = typed("ab");
        b.cursor_right();
        assert_eq!(b.cursor(), 2);
        b.cursor_home();
        b.cursor_left();
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut b = SearchBox::new();
        b.set_text("+886");
        assert_eq!(b.cursor(), 4);
        assert_eq!(b.split_at_cursor(), ("+886", ""));
    }

    #[test]
    fn apply_edit_reports_text_changes_only() {
        let mut b = SearchBox::new();
        assert!(b.apply_edit(key(KeyCode::Char('f'))));
        assert!(!b.apply_edit(key(KeyCode::Left)));
        assert!(!b.apply_edit(key(KeyCode::Enter)));
        assert!(b.apply_edit(key(KeyCode::Delete)));
        assert_eq!(b.text(), "");
    }

    #[test]
    fn ctrl_u_clears_line() {
        let mut b = typed("france");
        assert!(b.apply_edit(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert_eq!(b.text(), "");
    }
}
