//! State for the message compose field.

/// Maximum allowed message length in characters.
const MAX_COMPOSE_LENGTH: usize = 4096;

/// Text being composed plus a character-indexed cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeState {
    text: String,
    cursor_position: usize,
}

impl ComposeState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts a character at the cursor. Returns false once the compose
    /// limit is reached.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_COMPOSE_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = ComposeState::default();

        assert!(state.is_empty());
        assert_eq!(state.text(), "");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn insert_char_appends_and_moves_cursor() {
        let mut state = ComposeState::default();
        state.insert_char('H');
        state.insert_char('i');

        assert_eq!(state.text(), "Hi");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn insert_char_at_middle_position() {
        let mut state = ComposeState::default();
        state.insert_char('H');
        state.insert_char('o');
        state.move_cursor_left();
        state.insert_char('i');

        assert_eq!(state.text(), "Hio");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn delete_char_before_removes_previous_char() {
        let mut state = ComposeState::default();
        state.insert_char('H');
        state.insert_char('i');
        state.delete_char_before();

        assert_eq!(state.text(), "H");
        assert_eq!(state.cursor_position(), 1);
    }

    #[test]
    fn delete_char_before_at_start_does_nothing() {
        let mut state = ComposeState::default();
        state.insert_char('H');
        state.move_cursor_home();
        state.delete_char_before();

        assert_eq!(state.text(), "H");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn delete_char_at_removes_current_char() {
        let mut state = ComposeState::default();
        state.insert_char('H');
        state.insert_char('i');
        state.move_cursor_home();
        state.delete_char_at();

        assert_eq!(state.text(), "i");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn cursor_movement_is_clamped_to_text() {
        let mut state = ComposeState::default();
        state.insert_char('a');
        state.insert_char('b');

        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        assert_eq!(state.cursor_position(), 0);

        state.move_cursor_end();
        state.move_cursor_right();
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn clear_resets_state() {
        let mut state = ComposeState::default();
        state.insert_char('H');
        state.insert_char('i');

        state.clear();

        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut state = ComposeState::default();
        for ch in "Привет".chars() {
            state.insert_char(ch);
        }

        assert_eq!(state.text(), "Привет");
        assert_eq!(state.cursor_position(), 6);

        state.delete_char_before();
        assert_eq!(state.text(), "Приве");

        state.move_cursor_home();
        state.delete_char_at();
        assert_eq!(state.text(), "риве");
    }

    #[test]
    fn insert_char_respects_max_length_limit() {
        let mut state = ComposeState::default();
        for _ in 0..MAX_COMPOSE_LENGTH {
            assert!(state.insert_char('x'));
        }

        assert!(!state.insert_char('y'));
        assert_eq!(state.text().chars().count(), MAX_COMPOSE_LENGTH);
    }
}
