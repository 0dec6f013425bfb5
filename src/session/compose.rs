//! Input box keyboard handling
//!
//! Enter submits, Shift+Enter starts a new line.

/// Keys the compose box reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter { shift: bool },
    Backspace,
}

/// Multi-line text input for the next user message
#[derive(Debug, Default)]
pub struct ComposeBox {
    input: String,
}

impl ComposeBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Submit is only possible with non-blank input while not loading
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && !self.input.trim().is_empty()
    }

    /// Put back text that could not be submitted, ahead of anything typed since
    pub fn restore(&mut self, text: &str) {
        self.input.insert_str(0, text);
    }

    /// Apply a key press. Returns the text to submit when Enter takes the
    /// input; the box is cleared in that case and only then.
    pub fn handle_key(&mut self, key: Key, loading: bool) -> Option<String> {
        match key {
            Key::Char(c) => self.input.push(c),
            Key::Backspace => {
                self.input.pop();
            }
            Key::Enter { shift: true } => self.input.push('\n'),
            Key::Enter { shift: false } => {
                if self.can_submit(loading) {
                    return Some(std::mem::take(&mut self.input));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> ComposeBox {
        let mut compose = ComposeBox::new();
        for c in text.chars() {
            compose.handle_key(Key::Char(c), false);
        }
        compose
    }

    #[test]
    fn test_enter_submits_and_clears() {
        let mut compose = typed("hello");
        let submitted = compose.handle_key(Key::Enter { shift: false }, false);
        assert_eq!(submitted.as_deref(), Some("hello"));
        assert_eq!(compose.input(), "");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut compose = typed("line one");
        assert_eq!(compose.handle_key(Key::Enter { shift: true }, false), None);
        compose.handle_key(Key::Char('x'), false);
        assert_eq!(compose.input(), "line one\nx");
    }

    #[test]
    fn test_blank_input_kept() {
        let mut compose = typed("  ");
        assert_eq!(compose.handle_key(Key::Enter { shift: false }, false), None);
        assert_eq!(compose.input(), "  ");
    }

    #[test]
    fn test_no_submit_while_loading() {
        let mut compose = typed("wait");
        assert_eq!(compose.handle_key(Key::Enter { shift: false }, true), None);
        assert_eq!(compose.input(), "wait");
    }

    #[test]
    fn test_restore_after_failed_send() {
        let mut compose = typed("draft");
        let taken = compose.handle_key(Key::Enter { shift: false }, false).unwrap();
        compose.restore(&taken);
        assert_eq!(compose.input(), "draft");

        let taken = compose.handle_key(Key::Enter { shift: false }, false).unwrap();
        compose.handle_key(Key::Char('!'), false);
        compose.restore(&taken);
        assert_eq!(compose.input(), "draft!");
    }

    #[test]
    fn test_backspace() {
        let mut compose = typed("ab");
        compose.handle_key(Key::Backspace, false);
        assert_eq!(compose.input(), "a");
        compose.handle_key(Key::Backspace, false);
        compose.handle_key(Key::Backspace, false);
        assert_eq!(compose.input(), "");
    }
}
