//! Input Modes
//!
//! Which surface has the keyboard, plus the line buffer shared by the
//! command line and the search bar.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Table navigation
    Normal,
    /// Command line (:)
    Command,
    /// Search bar has focus
    Search,
    /// Entry add/edit dialog
    Form,
    /// Yes/No(/Cancel) prompt
    Confirm,
    /// About and key bindings
    Help,
}

impl InputMode {
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Command => "COMMAND",
            Self::Search => "SEARCH",
            Self::Form => "FORM",
            Self::Confirm => "CONFIRM",
            Self::Help => "HELP",
        }
    }
}

/// Mode plus the single-line buffer edited in text modes.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct ModeState {
    pub mode: InputMode,
    pub buffer: String,
    pub cursor: usize,
    /// First key of a two-key sequence (gg, dd, yy)
    pub pending: Option<char>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            buffer: String::new(),
            cursor: 0,
            pending: None,
        }
    }
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.buffer.clear();
        self.cursor = 0;
        self.pending = None;
    }

    pub fn to_normal(&mut self) {
        self.set_mode(InputMode::Normal);
    }

    pub fn to_command(&mut self) {
        self.set_mode(InputMode::Command);
    }

    /// Focus the search bar, starting from the criteria already applied.
    pub fn to_search(&mut self, current: &str) {
        self.set_mode(InputMode::Search);
        self.set_buffer(current);
    }

    pub fn to_form(&mut self) {
        self.set_mode(InputMode::Form);
    }

    pub fn to_confirm(&mut self) {
        self.set_mode(InputMode::Confirm);
    }

    pub fn to_help(&mut self) {
        self.set_mode(InputMode::Help);
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    /// Backspace
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn get_buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, content: &str) {
        self.buffer = content.to_string();
        self.cursor = self.char_len();
    }
}
