//! Keymap
//!
//! Vim-style key bindings mapped to actions.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::gate::ActionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,

    /// One of the gated main-window actions
    Trigger(ActionKind),
    OpenFile(PathBuf),
    SaveFileAs(PathBuf),

    EnterCommand,
    ExecuteCommand(String),

    // Prompt answers
    Confirm,
    Deny,
    Cancel,

    ClearMessage,
    Invalid(String),

    // Text input
    InsertChar(char),
    DeleteChar,
    DeleteCharForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearLine,
    Submit,

    None,
}

/// Map key event to action in normal mode
pub fn normal_mode_action(key: KeyEvent, pending: Option<char>) -> (Action, Option<char>) {
    use ActionKind::*;

    let trigger = |kind| (Action::Trigger(kind), None);

    match (key.code, key.modifiers, pending) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL, _) => trigger(Exit),
        (KeyCode::Char('n'), KeyModifiers::CONTROL, _) => trigger(NewFile),
        (KeyCode::Char('o'), KeyModifiers::CONTROL, _) => trigger(OpenFile),
        (KeyCode::Char('s'), KeyModifiers::CONTROL, _) => trigger(SaveFile),
        (KeyCode::Char('f'), KeyModifiers::CONTROL, _) => trigger(FindEntry),
        (KeyCode::Char('d'), KeyModifiers::CONTROL, _) => (Action::HalfPageDown, None),
        (KeyCode::Char('u'), KeyModifiers::CONTROL, _) => (Action::HalfPageUp, None),
        (KeyCode::Char('l'), KeyModifiers::CONTROL, _) => (Action::ClearMessage, None),

        // Navigation
        (KeyCode::Char('j') | KeyCode::Down, _, _) => (Action::MoveDown, None),
        (KeyCode::Char('k') | KeyCode::Up, _, _) => (Action::MoveUp, None),
        (KeyCode::Char('g'), _, None) => (Action::None, Some('g')),
        (KeyCode::Char('g'), _, Some('g')) => (Action::MoveToTop, None),
        (KeyCode::Char('G') | KeyCode::End, _, _) => (Action::MoveToBottom, None),
        (KeyCode::Home, _, _) => (Action::MoveToTop, None),
        (KeyCode::PageDown, _, _) => (Action::PageDown, None),
        (KeyCode::PageUp, _, _) => (Action::PageUp, None),

        // Entries
        (KeyCode::Char('a') | KeyCode::Insert, _, _) => trigger(AddEntry),
        (KeyCode::Char('e') | KeyCode::Enter, _, _) => trigger(EditEntry),
        (KeyCode::Char('D'), _, _) => trigger(DuplicateEntry),
        (KeyCode::Char('d'), _, None) => (Action::None, Some('d')),
        (KeyCode::Char('d'), _, Some('d')) => trigger(DeleteEntry),
        (KeyCode::Char('x') | KeyCode::Delete, _, _) => trigger(DeleteEntry),

        // Clipboard
        (KeyCode::Char('y'), _, None) => (Action::None, Some('y')),
        (KeyCode::Char('y'), _, Some('y')) => trigger(CopyPassword),
        (KeyCode::Char('u'), _, _) => trigger(CopyUser),
        (KeyCode::Char('w'), _, _) => trigger(CopyUrl),
        (KeyCode::Char('C'), _, _) => trigger(ClearClipboard),

        (KeyCode::Char(' ') | KeyCode::Char('s'), _, _) => trigger(ToggleMask),
        (KeyCode::Char('/'), _, _) => trigger(FindEntry),
        (KeyCode::Char(':'), _, _) => (Action::EnterCommand, None),
        (KeyCode::Char('?') | KeyCode::F(1), _, _) => trigger(About),
        (KeyCode::Char('q'), _, _) => trigger(Exit),

        _ => (Action::None, None),
    }
}

/// Map key event to action in text input modes
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Delete, _) => Action::DeleteCharForward,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearLine,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Map key event to action in confirm mode
pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') => Action::Deny,
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

/// Parse command line text into an action
pub fn parse_command(cmd: &str) -> Action {
    let cmd = cmd.trim();
    let (command, args) = match cmd.split_once(' ') {
        Some((c, a)) => (c, Some(a.trim()).filter(|a| !a.is_empty())),
        None => (cmd, None),
    };

    match (command, args) {
        ("", _) => Action::None,
        ("new", _) => Action::Trigger(ActionKind::NewFile),
        ("o" | "open" | "e" | "edit", Some(path)) => Action::OpenFile(PathBuf::from(path)),
        ("o" | "open" | "e" | "edit", None) => Action::Trigger(ActionKind::OpenFile),
        ("w" | "write", None) => Action::Trigger(ActionKind::SaveFile),
        ("w" | "write" | "saveas", Some(path)) => Action::SaveFileAs(PathBuf::from(path)),
        ("saveas", None) => Action::Trigger(ActionKind::SaveAsFile),
        ("add", _) => Action::Trigger(ActionKind::AddEntry),
        ("dup" | "duplicate", _) => Action::Trigger(ActionKind::DuplicateEntry),
        ("del" | "delete", _) => Action::Trigger(ActionKind::DeleteEntry),
        ("find", _) => Action::Trigger(ActionKind::FindEntry),
        ("clip" | "clearclip", _) => Action::Trigger(ActionKind::ClearClipboard),
        ("cls" | "clear", _) => Action::ClearMessage,
        ("about" | "help" | "h", _) => Action::Trigger(ActionKind::About),
        ("q" | "quit", _) => Action::Trigger(ActionKind::Exit),
        _ => Action::Invalid(cmd.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_normal_navigation() {
        assert_eq!(normal_mode_action(key(KeyCode::Char('j')), None).0, Action::MoveDown);
        assert_eq!(normal_mode_action(key(KeyCode::Char('k')), None).0, Action::MoveUp);
        assert_eq!(normal_mode_action(key(KeyCode::Char('G')), None).0, Action::MoveToBottom);
        assert_eq!(normal_mode_action(key_ctrl(KeyCode::Char('d')), None).0, Action::HalfPageDown);
    }

    #[test]
    fn test_gg_sequence() {
        let (action1, pending1) = normal_mode_action(key(KeyCode::Char('g')), None);
        assert_eq!(action1, Action::None);
        assert_eq!(pending1, Some('g'));

        let (action2, pending2) = normal_mode_action(key(KeyCode::Char('g')), pending1);
        assert_eq!(action2, Action::MoveToTop);
        assert_eq!(pending2, None);
    }

    #[test]
    fn test_dd_and_yy_sequences() {
        let (_, pending) = normal_mode_action(key(KeyCode::Char('d')), None);
        assert_eq!(pending, Some('d'));
        let (action, _) = normal_mode_action(key(KeyCode::Char('d')), pending);
        assert_eq!(action, Action::Trigger(ActionKind::DeleteEntry));

        let (_, pending) = normal_mode_action(key(KeyCode::Char('y')), None);
        let (action, _) = normal_mode_action(key(KeyCode::Char('y')), pending);
        assert_eq!(action, Action::Trigger(ActionKind::CopyPassword));
    }

    #[test]
    fn test_entry_and_file_bindings() {
        let action = |k| normal_mode_action(k, None).0;
        assert_eq!(action(key(KeyCode::Char('a'))), Action::Trigger(ActionKind::AddEntry));
        assert_eq!(action(key(KeyCode::Enter)), Action::Trigger(ActionKind::EditEntry));
        assert_eq!(action(key(KeyCode::Char('D'))), Action::Trigger(ActionKind::DuplicateEntry));
        assert_eq!(action(key(KeyCode::Char(' '))), Action::Trigger(ActionKind::ToggleMask));
        assert_eq!(action(key(KeyCode::Char('/'))), Action::Trigger(ActionKind::FindEntry));
        assert_eq!(action(key_ctrl(KeyCode::Char('s'))), Action::Trigger(ActionKind::SaveFile));
        assert_eq!(action(key_ctrl(KeyCode::Char('u'))), Action::HalfPageUp);
        assert_eq!(action(key(KeyCode::Char('u'))), Action::Trigger(ActionKind::CopyUser));
        assert_eq!(action(key(KeyCode::Char('q'))), Action::Trigger(ActionKind::Exit));
    }

    #[test]
    fn test_text_input() {
        assert_eq!(text_input_action(key(KeyCode::Char('a'))), Action::InsertChar('a'));
        assert_eq!(text_input_action(key(KeyCode::Backspace)), Action::DeleteChar);
        assert_eq!(text_input_action(key(KeyCode::Enter)), Action::Submit);
        assert_eq!(text_input_action(key(KeyCode::Esc)), Action::Cancel);
        assert_eq!(text_input_action(key_ctrl(KeyCode::Char('a'))), Action::CursorHome);
        assert_eq!(text_input_action(key_ctrl(KeyCode::Char('u'))), Action::ClearLine);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("q"), Action::Trigger(ActionKind::Exit));
        assert_eq!(parse_command("w"), Action::Trigger(ActionKind::SaveFile));
        assert_eq!(parse_command("w  backup.json "), Action::SaveFileAs(PathBuf::from("backup.json")));
        assert_eq!(parse_command("open /tmp/a b.json"), Action::OpenFile(PathBuf::from("/tmp/a b.json")));
        assert_eq!(parse_command("open"), Action::Trigger(ActionKind::OpenFile));
        assert_eq!(parse_command("saveas"), Action::Trigger(ActionKind::SaveAsFile));
        assert_eq!(parse_command("new"), Action::Trigger(ActionKind::NewFile));
        assert_eq!(parse_command(""), Action::None);
        assert_eq!(parse_command("frobnicate"), Action::Invalid("frobnicate".into()));
    }

    #[test]
    fn test_confirm_action() {
        assert_eq!(confirm_action(key(KeyCode::Char('y'))), Action::Confirm);
        assert_eq!(confirm_action(key(KeyCode::Enter)), Action::Confirm);
        assert_eq!(confirm_action(key(KeyCode::Char('n'))), Action::Deny);
        assert_eq!(confirm_action(key(KeyCode::Esc)), Action::Cancel);
        assert_eq!(confirm_action(key(KeyCode::Char('x'))), Action::None);
    }
}
