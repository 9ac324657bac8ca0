use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::keymap::{confirm_action, normal_mode_action, text_input_action, Action};
use crate::input::modes::InputMode;
use crate::ui::components::EntryForm;

use super::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = match self.mode_state.mode {
            InputMode::Normal => self.resolve_normal_action(key),
            InputMode::Command => self.resolve_command_action(key),
            InputMode::Search => self.resolve_search_action(key),
            InputMode::Form => self.resolve_form_action(key),
            InputMode::Confirm => confirm_action(key),
            InputMode::Help => help_action(self, key),
        };
        self.execute_action(action);
    }

    fn resolve_normal_action(&mut self, key: KeyEvent) -> Action {
        let (action, pending) = normal_mode_action(key, self.mode_state.pending);
        self.mode_state.pending = pending;
        action
    }

    fn resolve_command_action(&mut self, key: KeyEvent) -> Action {
        match self.edit_buffer(text_input_action(key)) {
            Action::Submit => {
                let buffer = self.mode_state.get_buffer().to_string();
                self.mode_state.to_normal();
                Action::ExecuteCommand(buffer)
            }
            Action::Cancel => {
                self.mode_state.to_normal();
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Live filtering: every edit of the buffer re-runs the search.
    fn resolve_search_action(&mut self, key: KeyEvent) -> Action {
        if !self.gate.is_search_enabled() {
            self.mode_state.to_normal();
            return Action::None;
        }

        let before = self.mode_state.get_buffer().to_string();
        match self.edit_buffer(text_input_action(key)) {
            Action::Submit => self.mode_state.to_normal(),
            Action::Cancel => {
                self.mode_state.to_normal();
                self.apply_search("");
            }
            _ => {
                if self.mode_state.get_buffer() != before {
                    let text = self.mode_state.get_buffer().to_string();
                    self.apply_search(&text);
                }
            }
        }
        Action::None
    }

    fn apply_search(&mut self, text: &str) {
        self.table.set_search(text);
        self.table.refresh_keep_selection(self.model.entries());
    }

    /// Apply buffer edits; hands back whatever is not an edit.
    fn edit_buffer(&mut self, action: Action) -> Action {
        let state = &mut self.mode_state;
        match action {
            Action::InsertChar(c) => state.insert_char(c),
            Action::DeleteChar => state.delete_char(),
            Action::DeleteCharForward => state.delete_char_forward(),
            Action::CursorLeft => state.cursor_left(),
            Action::CursorRight => state.cursor_right(),
            Action::CursorHome => state.cursor_home(),
            Action::CursorEnd => state.cursor_end(),
            Action::ClearLine => state.clear_buffer(),
            other => return other,
        }
        Action::None
    }

    fn resolve_form_action(&mut self, key: KeyEvent) -> Action {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.cancel_form(),
            (KeyCode::Enter, KeyModifiers::NONE) => self.submit_form(),
            _ => {
                if let Some(form) = self.entry_form.as_mut() {
                    dispatch_form_key(form, key.code, key.modifiers);
                }
            }
        }
        Action::None
    }
}

fn dispatch_form_key(form: &mut EntryForm, code: KeyCode, mods: KeyModifiers) {
    match (code, mods) {
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => form.next_field(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => form.prev_field(),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => form.toggle_password_visibility(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => form.insert_char(c),
        (KeyCode::Backspace, _) => form.delete_char(),
        (KeyCode::Left, _) => form.cursor_left(),
        (KeyCode::Right, _) => form.cursor_right(),
        _ => {}
    }
}

fn help_action(app: &mut App, key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('?'), KeyModifiers::NONE | KeyModifiers::SHIFT)
        | (KeyCode::Char('q'), KeyModifiers::NONE)
        | (KeyCode::Esc, _)
        | (KeyCode::Enter, _) => app.mode_state.to_normal(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::AppConfig;
    use crate::vault::Entry;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_keys(app: &mut App, text: &str) {
        text.chars().for_each(|c| app.handle_key_event(key(KeyCode::Char(c))));
    }

    fn app_with(titles: &[&str]) -> App {
        let mut app = App::new(AppConfig::default());
        for title in titles {
            app.model.add(Entry::new(*title, "", "", ""));
        }
        app.refresh_all(None);
        app
    }

    #[test]
    fn test_search_filters_while_typing() {
        let mut app = app_with(&["Bank", "Mail", "Mailbox"]);
        app.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(app.mode_state.mode, InputMode::Search);

        type_keys(&mut app, "mai");
        assert_eq!(app.table.search(), "mai");
        assert_eq!(app.table.table().row_count(), 2);

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.mode_state.mode, InputMode::Normal);
        assert_eq!(app.table.search(), "mai");
    }

    #[test]
    fn test_search_escape_clears() {
        let mut app = app_with(&["Bank", "Mail"]);
        app.handle_key_event(key(KeyCode::Char('/')));
        type_keys(&mut app, "zzz");
        assert_eq!(app.table.table().row_count(), 0);

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.table.search(), "");
        assert_eq!(app.table.table().row_count(), 2);
        assert_eq!(app.table.status(), "Entries count: 2");
    }

    #[test]
    fn test_command_line_runs_on_enter() {
        let mut app = app_with(&[]);
        app.handle_key_event(key(KeyCode::Char(':')));
        type_keys(&mut app, "bogus");
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.mode_state.mode, InputMode::Normal);
        assert!(app.message.as_ref().is_some_and(|(m, _, _)| m.contains("bogus")));

        app.handle_key_event(key(KeyCode::Char(':')));
        type_keys(&mut app, "q");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn test_form_keys() {
        let mut app = app_with(&[]);
        app.handle_key_event(key(KeyCode::Char('a')));
        assert_eq!(app.mode_state.mode, InputMode::Form);

        type_keys(&mut app, "Bank");
        app.handle_key_event(key(KeyCode::Tab));
        type_keys(&mut app, "q");
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.mode_state.mode, InputMode::Normal);
        assert!(!app.should_quit);
        assert_eq!(app.model.entries()[0].title, "Bank");
        assert_eq!(app.model.entries()[0].url, "q");
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app_with(&[]);
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        app.handle_key_event(release);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_closes() {
        let mut app = app_with(&[]);
        app.handle_key_event(key(KeyCode::Char('?')));
        assert_eq!(app.mode_state.mode, InputMode::Help);
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.mode_state.mode, InputMode::Normal);
    }
}
