use std::path::PathBuf;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::input::keymap::{parse_command, Action};
use crate::table::{EditOutcome, FieldKind, SelectTarget};
use crate::ui::components::{EntryForm, MessageType};
use crate::ui::Renderer;
use crate::vault::Entry;

use super::background::{FileJob, Followup};
use super::clipboard;
use super::config::PendingAction;
use super::gate::ActionKind;
use super::App;

impl App {
    pub fn execute_action(&mut self, action: Action) {
        match action {
            // the table is frozen while a file job runs
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveToTop
            | Action::MoveToBottom
            | Action::PageUp
            | Action::PageDown
            | Action::HalfPageUp
            | Action::HalfPageDown
                if self.is_processing() =>
            {
                debug!("navigation ignored while processing");
            }
            Action::MoveUp => self.table.table_mut().move_up(),
            Action::MoveDown => self.table.table_mut().move_down(),
            Action::MoveToTop => self.table.table_mut().move_to_top(),
            Action::MoveToBottom => self.table.table_mut().move_to_bottom(),
            Action::PageUp => self.page_move(|t, h| t.page_up(h.saturating_sub(1))),
            Action::PageDown => self.page_move(|t, h| t.page_down(h.saturating_sub(1))),
            Action::HalfPageUp => self.page_move(|t, h| t.page_up(h / 2)),
            Action::HalfPageDown => self.page_move(|t, h| t.page_down(h / 2)),

            Action::Trigger(kind) => self.trigger(kind),
            Action::OpenFile(path) => self.when_enabled(ActionKind::OpenFile, |app| app.open_checked(path)),
            Action::SaveFileAs(path) => self.when_enabled(ActionKind::SaveAsFile, |app| {
                app.save_to(path, Followup::Nothing);
            }),

            Action::EnterCommand => self.mode_state.to_command(),
            Action::ExecuteCommand(cmd) => self.execute_action(parse_command(&cmd)),

            Action::Confirm => self.answer_pending(Answer::Yes),
            Action::Deny => self.answer_pending(Answer::No),
            Action::Cancel => self.answer_pending(Answer::Cancel),

            Action::ClearMessage => self.message = None,
            Action::Invalid(cmd) => self.set_message(&format!("Unknown command: {cmd}"), MessageType::Error),

            _ => {}
        }
    }

    fn page_move(&mut self, f: impl FnOnce(&mut crate::table::EntryRowTable, usize)) {
        let page = Renderer::table_page_height(self.terminal_size).max(1);
        f(self.table.table_mut(), page);
    }

    fn when_enabled(&mut self, kind: ActionKind, f: impl FnOnce(&mut Self)) {
        if self.gate.is_action_enabled(kind) {
            f(self);
        } else {
            debug!(action = kind.label(), "action disabled");
            self.set_message(&format!("{} is unavailable right now", kind.label()), MessageType::Warning);
        }
    }

    pub fn trigger(&mut self, kind: ActionKind) {
        // Exit clears the clipboard before it checks for running work.
        if kind == ActionKind::Exit {
            self.request_exit();
            return;
        }

        self.when_enabled(kind, |app| match kind {
            ActionKind::NewFile => app.new_file(),
            ActionKind::OpenFile => app.prompt_command("open "),
            ActionKind::SaveFile => app.save(),
            ActionKind::SaveAsFile => app.prompt_command("saveas "),
            ActionKind::AddEntry => app.add_entry(),
            ActionKind::EditEntry => app.edit_entry(),
            ActionKind::DuplicateEntry => app.duplicate_entry(),
            ActionKind::DeleteEntry => app.initiate_delete(),
            ActionKind::CopyUrl => app.copy_field(FieldKind::Url),
            ActionKind::CopyUser => app.copy_field(FieldKind::User),
            ActionKind::CopyPassword => app.copy_field(FieldKind::Password),
            ActionKind::ClearClipboard => app.clear_clipboard(),
            ActionKind::FindEntry => app.focus_search(),
            ActionKind::ToggleMask => app.toggle_mask(),
            ActionKind::About => app.mode_state.to_help(),
            ActionKind::Exit => {}
        });
    }

    fn prompt_command(&mut self, prefix: &str) {
        self.mode_state.to_command();
        self.mode_state.set_buffer(prefix);
    }

    fn selected_entry(&self) -> Option<&Entry> {
        let id = self.table.table().selected_entry_id()?;
        self.model.find(id)
    }

    fn new_file(&mut self) {
        if self.model.is_modified() {
            self.ask(PendingAction::NewFileUnsaved);
        } else {
            self.reset_to_new_file();
        }
    }

    fn open_checked(&mut self, path: PathBuf) {
        if self.model.is_modified() {
            self.ask(PendingAction::OpenUnsaved(path));
        } else {
            self.open_file(path);
        }
    }

    fn save(&mut self) {
        match self.model.file_name().map(PathBuf::from) {
            Some(path) => {
                self.save_to(path, Followup::Nothing);
            }
            None => self.prompt_command("saveas "),
        }
    }

    /// Save in the background, then run `then` if the save succeeds.
    fn save_to(&mut self, path: PathBuf, then: Followup) -> bool {
        let entries = self.model.entries().to_vec();
        let started = self.dispatch_job(FileJob::Save { path, entries }, then);
        if !started {
            self.set_message("Another file operation is in progress", MessageType::Warning);
        }
        started
    }

    fn save_then(&mut self, then: Followup) {
        match self.model.file_name().map(PathBuf::from) {
            Some(path) => {
                self.save_to(path, then);
            }
            None => self.set_message("No file name yet, use :saveas <file> first", MessageType::Warning),
        }
    }

    fn add_entry(&mut self) {
        self.entry_form = Some(EntryForm::new());
        self.mode_state.to_form();
    }

    fn edit_entry(&mut self) {
        let Some(entry) = self.selected_entry() else { return };
        self.entry_form = Some(EntryForm::for_edit(entry));
        self.mode_state.to_form();
    }

    /// Store the open form. Keeps the form open and reports when invalid.
    pub fn submit_form(&mut self) {
        let Some(form) = self.entry_form.as_ref() else { return };
        let checked = form.validate().map(|()| (form.editing_id, form.to_entry()));
        let (editing, entry) = match checked {
            Ok(parts) => parts,
            Err(e) => {
                self.set_message(&e, MessageType::Error);
                return;
            }
        };

        let result = match editing {
            Some(id) => self.update_entry(id),
            None => Ok(self.model.add(entry)),
        };

        match result {
            Ok(id) => {
                self.entry_form = None;
                self.mode_state.to_normal();
                self.refresh_all(Some(SelectTarget::Entry(id)));
                self.set_message("Entry saved", MessageType::Success);
            }
            Err(e) => self.set_message(&e.to_string(), MessageType::Error),
        }
    }

    fn update_entry(&mut self, id: Uuid) -> crate::vault::VaultResult<Uuid> {
        let mut entry = self.model.find(id).cloned().ok_or(crate::vault::VaultError::NotFound)?;
        if let Some(form) = self.entry_form.as_ref() {
            form.apply_to(&mut entry);
        }
        self.model.replace(entry)?;
        Ok(id)
    }

    pub fn cancel_form(&mut self) {
        self.entry_form = None;
        self.mode_state.to_normal();
    }

    fn duplicate_entry(&mut self) {
        let Some(id) = self.table.table().selected_entry_id() else { return };
        match self.model.duplicate(id) {
            Ok(copy) => {
                self.refresh_all(Some(SelectTarget::Entry(copy)));
                self.set_message("Entry duplicated", MessageType::Success);
            }
            Err(e) => self.set_message(&e.to_string(), MessageType::Error),
        }
    }

    fn initiate_delete(&mut self) {
        let Some(id) = self.table.table().selected_entry_id() else { return };
        self.ask(PendingAction::DeleteEntry(id));
    }

    fn delete_entry(&mut self, id: Uuid) {
        let row = self.table.table().selected();
        match self.model.remove(id) {
            Ok(_) => {
                self.refresh_all(None);
                let last = self.table.table().row_count().checked_sub(1);
                let next = row.zip(last).map(|(r, l)| r.min(l));
                self.table.table_mut().select(next);
                self.set_message("Entry deleted", MessageType::Success);
            }
            Err(e) => self.set_message(&e.to_string(), MessageType::Error),
        }
    }

    fn copy_field(&mut self, kind: FieldKind) {
        let Some(entry) = self.selected_entry() else { return };
        let value = match kind {
            FieldKind::Url => &entry.url,
            FieldKind::User => &entry.user,
            _ => &entry.password,
        };
        if value.is_empty() {
            self.set_message(&format!("{} is empty", kind.label()), MessageType::Warning);
            return;
        }

        let timeout = self.config.clipboard_timeout;
        clipboard::copy_with_timeout(value, timeout);
        self.set_message(
            &format!("{} copied, clears in {}s", kind.label(), timeout.as_secs()),
            MessageType::Success,
        );
    }

    fn clear_clipboard(&mut self) {
        if clipboard::clear_now() {
            self.set_message("Clipboard cleared", MessageType::Info);
        } else {
            self.set_message("Clipboard unavailable", MessageType::Error);
        }
    }

    fn focus_search(&mut self) {
        if !self.gate.is_search_enabled() {
            return;
        }
        let current = self.table.search().to_string();
        self.mode_state.to_search(&current);
    }

    fn toggle_mask(&mut self) {
        if self.table.table().selected().is_none() {
            return;
        }
        if self.table.toggle_selected_mask() == EditOutcome::NotEditable {
            self.set_message("Password column is not shown", MessageType::Info);
        }
    }

    /// Exit, unless work is running; unsaved changes are asked about first.
    pub fn request_exit(&mut self) {
        if self.config.clear_clipboard_on_exit {
            clipboard::clear_now();
        }
        if self.is_processing() {
            warn!("exit refused while a file operation is in progress");
            self.set_message("Please wait for the file operation to finish", MessageType::Warning);
            return;
        }
        if self.model.is_modified() {
            self.ask(PendingAction::ExitUnsaved);
            return;
        }
        self.finish_exit();
    }

    pub(crate) fn finish_exit(&mut self) {
        info!("exit");
        self.should_quit = true;
    }

    fn ask(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
        self.mode_state.to_confirm();
    }

    fn answer_pending(&mut self, answer: Answer) {
        let Some(action) = self.pending_action.take() else {
            self.mode_state.to_normal();
            return;
        };
        self.mode_state.to_normal();

        match (action, answer) {
            (_, Answer::Cancel) => {}
            (PendingAction::DeleteEntry(id), Answer::Yes) => self.delete_entry(id),
            (PendingAction::DeleteEntry(_), Answer::No) => {}
            (PendingAction::ExitUnsaved, Answer::Yes) => self.save_then(Followup::Exit),
            (PendingAction::ExitUnsaved, Answer::No) => self.finish_exit(),
            (PendingAction::NewFileUnsaved, Answer::Yes) => self.save_then(Followup::NewFile),
            (PendingAction::NewFileUnsaved, Answer::No) => self.reset_to_new_file(),
            (PendingAction::OpenUnsaved(path), Answer::Yes) => self.save_then(Followup::Open(path)),
            (PendingAction::OpenUnsaved(path), Answer::No) => self.open_file(path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    Cancel,
}
