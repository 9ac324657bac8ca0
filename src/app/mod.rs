//! Application State
//!
//! Ties the entry collection, the table engine, input and the background
//! file runner together. Everything here runs on the UI thread.

mod actions;
pub mod background;
pub mod clipboard;
pub mod config;
pub mod gate;
mod input;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use ratatui::Frame;
use tracing::info;

use crate::input::ModeState;
use crate::input::InputMode;
use crate::table::{EntryRowTable, FieldKind, FieldProjector, RefreshSummary, SelectTarget, TableController};
use crate::ui::components::EntryForm;
use crate::ui::{MessageType, Renderer, UiState};
use crate::vault::DataModel;

use background::{BackgroundRunner, Completion, FileJob, FileOutcome, Followup};
use gate::{ActionKind, InteractionGate};

pub use config::{AppConfig, Configuration, PendingAction};

pub const APP_NAME: &str = "Passbook";
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct App {
    pub config: AppConfig,
    pub model: DataModel,
    pub table: TableController,
    pub gate: InteractionGate,
    runner: BackgroundRunner,
    pub mode_state: ModeState,
    pub entry_form: Option<EntryForm>,
    pub pending_action: Option<PendingAction>,
    pub message: Option<(String, MessageType, Instant)>,
    pub should_quit: bool,
    pub terminal_size: Rect,
    pub table_state: TableState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let projector = FieldProjector::new(config.date_pattern.clone());
        let table = TableController::new(EntryRowTable::new(config.columns.clone(), projector));

        let mut gate = InteractionGate::new();
        if config.columns.position(FieldKind::Password).is_none() {
            gate.set_action_enabled(ActionKind::ToggleMask, false);
        }

        let mut app = Self {
            config,
            model: DataModel::new(),
            table,
            gate,
            runner: BackgroundRunner::new(),
            mode_state: ModeState::new(),
            entry_form: None,
            pending_action: None,
            message: None,
            should_quit: false,
            terminal_size: Rect::default(),
            table_state: TableState::default(),
        };
        app.refresh_all(None);
        app
    }

    /// `*` when modified, then the file name or `Untitled`.
    pub fn frame_title(&self) -> String {
        let name = self
            .model
            .file_name()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        let marker = if self.model.is_modified() { "*" } else { "" };
        format!("{marker}{name} - {APP_NAME}")
    }

    /// Full refresh from the model under the current search text.
    pub fn refresh_all(&mut self, select: Option<SelectTarget<'_>>) -> RefreshSummary {
        self.table.refresh(self.model.entries(), select)
    }

    pub fn is_processing(&self) -> bool {
        self.gate.is_processing()
    }

    pub(crate) fn dispatch_job(&mut self, job: FileJob, then: Followup) -> bool {
        self.runner.dispatch(&mut self.gate, job, then)
    }

    pub fn open_file(&mut self, path: PathBuf) {
        if !self.dispatch_job(FileJob::Load(path), Followup::Nothing) {
            self.set_message("Another file operation is in progress", MessageType::Warning);
        }
    }

    /// Apply a finished background job, if one is waiting.
    pub fn poll_background(&mut self) {
        if let Some(completion) = self.runner.poll(&mut self.gate) {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        let Completion { outcome, then } = completion;
        match outcome {
            Ok(FileOutcome::Loaded { path, entries }) => {
                let count = entries.len();
                self.model.load(entries, path);
                self.refresh_all(None);
                self.set_message(&format!("Loaded {count} entries"), MessageType::Success);
            }
            Ok(FileOutcome::Saved { path }) => {
                self.model.set_file_name(Some(path));
                self.model.set_modified(false);
                self.table.refresh_keep_selection(self.model.entries());
                self.set_message("Saved", MessageType::Success);
                self.run_followup(then);
            }
            Err(e) => self.set_message(&e.to_string(), MessageType::Error),
        }
    }

    fn run_followup(&mut self, then: Followup) {
        match then {
            Followup::Nothing => {}
            Followup::Exit => self.finish_exit(),
            Followup::NewFile => self.reset_to_new_file(),
            Followup::Open(path) => self.open_file(path),
        }
    }

    /// Start over with an empty, unnamed collection.
    pub fn reset_to_new_file(&mut self) {
        self.model.clear();
        self.table.clear();
        self.refresh_all(None);
        info!("new file");
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.terminal_size = frame.area();
        self.check_message_expiry();

        let title = self.frame_title();
        let message = self.message.as_ref().map(|(m, t, _)| (m.as_str(), *t));
        let in_search = self.mode_state.mode == InputMode::Search;
        let confirm = self
            .pending_action
            .as_ref()
            .map(|a| (a.confirm_message(), a.has_three_answers()));

        let mut state = UiState {
            title: &title,
            mode: self.mode_state.mode,
            table: &self.table,
            table_state: &mut self.table_state,
            search_text: if in_search { self.mode_state.get_buffer() } else { self.table.search() },
            search_cursor: in_search.then_some(self.mode_state.cursor),
            search_enabled: self.gate.is_search_enabled(),
            processing: self.gate.is_processing(),
            command_buffer: (self.mode_state.mode == InputMode::Command).then(|| self.mode_state.get_buffer()),
            message,
            confirm,
            entry_form: self.entry_form.as_ref(),
        };

        Renderer::render(frame, &mut state);
    }

    fn check_message_expiry(&mut self) {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > MESSAGE_TIMEOUT);

        if expired {
            self.message = None;
        }
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }
}

#[cfg(test)]
impl App {
    /// Block until the running job finishes and apply it.
    pub(crate) fn wait_background(&mut self) {
        if let Some(completion) = self.runner.wait(&mut self.gate) {
            self.apply_completion(completion);
        }
    }
}
