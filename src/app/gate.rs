//! Interaction Gate
//!
//! Enables and disables user actions as a group while a file operation
//! runs in the background.

use std::collections::BTreeMap;

use tracing::debug;

/// Every user-triggerable action of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    NewFile,
    OpenFile,
    SaveFile,
    SaveAsFile,
    AddEntry,
    EditEntry,
    DuplicateEntry,
    DeleteEntry,
    CopyUrl,
    CopyUser,
    CopyPassword,
    ClearClipboard,
    FindEntry,
    ToggleMask,
    About,
    Exit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 16] = [
        Self::NewFile,
        Self::OpenFile,
        Self::SaveFile,
        Self::SaveAsFile,
        Self::AddEntry,
        Self::EditEntry,
        Self::DuplicateEntry,
        Self::DeleteEntry,
        Self::CopyUrl,
        Self::CopyUser,
        Self::CopyPassword,
        Self::ClearClipboard,
        Self::FindEntry,
        Self::ToggleMask,
        Self::About,
        Self::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewFile => "New",
            Self::OpenFile => "Open",
            Self::SaveFile => "Save",
            Self::SaveAsFile => "Save As",
            Self::AddEntry => "Add Entry",
            Self::EditEntry => "Edit Entry",
            Self::DuplicateEntry => "Duplicate Entry",
            Self::DeleteEntry => "Delete Entry",
            Self::CopyUrl => "Copy URL",
            Self::CopyUser => "Copy User",
            Self::CopyPassword => "Copy Password",
            Self::ClearClipboard => "Clear Clipboard",
            Self::FindEntry => "Find",
            Self::ToggleMask => "Show/Hide Password",
            Self::About => "About",
            Self::Exit => "Exit",
        }
    }
}

/// Enabled flag per action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRegistry {
    enabled: BTreeMap<ActionKind, bool>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self {
            enabled: ActionKind::ALL.iter().map(|&k| (k, true)).collect(),
        }
    }
}

impl ActionRegistry {
    pub fn is_enabled(&self, kind: ActionKind) -> bool {
        self.enabled.get(&kind).copied().unwrap_or(false)
    }

    pub fn set_enabled(&mut self, kind: ActionKind, enabled: bool) {
        self.enabled.insert(kind, enabled);
    }

    pub fn disable_all(&mut self) {
        self.enabled.values_mut().for_each(|v| *v = false);
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.values().filter(|&&v| v).count()
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    actions: ActionRegistry,
    search: bool,
}

/// Processing flag plus the action set it suspends.
///
/// Entering processing remembers which actions and whether the search field
/// were enabled, then disables all of them. Leaving processing restores
/// exactly that set.
#[derive(Debug, Clone)]
pub struct InteractionGate {
    actions: ActionRegistry,
    search_enabled: bool,
    saved: Option<Snapshot>,
}

impl Default for InteractionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionGate {
    pub fn new() -> Self {
        Self {
            actions: ActionRegistry::default(),
            search_enabled: true,
            saved: None,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.saved.is_some()
    }

    pub fn set_processing(&mut self, processing: bool) {
        match (processing, self.saved.take()) {
            (true, None) => {
                self.saved = Some(Snapshot {
                    actions: self.actions.clone(),
                    search: self.search_enabled,
                });
                self.actions.disable_all();
                self.search_enabled = false;
                debug!("interaction suspended");
            }
            (true, Some(snapshot)) => self.saved = Some(snapshot),
            (false, Some(snapshot)) => {
                self.actions = snapshot.actions;
                self.search_enabled = snapshot.search;
                debug!(enabled = self.actions.enabled_count(), "interaction restored");
            }
            (false, None) => {}
        }
    }

    pub fn is_action_enabled(&self, kind: ActionKind) -> bool {
        self.actions.is_enabled(kind)
    }

    pub fn is_search_enabled(&self) -> bool {
        self.search_enabled
    }

    /// While processing, the change is applied to the set restored afterwards.
    pub fn set_action_enabled(&mut self, kind: ActionKind, enabled: bool) {
        match self.saved.as_mut() {
            Some(snapshot) => snapshot.actions.set_enabled(kind, enabled),
            None => self.actions.set_enabled(kind, enabled),
        }
    }
}
