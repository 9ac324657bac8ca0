//! Table Controller
//!
//! Session state behind the entry table: rows, masking, search text and
//! the status summary of the last refresh.

use tracing::debug;

use crate::vault::Entry;

use super::masking::MaskingRegistry;
use super::refresh::{refresh, RefreshSummary, SelectTarget};
use super::rows::{EditOutcome, EntryRowTable};

#[derive(Debug, Clone)]
pub struct TableController {
    table: EntryRowTable,
    masking: MaskingRegistry,
    search: String,
    status: String,
}

impl TableController {
    pub fn new(table: EntryRowTable) -> Self {
        Self {
            table,
            masking: MaskingRegistry::new(),
            search: String::new(),
            status: String::new(),
        }
    }

    pub fn table(&self) -> &EntryRowTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut EntryRowTable {
        &mut self.table
    }

    pub fn masking(&self) -> &MaskingRegistry {
        &self.masking
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Rebuild rows and status text from `entries` under the current search.
    pub fn refresh(&mut self, entries: &[Entry], select: Option<SelectTarget<'_>>) -> RefreshSummary {
        let summary = refresh(&mut self.table, entries, &self.search, select);
        self.status = summary.to_string();
        debug!(total = summary.total, visible = summary.visible, search = %self.search, "table refreshed");
        summary
    }

    /// Refresh while keeping the currently selected entry selected.
    pub fn refresh_keep_selection(&mut self, entries: &[Entry]) -> RefreshSummary {
        let selected = self.table.selected_entry_id();
        self.refresh(entries, selected.map(SelectTarget::Entry))
    }

    pub fn toggle_selected_mask(&mut self) -> EditOutcome {
        self.table.toggle_selected(&mut self.masking)
    }

    /// Drop rows and search text. Masking is kept.
    pub fn clear(&mut self) {
        self.table.clear();
        self.search.clear();
        self.status.clear();
    }

    pub fn column_widths(&self) -> Vec<u16> {
        self.table.column_widths(&self.masking)
    }
}
