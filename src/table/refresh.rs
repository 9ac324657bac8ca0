//! Refresh
//!
//! Full rebuild of the visible rows from the entry collection and the
//! current search text.

use std::cmp::Ordering;
use std::fmt;

use uuid::Uuid;

use crate::vault::Entry;

use super::rows::EntryRowTable;

/// Which row to select once the rows are rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget<'a> {
    /// First row, in display order, whose title equals this exactly.
    Title(&'a str),
    /// The row built from this entry.
    Entry(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub total: usize,
    pub visible: usize,
    pub filtered: bool,
}

impl fmt::Display for RefreshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filtered {
            write!(f, "Entries found: {} / {}", self.visible, self.total)
        } else {
            write!(f, "Entries count: {}", self.total)
        }
    }
}

/// Case-insensitive ordering on titles.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

pub fn matches_search(title: &str, search: &str) -> bool {
    search.is_empty() || title.to_lowercase().contains(&search.to_lowercase())
}

/// Rebuild `table` from `entries`: sort by title (stable), keep titles
/// containing `search` case-insensitively, then select `select` if present.
pub fn refresh(
    table: &mut EntryRowTable,
    entries: &[Entry],
    search: &str,
    select: Option<SelectTarget<'_>>,
) -> RefreshSummary {
    table.clear();

    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| compare_titles(&a.title, &b.title));

    for entry in sorted.iter().filter(|e| matches_search(&e.title, search)) {
        table.add_row(entry);
    }

    if let Some(target) = select {
        table.select(find_row(table, target));
    }

    RefreshSummary {
        total: sorted.len(),
        visible: table.row_count(),
        filtered: !search.is_empty(),
    }
}

fn find_row(table: &EntryRowTable, target: SelectTarget<'_>) -> Option<usize> {
    (0..table.row_count()).find(|&row| match target {
        SelectTarget::Title(title) => table.row_title(row) == Some(title),
        SelectTarget::Entry(id) => table.row_entry_id(row) == Some(id),
    })
}
