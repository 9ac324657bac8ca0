//! Entry Row Table
//!
//! One row of formatted cells per entry, with the password cell masked on
//! read unless its row title is revealed.

use ratatui::text::Span;
use uuid::Uuid;

use super::columns::ColumnConfiguration;
use super::fields::{FieldKind, FieldProjector};
use super::masking::{MaskingRegistry, MASK};

/// Extra cells added to every measured column width.
pub const COLUMN_PADDING: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub entry_id: Uuid,
    pub cells: Vec<String>,
}

/// Result of starting an edit on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The masking toggle fired and the edit was cancelled; `revealed` is the new state.
    Toggled { revealed: bool },
    NotEditable,
}

#[derive(Debug, Clone)]
pub struct EntryRowTable {
    columns: ColumnConfiguration,
    projector: FieldProjector,
    rows: Vec<VisibleRow>,
    selected: Option<usize>,
}

impl EntryRowTable {
    pub fn new(columns: ColumnConfiguration, projector: FieldProjector) -> Self {
        Self {
            columns,
            projector,
            rows: Vec::new(),
            selected: None,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.labels()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.selected = None;
    }

    pub fn add_row(&mut self, entry: &crate::vault::Entry) {
        let cells = self
            .columns
            .kinds()
            .iter()
            .map(|&kind| self.projector.extract(kind, Some(entry)))
            .collect();
        self.rows.push(VisibleRow {
            entry_id: entry.id,
            cells,
        });
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The stored cell text, never masked.
    pub fn stored_value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.cells.get(col).map(String::as_str)
    }

    /// Title of a row, wherever the Title column is configured.
    /// `None` when there is no Title column or no such row.
    pub fn row_title(&self, row: usize) -> Option<&str> {
        let col = self.columns.position(FieldKind::Title)?;
        self.stored_value(row, col)
    }

    pub fn row_entry_id(&self, row: usize) -> Option<Uuid> {
        self.rows.get(row).map(|r| r.entry_id)
    }

    pub fn is_password_column(&self, col: usize) -> bool {
        self.columns.kinds().get(col) == Some(&FieldKind::Password)
    }

    /// Whether a cell currently shows [`MASK`] instead of its value. Only
    /// password cells mask, unless the row's title is revealed; a row
    /// without a title is never revealed.
    pub fn is_masked(&self, row: usize, col: usize, masking: &MaskingRegistry) -> bool {
        self.is_password_column(col) && !self.row_title(row).is_some_and(|t| masking.is_revealed(t))
    }

    /// What the table shows in a cell.
    pub fn display_value<'a>(&'a self, row: usize, col: usize, masking: &MaskingRegistry) -> Option<&'a str> {
        let stored = self.stored_value(row, col)?;
        Some(if self.is_masked(row, col, masking) { MASK } else { stored })
    }

    /// Shown text of every cell in `row`, paired with its masked state.
    pub fn display_row<'a>(&'a self, row: usize, masking: &MaskingRegistry) -> Vec<(&'a str, bool)> {
        (0..self.columns.len())
            .filter_map(|col| Some((self.display_value(row, col, masking)?, self.is_masked(row, col, masking))))
            .collect()
    }

    pub fn is_cell_editable(&self, col: usize) -> bool {
        self.is_password_column(col)
    }

    /// Editing a password cell toggles the row's masking and cancels at once;
    /// the stored value is never changed.
    pub fn edit_cell(&self, row: usize, col: usize, masking: &mut MaskingRegistry) -> EditOutcome {
        if !self.is_cell_editable(col) {
            return EditOutcome::NotEditable;
        }
        match self.row_title(row) {
            Some(title) => EditOutcome::Toggled {
                revealed: masking.toggle(title),
            },
            None => EditOutcome::NotEditable,
        }
    }

    /// Toggle masking for the selected row, if the password column is shown.
    pub fn toggle_selected(&self, masking: &mut MaskingRegistry) -> EditOutcome {
        let (Some(row), Some(col)) = (self.selected, self.columns.position(FieldKind::Password)) else {
            return EditOutcome::NotEditable;
        };
        self.edit_cell(row, col, masking)
    }

    /// Widest of header and displayed cells per column, plus padding.
    pub fn column_widths(&self, masking: &MaskingRegistry) -> Vec<u16> {
        self.headers()
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let content = (0..self.rows.len())
                    .filter_map(|row| self.display_value(row, col, masking))
                    .map(text_width)
                    .max()
                    .unwrap_or(0);
                text_width(header).max(content).saturating_add(COLUMN_PADDING)
            })
            .collect()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.rows.len());
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry_id(&self) -> Option<Uuid> {
        self.selected.and_then(|i| self.row_entry_id(i))
    }

    pub fn move_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let index = self.selected.unwrap_or(0).saturating_sub(1);
        self.select(Some(index));
    }

    pub fn move_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let index = self.selected.map_or(0, |i| (i + 1).min(self.rows.len() - 1));
        self.select(Some(index));
    }

    pub fn move_to_top(&mut self) {
        if !self.rows.is_empty() {
            self.select(Some(0));
        }
    }

    pub fn move_to_bottom(&mut self) {
        if !self.rows.is_empty() {
            self.select(Some(self.rows.len() - 1));
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        if self.rows.is_empty() {
            return;
        }
        let index = self.selected.unwrap_or(0).saturating_sub(page_size);
        self.select(Some(index));
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.rows.is_empty() {
            return;
        }
        let index = self.selected.map_or(0, |i| (i + page_size).min(self.rows.len() - 1));
        self.select(Some(index));
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::columns::DEFAULT_COLUMNS;
    use crate::vault::Entry;

    fn table_with(names: &[&str]) -> EntryRowTable {
        EntryRowTable::new(
            ColumnConfiguration::resolve(names, &DEFAULT_COLUMNS),
            FieldProjector::default(),
        )
    }

    fn filled() -> EntryRowTable {
        let mut table = table_with(&["TITLE", "USER", "PASSWORD"]);
        table.add_row(&Entry::new("Bank", "", "alice", "bank-pass"));
        table.add_row(&Entry::new("Mail", "", "bob", "mail-pass"));
        table
    }

    #[test]
    fn test_add_row_follows_column_order() {
        let mut table = table_with(&["PASSWORD", "TITLE"]);
        table.add_row(&Entry::new("Bank", "", "alice", "secret"));
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0].cells, vec!["secret", "Bank"]);
    }

    #[test]
    fn test_password_masked_until_revealed() {
        let table = filled();
        let mut masking = MaskingRegistry::new();

        assert_eq!(table.display_value(0, 2, &masking), Some(MASK));
        assert_eq!(table.display_value(1, 2, &masking), Some(MASK));
        assert_eq!(table.display_value(0, 1, &masking), Some("alice"));

        masking.toggle("Bank");
        assert_eq!(table.display_value(0, 2, &masking), Some("bank-pass"));
        assert_eq!(table.display_value(1, 2, &masking), Some(MASK));
        assert_eq!(table.stored_value(1, 2), Some("mail-pass"));
    }

    #[test]
    fn test_masked_flag_ignores_cell_text() {
        let mut table = table_with(&["TITLE", "PASSWORD"]);
        table.add_row(&Entry::new("Bank", "", "", MASK));
        let mut masking = MaskingRegistry::new();
        assert_eq!(table.display_row(0, &masking), vec![("Bank", false), (MASK, true)]);

        masking.reveal("Bank");
        assert!(!table.is_masked(0, 1, &masking));
        assert_eq!(table.display_row(0, &masking), vec![("Bank", false), (MASK, false)]);
    }

    #[test]
    fn test_clear_keeps_masking() {
        let mut table = filled();
        let mut masking = MaskingRegistry::new();
        masking.reveal("Bank");
        table.select(Some(1));

        table.clear();

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.selected(), None);
        assert!(masking.is_revealed("Bank"));
    }

    #[test]
    fn test_edit_password_cell_toggles_without_commit() {
        let table = filled();
        let mut masking = MaskingRegistry::new();

        assert_eq!(table.edit_cell(0, 2, &mut masking), EditOutcome::Toggled { revealed: true });
        assert_eq!(table.stored_value(0, 2), Some("bank-pass"));
        assert_eq!(table.edit_cell(0, 2, &mut masking), EditOutcome::Toggled { revealed: false });
        assert_eq!(table.edit_cell(0, 0, &mut masking), EditOutcome::NotEditable);
        assert!(!masking.is_revealed("Bank"));
    }

    #[test]
    fn test_title_not_first_is_located() {
        let mut table = table_with(&["PASSWORD", "TITLE"]);
        table.add_row(&Entry::new("Bank", "", "", "secret"));
        let mut masking = MaskingRegistry::new();
        masking.reveal("Bank");
        assert_eq!(table.row_title(0), Some("Bank"));
        assert_eq!(table.display_value(0, 0, &masking), Some("secret"));
    }

    #[test]
    fn test_missing_title_column_fails_safe() {
        let mut table = table_with(&["USER", "PASSWORD"]);
        table.add_row(&Entry::new("Bank", "", "alice", "secret"));
        let mut masking = MaskingRegistry::new();
        masking.reveal("Bank");
        masking.reveal("alice");

        assert_eq!(table.row_title(0), None);
        assert_eq!(table.display_value(0, 1, &masking), Some(MASK));
        assert_eq!(table.edit_cell(0, 1, &mut masking), EditOutcome::NotEditable);
    }

    #[test]
    fn test_out_of_range_reads() {
        let table = filled();
        let masking = MaskingRegistry::new();
        assert_eq!(table.display_value(5, 0, &masking), None);
        assert_eq!(table.display_value(0, 9, &masking), None);
        assert_eq!(table.row_entry_id(7), None);
    }

    #[test]
    fn test_column_widths_fit_content() {
        let mut table = filled();
        table.add_row(&Entry::new("A much longer title", "", "x", "p"));
        let mut masking = MaskingRegistry::new();

        let widths = table.column_widths(&masking);
        assert_eq!(widths[0], 19 + COLUMN_PADDING);
        assert_eq!(widths[1], 5 + COLUMN_PADDING);
        assert_eq!(widths[2], 8 + COLUMN_PADDING);

        masking.reveal("Bank");
        assert_eq!(table.column_widths(&masking)[2], 9 + COLUMN_PADDING);
    }

    #[test]
    fn test_navigation_and_toggle_selected() {
        let mut table = filled();
        let mut masking = MaskingRegistry::new();

        assert_eq!(table.toggle_selected(&mut masking), EditOutcome::NotEditable);
        table.move_down();
        assert_eq!(table.selected(), Some(0));
        table.move_down();
        table.move_down();
        assert_eq!(table.selected(), Some(1));
        table.move_to_top();
        assert_eq!(table.selected(), Some(0));

        assert_eq!(table.toggle_selected(&mut masking), EditOutcome::Toggled { revealed: true });
        assert!(masking.is_revealed("Bank"));

        table.select(Some(10));
        assert_eq!(table.selected(), None);
    }
}
