//! Renderer
//!
//! Frame layout: title bar, search bar, entry table, status line, key hints,
//! then whichever dialog is open on top.

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, TableState},
    Frame,
};

use super::components::{
    AboutScreen, ConfirmDialog, EmptyState, EntryForm, EntryFormWidget, EntryTable, HelpBar, MessageType,
    SearchBar, StatusLine, TitleBar,
};
use crate::input::InputMode;
use crate::table::TableController;

pub struct UiState<'a> {
    pub title: &'a str,
    pub mode: InputMode,
    pub table: &'a TableController,
    pub table_state: &'a mut TableState,
    /// Text shown in the search bar; the live buffer while it has focus
    pub search_text: &'a str,
    pub search_cursor: Option<usize>,
    pub search_enabled: bool,
    pub processing: bool,
    pub command_buffer: Option<&'a str>,
    pub message: Option<(&'a str, MessageType)>,
    /// Prompt text and whether it offers Cancel
    pub confirm: Option<(&'a str, bool)>,
    pub entry_form: Option<&'a EntryForm>,
}

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &mut UiState) {
        let size = frame.area();
        let chunks = create_main_layout(size);

        frame.render_widget(TitleBar::new(state.title), chunks[0]);
        render_search_bar(frame, chunks[1], state);
        render_table(frame, chunks[2], state);
        render_status_line(frame, chunks[3], state);
        frame.render_widget(HelpBar::for_mode(state.mode), chunks[4]);
        render_overlays(frame, size, state);
    }

    /// Rows of the table body for a terminal of `size`.
    pub fn table_page_height(size: Rect) -> usize {
        // title, search, status, help bars, two borders and the header row
        size.height.saturating_sub(7) as usize
    }
}

fn create_main_layout(size: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut bar = SearchBar::new(state.search_text).enabled(state.search_enabled);
    if let Some(cursor) = state.search_cursor {
        bar = bar.focused(cursor);
    }
    frame.render_widget(bar, area);
}

fn entries_block(processing: bool) -> Block<'static> {
    let color = if processing { Color::DarkGray } else { Color::Magenta };
    Block::default()
        .title(" Entries ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let block = entries_block(state.processing);
    let rows = state.table.table();

    if rows.row_count() == 0 {
        let (message, hint) = empty_table_text(state.table.search(), state.mode);
        frame.render_widget(EmptyState::new(message).hint(hint).block(block), area);
        return;
    }

    let widths = state.table.column_widths();
    let widget = EntryTable::new(rows, state.table.masking(), &widths)
        .block(block)
        .dimmed(state.processing);
    frame.render_stateful_widget(widget, area, state.table_state);
}

/// Message and key hint for an empty table. Esc only clears the criteria
/// while the search bar has focus.
fn empty_table_text(search: &str, mode: InputMode) -> (&'static str, &'static str) {
    match (search.is_empty(), mode) {
        (true, _) => ("No entries", "Press 'a' to add one"),
        (false, InputMode::Search) => ("No matching entries", "Press Esc to clear the search"),
        (false, _) => ("No matching entries", "Press / then Esc to clear the search"),
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut status = StatusLine::new(state.mode)
        .status(state.table.status())
        .processing(state.processing);

    if let Some(buffer) = state.command_buffer {
        status = status.command_buffer(buffer);
    }
    if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }

    frame.render_widget(status, area);
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    match state.mode {
        InputMode::Form => {
            if let Some(form) = state.entry_form {
                frame.render_widget(EntryFormWidget::new(form), area);
            }
        }
        InputMode::Confirm => {
            if let Some((msg, with_cancel)) = state.confirm {
                frame.render_widget(ConfirmDialog::new(" Confirm ", msg).with_cancel(with_cancel), area);
            }
        }
        InputMode::Help => frame.render_widget(AboutScreen, area),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_hint_follows_focus() {
        assert_eq!(empty_table_text("", InputMode::Normal).0, "No entries");
        assert_eq!(
            empty_table_text("zz", InputMode::Search).1,
            "Press Esc to clear the search"
        );
        assert_eq!(
            empty_table_text("zz", InputMode::Normal).1,
            "Press / then Esc to clear the search"
        );
    }
}
