//! Entry Table Component
//!
//! Renders the visible rows of an [`EntryRowTable`] with masked passwords.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::table::{EntryRowTable, MaskingRegistry};

pub struct EntryTable<'a> {
    table: &'a EntryRowTable,
    masking: &'a MaskingRegistry,
    widths: &'a [u16],
    block: Option<Block<'a>>,
    dimmed: bool,
}

impl<'a> EntryTable<'a> {
    pub fn new(table: &'a EntryRowTable, masking: &'a MaskingRegistry, widths: &'a [u16]) -> Self {
        Self {
            table,
            masking,
            widths,
            block: None,
            dimmed: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Grey everything out while input is suspended.
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn header(&self) -> Row<'a> {
        let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        Row::new(self.table.headers().into_iter().map(Cell::from)).style(style)
    }

    fn body(&self) -> Vec<Row<'a>> {
        (0..self.table.row_count())
            .map(|row| {
                let cells = self
                    .table
                    .display_row(row, self.masking)
                    .into_iter()
                    .map(|(text, masked)| {
                        let style = if masked {
                            Style::default().fg(Color::DarkGray)
                        } else {
                            Style::default()
                        };
                        Cell::from(text).style(style)
                    });
                Row::new(cells)
            })
            .collect()
    }
}

impl StatefulWidget for EntryTable<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let widths: Vec<Constraint> = self.widths.iter().map(|&w| Constraint::Length(w)).collect();
        let base = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let mut table = Table::new(self.body(), widths)
            .header(self.header())
            .style(base)
            .column_spacing(0)
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        if let Some(block) = self.block {
            table = table.block(block);
        }

        state.select(self.table.selected());
        StatefulWidget::render(table, area, buf, state);
    }
}

/// Placeholder shown when there are no rows to draw.
pub struct EmptyState<'a> {
    message: &'a str,
    hint: Option<&'a str>,
    block: Option<Block<'a>>,
}

impl<'a> EmptyState<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            hint: None,
            block: None,
        }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let mut lines = vec![Line::styled(self.message, Style::default().fg(Color::Gray))];
        if let Some(hint) = self.hint {
            lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        let top = inner.y + inner.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect::new(inner.x, top, inner.width, inner.height.saturating_sub(top - inner.y));
        Paragraph::new(lines).alignment(Alignment::Center).render(text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnConfiguration, FieldProjector, DEFAULT_COLUMNS, MASK};
    use crate::vault::Entry;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_headers_and_masked_passwords() {
        let mut rows = EntryRowTable::new(
            ColumnConfiguration::resolve(&["TITLE", "PASSWORD"], &DEFAULT_COLUMNS),
            FieldProjector::default(),
        );
        rows.add_row(&Entry::new("Bank", "", "", "hunter2"));
        let masking = MaskingRegistry::new();
        let widths = rows.column_widths(&masking);

        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default();
        EntryTable::new(&rows, &masking, &widths).render(area, &mut buf, &mut state);

        let text = buffer_text(&buf);
        assert!(text.contains("Title"));
        assert!(text.contains("Password"));
        assert!(text.contains("Bank"));
        assert!(text.contains(MASK));
        assert!(!text.contains("hunter2"));
    }

    fn render_star_cells(masking: &MaskingRegistry) -> Vec<Color> {
        let mut rows = EntryRowTable::new(
            ColumnConfiguration::resolve(&["TITLE", "PASSWORD"], &DEFAULT_COLUMNS),
            FieldProjector::default(),
        );
        rows.add_row(&Entry::new("Bank", "", "", MASK));
        let widths = rows.column_widths(masking);

        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default();
        EntryTable::new(&rows, masking, &widths).render(area, &mut buf, &mut state);
        buf.content().iter().filter(|c| c.symbol() == "*").map(|c| c.fg).collect()
    }

    #[test]
    fn test_mask_style_follows_revealed_state() {
        let mut masking = MaskingRegistry::new();
        let hidden = render_star_cells(&masking);
        assert_eq!(hidden.len(), MASK.len());
        assert!(hidden.iter().all(|&fg| fg == Color::DarkGray));

        // a revealed password that happens to read like the mask
        masking.reveal("Bank");
        let shown = render_star_cells(&masking);
        assert_eq!(shown.len(), MASK.len());
        assert!(shown.iter().all(|&fg| fg != Color::DarkGray));
    }

    #[test]
    fn test_empty_state_message() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        EmptyState::new("No entries").render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No entries"));
    }
}
