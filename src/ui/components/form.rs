//! Entry Form Component
//!
//! Add/edit dialog for a single entry.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::vault::Entry;

use super::popup::centered_rect_fixed;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub masked: bool,
}

impl FormField {
    fn text(label: &'static str, required: bool) -> Self {
        Self {
            label,
            value: String::new(),
            required,
            masked: false,
        }
    }

    fn password(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: false,
            masked: true,
        }
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

impl Drop for FormField {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

const TITLE: usize = 0;
const URL: usize = 1;
const USER: usize = 2;
const PASSWORD: usize = 3;

#[derive(Debug, Clone)]
pub struct EntryForm {
    pub fields: Vec<FormField>,
    pub active_field: usize,
    /// Character position in the active field
    pub cursor: usize,
    /// Set when editing an existing entry
    pub editing_id: Option<Uuid>,
    pub show_password: bool,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::text("Title", true),
                FormField::text("URL", false),
                FormField::text("User", false),
                FormField::password("Password"),
            ],
            active_field: 0,
            cursor: 0,
            editing_id: None,
            show_password: false,
        }
    }

    pub fn for_edit(entry: &Entry) -> Self {
        let mut form = Self::new();
        form.editing_id = Some(entry.id);
        form.fields[TITLE].value = entry.title.clone();
        form.fields[URL].value = entry.url.clone();
        form.fields[USER].value = entry.user.clone();
        form.fields[PASSWORD].value = entry.password.clone();
        form.cursor = form.fields[TITLE].char_len();
        form
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn active_field(&self) -> &FormField {
        &self.fields[self.active_field]
    }

    fn activate(&mut self, index: usize) {
        self.active_field = index;
        self.cursor = self.fields[index].char_len();
    }

    pub fn next_field(&mut self) {
        self.activate((self.active_field + 1) % self.fields.len());
    }

    pub fn prev_field(&mut self) {
        let len = self.fields.len();
        self.activate((self.active_field + len - 1) % len);
    }

    pub fn insert_char(&mut self, c: char) {
        let field = &mut self.fields[self.active_field];
        let at = field.byte_offset(self.cursor);
        field.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let field = &mut self.fields[self.active_field];
        let at = field.byte_offset(self.cursor);
        field.value.remove(at);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.active_field().char_len() {
            self.cursor += 1;
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.fields.iter().find(|f| f.required && f.value.trim().is_empty()) {
            Some(field) => Err(format!("{} is required", field.label)),
            None => Ok(()),
        }
    }

    /// Apply the form to `entry`, stamping its modification time.
    pub fn apply_to(&self, entry: &mut Entry) {
        entry.title = self.fields[TITLE].value.trim().to_string();
        entry.url = self.fields[URL].value.trim().to_string();
        entry.user = self.fields[USER].value.trim().to_string();
        entry.password.zeroize();
        entry.password = self.fields[PASSWORD].value.clone();
        entry.touch();
    }

    /// A new entry built from the form.
    pub fn to_entry(&self) -> Entry {
        let mut entry = Entry::new("", "", "", "");
        self.apply_to(&mut entry);
        entry
    }
}

pub struct EntryFormWidget<'a> {
    form: &'a EntryForm,
}

impl<'a> EntryFormWidget<'a> {
    pub fn new(form: &'a EntryForm) -> Self {
        Self { form }
    }
}

impl Widget for EntryFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form_area = centered_rect_fixed(64, 13, area);
        Clear.render(form_area, buf);

        let title = if self.form.is_editing() { " Edit Entry " } else { " Add Entry " };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(form_area);
        block.render(form_area, buf);

        let label_width = 12u16;
        let value_x = inner.x + label_width;
        let value_width = inner.width.saturating_sub(label_width + 1);
        let mut y = inner.y + 1;

        for (i, field) in self.form.fields.iter().enumerate() {
            if y >= inner.y + inner.height.saturating_sub(1) {
                break;
            }
            let is_active = i == self.form.active_field;

            let label = if field.required { format!("{}*:", field.label) } else { format!("{}:", field.label) };
            let label_style = if is_active {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            buf.set_string(inner.x + 1, y, &label, label_style);

            let bg = if is_active { Color::DarkGray } else { Color::Black };
            buf.set_style(Rect::new(value_x, y, value_width, 1), Style::default().bg(bg));

            let shown = if field.masked && !self.form.show_password {
                "*".repeat(field.char_len())
            } else {
                field.value.clone()
            };
            let value_style = if field.masked { Color::Green } else { Color::White };
            buf.set_stringn(value_x, y, &shown, value_width as usize, Style::default().fg(value_style).bg(bg));

            if is_active {
                let cursor_x = value_x + self.form.cursor as u16;
                if cursor_x < value_x + value_width {
                    if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                        cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                    }
                }
            }

            y += 2;
        }

        let help_y = inner.y + inner.height.saturating_sub(1);
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Magenta));
        let help_text = Line::from(vec![
            key("Tab"),
            Span::raw(" next  "),
            key("Enter"),
            Span::raw(" save  "),
            key("Esc"),
            Span::raw(" cancel  "),
            key("Ctrl+s"),
            Span::raw(" show pwd"),
        ]);
        buf.set_line(inner.x + 1, help_y, &help_text, inner.width.saturating_sub(1));
    }
}
