//! Status Line Component
//!
//! Title bar, search bar, status line and key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::input::InputMode;

/// Message type for status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Window title, e.g. `*vault.json - Passbook`.
pub struct TitleBar<'a> {
    title: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::Black).bg(Color::Magenta);
        buf.set_style(area, style);
        let x = area.x + area.width.saturating_sub(Span::raw(self.title).width() as u16) / 2;
        buf.set_string(x, area.y, self.title, style.add_modifier(Modifier::BOLD));
    }
}

pub struct SearchBar<'a> {
    text: &'a str,
    cursor: usize,
    focused: bool,
    enabled: bool,
}

impl<'a> SearchBar<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            focused: false,
            enabled: true,
        }
    }

    pub fn focused(mut self, cursor: usize) -> Self {
        self.focused = true;
        self.cursor = cursor;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

const SEARCH_LABEL: &str = " Find: ";

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label_style, text_style) = match (self.enabled, self.focused) {
            (false, _) => (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray)),
            (true, true) => (
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            (true, false) => (Style::default().fg(Color::Gray), Style::default().fg(Color::White)),
        };

        buf.set_string(area.x, area.y, SEARCH_LABEL, label_style);
        let field_x = area.x + SEARCH_LABEL.len() as u16;
        let field_width = area.width.saturating_sub(SEARCH_LABEL.len() as u16 + 1);
        if field_width == 0 {
            return;
        }

        buf.set_style(Rect::new(field_x, area.y, field_width, 1), text_style);
        buf.set_stringn(field_x, area.y, self.text, field_width as usize, text_style);

        if self.focused {
            let offset: usize = self.text.chars().take(self.cursor).map(|c| Span::raw(c.to_string()).width()).sum();
            let cursor_x = field_x + offset as u16;
            if cursor_x < field_x + field_width {
                if let Some(cell) = buf.cell_mut((cursor_x, area.y)) {
                    cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                }
            }
        }
    }
}

/// Status line widget
pub struct StatusLine<'a> {
    mode: InputMode,
    command_buffer: Option<&'a str>,
    message: Option<(&'a str, MessageType)>,
    status: &'a str,
    processing: bool,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            command_buffer: None,
            message: None,
            status: "",
            processing: false,
        }
    }

    pub fn command_buffer(mut self, buffer: &'a str) -> Self {
        self.command_buffer = Some(buffer);
        self
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    /// Entry count summary of the last refresh.
    pub fn status(mut self, status: &'a str) -> Self {
        self.status = status;
        self
    }

    pub fn processing(mut self, processing: bool) -> Self {
        self.processing = processing;
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mut x = area.x;

        let mode_style = match self.mode {
            InputMode::Normal => Style::default().fg(Color::Black).bg(Color::Blue),
            InputMode::Command => Style::default().fg(Color::Black).bg(Color::Red),
            InputMode::Search => Style::default().fg(Color::Black).bg(Color::Magenta),
            InputMode::Form => Style::default().fg(Color::Black).bg(Color::Green),
            InputMode::Confirm => Style::default().fg(Color::Black).bg(Color::Red),
            InputMode::Help => Style::default().fg(Color::Black).bg(Color::Yellow),
        };

        let mode_text = format!(" {} ", self.mode.indicator());
        buf.set_string(x, area.y, &mode_text, mode_style.add_modifier(Modifier::BOLD));
        x += mode_text.len() as u16 + 1;

        if self.mode == InputMode::Command {
            let cmd_text = format!(":{}", self.command_buffer.unwrap_or(""));
            buf.set_string(x, area.y, &cmd_text, Style::default().fg(Color::White).bg(Color::DarkGray));
        } else if let Some((msg, msg_type)) = self.message {
            buf.set_string(x, area.y, msg, Style::default().fg(msg_type.color()).bg(Color::DarkGray));
        }

        let mut right = Vec::new();
        if self.processing {
            right.push(Span::styled("Working... ", Style::default().fg(Color::Yellow).bg(Color::DarkGray)));
        }
        right.push(Span::styled(self.status, Style::default().fg(Color::Gray).bg(Color::DarkGray)));
        let line = Line::from(right);
        let right_x = area.x + area.width.saturating_sub(line.width() as u16 + 1);
        buf.set_line(right_x, area.y, &line, area.width.saturating_sub(right_x - area.x));
    }
}

/// Help bar widget
pub struct HelpBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl<'a> HelpBar<'a> {
    pub fn for_mode(mode: InputMode) -> Self {
        let hints = match mode {
            InputMode::Normal => vec![
                ("j/k", "navigate"),
                ("a", "add"),
                ("e", "edit"),
                ("dd", "delete"),
                ("yy", "copy pwd"),
                ("Space", "show pwd"),
                ("/", "find"),
                (":", "command"),
                ("?", "help"),
            ],
            InputMode::Search => vec![
                ("Esc", "clear"),
                ("Enter", "keep"),
            ],
            InputMode::Command => vec![
                ("Esc", "cancel"),
                ("Enter", "execute"),
            ],
            InputMode::Form => vec![
                ("Tab", "next"),
                ("Enter", "save"),
                ("C-s", "show pwd"),
                ("Esc", "cancel"),
            ],
            InputMode::Confirm => vec![
                ("y", "yes"),
                ("n", "no"),
                ("Esc", "cancel"),
            ],
            InputMode::Help => vec![
                ("q", "close"),
            ],
        };
        Self { hints }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
        }
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(widget: impl Widget, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_status_line_shows_count_and_processing() {
        let text = render(StatusLine::new(InputMode::Normal).status("Entries count: 3").processing(true), 60);
        assert!(text.contains("NORMAL"));
        assert!(text.contains("Entries count: 3"));
        assert!(text.contains("Working"));
    }

    #[test]
    fn test_status_line_command_buffer() {
        let text = render(StatusLine::new(InputMode::Command).command_buffer("open a.json"), 40);
        assert!(text.contains(":open a.json"));
    }

    #[test]
    fn test_search_bar_text() {
        let text = render(SearchBar::new("bank").focused(4), 30);
        assert!(text.contains("Find:"));
        assert!(text.contains("bank"));
    }

    #[test]
    fn test_title_bar() {
        let text = render(TitleBar::new("*a.json - Passbook"), 40);
        assert!(text.contains("*a.json - Passbook"));
    }
}
