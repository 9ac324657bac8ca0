//! Popup Components
//!
//! Confirmation prompts and the about screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Fixed size centered rectangle
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black))
}

/// Yes/No prompt, or Yes/No/Cancel when "no" differs from backing out.
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    with_cancel: bool,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            with_cancel: false,
        }
    }

    pub fn with_cancel(mut self, with_cancel: bool) -> Self {
        self.with_cancel = with_cancel;
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(54, 7, area);

        Clear.render(popup_area, buf);

        let block = popup_block(self.title, Color::Yellow);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y, inner.width, 2), buf);

        let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD));
        let mut hint = vec![key("[y]", Color::Green), Span::raw(" Yes  "), key("[n]", Color::Red), Span::raw(" No")];
        if self.with_cancel {
            hint.push(Span::raw("  "));
            hint.push(key("[Esc]", Color::Gray));
            hint.push(Span::raw(" Cancel"));
        }
        buf.set_line(inner.x, inner.y + 3, &Line::from(hint), inner.width);
    }
}

const BINDINGS: &[(&str, &str)] = &[
    ("j/k, gg/G", "Move selection"),
    ("a", "Add entry"),
    ("e, Enter", "Edit entry"),
    ("D", "Duplicate entry"),
    ("dd, x", "Delete entry"),
    ("yy / u / w", "Copy password / user / URL"),
    ("C", "Clear clipboard"),
    ("Space, s", "Show or hide password"),
    ("/, Ctrl-f", "Find by title"),
    ("Ctrl-n", "New file"),
    ("Ctrl-o, :open <file>", "Open file"),
    ("Ctrl-s, :w", "Save"),
    (":saveas <file>", "Save as"),
    ("q, Ctrl-c", "Exit"),
];

/// Program name, version and key bindings.
pub struct AboutScreen;

impl AboutScreen {
    pub fn height() -> u16 {
        BINDINGS.len() as u16 + 6
    }
}

impl Widget for AboutScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(60, Self::height(), area);
        Clear.render(popup_area, buf);

        let block = popup_block(" About ", Color::Magenta);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Passbook ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
                Span::styled(env!("CARGO_PKG_VERSION"), Style::default().fg(Color::Gray)),
            ]),
            Line::styled("Terminal password manager", Style::default().fg(Color::Gray)),
            Line::default(),
        ];
        lines.extend(BINDINGS.iter().map(|(keys, desc)| {
            Line::from(vec![
                Span::styled(format!("{keys:<22}"), Style::default().fg(Color::Magenta)),
                Span::styled(*desc, Style::default().fg(Color::White)),
            ])
        }));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: impl Widget, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let r = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, r), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, r), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_confirm_dialog_answers() {
        let area = Rect::new(0, 0, 60, 10);
        let two = rendered(ConfirmDialog::new(" Delete ", "Delete this entry?"), area);
        assert!(two.contains("Yes"));
        assert!(!two.contains("Cancel"));

        let three = rendered(ConfirmDialog::new(" Exit ", "Save changes?").with_cancel(true), area);
        assert!(three.contains("Cancel"));
    }

    #[test]
    fn test_about_lists_bindings() {
        let text = rendered(AboutScreen, Rect::new(0, 0, 70, 30));
        assert!(text.contains("Passbook"));
        assert!(text.contains("Duplicate entry"));
    }
}
