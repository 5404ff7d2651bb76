//! Text input widget
//!
//! A single-line editor with a cursor. The cursor counts characters, not
//! bytes, so pasted non-ASCII text cannot split a code point.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Single-line text editor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl TextInput {
    /// Start editing `content` with the cursor at the end
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }
}

/// One labelled form row
pub struct FieldLine<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub selected: bool,
    /// Cursor position when this row is being edited
    pub cursor: Option<usize>,
}

impl Widget for FieldLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let marker = if self.selected { "> " } else { "  " };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(format!("{:>14}: ", self.label), label_style),
        ];

        match self.cursor {
            Some(cursor) => {
                let value_style = Style::default().fg(Color::White);
                let before: String = self.value.chars().take(cursor).collect();
                let mut rest = self.value.chars().skip(cursor);
                let under = rest.next().unwrap_or(' ');
                let after: String = rest.collect();

                spans.push(Span::styled(before, value_style));
                spans.push(Span::styled(
                    under.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ));
                spans.push(Span::styled(after, value_style));
            }
            None if self.value.is_empty() => {
                spans.push(Span::styled(
                    self.placeholder,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            None => {
                spans.push(Span::styled(self.value, Style::default().fg(Color::Yellow)));
            }
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// One action row
pub struct ButtonLine<'a> {
    pub label: &'a str,
    pub selected: bool,
    /// Greyed out while a transaction is in flight
    pub enabled: bool,
}

impl Widget for ButtonLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match (self.enabled, self.selected) {
            (false, _) => Style::default().fg(Color::DarkGray),
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Green),
        };
        let marker = if self.selected { "> " } else { "  " };
        let line = Line::from(vec![
            Span::raw(marker),
            Span::raw(" ".repeat(16)),
            Span::styled(format!("[ {} ]", self.label), style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
