use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Single-line form field with a label, focus highlight and end-of-text cursor.
pub struct TextInput<'a> {
    pub label: &'a str,
    pub text: &'a str,
    pub focused: bool,
    /// Render every character as a bullet (passwords).
    pub masked: bool,
    pub placeholder: &'a str,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, text: &'a str, focused: bool) -> Self {
        Self {
            label,
            text,
            focused,
            masked: false,
            placeholder: "",
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Magenta
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.label));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let shown = if self.masked {
            "•".repeat(self.text.chars().count())
        } else {
            self.text.to_string()
        };

        let mut spans = Vec::new();
        if shown.is_empty() && !self.focused {
            spans.push(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            // Keep the tail visible when the text is wider than the field
            let width = inner.width.saturating_sub(1) as usize;
            let count = shown.chars().count();
            let visible: String = shown.chars().skip(count.saturating_sub(width)).collect();
            spans.push(Span::raw(visible));
        }

        if self.focused {
            spans.push(Span::styled(
                " ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
