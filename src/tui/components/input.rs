use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

#[derive(Debug, Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub placeholder: String,
    pub label: String,
    pub focused: bool,
}

impl InputField {
    pub fn new(label: &str, placeholder: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.to_string(),
            label: label.to_string(),
            focused: false,
        }
    }

    /// Field pre-filled with a default the user can edit in place.
    pub fn with_value(label: &str, value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
            placeholder: String::new(),
            label: label.to_string(),
            focused: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.remove(prev);
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Right => {
                if self.cursor < self.value.len() {
                    let step = self.value[self.cursor..]
                        .chars()
                        .next()
                        .map(|c| c.len_utf8())
                        .unwrap_or(1);
                    self.cursor += step;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label.as_str())
            .border_style(if self.focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            });

        let text = if self.value.is_empty() && !self.focused {
            Line::from(Span::styled(
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else if self.focused && self.cursor <= self.value.len() {
            let (before, after) = self.value.split_at(self.cursor);
            Line::from(vec![
                Span::raw(before),
                Span::styled("|", Style::default().fg(Color::Yellow)),
                Span::raw(after),
            ])
        } else {
            Line::from(Span::raw(&self.value))
        };

        let paragraph = Paragraph::new(text).block(block);
        f.render_widget(paragraph, area);
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    pub fn is_valid(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// Parse the field as an unsigned number, `None` on garbage input.
    pub fn numeric_value(&self) -> Option<u64> {
        self.value.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::InputField;

    #[test]
    fn numeric_value_parses_trimmed_input() {
        let mut field = InputField::with_value("Minimum views", "8000");
        assert_eq!(field.numeric_value(), Some(8000));

        field.value = "  42 ".to_string();
        assert_eq!(field.numeric_value(), Some(42));

        field.value = "lots".to_string();
        assert_eq!(field.numeric_value(), None);
    }

    #[test]
    fn with_value_puts_cursor_at_end() {
        let field = InputField::with_value("Days", "7");
        assert_eq!(field.cursor, 1);
        assert!(field.is_valid());
    }
}
