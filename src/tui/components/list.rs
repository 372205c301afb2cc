use crate::core::pipeline::RankedResult;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthChar;

pub struct ResultList {
    pub items: Vec<RankedResult>,
    pub state: ListState,
    viewport_size: usize,
}

impl ResultList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            state: ListState::default(),
            viewport_size: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.previous();
                true
            }
            KeyCode::Down => {
                self.next();
                true
            }
            KeyCode::PageDown => {
                self.page_down();
                true
            }
            KeyCode::PageUp => {
                self.page_up();
                true
            }
            KeyCode::Home => {
                self.go_home();
                true
            }
            KeyCode::End => {
                self.go_end();
                true
            }
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.previous();
                true
            }
            MouseEventKind::ScrollDown => {
                self.next();
                true
            }
            _ => false,
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.state.select(Some(i));
        self.adjust_offset();
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
        self.adjust_offset();
    }

    fn page_down(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let step = self.viewport_size.max(1);
        let current = self.state.selected().unwrap_or(0);
        let new_index = (current + step).min(self.items.len() - 1);
        self.state.select(Some(new_index));
        self.adjust_offset();
    }

    fn page_up(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let step = self.viewport_size.max(1);
        let current = self.state.selected().unwrap_or(0);
        self.state.select(Some(current.saturating_sub(step)));
        self.adjust_offset();
    }

    fn go_home(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.state.select(Some(0));
        self.adjust_offset();
    }

    fn go_end(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.state.select(Some(self.items.len() - 1));
        self.adjust_offset();
    }

    pub fn get_selected(&self) -> Option<&RankedResult> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn update_items(&mut self, new_items: Vec<RankedResult>) {
        self.items = new_items;
        if self.items.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
        *self.state.offset_mut() = 0;
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, title: &str) {
        self.viewport_size = (area.height.saturating_sub(2) as usize / 2).max(1);
        self.adjust_offset();

        let title_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|result| {
                let trend_style = if result.trend_tags.is_empty() {
                    Style::default().fg(Color::Gray)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                };

                let header = Line::from(Span::styled(
                    truncate_to_width(&result.title, title_width),
                    Style::default().fg(Color::White),
                ));
                let details = Line::from(vec![
                    Span::raw("  "),
                    Span::styled(result.trend_summary(), trend_style),
                    Span::styled(
                        format!(
                            "  {} min | {} views | {} subs | {}",
                            result.duration_minutes,
                            result.view_count,
                            result.subscriber_count,
                            result.keyword
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);

                ListItem::new(vec![header, details])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_stateful_widget(list, area, &mut self.state);
    }

    fn adjust_offset(&mut self) {
        if self.items.is_empty() {
            *self.state.offset_mut() = 0;
            return;
        }

        let viewport = self.viewport_size.max(1);
        let max_index = self.items.len() - 1;
        let selected = self
            .state
            .selected()
            .map(|idx| idx.min(max_index))
            .unwrap_or(0);
        self.state.select(Some(selected));

        let max_offset = self.items.len().saturating_sub(viewport);
        let offset = self.state.offset().min(max_offset);
        *self.state.offset_mut() = offset;

        if selected < offset {
            *self.state.offset_mut() = selected;
        } else if selected >= offset + viewport {
            *self.state.offset_mut() = selected + 1 - viewport;
        }
    }
}

impl Default for ResultList {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate by display columns, not chars, so wide (CJK) titles do not
/// overflow the row.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::truncate_to_width;

    #[test]
    fn short_titles_pass_through() {
        assert_eq!(truncate_to_width("hello", 20), "hello");
    }

    #[test]
    fn long_titles_get_ellipsis() {
        let out = truncate_to_width("a very long video title", 10);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 10);
    }

    #[test]
    fn wide_chars_count_double() {
        let out = truncate_to_width("歴史解説動画", 7);
        // Three double-width chars fill 6 columns; the fourth cannot fit.
        assert_eq!(out, "歴史解…");
    }
}
