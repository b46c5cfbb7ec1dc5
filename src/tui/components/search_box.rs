//! # SearchBox Component
//!
//! Single-line search field above the movie grid. Every edit emits the full
//! new text so the list screen can search as the user types.
//!
//! Editing is append-only (cursor pinned to the end); arrow keys belong to
//! the grid.

use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search movies...";

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Text changed; carries the whole buffer.
    Changed(String),
    /// Buffer was wiped (Ctrl+U or Esc on a non-empty query).
    Cleared,
}

#[derive(Debug, Default)]
pub struct SearchBox {
    pub buffer: String,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => {
                // Single line field: fold newlines into spaces
                let line = text.replace(['\r', '\n'], " ");
                if line.is_empty() {
                    return None;
                }
                self.buffer.push_str(&line);
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::ClearInput => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
                Some(SearchEvent::Cleared)
            }
            _ => None,
        }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Search ");

        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::raw(self.buffer.as_str())
        };

        let block = if self.buffer.is_empty() {
            block
        } else {
            block.title_bottom(Line::from(" ✕ Esc ").right_aligned().style(Style::default().fg(Color::Red)))
        };

        let inner = block.inner(area);
        let text_width = self.buffer.width() as u16;
        // Keep the tail visible when the query is wider than the box
        let scroll_x = text_width.saturating_sub(inner.width.saturating_sub(1));
        frame.render_widget(Paragraph::new(line).block(block).scroll((0, scroll_x)), area);

        if inner.width > 0 && inner.height > 0 {
            let cursor_x = inner.x + (text_width - scroll_x).min(inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(cursor_x, inner.y));
        }
    }
}
