//! # TitleBar Component
//!
//! Top status line: screen title, favorite count, a loading marker, and the
//! error banner.
//!
//! Errors recorded in the shared store take over the bar until dismissed
//! (Ctrl+E), so a failed search or page fetch is never silent.
//!
//! Stateless: all fields are props.

use crate::tui::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct TitleBar<'a> {
    pub title: &'a str,
    pub favorites_count: usize,
    pub loading: bool,
    pub error: Option<&'a str>,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, favorites_count: usize, loading: bool, error: Option<&'a str>) -> Self {
        Self {
            title,
            favorites_count,
            loading,
            error,
        }
    }

    fn line(&self) -> Line<'static> {
        if let Some(error) = self.error {
            return Line::from(vec![
                Span::styled(" ! ", Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {error}"), Style::default().fg(Color::Red)),
                Span::styled("  (Ctrl+E dismiss)", Style::default().fg(Color::DarkGray)),
            ]);
        }

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("| ♥ {}", self.favorites_count),
                Style::default().fg(Color::Red),
            ),
        ];
        if self.loading {
            spans.push(Span::styled(" | Loading...", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}
