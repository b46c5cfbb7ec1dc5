//! # MovieCard Component
//!
//! Presentational cell of the movie grid: title (two lines at most),
//! rating and release year. Stateless; everything comes in as props.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::Movie;
use crate::tui::component::Component;

/// Border (2) + title lines (2) + metadata line (1).
pub const CARD_HEIGHT: u16 = 5;
const TITLE_LINES: usize = 2;

pub struct MovieCard<'a> {
    pub movie: &'a Movie,
    pub selected: bool,
    pub favorite: bool,
}

impl<'a> MovieCard<'a> {
    pub fn new(movie: &'a Movie, selected: bool, favorite: bool) -> Self {
        Self {
            movie,
            selected,
            favorite,
        }
    }

    fn metadata_line(&self, width: usize) -> Line<'static> {
        let rating = self
            .movie
            .rating_label()
            .map(|r| format!("★ {r}"))
            .unwrap_or_default();
        let year = self.movie.release_year().unwrap_or_default().to_string();
        let heart = if self.favorite { "♥ " } else { "" };

        let left = format!("{heart}{rating}");
        let gap = width.saturating_sub(left.width() + year.width()).max(1);
        Line::from(vec![
            Span::styled(heart.to_string(), Style::default().fg(Color::Red)),
            Span::styled(rating, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(gap)),
            Span::styled(year, Style::default().fg(Color::Gray)),
        ])
    }
}

impl Component for MovieCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.selected {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style);
        let inner = block.inner(area);
        let width = inner.width as usize;

        let mut lines: Vec<Line> = title_lines(&self.movie.title, width)
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)))
            .collect();
        while lines.len() < TITLE_LINES {
            lines.push(Line::raw(""));
        }
        lines.push(self.metadata_line(width));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }
}

/// Wraps the title to at most two lines, ending with `…` when cut short.
fn title_lines(title: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let wrapped = textwrap::wrap(title, width);
    let mut lines: Vec<String> = wrapped
        .iter()
        .take(TITLE_LINES)
        .map(|l| l.to_string())
        .collect();
    if wrapped.len() > TITLE_LINES
        && let Some(last) = lines.last_mut()
    {
        *last = with_ellipsis(last, width);
    }
    lines
}

fn with_ellipsis(line: &str, width: usize) -> String {
    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
