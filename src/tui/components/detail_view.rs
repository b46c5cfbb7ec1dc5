//! # DetailView Component
//!
//! Full-page view of one movie: title with favorite marker, rating, release
//! date, runtime, genres, overview and poster URL. Scrolls when the overview
//! is longer than the screen.
//!
//! While the fetch is in flight a loading line is shown; a failed fetch shows
//! the error instead of spinning forever.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::MovieDetail;
use crate::core::state::DetailScreen;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailEvent {
    Back,
    ToggleFavorite,
}

/// Persistent scroll state for the detail page.
#[derive(Default)]
pub struct DetailViewState {
    pub scroll_state: ScrollViewState,
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for DetailViewState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace | TuiEvent::CursorLeft => Some(DetailEvent::Back),
            TuiEvent::ToggleFavorite | TuiEvent::InputChar('f') | TuiEvent::InputChar(' ') => {
                Some(DetailEvent::ToggleFavorite)
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::PageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::PageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            TuiEvent::Home => {
                self.scroll_state.scroll_to_top();
                None
            }
            _ => None,
        }
    }
}

pub struct DetailView<'a> {
    pub state: &'a mut DetailViewState,
    pub screen: &'a DetailScreen,
    pub is_favorite: bool,
    pub image_base_url: &'a str,
}

impl<'a> DetailView<'a> {
    pub fn new(
        state: &'a mut DetailViewState,
        screen: &'a DetailScreen,
        is_favorite: bool,
        image_base_url: &'a str,
    ) -> Self {
        Self {
            state,
            screen,
            is_favorite,
            image_base_url,
        }
    }

    fn body_lines(&self, movie: &MovieDetail) -> Vec<Line<'static>> {
        let dim = Style::default().fg(Color::Gray);
        let heart = if self.is_favorite {
            Span::styled("♥", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("♡", Style::default().fg(Color::Gray))
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    movie.movie.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                heart,
            ]),
            Line::raw(""),
        ];

        let mut metadata: Vec<Span> = Vec::new();
        if let Some(rating) = movie.movie.rating_label() {
            metadata.push(Span::styled(
                format!("★ {rating}"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(date) = movie.release_label() {
            metadata.push(Span::styled(date, dim));
        }
        if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
            metadata.push(Span::styled(format!("{runtime} min"), dim));
        }
        let mut joined: Vec<Span> = Vec::new();
        for (i, span) in metadata.into_iter().enumerate() {
            if i > 0 {
                joined.push(Span::styled("  •  ", Style::default().fg(Color::DarkGray)));
            }
            joined.push(span);
        }
        lines.push(Line::from(joined));

        if !movie.genres.is_empty() {
            let mut chips: Vec<Span> = Vec::new();
            for name in movie.genre_names() {
                chips.push(Span::styled(
                    format!(" {name} "),
                    Style::default().fg(Color::White).bg(Color::Red),
                ));
                chips.push(Span::raw(" "));
            }
            lines.push(Line::raw(""));
            lines.push(Line::from(chips));
        }

        lines.push(Line::raw(""));
        if movie.overview.trim().is_empty() {
            lines.push(Line::styled("No overview available.", dim));
        } else {
            lines.push(Line::raw(movie.overview.clone()));
        }

        if let Some(url) = movie.movie.poster_url(self.image_base_url) {
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("Poster: ", dim),
                Span::styled(url, Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)),
            ]));
        }
        lines
    }

    fn render_centered(frame: &mut Frame, area: Rect, line: Line<'static>) {
        let [center] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), center);
    }
}

impl Component for DetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.screen.loading {
            Self::render_centered(
                frame,
                area,
                Line::styled("Loading details...", Style::default().fg(Color::Red)),
            );
            return;
        }

        let Some(movie) = self.screen.movie.as_ref() else {
            let message = self
                .screen
                .error
                .clone()
                .unwrap_or_else(|| "Movie details unavailable".to_string());
            Self::render_centered(
                frame,
                area,
                Line::styled(
                    format!("Could not load movie: {message}"),
                    Style::default().fg(Color::Red),
                ),
            );
            return;
        };

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let paragraph = Paragraph::new(self.body_lines(movie)).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
