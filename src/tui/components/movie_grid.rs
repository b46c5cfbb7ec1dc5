//! # MovieGrid Component
//!
//! Two-column grid of `MovieCard`s for the list screen.
//!
//! ## Responsibilities
//!
//! - Keyboard selection (arrows, paging, Home/End)
//! - Keeping the selected row on screen
//! - Telling the parent when the selection nears the end ("infinite scroll")
//! - Loading, empty and "loading more" states
//!
//! `MovieGridState` is persistent (lives in `TuiState`); `MovieGrid` is a
//! transient wrapper created each frame with borrowed state and props.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::api::Movie;
use crate::core::store::Favorites;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::movie_card::{CARD_HEIGHT, MovieCard};
use crate::tui::event::TuiEvent;

pub const COLUMNS: usize = 2;

/// Fraction of a screen from the end at which more items are requested.
const END_REACHED_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Enter on a card; carries the index into the displayed list.
    Open(usize),
    /// Ctrl+F on a card.
    ToggleFavorite(usize),
    EndReached,
}

#[derive(Debug, Default)]
pub struct MovieGridState {
    pub selected: usize,
    /// First visible row.
    pub offset_row: usize,
    /// Rows that fit on screen, measured at last render.
    pub viewport_rows: usize,
    /// Number of displayed items, synced by the parent before handling events.
    pub item_count: usize,
}

impl MovieGridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset_row = 0;
    }

    fn total_rows(&self) -> usize {
        self.item_count.div_ceil(COLUMNS)
    }

    fn selected_row(&self) -> usize {
        self.selected / COLUMNS
    }

    /// Moves the selection by `delta` items, clamped to the list.
    fn move_by(&mut self, delta: isize) {
        if self.item_count == 0 {
            return;
        }
        let last = self.item_count - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// True when the selected row is within the threshold of the last row.
    fn near_end(&self) -> bool {
        if self.item_count == 0 {
            return false;
        }
        let threshold = ((self.viewport_rows as f32 * END_REACHED_THRESHOLD).ceil() as usize).max(1);
        self.total_rows().saturating_sub(self.selected_row() + 1) < threshold
    }

    /// Scrolls so the selected row is visible.
    pub fn ensure_visible(&mut self) {
        let rows = self.viewport_rows.max(1);
        let row = self.selected_row();
        if row < self.offset_row {
            self.offset_row = row;
        } else if row >= self.offset_row + rows {
            self.offset_row = row + 1 - rows;
        }
    }
}

impl EventHandler for MovieGridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<GridEvent> {
        if self.item_count == 0 {
            return None;
        }
        let page = (self.viewport_rows.max(1) * COLUMNS) as isize;
        let before = self.selected;
        match event {
            TuiEvent::Submit => return Some(GridEvent::Open(self.selected)),
            TuiEvent::ToggleFavorite => return Some(GridEvent::ToggleFavorite(self.selected)),
            TuiEvent::CursorLeft => self.move_by(-1),
            TuiEvent::CursorRight => self.move_by(1),
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.move_by(-(COLUMNS as isize)),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.move_by(COLUMNS as isize),
            TuiEvent::PageUp => self.move_by(-page),
            TuiEvent::PageDown => self.move_by(page),
            TuiEvent::Home => self.selected = 0,
            TuiEvent::End => self.selected = self.item_count - 1,
            _ => return None,
        }
        self.ensure_visible();

        let moved_forward = self.selected > before
            || matches!(event, TuiEvent::CursorDown | TuiEvent::ScrollDown | TuiEvent::PageDown | TuiEvent::End);
        if moved_forward && self.near_end() {
            Some(GridEvent::EndReached)
        } else {
            None
        }
    }
}

pub struct MovieGrid<'a> {
    pub state: &'a mut MovieGridState,
    pub movies: &'a [Movie],
    pub favorites: &'a Favorites,
    pub loading: bool,
    pub loading_more: bool,
    pub searching: bool,
}

impl<'a> MovieGrid<'a> {
    pub fn new(
        state: &'a mut MovieGridState,
        movies: &'a [Movie],
        favorites: &'a Favorites,
        loading: bool,
        loading_more: bool,
        searching: bool,
    ) -> Self {
        Self {
            state,
            movies,
            favorites,
            loading,
            loading_more,
            searching,
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
        let [center] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let paragraph = Paragraph::new(Line::styled(
            text.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, center);
    }
}

impl Component for MovieGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.item_count = self.movies.len();
        if self.state.selected >= self.movies.len() {
            self.state.selected = self.movies.len().saturating_sub(1);
        }

        if self.loading && !self.loading_more {
            Self::render_message(frame, area, "Loading movies...", Color::Red);
            return;
        }
        if self.movies.is_empty() {
            let text = if self.searching {
                "No movies found"
            } else {
                "No movies available"
            };
            Self::render_message(frame, area, text, Color::DarkGray);
            return;
        }

        let footer_height = if self.loading_more { 1 } else { 0 };
        let [grid_area, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(footer_height)]).areas(area);

        self.state.viewport_rows = (grid_area.height / CARD_HEIGHT).max(1) as usize;
        self.state.ensure_visible();

        let visible = self
            .movies
            .chunks(COLUMNS)
            .enumerate()
            .skip(self.state.offset_row)
            .take(self.state.viewport_rows);

        for (screen_row, (row, chunk)) in visible.enumerate() {
            let y = grid_area.y + screen_row as u16 * CARD_HEIGHT;
            if y + CARD_HEIGHT > grid_area.y + grid_area.height {
                break;
            }
            let row_area = Rect::new(grid_area.x, y, grid_area.width, CARD_HEIGHT);
            let cells = Layout::horizontal([Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
                .spacing(1)
                .split(row_area);
            for (col, movie) in chunk.iter().enumerate() {
                let index = row * COLUMNS + col;
                let mut card = MovieCard::new(
                    movie,
                    index == self.state.selected,
                    self.favorites.contains(movie.id),
                );
                card.render(frame, cells[col]);
            }
        }

        if self.loading_more {
            frame.render_widget(
                Paragraph::new("Loading more...")
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                footer_area,
            );
        }
    }
}
