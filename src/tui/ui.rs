use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{DetailView, MovieGrid, TitleBar};
use crate::tui::TuiState;

const LIST_HINTS: &str = " ←↑↓→ Move  Enter Open  ^F Favorite  ^R Refresh  Esc Clear/Quit ";
const DETAIL_HINTS: &str = " ↑↓ Scroll  f Favorite  Esc Back  ^C Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area, hint_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let state = app.state();
    let (title, hints) = match app.detail {
        Some(_) => ("Movie Details", DETAIL_HINTS),
        None => ("Movie Browser", LIST_HINTS),
    };
    TitleBar::new(
        title,
        state.favorites.len(),
        state.loading || app.list.loading_more,
        state.error.as_deref(),
    )
    .render(frame, title_area);

    match &app.detail {
        Some(screen) => {
            DetailView::new(
                &mut tui.detail_view,
                screen,
                app.is_favorite(screen.movie_id),
                &app.image_base_url,
            )
            .render(frame, main_area);
        }
        None => draw_list(frame, main_area, app, tui),
    }

    frame.render_widget(
        Paragraph::new(Line::styled(hints, Style::default().fg(Color::DarkGray))),
        hint_area,
    );
}

fn draw_list(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [search_area, grid_area] = Layout::vertical([Length(3), Min(0)]).areas(area);

    tui.search_box.render(frame, search_area);

    let state = app.state();
    MovieGrid::new(
        &mut tui.grid,
        app.display_movies(),
        &state.favorites,
        state.loading,
        app.list.loading_more,
        app.list.searching,
    )
    .render(frame, grid_area);
}
