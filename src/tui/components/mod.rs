//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: status line and error banner
//! - `MovieCard`: one movie summary in the grid
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchBox`: search-as-you-type field
//! - `MovieGrid`: selectable two-column grid with infinite scroll
//! - `DetailView`: scrollable movie detail page
//!
//! Stateful components keep their persistent state in `TuiState` and are
//! wrapped by a transient struct each frame that borrows that state along
//! with its props.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (status line)
//! ├── movie_card.rs    (grid cell)
//! ├── movie_grid.rs    (list screen body)
//! ├── search_box.rs    (search input)
//! └── detail_view.rs   (detail screen body)
//! ```

pub mod detail_view;
pub mod movie_card;
pub mod movie_grid;
pub mod search_box;
mod title_bar;

pub use detail_view::{DetailEvent, DetailView, DetailViewState};
pub use movie_grid::{GridEvent, MovieGrid, MovieGridState};
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
