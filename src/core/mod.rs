//! # Core Application Logic
//!
//! Reel's business logic. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Store (reducer)      │
//!                    │  • App (screen state)   │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No UI. I/O as Effects. │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  TMDB API  │      │ favorites  │
//!     │  Adapter   │      │  (reqwest) │      │   (JSON)   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`]: `MovieState`, `StoreAction` and the pure `reduce()`
//! - [`state`]: the `App` struct and per-screen state
//! - [`action`]: the `Action` enum, `update()` and the `Effect`s it requests
//! - [`config`]: settings resolution
//! - [`favorites`]: favorite list persistence

pub mod action;
pub mod config;
pub mod favorites;
pub mod state;
pub mod store;
