//! Terminal frontend for the rolescope role dashboard.
//!
//! Builds on [`rolescope_core`] for all navigation and search state; this
//! crate owns rendering (ratatui + crossterm), the semantic theme palette,
//! and the background executor that runs fetch requests off the UI thread.

#![forbid(unsafe_code)]

pub mod executor;
pub mod render;
pub mod theme;

pub use executor::spawn_fetch;
pub use theme::Theme;
