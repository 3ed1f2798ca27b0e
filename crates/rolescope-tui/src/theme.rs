//! Semantic color palette for the dashboard.
//!
//! Render functions take a [`Theme`] by reference and never reach for
//! ambient color constants; every color here has a purpose, not a hue.

use ratatui::style::{Color, Modifier, Style};

/// Immutable semantic palette passed into every render function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // ── Surfaces ──
    /// Primary text.
    pub fg: Color,
    /// Secondary / muted text (help lines, empty states).
    pub fg_muted: Color,
    /// Selection highlight background.
    pub highlight_bg: Color,
    /// Selection highlight foreground.
    pub highlight_fg: Color,

    // ── Chrome ──
    /// Panel borders.
    pub border: Color,
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground.
    pub status_bar_fg: Color,
    /// Accent for titles, labels, and the active tab.
    pub accent: Color,

    // ── Feedback ──
    /// Error text.
    pub error: Color,
    /// Loading / in-progress text.
    pub loading: Color,

    // ── Search ──
    /// Background of a non-current search match.
    pub search_match_bg: Color,
    /// Foreground of a non-current search match.
    pub search_match_fg: Color,
    /// Background of the current search match.
    pub search_current_bg: Color,
    /// Foreground of the current search match.
    pub search_current_fg: Color,
}

impl Theme {
    /// Dark palette (default).
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            fg: Color::Rgb(220, 220, 220),
            fg_muted: Color::Rgb(150, 150, 150),
            highlight_bg: Color::Rgb(60, 60, 70),
            highlight_fg: Color::Rgb(255, 255, 255),
            border: Color::Rgb(70, 70, 70),
            status_bar_bg: Color::Rgb(45, 45, 45),
            status_bar_fg: Color::Rgb(220, 220, 220),
            accent: Color::Rgb(100, 160, 240),
            error: Color::Rgb(240, 80, 80),
            loading: Color::Rgb(240, 180, 50),
            search_match_bg: Color::Rgb(90, 90, 40),
            search_match_fg: Color::Rgb(230, 230, 230),
            search_current_bg: Color::Rgb(200, 160, 40),
            search_current_fg: Color::Rgb(20, 20, 20),
        }
    }

    /// Light palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            fg: Color::Rgb(30, 30, 30),
            fg_muted: Color::Rgb(100, 100, 100),
            highlight_bg: Color::Rgb(220, 225, 235),
            highlight_fg: Color::Rgb(0, 0, 0),
            border: Color::Rgb(200, 200, 200),
            status_bar_bg: Color::Rgb(235, 235, 235),
            status_bar_fg: Color::Rgb(30, 30, 30),
            accent: Color::Rgb(40, 100, 200),
            error: Color::Rgb(200, 50, 50),
            loading: Color::Rgb(180, 120, 20),
            search_match_bg: Color::Rgb(250, 240, 170),
            search_match_fg: Color::Rgb(30, 30, 30),
            search_current_bg: Color::Rgb(230, 180, 60),
            search_current_fg: Color::Rgb(20, 20, 20),
        }
    }

    // ─── Style Helpers ───────────────────────────────────────────────────

    /// Primary text.
    #[must_use]
    pub fn style_default(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Muted / secondary text.
    #[must_use]
    pub fn style_muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    /// Field labels and section titles.
    #[must_use]
    pub fn style_label(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// The selected row or policy entry.
    #[must_use]
    pub fn style_highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel borders.
    #[must_use]
    pub fn style_border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Status bar line.
    #[must_use]
    pub fn style_status_bar(&self) -> Style {
        Style::default().fg(self.status_bar_fg).bg(self.status_bar_bg)
    }

    /// Error text.
    #[must_use]
    pub fn style_error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Loading / in-progress text.
    #[must_use]
    pub fn style_loading(&self) -> Style {
        Style::default().fg(self.loading)
    }

    /// A search match that is not the current one.
    #[must_use]
    pub fn style_search_match(&self) -> Style {
        Style::default()
            .fg(self.search_match_fg)
            .bg(self.search_match_bg)
    }

    /// The current search match.
    #[must_use]
    pub fn style_search_current(&self) -> Style {
        Style::default()
            .fg(self.search_current_fg)
            .bg(self.search_current_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// The active tab title.
    #[must_use]
    pub fn style_tab_active(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive tab titles.
    #[must_use]
    pub fn style_tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
