//! Rendering: a pure function of reducer state onto a ratatui frame.

mod detail;
mod document;
mod list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use rolescope_core::{App, AppState, ListState};

use crate::theme::Theme;

/// Render the whole application.
pub fn draw(frame: &mut Frame<'_>, app: &App, theme: &Theme) {
    match app.state() {
        AppState::Loading => draw_message(frame, "Loading roles...", theme.style_loading()),
        AppState::Error(message) => draw_error(frame, message, theme),
        AppState::List(view) => match view.state() {
            ListState::DetailLoading => {
                draw_message(frame, "Loading role details...", theme.style_loading());
            }
            ListState::ShowingDetail(detail_view) => detail::draw(frame, detail_view, theme),
            ListState::Browsing | ListState::Filtering => list::draw(frame, view, theme),
        },
    }
}

fn draw_message(frame: &mut Frame<'_>, message: &str, style: Style) {
    let area = frame.area();
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(format!("  {message}"), style)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_error(frame: &mut Frame<'_>, message: &str, theme: &Theme) {
    let area = frame.area();
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("  Error: {message}"),
            theme.style_error(),
        )),
        Line::default(),
        Line::from(Span::styled("  Press 'q' to quit.", theme.style_muted())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Status bar: profile and region on the left, entry count on the right.
fn draw_status_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    profile: &str,
    region: &str,
    count: usize,
    theme: &Theme,
) {
    let label = if count == 1 { "role" } else { "roles" };
    let text = format!(" {profile} │ {region} │ {count} {label} ");
    let paragraph = Paragraph::new(Line::from(Span::raw(text))).style(theme.style_status_bar());
    frame.render_widget(paragraph, area);
}

/// Help line built from key/description pairs.
fn draw_help(frame: &mut Frame<'_>, area: Rect, entries: &[(&str, &str)], theme: &Theme) {
    let mut spans = Vec::with_capacity(entries.len() * 3);
    for (index, (key, description)) in entries.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" │ ", theme.style_muted()));
        }
        spans.push(Span::styled(*key, theme.style_label()));
        spans.push(Span::styled(format!(" {description}"), theme.style_muted()));
    }
    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

/// Truncate to at most `max` characters, ellipsizing longer text.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Split `area` into vertical chunks.
fn vertical(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::vertical(constraints.to_vec()).split(area).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_preserves_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
    }

    #[test]
    fn truncate_ellipsizes_long_text() {
        assert_eq!(truncate("a-much-longer-name", 10), "a-much-...");
        assert_eq!(truncate("a-much-longer-name", 10).chars().count(), 10);
    }

    #[test]
    fn truncate_is_char_safe() {
        // Multi-byte characters must not split.
        let text = "ÅÅÅÅÅÅÅÅÅÅÅÅ";
        assert_eq!(truncate(text, 6).chars().count(), 6);
    }
}
