//! Policy document viewer: windowed body with search-match highlighting.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use rolescope_core::{DetailView, DocumentView, SearchMatch};

use crate::theme::Theme;

use super::{draw_help, draw_status_bar, vertical};

pub fn draw(frame: &mut Frame<'_>, view: &DetailView, doc: &DocumentView, theme: &Theme) {
    let searching = doc.search().is_active();
    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(7),
    ];
    if searching {
        constraints.push(Constraint::Length(2));
    }
    constraints.extend([Constraint::Length(1), Constraint::Length(1)]);
    let chunks = vertical(frame.area(), &constraints);

    let title = Paragraph::new(Line::from(Span::styled(
        format!("  Policy Document: {}", doc.title()),
        theme.style_label(),
    )));
    frame.render_widget(title, chunks[0]);

    draw_body(frame, chunks[2], doc, theme);

    let mut next = 3;
    if searching {
        draw_search_bar(frame, chunks[next], doc, theme);
        next += 1;
    }
    draw_status_bar(
        frame,
        chunks[next],
        view.profile(),
        view.region(),
        1,
        theme,
    );
    draw_help(frame, chunks[next + 1], help_entries(doc), theme);
}

fn help_entries(doc: &DocumentView) -> &'static [(&'static str, &'static str)] {
    if doc.search().is_active() {
        &[("Enter/Esc", "exit search")]
    } else if doc.search().matches().is_empty() {
        &[
            ("j/k", "scroll"),
            ("g/G", "top/bottom"),
            ("/", "search"),
            ("Esc", "back to policies"),
        ]
    } else {
        &[
            ("j/k", "scroll"),
            ("g/G", "top/bottom"),
            ("/", "search"),
            ("n/N", "next/prev match"),
            ("Esc", "back to policies"),
        ]
    }
}

fn draw_body(frame: &mut Frame<'_>, area: Rect, doc: &DocumentView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.style_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = doc.search().current_match();
    let lines: Vec<Line<'_>> = doc
        .body()
        .lines()
        .enumerate()
        .skip(doc.scroll())
        .take(inner.height as usize)
        .map(|(index, text)| highlight_line(text, index, doc.search().matches(), current, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render one line, splitting it around its search matches. The current
/// match gets a distinct treatment from the others.
fn highlight_line<'a>(
    text: &'a str,
    line_index: usize,
    matches: &[SearchMatch],
    current: Option<&SearchMatch>,
    theme: &Theme,
) -> Line<'a> {
    let line_matches: Vec<&SearchMatch> =
        matches.iter().filter(|m| m.line == line_index).collect();
    if line_matches.is_empty() {
        return Line::from(Span::styled(text, theme.style_default()));
    }

    let mut spans = Vec::with_capacity(line_matches.len() * 2 + 1);
    let mut cursor = 0;
    for found in line_matches {
        if found.start > cursor {
            spans.push(Span::styled(&text[cursor..found.start], theme.style_default()));
        }
        let is_current =
            current.is_some_and(|c| c.line == found.line && c.start == found.start);
        let style = if is_current {
            theme.style_search_current()
        } else {
            theme.style_search_match()
        };
        spans.push(Span::styled(&text[found.start..found.end], style));
        cursor = found.end;
    }
    if cursor < text.len() {
        spans.push(Span::styled(&text[cursor..], theme.style_default()));
    }
    Line::from(spans)
}

fn draw_search_bar(frame: &mut Frame<'_>, area: Rect, doc: &DocumentView, theme: &Theme) {
    let position = match (doc.search().current(), doc.search().matches().len()) {
        (Some(index), count) => format!(" ({}/{count})", index + 1),
        (None, _) if !doc.search().input().is_empty() => " (no matches)".to_string(),
        _ => String::new(),
    };
    let line = Line::from(vec![
        Span::styled("  /", theme.style_label()),
        Span::styled(doc.search().input(), theme.style_default()),
        Span::styled("▌", theme.style_default()),
        Span::styled(position, theme.style_muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_for(line: usize) -> Vec<SearchMatch> {
        vec![
            SearchMatch {
                line,
                start: 0,
                end: 5,
                text: "Allow".to_string(),
            },
            SearchMatch {
                line,
                start: 9,
                end: 14,
                text: "Allow".to_string(),
            },
        ]
    }

    #[test]
    fn lines_without_matches_are_a_single_span() {
        let theme = Theme::dark();
        let line = highlight_line("plain text", 0, &[], None, &theme);
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn matches_split_the_line_into_alternating_spans() {
        let theme = Theme::dark();
        let matches = matches_for(0);
        let line = highlight_line("Allow or Allow it", 0, &matches, Some(&matches[1]), &theme);
        // match, separator, match, trailer
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].content, "Allow");
        assert_eq!(line.spans[1].content, " or ");
        assert_eq!(line.spans[2].content, "Allow");
        assert_eq!(line.spans[3].content, " it");
        // Current match styled differently from the other one.
        assert_ne!(line.spans[0].style, line.spans[2].style);
    }

    #[test]
    fn matches_on_other_lines_do_not_leak() {
        let theme = Theme::dark();
        let matches = matches_for(3);
        let line = highlight_line("Allow or Allow it", 0, &matches, None, &theme);
        assert_eq!(line.spans.len(), 1);
    }
}
