//! Role list screen: identity header, filter bar, and the windowed role
//! table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use rolescope_core::role::format_date;
use rolescope_core::{ListState, ListView};

use crate::theme::Theme;

use super::{draw_help, draw_status_bar, truncate, vertical};

const NAME_WIDTH: usize = 40;
const DATE_WIDTH: usize = 12;

pub fn draw(frame: &mut Frame<'_>, view: &ListView, theme: &Theme) {
    let filtering = matches!(view.state(), ListState::Filtering);
    let mut constraints = vec![Constraint::Length(6)];
    if filtering {
        constraints.push(Constraint::Length(2));
    }
    constraints.extend([
        Constraint::Min(7),
        Constraint::Length(1),
        Constraint::Length(1),
    ]);
    let chunks = vertical(frame.area(), &constraints);

    let mut next = 0;
    let header_area = chunks[next];
    next += 1;
    let filter_area = if filtering {
        let area = chunks[next];
        next += 1;
        Some(area)
    } else {
        None
    };
    let table_area = chunks[next];
    let status_area = chunks[next + 1];
    let help_area = chunks[next + 2];

    draw_header(frame, header_area, view, theme);
    if let Some(area) = filter_area {
        draw_filter_bar(frame, area, view, theme);
    }
    draw_table(frame, table_area, view, theme);
    draw_status_bar(
        frame,
        status_area,
        view.profile(),
        view.region(),
        view.filter().filtered().len(),
        theme,
    );
    let help: &[(&str, &str)] = if filtering {
        &[("Enter", "apply"), ("Esc", "cancel")]
    } else {
        &[
            ("j/k", "navigate"),
            ("g/G", "first/last"),
            ("/", "filter"),
            ("Enter", "details"),
            ("q", "quit"),
        ]
    };
    draw_help(frame, help_area, help, theme);
}

/// Identity block on the left, product name on the right.
fn draw_header(frame: &mut Frame<'_>, area: Rect, view: &ListView, theme: &Theme) {
    let columns = Layout::horizontal([Constraint::Min(20), Constraint::Length(12)]).split(area);

    let mut lines = Vec::new();
    if let Some(identity) = view.identity() {
        lines.push(info_line("Account:", &identity.account, theme));
        lines.push(info_line("User:", &identity.display_name, theme));
        lines.push(info_line("Region:", view.region(), theme));
        if !view.profile().is_empty() && view.profile() != "default" {
            lines.push(info_line("Profile:", view.profile(), theme));
        }
    } else {
        lines.push(info_line("Profile:", view.profile(), theme));
        lines.push(info_line("Region:", view.region(), theme));
    }
    frame.render_widget(Paragraph::new(lines), columns[0]);

    let banner = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled("rolescope", theme.style_label())).right_aligned(),
    ]);
    frame.render_widget(banner, columns[1]);
}

fn info_line<'a>(label: &'a str, value: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(label, theme.style_label()),
        Span::raw(" "),
        Span::styled(value, theme.style_default()),
    ])
}

fn draw_filter_bar(frame: &mut Frame<'_>, area: Rect, view: &ListView, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("  Filter: ", theme.style_label()),
        Span::styled(view.filter().query(), theme.style_default()),
        Span::styled("▌", theme.style_default()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_table(frame: &mut Frame<'_>, area: Rect, view: &ListView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.style_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description_width =
        (inner.width as usize).saturating_sub(NAME_WIDTH + DATE_WIDTH * 2 + 3);
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<NAME_WIDTH$} {:<DATE_WIDTH$} {:<DATE_WIDTH$} {}",
            "Role Name", "Created", "Last Used", "Description"
        ),
        theme.style_label(),
    ))];

    let (start, end) = view.window();
    for (index, role) in view.filter().filtered()[start..end].iter().enumerate() {
        let cursor_here = start + index == view.filter().cursor();
        let created = format_date(role.create_date);
        let last_used = role
            .last_used
            .map_or_else(|| "Never".to_string(), format_date);
        let text = format!(
            "{:<NAME_WIDTH$} {:<DATE_WIDTH$} {:<DATE_WIDTH$} {}",
            truncate(&role.name, NAME_WIDTH - 1),
            truncate(&created, DATE_WIDTH - 1),
            truncate(&last_used, DATE_WIDTH - 1),
            truncate(&role.description, description_width.max(8)),
        );
        let style = if cursor_here {
            theme.style_highlight()
        } else {
            theme.style_default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    if view.filter().filtered().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No roles match the current filter",
            theme.style_muted(),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
