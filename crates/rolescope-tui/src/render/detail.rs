//! Role detail screen: title, tab bar, and the active tab body.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use rolescope_core::role::format_datetime;
use rolescope_core::{DetailState, DetailView, PolicyRef, Tab};

use crate::theme::Theme;

use super::{document, draw_help, draw_status_bar, vertical};

pub fn draw(frame: &mut Frame<'_>, view: &DetailView, theme: &Theme) {
    if let DetailState::PolicyDocument(doc) = view.state() {
        document::draw(frame, view, doc, theme);
        return;
    }

    let chunks = vertical(
        frame.area(),
        &[
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(1),
        ],
    );

    let title = Paragraph::new(Line::from(Span::styled(
        format!("  Role: {}", view.role().name),
        theme.style_label(),
    )));
    frame.render_widget(title, chunks[0]);

    let titles: Vec<Line<'_>> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(view.tab().index())
        .highlight_style(theme.style_tab_active())
        .style(theme.style_tab_inactive());
    frame.render_widget(tabs, chunks[1]);

    draw_tab_body(frame, chunks[2], view, theme);
    draw_status_bar(
        frame,
        chunks[3],
        view.profile(),
        view.region(),
        1,
        theme,
    );
    draw_help(frame, chunks[4], help_entries(view), theme);
}

fn help_entries(view: &DetailView) -> &'static [(&'static str, &'static str)] {
    if view.tab() == Tab::Policies && view.role().policy_count() > 0 {
        &[
            ("Tab/l", "next tab"),
            ("j/k", "navigate"),
            ("Enter", "view policy"),
            ("Esc", "back"),
        ]
    } else {
        &[
            ("Tab/l", "next tab"),
            ("Shift+Tab/h", "prev tab"),
            ("j/k", "scroll"),
            ("Esc", "back"),
        ]
    }
}

fn draw_tab_body(frame: &mut Frame<'_>, area: Rect, view: &DetailView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.style_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match view.tab() {
        Tab::Overview => overview_lines(view, theme),
        Tab::TrustPolicy => trust_policy_lines(view, theme),
        Tab::Policies => policy_lines(view, theme),
        Tab::Tags => tag_lines(view, theme),
    };

    // The Policies tab is selection-driven; the text tabs scroll.
    let visible: Vec<Line<'_>> = if view.tab() == Tab::Policies {
        lines
    } else {
        lines
            .into_iter()
            .skip(view.scroll())
            .take(inner.height as usize)
            .collect()
    };
    frame.render_widget(Paragraph::new(visible), inner);
}

fn field_line<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}:"), theme.style_label()),
        Span::raw(" "),
        Span::styled(value, theme.style_default()),
    ])
}

fn overview_lines<'a>(view: &'a DetailView, theme: &Theme) -> Vec<Line<'a>> {
    let role = view.role();
    let mut lines = vec![
        Line::from(Span::styled("Role Information", theme.style_label())),
        Line::default(),
        field_line("ARN", role.arn.clone(), theme),
        field_line("Role ID", role.role_id.clone(), theme),
        field_line("Path", role.path.clone(), theme),
        field_line("Created", format_datetime(role.create_date), theme),
        field_line("Description", role.description.clone(), theme),
        field_line(
            "Max Session",
            format!("{} seconds", role.max_session_duration),
            theme,
        ),
    ];
    if let Some(last_used) = role.last_used {
        lines.push(field_line("Last Used", format_datetime(last_used), theme));
    }
    lines
}

fn trust_policy_lines<'a>(view: &'a DetailView, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled("Trust Relationships", theme.style_label())),
        Line::default(),
    ];
    lines.extend(
        view.role()
            .trust_policy
            .lines()
            .map(|line| Line::from(Span::styled(line, theme.style_default()))),
    );
    lines
}

fn policy_lines<'a>(view: &'a DetailView, theme: &Theme) -> Vec<Line<'a>> {
    let role = view.role();
    let mut lines = vec![
        Line::from(Span::styled("Attached Policies", theme.style_label())),
        Line::default(),
    ];

    if matches!(view.state(), DetailState::PolicyLoading) {
        lines.push(Line::from(Span::styled(
            "Loading policy document...",
            theme.style_loading(),
        )));
        return lines;
    }

    if role.policy_count() == 0 {
        lines.push(Line::from(Span::styled(
            "No policies attached",
            theme.style_muted(),
        )));
        return lines;
    }

    let mut flattened = 0;
    if !role.managed_policies.is_empty() {
        lines.push(Line::from(Span::styled(
            "Managed Policies:",
            theme.style_label(),
        )));
        for _ in &role.managed_policies {
            lines.push(policy_entry(role_policy_name(view, flattened), flattened == view.policy_cursor(), theme));
            flattened += 1;
        }
        lines.push(Line::default());
    }
    if !role.inline_policies.is_empty() {
        lines.push(Line::from(Span::styled(
            "Inline Policies:",
            theme.style_label(),
        )));
        for _ in &role.inline_policies {
            lines.push(policy_entry(role_policy_name(view, flattened), flattened == view.policy_cursor(), theme));
            flattened += 1;
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press Enter to view the selected policy document",
        theme.style_muted(),
    )));
    lines
}

fn role_policy_name(view: &DetailView, index: usize) -> &str {
    match view.role().policy_at(index) {
        Some(PolicyRef::Managed(policy)) => &policy.name,
        Some(PolicyRef::Inline(name)) => name,
        None => "",
    }
}

fn policy_entry<'a>(name: &'a str, selected: bool, theme: &Theme) -> Line<'a> {
    let style = if selected {
        theme.style_highlight()
    } else {
        theme.style_default()
    };
    Line::from(Span::styled(format!("  • {name}"), style))
}

fn tag_lines<'a>(view: &'a DetailView, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled("Tags", theme.style_label())),
        Line::default(),
    ];
    if view.role().tags.is_empty() {
        lines.push(Line::from(Span::styled("No tags", theme.style_muted())));
        return lines;
    }
    for tag in &view.role().tags {
        lines.push(Line::from(vec![
            Span::styled(format!("{}:", tag.key), theme.style_label()),
            Span::raw(" "),
            Span::styled(tag.value.as_str(), theme.style_default()),
        ]));
    }
    lines
}
