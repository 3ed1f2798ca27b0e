//! Role detail view: tabbed browsing and the nested policy-document viewer.
//!
//! The view is a state machine with three states: browsing one of the four
//! fixed tabs, waiting for a policy document to load, and viewing a loaded
//! document (which carries its own orthogonal search mode). Leaving the view
//! is owned by the caller: the list pops the detail only when
//! [`DetailView::is_at_root`] reports the machine is outside the nested
//! document state, so one keypress never skips two levels of nesting.

use std::rc::Rc;

use crossterm::event::KeyCode;

use crate::document;
use crate::error::SourceError;
use crate::identity::CallerIdentity;
use crate::input::{self, InputEvent, KeyAction, Keymap};
use crate::logging::TARGET;
use crate::msg::Outcome;
use crate::role::{PolicyRef, Role};
use crate::scroll;
use crate::search::DocumentSearch;
use crate::source::{self, FetchRequest, PolicyTarget};

/// Rows taken by chrome around the tab content (title, tab bar, borders,
/// status bar, help line).
pub const DETAIL_CHROME_ROWS: usize = 6;
/// Rows taken by chrome around a policy document (title, borders, status
/// bar, help line, spacing).
pub const DOC_CHROME_ROWS: usize = 6;
/// Extra rows reserved while the search bar is open.
pub const SEARCH_BAR_ROWS: usize = 2;
/// Content never shrinks below this many rows.
pub const MIN_CONTENT_ROWS: usize = 5;

// ─── Tabs ───────────────────────────────────────────────────────────────────

/// The four fixed detail tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    TrustPolicy,
    Policies,
    Tags,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 4] = [Self::Overview, Self::TrustPolicy, Self::Policies, Self::Tags];

    /// Tab title for the tab bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::TrustPolicy => "Trust Policy",
            Self::Policies => "Policies",
            Self::Tags => "Tags",
        }
    }

    /// Position in display order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::TrustPolicy => 1,
            Self::Policies => 2,
            Self::Tags => 3,
        }
    }

    /// Next tab, wrapping past the end.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Overview => Self::TrustPolicy,
            Self::TrustPolicy => Self::Policies,
            Self::Policies => Self::Tags,
            Self::Tags => Self::Overview,
        }
    }

    /// Previous tab, wrapping past the start.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Overview => Self::Tags,
            Self::TrustPolicy => Self::Overview,
            Self::Policies => Self::TrustPolicy,
            Self::Tags => Self::Policies,
        }
    }
}

// ─── Policy Document Viewer ─────────────────────────────────────────────────

/// What the document viewer did with an input event.
enum DocEvent {
    /// Dismiss the document, returning to the tab view.
    Close,
    Consumed,
    Ignored,
}

/// A loaded policy document with scroll position and search state.
#[derive(Debug)]
pub struct DocumentView {
    title: String,
    body: String,
    scroll: usize,
    search: DocumentSearch,
}

impl DocumentView {
    fn new(title: String, body: String) -> Self {
        Self {
            title,
            body,
            scroll: 0,
            search: DocumentSearch::new(),
        }
    }

    /// Title line for the viewer (policy name, or `Error`).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full document text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Current scroll offset in lines.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Search state over this document.
    #[must_use]
    pub fn search(&self) -> &DocumentSearch {
        &self.search
    }

    /// Number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        document::line_count(&self.body)
    }

    /// Content rows available at the given terminal height.
    #[must_use]
    pub fn visible_height(total_height: u16, searching: bool) -> usize {
        let mut rows = (total_height as usize).saturating_sub(DOC_CHROME_ROWS);
        if searching {
            rows = rows.saturating_sub(SEARCH_BAR_ROWS);
        }
        rows.max(MIN_CONTENT_ROWS)
    }

    fn recenter(&mut self, visible: usize) {
        if let Some(found) = self.search.current_match() {
            self.scroll = scroll::centered_offset(found.line, self.line_count(), visible);
        }
    }

    fn handle_input(&mut self, event: &InputEvent, keymap: &Keymap, height: u16) -> DocEvent {
        let InputEvent::Key(code, modifiers) = event else {
            return DocEvent::Ignored;
        };
        let visible = Self::visible_height(height, self.search.is_active());

        if self.search.is_active() {
            // Confirm and cancel both drop input focus; matches stay live
            // for n/N navigation.
            if let Some(KeyAction::Dismiss | KeyAction::Activate) =
                keymap.resolve(*code, *modifiers)
            {
                self.search.deactivate();
                return DocEvent::Consumed;
            }
            match code {
                KeyCode::Char(c) if input::is_plain_char(*modifiers) => {
                    self.search.push_char(*c, &self.body);
                    self.recenter(visible);
                }
                KeyCode::Backspace => {
                    self.search.pop_char(&self.body);
                    self.recenter(visible);
                }
                _ => {}
            }
            return DocEvent::Consumed;
        }

        match keymap.resolve(*code, *modifiers) {
            Some(KeyAction::Dismiss) => DocEvent::Close,
            Some(KeyAction::StartSearch) => {
                self.search.activate();
                DocEvent::Consumed
            }
            Some(KeyAction::NextMatch) => {
                self.search.next();
                self.recenter(visible);
                DocEvent::Consumed
            }
            Some(KeyAction::PrevMatch) => {
                self.search.previous();
                self.recenter(visible);
                DocEvent::Consumed
            }
            Some(KeyAction::Down) => {
                self.scroll = scroll::scroll_down(self.scroll, self.line_count(), visible);
                DocEvent::Consumed
            }
            Some(KeyAction::Up) => {
                self.scroll = scroll::scroll_up(self.scroll);
                DocEvent::Consumed
            }
            Some(KeyAction::First) => {
                self.scroll = 0;
                DocEvent::Consumed
            }
            Some(KeyAction::Last) => {
                self.scroll = scroll::max_offset(self.line_count(), visible);
                DocEvent::Consumed
            }
            _ => DocEvent::Ignored,
        }
    }
}

// ─── Detail View State Machine ──────────────────────────────────────────────

/// Sub-state of the detail view.
#[derive(Debug)]
pub enum DetailState {
    /// Browsing one of the four tabs.
    NormalTab,
    /// A policy-document fetch is outstanding.
    PolicyLoading,
    /// Viewing a loaded policy document.
    PolicyDocument(DocumentView),
}

/// Detail view over one role, shared by reference with the list.
#[derive(Debug)]
pub struct DetailView {
    role: Rc<Role>,
    identity: Option<Rc<CallerIdentity>>,
    profile: String,
    region: String,
    width: u16,
    height: u16,
    tab: Tab,
    scroll: usize,
    policy_cursor: usize,
    state: DetailState,
    policy_generation: u64,
}

impl DetailView {
    /// Create a detail view bound to a loaded role.
    #[must_use]
    pub fn new(
        role: Rc<Role>,
        identity: Option<Rc<CallerIdentity>>,
        profile: impl Into<String>,
        region: impl Into<String>,
        width: u16,
        height: u16,
    ) -> Self {
        Self {
            role,
            identity,
            profile: profile.into(),
            region: region.into(),
            width,
            height,
            tab: Tab::Overview,
            scroll: 0,
            policy_cursor: 0,
            state: DetailState::NormalTab,
            policy_generation: 0,
        }
    }

    /// The role being shown.
    #[must_use]
    pub fn role(&self) -> &Rc<Role> {
        &self.role
    }

    /// Caller identity, when resolved.
    #[must_use]
    pub fn identity(&self) -> Option<&Rc<CallerIdentity>> {
        self.identity.as_ref()
    }

    /// Profile label for the status bar.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Region label for the status bar.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Active tab.
    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Scroll offset of the active tab.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Flattened policy selection index (Policies tab).
    #[must_use]
    pub fn policy_cursor(&self) -> usize {
        self.policy_cursor
    }

    /// Current sub-state.
    #[must_use]
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Terminal size last seen by this view.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Whether the machine is outside the nested document state.
    ///
    /// The list view only pops the detail when this holds, so dismissing a
    /// policy document never also dismisses the detail view.
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        matches!(
            self.state,
            DetailState::NormalTab | DetailState::PolicyLoading
        )
    }

    /// Content rows available for tab bodies.
    #[must_use]
    pub fn content_height(&self) -> usize {
        (self.height as usize)
            .saturating_sub(DETAIL_CHROME_ROWS)
            .max(MIN_CONTENT_ROWS)
    }

    /// Lines the active tab renders as; bounds manual scrolling.
    #[must_use]
    pub fn tab_line_count(&self) -> usize {
        match self.tab {
            // Section title + blank + one line per field.
            Tab::Overview => {
                let fields = if self.role.last_used.is_some() { 7 } else { 6 };
                2 + fields
            }
            Tab::TrustPolicy => 2 + document::line_count(&self.role.trust_policy),
            // Selection-driven; scrolling does not apply.
            Tab::Policies => 0,
            Tab::Tags => 2 + self.role.tags.len().max(1),
        }
    }

    /// Propagate a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Process one input event.
    pub fn handle_input(&mut self, event: &InputEvent, keymap: &Keymap) -> Outcome {
        if let InputEvent::Resize(width, height) = event {
            self.resize(*width, *height);
            return Outcome::Consumed;
        }

        let height = self.height;
        if let DetailState::PolicyDocument(doc) = &mut self.state {
            return match doc.handle_input(event, keymap, height) {
                DocEvent::Close => {
                    self.state = DetailState::NormalTab;
                    self.scroll = 0;
                    Outcome::Consumed
                }
                DocEvent::Consumed => Outcome::Consumed,
                DocEvent::Ignored => Outcome::Ignored,
            };
        }
        self.handle_tab_input(event, keymap)
    }

    fn handle_tab_input(&mut self, event: &InputEvent, keymap: &Keymap) -> Outcome {
        let InputEvent::Key(code, modifiers) = event else {
            return Outcome::Ignored;
        };
        let Some(action) = keymap.resolve(*code, *modifiers) else {
            return Outcome::Ignored;
        };
        match action {
            KeyAction::NextTab => {
                self.select_tab(self.tab.next());
                Outcome::Consumed
            }
            KeyAction::PrevTab => {
                self.select_tab(self.tab.previous());
                Outcome::Consumed
            }
            KeyAction::Down => {
                if self.tab == Tab::Policies {
                    let count = self.role.policy_count();
                    if count > 0 && self.policy_cursor + 1 < count {
                        self.policy_cursor += 1;
                    }
                } else {
                    self.scroll = scroll::scroll_down(
                        self.scroll,
                        self.tab_line_count(),
                        self.content_height(),
                    );
                }
                Outcome::Consumed
            }
            KeyAction::Up => {
                if self.tab == Tab::Policies {
                    self.policy_cursor = self.policy_cursor.saturating_sub(1);
                } else {
                    self.scroll = scroll::scroll_up(self.scroll);
                }
                Outcome::Consumed
            }
            KeyAction::First => {
                self.scroll = 0;
                self.policy_cursor = 0;
                Outcome::Consumed
            }
            KeyAction::Last => {
                if self.tab == Tab::Policies {
                    let count = self.role.policy_count();
                    if count > 0 {
                        self.policy_cursor = count - 1;
                    }
                } else {
                    self.scroll =
                        scroll::max_offset(self.tab_line_count(), self.content_height());
                }
                Outcome::Consumed
            }
            KeyAction::Activate => {
                if self.tab == Tab::Policies {
                    self.activate_selected_policy()
                } else {
                    Outcome::Consumed
                }
            }
            // Dismissal of the whole view is owned by the list-level guard.
            _ => Outcome::Ignored,
        }
    }

    fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.scroll = 0;
        self.policy_cursor = 0;
    }

    fn activate_selected_policy(&mut self) -> Outcome {
        if matches!(self.state, DetailState::PolicyLoading) {
            // One document fetch in flight at a time.
            return Outcome::Consumed;
        }
        let Some(policy) = self.role.policy_at(self.policy_cursor) else {
            return Outcome::Consumed;
        };
        let target = match policy {
            PolicyRef::Managed(managed) => PolicyTarget::Managed {
                name: managed.name.clone(),
                arn: managed.arn.clone(),
            },
            PolicyRef::Inline(name) => PolicyTarget::Inline {
                role_name: self.role.name.clone(),
                policy_name: name.to_string(),
            },
        };
        self.policy_generation = source::next_generation();
        self.state = DetailState::PolicyLoading;
        Outcome::Fetch(FetchRequest::PolicyDocument {
            target,
            generation: self.policy_generation,
        })
    }

    /// Apply a policy-document fetch completion.
    ///
    /// Completions are discarded unless a fetch is outstanding and the
    /// generation matches the request this view last issued; a result that
    /// arrives after the user navigated away must not resurrect the viewer.
    pub fn apply_policy_result(
        &mut self,
        generation: u64,
        name: &str,
        result: Result<String, SourceError>,
    ) {
        if !matches!(self.state, DetailState::PolicyLoading)
            || generation != self.policy_generation
        {
            tracing::debug!(
                target: TARGET,
                generation,
                policy = %name,
                "discarding stale policy document completion"
            );
            return;
        }
        let (title, body) = match result {
            Ok(raw) => (name.to_string(), document::format_json(&raw)),
            Err(err) => {
                tracing::warn!(target: TARGET, policy = %name, error = %err, "policy document load failed");
                ("Error".to_string(), format!("Error loading policy: {err}"))
            }
        };
        self.state = DetailState::PolicyDocument(DocumentView::new(title, body));
    }
}
