//! Role list view: browsing, incremental filtering, and the transition into
//! the detail view.
//!
//! The view owns the authoritative role collection and the filter state. At
//! most one role-detail fetch is outstanding at a time; while it is in
//! flight the user keeps full control of the cursor. A successful load
//! constructs a [`DetailView`] sharing the loaded role by reference; a
//! failed load drops silently back to browsing (the role may simply have
//! disappeared between listing and selection).

use std::rc::Rc;

use crossterm::event::KeyCode;

use crate::detail::{DetailView, MIN_CONTENT_ROWS};
use crate::error::SourceError;
use crate::filter::RoleFilter;
use crate::identity::CallerIdentity;
use crate::input::{self, InputEvent, KeyAction, Keymap};
use crate::logging::TARGET;
use crate::msg::Outcome;
use crate::role::Role;
use crate::scroll;
use crate::source::{self, FetchRequest};

/// Rows taken by chrome around the role table (identity header, column
/// header, borders, status bar, help line).
pub const LIST_CHROME_ROWS: usize = 11;
/// Extra rows reserved while the filter input is open.
pub const FILTER_BAR_ROWS: usize = 2;

/// Mode of the list view.
#[derive(Debug)]
pub enum ListState {
    /// Browsing the (possibly filtered) role collection.
    Browsing,
    /// The filter input has focus.
    Filtering,
    /// A role-detail fetch is outstanding.
    DetailLoading,
    /// A detail view is active and owns subsequent input.
    ShowingDetail(DetailView),
}

/// Role list view state machine.
#[derive(Debug)]
pub struct ListView {
    roles: Vec<Rc<Role>>,
    filter: RoleFilter,
    state: ListState,
    profile: String,
    region: String,
    identity: Option<Rc<CallerIdentity>>,
    width: u16,
    height: u16,
    detail_generation: u64,
}

impl ListView {
    /// Create a list view over a freshly loaded role collection.
    #[must_use]
    pub fn new(
        roles: Vec<Role>,
        profile: impl Into<String>,
        region: impl Into<String>,
        width: u16,
        height: u16,
    ) -> Self {
        let roles: Vec<Rc<Role>> = roles.into_iter().map(Rc::new).collect();
        let filter = RoleFilter::new(&roles);
        Self {
            roles,
            filter,
            state: ListState::Browsing,
            profile: profile.into(),
            region: region.into(),
            identity: None,
            width,
            height,
            detail_generation: 0,
        }
    }

    /// Attach the caller identity once resolved (may arrive after the list).
    pub fn set_identity(&mut self, identity: Option<Rc<CallerIdentity>>) {
        self.identity = identity;
    }

    /// The authoritative role collection.
    #[must_use]
    pub fn roles(&self) -> &[Rc<Role>] {
        &self.roles
    }

    /// Filter state (query, filtered sequence, cursor).
    #[must_use]
    pub fn filter(&self) -> &RoleFilter {
        &self.filter
    }

    /// Current mode.
    #[must_use]
    pub fn state(&self) -> &ListState {
        &self.state
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

    /// Caller identity, when resolved.
    #[must_use]
    pub fn identity(&self) -> Option<&Rc<CallerIdentity>> {
        self.identity.as_ref()
    }

    /// Terminal size last seen by this view.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Rows available for role entries at the current terminal size.
    #[must_use]
    pub fn visible_height(&self) -> usize {
        let mut rows = (self.height as usize).saturating_sub(LIST_CHROME_ROWS);
        if matches!(self.state, ListState::Filtering) {
            rows = rows.saturating_sub(FILTER_BAR_ROWS);
        }
        rows.max(MIN_CONTENT_ROWS)
    }

    /// The `[start, end)` window of filtered roles to render.
    #[must_use]
    pub fn window(&self) -> (usize, usize) {
        scroll::follow_window(
            self.filter.cursor(),
            self.filter.filtered().len(),
            self.visible_height(),
        )
    }

    /// Propagate a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let ListState::ShowingDetail(detail) = &mut self.state {
            detail.resize(width, height);
        }
    }

    /// Process one input event.
    pub fn handle_input(&mut self, event: &InputEvent, keymap: &Keymap) -> Outcome {
        if let InputEvent::Resize(width, height) = event {
            self.resize(*width, *height);
            return Outcome::Consumed;
        }

        if let ListState::ShowingDetail(detail) = &mut self.state {
            // Pop the detail only from its outermost state; a dismiss inside
            // the nested document viewer must not also close the detail.
            if detail.is_at_root()
                && let InputEvent::Key(code, modifiers) = event
                && matches!(
                    keymap.resolve(*code, *modifiers),
                    Some(KeyAction::Dismiss | KeyAction::Quit)
                )
            {
                self.state = ListState::Browsing;
                return Outcome::Consumed;
            }
            return detail.handle_input(event, keymap);
        }

        if matches!(self.state, ListState::Filtering) {
            return self.handle_filter_input(event, keymap);
        }
        self.handle_browse_input(event, keymap)
    }

    fn handle_filter_input(&mut self, event: &InputEvent, keymap: &Keymap) -> Outcome {
        let InputEvent::Key(code, modifiers) = event else {
            return Outcome::Ignored;
        };
        match keymap.resolve(*code, *modifiers) {
            Some(KeyAction::Dismiss) => {
                // Cancel: back to the full collection.
                self.filter.clear(&self.roles);
                self.state = ListState::Browsing;
                return Outcome::Consumed;
            }
            Some(KeyAction::Activate) => {
                // Confirm: keep the current filtered result.
                self.state = ListState::Browsing;
                return Outcome::Consumed;
            }
            _ => {}
        }
        match code {
            KeyCode::Char(c) if input::is_plain_char(*modifiers) => {
                self.filter.push_char(*c, &self.roles);
            }
            KeyCode::Backspace => {
                self.filter.pop_char(&self.roles);
            }
            _ => {}
        }
        Outcome::Consumed
    }

    fn handle_browse_input(&mut self, event: &InputEvent, keymap: &Keymap) -> Outcome {
        let InputEvent::Key(code, modifiers) = event else {
            return Outcome::Ignored;
        };
        let Some(action) = keymap.resolve(*code, *modifiers) else {
            return Outcome::Ignored;
        };
        match action {
            KeyAction::Quit => Outcome::Quit,
            KeyAction::Down => {
                self.filter.move_down();
                Outcome::Consumed
            }
            KeyAction::Up => {
                self.filter.move_up();
                Outcome::Consumed
            }
            KeyAction::First => {
                self.filter.move_first();
                Outcome::Consumed
            }
            KeyAction::Last => {
                self.filter.move_last();
                Outcome::Consumed
            }
            KeyAction::StartSearch => {
                // Not while a detail fetch is outstanding: Filtering would
                // replace DetailLoading and orphan the pending completion.
                if matches!(self.state, ListState::Browsing) {
                    self.state = ListState::Filtering;
                }
                Outcome::Consumed
            }
            KeyAction::Activate => self.activate_selected(),
            _ => Outcome::Ignored,
        }
    }

    fn activate_selected(&mut self) -> Outcome {
        if matches!(self.state, ListState::DetailLoading) {
            // One detail fetch in flight at a time.
            return Outcome::Consumed;
        }
        let Some(role) = self.filter.selected() else {
            return Outcome::Consumed;
        };
        let name = role.name.clone();
        self.detail_generation = source::next_generation();
        self.state = ListState::DetailLoading;
        Outcome::Fetch(FetchRequest::RoleDetail {
            name,
            generation: self.detail_generation,
        })
    }

    /// Apply a role-detail fetch completion.
    ///
    /// Stale completions (no fetch outstanding, or a superseded generation)
    /// are discarded. A failure drops back to browsing without an error
    /// surface.
    pub fn apply_detail_result(&mut self, generation: u64, result: Result<Role, SourceError>) {
        if !matches!(self.state, ListState::DetailLoading)
            || generation != self.detail_generation
        {
            tracing::debug!(
                target: TARGET,
                generation,
                "discarding stale role detail completion"
            );
            return;
        }
        match result {
            Ok(role) => {
                tracing::debug!(target: TARGET, role = %role.name, "opening role detail");
                let detail = DetailView::new(
                    Rc::new(role),
                    self.identity.clone(),
                    self.profile.clone(),
                    self.region.clone(),
                    self.width,
                    self.height,
                );
                self.state = ListState::ShowingDetail(detail);
            }
            Err(err) => {
                tracing::warn!(target: TARGET, error = %err, "role detail load failed");
                self.state = ListState::Browsing;
            }
        }
    }

    /// Route a policy-document fetch completion to the active detail view.
    pub fn apply_policy_result(
        &mut self,
        generation: u64,
        name: &str,
        result: Result<String, SourceError>,
    ) {
        if let ListState::ShowingDetail(detail) = &mut self.state {
            detail.apply_policy_result(generation, name, result);
        } else {
            tracing::debug!(
                target: TARGET,
                generation,
                policy = %name,
                "dropping policy document completion with no detail view active"
            );
        }
    }
}
