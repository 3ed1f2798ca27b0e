//! Top-level application reducer.
//!
//! Owns which top view is active (loading splash, role list, or error
//! screen) and routes messages to whichever child machine currently holds
//! input. The reducer never performs I/O: startup fetches come out of
//! [`App::init`] and follow-up fetches out of [`App::handle`] as
//! [`FetchRequest`] values for the host runtime to execute.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::identity::CallerIdentity;
use crate::input::{InputEvent, KeyAction, Keymap};
use crate::list::ListView;
use crate::logging::TARGET;
use crate::msg::{AppMsg, Outcome};
use crate::source::FetchRequest;

/// Which top-level view is active.
#[derive(Debug)]
pub enum AppState {
    /// Waiting for the startup role-collection load.
    Loading,
    /// Browsing the role collection.
    List(ListView),
    /// The role collection could not be loaded. Terminal except for quit.
    Error(String),
}

/// The application reducer.
pub struct App {
    state: AppState,
    identity: Option<Rc<CallerIdentity>>,
    profile: String,
    region: String,
    keymap: Keymap,
    width: u16,
    height: u16,
    should_quit: bool,
}

impl App {
    /// Create the reducer in its loading state.
    #[must_use]
    pub fn new(
        profile: impl Into<String>,
        region: impl Into<String>,
        width: u16,
        height: u16,
    ) -> Self {
        Self {
            state: AppState::Loading,
            identity: None,
            profile: profile.into(),
            region: region.into(),
            keymap: Keymap::default_bindings(),
            width,
            height,
            should_quit: false,
        }
    }

    /// Startup fetches: the role collection and the caller identity.
    #[must_use]
    pub fn init(&self) -> Vec<FetchRequest> {
        vec![FetchRequest::RoleList, FetchRequest::CallerIdentity]
    }

    /// Current top-level state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Caller identity, when resolved.
    #[must_use]
    pub fn identity(&self) -> Option<&Rc<CallerIdentity>> {
        self.identity.as_ref()
    }

    /// Whether the application should terminate.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Terminal size last seen.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Process one message, returning follow-up fetches to execute.
    pub fn handle(&mut self, msg: AppMsg) -> Vec<FetchRequest> {
        match msg {
            AppMsg::Input(event) => self.handle_input(&event),
            AppMsg::RolesLoaded(Ok(roles)) => {
                tracing::info!(target: TARGET, count = roles.len(), "role collection loaded");
                let mut list =
                    ListView::new(roles, self.profile.clone(), self.region.clone(), self.width, self.height);
                list.set_identity(self.identity.clone());
                self.state = AppState::List(list);
                Vec::new()
            }
            AppMsg::RolesLoaded(Err(err)) => {
                tracing::error!(target: TARGET, error = %err, "role collection load failed");
                self.state = AppState::Error(err.to_string());
                Vec::new()
            }
            AppMsg::IdentityLoaded(Ok(identity)) => {
                tracing::info!(target: TARGET, principal = %identity.display_name, "caller identity resolved");
                let identity = Rc::new(identity);
                self.identity = Some(identity.clone());
                if let AppState::List(list) = &mut self.state {
                    list.set_identity(Some(identity));
                }
                Vec::new()
            }
            AppMsg::IdentityLoaded(Err(err)) => {
                // Display-only degradation; the dashboard works without it.
                tracing::warn!(target: TARGET, error = %err, "caller identity unavailable");
                Vec::new()
            }
            AppMsg::RoleDetailLoaded { generation, result } => {
                if let AppState::List(list) = &mut self.state {
                    list.apply_detail_result(generation, result);
                }
                Vec::new()
            }
            AppMsg::PolicyDocumentLoaded {
                generation,
                name,
                result,
            } => {
                if let AppState::List(list) = &mut self.state {
                    list.apply_policy_result(generation, &name, result);
                }
                Vec::new()
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> Vec<FetchRequest> {
        if let InputEvent::Resize(width, height) = event {
            self.width = *width;
            self.height = *height;
            if let AppState::List(list) = &mut self.state {
                list.resize(*width, *height);
            }
            return Vec::new();
        }

        // Ctrl-C terminates from any nesting depth.
        if let InputEvent::Key(KeyCode::Char('c'), modifiers) = event
            && modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return Vec::new();
        }

        match &mut self.state {
            AppState::Loading => Vec::new(),
            AppState::Error(_) => {
                if let InputEvent::Key(code, modifiers) = event
                    && matches!(
                        self.keymap.resolve(*code, *modifiers),
                        Some(KeyAction::Quit)
                    )
                {
                    self.should_quit = true;
                }
                Vec::new()
            }
            AppState::List(list) => match list.handle_input(event, &self.keymap) {
                Outcome::Quit => {
                    self.should_quit = true;
                    Vec::new()
                }
                Outcome::Fetch(request) => vec![request],
                Outcome::Consumed | Outcome::Ignored => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::list::ListState;
    use crate::source::{MockRoleSource, RoleSource, execute};

    fn key_msg(code: KeyCode) -> AppMsg {
        AppMsg::Input(InputEvent::Key(code, KeyModifiers::NONE))
    }

    fn booted_app() -> App {
        let source = MockRoleSource::sample();
        let mut app = App::new("default", "us-east-1", 80, 24);
        for request in app.init() {
            let msg = execute(&source, request);
            let follow_ups = app.handle(msg);
            assert!(follow_ups.is_empty());
        }
        app
    }

    #[test]
    fn startup_issues_both_fetches() {
        let app = App::new("default", "us-east-1", 80, 24);
        let requests = app.init();
        assert!(requests.contains(&FetchRequest::RoleList));
        assert!(requests.contains(&FetchRequest::CallerIdentity));
        assert!(matches!(app.state(), AppState::Loading));
    }

    #[test]
    fn successful_boot_lands_on_the_list_with_identity() {
        let app = booted_app();
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert_eq!(list.roles().len(), 4);
        assert!(app.identity().is_some());
        assert!(list.identity().is_some());
    }

    #[test]
    fn listing_failure_is_terminal_until_quit() {
        let source = MockRoleSource::sample().with_failing_listing();
        let mut app = App::new("default", "us-east-1", 80, 24);
        app.handle(AppMsg::RolesLoaded(source.list_roles()));
        let AppState::Error(message) = app.state() else {
            panic!("expected error state");
        };
        assert!(message.contains("injected listing failure"));

        // Navigation is dead; only quit works.
        app.handle(key_msg(KeyCode::Char('j')));
        assert!(!app.should_quit());
        app.handle(key_msg(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn identity_failure_degrades_silently() {
        let source = MockRoleSource::sample().without_identity();
        let mut app = App::new("default", "us-east-1", 80, 24);
        for request in app.init() {
            app.handle(execute(&source, request));
        }
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert!(app.identity().is_none());
        assert!(list.identity().is_none());
    }

    #[test]
    fn identity_arriving_after_the_list_is_attached() {
        let source = MockRoleSource::sample();
        let mut app = App::new("default", "us-east-1", 80, 24);
        app.handle(AppMsg::RolesLoaded(source.list_roles()));
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert!(list.identity().is_none());

        app.handle(AppMsg::IdentityLoaded(source.caller_identity()));
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert_eq!(
            list.identity().map(|id| id.display_name.as_str()),
            Some("operator")
        );
    }

    #[test]
    fn ctrl_c_quits_from_any_depth() {
        let mut app = booted_app();
        // Descend into a detail view first.
        let requests = app.handle(key_msg(KeyCode::Enter));
        assert_eq!(requests.len(), 1);
        app.handle(AppMsg::Input(InputEvent::Key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn input_during_loading_is_ignored() {
        let mut app = App::new("default", "us-east-1", 80, 24);
        let requests = app.handle(key_msg(KeyCode::Enter));
        assert!(requests.is_empty());
        assert!(matches!(app.state(), AppState::Loading));
    }

    #[test]
    fn resize_is_handled_in_every_state() {
        let mut app = App::new("default", "us-east-1", 80, 24);
        app.handle(AppMsg::Input(InputEvent::Resize(100, 30)));
        assert_eq!(app.size(), (100, 30));

        let mut app = booted_app();
        app.handle(AppMsg::Input(InputEvent::Resize(120, 40)));
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert_eq!(list.size(), (120, 40));
    }

    #[test]
    fn detail_fetch_round_trip_through_the_reducer() {
        let source = MockRoleSource::sample();
        let mut app = booted_app();
        let requests = app.handle(key_msg(KeyCode::Enter));
        assert_eq!(requests.len(), 1);
        {
            let AppState::List(list) = app.state() else {
                panic!("expected list state");
            };
            assert!(matches!(list.state(), ListState::DetailLoading));
        }
        let follow_ups = app.handle(execute(&source, requests.into_iter().next().unwrap()));
        assert!(follow_ups.is_empty());
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert!(matches!(list.state(), ListState::ShowingDetail(_)));
    }

    #[test]
    fn detail_failure_drops_back_to_browsing() {
        let source = MockRoleSource::sample().with_failing_detail();
        let mut app = booted_app();
        let requests = app.handle(key_msg(KeyCode::Enter));
        let follow_ups = app.handle(execute(&source, requests.into_iter().next().unwrap()));
        assert!(follow_ups.is_empty());
        let AppState::List(list) = app.state() else {
            panic!("expected list state");
        };
        assert!(matches!(list.state(), ListState::Browsing));
    }

    #[test]
    fn stray_completion_in_error_state_is_ignored() {
        let mut app = App::new("default", "us-east-1", 80, 24);
        app.handle(AppMsg::RolesLoaded(Err(SourceError::ListRoles {
            reason: "down".to_string(),
        })));
        app.handle(AppMsg::PolicyDocumentLoaded {
            generation: 3,
            name: "p".to_string(),
            result: Ok("{}".to_string()),
        });
        assert!(matches!(app.state(), AppState::Error(_)));
    }
}
