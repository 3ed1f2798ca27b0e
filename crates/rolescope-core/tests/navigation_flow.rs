//! End-to-end walks through the reducer: boot, filter, drill into a role,
//! open a policy document, search it, and unwind the whole stack.
//!
//! Fetches are executed inline with [`execute`] so completions arrive at
//! deterministic points, exactly one message at a time.

use crossterm::event::{KeyCode, KeyModifiers};
use rolescope_core::{
    App, AppMsg, AppState, DetailState, FetchRequest, InputEvent, ListState, MockRoleSource, Tab,
    source::execute,
};

fn key(app: &mut App, code: KeyCode) -> Vec<FetchRequest> {
    app.handle(AppMsg::Input(InputEvent::Key(code, KeyModifiers::NONE)))
}

fn press(app: &mut App, c: char) -> Vec<FetchRequest> {
    key(app, KeyCode::Char(c))
}

fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        let requests = press(app, c);
        assert!(requests.is_empty(), "typing must not issue fetches");
    }
}

fn boot(source: &MockRoleSource) -> App {
    let mut app = App::new("default", "us-east-1", 80, 24);
    for request in app.init() {
        let follow_ups = app.handle(execute(source, request));
        assert!(follow_ups.is_empty());
    }
    app
}

fn run_one(app: &mut App, source: &MockRoleSource, requests: Vec<FetchRequest>) {
    assert_eq!(requests.len(), 1, "expected exactly one outstanding fetch");
    let follow_ups = app.handle(execute(source, requests.into_iter().next().unwrap()));
    assert!(follow_ups.is_empty());
}

fn list(app: &App) -> &rolescope_core::ListView {
    match app.state() {
        AppState::List(list) => list,
        other => panic!("expected list state, got {other:?}"),
    }
}

fn detail(app: &App) -> &rolescope_core::DetailView {
    match list(app).state() {
        ListState::ShowingDetail(detail) => detail,
        other => panic!("expected an active detail view, got {other:?}"),
    }
}

#[test]
fn full_drilldown_and_unwind() {
    let source = MockRoleSource::sample();
    let mut app = boot(&source);
    assert_eq!(list(&app).roles().len(), 4);

    // Filter down to the production roles.
    press(&mut app, '/');
    type_str(&mut app, "prod");
    key(&mut app, KeyCode::Enter);
    {
        let view = list(&app);
        let names: Vec<&str> = view
            .filter()
            .filtered()
            .iter()
            .map(|role| role.name.as_str())
            .collect();
        assert_eq!(names, vec!["prod-admin", "prod-reader"]);
        assert_eq!(view.filter().cursor(), 0);
    }

    // Open prod-admin. The listing carries no policies; the detail does.
    let requests = key(&mut app, KeyCode::Enter);
    run_one(&mut app, &source, requests);
    {
        let view = detail(&app);
        assert_eq!(view.role().name, "prod-admin");
        assert_eq!(view.role().policy_count(), 3);
        assert_eq!(view.tab(), Tab::Overview);
    }

    // Over to the Policies tab, select the inline policy (flattened index 2).
    press(&mut app, 'l');
    press(&mut app, 'l');
    press(&mut app, 'j');
    press(&mut app, 'j');
    assert_eq!(detail(&app).policy_cursor(), 2);

    let requests = key(&mut app, KeyCode::Enter);
    run_one(&mut app, &source, requests);
    let doc_body = {
        let DetailState::PolicyDocument(doc) = detail(&app).state() else {
            panic!("expected a policy document");
        };
        assert_eq!(doc.title(), "deny-billing");
        assert_eq!(doc.scroll(), 0);
        doc.body().to_string()
    };
    assert!(doc_body.contains("\"Effect\": \"Deny\""));

    // Search inside the document.
    press(&mut app, '/');
    type_str(&mut app, "deny");
    {
        let DetailState::PolicyDocument(doc) = detail(&app).state() else {
            panic!("expected a policy document");
        };
        assert!(doc.search().is_active());
        assert_eq!(doc.search().matches().len(), 1);
        assert_eq!(doc.search().current(), Some(0));
    }

    // Unwind one layer at a time: search → document → detail → list.
    key(&mut app, KeyCode::Esc);
    assert!(matches!(
        detail(&app).state(),
        DetailState::PolicyDocument(_)
    ));
    key(&mut app, KeyCode::Esc);
    assert!(matches!(detail(&app).state(), DetailState::NormalTab));
    key(&mut app, KeyCode::Esc);
    assert!(matches!(list(&app).state(), ListState::Browsing));

    // The filter survives the round trip.
    assert_eq!(list(&app).filter().query(), "prod");

    press(&mut app, 'q');
    assert!(app.should_quit());
}

#[test]
fn at_most_one_detail_fetch_in_flight() {
    let source = MockRoleSource::sample();
    let mut app = boot(&source);

    let first = key(&mut app, KeyCode::Enter);
    assert_eq!(first.len(), 1);
    // Re-activating while the fetch is outstanding issues nothing.
    let second = key(&mut app, KeyCode::Enter);
    assert!(second.is_empty());
    // The cursor still moves while loading.
    press(&mut app, 'j');
    assert_eq!(list(&app).filter().cursor(), 1);

    run_one(&mut app, &source, first);
    assert_eq!(detail(&app).role().name, "prod-admin");
}

#[test]
fn policy_result_racing_a_dismissal_is_discarded() {
    let source = MockRoleSource::sample();
    let mut app = boot(&source);

    let requests = key(&mut app, KeyCode::Enter);
    run_one(&mut app, &source, requests);

    press(&mut app, 'l');
    press(&mut app, 'l');
    let stale = key(&mut app, KeyCode::Enter);
    assert_eq!(stale.len(), 1);

    // Back out of the detail view before the fetch resolves, then open a
    // fresh detail view on another role.
    key(&mut app, KeyCode::Esc);
    press(&mut app, 'j');
    let requests = key(&mut app, KeyCode::Enter);
    run_one(&mut app, &source, requests);
    assert_eq!(detail(&app).role().name, "dev-reader");

    // The abandoned policy fetch finally resolves; the fresh view must stay
    // where it is.
    let follow_ups = app.handle(execute(&source, stale.into_iter().next().unwrap()));
    assert!(follow_ups.is_empty());
    assert!(matches!(detail(&app).state(), DetailState::NormalTab));
    assert_eq!(detail(&app).role().name, "dev-reader");
}

#[test]
fn policy_failure_is_shown_inside_the_document() {
    let listing_source = MockRoleSource::sample();
    let failing_source = MockRoleSource::sample().with_failing_policies();
    let mut app = boot(&listing_source);

    let requests = key(&mut app, KeyCode::Enter);
    run_one(&mut app, &listing_source, requests);

    press(&mut app, 'l');
    press(&mut app, 'l');
    let requests = key(&mut app, KeyCode::Enter);
    // Resolve the fetch against a backend that now refuses.
    run_one(&mut app, &failing_source, requests);

    let DetailState::PolicyDocument(doc) = detail(&app).state() else {
        panic!("failure still lands in the document viewer");
    };
    assert_eq!(doc.title(), "Error");
    assert!(doc.body().contains("injected policy failure"));

    // The viewer unwinds normally afterwards.
    key(&mut app, KeyCode::Esc);
    assert!(matches!(detail(&app).state(), DetailState::NormalTab));
}

#[test]
fn empty_collection_boots_and_navigates_safely() {
    let source = MockRoleSource::empty();
    let mut app = boot(&source);
    let view = list(&app);
    assert!(view.filter().filtered().is_empty());

    press(&mut app, 'j');
    press(&mut app, 'G');
    let requests = key(&mut app, KeyCode::Enter);
    assert!(requests.is_empty());
    assert!(matches!(list(&app).state(), ListState::Browsing));
}
