use std::cell::RefCell;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::*;
use crate::net::token::TokenClaims;
use crate::net::types::Course;
use crate::state::LocalStore;
use crate::state::status::UiStatus;

// =========================================================================
// MockIdentity
// =========================================================================

/// Tokens look like `token-for:<email>`; anything else fails to decode.
#[derive(Default)]
struct MockIdentity {
    logged_in: bool,
    token: RefCell<Option<String>>,
    failure: Option<AppError>,
    log_out_failure: Option<AppError>,
    calls: RefCell<Vec<String>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockIdentity {
    fn with_session(email: &str) -> Self {
        Self { logged_in: true, token: RefCell::new(Some(format!("token-for:{email}"))), ..Self::default() }
    }

    fn failing(failure: AppError) -> Self {
        Self { failure: Some(failure), ..Self::default() }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    async fn enter(&self, call: String) -> Result<(), AppError> {
        self.calls.borrow_mut().push(call);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl IdentityGateway for MockIdentity {
    async fn check_if_user_is_logged_in(&self) -> Result<bool, AppError> {
        self.calls.borrow_mut().push("check".to_owned());
        Ok(self.logged_in)
    }

    fn id_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn decode_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        token
            .strip_prefix("token-for:")
            .map(|email| TokenClaims { email: email.to_owned(), user_id: None, exp: None })
            .ok_or_else(|| AppError::Token("unreadable".to_owned()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AppError> {
        self.enter(format!("sign_in:{email}:{password}")).await?;
        self.token.replace(Some(format!("token-for:{email}")));
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        self.enter(format!("sign_up:{email}:{password}")).await?;
        self.token.replace(Some(format!("token-for:{email}")));
        Ok(())
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), AppError> {
        self.enter(format!("reset:{email}")).await
    }

    async fn log_out(&self) -> Result<(), AppError> {
        self.calls.borrow_mut().push("log_out".to_owned());
        self.token.replace(None);
        match &self.log_out_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

// =========================================================================
// MockCourses
// =========================================================================

struct MockCourses {
    responses: RefCell<Vec<Result<Vec<Course>, AppError>>>,
    fetches: Cell<usize>,
}

impl MockCourses {
    fn new(responses: Vec<Result<Vec<Course>, AppError>>) -> Self {
        Self { responses: RefCell::new(responses), fetches: Cell::new(0) }
    }

    fn returning(courses: Vec<Course>) -> Self {
        Self::new(vec![Ok(courses)])
    }
}

#[async_trait(?Send)]
impl CourseSource for MockCourses {
    async fn get_all_courses(&self) -> Result<Vec<Course>, AppError> {
        self.fetches.set(self.fetches.get() + 1);
        let mut responses = self.responses.borrow_mut();
        if responses.is_empty() { Ok(Vec::new()) } else { responses.remove(0) }
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn course(id: &str, title: &str) -> Course {
    let mut fields = serde_json::Map::new();
    fields.insert("title".to_owned(), serde_json::json!(title));
    Course { id: id.to_owned(), fields }
}

fn rejected(message: &str) -> AppError {
    AppError::Rejected { status: 400, body: serde_json::json!({ "error": { "message": message } }) }
}

fn setup(identity: MockIdentity, courses: MockCourses) -> (AppController<LocalStore>, LocalStore, Rc<MockIdentity>, Rc<MockCourses>) {
    let store = LocalStore::default();
    let identity = Rc::new(identity);
    let courses = Rc::new(courses);
    let controller = AppController::new(store.clone(), identity.clone(), courses.clone());
    (controller, store, identity, courses)
}

fn active_overlays(state: &AppState) -> usize {
    [state.is_loading(), state.has_error(), state.is_info_displayed()].into_iter().filter(|on| *on).count()
}

fn email_of(state: &AppState) -> Option<String> {
    state.session.user().map(|u| u.email.clone())
}

// =========================================================================
// login
// =========================================================================

#[tokio::test]
async fn login_success_adopts_session_and_fetches_courses_once() {
    let (controller, store, identity, courses) =
        setup(MockIdentity::default(), MockCourses::returning(vec![course("c1", "Rust 101")]));

    let outcome = controller.login("ada@example.com", "secret").await;

    assert_eq!(outcome, ActionOutcome::Completed);
    let state = store.snapshot();
    assert_eq!(email_of(&state).as_deref(), Some("ada@example.com"));
    assert_eq!(state.status, UiStatus::Idle);
    assert_eq!(state.courses, Some(vec![course("c1", "Rust 101")]));
    assert_eq!(courses.fetches.get(), 1);
    assert_eq!(identity.calls(), ["sign_in:ada@example.com:secret"]);
}

#[tokio::test]
async fn login_failure_sets_error_and_leaves_session_and_courses() {
    let (controller, store, _identity, courses) =
        setup(MockIdentity::failing(rejected("INVALID_PASSWORD")), MockCourses::returning(Vec::new()));

    let outcome = controller.login("ada@example.com", "wrong").await;

    assert_eq!(outcome, ActionOutcome::Failed);
    let state = store.snapshot();
    assert_eq!(state.session, Session::Anonymous);
    assert_eq!(state.error_message(), "INVALID_PASSWORD");
    assert!(!state.is_loading());
    assert!(state.courses.is_none());
    assert_eq!(courses.fetches.get(), 0);
}

#[tokio::test]
async fn login_failure_with_unreadable_body_uses_generic_message() {
    let failure = AppError::Rejected { status: 502, body: serde_json::json!("<html>bad gateway</html>") };
    let (controller, store, _identity, _courses) = setup(MockIdentity::failing(failure), MockCourses::new(Vec::new()));

    controller.login("ada@example.com", "pw").await;

    assert_eq!(store.snapshot().error_message(), crate::error::GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn course_fetch_failure_after_sign_in_keeps_session_and_shows_error() {
    let (controller, store, _identity, _courses) =
        setup(MockIdentity::default(), MockCourses::new(vec![Err(rejected("Permission denied"))]));

    let outcome = controller.login("ada@example.com", "pw").await;

    assert_eq!(outcome, ActionOutcome::Failed);
    let state = store.snapshot();
    assert!(state.is_user_logged_in());
    assert_eq!(state.error_message(), "Permission denied");
    assert!(state.courses.is_none());
}

#[tokio::test]
async fn undecodable_token_surfaces_as_error() {
    let identity = MockIdentity::default();
    let (controller, store, identity, courses) = setup(identity, MockCourses::new(Vec::new()));
    identity.token.replace(Some("garbage".to_owned()));

    controller.recover_password("ada@example.com").await;

    let state = store.snapshot();
    assert_eq!(state.session, Session::Anonymous);
    assert_eq!(state.error_message(), crate::error::GENERIC_ERROR_MESSAGE);
    assert_eq!(courses.fetches.get(), 0);
}

// =========================================================================
// create_account / recover_password
// =========================================================================

#[tokio::test]
async fn create_account_sets_info_and_adopts_session() {
    let (controller, store, _identity, courses) = setup(MockIdentity::default(), MockCourses::returning(Vec::new()));

    let outcome = controller.create_account("new@example.com", "pw").await;

    assert_eq!(outcome, ActionOutcome::Completed);
    let state = store.snapshot();
    assert_eq!(state.info_message(), "User account created. User is logged in!");
    assert_eq!(email_of(&state).as_deref(), Some("new@example.com"));
    assert_eq!(state.courses, Some(Vec::new()));
    assert_eq!(courses.fetches.get(), 1);
    assert_eq!(active_overlays(&state), 1);
}

#[tokio::test]
async fn recover_password_sets_info_and_leaves_anonymous_session() {
    let (controller, store, identity, courses) = setup(MockIdentity::default(), MockCourses::new(Vec::new()));

    let outcome = controller.recover_password("ada@example.com").await;

    assert_eq!(outcome, ActionOutcome::Completed);
    let state = store.snapshot();
    assert_eq!(state.info_message(), "Check your inbox!");
    assert_eq!(state.session, Session::Anonymous);
    assert_eq!(courses.fetches.get(), 0);
    assert_eq!(identity.calls(), ["reset:ada@example.com"]);
}

#[tokio::test]
async fn recover_password_adopts_an_existing_session() {
    let (controller, store, _identity, courses) =
        setup(MockIdentity::with_session("old@example.com"), MockCourses::returning(Vec::new()));

    controller.recover_password("other@example.com").await;

    let state = store.snapshot();
    assert_eq!(email_of(&state).as_deref(), Some("old@example.com"));
    assert_eq!(state.info_message(), RESET_EMAIL_SENT_MESSAGE);
    assert_eq!(courses.fetches.get(), 1);
}

#[tokio::test]
async fn recover_password_failure_sets_error() {
    let (controller, store, _identity, _courses) =
        setup(MockIdentity::failing(rejected("EMAIL_NOT_FOUND")), MockCourses::new(Vec::new()));

    controller.recover_password("nobody@example.com").await;

    assert_eq!(store.snapshot().status, UiStatus::Error { message: "EMAIL_NOT_FOUND".to_owned() });
}

// =========================================================================
// Loading lifecycle and single-flight guard
// =========================================================================

#[tokio::test]
async fn loading_is_visible_while_in_flight_and_cleared_after() {
    let (controller, store, identity, _courses) = setup(MockIdentity::default(), MockCourses::new(Vec::new()));
    let (tx, rx) = oneshot::channel();
    identity.gate.replace(Some(rx));

    let observer = store.clone();
    let (outcome, seen_loading) = tokio::join!(controller.login("ada@example.com", "pw"), async move {
        let state = observer.snapshot();
        let _ = tx.send(());
        state.is_loading() && active_overlays(&state) == 1
    });

    assert!(seen_loading);
    assert_eq!(outcome, ActionOutcome::Completed);
    assert!(!store.snapshot().is_loading());
}

#[tokio::test]
async fn second_action_while_in_flight_is_skipped() {
    let (controller, store, identity, courses) = setup(MockIdentity::default(), MockCourses::new(Vec::new()));
    let (tx, rx) = oneshot::channel();
    identity.gate.replace(Some(rx));

    let second = controller.clone();
    let (first, skipped) = tokio::join!(controller.login("ada@example.com", "pw"), async move {
        let outcome = second.create_account("eve@example.com", "pw").await;
        let _ = tx.send(());
        outcome
    });

    assert_eq!(first, ActionOutcome::Completed);
    assert_eq!(skipped, ActionOutcome::Skipped);
    assert_eq!(identity.calls(), ["sign_in:ada@example.com:pw"]);
    assert_eq!(courses.fetches.get(), 1);
    let state = store.snapshot();
    assert_eq!(email_of(&state).as_deref(), Some("ada@example.com"));
    assert_eq!(state.status, UiStatus::Idle);
}

#[tokio::test]
async fn new_action_replaces_stale_error() {
    let (controller, store, _identity, _courses) = setup(MockIdentity::default(), MockCourses::new(Vec::new()));
    store.update_state(|s| s.status = UiStatus::Error { message: "old".to_owned() });

    controller.login("ada@example.com", "pw").await;

    assert_eq!(store.snapshot().status, UiStatus::Idle);
}

#[tokio::test]
async fn overlays_stay_mutually_exclusive_across_a_session() {
    let (controller, store, _identity, _courses) = setup(
        MockIdentity::default(),
        MockCourses::new(vec![Ok(vec![course("a", "A")]), Err(rejected("offline")), Ok(Vec::new())]),
    );

    controller.create_account("ada@example.com", "pw").await;
    assert!(active_overlays(&store.snapshot()) <= 1);
    controller.dismiss_message();
    controller.refresh_courses().await;
    assert!(active_overlays(&store.snapshot()) <= 1);
    controller.dismiss_error();
    controller.refresh_courses().await;
    let state = store.snapshot();
    assert_eq!(active_overlays(&state), 0);
    assert_eq!(state.courses, Some(Vec::new()));
}

// =========================================================================
// refresh_courses
// =========================================================================

#[tokio::test]
async fn refresh_courses_replaces_list_wholesale() {
    let (controller, store, _identity, courses) = setup(
        MockIdentity::with_session("ada@example.com"),
        MockCourses::new(vec![Ok(vec![course("a", "A"), course("b", "B")]), Ok(vec![course("c", "C")])]),
    );

    controller.refresh_courses().await;
    assert_eq!(store.snapshot().courses.map(|c| c.len()), Some(2));

    controller.refresh_courses().await;
    assert_eq!(store.snapshot().courses, Some(vec![course("c", "C")]));
    assert_eq!(courses.fetches.get(), 2);
}

// =========================================================================
// dismiss
// =========================================================================

#[tokio::test]
async fn dismiss_error_returns_to_idle_and_ignores_info() {
    let (controller, store, _identity, _courses) =
        setup(MockIdentity::failing(rejected("nope")), MockCourses::new(Vec::new()));
    controller.login("a@b.c", "pw").await;

    controller.dismiss_message();
    assert!(store.snapshot().has_error());

    controller.dismiss_error();
    assert_eq!(store.snapshot().status, UiStatus::Idle);
}

#[tokio::test]
async fn dismiss_message_returns_to_idle_and_ignores_error() {
    let (controller, store, _identity, _courses) = setup(MockIdentity::default(), MockCourses::new(Vec::new()));
    controller.recover_password("a@b.c").await;

    controller.dismiss_error();
    assert!(store.snapshot().is_info_displayed());

    controller.dismiss_message();
    assert_eq!(store.snapshot().status, UiStatus::Idle);
}

// =========================================================================
// restore_session
// =========================================================================

#[tokio::test]
async fn restore_session_adopts_existing_session() {
    let (controller, store, _identity, courses) =
        setup(MockIdentity::with_session("ada@example.com"), MockCourses::returning(vec![course("c1", "One")]));

    let outcome = controller.restore_session().await;

    assert_eq!(outcome, ActionOutcome::Completed);
    let state = store.snapshot();
    assert_eq!(email_of(&state).as_deref(), Some("ada@example.com"));
    assert_eq!(state.courses.as_ref().map(Vec::len), Some(1));
    assert!(!state.is_loading());
    assert_eq!(courses.fetches.get(), 1);
}

#[tokio::test]
async fn restore_session_without_session_stays_anonymous() {
    let (controller, store, identity, courses) = setup(MockIdentity::default(), MockCourses::new(Vec::new()));

    controller.restore_session().await;

    let state = store.snapshot();
    assert_eq!(state.session, Session::Anonymous);
    assert_eq!(state.status, UiStatus::Idle);
    assert_eq!(courses.fetches.get(), 0);
    assert_eq!(identity.calls(), ["check"]);
}

#[tokio::test]
async fn restore_session_runs_once_across_clones() {
    let (controller, _store, identity, courses) =
        setup(MockIdentity::with_session("ada@example.com"), MockCourses::new(Vec::new()));

    assert_eq!(controller.restore_session().await, ActionOutcome::Completed);
    assert_eq!(controller.clone().restore_session().await, ActionOutcome::Skipped);
    assert_eq!(identity.calls(), ["check"]);
    assert_eq!(courses.fetches.get(), 1);
}

// =========================================================================
// log_out
// =========================================================================

#[tokio::test]
async fn log_out_resets_session_and_clears_courses() {
    let (controller, store, identity, _courses) =
        setup(MockIdentity::default(), MockCourses::returning(vec![course("c1", "One")]));
    controller.login("ada@example.com", "pw").await;
    assert!(store.snapshot().courses.is_some());

    controller.log_out().await.expect("log out succeeds");

    let state = store.snapshot();
    assert_eq!(state.session, Session::Anonymous);
    assert!(state.courses.is_none());
    assert_eq!(state.status, UiStatus::Idle);
    assert_eq!(identity.id_token(), None);
}

#[tokio::test]
async fn log_out_failure_propagates_but_still_resets_session() {
    let identity = MockIdentity {
        log_out_failure: Some(AppError::Network("offline".to_owned())),
        ..MockIdentity::with_session("ada@example.com")
    };
    let (controller, store, _identity, _courses) = setup(identity, MockCourses::new(Vec::new()));
    controller.restore_session().await;

    let result = controller.log_out().await;

    assert_eq!(result, Err(AppError::Network("offline".to_owned())));
    let state = store.snapshot();
    assert_eq!(state.session, Session::Anonymous);
    assert!(!state.has_error());
}
