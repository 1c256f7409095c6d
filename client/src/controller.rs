//! Application controller sequencing identity and course-data calls.
//!
//! ARCHITECTURE
//! ============
//! The controller owns no state of its own; it writes [`AppState`] through a
//! [`StateStore`] and reaches the outside world through the
//! [`IdentityGateway`] and [`CourseSource`] traits. Pages call its action
//! methods and render whatever the store holds.
//!
//! ACTION LIFECYCLE
//! ================
//! Every action except logout goes through [`AppController::run_action`]:
//! status becomes `Loading`, the action runs to completion, and the status is
//! replaced by `Idle`, `Info`, or `Error`. While one action is in flight any
//! other wrapped action is skipped, so two actions never race on the status
//! slot. Logout bypasses the wrapper and reports its failure to the caller.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::error::AppError;
use crate::net::courses::CourseSource;
use crate::net::identity::IdentityGateway;
use crate::state::session::Session;
use crate::state::{AppState, StateStore};

pub const ACCOUNT_CREATED_MESSAGE: &str = "User account created. User is logged in!";
pub const RESET_EMAIL_SENT_MESSAGE: &str = "Check your inbox!";

/// How a wrapped action ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    Failed,
    /// Not started because another action was in flight.
    Skipped,
}

pub struct AppController<S: StateStore> {
    store: S,
    identity: Rc<dyn IdentityGateway>,
    courses: Rc<dyn CourseSource>,
    restore_started: Rc<Cell<bool>>,
}

impl<S: StateStore> Clone for AppController<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            identity: Rc::clone(&self.identity),
            courses: Rc::clone(&self.courses),
            restore_started: Rc::clone(&self.restore_started),
        }
    }
}

impl<S: StateStore> AppController<S> {
    pub fn new(store: S, identity: Rc<dyn IdentityGateway>, courses: Rc<dyn CourseSource>) -> Self {
        Self { store, identity, courses, restore_started: Rc::new(Cell::new(false)) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run `op` between `Loading` and its settled status.
    ///
    /// `op` resolves to an optional info notice on success. Skipped when
    /// another wrapped action is still loading.
    pub async fn run_action(
        &self,
        label: &'static str,
        op: impl Future<Output = Result<Option<String>, AppError>>,
    ) -> ActionOutcome {
        if self.store.with_state(AppState::is_loading) {
            log::debug!("{label}: skipped, another action is in flight");
            return ActionOutcome::Skipped;
        }
        self.store.update_state(|s| s.status.begin());

        let result = op.await;
        match &result {
            Ok(_) => log::debug!("{label}: completed"),
            Err(err) => log::warn!("{label}: failed: {err}"),
        }
        self.store.update_state(|s| s.status.settle(&result));

        if result.is_ok() { ActionOutcome::Completed } else { ActionOutcome::Failed }
    }

    /// Adopt a session left by a previous visit. Runs once per controller.
    pub async fn restore_session(&self) -> ActionOutcome {
        if self.restore_started.replace(true) {
            return ActionOutcome::Skipped;
        }
        self.run_action("restore_session", self.restore_inner()).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ActionOutcome {
        self.run_action("login", self.login_inner(email, password)).await
    }

    pub async fn create_account(&self, email: &str, password: &str) -> ActionOutcome {
        self.run_action("create_account", self.create_account_inner(email, password)).await
    }

    pub async fn recover_password(&self, email: &str) -> ActionOutcome {
        self.run_action("recover_password", self.recover_password_inner(email)).await
    }

    /// Re-fetch the course list for the current session.
    pub async fn refresh_courses(&self) -> ActionOutcome {
        self.run_action("refresh_courses", self.refresh_inner()).await
    }

    /// Sign out, then drop the session and any fetched courses.
    ///
    /// Local state is reset even when the gateway call fails.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error when sign-out fails.
    pub async fn log_out(&self) -> Result<(), AppError> {
        let result = self.identity.log_out().await;
        self.store.update_state(|s| {
            s.session = Session::Anonymous;
            s.courses = None;
        });
        if let Err(err) = &result {
            log::warn!("log_out: gateway sign-out failed: {err}");
        }
        result
    }

    pub fn dismiss_error(&self) {
        self.store.update_state(|s| s.status.dismiss_error());
    }

    pub fn dismiss_message(&self) {
        self.store.update_state(|s| s.status.dismiss_info());
    }

    async fn restore_inner(&self) -> Result<Option<String>, AppError> {
        if self.identity.check_if_user_is_logged_in().await? {
            self.adopt_session().await?;
        } else {
            log::debug!("restore_session: no previous session");
        }
        Ok(None)
    }

    async fn login_inner(&self, email: &str, password: &str) -> Result<Option<String>, AppError> {
        self.identity.sign_in(email, password).await?;
        self.adopt_session().await?;
        Ok(None)
    }

    async fn create_account_inner(&self, email: &str, password: &str) -> Result<Option<String>, AppError> {
        self.identity.sign_up(email, password).await?;
        self.adopt_session().await?;
        Ok(Some(ACCOUNT_CREATED_MESSAGE.to_owned()))
    }

    async fn recover_password_inner(&self, email: &str) -> Result<Option<String>, AppError> {
        self.identity.send_password_reset_email(email).await?;
        self.adopt_session().await?;
        Ok(Some(RESET_EMAIL_SENT_MESSAGE.to_owned()))
    }

    async fn refresh_inner(&self) -> Result<Option<String>, AppError> {
        self.load_courses().await?;
        Ok(None)
    }

    /// Commit the session carried by the current id token, then load courses.
    /// No token means nothing to adopt.
    async fn adopt_session(&self) -> Result<(), AppError> {
        let Some(token) = self.identity.id_token() else {
            return Ok(());
        };
        let claims = self.identity.decode_token(&token)?;
        let session = Session::from_claims(&claims);
        log::info!("session adopted for {}", claims.email);
        self.store.update_state(|s| s.session = session);
        self.load_courses().await
    }

    async fn load_courses(&self) -> Result<(), AppError> {
        let courses = self.courses.get_all_courses().await?;
        log::debug!("loaded {} courses", courses.len());
        self.store.update_state(|s| s.courses = Some(courses));
        Ok(())
    }
}
