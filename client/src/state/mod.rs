//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `status`, `route`) and assembled into
//! one [`AppState`] value. The controller writes it through [`StateStore`];
//! the app provides an `RwSignal<AppState>` via context, tests use
//! [`LocalStore`].

pub mod route;
pub mod session;
pub mod status;
pub mod view;


use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{RwSignal, Update, WithUntracked};

use crate::net::types::Course;
use session::Session;
use status::UiStatus;

/// Everything the view layer observes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub session: Session,
    pub status: UiStatus,
    /// `None` until the first successful fetch.
    pub courses: Option<Vec<Course>>,
}

impl AppState {
    #[must_use]
    pub fn is_user_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.status.error_message().is_some()
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        self.status.error_message().unwrap_or_default()
    }

    #[must_use]
    pub fn is_info_displayed(&self) -> bool {
        self.status.info_message().is_some()
    }

    #[must_use]
    pub fn info_message(&self) -> &str {
        self.status.info_message().unwrap_or_default()
    }
}

/// Single mutable slot holding [`AppState`].
pub trait StateStore: Clone + 'static {
    fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;
    fn update_state(&self, f: impl FnOnce(&mut AppState));
}

impl StateStore for RwSignal<AppState> {
    fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        WithUntracked::with_untracked(self, f)
    }

    fn update_state(&self, f: impl FnOnce(&mut AppState)) {
        Update::update(self, f);
    }
}

/// Non-reactive store for tests and headless use.
#[derive(Clone, Debug, Default)]
pub struct LocalStore(Rc<RefCell<AppState>>);

impl LocalStore {
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.0.borrow().clone()
    }
}

impl StateStore for LocalStore {
    fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.0.borrow())
    }

    fn update_state(&self, f: impl FnOnce(&mut AppState)) {
        f(&mut self.0.borrow_mut());
    }
}
