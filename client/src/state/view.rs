//! Top-level view selection.
//!
//! Pure function of session, route, and status so the render layer holds no
//! decision logic of its own.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use super::route::Route;
use super::session::Session;
use super::status::UiStatus;

/// Main screen under any overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Courses,
    Login,
    CreateAccount,
    RecoverPassword,
}

/// Full-page overlay drawn above the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    Loader,
    Info(String),
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSelection {
    /// `None` when anonymous and the route names no sub-view.
    pub screen: Option<Screen>,
    pub overlay: Option<Overlay>,
}

#[must_use]
pub fn select_view(session: &Session, route: Route, status: &UiStatus) -> ViewSelection {
    let screen = if session.is_logged_in() {
        Some(Screen::Courses)
    } else {
        match route {
            Route::Login => Some(Screen::Login),
            Route::CreateAccount => Some(Screen::CreateAccount),
            Route::RecoverPassword => Some(Screen::RecoverPassword),
            Route::Other => None,
        }
    };
    let overlay = match status {
        UiStatus::Idle => None,
        UiStatus::Loading => Some(Overlay::Loader),
        UiStatus::Info { message } => Some(Overlay::Info(message.clone())),
        UiStatus::Error { message } => Some(Overlay::Error(message.clone())),
    };
    ViewSelection { screen, overlay }
}
