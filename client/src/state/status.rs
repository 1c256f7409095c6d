//! Transient UI status overlaying the current screen.
//!
//! DESIGN
//! ======
//! Loading, error, and info are variants of one value rather than separate
//! flags, so at most one of them can be active. `Loading` is entered only by
//! the controller's action wrapper and every settle path replaces it.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use crate::error::AppError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UiStatus {
    #[default]
    Idle,
    Loading,
    Error { message: String },
    Info { message: String },
}

impl UiStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn info_message(&self) -> Option<&str> {
        match self {
            Self::Info { message } => Some(message),
            _ => None,
        }
    }

    /// Enter `Loading`, discarding any previous error or info.
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Leave `Loading` with the result of the wrapped action.
    ///
    /// A notice becomes `Info`; no notice returns to `Idle`; a failure becomes
    /// `Error` with the extracted user message.
    pub fn settle(&mut self, result: &Result<Option<String>, AppError>) {
        *self = match result {
            Ok(Some(message)) => Self::Info { message: message.clone() },
            Ok(None) => Self::Idle,
            Err(err) => Self::Error { message: err.user_message() },
        };
    }

    /// `Error` -> `Idle`; no-op from any other status.
    pub fn dismiss_error(&mut self) {
        if matches!(self, Self::Error { .. }) {
            *self = Self::Idle;
        }
    }

    /// `Info` -> `Idle`; no-op from any other status.
    pub fn dismiss_info(&mut self) {
        if matches!(self, Self::Info { .. }) {
            *self = Self::Idle;
        }
    }
}
