//! Failure taxonomy for identity and course-data calls.
//!
//! ERROR HANDLING
//! ==============
//! Every collaborator failure collapses into one presentation path: the
//! controller asks [`AppError::user_message`] for a string and shows it in the
//! error overlay. Extraction never fails; an unexpected body shape falls back
//! to [`GENERIC_ERROR_MESSAGE`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Shown when a failure carries no readable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// The service answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: serde_json::Value },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid session token: {0}")]
    Token(String),
    /// Browser-only call attempted outside the browser.
    #[error("not available on server")]
    Unavailable,
}

impl AppError {
    /// Human-readable message for the error overlay.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => rejection_message(body).unwrap_or(GENERIC_ERROR_MESSAGE).to_owned(),
            Self::Network(message) if !message.trim().is_empty() => message.clone(),
            // Decode and token details are diagnostics; they stay in the log.
            Self::Network(_) | Self::Decode(_) | Self::Token(_) | Self::Unavailable => GENERIC_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// Read `error.message` from a rejected response body.
pub(crate) fn rejection_message(body: &serde_json::Value) -> Option<&str> {
    body.get("error")
        .and_then(|error| error.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.trim().is_empty())
}
