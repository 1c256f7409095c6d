//! Session-token decoding and persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity service issues a JWT id token plus a refresh token. The pair
//! is kept in `localStorage` so a reload can restore the session; the course
//! source reads the id token from the same slot.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `localStorage` key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "course_portal.session";

/// Tokens this close to expiry are refreshed before use.
pub const EXPIRY_SKEW_MS: i64 = 60_000;

/// Claims read from an id token payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Expiry in seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode the payload segment of a JWT without verifying its signature.
///
/// # Errors
///
/// Returns [`AppError::Token`] when the token is not three segments, the
/// payload is not base64url, or the claims lack an email.
pub fn decode_token(token: &str) -> Result<TokenClaims, AppError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(AppError::Token("expected three segments".to_owned()));
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AppError::Token(format!("payload is not base64url: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::Token(format!("unreadable claims: {e}")))
}

/// Tokens persisted between page loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id_token: String,
    pub refresh_token: String,
    /// Absolute expiry in milliseconds since the Unix epoch.
    pub expires_at_ms: i64,
}

impl StoredSession {
    #[must_use]
    pub fn new(id_token: String, refresh_token: String, now_ms: i64, lifetime_ms: i64) -> Self {
        Self { id_token, refresh_token, expires_at_ms: now_ms.saturating_add(lifetime_ms) }
    }

    #[must_use]
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms.saturating_add(EXPIRY_SKEW_MS) >= self.expires_at_ms
    }
}

#[cfg(feature = "hydrate")]
fn session_slot() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the persisted session. A missing or unreadable slot is no session.
pub fn load_session() -> Option<StoredSession> {
    #[cfg(feature = "hydrate")]
    {
        let raw = session_slot()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("discarding unreadable stored session: {err}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist `session`, replacing any previous one.
pub fn save_session(session: &StoredSession) {
    #[cfg(feature = "hydrate")]
    {
        let Some(slot) = session_slot() else {
            log::warn!("localStorage unavailable; session will not survive a reload");
            return;
        };
        match serde_json::to_string(session) {
            Ok(raw) => {
                if slot.set_item(SESSION_STORAGE_KEY, &raw).is_err() {
                    log::warn!("failed to persist session");
                }
            }
            Err(err) => log::warn!("failed to encode session: {err}"),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

pub fn clear_session() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(slot) = session_slot() {
            let _ = slot.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

/// Current wall-clock time in milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as i64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}
