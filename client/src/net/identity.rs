//! Identity gateway: sign-in, sign-up, password reset, and session status.
//!
//! ARCHITECTURE
//! ============
//! The controller only sees [`IdentityGateway`]. [`FirebaseIdentity`] talks to
//! the hosted identity-toolkit REST API from the browser and persists the
//! issued tokens through [`super::token`]; on the server every call is
//! [`AppError::Unavailable`] and the session check answers `false`.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use super::token::{self, TokenClaims};
use crate::config::ClientConfig;
use crate::error::AppError;

/// Contract for the external identity provider. Enables mocking in tests.
#[async_trait(?Send)]
pub trait IdentityGateway {
    /// Whether a usable session exists, refreshing an expired token if possible.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] only for failures other than "no session".
    async fn check_if_user_is_logged_in(&self) -> Result<bool, AppError>;

    /// Current id token, if a session exists.
    fn id_token(&self) -> Option<String>;

    /// Read the claims carried by an id token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Token`] when the token cannot be decoded.
    fn decode_token(&self, token: &str) -> Result<TokenClaims, AppError>;

    /// # Errors
    ///
    /// Returns an [`AppError`] when the credentials are rejected or the call fails.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AppError>;

    /// # Errors
    ///
    /// Returns an [`AppError`] when the account cannot be created or the call fails.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError>;

    /// # Errors
    ///
    /// Returns an [`AppError`] when the reset email cannot be dispatched.
    async fn send_password_reset_email(&self, email: &str) -> Result<(), AppError>;

    /// # Errors
    ///
    /// Returns an [`AppError`] when the session cannot be ended.
    async fn log_out(&self) -> Result<(), AppError>;
}

/// Identity-toolkit REST client.
#[derive(Clone, Debug)]
pub struct FirebaseIdentity {
    config: ClientConfig,
}

impl FirebaseIdentity {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Exchange credentials at `accounts:{action}` and persist the issued tokens.
    #[cfg(feature = "hydrate")]
    async fn exchange_credentials(&self, action: &str, email: &str, password: &str) -> Result<(), AppError> {
        use super::types::{AuthTokenResponse, expires_in_ms};

        let url = super::api::identity_endpoint(&self.config, action);
        let payload = serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
        let resp: AuthTokenResponse = super::api::post_json(&url, &payload).await?;
        let stored = token::StoredSession::new(
            resp.id_token,
            resp.refresh_token,
            token::now_ms(),
            expires_in_ms(&resp.expires_in),
        );
        token::save_session(&stored);
        Ok(())
    }

    /// Trade the refresh token for a new id token.
    #[cfg(feature = "hydrate")]
    async fn refresh(&self, stored: &token::StoredSession) -> Result<token::StoredSession, AppError> {
        use super::types::{RefreshTokenResponse, expires_in_ms};

        let url = super::api::token_endpoint(&self.config);
        let body = super::api::refresh_form_body(&stored.refresh_token);
        let resp: RefreshTokenResponse = super::api::post_form(&url, body).await?;
        Ok(token::StoredSession::new(
            resp.id_token,
            resp.refresh_token,
            token::now_ms(),
            expires_in_ms(&resp.expires_in),
        ))
    }
}

#[async_trait(?Send)]
impl IdentityGateway for FirebaseIdentity {
    async fn check_if_user_is_logged_in(&self) -> Result<bool, AppError> {
        #[cfg(feature = "hydrate")]
        {
            let Some(stored) = token::load_session() else {
                return Ok(false);
            };
            if !stored.is_expired(token::now_ms()) {
                return Ok(true);
            }
            match self.refresh(&stored).await {
                Ok(fresh) => {
                    token::save_session(&fresh);
                    Ok(true)
                }
                Err(AppError::Rejected { status, .. }) => {
                    log::info!("stored session rejected on refresh (status {status}); clearing");
                    token::clear_session();
                    Ok(false)
                }
                Err(err) => Err(err),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &self.config;
            Ok(false)
        }
    }

    fn id_token(&self) -> Option<String> {
        token::load_session().map(|stored| stored.id_token)
    }

    fn decode_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        token::decode_token(token)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AppError> {
        #[cfg(feature = "hydrate")]
        {
            self.exchange_credentials("signInWithPassword", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AppError::Unavailable)
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        #[cfg(feature = "hydrate")]
        {
            self.exchange_credentials("signUp", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AppError::Unavailable)
        }
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), AppError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::api::identity_endpoint(&self.config, "sendOobCode");
            let payload = serde_json::json!({ "requestType": "PASSWORD_RESET", "email": email });
            let _: serde_json::Value = super::api::post_json(&url, &payload).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AppError::Unavailable)
        }
    }

    async fn log_out(&self) -> Result<(), AppError> {
        token::clear_session();
        Ok(())
    }
}
