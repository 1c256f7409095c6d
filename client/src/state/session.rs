//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the controller (login, restore, logout); read by view
//! selection and user-aware components.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::token::TokenClaims;

/// Profile of a signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
}

/// Either nobody is signed in or exactly one user is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserProfile),
}

impl Session {
    /// Build a session from decoded token claims.
    ///
    /// Only the email is taken from the token; display name and avatar stay
    /// empty until a profile lookup exists.
    #[must_use]
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self::Authenticated(UserProfile {
            display_name: String::new(),
            email: claims.email.clone(),
            avatar_url: String::new(),
        })
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }
}
