//! Client configuration for the identity and course-data services.
//!
//! The browser bundle has no process environment, so values are baked in at
//! compile time with `option_env!`. Parsing goes through [`ClientConfig::from_lookup`]
//! so tests can supply values without touching the real environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";

pub const API_KEY_VAR: &str = "COURSE_PORTAL_API_KEY";
pub const DATABASE_URL_VAR: &str = "COURSE_PORTAL_DATABASE_URL";
pub const IDENTITY_URL_VAR: &str = "COURSE_PORTAL_IDENTITY_URL";
pub const TOKEN_URL_VAR: &str = "COURSE_PORTAL_TOKEN_URL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {var}")]
    Missing { var: &'static str },
    #[error("setting {var} is not an http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Web API key appended to every identity request.
    pub api_key: String,
    /// Root of the realtime database holding `courses.json`.
    pub database_url: String,
    pub identity_base_url: String,
    pub token_base_url: String,
}

impl ClientConfig {
    /// Build config from values captured when the crate was compiled.
    ///
    /// Required:
    /// - `COURSE_PORTAL_API_KEY`
    /// - `COURSE_PORTAL_DATABASE_URL`
    ///
    /// Optional:
    /// - `COURSE_PORTAL_IDENTITY_URL`: identity toolkit base URL
    /// - `COURSE_PORTAL_TOKEN_URL`: secure-token base URL
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or a URL is malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| {
            let value = match var {
                API_KEY_VAR => option_env!("COURSE_PORTAL_API_KEY"),
                DATABASE_URL_VAR => option_env!("COURSE_PORTAL_DATABASE_URL"),
                IDENTITY_URL_VAR => option_env!("COURSE_PORTAL_IDENTITY_URL"),
                TOKEN_URL_VAR => option_env!("COURSE_PORTAL_TOKEN_URL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or a URL is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { var })
        };
        let url_or = |var: &'static str, default: &str| {
            let raw = lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned());
            normalize_url(var, &raw)
        };

        let api_key = required(API_KEY_VAR)?;
        let database_url = normalize_url(DATABASE_URL_VAR, &required(DATABASE_URL_VAR)?)?;
        let identity_base_url = url_or(IDENTITY_URL_VAR, DEFAULT_IDENTITY_BASE_URL)?;
        let token_base_url = url_or(TOKEN_URL_VAR, DEFAULT_TOKEN_BASE_URL)?;

        Ok(Self { api_key, database_url, identity_base_url, token_base_url })
    }
}

fn normalize_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    if !(raw.starts_with("https://") || raw.starts_with("http://")) {
        return Err(ConfigError::InvalidUrl { var, value: raw.to_owned() });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}
