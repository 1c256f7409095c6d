//! REST plumbing for the identity and course-data services.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): only the URL builders exist; the collaborators return
//! [`AppError::Unavailable`] instead of calling out.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses keep their JSON body in [`AppError::Rejected`] so the
//! overlay can show the service's own `error.message`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use crate::config::ClientConfig;
#[cfg(feature = "hydrate")]
use crate::error::AppError;
#[cfg(any(test, feature = "hydrate"))]
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
#[cfg(feature = "hydrate")]
use serde::{Serialize, de::DeserializeOwned};

/// RFC 3986 unreserved characters pass through; everything else is escaped.
#[cfg(any(test, feature = "hydrate"))]
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn identity_endpoint(config: &ClientConfig, action: &str) -> String {
    format!("{}/accounts:{action}?key={}", config.identity_base_url, utf8_percent_encode(&config.api_key, QUERY_VALUE))
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn token_endpoint(config: &ClientConfig) -> String {
    format!("{}/token?key={}", config.token_base_url, utf8_percent_encode(&config.api_key, QUERY_VALUE))
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn courses_endpoint(config: &ClientConfig, id_token: &str) -> String {
    format!("{}/courses.json?auth={}", config.database_url, utf8_percent_encode(id_token, QUERY_VALUE))
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn refresh_form_body(refresh_token: &str) -> String {
    format!("grant_type=refresh_token&refresh_token={}", utf8_percent_encode(refresh_token, QUERY_VALUE))
}

#[cfg(feature = "hydrate")]
fn network(err: gloo_net::Error) -> AppError {
    AppError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, AppError> {
    if !resp.ok() {
        let body = resp.json::<serde_json::Value>().await.unwrap_or(serde_json::Value::Null);
        return Err(AppError::Rejected { status: resp.status(), body });
    }
    resp.json::<T>().await.map_err(|e| AppError::Decode(e.to_string()))
}

/// `POST` a JSON body and decode a JSON answer.
#[cfg(feature = "hydrate")]
pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, AppError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    read_json(resp).await
}

/// `POST` a form-encoded body and decode a JSON answer.
#[cfg(feature = "hydrate")]
pub(crate) async fn post_form<T: DeserializeOwned>(url: &str, body: String) -> Result<T, AppError> {
    let resp = gloo_net::http::Request::post(url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    read_json(resp).await
}

/// `GET` and decode a JSON answer.
#[cfg(feature = "hydrate")]
pub(crate) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, AppError> {
    let resp = gloo_net::http::Request::get(url).send().await.map_err(network)?;
    read_json(resp).await
}
