//! Wire DTOs for the identity and course-data services.
//!
//! DESIGN
//! ======
//! Courses are opaque: the client keeps whatever fields the database returns
//! and only reads a title for rendering.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One course record keyed by its database id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Course {
    /// Best display label: `title`, then `name`, then the id.
    #[must_use]
    pub fn title(&self) -> &str {
        pick_str(&self.fields, &["title", "name"]).unwrap_or(&self.id)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        pick_str(&self.fields, &["description"])
    }
}

fn pick_str<'a>(fields: &'a serde_json::Map<String, serde_json::Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str))
        .filter(|value| !value.trim().is_empty())
}

/// Convert a `courses.json` payload into an ordered course list.
///
/// The database answers `null` for an empty collection, an object keyed by id
/// (ordered by key), or an array when ids are small integers (holes are
/// `null` and skipped). Non-object entries are kept under a `value` field.
///
/// # Errors
///
/// Returns [`AppError::Decode`] when the payload is not one of those shapes.
pub fn parse_course_collection(payload: serde_json::Value) -> Result<Vec<Course>, AppError> {
    match payload {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Object(entries) => {
            let mut courses: Vec<Course> =
                entries.into_iter().filter_map(|(id, value)| course_from_entry(id, value)).collect();
            courses.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(courses)
        }
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| course_from_entry(idx.to_string(), value))
            .collect()),
        other => Err(AppError::Decode(format!("unexpected courses payload: {other}"))),
    }
}

fn course_from_entry(id: String, value: serde_json::Value) -> Option<Course> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Object(mut fields) => {
            fields.remove("id");
            Some(Course { id, fields })
        }
        scalar => {
            let mut fields = serde_json::Map::new();
            fields.insert("value".to_owned(), scalar);
            Some(Course { id, fields })
        }
    }
}

/// Body of `accounts:signInWithPassword` and `accounts:signUp` responses.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    pub id_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds, sent as a decimal string.
    pub expires_in: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub local_id: Option<String>,
}

/// Body of a secure-token refresh response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RefreshTokenResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

/// Parse an `expires_in` seconds string; unparsable values count as expired.
#[must_use]
pub fn expires_in_ms(expires_in: &str) -> i64 {
    expires_in.trim().parse::<i64>().map_or(0, |secs| secs.saturating_mul(1000))
}
