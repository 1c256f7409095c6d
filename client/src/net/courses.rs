//! Course data source.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use super::types::Course;
use crate::config::ClientConfig;
use crate::error::AppError;

/// Contract for the external course store. Enables mocking in tests.
#[async_trait(?Send)]
pub trait CourseSource {
    /// Fetch every course visible to the signed-in session, in display order.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] when there is no session or the request fails.
    async fn get_all_courses(&self) -> Result<Vec<Course>, AppError>;
}

/// Realtime-database REST client reading `courses.json`.
#[derive(Clone, Debug)]
pub struct FirebaseCourses {
    config: ClientConfig,
}

impl FirebaseCourses {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl CourseSource for FirebaseCourses {
    async fn get_all_courses(&self) -> Result<Vec<Course>, AppError> {
        #[cfg(feature = "hydrate")]
        {
            let stored = super::token::load_session().ok_or_else(|| AppError::Token("no active session".to_owned()))?;
            let url = super::api::courses_endpoint(&self.config, &stored.id_token);
            let payload: serde_json::Value = super::api::get_json(&url).await?;
            super::types::parse_course_collection(payload)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &self.config;
            Err(AppError::Unavailable)
        }
    }
}
