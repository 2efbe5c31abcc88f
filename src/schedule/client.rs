//! Schedule API client
//!
//! One bearer-authenticated GET against the personal-schedule endpoint,
//! parameterized by an inclusive date range. No caching, no retries; the
//! access token is supplied by the caller and never stored.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::ApiConfig;
use crate::error::{ItmoError, Result};
use crate::schedule::record::{self, LessonRecord, ScheduleResponse};

/// Client for the my.itmo personal schedule endpoint.
///
/// Shares the process-wide HTTP client with the login flow; the client's
/// disabled redirect-following is irrelevant here since the API never
/// redirects.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use itmo_schedule::auth::AuthFlow;
/// use itmo_schedule::config::ApiConfig;
/// use itmo_schedule::schedule::ScheduleClient;
///
/// # async fn example(token: &str) -> itmo_schedule::error::Result<()> {
/// let http = Arc::new(AuthFlow::http_client()?);
/// let client = ScheduleClient::new(http, ApiConfig::default());
///
/// let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
/// let lessons = client.fetch_lessons(token, from, to).await?;
/// # Ok(())
/// # }
/// ```
pub struct ScheduleClient {
    http: Arc<reqwest::Client>,
    config: ApiConfig,
}

impl ScheduleClient {
    /// Creates a new `ScheduleClient` over a shared HTTP client.
    pub fn new(http: Arc<reqwest::Client>, config: ApiConfig) -> Self {
        Self { http, config }
    }

    /// Fetches the personal schedule for an inclusive date range and
    /// flattens it into one record per lesson.
    ///
    /// Days arrive in response order and lessons within a day in response
    /// order; both are preserved in the returned sequence.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Bearer token from [`AuthFlow`](crate::auth::AuthFlow).
    /// * `date_start` - First day of the range.
    /// * `date_end` - Last day of the range.
    ///
    /// # Errors
    ///
    /// Returns [`ItmoError::Api`] on a non-success HTTP status or a body
    /// that does not match the expected schema.
    pub async fn fetch_lessons(
        &self,
        access_token: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<Vec<LessonRecord>> {
        let url = format!("{}/schedule/schedule/personal", self.config.base_url);

        tracing::debug!(%date_start, %date_end, "fetching personal schedule");

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("date_start", date_start.format("%Y-%m-%d").to_string()),
                ("date_end", date_end.format("%Y-%m-%d").to_string()),
            ])
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ItmoError::Api(format!("schedule request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(
                ItmoError::Api(format!("schedule endpoint returned {}", resp.status())).into(),
            );
        }

        let body: ScheduleResponse = resp
            .json()
            .await
            .map_err(|e| ItmoError::Api(format!("failed to parse schedule response: {e}")))?;

        Ok(record::flatten(body))
    }
}
