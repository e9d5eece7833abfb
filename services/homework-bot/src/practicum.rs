//! Client for the Practicum homework-status API

use std::sync::Arc;

use serde_json::Value;

use crate::io::HttpClient;

/// Longest slice of an error body kept in a `Fetch` error
pub const ERROR_BODY_CHARS: usize = 200;

/// Fetches homework statuses for a time window
pub struct PracticumClient {
    endpoint: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let endpoint = endpoint.into();
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self { endpoint, http }
    }

    /// Fetch and decode homework statuses updated since `from_date`.
    ///
    /// A `from_date` of zero means "now". Transport errors and non-200
    /// responses are `Fetch` errors; an undecodable body is a `Decode` error.
    pub async fn get_api_answer(&self, token: &str, from_date: u64) -> crate::Result<Value> {
        let from_date = if from_date == 0 {
            crate::now_epoch_seconds()
        } else {
            from_date
        };
        let from_date = from_date.to_string();
        let authorization = format!("OAuth {}", token);

        tracing::debug!("Requesting homework statuses from_date={}", from_date);
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            return Err(crate::HomeworkBotError::Fetch(format!(
                "{} returned status {}: {}",
                self.endpoint,
                response.status,
                crate::truncate_chars(&response.body, ERROR_BODY_CHARS)
            )));
        }

        let value = serde_json::from_str(&response.body)?;
        Ok(value)
    }
}
