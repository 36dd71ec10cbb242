//! Status polling against the relay's intent status endpoint.
//!
//! GET /intents/status/v3?requestId=<id>

use crate::StatusSnapshot;
use glide_types::{GlideError, Result};
use std::time::Duration;
use tracing::debug;

/// Polls execution status until a terminal state or the attempt budget is
/// exhausted. Strictly sequential; one outstanding request at a time.
pub struct StatusPoller {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl StatusPoller {
    pub fn new(base_url: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(20_000);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Fetch one status snapshot.
    pub async fn fetch_status(&self, request_id: &str) -> Result<StatusSnapshot> {
        let url = format!("{}/intents/status/v3?requestId={}", self.base_url, request_id);

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GlideError::Transport(format!("status request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GlideError::Transport(format!(
                "status endpoint returned {}: {}",
                status, body
            )));
        }

        resp.json()
            .await
            .map_err(|e| GlideError::Decode(format!("failed to parse status response: {}", e)))
    }

    /// Poll at a fixed interval until the execution reaches a terminal
    /// state.
    ///
    /// `success` returns the final snapshot; `failure` and `refund` are
    /// surfaced as [`GlideError::RelayExecutionFailed`]. Running out of
    /// attempts is [`GlideError::PollTimeout`]. This loop is a wait for an
    /// asynchronous remote process, not a retry of failed calls: any
    /// transport error aborts immediately.
    pub async fn poll_until_terminal(
        &self,
        request_id: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<StatusSnapshot> {
        for attempt in 0..max_attempts {
            let snapshot = self.fetch_status(request_id).await?;
            debug!(request_id, attempt, status = %snapshot.status, "polled status");

            if snapshot.status.is_terminal() {
                if snapshot.status == crate::ExecutionStatus::Success {
                    return Ok(snapshot);
                }
                return Err(GlideError::RelayExecutionFailed {
                    status: snapshot.status.to_string(),
                });
            }

            if attempt + 1 < max_attempts {
                tokio::time::sleep(interval).await;
            }
        }

        Err(GlideError::PollTimeout { attempts: max_attempts })
    }
}
