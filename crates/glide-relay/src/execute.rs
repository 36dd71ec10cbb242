//! HTTP client for the relay's execution endpoint.
//!
//! POST /execute, authenticated with a service-issued key in the
//! `x-api-key` header. This is a different credential transport than the
//! quote endpoint's bearer token; the two must not be conflated.

use crate::{ExecutionRequest, ExecutionResponse};
use glide_types::{GlideError, Result};
use std::time::Duration;
use tracing::debug;

/// Execution client for the relay execute endpoint.
pub struct ExecutionClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
}

impl ExecutionClient {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Submit the execution request; the returned request id is the handle
    /// for status polling.
    pub async fn submit(&self, request: &ExecutionRequest) -> Result<ExecutionResponse> {
        let url = format!("{}/execute", self.base_url);
        debug!(%url, chain_id = request.chain_id, to = %request.to, "submitting execution");

        let mut req = self.client.post(&url).json(request).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| GlideError::Transport(format!("execute request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GlideError::ExecutionRejected { status, body });
        }

        resp.json()
            .await
            .map_err(|e| GlideError::Decode(format!("failed to parse execute response: {}", e)))
    }
}
