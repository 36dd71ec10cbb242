//! HTTP client for the relay's pricing endpoint.
//!
//! POST /quote, authenticated with a bearer token.

use crate::{Quote, QuoteRequest};
use glide_types::{GlideError, Result};
use std::time::Duration;
use tracing::debug;

/// Quote client for the relay pricing endpoint.
pub struct QuoteClient {
    base_url: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(base_url: &str, bearer_token: Option<&str>, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.map(|t| t.to_string()),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Request a priced plan for the transfer.
    ///
    /// A successful response may carry zero steps (e.g. an already-settled
    /// balance); callers must treat that as "nothing to execute", not an
    /// error.
    pub async fn request_quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let url = format!("{}/quote", self.base_url);
        debug!(%url, user = %request.user, "requesting quote");

        let mut req = self.client.post(&url).json(request).timeout(self.timeout);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| GlideError::Transport(format!("quote request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GlideError::QuoteRejected { status, body });
        }

        resp.json()
            .await
            .map_err(|e| GlideError::Decode(format!("failed to parse quote response: {}", e)))
    }
}
