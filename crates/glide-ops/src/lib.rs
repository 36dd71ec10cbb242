//! End-to-end orchestration of the gasless cross-chain flow.
//!
//! Sequences delegation check, quote, authorization, submission, and
//! status polling. Emits a tagged [`FlowEvent`] per stage so the
//! presentation layer owns all text output; this module does no
//! formatting beyond [`fees`].

pub mod fees;

use alloy::{primitives::Address, providers::Provider};
use glide_auth::{AuthorizationSigner, DelegationAuthorization};
use glide_chain::{ChainReader, DelegationState};
use glide_relay::{
    ExecutionClient, ExecutionRequest, Quote, QuoteClient, QuoteRequest, StatusPoller,
    StatusSnapshot,
};
use glide_types::Result;
use std::time::Duration;
use tracing::info;

/// Everything the flow needs, threaded explicitly through the sequence.
#[derive(Debug, Clone)]
pub struct FlowParams {
    pub user: Address,
    pub recipient: Address,
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub origin_currency: String,
    pub destination_currency: String,
    /// Raw amount in the origin currency's smallest unit.
    pub amount: String,
    /// The delegation implementation the account is expected to point at.
    pub expected_delegate: Address,
    /// Cap on the subsidized amount, in USD.
    pub max_subsidization_usd: String,
    pub referrer: Option<String>,
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
}

/// Progress event emitted once per completed stage.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    DelegationChecked(DelegationState),
    Quoted(Quote),
    Authorized(DelegationAuthorization),
    Submitted { request_id: String, message: Option<String> },
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub enum FlowOutcome {
    /// The quote carried no transaction step; there is nothing to execute.
    NothingToExecute { quote: Quote },
    /// The relay reached a terminal success state.
    Completed { request_id: String, snapshot: StatusSnapshot },
}

/// Orchestrates one gasless transfer end to end.
pub struct Engine<P> {
    reader: ChainReader<P>,
    quotes: QuoteClient,
    executor: ExecutionClient,
    poller: StatusPoller,
    signer: AuthorizationSigner,
    params: FlowParams,
}

impl<P: Provider> Engine<P> {
    pub fn new(
        reader: ChainReader<P>,
        quotes: QuoteClient,
        executor: ExecutionClient,
        poller: StatusPoller,
        signer: AuthorizationSigner,
        params: FlowParams,
    ) -> Self {
        Self { reader, quotes, executor, poller, signer, params }
    }

    fn quote_request(&self) -> QuoteRequest {
        let p = &self.params;
        QuoteRequest {
            user: p.user,
            origin_chain_id: p.origin_chain_id,
            destination_chain_id: p.destination_chain_id,
            origin_currency: p.origin_currency.clone(),
            destination_currency: p.destination_currency.clone(),
            amount: p.amount.clone(),
            trade_type: "EXACT_INPUT".to_string(),
            recipient: p.recipient,
            subsidize_fees: true,
            max_subsidization_amount: p.max_subsidization_usd.clone(),
        }
    }

    /// Run the whole flow, invoking `report` after each completed stage.
    ///
    /// Short-circuits: a quote without a transaction step ends the run
    /// with [`FlowOutcome::NothingToExecute`]; an already-delegated
    /// account skips the signing capability and submits the inert reused
    /// authorization. Every stage is awaited one at a time; no concurrent
    /// requests.
    pub async fn run(&self, mut report: impl FnMut(FlowEvent)) -> Result<FlowOutcome> {
        let p = &self.params;

        let delegation = self.reader.delegation(p.user, p.expected_delegate).await?;
        report(FlowEvent::DelegationChecked(delegation));

        let quote = self.quotes.request_quote(&self.quote_request()).await?;
        report(FlowEvent::Quoted(quote.clone()));

        let Some(call) = quote.deposit_call().cloned() else {
            info!("quote carries no transaction step; nothing to execute");
            return Ok(FlowOutcome::NothingToExecute { quote });
        };

        let authorization = if delegation.is_delegated() {
            self.signer.authorize(p.expected_delegate, call.chain_id, 0, true)?
        } else {
            // Fresh nonce; a stale value would invalidate the signature.
            let nonce = self.reader.transaction_count(p.user).await?;
            self.signer.authorize(p.expected_delegate, call.chain_id, nonce, false)?
        };
        report(FlowEvent::Authorized(authorization.clone()));

        let request = ExecutionRequest::raw_calls(
            p.user,
            &call,
            &authorization,
            quote.execution_request_id().map(|s| s.to_string()),
            p.referrer.clone(),
        );
        let response = self.executor.submit(&request).await?;
        report(FlowEvent::Submitted {
            request_id: response.request_id.clone(),
            message: response.message.clone(),
        });

        let snapshot = self
            .poller
            .poll_until_terminal(&response.request_id, p.poll_interval, p.poll_max_attempts)
            .await?;

        Ok(FlowOutcome::Completed { request_id: response.request_id, snapshot })
    }
}
