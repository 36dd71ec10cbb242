//! Wire types and HTTP clients for the relay service.
//!
//! Endpoints:
//! - POST /quote (bearer token)
//! - POST /execute (x-api-key)
//! - GET /intents/status/v3?requestId=<id> (no credential)

use alloy::{eips::eip7702::SignedAuthorization, primitives::Address};
use glide_auth::DelegationAuthorization;
use glide_types::Hex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod execute;
pub mod quote;
pub mod status;

pub use execute::ExecutionClient;
pub use quote::QuoteClient;
pub use status::StatusPoller;

/// Body of POST /quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub user: Address,
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub origin_currency: String,
    pub destination_currency: String,
    /// Raw amount in the origin currency's smallest unit.
    pub amount: String,
    pub trade_type: String,
    pub recipient: Address,
    pub subsidize_fees: bool,
    /// Cap on the subsidized amount, in USD.
    pub max_subsidization_amount: String,
}

/// A priced, fee-annotated transaction plan from the relay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quote {
    pub request_id: Option<String>,
    pub steps: Vec<Step>,
    pub fees: FeeSet,
    pub details: Option<QuoteDetails>,
}

impl Quote {
    /// The first transaction-kind step of the plan, if any. A plan without
    /// one means there is nothing to execute, which is a valid outcome.
    pub fn transaction_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.kind == StepKind::Transaction)
    }

    /// The ready-to-send deposit call inside the transaction step.
    pub fn deposit_call(&self) -> Option<&CallData> {
        self.transaction_step()?.items.iter().find_map(|item| item.data.as_ref())
    }

    /// Request id to forward with the execution so the relay correlates it
    /// with this quote (the cross-chain case).
    pub fn execution_request_id(&self) -> Option<&str> {
        self.request_id
            .as_deref()
            .or_else(|| self.transaction_step()?.request_id.as_deref())
    }
}

/// One discrete action the relay's plan requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step {
    pub id: Option<String>,
    pub kind: StepKind,
    pub request_id: Option<String>,
    pub items: Vec<StepItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Transaction,
    Signature,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepItem {
    pub status: Option<String>,
    pub data: Option<CallData>,
}

/// A ready-to-send call carried by a transaction step item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallData {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Hex,
    pub value: Option<String>,
    pub chain_id: u64,
}

/// Named fee components as independently reported by the relay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeSet {
    /// Origin chain gas.
    pub gas: Option<FeeAmount>,
    /// Destination chain gas fronted by the relayer.
    pub relayer_gas: Option<FeeAmount>,
    pub relayer_service: Option<FeeAmount>,
    pub app: Option<FeeAmount>,
    /// Total the sponsor absorbs.
    pub subsidized: Option<FeeAmount>,
}

/// A currency-denominated amount with formatting and a USD estimate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeAmount {
    pub currency: Option<CurrencyInfo>,
    pub amount: Option<String>,
    pub amount_formatted: Option<String>,
    pub amount_usd: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrencyInfo {
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteDetails {
    pub currency_in: Option<FeeAmount>,
    pub currency_out: Option<FeeAmount>,
    pub rate: Option<String>,
}

/// Body of POST /execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub user: Address,
    pub chain_id: u64,
    pub to: Address,
    pub data: Hex,
    pub value: String,
    pub authorization_list: Vec<SignedAuthorization>,
    pub execution_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    pub subsidize_fees: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ExecutionRequest {
    /// Assemble the raw-calls execution request from the quote's deposit
    /// call and the (single) delegation authorization.
    pub fn raw_calls(
        user: Address,
        call: &CallData,
        authorization: &DelegationAuthorization,
        request_id: Option<String>,
        referrer: Option<String>,
    ) -> Self {
        Self {
            user,
            chain_id: call.chain_id,
            to: call.to,
            data: call.data.clone(),
            value: call.value.clone().unwrap_or_else(|| "0".to_string()),
            authorization_list: vec![authorization.wire()],
            execution_kind: "rawCalls".to_string(),
            referrer,
            subsidize_fees: true,
            request_id,
        }
    }
}

/// Response of POST /execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub message: Option<String>,
    pub request_id: String,
}

/// Lifecycle states reported by the status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Waiting,
    Pending,
    Submitted,
    Success,
    Failure,
    Refund,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Refund)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Refund => "refund",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One poll's view of the execution. Only the latest snapshot is retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSnapshot {
    pub status: ExecutionStatus,
    /// Origin chain transaction hashes.
    pub in_tx_hashes: Option<Vec<Hex>>,
    /// Destination chain transaction hashes.
    pub tx_hashes: Option<Vec<Hex>>,
    pub details: Option<String>,
}

impl StatusSnapshot {
    /// First destination transaction hash, if the relay reported one.
    pub fn destination_tx_hash(&self) -> Option<&str> {
        self.tx_hashes.as_ref()?.first().map(|s| s.as_str())
    }
}
