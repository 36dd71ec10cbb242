//! On-chain reads for the gasless flow.
//!
//! - `eth_getCode`: delegation detection for the user account
//! - `eth_getTransactionCount`: fresh authorization nonce

pub mod delegation;

use alloy::{
    primitives::{Address, Bytes},
    providers::Provider,
};
use glide_types::{GlideError, Result};
use tracing::debug;

pub use delegation::{DelegationState, DelegationStatus, resolve};

/// Read-only chain access backed by an alloy provider.
#[derive(Debug, Clone)]
pub struct ChainReader<P> {
    provider: P,
    chain_id: u64,
}

impl<P: Provider> ChainReader<P> {
    pub fn new(provider: P, chain_id: u64) -> Self {
        Self { provider, chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Fetch the account's code at the latest block.
    pub async fn account_code(&self, address: Address) -> Result<Bytes> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| GlideError::Transport(format!("eth_getCode failed: {}", e)))?;
        debug!(%address, code_len = code.len(), "fetched account code");
        Ok(code)
    }

    /// Fetch the account's current transaction count. Always read fresh;
    /// a stale nonce invalidates the signed authorization.
    pub async fn transaction_count(&self, address: Address) -> Result<u64> {
        let nonce = self
            .provider
            .get_transaction_count(address)
            .await
            .map_err(|e| GlideError::Transport(format!("eth_getTransactionCount failed: {}", e)))?;
        debug!(%address, nonce, "fetched transaction count");
        Ok(nonce)
    }

    /// Read the account's code and classify its delegation state.
    pub async fn delegation(
        &self,
        address: Address,
        expected_delegate: Address,
    ) -> Result<DelegationState> {
        let code = self.account_code(address).await?;
        let status = delegation::resolve(&code, expected_delegate)?;
        Ok(DelegationState { address, chain_id: self.chain_id, expected_delegate, status })
    }
}
