//! Off-chain EIP-7702 delegation authorizations.
//!
//! Produces the authorization tuple the relay expects in
//! `authorizationList`. Three shapes exist, kept as distinct variants so an
//! inert tuple can never masquerade as a real signature inside this
//! process: `Reused` (delegation already on chain), `Placeholder`
//! (demo-mode stand-in, explicitly enabled and loudly logged), and
//! `Signed` (actual secp256k1 signature over the authorization hash).

use alloy::{
    eips::eip7702::{Authorization, SignedAuthorization},
    primitives::{Address, U256},
    signers::{SignerSync, local::PrivateKeySigner},
};
use glide_types::{GlideError, Result};
use tracing::warn;

/// An authorization ready to be placed in an execution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationAuthorization {
    /// The account already delegates to the expected implementation. The
    /// wire tuple (nonce 0, zero signature) only keeps the list non-empty;
    /// the relay ignores it.
    Reused { delegate: Address, chain_id: u64 },
    /// Demo-mode stand-in used when no signing key is configured. Same
    /// inert wire shape as `Reused`, but reaching this variant means the
    /// submitted request cannot establish a delegation.
    Placeholder { delegate: Address, chain_id: u64 },
    /// A real signature over the authorization hash.
    Signed(SignedAuthorization),
}

impl DelegationAuthorization {
    /// Lower to the wire tuple for `authorizationList`.
    ///
    /// For `Reused` and `Placeholder` this yields the inert zero-signature
    /// tuple; it is not a valid signature and the relay must not treat it
    /// as one.
    pub fn wire(&self) -> SignedAuthorization {
        match self {
            Self::Reused { delegate, chain_id } | Self::Placeholder { delegate, chain_id } => {
                inert_tuple(*delegate, *chain_id)
            }
            Self::Signed(auth) => auth.clone(),
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }
}

fn inert_tuple(delegate: Address, chain_id: u64) -> SignedAuthorization {
    SignedAuthorization::new_unchecked(
        Authorization { chain_id: U256::from(chain_id), address: delegate, nonce: 0 },
        0,
        U256::ZERO,
        U256::ZERO,
    )
}

/// Signs delegation authorizations with an optional local key.
#[derive(Debug, Clone)]
pub struct AuthorizationSigner {
    signer: Option<PrivateKeySigner>,
    allow_placeholder: bool,
}

impl AuthorizationSigner {
    pub fn new(signer: Option<PrivateKeySigner>, allow_placeholder: bool) -> Self {
        Self { signer, allow_placeholder }
    }

    /// Build from an optional hex-encoded secp256k1 key.
    pub fn from_key_hex(key_hex: Option<&str>, allow_placeholder: bool) -> Result<Self> {
        let signer = match key_hex {
            Some(hex) => Some(hex.trim().parse::<PrivateKeySigner>().map_err(|e| {
                GlideError::SigningUnavailable(format!("could not parse signing key: {}", e))
            })?),
            None => None,
        };
        Ok(Self::new(signer, allow_placeholder))
    }

    /// Address of the configured key, if any.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    /// Produce the authorization for the execution request.
    ///
    /// When the account is already delegated, returns `Reused` without
    /// touching any key; identical inputs yield identical output. Otherwise
    /// signs `{delegate, chain_id, nonce}` with the configured key, where
    /// `nonce` must be the account's current on-chain transaction count.
    pub fn authorize(
        &self,
        delegate: Address,
        chain_id: u64,
        nonce: u64,
        already_delegated: bool,
    ) -> Result<DelegationAuthorization> {
        if already_delegated {
            return Ok(DelegationAuthorization::Reused { delegate, chain_id });
        }

        let Some(signer) = &self.signer else {
            if self.allow_placeholder {
                warn!(
                    %delegate,
                    chain_id,
                    "no signing key configured; substituting an INERT placeholder \
                     authorization (demo mode, delegation will not be established)"
                );
                return Ok(DelegationAuthorization::Placeholder { delegate, chain_id });
            }
            return Err(GlideError::SigningUnavailable(
                "no signing key configured and demo fallback not enabled".into(),
            ));
        };

        let authorization =
            Authorization { chain_id: U256::from(chain_id), address: delegate, nonce };
        let signature = signer
            .sign_hash_sync(&authorization.signature_hash())
            .map_err(|e| GlideError::Other(format!("authorization signing failed: {}", e)))?;

        Ok(DelegationAuthorization::Signed(authorization.into_signed(signature)))
    }
}
