//! Classification of on-chain account code against the EIP-7702 delegation
//! designator.

use alloy::{
    eips::eip7702::constants::EIP7702_DELEGATION_DESIGNATOR,
    primitives::{Address, Bytes},
};
use glide_types::{GlideError, Result};

/// Total length of a 7702 delegation: 3-byte designator + 20-byte address.
const DELEGATION_CODE_LEN: usize = 23;

/// Where an account stands with respect to the expected delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationStatus {
    /// No code at the account.
    PlainAccount,
    /// Delegated to the expected implementation; no new authorization needed.
    DelegatedToExpected,
    /// Delegated to a different implementation; needs re-authorization.
    DelegatedToOther { current: Address },
}

impl DelegationStatus {
    /// True only when the account already points at the expected delegate.
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::DelegatedToExpected)
    }
}

/// Delegation state of one account on one chain, derived fresh from code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegationState {
    pub address: Address,
    pub chain_id: u64,
    pub expected_delegate: Address,
    pub status: DelegationStatus,
}

impl DelegationState {
    pub fn is_delegated(&self) -> bool {
        self.status.is_delegated()
    }
}

/// Classify account code against the expected delegate.
///
/// Empty code is a plain account. Code of exactly `0xef0100 || address` is a
/// 7702 delegation; the trailing 20 bytes name the current delegate. Any
/// other non-empty code belongs to a smart-contract account, which this
/// flow must not touch.
pub fn resolve(code: &Bytes, expected_delegate: Address) -> Result<DelegationStatus> {
    if code.is_empty() {
        return Ok(DelegationStatus::PlainAccount);
    }

    if code.len() == DELEGATION_CODE_LEN
        && code.starts_with(EIP7702_DELEGATION_DESIGNATOR.as_ref())
    {
        let current = Address::from_slice(&code[EIP7702_DELEGATION_DESIGNATOR.len()..]);
        if current == expected_delegate {
            return Ok(DelegationStatus::DelegatedToExpected);
        }
        return Ok(DelegationStatus::DelegatedToOther { current });
    }

    Err(GlideError::UnsupportedAccountKind(format!(
        "{} bytes of contract code without a delegation designator",
        code.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELEGATE: &str = "0xA1B2C3d4E5f678901234567890123456789aBcDe";

    fn delegation_code(delegate: Address) -> Bytes {
        let mut code = EIP7702_DELEGATION_DESIGNATOR.to_vec();
        code.extend_from_slice(delegate.as_slice());
        Bytes::from(code)
    }

    #[test]
    fn empty_code_is_plain_account() {
        let expected: Address = DELEGATE.parse().unwrap();
        let status = resolve(&Bytes::new(), expected).unwrap();
        assert_eq!(status, DelegationStatus::PlainAccount);
        assert!(!status.is_delegated());
    }

    #[test]
    fn matching_delegate_is_delegated() {
        let expected: Address = DELEGATE.parse().unwrap();
        let status = resolve(&delegation_code(expected), expected).unwrap();
        assert_eq!(status, DelegationStatus::DelegatedToExpected);
        assert!(status.is_delegated());
    }

    #[test]
    fn delegate_comparison_ignores_hex_case() {
        // Same address, different hex casing in the source strings.
        let expected: Address = DELEGATE.to_lowercase().parse().unwrap();
        let on_chain: Address = DELEGATE.parse().unwrap();
        let status = resolve(&delegation_code(on_chain), expected).unwrap();
        assert_eq!(status, DelegationStatus::DelegatedToExpected);
    }

    #[test]
    fn other_delegate_needs_reauthorization() {
        let expected: Address = DELEGATE.parse().unwrap();
        let other: Address = "0x000000000000000000000000000000000000beef".parse().unwrap();
        let status = resolve(&delegation_code(other), expected).unwrap();
        assert_eq!(status, DelegationStatus::DelegatedToOther { current: other });
        assert!(!status.is_delegated());
    }

    #[test]
    fn contract_code_is_unsupported() {
        let expected: Address = DELEGATE.parse().unwrap();
        let code = Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        let err = resolve(&code, expected).unwrap_err();
        assert!(matches!(err, GlideError::UnsupportedAccountKind(_)));
    }

    #[test]
    fn truncated_designator_code_is_unsupported() {
        let expected: Address = DELEGATE.parse().unwrap();
        // Designator prefix but not a full 23-byte delegation.
        let code = Bytes::from(EIP7702_DELEGATION_DESIGNATOR.to_vec());
        let err = resolve(&code, expected).unwrap_err();
        assert!(matches!(err, GlideError::UnsupportedAccountKind(_)));
    }
}
