//! Error types for ledger transactions.

use graft_traits::TargetRuntimeError;
use thiserror::Error;

/// Error type for ledger transactions.
///
/// Every disallowed transition maps to exactly one variant, and a rejected
/// transaction leaves the ledger and the target runtime unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller is not the current owner.
    #[error("sender is not owner")]
    NotOwner,

    /// A previously approved bundle is still active.
    #[error("previous bundle has not yet been fully executed")]
    BundleAlreadyActive,

    /// No bundle is currently active.
    #[error("there is no active bundle")]
    NoActiveBundle,

    /// The submitted proof does not match the active commitment.
    #[error("invalid action proof")]
    InvalidProof,

    /// The action at this index has already been executed.
    #[error("action has already been executed")]
    AlreadyExecuted,

    /// The commitment is degenerate: the zero root or size 0 would alias
    /// the "no bundle" sentinel.
    #[error("bundle must commit to at least one action")]
    EmptyBundle,

    /// The target runtime failed to apply the action's effect.
    #[error("target runtime error: {0}")]
    Runtime(#[from] TargetRuntimeError),
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;

    use super::*;

    #[test]
    fn test_not_owner_display() {
        let err = LedgerError::NotOwner;
        assert_eq!(err.to_string(), "sender is not owner");
    }

    #[test]
    fn test_bundle_already_active_display() {
        let err = LedgerError::BundleAlreadyActive;
        assert!(err.to_string().contains("not yet been fully executed"));
    }

    #[test]
    fn test_no_active_bundle_display() {
        let err = LedgerError::NoActiveBundle;
        assert_eq!(err.to_string(), "there is no active bundle");
    }

    #[test]
    fn test_invalid_proof_display() {
        let err = LedgerError::InvalidProof;
        assert_eq!(err.to_string(), "invalid action proof");
    }

    #[test]
    fn test_already_executed_display() {
        let err = LedgerError::AlreadyExecuted;
        assert_eq!(err.to_string(), "action has already been executed");
    }

    #[test]
    fn test_empty_bundle_display() {
        let err = LedgerError::EmptyBundle;
        assert!(err.to_string().contains("at least one action"));
    }

    #[test]
    fn test_runtime_error_from() {
        let inner = TargetRuntimeError::UnknownTarget(Address::ZERO);
        let err: LedgerError = inner.into();
        assert!(matches!(err, LedgerError::Runtime(_)));
        assert!(err.to_string().contains("target runtime error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LedgerError>();
    }
}
