//! Target runtime trait.

use alloy_primitives::{Address, B256, Bytes};

use crate::TargetRuntimeError;

/// Applies the semantic effect of verified actions to target execution
/// units.
///
/// The ledger dispatches into this trait only after proof verification and
/// replay checks pass, and marks the action executed only when the call
/// returns `Ok`. Implementations must therefore apply each call atomically:
/// a returned error means the target is unchanged and the action may be
/// resubmitted. Payloads arrive uninterpreted — the caller never inspects
/// them beyond the type discriminant.
pub trait TargetRuntime {
    /// Replace the target's executable image with `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the effect could not be applied; the target must
    /// be left unchanged.
    fn apply_code(&self, target: Address, code: Bytes) -> Result<(), TargetRuntimeError>;

    /// Write one fixed-width storage cell in the target's namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the effect could not be applied; the target must
    /// be left unchanged.
    fn apply_storage_cell(
        &self,
        target: Address,
        key: B256,
        value: B256,
    ) -> Result<(), TargetRuntimeError>;
}
