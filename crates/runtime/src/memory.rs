//! In-memory target runtime implementation.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, Bytes};
use graft_traits::{TargetRuntime, TargetRuntimeError};
use parking_lot::RwLock;

/// State held for a single target.
#[derive(Clone, Debug, Default)]
struct TargetAccount {
    code: Option<Bytes>,
    storage: HashMap<B256, B256>,
}

/// Target runtime that applies effects to an in-memory account map.
///
/// Targets come into existence on first write. Reads of absent targets
/// return `None` (code) or the zero value (storage cells), mirroring an
/// untouched cell space. Each write is atomic under the account lock.
#[derive(Debug, Default)]
pub struct InMemoryTargetRuntime {
    accounts: RwLock<HashMap<Address, TargetAccount>>,
}

impl InMemoryTargetRuntime {
    /// Create an empty runtime with no targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current executable image for a target, if any code was applied.
    pub fn code(&self, target: &Address) -> Option<Bytes> {
        self.accounts.read().get(target).and_then(|account| account.code.clone())
    }

    /// Current value of a storage cell, zero if never written.
    pub fn storage_cell(&self, target: &Address, key: &B256) -> B256 {
        self.accounts
            .read()
            .get(target)
            .and_then(|account| account.storage.get(key).copied())
            .unwrap_or(B256::ZERO)
    }

    /// Number of targets that have received at least one write.
    pub fn target_count(&self) -> usize {
        self.accounts.read().len()
    }
}

impl TargetRuntime for InMemoryTargetRuntime {
    fn apply_code(&self, target: Address, code: Bytes) -> Result<(), TargetRuntimeError> {
        let mut accounts = self.accounts.write();
        accounts.entry(target).or_default().code = Some(code);
        Ok(())
    }

    fn apply_storage_cell(
        &self,
        target: Address,
        key: B256,
        value: B256,
    ) -> Result<(), TargetRuntimeError> {
        let mut accounts = self.accounts.write();
        accounts.entry(target).or_default().storage.insert(key, value);
        Ok(())
    }
}
