//! Bundle ledger implementation.

use std::collections::BTreeSet;

use alloy_primitives::{Address, B256};
use graft_domain::{Action, ActionPayload, ActionProof, BundleCommitment, BundleEvent, BundleEvents};
use graft_merkle::verify_action_proof;
use graft_traits::TargetRuntime;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::LedgerError;

/// The active commitment plus per-index execution progress.
#[derive(Debug)]
struct ActiveBundle {
    commitment: BundleCommitment,
    executed: BTreeSet<u64>,
}

impl ActiveBundle {
    fn executed_count(&self) -> u64 {
        self.executed.len() as u64
    }
}

/// Ledger state guarded by the transaction lock.
#[derive(Debug)]
struct LedgerInner {
    owner: Address,
    active: Option<ActiveBundle>,
}

/// Authoritative ledger for Merkle-committed upgrade bundles.
///
/// Holds the single active commitment and the set of executed action
/// indices. Approval and cancellation are owner-gated; execution is
/// permissionless and authorized purely by proof of inclusion. Two distinct
/// capability checks, on purpose: the owner gate never touches execution,
/// and execution never consults the caller.
///
/// Every operation is one serialized transaction. The state lock is held
/// from first check to final mutation, and the target runtime write happens
/// inside the same critical section as the executed-mark, so an action's
/// effect and its replay protection land together or not at all.
#[derive(Debug)]
pub struct BundleLedger<R> {
    inner: Mutex<LedgerInner>,
    runtime: R,
    events: BundleEvents,
}

impl<R> BundleLedger<R> {
    /// Create a ledger with the given initial owner and no active bundle.
    pub fn new(owner: Address, runtime: R) -> Self {
        Self {
            inner: Mutex::new(LedgerInner { owner, active: None }),
            runtime,
            events: BundleEvents::new(),
        }
    }

    /// Current approval authority.
    pub fn owner(&self) -> Address {
        self.inner.lock().owner
    }

    /// Event registry for bundle lifecycle notifications.
    pub const fn events(&self) -> &BundleEvents {
        &self.events
    }

    /// A reference to the target runtime collaborator.
    pub const fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Root of the active commitment, or the zero sentinel when none.
    pub fn current_bundle_hash(&self) -> B256 {
        self.inner.lock().active.as_ref().map_or(B256::ZERO, |active| active.commitment.root)
    }

    /// Size of the active commitment, or 0 when none.
    pub fn current_bundle_size(&self) -> u64 {
        self.inner.lock().active.as_ref().map_or(0, |active| active.commitment.size)
    }

    /// Number of actions of the active bundle executed so far.
    pub fn executed_count(&self) -> u64 {
        self.inner.lock().active.as_ref().map_or(0, ActiveBundle::executed_count)
    }

    /// Whether a bundle is active (approved and not yet exhausted).
    pub fn has_active_bundle(&self) -> bool {
        self.inner.lock().active.is_some()
    }

    /// Transfer ownership to a new authority, unconditionally.
    ///
    /// # Errors
    ///
    /// Fails with [`LedgerError::NotOwner`] unless `caller` is the current
    /// owner.
    pub fn set_owner(&self, caller: Address, new_owner: Address) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock();
        if caller != inner.owner {
            return Err(LedgerError::NotOwner);
        }
        let previous = inner.owner;
        inner.owner = new_owner;
        drop(inner);

        info!(%previous, %new_owner, "owner changed");
        self.events.publish(BundleEvent::OwnerChanged { previous, new: new_owner });
        Ok(())
    }

    /// Approve a new bundle commitment, activating it for execution.
    ///
    /// Clears any prior execution progress; the ledger starts the new
    /// bundle with an empty executed set.
    ///
    /// # Errors
    ///
    /// Fails with [`LedgerError::NotOwner`] for non-owner callers, with
    /// [`LedgerError::EmptyBundle`] if `root` is the zero sentinel or
    /// `size` is 0, and with [`LedgerError::BundleAlreadyActive`] while a
    /// previously approved bundle has not been exhausted or canceled.
    pub fn approve_transaction_bundle(
        &self,
        caller: Address,
        root: B256,
        size: u64,
    ) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock();
        if caller != inner.owner {
            return Err(LedgerError::NotOwner);
        }
        if root == B256::ZERO || size == 0 {
            return Err(LedgerError::EmptyBundle);
        }
        if inner.active.is_some() {
            return Err(LedgerError::BundleAlreadyActive);
        }
        inner.active = Some(ActiveBundle {
            commitment: BundleCommitment::new(root, size),
            executed: BTreeSet::new(),
        });
        drop(inner);

        info!(%root, size, "bundle approved");
        self.events.publish(BundleEvent::BundleApproved { root, size });
        Ok(())
    }

    /// Cancel the active bundle, discarding execution progress.
    ///
    /// Already-applied target effects are not rolled back: cancellation
    /// stops further execution, it does not undo completed side effects.
    ///
    /// # Errors
    ///
    /// Fails with [`LedgerError::NotOwner`] for non-owner callers and with
    /// [`LedgerError::NoActiveBundle`] when nothing is active.
    pub fn cancel_transaction_bundle(&self, caller: Address) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock();
        if caller != inner.owner {
            return Err(LedgerError::NotOwner);
        }
        let Some(active) = inner.active.take() else {
            return Err(LedgerError::NoActiveBundle);
        };
        drop(inner);

        let executed = active.executed_count();
        warn!(root = %active.commitment.root, executed, "bundle canceled");
        self.events.publish(BundleEvent::BundleCanceled {
            root: active.commitment.root,
            executed,
        });
        Ok(())
    }
}

impl<R: TargetRuntime> BundleLedger<R> {
    /// Execute one committed action.
    ///
    /// Permissionless: any caller may submit any action committed under the
    /// active root, in any order. The ledger verifies inclusion against the
    /// active commitment, rejects replays of the index, applies the effect
    /// through the target runtime, and marks the index executed. When the
    /// final index lands, the bundle auto-completes: the commitment clears
    /// and the authority may approve the next bundle.
    ///
    /// # Errors
    ///
    /// Fails with [`LedgerError::NoActiveBundle`] when nothing is active,
    /// [`LedgerError::InvalidProof`] when the proof does not match the
    /// commitment, [`LedgerError::AlreadyExecuted`] on a replayed index,
    /// and [`LedgerError::Runtime`] when the target runtime rejects the
    /// effect (the index stays unexecuted and may be resubmitted).
    pub fn execute_action(&self, action: &Action, proof: &ActionProof) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock();
        let Some(active) = inner.active.as_mut() else {
            return Err(LedgerError::NoActiveBundle);
        };

        if !verify_action_proof(&active.commitment, action, proof) {
            return Err(LedgerError::InvalidProof);
        }
        if active.executed.contains(&proof.action_index) {
            return Err(LedgerError::AlreadyExecuted);
        }

        match &action.payload {
            ActionPayload::SetCode(code) => {
                self.runtime.apply_code(action.target, code.clone())?;
            }
            ActionPayload::SetStorage { key, value } => {
                self.runtime.apply_storage_cell(action.target, *key, *value)?;
            }
        }

        active.executed.insert(proof.action_index);
        debug!(index = proof.action_index, target = %action.target, "action executed");

        let completed = (active.executed_count() == active.commitment.size)
            .then_some(active.commitment.root);
        if completed.is_some() {
            inner.active = None;
        }
        drop(inner);

        self.events.publish(BundleEvent::ActionExecuted {
            index: proof.action_index,
            id: action.id(),
        });
        if let Some(root) = completed {
            info!(%root, "bundle fully executed");
            self.events.publish(BundleEvent::BundleCompleted { root });
        }
        Ok(())
    }
}
