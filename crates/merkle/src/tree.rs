//! Merkle bundle construction.

use alloy_primitives::{B256, keccak256};
use graft_domain::{Action, ActionProof, BundleCommitment};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::BundleError;

/// Digest used to pad the leaf level to a power of two.
///
/// Padding leaves are unprovable: no action's canonical encoding hashes to
/// the zero digest, and the verifier rejects indices at or past the
/// committed size before touching the tree.
pub(crate) const EMPTY_LEAF: B256 = B256::ZERO;

/// Hash an interior node from its two children.
///
/// Shared by the builder and the verifier so the node convention cannot
/// drift between the two.
pub(crate) fn hash_pair(left: &B256, right: &B256) -> B256 {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(left.as_slice());
    preimage[32..].copy_from_slice(right.as_slice());
    keccak256(preimage)
}

/// Number of leaves after padding to the next power of two.
pub(crate) fn padded_leaf_count(size: u64) -> u64 {
    size.max(1).next_power_of_two()
}

/// Number of tree levels above the leaves for a bundle of `size` actions.
///
/// A size-1 bundle has height 0: its root is the leaf itself and its proof
/// carries no siblings.
pub(crate) fn tree_height(size: u64) -> usize {
    padded_leaf_count(size).trailing_zeros() as usize
}

/// One action of a built bundle together with its inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledAction {
    /// The committed action.
    pub action: Action,
    /// Proof addressing the action's leaf under the bundle root.
    pub proof: ActionProof,
}

/// Output of the bundle builder: the root plus every action paired with its
/// proof.
///
/// Built offline, ahead of approval; the approval authority stores only the
/// commitment while the per-action proofs circulate to whoever executes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBundle {
    /// Merkle root over the canonical action encodings.
    pub root: B256,
    /// Actions in leaf order, each with its proof.
    pub actions: Vec<BundledAction>,
}

impl ActionBundle {
    /// Number of committed actions (unpadded).
    pub fn size(&self) -> u64 {
        self.actions.len() as u64
    }

    /// The commitment the approval authority stores for this bundle.
    pub fn commitment(&self) -> BundleCommitment {
        BundleCommitment::new(self.root, self.size())
    }
}

/// Build a Merkle bundle over an ordered list of actions.
///
/// Leaf `i` is the keccak256 digest of action `i`'s canonical encoding.
/// The leaf level is padded to the next power of two with the zero digest
/// and each interior node is `keccak256(left || right)`. Sibling lists are
/// ordered leaf to root; operand order at every level follows the index's
/// parity (even index is the left operand).
///
/// # Errors
///
/// Returns [`BundleError::Empty`] if `actions` is empty.
pub fn build_action_bundle(actions: &[Action]) -> Result<ActionBundle, BundleError> {
    if actions.is_empty() {
        return Err(BundleError::Empty);
    }

    let size = actions.len() as u64;
    let mut leaves: Vec<B256> = actions.iter().map(|action| action.id().0).collect();
    leaves.resize(padded_leaf_count(size) as usize, EMPTY_LEAF);

    // All levels, leaves first; the last level holds exactly the root.
    let mut levels = vec![leaves];
    while levels[levels.len() - 1].len() > 1 {
        let previous = &levels[levels.len() - 1];
        let mut next = Vec::with_capacity(previous.len() / 2);
        for pair in previous.chunks_exact(2) {
            next.push(hash_pair(&pair[0], &pair[1]));
        }
        levels.push(next);
    }
    let root = levels[levels.len() - 1][0];

    let height = tree_height(size);
    let actions = actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let mut siblings = Vec::with_capacity(height);
            let mut cursor = index;
            for level in &levels[..height] {
                siblings.push(level[cursor ^ 1]);
                cursor >>= 1;
            }
            BundledAction {
                action: action.clone(),
                proof: ActionProof::new(index as u64, siblings),
            }
        })
        .collect();

    debug!(%root, size, "built action bundle");
    Ok(ActionBundle { root, actions })
}
