//! Inclusion proof verification.

use graft_domain::{Action, ActionProof, BundleCommitment};

use crate::tree::{hash_pair, tree_height};

/// Verify that `action` sits at `proof.action_index` under the committed
/// root.
///
/// Recomputes the leaf digest from the action's canonical encoding and
/// folds the sibling path upward, choosing operand order from the index's
/// per-level parity (even index is the left operand) — the same convention
/// the builder uses. Fails closed: an index at or past the committed size,
/// a sibling list whose length differs from the tree height for that size,
/// or any digest mismatch yields `false`. Malformed input never panics.
pub fn verify_action_proof(
    commitment: &BundleCommitment,
    action: &Action,
    proof: &ActionProof,
) -> bool {
    if commitment.is_empty() || proof.action_index >= commitment.size {
        return false;
    }
    if proof.siblings.len() != tree_height(commitment.size) {
        return false;
    }

    let mut node = action.id().0;
    let mut index = proof.action_index;
    for sibling in &proof.siblings {
        node = if index & 1 == 0 { hash_pair(&node, sibling) } else { hash_pair(sibling, &node) };
        index >>= 1;
    }
    node == commitment.root
}
