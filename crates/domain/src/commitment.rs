//! Bundle commitments and inclusion proofs.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Commitment to an approved action bundle: Merkle root plus action count.
///
/// The all-zero root with size 0 is the reserved "no bundle" sentinel and
/// never identifies a real bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleCommitment {
    /// Merkle root over the canonical action encodings.
    pub root: B256,
    /// Number of committed actions (unpadded).
    pub size: u64,
}

impl BundleCommitment {
    /// The reserved "no bundle" sentinel.
    pub const EMPTY: Self = Self { root: B256::ZERO, size: 0 };

    /// Create a commitment from a root and action count.
    pub const fn new(root: B256, size: u64) -> Self {
        Self { root, size }
    }

    /// Whether this is the reserved sentinel value.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Inclusion proof for one action of a committed bundle.
///
/// Sibling digests are ordered leaf to root; operand order at each level is
/// derived from the index's parity, so entries carry no direction flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionProof {
    /// Leaf index of the action within the bundle.
    pub action_index: u64,
    /// Sibling digests, one per tree level.
    pub siblings: Vec<B256>,
}

impl ActionProof {
    /// Create a proof from an index and sibling path.
    pub const fn new(action_index: u64, siblings: Vec<B256>) -> Self {
        Self { action_index, siblings }
    }
}
