//! Error types for target runtime implementations.

use alloy_primitives::Address;
use thiserror::Error;

/// Error type for target runtime operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetRuntimeError {
    /// The runtime refuses to apply effects to this target.
    #[error("unknown target: {0}")]
    UnknownTarget(Address),

    /// Backing storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}
