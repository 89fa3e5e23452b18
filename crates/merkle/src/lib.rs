//! Merkle bundle construction and inclusion proof verification.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/graftlabs/graft/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::BundleError;

mod tree;
pub use tree::{ActionBundle, BundledAction, build_action_bundle};

mod verify;
pub use verify::verify_action_proof;
