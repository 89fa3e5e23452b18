//! Core domain types for graft upgrade bundles.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/graftlabs/graft/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod idents;
pub use idents::{ActionId, Idents};

mod action;
pub use action::{Action, ActionCfg, ActionPayload, ActionType};

mod commitment;
pub use commitment::{ActionProof, BundleCommitment};

mod events;
pub use events::{BundleEvent, BundleEvents};
