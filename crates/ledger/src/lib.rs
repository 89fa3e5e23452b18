//! Approval and execution state machine for graft upgrade bundles.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/graftlabs/graft/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::LedgerError;

mod ledger;
pub use ledger::BundleLedger;
