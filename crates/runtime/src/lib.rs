//! In-memory target runtime for graft.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/graftlabs/graft/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod memory;
pub use memory::InMemoryTargetRuntime;
