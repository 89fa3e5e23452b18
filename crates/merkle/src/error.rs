//! Error types for bundle construction.

use thiserror::Error;

/// Error type for bundle construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    /// The action list is empty. An empty bundle would commit to nothing
    /// and its root would alias the "no bundle" sentinel.
    #[error("bundle contains no actions")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_display() {
        let err = BundleError::Empty;
        assert_eq!(err.to_string(), "bundle contains no actions");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BundleError>();
    }
}
