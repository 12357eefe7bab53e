use std::collections::TryReserveError;

use thiserror::Error;

/// Everything a tree operation can report back to its caller. No operation retries internally and
/// every failure leaves the tree exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node slot or a path stack could not be allocated.
    #[error("allocation failed")]
    AllocationFailure,
    /// The key isn't stored in the tree, or it is the tree's sentinel key which can never be
    /// removed.
    #[error("key {0} not found")]
    KeyNotFound(i64),
    /// The key is already stored in the tree.
    #[error("key {0} already present")]
    DuplicateKey(i64),
}

impl From<TryReserveError> for TreeError {
    fn from(_: TryReserveError) -> Self {
        TreeError::AllocationFailure
    }
}
