//! Error types for parser sessions and tree edits.
//!
//! Malformed source is never an error: it becomes ERROR and MISSING nodes in
//! the tree (see [`SyntaxError`](crate::SyntaxError) for how those are
//! reported). The variants here are the few ways a call itself can fail.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by [`Parser`](crate::Parser) and
/// [`SyntaxTree::edit`](crate::SyntaxTree::edit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Reserving parser or tree storage failed.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    /// Offsets are 32-bit; longer sources cannot be represented.
    #[error("source of {len} bytes exceeds the 4 GiB limit")]
    SourceTooLarge { len: usize },

    /// An edit record that cannot describe a change to this tree.
    #[error("invalid edit: {reason}")]
    InvalidEdit { reason: &'static str },
}

impl Error {
    /// Create an invalid edit error.
    pub fn invalid_edit(reason: &'static str) -> Self {
        Self::InvalidEdit { reason }
    }
}
