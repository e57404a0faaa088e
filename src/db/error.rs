//! Errors raised by key-value store backends.

use derive_getters::Getters;
use derive_more::{Display, Error};

/// Store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreOp {
    /// Opening or migrating the backend.
    #[display("open")]
    Open,
    /// Reading a key.
    #[display("read")]
    Read,
    /// Writing a key.
    #[display("write")]
    Write,
    /// Deleting a key.
    #[display("remove")]
    Remove,
}

/// A failed read, write or open, naming the backend and the key or path.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, Getters)]
#[display("{backend} store could not {op} '{target}': {reason}")]
pub struct StoreError {
    #[getter(skip)]
    backend: &'static str,
    op: StoreOp,
    /// Key, or database path for [`StoreOp::Open`].
    target: String,
    reason: String,
}

impl StoreError {
    /// Failure of `op` on `target` in `backend`.
    pub fn new(
        backend: &'static str,
        op: StoreOp,
        target: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self {
            backend,
            op,
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Name of the failing backend.
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}
