//! Key-value store failures.

use derive_more::{Display, Error};

/// Store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreOp {
    /// Opening the backend or one of its connections.
    #[display("open")]
    Open,
    /// Bringing the schema up to date.
    #[display("migrate")]
    Migrate,
    /// Looking up one or more keys.
    #[display("read")]
    Read,
    /// Storing or removing a key.
    #[display("write")]
    Write,
}

/// A failed store operation, tagged with the call site that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("kv store {} failed: {} ({}:{})", op, reason, file, line)]
pub struct StoreError {
    /// What the store was doing.
    pub op: StoreOp,
    /// Backend message.
    pub reason: String,
    /// Line of the call site.
    pub line: u32,
    /// File of the call site.
    pub file: &'static str,
}

impl StoreError {
    /// Records a failure of `op` at the caller's location.
    #[track_caller]
    pub fn new(op: StoreOp, reason: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            op,
            reason: reason.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a failed [`StoreOp::Read`].
    #[track_caller]
    pub fn read(err: impl std::fmt::Display) -> Self {
        Self::new(StoreOp::Read, err.to_string())
    }

    /// Shorthand for a failed [`StoreOp::Write`].
    #[track_caller]
    pub fn write(err: impl std::fmt::Display) -> Self {
        Self::new(StoreOp::Write, err.to_string())
    }
}
