//! Runtime lifecycle state of a [`crate::RowBuffer`].
//!
//! Unlike the compile-time type-state pattern used for connection protocols
//! elsewhere in this codebase, a row buffer's lifecycle is driven entirely
//! by runtime calls (`setup_schema`, then any number of `insert_rows`/
//! `flush`, then `close`), so it is tracked with a plain runtime enum rather
//! than a sealed marker trait.

/// Lifecycle state of a row buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Created but `setup_schema` has not yet been called.
    Uninitialized,
    /// Schema installed; `insert_rows` and `flush` are permitted.
    Ready,
    /// `close` has been called; every further operation is an error.
    Closed,
}

impl Default for BufferState {
    fn default() -> Self {
        Self::Uninitialized
    }
}

impl BufferState {
    /// Whether the buffer currently accepts `insert_rows`/`flush` calls.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Whether the buffer has been closed and is permanently unusable.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
