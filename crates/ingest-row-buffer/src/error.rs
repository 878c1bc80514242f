//! Row buffer error types.

use thiserror::Error;

use ingest_row_types::{ColumnLogicalType, ColumnPhysicalType, TypeError};

use crate::channel::AllocatorError;

/// Errors that can occur during row buffer operations.
///
/// Every variant here is terminal to the operation that raised it — the
/// buffer never retries and never leaves partial durable state (see
/// [`RowBufferError::is_terminal`]). The buffer records the owning
/// channel's fully-qualified name on the tracing span before any of these
/// propagate; see [`crate::instrumentation`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowBufferError {
    /// A row was malformed: an empty or blank column name, a reference to a
    /// column not present in the schema, or a value that could not be
    /// coerced into its column's storage kind.
    #[error("invalid row: {reason}")]
    InvalidRow {
        /// Human-readable description of what was wrong with the row.
        reason: String,
    },

    /// The schema requested a (logical type, physical type) pair that has
    /// no defined storage mapping.
    #[error("unknown data type: logical={logical:?}, physical={physical:?}")]
    UnknownDataType {
        /// The logical type that had no mapping.
        logical: ColumnLogicalType,
        /// The physical type that had no mapping.
        physical: ColumnPhysicalType,
    },

    /// `insert_rows` or `flush` was called before `setup_schema`.
    #[error("row buffer schema is not ready")]
    SchemaNotReady,

    /// An operation was attempted after `close()`.
    #[error("row buffer is already closed")]
    AlreadyClosed,

    /// The backing allocator failed to satisfy a reservation.
    #[error("allocator error: {0}")]
    Allocator(#[from] AllocatorError),
}

impl From<TypeError> for RowBufferError {
    fn from(err: TypeError) -> Self {
        Self::InvalidRow {
            reason: err.to_string(),
        }
    }
}

impl RowBufferError {
    /// Whether this error is terminal to its operation.
    ///
    /// Every row-buffer error is terminal: §7 of the design notes states
    /// the buffer never retries internally. The method is kept anyway
    /// because the surrounding flush scheduler (out of scope for this
    /// crate) consults it when deciding whether to retry the whole
    /// `insert_rows` call with a corrected batch.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        true
    }

    /// Whether this error originated from an unresolvable schema, as
    /// opposed to a malformed row.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::UnknownDataType { .. })
    }
}

/// Result type for row buffer operations.
pub type Result<T> = std::result::Result<T, RowBufferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_terminal() {
        let errors = [
            RowBufferError::InvalidRow {
                reason: "x".to_string(),
            },
            RowBufferError::UnknownDataType {
                logical: ColumnLogicalType::Date,
                physical: ColumnPhysicalType::Sb4,
            },
            RowBufferError::SchemaNotReady,
            RowBufferError::AlreadyClosed,
            RowBufferError::Allocator(AllocatorError::Exhausted { requested: 1 }),
        ];
        for error in errors {
            assert!(error.is_terminal());
        }
    }

    #[test]
    fn type_error_maps_to_invalid_row() {
        let err: RowBufferError = TypeError::UnexpectedNull.into();
        assert!(matches!(err, RowBufferError::InvalidRow { .. }));
    }
}
