//! Row value coercion error types.

use thiserror::Error;

/// Errors that can occur while coercing a loosely-typed [`crate::RowValue`]
/// into a column's storage kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Value is null when the target column is not nullable.
    #[error("unexpected null value")]
    UnexpectedNull,

    /// The value's runtime shape does not match the expected storage kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Expected storage kind name.
        expected: &'static str,
        /// Actual value kind, as observed.
        actual: String,
    },

    /// Value is out of range for the target integer width.
    #[error("value out of range for {target_type}")]
    OutOfRange {
        /// Target storage kind name.
        target_type: &'static str,
    },

    /// Value could not be parsed as a decimal.
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    /// No conversion exists from the source value kind to the target kind.
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedConversion {
        /// Source value kind.
        from: String,
        /// Target storage kind name.
        to: &'static str,
    },
}
