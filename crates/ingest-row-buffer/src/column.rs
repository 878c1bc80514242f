//! Typed, append-only column storage.
//!
//! Each column vector pairs a typed `Vec` with a parallel validity mask.
//! Growth is handled by `Vec`'s own reallocation, so appends are always
//! grow-safe without any explicit capacity check from the caller.

use rust_decimal::Decimal;

use ingest_row_types::StorageKind;

/// One column's backing storage, typed to its resolved [`StorageKind`].
///
/// `transfer_out` hands the caller an exclusively-owned copy of the current
/// contents (via `std::mem::take`, which Rust's ownership model makes
/// inherently exclusive) and leaves `self` logically empty, ready to be
/// reused only after [`ColumnVector::clear`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnVector {
    /// 8-bit signed integer storage.
    I8 {
        /// Per-row values; meaningless where `valid[i]` is false.
        values: Vec<i8>,
        /// Per-row validity mask.
        valid: Vec<bool>,
    },
    /// 16-bit signed integer storage.
    I16 {
        /// Per-row values.
        values: Vec<i16>,
        /// Per-row validity mask.
        valid: Vec<bool>,
    },
    /// 32-bit signed integer storage.
    I32 {
        /// Per-row values.
        values: Vec<i32>,
        /// Per-row validity mask.
        valid: Vec<bool>,
    },
    /// 64-bit signed integer storage.
    I64 {
        /// Per-row values.
        values: Vec<i64>,
        /// Per-row validity mask.
        valid: Vec<bool>,
    },
    /// Fixed-point decimal storage.
    Decimal128 {
        /// Per-row values.
        values: Vec<Decimal>,
        /// Per-row validity mask.
        valid: Vec<bool>,
    },
    /// UTF-8 text storage.
    Utf8 {
        /// Per-row values.
        values: Vec<String>,
        /// Per-row validity mask.
        valid: Vec<bool>,
    },
}

impl ColumnVector {
    /// Allocate an empty column vector of the given storage kind,
    /// preallocated to `capacity` rows.
    #[must_use]
    pub fn new(storage_kind: StorageKind, capacity: usize) -> Self {
        match storage_kind {
            StorageKind::I8 => Self::I8 {
                values: Vec::with_capacity(capacity),
                valid: Vec::with_capacity(capacity),
            },
            StorageKind::I16 => Self::I16 {
                values: Vec::with_capacity(capacity),
                valid: Vec::with_capacity(capacity),
            },
            StorageKind::I32 => Self::I32 {
                values: Vec::with_capacity(capacity),
                valid: Vec::with_capacity(capacity),
            },
            StorageKind::I64 => Self::I64 {
                values: Vec::with_capacity(capacity),
                valid: Vec::with_capacity(capacity),
            },
            StorageKind::Decimal128 { .. } => Self::Decimal128 {
                values: Vec::with_capacity(capacity),
                valid: Vec::with_capacity(capacity),
            },
            StorageKind::Utf8 => Self::Utf8 {
                values: Vec::with_capacity(capacity),
                valid: Vec::with_capacity(capacity),
            },
        }
    }

    /// Number of rows currently held (valid and null alike).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::I8 { valid, .. }
            | Self::I16 { valid, .. }
            | Self::I32 { valid, .. }
            | Self::I64 { valid, .. }
            | Self::Decimal128 { valid, .. }
            | Self::Utf8 { valid, .. } => valid.len(),
        }
    }

    /// Whether the column currently holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a null cell.
    pub fn append_null(&mut self) {
        match self {
            Self::I8 { values, valid } => {
                values.push(0);
                valid.push(false);
            }
            Self::I16 { values, valid } => {
                values.push(0);
                valid.push(false);
            }
            Self::I32 { values, valid } => {
                values.push(0);
                valid.push(false);
            }
            Self::I64 { values, valid } => {
                values.push(0);
                valid.push(false);
            }
            Self::Decimal128 { values, valid } => {
                values.push(Decimal::ZERO);
                valid.push(false);
            }
            Self::Utf8 { values, valid } => {
                values.push(String::new());
                valid.push(false);
            }
        }
    }

    /// Append a signed integer cell. Panics if this column is not an
    /// integer-kind vector; row conversion only calls this after resolving
    /// the column's storage kind, so a mismatch would be a conversion bug.
    pub fn append_i64(&mut self, value: i64) {
        match self {
            Self::I8 { values, valid } => {
                values.push(value as i8);
                valid.push(true);
            }
            Self::I16 { values, valid } => {
                values.push(value as i16);
                valid.push(true);
            }
            Self::I32 { values, valid } => {
                values.push(value as i32);
                valid.push(true);
            }
            Self::I64 { values, valid } => {
                values.push(value);
                valid.push(true);
            }
            _ => unreachable!("append_i64 called on a non-integer column vector"),
        }
    }

    /// Append a decimal cell.
    pub fn append_decimal(&mut self, value: Decimal) {
        match self {
            Self::Decimal128 { values, valid } => {
                values.push(value);
                valid.push(true);
            }
            _ => unreachable!("append_decimal called on a non-decimal column vector"),
        }
    }

    /// Append a text cell.
    pub fn append_str(&mut self, value: String) {
        match self {
            Self::Utf8 { values, valid } => {
                values.push(value);
                valid.push(true);
            }
            _ => unreachable!("append_str called on a non-utf8 column vector"),
        }
    }

    /// Pad the vector with nulls until its length equals `target_len`.
    ///
    /// `insert_rows` calls `append_null` directly for every untouched
    /// column of each row, which already keeps every vector in lockstep;
    /// `flush` calls this as the explicit, defensive "set validity count"
    /// step the design calls for, so the invariant `len == cur_row_index`
    /// holds even if a future caller appends out of the usual row loop.
    pub fn pad_to(&mut self, target_len: usize) {
        while self.len() < target_len {
            self.append_null();
        }
    }

    /// Take ownership of the current contents, leaving `self` empty with no
    /// retained capacity. The row buffer's `reset()` reallocates fresh
    /// vectors rather than reusing this one after a flush.
    #[must_use]
    pub fn transfer_out(&mut self) -> Self {
        let capacity = 0;
        let empty = Self::new(self.storage_kind(), capacity);
        std::mem::replace(self, empty)
    }

    /// Clear the vector's contents while retaining its allocation, for
    /// reuse after `reset()`.
    pub fn clear(&mut self) {
        match self {
            Self::I8 { values, valid } => {
                values.clear();
                valid.clear();
            }
            Self::I16 { values, valid } => {
                values.clear();
                valid.clear();
            }
            Self::I32 { values, valid } => {
                values.clear();
                valid.clear();
            }
            Self::I64 { values, valid } => {
                values.clear();
                valid.clear();
            }
            Self::Decimal128 { values, valid } => {
                values.clear();
                valid.clear();
            }
            Self::Utf8 { values, valid } => {
                values.clear();
                valid.clear();
            }
        }
    }

    /// The storage kind backing this vector.
    #[must_use]
    pub fn storage_kind(&self) -> StorageKind {
        match self {
            Self::I8 { .. } => StorageKind::I8,
            Self::I16 { .. } => StorageKind::I16,
            Self::I32 { .. } => StorageKind::I32,
            Self::I64 { .. } => StorageKind::I64,
            Self::Decimal128 { .. } => StorageKind::Decimal128 {
                precision: 38,
                scale: 0,
            },
            Self::Utf8 { .. } => StorageKind::Utf8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_pad_keep_vectors_in_lockstep() {
        let mut v = ColumnVector::new(StorageKind::I32, 4);
        v.append_i64(1);
        v.append_null();
        assert_eq!(v.len(), 2);
        v.pad_to(5);
        assert_eq!(v.len(), 5);
    }

    #[test]
    fn transfer_out_leaves_source_empty() {
        let mut v = ColumnVector::new(StorageKind::Utf8, 4);
        v.append_str("hi".to_string());
        let taken = v.transfer_out();
        assert_eq!(taken.len(), 1);
        assert_eq!(v.len(), 0);
    }

    #[test]
    fn clear_retains_capacity_conceptually() {
        let mut v = ColumnVector::new(StorageKind::I64, 4);
        v.append_i64(7);
        v.clear();
        assert_eq!(v.len(), 0);
    }

    #[test]
    #[should_panic(expected = "append_i64 called on a non-integer column vector")]
    fn append_i64_on_utf8_panics() {
        let mut v = ColumnVector::new(StorageKind::Utf8, 0);
        v.append_i64(1);
    }
}
