//! Resolution of a [`ColumnDescriptor`] into a [`ColumnPlan`]: the concrete
//! storage kind and normalized name the column store actually appends into.

use thiserror::Error;

use crate::schema::{ColumnDescriptor, ColumnLogicalType, ColumnPhysicalType, PreservedMetadata};

/// The concrete, typed storage representation a column is appended into.
///
/// This is the target of schema resolution; every [`ColumnLogicalType`] /
/// [`ColumnPhysicalType`] pair the column store accepts maps to exactly one
/// `StorageKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// 8-bit signed integer (FIXED/SB1, scale 0).
    I8,
    /// 16-bit signed integer (FIXED/SB2, scale 0).
    I16,
    /// 32-bit signed integer (FIXED/SB4, scale 0).
    I32,
    /// 64-bit signed integer (FIXED/SB8, scale 0).
    I64,
    /// Fixed-point decimal with the given precision and scale.
    Decimal128 {
        /// Total significant digits.
        precision: u8,
        /// Digits right of the decimal point.
        scale: i8,
    },
    /// UTF-8 text.
    Utf8,
}

/// Errors encountered while resolving a [`ColumnDescriptor`] into a
/// [`ColumnPlan`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The (logical type, physical type) pair has no defined storage
    /// mapping.
    #[error("unknown data type: logical={logical}, physical={physical}")]
    UnknownDataType {
        /// The logical type as it appeared on the descriptor.
        logical: &'static str,
        /// The physical type as it appeared on the descriptor.
        physical: &'static str,
    },

    /// A `FIXED` column was missing the scale needed to pick its storage
    /// width.
    #[error("column {column} is FIXED but has no scale")]
    MissingScale {
        /// Normalized column name.
        column: String,
    },
}

/// The resolved plan for one column: its normalized name, storage kind, and
/// the metadata that must be preserved verbatim into the flush snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan {
    /// Normalized column name, used as the column store's lookup key.
    pub name: String,
    /// Concrete storage kind this column is appended into.
    pub storage_kind: StorageKind,
    /// Whether the column accepts NULL values.
    pub nullable: bool,
    /// Metadata preserved verbatim for the file footer.
    pub metadata: PreservedMetadata,
}

impl ColumnPlan {
    /// Resolve a column descriptor into a plan, or fail if its logical and
    /// physical type pair has no defined storage mapping.
    pub fn resolve(descriptor: &ColumnDescriptor) -> Result<Self, SchemaError> {
        let storage_kind = resolve_storage_kind(descriptor)?;
        Ok(Self {
            name: normalize_column_name(&descriptor.name),
            storage_kind,
            nullable: descriptor.nullable,
            metadata: PreservedMetadata::from_descriptor(descriptor),
        })
    }
}

fn resolve_storage_kind(descriptor: &ColumnDescriptor) -> Result<StorageKind, SchemaError> {
    use ColumnLogicalType as L;
    use ColumnPhysicalType as P;

    match (descriptor.logical_type, descriptor.physical_type) {
        (L::Fixed, P::Sb1) => resolve_fixed(descriptor, StorageKind::I8),
        (L::Fixed, P::Sb2) => resolve_fixed(descriptor, StorageKind::I16),
        (L::Fixed, P::Sb4) => resolve_fixed(descriptor, StorageKind::I32),
        (L::Fixed, P::Sb8) => resolve_fixed(descriptor, StorageKind::I64),
        (L::Fixed, P::Sb16) => resolve_decimal(descriptor),
        (L::Any | L::Array | L::Char | L::Text | L::Object | L::Variant, _) => {
            Ok(StorageKind::Utf8)
        }
        _ => Err(SchemaError::UnknownDataType {
            logical: logical_type_name(descriptor.logical_type),
            physical: physical_type_name(descriptor.physical_type),
        }),
    }
}

/// A `FIXED` column with an integer-width physical type stores as the
/// matching integer kind when scale is 0 or absent, and otherwise still
/// rounds to the integer physical width's decimal equivalent since the
/// declared physical width caps the representable magnitude.
fn resolve_fixed(
    descriptor: &ColumnDescriptor,
    integer_kind: StorageKind,
) -> Result<StorageKind, SchemaError> {
    match descriptor.scale {
        None | Some(0) => Ok(integer_kind),
        Some(scale) => {
            let precision = descriptor.precision.unwrap_or(38);
            Ok(StorageKind::Decimal128 { precision, scale })
        }
    }
}

fn resolve_decimal(descriptor: &ColumnDescriptor) -> Result<StorageKind, SchemaError> {
    let scale = descriptor
        .scale
        .ok_or_else(|| SchemaError::MissingScale {
            column: normalize_column_name(&descriptor.name),
        })?;
    let precision = descriptor.precision.unwrap_or(38);
    Ok(StorageKind::Decimal128 { precision, scale })
}

fn logical_type_name(logical_type: ColumnLogicalType) -> &'static str {
    PreservedMetadata::from_descriptor(&ColumnDescriptor::new(
        String::new(),
        logical_type,
        ColumnPhysicalType::Lob,
    ))
    .logical_type
}

fn physical_type_name(physical_type: ColumnPhysicalType) -> &'static str {
    PreservedMetadata::from_descriptor(&ColumnDescriptor::new(
        String::new(),
        ColumnLogicalType::Any,
        physical_type,
    ))
    .physical_type
}

/// Normalize a column name the way the server's identifier-folding rules
/// do: a quoted identifier (`"Some Name"`) is unwrapped and taken verbatim
/// (case-sensitive); an unquoted identifier is folded to uppercase.
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        name[1..name.len() - 1].to_string()
    } else {
        name.to_uppercase()
    }
}
