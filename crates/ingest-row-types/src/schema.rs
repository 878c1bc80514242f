//! Column descriptors as handed down by the server, and the metadata that
//! must survive verbatim through to the persisted file footer.

use std::collections::BTreeMap;

/// The server's logical type for a column, independent of its physical
/// storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColumnLogicalType {
    /// Untyped column accepting any scalar or semi-structured value.
    Any,
    /// Boolean.
    Boolean,
    /// Synthetic row-index column.
    RowIndex,
    /// Always-null column.
    Null,
    /// Floating point.
    Real,
    /// Fixed-point numeric (integer or decimal, per precision/scale).
    Fixed,
    /// Variable-length text.
    Text,
    /// Fixed-length text.
    Char,
    /// Variable-length binary.
    Binary,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp with local time zone.
    TimestampLtz,
    /// Timestamp without time zone.
    TimestampNtz,
    /// Timestamp with an explicit per-value time zone offset.
    TimestampTz,
    /// Interval (year-month or day-time).
    Interval,
    /// Uninterpreted raw bytes.
    Raw,
    /// Semi-structured array.
    Array,
    /// Semi-structured object (key-value map).
    Object,
    /// Semi-structured variant (any JSON-like value).
    Variant,
    /// Structured row (nested struct).
    Row,
    /// Monotonic sequence / identity column.
    Sequence,
    /// Function/computed column reference.
    Function,
    /// Server-defined user type, not covered by any other variant.
    UserDefinedType,
}

/// The server's physical storage type for a column, which together with
/// precision/scale determines the concrete [`crate::StorageKind`] the row
/// buffer appends into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColumnPhysicalType {
    /// Synthetic row-index storage.
    RowIndex,
    /// IEEE-754 double.
    Double,
    /// Signed byte (1-byte fixed-point storage).
    Sb1,
    /// Signed 2-byte fixed-point storage.
    Sb2,
    /// Signed 4-byte fixed-point storage.
    Sb4,
    /// Signed 8-byte fixed-point storage.
    Sb8,
    /// Signed 16-byte fixed-point storage (decimal128).
    Sb16,
    /// Large object (variable-length text or binary).
    Lob,
    /// Fixed or variable-length binary.
    Binary,
    /// Nested row storage.
    Row,
}

/// The schema description for one column, as handed down ahead of row
/// ingestion. This is the input to schema resolution; see
/// [`crate::ColumnPlan`] for the resolved storage-side plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name as it appears in the server schema, not yet normalized.
    pub name: String,
    /// Logical type.
    pub logical_type: ColumnLogicalType,
    /// Physical storage type.
    pub physical_type: ColumnPhysicalType,
    /// Total number of significant digits, for `FIXED` columns.
    pub precision: Option<u8>,
    /// Number of digits to the right of the decimal point, for `FIXED`
    /// columns. A scale of 0 indicates an integer.
    pub scale: Option<i8>,
    /// Maximum length in characters, for text columns.
    pub char_length: Option<u32>,
    /// Maximum length in bytes, for text or binary columns.
    pub byte_length: Option<u32>,
    /// Whether the column accepts NULL values.
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Construct a descriptor with no precision/scale/length constraints,
    /// nullable by default. Intended for tests and call sites building up a
    /// descriptor with the builder-style `with_*` methods below.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        logical_type: ColumnLogicalType,
        physical_type: ColumnPhysicalType,
    ) -> Self {
        Self {
            name: name.into(),
            logical_type,
            physical_type,
            precision: None,
            scale: None,
            char_length: None,
            byte_length: None,
            nullable: true,
        }
    }

    /// Set precision and scale.
    #[must_use]
    pub fn with_precision_scale(mut self, precision: u8, scale: i8) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Set the maximum character length.
    #[must_use]
    pub fn with_char_length(mut self, char_length: u32) -> Self {
        self.char_length = Some(char_length);
        self
    }

    /// Set the maximum byte length.
    #[must_use]
    pub fn with_byte_length(mut self, byte_length: u32) -> Self {
        self.byte_length = Some(byte_length);
        self
    }

    /// Set nullability.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// The subset of a column's schema that must be preserved verbatim into the
/// flush snapshot's file-level column metadata, regardless of how it was
/// resolved into a [`crate::StorageKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreservedMetadata {
    /// Physical type, rendered the way the persisted footer expects.
    pub physical_type: &'static str,
    /// Logical type, rendered the way the persisted footer expects.
    pub logical_type: &'static str,
    /// Precision, if any.
    pub precision: Option<u8>,
    /// Scale, if any.
    pub scale: Option<i8>,
    /// Character length, if any.
    pub char_length: Option<u32>,
    /// Byte length, if any.
    pub byte_length: Option<u32>,
}

impl PreservedMetadata {
    /// Build preserved metadata from a column descriptor.
    #[must_use]
    pub fn from_descriptor(descriptor: &ColumnDescriptor) -> Self {
        Self {
            physical_type: physical_type_name(descriptor.physical_type),
            logical_type: logical_type_name(descriptor.logical_type),
            precision: descriptor.precision,
            scale: descriptor.scale,
            char_length: descriptor.char_length,
            byte_length: descriptor.byte_length,
        }
    }

    /// Render as the verbatim string-keyed map the file footer serializes,
    /// omitting absent fields.
    #[must_use]
    pub fn to_metadata_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        map.insert("physicalType", self.physical_type.to_string());
        map.insert("logicalType", self.logical_type.to_string());
        if let Some(precision) = self.precision {
            map.insert("precision", precision.to_string());
        }
        if let Some(scale) = self.scale {
            map.insert("scale", scale.to_string());
        }
        if let Some(char_length) = self.char_length {
            map.insert("charLength", char_length.to_string());
        }
        if let Some(byte_length) = self.byte_length {
            map.insert("byteLength", byte_length.to_string());
        }
        map
    }
}

fn logical_type_name(logical_type: ColumnLogicalType) -> &'static str {
    match logical_type {
        ColumnLogicalType::Any => "ANY",
        ColumnLogicalType::Boolean => "BOOLEAN",
        ColumnLogicalType::RowIndex => "ROWINDEX",
        ColumnLogicalType::Null => "NULL",
        ColumnLogicalType::Real => "REAL",
        ColumnLogicalType::Fixed => "FIXED",
        ColumnLogicalType::Text => "TEXT",
        ColumnLogicalType::Char => "CHAR",
        ColumnLogicalType::Binary => "BINARY",
        ColumnLogicalType::Date => "DATE",
        ColumnLogicalType::Time => "TIME",
        ColumnLogicalType::TimestampLtz => "TIMESTAMP_LTZ",
        ColumnLogicalType::TimestampNtz => "TIMESTAMP_NTZ",
        ColumnLogicalType::TimestampTz => "TIMESTAMP_TZ",
        ColumnLogicalType::Interval => "INTERVAL",
        ColumnLogicalType::Raw => "RAW",
        ColumnLogicalType::Array => "ARRAY",
        ColumnLogicalType::Object => "OBJECT",
        ColumnLogicalType::Variant => "VARIANT",
        ColumnLogicalType::Row => "ROW",
        ColumnLogicalType::Sequence => "SEQUENCE",
        ColumnLogicalType::Function => "FUNCTION",
        ColumnLogicalType::UserDefinedType => "USER_DEFINED_TYPE",
    }
}

fn physical_type_name(physical_type: ColumnPhysicalType) -> &'static str {
    match physical_type {
        ColumnPhysicalType::RowIndex => "ROWINDEX",
        ColumnPhysicalType::Double => "DOUBLE",
        ColumnPhysicalType::Sb1 => "SB1",
        ColumnPhysicalType::Sb2 => "SB2",
        ColumnPhysicalType::Sb4 => "SB4",
        ColumnPhysicalType::Sb8 => "SB8",
        ColumnPhysicalType::Sb16 => "SB16",
        ColumnPhysicalType::Lob => "LOB",
        ColumnPhysicalType::Binary => "BINARY",
        ColumnPhysicalType::Row => "ROW",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserved_metadata_omits_absent_fields() {
        let descriptor = ColumnDescriptor::new(
            "c1",
            ColumnLogicalType::Text,
            ColumnPhysicalType::Lob,
        )
        .with_char_length(128);
        let metadata = PreservedMetadata::from_descriptor(&descriptor);
        let map = metadata.to_metadata_map();
        assert_eq!(map.get("physicalType"), Some(&"LOB".to_string()));
        assert_eq!(map.get("logicalType"), Some(&"TEXT".to_string()));
        assert_eq!(map.get("charLength"), Some(&"128".to_string()));
        assert!(!map.contains_key("precision"));
        assert!(!map.contains_key("scale"));
    }

    #[test]
    fn preserved_metadata_includes_precision_scale() {
        let descriptor = ColumnDescriptor::new(
            "c2",
            ColumnLogicalType::Fixed,
            ColumnPhysicalType::Sb4,
        )
        .with_precision_scale(9, 2);
        let map = PreservedMetadata::from_descriptor(&descriptor).to_metadata_map();
        assert_eq!(map.get("precision"), Some(&"9".to_string()));
        assert_eq!(map.get("scale"), Some(&"2".to_string()));
    }
}
