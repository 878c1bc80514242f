//! The loosely-typed value a caller supplies for a single row cell.

use bytes::Bytes;

use crate::error::TypeError;

/// A loosely-typed value for one cell of an incoming row.
///
/// Callers build rows out of [`RowValue`]s directly, or more commonly via
/// [`IntoRowValue`] implementations on ordinary Rust types. Row conversion
/// (in `ingest-row-buffer`) coerces each `RowValue` into the storage kind
/// dictated by the column's schema plan.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer. Narrower FIXED columns (SB1/SB2/SB4) range-check
    /// on coercion.
    Int(i64),
    /// 64-bit floating point, accepted where a decimal or string column
    /// expects a numeric literal.
    Float(f64),
    /// UTF-8 text.
    String(String),
    /// Raw bytes.
    Bytes(Bytes),
    /// A value already parsed as a fixed-point decimal.
    #[cfg(feature = "decimal")]
    Decimal(rust_decimal::Decimal),
}

impl RowValue {
    /// True if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Best-effort byte length of the value's string representation, used
    /// for the `buffer_size` accounting of string-like columns.
    #[must_use]
    pub fn display_byte_len(&self) -> usize {
        self.to_display_string().len()
    }

    /// Render the value the way a TEXT/CHAR/VARIANT column would store it.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::String(v) => v.clone(),
            Self::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
            #[cfg(feature = "decimal")]
            Self::Decimal(v) => v.to_string(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            #[cfg(feature = "decimal")]
            Self::Decimal(_) => "decimal",
        }
    }

    /// Coerce to a signed integer, failing on non-numeric values or values
    /// that would be lossy (floats with a fractional part).
    pub fn to_i64(&self) -> Result<i64, TypeError> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Bool(v) => Ok(i64::from(*v)),
            Self::Float(v) if v.fract() == 0.0 => Ok(*v as i64),
            other => Err(TypeError::TypeMismatch {
                expected: "int",
                actual: other.kind_name().to_string(),
            }),
        }
    }

    /// Coerce to a decimal value, accepting integers, floats, strings, and
    /// (if already decimal) the value itself.
    #[cfg(feature = "decimal")]
    pub fn to_decimal(&self) -> Result<rust_decimal::Decimal, TypeError> {
        use rust_decimal::Decimal;
        use std::str::FromStr;

        match self {
            Self::Decimal(v) => Ok(*v),
            Self::Int(v) => Ok(Decimal::from(*v)),
            Self::String(s) => {
                Decimal::from_str(s).map_err(|e| TypeError::InvalidDecimal(e.to_string()))
            }
            Self::Float(v) => {
                Decimal::try_from(*v).map_err(|e| TypeError::InvalidDecimal(e.to_string()))
            }
            other => Err(TypeError::TypeMismatch {
                expected: "decimal",
                actual: other.kind_name().to_string(),
            }),
        }
    }
}

/// Trait for Rust types that can be lifted into a [`RowValue`] cell.
///
/// Mirrors the `ToSql` pattern used elsewhere in this codebase: implemented
/// for the primitive types a caller is likely to have on hand, plus
/// `Option<T>` for nullability and `&T` for borrow-friendly call sites.
pub trait IntoRowValue {
    /// Convert this value into a [`RowValue`] cell.
    fn into_row_value(self) -> RowValue;
}

impl IntoRowValue for RowValue {
    fn into_row_value(self) -> RowValue {
        self
    }
}

impl IntoRowValue for bool {
    fn into_row_value(self) -> RowValue {
        RowValue::Bool(self)
    }
}

macro_rules! impl_into_row_value_int {
    ($($t:ty),+) => {
        $(
            impl IntoRowValue for $t {
                fn into_row_value(self) -> RowValue {
                    RowValue::Int(i64::from(self))
                }
            }
        )+
    };
}

impl_into_row_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl IntoRowValue for f32 {
    fn into_row_value(self) -> RowValue {
        RowValue::Float(f64::from(self))
    }
}

impl IntoRowValue for f64 {
    fn into_row_value(self) -> RowValue {
        RowValue::Float(self)
    }
}

impl IntoRowValue for String {
    fn into_row_value(self) -> RowValue {
        RowValue::String(self)
    }
}

impl IntoRowValue for &str {
    fn into_row_value(self) -> RowValue {
        RowValue::String(self.to_owned())
    }
}

impl IntoRowValue for Bytes {
    fn into_row_value(self) -> RowValue {
        RowValue::Bytes(self)
    }
}

impl IntoRowValue for Vec<u8> {
    fn into_row_value(self) -> RowValue {
        RowValue::Bytes(Bytes::from(self))
    }
}

#[cfg(feature = "decimal")]
impl IntoRowValue for rust_decimal::Decimal {
    fn into_row_value(self) -> RowValue {
        RowValue::Decimal(self)
    }
}

impl<T: IntoRowValue> IntoRowValue for Option<T> {
    fn into_row_value(self) -> RowValue {
        match self {
            Some(v) => v.into_row_value(),
            None => RowValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_null() {
        assert!(RowValue::Null.is_null());
        assert!(!RowValue::Int(0).is_null());
    }

    #[test]
    fn into_row_value_option() {
        let some: Option<i32> = Some(42);
        assert_eq!(some.into_row_value(), RowValue::Int(42));

        let none: Option<i32> = None;
        assert_eq!(none.into_row_value(), RowValue::Null);
    }

    #[test]
    fn to_i64_from_bool_and_float() {
        assert_eq!(RowValue::Bool(true).to_i64().unwrap(), 1);
        assert_eq!(RowValue::Float(3.0).to_i64().unwrap(), 3);
        assert!(RowValue::Float(3.5).to_i64().is_err());
        assert!(RowValue::String("x".into()).to_i64().is_err());
    }

    #[cfg(feature = "decimal")]
    #[test]
    fn to_decimal_from_string() {
        use rust_decimal::Decimal;
        use std::str::FromStr;

        let v = RowValue::String("1.23".to_string());
        assert_eq!(v.to_decimal().unwrap(), Decimal::from_str("1.23").unwrap());
    }

    #[test]
    fn display_byte_len_counts_utf8_bytes() {
        let v = RowValue::String("héllo".to_string());
        assert_eq!(v.display_byte_len(), "héllo".len());
    }
}
