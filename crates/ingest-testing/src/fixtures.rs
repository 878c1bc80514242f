//! Builders for the column-descriptor and row-batch shapes used across
//! scenario and property tests, covering the supported storage-kind
//! matrix.

use ingest_row_buffer::{ColumnDescriptor, ColumnLogicalType as L, ColumnPhysicalType as P, RowValue};

/// A schema exercising every integer width: `sb1`/`sb2`/`sb4`/`sb8`.
#[must_use]
pub fn integer_matrix_schema() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("c_i8", L::Fixed, P::Sb1).with_precision_scale(3, 0),
        ColumnDescriptor::new("c_i16", L::Fixed, P::Sb2).with_precision_scale(5, 0),
        ColumnDescriptor::new("c_i32", L::Fixed, P::Sb4).with_precision_scale(9, 0),
        ColumnDescriptor::new("c_i64", L::Fixed, P::Sb8).with_precision_scale(18, 0),
    ]
}

/// A single-column `FIXED`/`sb16` schema with the given precision and scale.
#[must_use]
pub fn decimal_schema(precision: u8, scale: i8) -> Vec<ColumnDescriptor> {
    vec![ColumnDescriptor::new("c_decimal", L::Fixed, P::Sb16).with_precision_scale(precision, scale)]
}

/// A single nullable `TEXT`/`lob` column named `c_text`.
#[must_use]
pub fn text_schema() -> Vec<ColumnDescriptor> {
    vec![ColumnDescriptor::new("c_text", L::Text, P::Lob)]
}

/// A schema mixing one integer, one decimal, and one text column, the
/// shape most scenario tests reach for.
#[must_use]
pub fn mixed_schema() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", L::Fixed, P::Sb4).with_precision_scale(9, 0),
        ColumnDescriptor::new("amount", L::Fixed, P::Sb16).with_precision_scale(18, 2),
        ColumnDescriptor::new("label", L::Text, P::Lob),
    ]
}

/// Build a row as a vector of `(column name, value)` pairs, the shape
/// `RowBuffer::insert_rows` consumes per row.
#[must_use]
pub fn row(pairs: Vec<(&str, RowValue)>) -> Vec<(String, RowValue)> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// `n` rows against [`mixed_schema`], with every third row null across all
/// columns and the rest populated from `i`.
#[must_use]
pub fn mixed_rows(n: usize) -> Vec<Vec<(String, RowValue)>> {
    (0..n)
        .map(|i| {
            if i % 3 == 0 {
                row(vec![
                    ("id", RowValue::Null),
                    ("amount", RowValue::Null),
                    ("label", RowValue::Null),
                ])
            } else {
                row(vec![
                    ("id", RowValue::Int(i as i64)),
                    ("amount", RowValue::String(format!("{i}.00"))),
                    ("label", RowValue::String(format!("row-{i}"))),
                ])
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_rows_has_requested_length() {
        assert_eq!(mixed_rows(10).len(), 10);
    }

    #[test]
    fn integer_matrix_schema_has_four_columns() {
        assert_eq!(integer_matrix_schema().len(), 4);
    }
}
