//! `proptest` strategies for generating row batches, used to drive
//! randomized `insert_rows` -> `flush` sequences against a fixed schema and
//! check that the invariants hold regardless of the batch shape.

use ingest_row_buffer::RowValue;
use proptest::collection::vec;
use proptest::prelude::*;

use crate::fixtures::row;

/// An `Option<i32>` restricted to a range that fits every integer storage
/// kind used in [`crate::fixtures::integer_matrix_schema`], paired with a
/// weighted chance of `None` (a null cell).
pub fn opt_small_int() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![
        1 => Just(None),
        4 => (-1000i32..1000).prop_map(Some),
    ]
}

/// A single row against a schema with one integer column named `a`.
pub fn single_int_row() -> impl Strategy<Value = Vec<(String, RowValue)>> {
    opt_small_int().prop_map(|value| {
        let cell = match value {
            Some(v) => RowValue::Int(i64::from(v)),
            None => RowValue::Null,
        };
        row(vec![("a", cell)])
    })
}

/// A batch of 0..64 rows against the single-integer-column schema.
pub fn single_int_batch() -> impl Strategy<Value = Vec<Vec<(String, RowValue)>>> {
    vec(single_int_row(), 0..64)
}

/// An arbitrary short, non-empty identifier suitable for a text cell,
/// avoiding characters that would complicate byte-length assertions.
pub fn ascii_label() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{0,32}"
}

/// A batch of 0..64 rows against [`crate::fixtures::text_schema`]'s single
/// nullable `c_text` column.
pub fn text_batch() -> impl Strategy<Value = Vec<Vec<(String, RowValue)>>> {
    vec(
        prop_oneof![
            1 => Just(RowValue::Null),
            4 => ascii_label().prop_map(RowValue::String),
        ]
        .prop_map(|cell| row(vec![("c_text", cell)])),
        0..64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::test_runner::TestRunner;

    #[test]
    fn single_int_batch_generates_within_bounds() {
        let mut runner = TestRunner::default();
        let batch = single_int_batch()
            .new_tree(&mut runner)
            .unwrap()
            .current();
        assert!(batch.len() <= 64);
    }
}
