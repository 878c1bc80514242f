//! Property tests driving randomized `insert_rows` batches through a
//! `RowBuffer` and checking invariants that must hold for any batch shape.

use proptest::prelude::*;

use ingest_row_buffer::{RowBuffer, RowBufferConfig};
use ingest_testing::fixtures::{integer_matrix_schema, mixed_rows, mixed_schema};
use ingest_testing::strategies::{single_int_batch, text_batch};
use ingest_testing::{ProbeAllocator, StubChannel};

proptest! {
    /// Flushed row_count always equals the number of non-empty rows inserted,
    /// and a flush of an empty buffer is `None`.
    #[test]
    fn flushed_row_count_matches_inserted_rows(batch in single_int_batch()) {
        let channel = StubChannel::new("db.schema.prop1");
        let buffer = RowBuffer::new(channel, RowBufferConfig::default());
        buffer
            .setup_schema(&[ingest_row_buffer::ColumnDescriptor::new(
                "a",
                ingest_row_buffer::ColumnLogicalType::Fixed,
                ingest_row_buffer::ColumnPhysicalType::Sb4,
            )
            .with_precision_scale(9, 0)])
            .unwrap();

        let expected = batch.len() as u64;
        buffer.insert_rows(batch, None).unwrap();

        match buffer.flush().unwrap() {
            Some(snapshot) => prop_assert_eq!(snapshot.row_count, expected),
            None => prop_assert_eq!(expected, 0),
        }
    }

    /// Every inserted text row is reflected in the null_count/max_length
    /// stats: null_count plus non-null rows always sums to row_count.
    #[test]
    fn text_stats_account_for_every_row(batch in text_batch()) {
        let channel = StubChannel::new("db.schema.prop2");
        let buffer = RowBuffer::new(channel, RowBufferConfig::default());
        buffer.setup_schema(&ingest_testing::fixtures::text_schema()).unwrap();

        let expected = batch.len() as u64;
        let non_null = batch
            .iter()
            .filter(|row| !matches!(row[0].1, ingest_row_buffer::RowValue::Null))
            .count() as u64;
        buffer.insert_rows(batch, None).unwrap();

        if expected == 0 {
            prop_assert_eq!(buffer.flush().unwrap(), None);
        } else {
            let snapshot = buffer.flush().unwrap().unwrap();
            prop_assert_eq!(snapshot.row_count, expected);
            let col = &snapshot.ep_info.columns["C_TEXT"];
            prop_assert_eq!(col.null_count + non_null, expected);
        }
    }

    /// `close()` always drives the probe allocator's outstanding count to
    /// zero, regardless of how many rows were inserted beforehand.
    #[test]
    fn close_always_zeroes_outstanding_reservations(n in 0usize..40) {
        let probe = std::sync::Arc::new(ProbeAllocator::new());
        let channel = StubChannel::with_allocator("db.schema.prop3", probe.clone());
        let buffer = RowBuffer::new(channel, RowBufferConfig::default());
        buffer.setup_schema(&mixed_schema()).unwrap();
        buffer.insert_rows(mixed_rows(n), None).unwrap();

        prop_assert!(probe.outstanding() > 0);
        buffer.close().unwrap();
        prop_assert_eq!(probe.outstanding(), 0);
    }
}

#[test]
fn integer_matrix_schema_round_trips_every_width() {
    let channel = StubChannel::new("db.schema.matrix");
    let buffer = RowBuffer::new(channel, RowBufferConfig::default());
    buffer.setup_schema(&integer_matrix_schema()).unwrap();

    buffer
        .insert_rows(
            vec![ingest_testing::fixtures::row(vec![
                ("c_i8", ingest_row_buffer::RowValue::Int(1)),
                ("c_i16", ingest_row_buffer::RowValue::Int(2)),
                ("c_i32", ingest_row_buffer::RowValue::Int(3)),
                ("c_i64", ingest_row_buffer::RowValue::Int(4)),
            ])],
            None,
        )
        .unwrap();

    let snapshot = buffer.flush().unwrap().unwrap();
    assert_eq!(snapshot.row_count, 1);
    assert_eq!(snapshot.ep_info.columns["C_I8"].max_int, Some(1));
    assert_eq!(snapshot.ep_info.columns["C_I64"].max_int, Some(4));
}
