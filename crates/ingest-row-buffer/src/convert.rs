//! Per-row, per-cell conversion of loosely-typed input into columnar
//! storage, with inline statistics and buffer-size accounting.

use hashbrown::HashMap;
use rust_decimal::prelude::ToPrimitive;

use ingest_row_types::{ColumnPlan, RowValue, StorageKind, normalize_column_name};

use crate::column::ColumnVector;
use crate::config::Collation;
use crate::error::{Result, RowBufferError};
use crate::stats::RowBufferStats;

/// A fixed 1/8 contribution to `buffer_size` for every cell's null-bitmap
/// bit, applied whether the cell's value is null or not.
const NULL_BITMAP_CELL_COST: f64 = 0.125;

/// Convert one row into its column cells, updating vectors, stats, and the
/// running buffer size estimate in place.
///
/// On any failure the row's already-appended cells are *not* rolled back —
/// this reproduces the original implementation's behavior exactly (see the
/// open question in the crate-level design notes) rather than silently
/// changing it.
pub fn convert_row(
    row: impl IntoIterator<Item = (String, RowValue)>,
    plans: &[ColumnPlan],
    by_name: &HashMap<String, usize>,
    vectors: &mut [ColumnVector],
    stats: &mut [RowBufferStats],
    buffer_size: &mut f64,
    collation: &Collation,
) -> Result<()> {
    let mut touched = vec![false; plans.len()];

    for (raw_name, value) in row {
        if raw_name.trim().is_empty() {
            return Err(RowBufferError::InvalidRow {
                reason: "empty column name".to_string(),
            });
        }
        let name = normalize_column_name(&raw_name);
        let idx = *by_name
            .get(&name)
            .ok_or_else(|| RowBufferError::InvalidRow {
                reason: format!("unknown column: {name}"),
            })?;

        touched[idx] = true;
        *buffer_size += NULL_BITMAP_CELL_COST;

        convert_cell(&plans[idx], value, &mut vectors[idx], &mut stats[idx], buffer_size, collation)?;
    }

    for idx in 0..plans.len() {
        if !touched[idx] {
            vectors[idx].append_null();
            stats[idx].inc_null();
        }
    }

    Ok(())
}

fn convert_cell(
    plan: &ColumnPlan,
    value: RowValue,
    vector: &mut ColumnVector,
    stats: &mut RowBufferStats,
    buffer_size: &mut f64,
    collation: &Collation,
) -> Result<()> {
    match plan.storage_kind {
        StorageKind::I8 => convert_int_cell(value, vector, stats, buffer_size, 1.0, "i8"),
        StorageKind::I16 => convert_int_cell(value, vector, stats, buffer_size, 2.0, "i16"),
        StorageKind::I32 => convert_int_cell(value, vector, stats, buffer_size, 4.0, "i32"),
        StorageKind::I64 => convert_int_cell(value, vector, stats, buffer_size, 8.0, "i64"),
        StorageKind::Decimal128 { .. } => convert_decimal_cell(value, vector, stats, buffer_size),
        StorageKind::Utf8 => convert_string_cell(value, vector, stats, buffer_size, collation),
    }
}

/// Range-checks `parsed` against the target integer width before it ever
/// reaches [`ColumnVector::append_i64`], which narrows with `as` and would
/// otherwise truncate silently.
fn check_int_range(parsed: i64, target_type: &'static str) -> Result<()> {
    let in_range = match target_type {
        "i8" => i8::try_from(parsed).is_ok(),
        "i16" => i16::try_from(parsed).is_ok(),
        "i32" => i32::try_from(parsed).is_ok(),
        _ => true,
    };
    if in_range {
        Ok(())
    } else {
        Err(ingest_row_types::TypeError::OutOfRange { target_type }.into())
    }
}

fn convert_int_cell(
    value: RowValue,
    vector: &mut ColumnVector,
    stats: &mut RowBufferStats,
    buffer_size: &mut f64,
    byte_cost: f64,
    target_type: &'static str,
) -> Result<()> {
    if value.is_null() {
        vector.append_null();
        stats.inc_null();
        return Ok(());
    }
    let parsed = value.to_i64()?;
    check_int_range(parsed, target_type)?;
    vector.append_i64(parsed);
    stats.add_int(i128::from(parsed));
    *buffer_size += byte_cost;
    Ok(())
}

/// `SB16` (decimal) nulls do not increment the null counter. This mirrors a
/// quirk of the original implementation that may be a bug; it is preserved
/// here rather than silently fixed (see the crate-level design notes).
fn convert_decimal_cell(
    value: RowValue,
    vector: &mut ColumnVector,
    stats: &mut RowBufferStats,
    buffer_size: &mut f64,
) -> Result<()> {
    if value.is_null() {
        vector.append_null();
        return Ok(());
    }
    let decimal = value.to_decimal()?;
    vector.append_decimal(decimal);
    let integer_part = decimal.trunc().to_i128().unwrap_or(0);
    stats.add_int(integer_part);
    *buffer_size += 16.0;
    Ok(())
}

fn convert_string_cell(
    value: RowValue,
    vector: &mut ColumnVector,
    stats: &mut RowBufferStats,
    buffer_size: &mut f64,
    collation: &Collation,
) -> Result<()> {
    if value.is_null() {
        vector.append_null();
        stats.inc_null();
        return Ok(());
    }
    let text = value.to_display_string();
    let len = text.len();
    stats.set_max_length(len as u32);
    stats.add_str(&text, collation);
    vector.append_str(text);
    *buffer_size += len as f64;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_row_types::{ColumnDescriptor, ColumnLogicalType as L, ColumnPhysicalType as P};

    fn plan(name: &str, logical: L, physical: P, precision_scale: Option<(u8, i8)>) -> ColumnPlan {
        let mut descriptor = ColumnDescriptor::new(name, logical, physical);
        if let Some((p, s)) = precision_scale {
            descriptor = descriptor.with_precision_scale(p, s);
        }
        ColumnPlan::resolve(&descriptor).unwrap()
    }

    #[test]
    fn s1_fixed_sb4_row_batch() {
        let plans = vec![plan("A", L::Fixed, P::Sb4, Some((9, 0)))];
        let mut by_name = HashMap::new();
        by_name.insert("A".to_string(), 0usize);
        let mut vectors = vec![ColumnVector::new(plans[0].storage_kind, 4)];
        let mut stats = vec![RowBufferStats::default()];
        let mut buffer_size = 0.0;

        for row in [
            vec![("A".to_string(), RowValue::Int(1))],
            vec![("A".to_string(), RowValue::Null)],
            vec![("A".to_string(), RowValue::Int(-3))],
        ] {
            convert_row(
                row,
                &plans,
                &by_name,
                &mut vectors,
                &mut stats,
                &mut buffer_size,
                &Collation::Unicode,
            )
            .unwrap();
        }

        assert_eq!(stats[0].current_null_count, 1);
        assert_eq!(stats[0].current_min_int, Some(-3));
        assert_eq!(stats[0].current_max_int, Some(1));
        assert_eq!(vectors[0].len(), 3);
    }

    #[test]
    fn s2_text_buffer_size_accounting() {
        let plans = vec![plan("S", L::Text, P::Lob, None)];
        let mut by_name = HashMap::new();
        by_name.insert("S".to_string(), 0usize);
        let mut vectors = vec![ColumnVector::new(plans[0].storage_kind, 4)];
        let mut stats = vec![RowBufferStats::default()];
        let mut buffer_size = 0.0;

        for row in [
            vec![("S".to_string(), RowValue::String("hi".to_string()))],
            vec![("S".to_string(), RowValue::String("worlds".to_string()))],
        ] {
            convert_row(
                row,
                &plans,
                &by_name,
                &mut vectors,
                &mut stats,
                &mut buffer_size,
                &Collation::Unicode,
            )
            .unwrap();
        }

        assert!((buffer_size - 8.25).abs() < 1e-9);
        assert_eq!(stats[0].current_max_length, Some(6));
        assert_eq!(stats[0].current_min_str.as_deref(), Some("hi"));
        assert_eq!(stats[0].current_max_str.as_deref(), Some("worlds"));
    }

    #[test]
    fn s3_decimal_null_does_not_increment_null_count() {
        let plans = vec![plan("D", L::Fixed, P::Sb16, Some((20, 2)))];
        let mut by_name = HashMap::new();
        by_name.insert("D".to_string(), 0usize);
        let mut vectors = vec![ColumnVector::new(plans[0].storage_kind, 4)];
        let mut stats = vec![RowBufferStats::default()];
        let mut buffer_size = 0.0;

        for row in [
            vec![("D".to_string(), RowValue::String("1.23".to_string()))],
            vec![("D".to_string(), RowValue::String("100.00".to_string()))],
            vec![("D".to_string(), RowValue::Null)],
        ] {
            convert_row(
                row,
                &plans,
                &by_name,
                &mut vectors,
                &mut stats,
                &mut buffer_size,
                &Collation::Unicode,
            )
            .unwrap();
        }

        assert_eq!(stats[0].current_null_count, 0);
        assert_eq!(stats[0].current_min_int, Some(1));
        assert_eq!(stats[0].current_max_int, Some(100));
    }

    #[test]
    fn out_of_range_int_is_rejected_not_truncated() {
        let plans = vec![plan("A", L::Fixed, P::Sb1, Some((3, 0)))];
        let mut by_name = HashMap::new();
        by_name.insert("A".to_string(), 0usize);
        let mut vectors = vec![ColumnVector::new(plans[0].storage_kind, 4)];
        let mut stats = vec![RowBufferStats::default()];
        let mut buffer_size = 0.0;

        let err = convert_row(
            vec![("A".to_string(), RowValue::Int(1000))],
            &plans,
            &by_name,
            &mut vectors,
            &mut stats,
            &mut buffer_size,
            &Collation::Unicode,
        )
        .unwrap_err();
        assert!(matches!(err, RowBufferError::InvalidRow { .. }));
        assert_eq!(vectors[0].len(), 0);
    }

    #[test]
    fn unknown_column_is_invalid_row() {
        let plans = vec![plan("A", L::Fixed, P::Sb4, Some((9, 0)))];
        let mut by_name = HashMap::new();
        by_name.insert("A".to_string(), 0usize);
        let mut vectors = vec![ColumnVector::new(plans[0].storage_kind, 4)];
        let mut stats = vec![RowBufferStats::default()];
        let mut buffer_size = 0.0;

        let err = convert_row(
            vec![("B".to_string(), RowValue::Int(1))],
            &plans,
            &by_name,
            &mut vectors,
            &mut stats,
            &mut buffer_size,
            &Collation::Unicode,
        )
        .unwrap_err();
        assert!(matches!(err, RowBufferError::InvalidRow { .. }));
    }

    #[test]
    fn missing_column_is_left_null() {
        let plans = vec![
            plan("A", L::Fixed, P::Sb4, Some((9, 0))),
            plan("B", L::Fixed, P::Sb4, Some((9, 0))),
        ];
        let mut by_name = HashMap::new();
        by_name.insert("A".to_string(), 0usize);
        by_name.insert("B".to_string(), 1usize);
        let mut vectors = vec![
            ColumnVector::new(plans[0].storage_kind, 4),
            ColumnVector::new(plans[1].storage_kind, 4),
        ];
        let mut stats = vec![RowBufferStats::default(), RowBufferStats::default()];
        let mut buffer_size = 0.0;

        convert_row(
            vec![("A".to_string(), RowValue::Int(1))],
            &plans,
            &by_name,
            &mut vectors,
            &mut stats,
            &mut buffer_size,
            &Collation::Unicode,
        )
        .unwrap();

        assert_eq!(vectors[1].len(), 1);
        assert_eq!(stats[1].current_null_count, 1);
    }

    #[test]
    fn s4_quoted_column_name_is_case_preserved() {
        let plans = vec![plan("\"Name\"", L::Text, P::Lob, None)];
        let mut by_name = HashMap::new();
        by_name.insert(plans[0].name.clone(), 0usize);
        let mut vectors = vec![ColumnVector::new(plans[0].storage_kind, 4)];
        let mut stats = vec![RowBufferStats::default()];
        let mut buffer_size = 0.0;

        let err = convert_row(
            vec![("NAME".to_string(), RowValue::String("x".to_string()))],
            &plans,
            &by_name,
            &mut vectors,
            &mut stats,
            &mut buffer_size,
            &Collation::Unicode,
        )
        .unwrap_err();
        assert!(matches!(err, RowBufferError::InvalidRow { .. }));

        convert_row(
            vec![("Name".to_string(), RowValue::String("x".to_string()))],
            &plans,
            &by_name,
            &mut vectors,
            &mut stats,
            &mut buffer_size,
            &Collation::Unicode,
        )
        .unwrap();
        assert_eq!(vectors[0].len(), 1);
    }
}
