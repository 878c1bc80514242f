#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ingest_row_buffer::config::Collation;
use ingest_row_buffer::convert::convert_row;
use ingest_row_buffer::{ColumnDescriptor, ColumnLogicalType, ColumnPhysicalType, ColumnPlan, RowValue};

/// A column kind drawn from the supported storage matrix, cheap to derive
/// `Arbitrary` for since the real descriptor enums are `#[non_exhaustive]`.
#[derive(Debug, Arbitrary)]
enum FuzzColumnKind {
    I8,
    I16,
    I32,
    I64,
    Decimal,
    Text,
}

impl FuzzColumnKind {
    fn descriptor(&self, name: &str) -> ColumnDescriptor {
        match self {
            Self::I8 => ColumnDescriptor::new(name, ColumnLogicalType::Fixed, ColumnPhysicalType::Sb1)
                .with_precision_scale(3, 0),
            Self::I16 => ColumnDescriptor::new(name, ColumnLogicalType::Fixed, ColumnPhysicalType::Sb2)
                .with_precision_scale(5, 0),
            Self::I32 => ColumnDescriptor::new(name, ColumnLogicalType::Fixed, ColumnPhysicalType::Sb4)
                .with_precision_scale(9, 0),
            Self::I64 => ColumnDescriptor::new(name, ColumnLogicalType::Fixed, ColumnPhysicalType::Sb8)
                .with_precision_scale(18, 0),
            Self::Decimal => {
                ColumnDescriptor::new(name, ColumnLogicalType::Fixed, ColumnPhysicalType::Sb16)
                    .with_precision_scale(20, 4)
            }
            Self::Text => ColumnDescriptor::new(name, ColumnLogicalType::Text, ColumnPhysicalType::Lob),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<FuzzValue> for RowValue {
    fn from(value: FuzzValue) -> Self {
        match value {
            FuzzValue::Null => RowValue::Null,
            FuzzValue::Bool(b) => RowValue::Bool(b),
            FuzzValue::Int(i) => RowValue::Int(i),
            FuzzValue::Float(f) => RowValue::Float(f),
            FuzzValue::Text(s) => RowValue::String(s),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzCell {
    /// Index into the fixed 3-column schema; out-of-range values exercise
    /// the "unknown column name" rejection path via modulo wraparound plus
    /// an occasional garbage name.
    column_index: u8,
    use_garbage_name: bool,
    garbage_name: String,
    value: FuzzValue,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    kinds: [FuzzColumnKind; 3],
    rows: Vec<Vec<FuzzCell>>,
}

fuzz_target!(|input: FuzzInput| {
    let names = ["A", "B", "C"];
    let descriptors: Vec<ColumnDescriptor> = input
        .kinds
        .iter()
        .zip(names.iter())
        .map(|(kind, name)| kind.descriptor(name))
        .collect();

    let plans: Vec<ColumnPlan> = descriptors
        .iter()
        .filter_map(|d| ColumnPlan::resolve(d).ok())
        .collect();
    if plans.is_empty() {
        return;
    }

    let by_name: hashbrown::HashMap<String, usize> = plans
        .iter()
        .enumerate()
        .map(|(i, plan)| (plan.name.clone(), i))
        .collect();
    let mut vectors: Vec<_> = plans
        .iter()
        .map(|plan| ingest_row_buffer::ColumnVector::new(plan.storage_kind, 4))
        .collect();
    let mut stats: Vec<_> = plans.iter().map(|_| Default::default()).collect();
    let mut buffer_size = 0.0f64;
    let collation = Collation::Unicode;

    for row in input.rows {
        let entries = row.into_iter().map(|cell| {
            let name = if cell.use_garbage_name {
                cell.garbage_name
            } else {
                names[cell.column_index as usize % names.len()].to_string()
            };
            (name, RowValue::from(cell.value))
        });

        // Must never panic, regardless of malformed names or values.
        let _ = convert_row(
            entries,
            &plans,
            &by_name,
            &mut vectors,
            &mut stats,
            &mut buffer_size,
            &collation,
        );
    }
});
