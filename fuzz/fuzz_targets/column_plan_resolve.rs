#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ingest_row_types::{ColumnDescriptor, ColumnLogicalType, ColumnPhysicalType, ColumnPlan};

#[derive(Debug, Arbitrary)]
enum FuzzLogical {
    Any,
    Boolean,
    Real,
    Fixed,
    Text,
    Char,
    Date,
    Array,
}

impl From<FuzzLogical> for ColumnLogicalType {
    fn from(value: FuzzLogical) -> Self {
        match value {
            FuzzLogical::Any => ColumnLogicalType::Any,
            FuzzLogical::Boolean => ColumnLogicalType::Boolean,
            FuzzLogical::Real => ColumnLogicalType::Real,
            FuzzLogical::Fixed => ColumnLogicalType::Fixed,
            FuzzLogical::Text => ColumnLogicalType::Text,
            FuzzLogical::Char => ColumnLogicalType::Char,
            FuzzLogical::Date => ColumnLogicalType::Date,
            FuzzLogical::Array => ColumnLogicalType::Array,
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzPhysical {
    Double,
    Sb1,
    Sb2,
    Sb4,
    Sb8,
    Sb16,
    Lob,
    Binary,
}

impl From<FuzzPhysical> for ColumnPhysicalType {
    fn from(value: FuzzPhysical) -> Self {
        match value {
            FuzzPhysical::Double => ColumnPhysicalType::Double,
            FuzzPhysical::Sb1 => ColumnPhysicalType::Sb1,
            FuzzPhysical::Sb2 => ColumnPhysicalType::Sb2,
            FuzzPhysical::Sb4 => ColumnPhysicalType::Sb4,
            FuzzPhysical::Sb8 => ColumnPhysicalType::Sb8,
            FuzzPhysical::Sb16 => ColumnPhysicalType::Sb16,
            FuzzPhysical::Lob => ColumnPhysicalType::Lob,
            FuzzPhysical::Binary => ColumnPhysicalType::Binary,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    name: String,
    logical: FuzzLogical,
    physical: FuzzPhysical,
    precision: Option<u8>,
    scale: Option<i8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut descriptor =
        ColumnDescriptor::new(input.name, input.logical.into(), input.physical.into());
    if let (Some(precision), Some(scale)) = (input.precision, input.scale) {
        descriptor = descriptor.with_precision_scale(precision, scale);
    }

    // Must never panic, regardless of the (logical, physical, precision,
    // scale) combination, valid or not.
    let _ = ColumnPlan::resolve(&descriptor);
});
