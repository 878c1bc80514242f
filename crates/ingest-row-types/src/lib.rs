//! # ingest-row-types
//!
//! Column schema resolution and loosely-typed row value representation for
//! the streaming ingestion row buffer.
//!
//! This crate owns the boundary between a server-supplied column schema
//! (logical type, physical type, precision, scale, nullability) and the
//! typed, columnar storage kind the row buffer actually appends into. It
//! also defines [`RowValue`], the loosely-typed value a caller supplies per
//! cell, and the [`IntoRowValue`] trait used to build rows ergonomically
//! from ordinary Rust values.
//!
//! ## Type Mappings
//!
//! | logical type | physical type | storage kind |
//! |---|---|---|
//! | `FIXED` | `SB1` | `i8` (scale 0) or `decimal128` |
//! | `FIXED` | `SB2` | `i16` (scale 0) or `decimal128` |
//! | `FIXED` | `SB4` | `i32` (scale 0) or `decimal128` |
//! | `FIXED` | `SB8` | `i64` (scale 0) or `decimal128` |
//! | `FIXED` | `SB16` | `decimal128` |
//! | `ANY`, `ARRAY`, `CHAR`, `TEXT`, `OBJECT`, `VARIANT` | any | `utf8` |

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod plan;
pub mod schema;
pub mod value;

pub use error::TypeError;
pub use plan::{ColumnPlan, SchemaError, StorageKind, normalize_column_name};
pub use schema::{ColumnDescriptor, ColumnLogicalType, ColumnPhysicalType, PreservedMetadata};
pub use value::{IntoRowValue, RowValue};
