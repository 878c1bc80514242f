//! # ingest-row-buffer
//!
//! The in-memory row buffer of a streaming ingestion channel: it accepts
//! loosely-typed application rows, coerces each field against a
//! server-supplied column schema, accumulates the values in columnar form,
//! maintains per-column running statistics for downstream index generation,
//! and periodically hands off the accumulated batch to a flush pipeline.
//!
//! The buffer itself never talks to a network, never persists anything
//! durably, and never recovers from a malformed row mid-batch — a bad row
//! fails the whole `insert_rows` call. Those concerns, along with schema
//! evolution within an open channel, belong to collaborators reached only
//! through [`OwningChannel`] and the types returned from [`RowBuffer::flush`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use ingest_row_buffer::{RowBuffer, RowBufferConfig};
//! use ingest_row_types::{ColumnDescriptor, ColumnLogicalType, ColumnPhysicalType};
//!
//! let buffer = RowBuffer::new(channel, RowBufferConfig::default());
//! buffer.setup_schema(&[
//!     ColumnDescriptor::new("a", ColumnLogicalType::Fixed, ColumnPhysicalType::Sb4)
//!         .with_precision_scale(9, 0),
//! ])?;
//! buffer.insert_rows([[("a".to_string(), 1i32.into_row_value())]], Some("t1".into()))?;
//! let snapshot = buffer.flush()?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod channel;
pub mod column;
pub mod config;
pub mod convert;
pub mod error;
pub mod instrumentation;
pub mod state;
pub mod stats;

pub use buffer::{ChannelData, RowBuffer};
pub use channel::{Allocator, AllocatorError, OwningChannel};
pub use column::ColumnVector;
pub use config::{Collation, RowBufferConfig};
pub use error::RowBufferError;
pub use state::BufferState;
pub use stats::{EpInfo, FileColumnProperties, RowBufferStats};

pub use ingest_row_types::{
    ColumnDescriptor, ColumnLogicalType, ColumnPhysicalType, ColumnPlan, IntoRowValue, RowValue,
    SchemaError, StorageKind, TypeError,
};
