//! The row buffer's public surface: `setup_schema`, `insert_rows`, `flush`,
//! `reset`, `close`, `size`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use parking_lot::Mutex;

use ingest_row_types::{ColumnDescriptor, ColumnPlan, RowValue};

use crate::channel::{Allocator, OwningChannel};
use crate::column::ColumnVector;
use crate::config::RowBufferConfig;
use crate::convert::convert_row;
use crate::error::{Result, RowBufferError};
use crate::state::BufferState;
use crate::stats::{EpInfo, RowBufferStats, build_ep_info};

/// The immutable hand-off artifact produced by a flush.
///
/// The consumer assumes exclusive ownership of `vectors` and is
/// responsible for their eventual release.
#[derive(Debug, PartialEq)]
pub struct ChannelData {
    /// Flushed column vectors, in schema order.
    pub vectors: Vec<ColumnVector>,
    /// Number of rows in this snapshot.
    pub row_count: u64,
    /// Buffer size estimate at the moment of flush.
    pub buffer_size: f64,
    /// Owning channel's fully-qualified name.
    pub channel: String,
    /// Row sequencer obtained from the owning channel for this flush.
    pub row_sequencer: i64,
    /// Offset token of the last row in this snapshot, if any was recorded.
    pub offset_token: Option<String>,
    /// Derived per-column statistics payload.
    pub ep_info: EpInfo,
}

struct Inner {
    state: BufferState,
    plans: Vec<ColumnPlan>,
    by_name: HashMap<String, usize>,
    vectors: Vec<ColumnVector>,
    stats: Vec<RowBufferStats>,
    row_count: u64,
    cur_row_index: u64,
    allocator: Option<Arc<dyn Allocator>>,
}

impl Inner {
    fn new() -> Self {
        Self {
            state: BufferState::Uninitialized,
            plans: Vec::new(),
            by_name: HashMap::new(),
            vectors: Vec::new(),
            stats: Vec::new(),
            row_count: 0,
            cur_row_index: 0,
            allocator: None,
        }
    }
}

/// The in-memory, schema-driven row buffer of a streaming ingestion
/// channel.
///
/// A `RowBuffer` is created empty, bound to an owning channel. `setup_schema`
/// must be called exactly once before any `insert_rows`. `flush` may be
/// called any number of times; each call either returns a snapshot or
/// `None` when the buffer is empty. `close` is terminal.
pub struct RowBuffer {
    channel: Arc<dyn OwningChannel>,
    config: RowBufferConfig,
    inner: Mutex<Inner>,
    buffer_size_bits: AtomicU64,
}

impl RowBuffer {
    /// Create an empty row buffer bound to `channel`.
    #[must_use]
    pub fn new(channel: Arc<dyn OwningChannel>, config: RowBufferConfig) -> Self {
        Self {
            channel,
            config,
            inner: Mutex::new(Inner::new()),
            buffer_size_bits: AtomicU64::new(0.0_f64.to_bits()),
        }
    }

    /// Current buffer size estimate. This is a best-effort, non-byte-exact
    /// figure intended to drive upstream flush-size thresholds; the read is
    /// lock-free and may race briefly with an in-flight `insert_rows` or
    /// `flush`.
    #[must_use]
    pub fn size(&self) -> f64 {
        f64::from_bits(self.buffer_size_bits.load(Ordering::Relaxed))
    }

    fn set_size(&self, value: f64) {
        self.buffer_size_bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Install the column schema. Must be called exactly once, before any
    /// `insert_rows`.
    #[tracing::instrument(
        name = "row_buffer.setup_schema",
        skip(self, columns),
        fields(
            channel.name = %self.channel.fully_qualified_name(),
            row_buffer.column_count = columns.len(),
        )
    )]
    pub fn setup_schema(&self, columns: &[ColumnDescriptor]) -> Result<()> {
        self.setup_schema_impl(columns).inspect_err(|err| {
            tracing::error!(
                channel = %self.channel.fully_qualified_name(),
                error = %err,
                "setup_schema failed"
            );
        })
    }

    fn setup_schema_impl(&self, columns: &[ColumnDescriptor]) -> Result<()> {
        let mut plans = Vec::with_capacity(columns.len());
        let mut by_name = HashMap::with_capacity(columns.len());
        for descriptor in columns {
            let plan = ColumnPlan::resolve(descriptor).map_err(|err| match err {
                ingest_row_types::SchemaError::UnknownDataType { .. } => {
                    RowBufferError::UnknownDataType {
                        logical: descriptor.logical_type,
                        physical: descriptor.physical_type,
                    }
                }
                ingest_row_types::SchemaError::MissingScale { column } => {
                    RowBufferError::InvalidRow {
                        reason: format!("column {column} is FIXED but has no scale"),
                    }
                }
            })?;
            by_name.insert(plan.name.clone(), plans.len());
            plans.push(plan);
        }

        let capacity = self.config.initial_column_capacity;
        let vectors = plans
            .iter()
            .map(|plan| ColumnVector::new(plan.storage_kind, capacity))
            .collect::<Vec<_>>();
        let stats = plans.iter().map(|_| RowBufferStats::default()).collect();

        let allocator = self.channel.allocator();
        allocator
            .reserve(capacity * plans.len())
            .map_err(RowBufferError::Allocator)?;

        let mut inner = self.inner.lock();
        inner.plans = plans;
        inner.by_name = by_name;
        inner.vectors = vectors;
        inner.stats = stats;
        inner.row_count = 0;
        inner.cur_row_index = 0;
        inner.allocator = Some(allocator);
        inner.state = BufferState::Ready;
        Ok(())
    }

    /// Atomically append a batch of rows, recording `offset_token` as the
    /// latest persisted boundary on success.
    ///
    /// On any conversion failure the whole call fails with
    /// [`RowBufferError::InvalidRow`]; already-appended cells of the
    /// failing row are not rolled back (see the crate-level design notes).
    #[tracing::instrument(
        name = "row_buffer.insert_rows",
        skip(self, rows),
        fields(
            channel.name = %self.channel.fully_qualified_name(),
            row_buffer.row_count = tracing::field::Empty,
            row_buffer.buffer_size = tracing::field::Empty,
        )
    )]
    pub fn insert_rows<R, C>(&self, rows: R, offset_token: Option<String>) -> Result<()>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = (String, RowValue)>,
    {
        self.insert_rows_impl(rows, offset_token).inspect_err(|err| {
            tracing::error!(
                channel = %self.channel.fully_qualified_name(),
                error = %err,
                "insert_rows failed"
            );
        })
    }

    fn insert_rows_impl<R, C>(&self, rows: R, offset_token: Option<String>) -> Result<()>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = (String, RowValue)>,
    {
        let mut inner = self.inner.lock();
        match inner.state {
            BufferState::Uninitialized => return Err(RowBufferError::SchemaNotReady),
            BufferState::Closed => return Err(RowBufferError::AlreadyClosed),
            BufferState::Ready => {}
        }

        let mut buffer_size = self.size();
        let mut inserted = 0u64;

        for row in rows {
            let Inner {
                plans,
                by_name,
                vectors,
                stats,
                ..
            } = &mut *inner;
            convert_row(
                row,
                plans,
                by_name,
                vectors,
                stats,
                &mut buffer_size,
                &self.config.string_collation,
            )?;
            inner.cur_row_index += 1;
            inner.row_count += 1;
            inserted += 1;
        }

        self.set_size(buffer_size);
        if let Some(token) = offset_token {
            self.channel.set_offset_token(token);
        }

        tracing::Span::current()
            .record("row_buffer.row_count", inserted)
            .record("row_buffer.buffer_size", buffer_size);
        Ok(())
    }

    /// Flush the buffer, returning a snapshot unless it is empty.
    #[tracing::instrument(
        name = "row_buffer.flush",
        skip(self),
        fields(
            channel.name = %self.channel.fully_qualified_name(),
            row_buffer.row_sequencer = tracing::field::Empty,
        )
    )]
    pub fn flush(&self) -> Result<Option<ChannelData>> {
        self.flush_impl().inspect_err(|err| {
            tracing::error!(
                channel = %self.channel.fully_qualified_name(),
                error = %err,
                "flush failed"
            );
        })
    }

    fn flush_impl(&self) -> Result<Option<ChannelData>> {
        let mut inner = self.inner.lock();
        match inner.state {
            BufferState::Uninitialized => return Err(RowBufferError::SchemaNotReady),
            BufferState::Closed => return Err(RowBufferError::AlreadyClosed),
            BufferState::Ready => {}
        }

        if inner.row_count == 0 {
            return Ok(None);
        }

        let cur_row_index = inner.cur_row_index;
        for vector in &mut inner.vectors {
            vector.pad_to(cur_row_index as usize);
        }

        let transferred = inner
            .vectors
            .iter_mut()
            .map(ColumnVector::transfer_out)
            .collect();

        let row_count = inner.row_count;
        let buffer_size = self.size();
        let row_sequencer = self.channel.increment_and_get_row_sequencer();
        let offset_token = self.channel.offset_token();

        let named_stats = inner
            .plans
            .iter()
            .zip(inner.stats.iter())
            .map(|(plan, stats)| (plan.name.clone(), stats.clone()))
            .collect::<Vec<_>>();
        let ep_info = build_ep_info(row_count, &named_stats);

        Self::reset_locked(&mut inner);
        self.set_size(0.0);

        tracing::Span::current().record("row_buffer.row_sequencer", row_sequencer);

        Ok(Some(ChannelData {
            vectors: transferred,
            row_count,
            buffer_size,
            channel: self.channel.fully_qualified_name().to_string(),
            row_sequencer,
            offset_token,
            ep_info,
        }))
    }

    /// Clear every vector (retaining allocation), zero counters, and
    /// install fresh stats. Called by `flush`; exposed directly for
    /// callers that need to discard a buffer's contents without a flush.
    pub fn reset(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.state {
            BufferState::Uninitialized => return Err(RowBufferError::SchemaNotReady),
            BufferState::Closed => return Err(RowBufferError::AlreadyClosed),
            BufferState::Ready => {}
        }
        Self::reset_locked(&mut inner);
        self.set_size(0.0);
        Ok(())
    }

    fn reset_locked(inner: &mut Inner) {
        for vector in &mut inner.vectors {
            vector.clear();
        }
        for stats in &mut inner.stats {
            *stats = RowBufferStats::default();
        }
        inner.row_count = 0;
        inner.cur_row_index = 0;
    }

    /// Close the buffer: release every vector and the allocator. The caller
    /// must guarantee no other thread touches the buffer concurrently;
    /// every operation after `close` fails with
    /// [`RowBufferError::AlreadyClosed`].
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.state == BufferState::Closed {
            return Err(RowBufferError::AlreadyClosed);
        }

        let capacity = self.config.initial_column_capacity;
        if let Some(allocator) = inner.allocator.take() {
            allocator.release(capacity * inner.plans.len());
        }
        inner.vectors.clear();
        inner.plans.clear();
        inner.by_name.clear();
        inner.stats.clear();
        inner.state = BufferState::Closed;
        self.set_size(0.0);
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BufferState {
        self.inner.lock().state
    }
}
