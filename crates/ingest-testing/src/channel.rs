//! A stub [`OwningChannel`] for driving a `RowBuffer` in tests without a
//! real ingestion channel behind it.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::Mutex;

use ingest_row_buffer::{Allocator, OwningChannel, channel::UnboundedAllocator};

/// A minimal, in-memory [`OwningChannel`] double.
///
/// Sequencer and offset token are tracked the way a real channel would,
/// but nothing is persisted anywhere; it exists purely so tests can
/// construct a [`ingest_row_buffer::RowBuffer`].
#[derive(Debug)]
pub struct StubChannel {
    name: String,
    allocator: Arc<dyn Allocator>,
    sequencer: AtomicI64,
    offset_token: Mutex<Option<String>>,
}

impl StubChannel {
    /// Create a stub channel named `name`, backed by an
    /// [`UnboundedAllocator`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Self::with_allocator(name, Arc::new(UnboundedAllocator::default()))
    }

    /// Create a stub channel named `name`, backed by a caller-supplied
    /// allocator (for example a [`crate::ProbeAllocator`]).
    #[must_use]
    pub fn with_allocator(name: impl Into<String>, allocator: Arc<dyn Allocator>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            allocator,
            sequencer: AtomicI64::new(0),
            offset_token: Mutex::new(None),
        })
    }
}

impl OwningChannel for StubChannel {
    fn allocator(&self) -> Arc<dyn Allocator> {
        self.allocator.clone()
    }

    fn fully_qualified_name(&self) -> &str {
        &self.name
    }

    fn increment_and_get_row_sequencer(&self) -> i64 {
        self.sequencer.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn offset_token(&self) -> Option<String> {
        self.offset_token.lock().clone()
    }

    fn set_offset_token(&self, token: String) {
        *self.offset_token.lock() = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencer_increments_from_one() {
        let channel = StubChannel::new("db.schema.chan");
        assert_eq!(channel.increment_and_get_row_sequencer(), 1);
        assert_eq!(channel.increment_and_get_row_sequencer(), 2);
    }

    #[test]
    fn offset_token_round_trips() {
        let channel = StubChannel::new("db.schema.chan");
        assert_eq!(channel.offset_token(), None);
        channel.set_offset_token("abc".to_string());
        assert_eq!(channel.offset_token(), Some("abc".to_string()));
    }
}
