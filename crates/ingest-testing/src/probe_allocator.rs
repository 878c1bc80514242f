//! A reference-counting allocator used to assert that `close()` releases
//! every reservation it made.

use std::sync::atomic::{AtomicUsize, Ordering};

use ingest_row_buffer::{Allocator, AllocatorError};

/// An [`Allocator`] that counts outstanding reservations, for use in tests
/// asserting `close()` drives them to zero.
#[derive(Debug, Default)]
pub struct ProbeAllocator {
    outstanding: AtomicUsize,
    reserve_calls: AtomicUsize,
    release_calls: AtomicUsize,
}

impl ProbeAllocator {
    /// Create a fresh probe allocator with zero outstanding reservations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `reserve` has been called, regardless of outcome.
    #[must_use]
    pub fn reserve_calls(&self) -> usize {
        self.reserve_calls.load(Ordering::SeqCst)
    }

    /// Number of times `release` has been called.
    #[must_use]
    pub fn release_calls(&self) -> usize {
        self.release_calls.load(Ordering::SeqCst)
    }
}

impl Allocator for ProbeAllocator {
    fn reserve(&self, cells: usize) -> Result<(), AllocatorError> {
        self.reserve_calls.fetch_add(1, Ordering::SeqCst);
        self.outstanding.fetch_add(cells, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self, cells: usize) {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        self.outstanding.fetch_sub(cells, Ordering::SeqCst);
    }

    fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_outstanding_reservations() {
        let probe = ProbeAllocator::new();
        probe.reserve(10).unwrap();
        probe.reserve(5).unwrap();
        assert_eq!(probe.outstanding(), 15);
        probe.release(15);
        assert_eq!(probe.outstanding(), 0);
        assert_eq!(probe.reserve_calls(), 2);
        assert_eq!(probe.release_calls(), 1);
    }
}
