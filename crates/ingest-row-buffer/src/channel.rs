//! The collaborator contract a row buffer needs from its owning channel.
//!
//! A row buffer never owns its channel: per the design notes, the
//! back-reference is a non-owning borrow and the channel outlives the
//! buffer. Implementations that cannot express that cheaply may instead
//! implement [`OwningChannel`] over a small injected capability bundle
//! (allocator, sequencer, offset token).

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised by an [`Allocator`] when it cannot satisfy a reservation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocatorError {
    /// The allocator has no budget left for the requested number of cells.
    #[error("allocator exhausted: requested {requested} cells")]
    Exhausted {
        /// Number of cells the caller asked to reserve.
        requested: usize,
    },
}

/// The arena-style allocator backing one row buffer's column vectors.
///
/// A row buffer reserves cells from its allocator when a column vector
/// grows and releases them on `close()`. Implementations are free to be as
/// simple as an unbounded counter (the default used outside of tests) or to
/// enforce a hard budget; tests use a reference-counting probe allocator to
/// assert `close()` drives outstanding reservations to zero.
pub trait Allocator: Send + Sync + fmt::Debug {
    /// Reserve `cells` units of capacity. Fails if the allocator enforces a
    /// budget and none remains.
    fn reserve(&self, cells: usize) -> Result<(), AllocatorError>;

    /// Release `cells` units of capacity previously reserved.
    fn release(&self, cells: usize);

    /// Current outstanding reservation, summed across every call to
    /// `reserve` not yet matched by a `release`.
    fn outstanding(&self) -> usize;
}

/// An allocator with no enforced budget; every reservation succeeds.
///
/// This is the allocator a row buffer uses when the owning channel does not
/// need to cap memory explicitly. It still tracks outstanding reservations,
/// so `close()`'s effect remains observable.
#[derive(Debug, Default)]
pub struct UnboundedAllocator {
    outstanding: std::sync::atomic::AtomicUsize,
}

impl Allocator for UnboundedAllocator {
    fn reserve(&self, cells: usize) -> Result<(), AllocatorError> {
        self.outstanding
            .fetch_add(cells, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn release(&self, cells: usize) {
        self.outstanding
            .fetch_sub(cells, std::sync::atomic::Ordering::SeqCst);
    }

    fn outstanding(&self) -> usize {
        self.outstanding.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Collaborator contract a row buffer needs from the channel that owns it.
///
/// Implemented by the higher-level channel registry (out of scope for this
/// crate); the row buffer only ever sees this trait.
pub trait OwningChannel: Send + Sync {
    /// The allocator backing this channel's row buffer.
    fn allocator(&self) -> Arc<dyn Allocator>;

    /// Fully-qualified channel name, for diagnostics and tracing spans.
    fn fully_qualified_name(&self) -> &str;

    /// Atomically increment and return the channel's row sequencer.
    fn increment_and_get_row_sequencer(&self) -> i64;

    /// The channel's last externally-known offset token, if any.
    fn offset_token(&self) -> Option<String>;

    /// Record a new offset token as the latest persisted boundary.
    fn set_offset_token(&self, token: String);
}
