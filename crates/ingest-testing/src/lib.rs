//! Test fixtures, a probe allocator, and `proptest` strategies for
//! `ingest-row-buffer`.
//!
//! This crate is `publish = false` and consumed only by `[dev-dependencies]`
//! of downstream test suites, mirroring how the teacher crate's own test
//! infrastructure crate is a dev-only peer rather than a production
//! dependency.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod channel;
pub mod fixtures;
pub mod probe_allocator;
pub mod strategies;

pub use channel::StubChannel;
pub use probe_allocator::ProbeAllocator;
