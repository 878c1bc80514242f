//! Buffer-local configuration surface.
//!
//! These tunables are local to one [`crate::RowBuffer`] and are not part of
//! the wire contract in the crate's external interfaces — they only affect
//! how generously the buffer preallocates and how it orders strings for
//! `min_str`/`max_str` tracking.

/// String comparison order used when updating `min_str`/`max_str` in
/// [`crate::RowBufferStats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collation {
    /// Compare by Unicode codepoint order. The default, and what the
    /// original implementation does unconditionally.
    Unicode,
    /// Compare using a named, locale-aware collation. Comparison itself is
    /// still delegated to `Ord` on `str` today; this variant exists so
    /// callers can record which collation a channel's schema declared
    /// without the buffer silently assuming codepoint order.
    Named(String),
}

impl Default for Collation {
    fn default() -> Self {
        Self::Unicode
    }
}

/// Configuration for a [`crate::RowBuffer`].
///
/// Every field defaults to the value the original implementation hardcoded,
/// so leaving a `RowBufferConfig` at its default reproduces the original
/// behavior exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBufferConfig {
    /// Rows to preallocate per column vector at `setup_schema` time, to
    /// avoid repeated grow-safe reallocation for the common case.
    pub initial_column_capacity: usize,
    /// An advisory threshold, in the same units as [`crate::RowBuffer::size`],
    /// a caller may consult before calling `insert_rows` again. The buffer
    /// never enforces this itself; enforcement is the flush scheduler's job.
    pub max_buffer_size_hint: Option<f64>,
    /// Comparison order for `min_str`/`max_str` tracking.
    pub string_collation: Collation,
}

impl Default for RowBufferConfig {
    fn default() -> Self {
        Self {
            initial_column_capacity: 1024,
            max_buffer_size_hint: None,
            string_collation: Collation::Unicode,
        }
    }
}

impl RowBufferConfig {
    /// Set the per-column preallocation size.
    #[must_use]
    pub fn with_initial_column_capacity(mut self, capacity: usize) -> Self {
        self.initial_column_capacity = capacity;
        self
    }

    /// Set the advisory max-buffer-size hint.
    #[must_use]
    pub fn with_max_buffer_size_hint(mut self, hint: f64) -> Self {
        self.max_buffer_size_hint = Some(hint);
        self
    }

    /// Set the string collation used for `min_str`/`max_str` tracking.
    #[must_use]
    pub fn with_string_collation(mut self, collation: Collation) -> Self {
        self.string_collation = collation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_hardcoded_behavior() {
        let config = RowBufferConfig::default();
        assert_eq!(config.initial_column_capacity, 1024);
        assert_eq!(config.max_buffer_size_hint, None);
        assert_eq!(config.string_collation, Collation::Unicode);
    }

    #[test]
    fn builder_methods_chain() {
        let config = RowBufferConfig::default()
            .with_initial_column_capacity(16)
            .with_max_buffer_size_hint(1e6)
            .with_string_collation(Collation::Named("en_US".to_string()));
        assert_eq!(config.initial_column_capacity, 16);
        assert_eq!(config.max_buffer_size_hint, Some(1e6));
        assert_eq!(config.string_collation, Collation::Named("en_US".to_string()));
    }
}
