//! Tracing instrumentation for row buffer operations.
//!
//! Mirrors the span-name/attribute-key module pair used for database
//! operations elsewhere in this codebase, scoped to the three row buffer
//! operations that mutate state. There is no SQL statement here, so the
//! statement-sanitization machinery from that module has no counterpart —
//! every attribute recorded below is already safe to log verbatim.

/// Span names for row buffer operations.
pub mod span_names {
    /// Span name for `setup_schema`.
    pub const SETUP_SCHEMA: &str = "row_buffer.setup_schema";
    /// Span name for `insert_rows`.
    pub const INSERT_ROWS: &str = "row_buffer.insert_rows";
    /// Span name for `flush`.
    pub const FLUSH: &str = "row_buffer.flush";
}

/// Attribute keys recorded on row buffer spans.
pub mod attributes {
    /// Owning channel's fully-qualified name.
    pub const CHANNEL_NAME: &str = "channel.name";
    /// Number of columns installed by `setup_schema`.
    pub const COLUMN_COUNT: &str = "row_buffer.column_count";
    /// Number of rows passed to `insert_rows`.
    pub const ROW_COUNT: &str = "row_buffer.row_count";
    /// Buffer size estimate after the operation completed.
    pub const BUFFER_SIZE: &str = "row_buffer.buffer_size";
    /// Row sequencer returned by a successful `flush`.
    pub const ROW_SEQUENCER: &str = "row_buffer.row_sequencer";
}
