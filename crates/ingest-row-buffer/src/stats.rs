//! Running per-column statistics and the derived flush-time payload.

use std::collections::BTreeMap;

use crate::config::Collation;

/// Running statistics for one column, updated online as rows are converted.
///
/// Fields start unset and stay unset until the first observation seeds
/// them; `current_null_count` is the only field that is always present
/// (it starts at zero rather than unset).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowBufferStats {
    /// Number of null cells observed so far.
    pub current_null_count: u64,
    /// Maximum observed byte length, for string-like columns.
    pub current_max_length: Option<u32>,
    /// Minimum observed integer value.
    pub current_min_int: Option<i128>,
    /// Maximum observed integer value.
    pub current_max_int: Option<i128>,
    /// Minimum observed string value, per the column's collation.
    pub current_min_str: Option<String>,
    /// Maximum observed string value, per the column's collation.
    pub current_max_str: Option<String>,
}

impl RowBufferStats {
    /// Record a null observation.
    pub fn inc_null(&mut self) {
        self.current_null_count += 1;
    }

    /// Record an integer observation, updating running min/max. The first
    /// observation seeds both bounds.
    pub fn add_int(&mut self, value: i128) {
        self.current_min_int = Some(self.current_min_int.map_or(value, |min| min.min(value)));
        self.current_max_int = Some(self.current_max_int.map_or(value, |max| max.max(value)));
    }

    /// Record a string observation, updating running min/max under the
    /// given collation. Unicode collation compares by codepoint order
    /// (`str`'s natural `Ord`); a named collation is recorded the same way
    /// today (see [`Collation`]).
    pub fn add_str(&mut self, value: &str, _collation: &Collation) {
        if self.current_min_str.as_deref().is_none_or(|min| value < min) {
            self.current_min_str = Some(value.to_string());
        }
        if self.current_max_str.as_deref().is_none_or(|max| value > max) {
            self.current_max_str = Some(value.to_string());
        }
    }

    /// Update the observed maximum length to `max(prev, len)`.
    pub fn set_max_length(&mut self, len: u32) {
        self.current_max_length = Some(self.current_max_length.map_or(len, |prev| prev.max(len)));
    }
}

/// Per-column statistics as handed to the downstream indexer, keyed by
/// normalized column name.
#[derive(Debug, Clone, PartialEq)]
pub struct FileColumnProperties {
    /// Minimum observed integer value.
    pub min_int: Option<i128>,
    /// Maximum observed integer value.
    pub max_int: Option<i128>,
    /// Minimum observed string value.
    pub min_str: Option<String>,
    /// Maximum observed string value.
    pub max_str: Option<String>,
    /// Maximum observed byte length.
    pub max_length: Option<u32>,
    /// Number of null cells observed.
    pub null_count: u64,
}

impl From<&RowBufferStats> for FileColumnProperties {
    fn from(stats: &RowBufferStats) -> Self {
        Self {
            min_int: stats.current_min_int,
            max_int: stats.current_max_int,
            min_str: stats.current_min_str.clone(),
            max_str: stats.current_max_str.clone(),
            max_length: stats.current_max_length,
            null_count: stats.current_null_count,
        }
    }
}

/// The statistics payload produced by a flush: the sole communication from
/// the row buffer to the downstream indexer.
#[derive(Debug, Clone, PartialEq)]
pub struct EpInfo {
    /// Total rows in the flushed snapshot.
    pub row_count: u64,
    /// Per-column properties, keyed by normalized column name.
    pub columns: BTreeMap<String, FileColumnProperties>,
}

/// Build the flush-time statistics payload from the per-column running
/// stats and their normalized names.
#[must_use]
pub fn build_ep_info(row_count: u64, named_stats: &[(String, RowBufferStats)]) -> EpInfo {
    let columns = named_stats
        .iter()
        .map(|(name, stats)| (name.clone(), FileColumnProperties::from(stats)))
        .collect();
    EpInfo { row_count, columns }
}
