//! Bounded history of completed operations
//!
//! Entries are kept most-recent-first. The list never grows past
//! [`History::MAX_ENTRIES`]; pushing onto a full history evicts the oldest.

use std::collections::VecDeque;

use crate::core::Operation;

/// One completed operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    /// Operator applied
    pub operator: Operation,
    /// Parsed operand the operator was applied with
    pub operand: f64,
    /// Result before the operation
    pub previous_result: f64,
    /// Result after the operation
    pub new_result: f64,
    /// Creation time (Unix epoch millis), unique within a history.
    /// Only used as a list-item key, never displayed.
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates a history entry with the given list key
    #[must_use]
    pub fn new(
        operator: Operation,
        operand: f64,
        previous_result: f64,
        new_result: f64,
        timestamp: u64,
    ) -> Self {
        Self {
            operator,
            operand,
            previous_result,
            new_result,
            timestamp,
        }
    }
}

/// Returns the current timestamp in milliseconds
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Most-recent-first list of completed operations
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    last_timestamp: u64,
}

impl History {
    /// Maximum number of entries kept
    pub const MAX_ENTRIES: usize = 6;

    /// Creates an empty history
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::MAX_ENTRIES + 1),
            last_timestamp: 0,
        }
    }

    /// Prepends an entry, evicting the oldest one when full
    fn push(&mut self, entry: HistoryEntry) {
        self.last_timestamp = self.last_timestamp.max(entry.timestamp);
        self.entries.push_front(entry);
        self.entries.truncate(Self::MAX_ENTRIES);
    }

    /// Records a completed operation and returns the stored entry.
    ///
    /// Timestamps are bumped past the previous entry's so that two operations
    /// within the same millisecond still get distinct keys.
    pub fn record(
        &mut self,
        operator: Operation,
        operand: f64,
        previous_result: f64,
        new_result: f64,
    ) -> HistoryEntry {
        let now = current_timestamp();
        let timestamp = if now > self.last_timestamp {
            now
        } else {
            self.last_timestamp.saturating_add(1)
        };
        let entry = HistoryEntry::new(operator, operand, previous_result, new_result, timestamp);
        self.push(entry);
        entry
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
