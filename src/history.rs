//! Caller-owned search history.
//!
//! The engine never stores history; a serving layer keeps one
//! [`SearchHistory`] per user and passes [`SearchHistory::as_slice`] to
//! [`SuggestEngine::suggest`](crate::engine::SuggestEngine::suggest).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of past queries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Past queries, most recent first, capped at a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SearchHistory {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a submitted query as the most recent entry, dropping the oldest
    /// one beyond capacity. Blank submissions are ignored.
    pub fn record(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query.trim().is_empty() || self.capacity == 0 {
            return;
        }

        self.entries.push_front(query);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, most recent first.
    pub fn as_slice(&mut self) -> &[String] {
        self.entries.make_contiguous()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
