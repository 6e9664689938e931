//! Per-body auto-number counters.

use std::collections::HashMap;

/// Auto-number counters of one text body, keyed by (scheme, level).
///
/// Numbering a paragraph restarts every deeper level, so a sub-list that
/// follows its parent item starts again from its own `startAt`.
#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    counters: HashMap<(String, usize), u32>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter for `(scheme, level)` and return its new value.
    /// A fresh counter starts at `start_at` (values below 1 count as 1).
    pub fn next(&mut self, scheme: &str, level: usize, start_at: u32) -> u32 {
        self.counters.retain(|(_, l), _| *l <= level);
        let start = start_at.max(1);
        let value = self
            .counters
            .entry((scheme.to_string(), level))
            .and_modify(|n| *n = n.saturating_add(1))
            .or_insert(start);
        *value
    }

    /// Current value without advancing.
    pub fn peek(&self, scheme: &str, level: usize) -> Option<u32> {
        self.counters.get(&(scheme.to_string(), level)).copied()
    }

    /// Forget every counter, as at the start of a new text body.
    pub fn reset(&mut self) {
        self.counters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
