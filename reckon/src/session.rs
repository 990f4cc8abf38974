//! History and memory store
//!
//! UI-facing state owned by whoever drives the engine. The pure
//! evaluation code never touches this; memory operations take the
//! current display value as an explicit argument.

use reckon_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default number of history entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub expression: String,
    pub result: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// Bounded calculation log, newest first
#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
    next_id: u64,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            next_id: 1,
        }
    }

    /// Record a calculation. Oldest entries fall off past the limit.
    pub fn push(&mut self, expression: impl Into<String>, result: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_front(HistoryEntry {
            id,
            expression: expression.into(),
            result: result.into(),
            timestamp: epoch_millis(),
        });
        self.entries.truncate(self.limit);
        id
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove a single entry. Returns false if the id is not present.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

/// Single memory slot
#[derive(Debug, Default)]
pub struct Memory {
    value: f64,
}

impl Memory {
    pub fn store(&mut self, value: f64) {
        self.value = value;
    }

    pub fn recall(&self) -> f64 {
        self.value
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    pub fn add(&mut self, value: f64) {
        self.value += value;
    }

    pub fn subtract(&mut self, value: f64) {
        self.value -= value;
    }
}

/// History and memory bundled for one engine instance
#[derive(Debug, Default)]
pub struct Session {
    pub history: History,
    pub memory: Memory,
}

impl Session {
    pub fn new(history_limit: usize) -> Self {
        Self {
            history: History::new(history_limit),
            memory: Memory::default(),
        }
    }

    /// Record a calculation unless it produced an error value
    pub fn record(&mut self, expression: &str, result: &Value) {
        if !result.is_error() {
            self.history.push(expression, result.to_string());
        }
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_is_newest_first() {
        let mut h = History::default();
        h.push("1 + 1", "2");
        h.push("2 + 2", "4");
        let exprs: Vec<&str> = h.entries().map(|e| e.expression.as_str()).collect();
        assert_eq!(exprs, vec!["2 + 2", "1 + 1"]);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = History::new(3);
        for i in 0..5 {
            h.push(format!("{} + 0", i), format!("{}", i));
        }
        assert_eq!(h.len(), 3);
        let results: Vec<&str> = h.entries().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut h = History::default();
        let a = h.push("a", "1");
        let b = h.push("b", "2");
        assert!(b > a);
    }

    #[test]
    fn test_remove_by_id() {
        let mut h = History::default();
        let id = h.push("1 + 1", "2");
        h.push("2 + 2", "4");
        assert!(h.remove(id));
        assert!(!h.remove(id));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut h = History::default();
        h.push("1 + 1", "2");
        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn test_memory_operations() {
        let mut m = Memory::default();
        assert_eq!(m.recall(), 0.0);
        m.store(10.0);
        m.add(5.0);
        m.subtract(3.0);
        assert_eq!(m.recall(), 12.0);
        m.clear();
        assert_eq!(m.recall(), 0.0);
    }

    #[test]
    fn test_record_skips_errors() {
        let mut s = Session::default();
        s.record("2 + 2", &Value::Number(4.0));
        s.record("bad", &Value::Error(reckon_core::CalcError::parse_error("bad")));
        assert_eq!(s.history.len(), 1);
    }
}
