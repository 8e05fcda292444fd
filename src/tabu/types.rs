//! Short-term memory for Tabu Search.

use std::collections::HashMap;

/// An ordered student pair that may not be swapped until `expires`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabuEntry {
    pub a: usize,
    pub b: usize,
    /// Last iteration at which the pair is still tabu.
    pub expires: usize,
}

/// Tabu pairs keyed by `(a, b)`.
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    entries: HashMap<(usize, usize), usize>,
}

impl TabuList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Marks `(a, b)` and `(b, a)` tabu through iteration `expires`.
    pub fn insert(&mut self, a: usize, b: usize, expires: usize) {
        self.entries.insert((a, b), expires);
        self.entries.insert((b, a), expires);
    }

    pub fn is_tabu(&self, a: usize, b: usize, iteration: usize) -> bool {
        self.entries
            .get(&(a, b))
            .is_some_and(|&expires| iteration <= expires)
    }

    /// Drops entries that expired before `iteration`.
    pub fn purge(&mut self, iteration: usize) {
        self.entries.retain(|_, expires| *expires >= iteration);
    }

    pub fn entries(&self) -> impl Iterator<Item = TabuEntry> + '_ {
        self.entries
            .iter()
            .map(|(&(a, b), &expires)| TabuEntry { a, b, expires })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_marks_both_orders() {
        let mut list = TabuList::new();
        list.insert(1, 4, 10);
        assert!(list.is_tabu(1, 4, 5));
        assert!(list.is_tabu(4, 1, 10));
        assert!(!list.is_tabu(4, 1, 11));
        assert!(!list.is_tabu(1, 2, 5));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_purge_removes_expired() {
        let mut list = TabuList::new();
        list.insert(0, 1, 3);
        list.insert(2, 3, 8);
        list.purge(4);
        assert_eq!(list.len(), 2);
        assert!(list.entries().all(|e| e.expires == 8));
    }
}
