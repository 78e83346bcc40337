//! Sorted-array id set with binary-search operations.
//!
//! Mirrors the contents of the A* open queue so "is X open" is a
//! binary search instead of a heap scan, and doubles as the closed
//! set. Insertion keeps the backing array sorted.

/// A sorted set of vertex ids.
#[derive(Debug, Clone, Default)]
pub struct SortedIdSet {
    ids: Vec<u32>,
}

impl SortedIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, keeping the array sorted. Duplicates are kept;
    /// the queue this mirrors can also hold an id more than once.
    pub fn insert(&mut self, value: u32) {
        let at = match self.ids.binary_search(&value) {
            Ok(found) => found,
            Err(slot) => slot,
        };
        self.ids.insert(at, value);
    }

    /// Whether the set holds the value.
    pub fn contains(&self, value: u32) -> bool {
        self.ids.binary_search(&value).is_ok()
    }

    /// Remove one occurrence of the value, if present.
    pub fn remove(&mut self, value: u32) {
        if let Ok(at) = self.ids.binary_search(&value) {
            self.ids.remove(at);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }
}
