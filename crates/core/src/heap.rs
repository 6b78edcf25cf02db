//! Binary min-heap keyed by weight, with a deterministic tie-break.
//!
//! Entries are ordered by `(weight, sequence)`, where `sequence` is a counter
//! the heap stamps on each insert. Equal weights therefore come out in
//! insertion order, independent of heap shape. Encoder and decoder build
//! their trees through the same heap from the same table, so both arrive at
//! the same tree and the same codes.

/// Anything the heap can order.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
struct Entry<T> {
    weight: u64,
    sequence: u64,
    item: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.sequence)
    }
}

/// Min-heap over `T`, stored as an implicit binary tree in a `Vec`.
///
/// # Invariants
/// - `entries[parent(i)].key() < entries[i].key()` for every `i > 0`
/// - `next_sequence` is larger than every stored sequence
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    entries: Vec<Entry<T>>,
    next_sequence: u64,
}

impl<T: Weighted> MinHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an item, O(log n).
    pub fn insert(&mut self, item: T) {
        let entry = Entry {
            weight: item.weight(),
            sequence: self.next_sequence,
            item,
        };
        self.next_sequence += 1;
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the lowest-weight item, O(log n).
    ///
    /// The last element replaces the root and is sifted down.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(min.item)
    }

    /// The item `extract_min` would return next.
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.item)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].key() <= self.entries[idx].key() {
                break;
            }
            self.entries.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.entries[left].key() < self.entries[smallest].key() {
                smallest = left;
            }
            if right < len && self.entries[right].key() < self.entries[smallest].key() {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.entries.swap(idx, smallest);
            idx = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.entries.len()).all(|i| self.entries[(i - 1) / 2].key() < self.entries[i].key())
    }
}

impl<T: Weighted> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u64, &'static str);

    impl Weighted for Item {
        fn weight(&self) -> u64 {
            self.0
        }
    }

    impl Weighted for u64 {
        fn weight(&self) -> u64 {
            *self
        }
    }

    #[test]
    fn test_extract_in_weight_order() {
        let mut heap = MinHeap::new();
        for w in [5u64, 1, 9, 3, 7, 2] {
            heap.insert(w);
            assert!(heap.is_valid());
        }
        let mut out = Vec::new();
        while let Some(w) = heap.extract_min() {
            assert!(heap.is_valid());
            out.push(w);
        }
        assert_eq!(out, vec![1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let mut heap = MinHeap::new();
        heap.insert(Item(2, "first"));
        heap.insert(Item(1, "low"));
        heap.insert(Item(2, "second"));
        heap.insert(Item(2, "third"));

        assert_eq!(heap.extract_min(), Some(Item(1, "low")));
        assert_eq!(heap.extract_min(), Some(Item(2, "first")));
        assert_eq!(heap.extract_min(), Some(Item(2, "second")));
        assert_eq!(heap.extract_min(), Some(Item(2, "third")));
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn test_reinserted_tie_goes_last() {
        let mut heap = MinHeap::new();
        heap.insert(Item(1, "a"));
        heap.insert(Item(1, "b"));
        heap.insert(Item(2, "c"));
        let a = heap.extract_min().unwrap();
        let b = heap.extract_min().unwrap();
        heap.insert(Item(a.0 + b.0, "merged"));

        assert_eq!(heap.extract_min(), Some(Item(2, "c")));
        assert_eq!(heap.extract_min(), Some(Item(2, "merged")));
    }

    #[test]
    fn test_empty() {
        let mut heap: MinHeap<u64> = MinHeap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.extract_min(), None);
    }

    #[quickcheck]
    fn prop_drains_sorted(weights: Vec<u64>) -> bool {
        let mut heap = MinHeap::with_capacity(weights.len());
        for &w in &weights {
            heap.insert(w);
        }
        let mut drained = Vec::with_capacity(weights.len());
        while let Some(w) = heap.extract_min() {
            drained.push(w);
        }
        let mut expected = weights;
        expected.sort_unstable();
        drained == expected
    }
}
