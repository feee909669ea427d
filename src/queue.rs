//! Min-first priority queue with key-based lookup
//!
//! Both the spanning tree frontier and the A* open set need "always give me
//! the current minimum", and the A* open set additionally needs to find and
//! replace the entry for a grid index. This wraps a `BinaryHeap` (min-heap via
//! `Reverse`) and adds the keyed operations on top, which are linear scans.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Items that can be located in a [`PriorityQueue`] by a derived key
pub trait Keyed {
    /// Key type used to match entries
    type Key: PartialEq;

    /// Derive the lookup key of this item
    fn key(&self) -> Self::Key;
}

/// Priority queue whose `pop` and `top` return the smallest element
///
/// Several entries may share a key. They are all retained until each one is
/// popped or individually replaced.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Insert an item
    pub fn push(&mut self, item: T) {
        self.heap.push(Reverse(item));
    }

    /// Remove and return the smallest item
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(item)| item)
    }

    /// Peek at the smallest item
    pub fn top(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(item)| item)
    }

    /// Number of queued items
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Iterate over the items in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|Reverse(item)| item)
    }
}

impl<T: Ord + Keyed> PriorityQueue<T> {
    /// Check if any queued item has the given key
    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.iter().any(|item| item.key() == *key)
    }

    /// Find a queued item by key
    ///
    /// With duplicate keys, which matching entry is returned is unspecified.
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.iter().find(|item| item.key() == *key)
    }

    /// Replace one entry that shares `item`'s key
    ///
    /// Returns the replaced entry, or `None` (leaving the queue unchanged and
    /// dropping `item`) when no entry has that key. Other entries with the
    /// same key stay queued.
    pub fn replace(&mut self, item: T) -> Option<T> {
        let key = item.key();
        let mut items = std::mem::take(&mut self.heap).into_vec();
        let old = match items.iter().position(|Reverse(existing)| existing.key() == key) {
            Some(pos) => Some(std::mem::replace(&mut items[pos], Reverse(item)).0),
            None => None,
        };
        self.heap = BinaryHeap::from(items);
        old
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Entry {
        priority: u32,
        id: char,
    }

    impl Keyed for Entry {
        type Key = char;

        fn key(&self) -> char {
            self.id
        }
    }

    fn entry(priority: u32, id: char) -> Entry {
        Entry { priority, id }
    }

    #[test]
    fn test_pops_in_ascending_order() {
        let mut queue = PriorityQueue::new();
        for p in [5, 1, 4, 2, 3] {
            queue.push(p);
        }
        assert_eq!(queue.top(), Some(&1));
        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_contains_and_get() {
        let mut queue = PriorityQueue::new();
        queue.push(entry(3, 'a'));
        queue.push(entry(1, 'b'));

        assert!(queue.contains_key(&'a'));
        assert!(!queue.contains_key(&'z'));
        assert_eq!(queue.get(&'a'), Some(&entry(3, 'a')));
        assert_eq!(queue.get(&'z'), None);
    }

    #[test]
    fn test_replace_reorders() {
        let mut queue = PriorityQueue::new();
        queue.push(entry(3, 'a'));
        queue.push(entry(2, 'b'));

        let old = queue.replace(entry(1, 'a'));
        assert_eq!(old, Some(entry(3, 'a')));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(entry(1, 'a')));
        assert_eq!(queue.pop(), Some(entry(2, 'b')));
    }

    #[test]
    fn test_replace_missing_key() {
        let mut queue = PriorityQueue::new();
        queue.push(entry(3, 'a'));
        assert_eq!(queue.replace(entry(1, 'q')), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.top(), Some(&entry(3, 'a')));
    }

    #[test]
    fn test_duplicate_keys_retained() {
        let mut queue = PriorityQueue::new();
        queue.push(entry(4, 'a'));
        queue.push(entry(6, 'a'));
        queue.push(entry(5, 'b'));

        // Replacing touches exactly one of the two 'a' entries
        queue.replace(entry(1, 'a'));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().filter(|e| e.id == 'a').count(), 2);
        assert_eq!(queue.pop(), Some(entry(1, 'a')));
        assert!(queue.contains_key(&'a'));
    }
}
