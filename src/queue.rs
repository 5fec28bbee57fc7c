//! Bucketed minimum-priority queue.
//!
//! Items are grouped by integer priority; each bucket is FIFO. Dequeue serves
//! the lowest non-empty bucket and rescans the bucket keys only when the
//! current one runs dry. Priorities in this crate are small path costs, so
//! the number of buckets stays tiny.

use std::collections::{HashMap, VecDeque};

/// Minimum-priority queue keyed by `i32` priority, FIFO within a priority.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    buckets: HashMap<i32, VecDeque<T>>,
    /// Lowest bucket key known to be worth looking at.
    lowest: i32,
    len: usize,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            lowest: i32::MAX,
            len: 0,
        }
    }

    /// Append `item` to the bucket for `priority`.
    pub fn add(&mut self, item: T, priority: i32) {
        self.buckets.entry(priority).or_default().push_back(item);
        if priority < self.lowest {
            self.lowest = priority;
        }
        self.len += 1;
    }

    /// Remove the oldest item of the lowest priority bucket.
    ///
    /// Returns `None` once every bucket is empty.
    pub fn try_dequeue(&mut self) -> Option<(T, i32)> {
        if let Some(item) = self.buckets.get_mut(&self.lowest).and_then(VecDeque::pop_front) {
            self.len -= 1;
            return Some((item, self.lowest));
        }

        // Current bucket is exhausted: rescan for the new minimum.
        self.lowest = self
            .buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(&key, _)| key)
            .min()
            .unwrap_or(i32::MAX);

        let item = self.buckets.get_mut(&self.lowest)?.pop_front()?;
        self.len -= 1;
        Some((item, self.lowest))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue() {
        let mut q: PriorityQueue<u8> = PriorityQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.try_dequeue(), None);
    }

    #[test]
    fn test_lowest_priority_first() {
        let mut q = PriorityQueue::new();
        q.add("c", 7);
        q.add("a", 2);
        q.add("b", 5);
        assert_eq!(q.try_dequeue(), Some(("a", 2)));
        assert_eq!(q.try_dequeue(), Some(("b", 5)));
        assert_eq!(q.try_dequeue(), Some(("c", 7)));
        assert_eq!(q.try_dequeue(), None);
    }

    #[test]
    fn test_fifo_within_bucket() {
        let mut q = PriorityQueue::new();
        q.add(1, 3);
        q.add(2, 3);
        q.add(3, 3);
        assert_eq!(q.try_dequeue(), Some((1, 3)));
        assert_eq!(q.try_dequeue(), Some((2, 3)));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_lower_item_added_after_drain() {
        let mut q = PriorityQueue::new();
        q.add('x', 4);
        assert_eq!(q.try_dequeue(), Some(('x', 4)));
        q.add('y', 9);
        q.add('z', 1);
        assert_eq!(q.try_dequeue(), Some(('z', 1)));
        assert_eq!(q.try_dequeue(), Some(('y', 9)));
    }

    #[test]
    fn test_negative_priorities() {
        let mut q = PriorityQueue::new();
        q.add("late", 0);
        q.add("early", -3);
        assert_eq!(q.try_dequeue(), Some(("early", -3)));
        assert_eq!(q.try_dequeue(), Some(("late", 0)));
    }
}
