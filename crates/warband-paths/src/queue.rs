//! Binary min-heap with a position index.
//!
//! Unlike [`std::collections::BinaryHeap`], an [`IndexedQueue`] knows where
//! every element sits, so membership is O(1) and a priority can be changed
//! in place in O(log n) instead of pushing a duplicate entry.

use std::collections::HashMap;
use std::hash::Hash;

/// A min-priority queue keyed by element identity.
///
/// Each element appears at most once. Equal priorities come out in an
/// order decided by the heap mechanics, which is stable for a given
/// sequence of operations.
#[derive(Clone, Debug)]
pub struct IndexedQueue<T, P = f32> {
    heap: Vec<(T, P)>,
    positions: HashMap<T, usize>,
}

impl<T, P> Default for IndexedQueue<T, P>
where
    T: Copy + Eq + Hash,
    P: Copy + PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> IndexedQueue<T, P>
where
    T: Copy + Eq + Hash,
    P: Copy + PartialOrd,
{
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Create an empty queue with room for `cap` items.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: Vec::with_capacity(cap),
            positions: HashMap::with_capacity(cap),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, item: T) -> bool {
        self.positions.contains_key(&item)
    }

    /// Current priority of `item`, if queued.
    pub fn priority(&self, item: T) -> Option<P> {
        self.positions.get(&item).map(|&i| self.heap[i].1)
    }

    /// The minimum element and its priority, without removing it.
    pub fn peek(&self) -> Option<(T, P)> {
        self.heap.first().copied()
    }

    /// Insert `item`. If it is already queued this behaves like
    /// [`update_priority`](Self::update_priority).
    pub fn enqueue(&mut self, item: T, priority: P) {
        if self.contains(item) {
            self.update_priority(item, priority);
            return;
        }
        let i = self.heap.len();
        self.heap.push((item, priority));
        self.positions.insert(item, i);
        self.bubble_up(i);
    }

    /// Remove and return the element with the lowest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (item, _) = self.heap.pop()?;
        self.positions.remove(&item);
        if !self.heap.is_empty() {
            self.sink_down(0);
        }
        Some(item)
    }

    /// Change the priority of a queued element, moving it up or down as
    /// needed. Returns `false` if `item` is not queued.
    pub fn update_priority(&mut self, item: T, priority: P) -> bool {
        let Some(&i) = self.positions.get(&item) else {
            return false;
        };
        let old = self.heap[i].1;
        self.heap[i].1 = priority;
        if priority < old {
            self.bubble_up(i);
        } else if old < priority {
            self.sink_down(i);
        }
        true
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    fn bubble_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].1 < self.heap[parent].1 {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sink_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < n && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].0, a);
        self.positions.insert(self.heap[b].0, b);
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        for i in 1..self.heap.len() {
            let parent = (i - 1) / 2;
            assert!(
                !(self.heap[i].1 < self.heap[parent].1),
                "heap property violated at {i}"
            );
        }
        assert_eq!(self.positions.len(), self.heap.len());
        for (i, (item, _)) in self.heap.iter().enumerate() {
            assert_eq!(self.positions[item], i);
        }
    }
}
