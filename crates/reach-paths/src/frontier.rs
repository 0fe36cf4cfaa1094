//! Min-priority frontier that pops equal costs in insertion order.

use std::collections::BinaryHeap;

/// A pending frontier cell, ordered by `(cost, seq)` for use in `BinaryHeap`.
///
/// `seq` is assigned at push time and strictly increases, so entries with
/// equal cost pop in insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) cost: i32,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (cost, seq) first.
        (other.cost, other.seq).cmp(&(self.cost, self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with insertion-order tie-break.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    /// Drop every entry and restart the sequence counter.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    pub(crate) fn push(&mut self, cost: i32, idx: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { cost, seq, idx });
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
