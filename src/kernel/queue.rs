//! The delta-queue (§3, §4.10): entries store the delay *between* events,
//! not absolute times, kept in non-decreasing cumulative-wake-time order.
//!
//! Insertion walks the list summing deltas and splices the new entry after
//! the last entry whose cumulative sum is `<= target`, which is what keeps
//! same-time entries in FIFO insertion order (§5's ordering guarantee) —
//! this is the corrected version of the reference implementation, which
//! left the follower's delta unadjusted after a mid-list splice (§9).

use std::collections::VecDeque;

use super::process::ProcessId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub delta: u64,
    pub process: ProcessId,
}

#[derive(Debug, Default)]
pub struct DeltaQueue {
    entries: VecDeque<Entry>,
}

impl DeltaQueue {
    pub fn new() -> Self {
        DeltaQueue { entries: VecDeque::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Splice a new entry for `process` at `delay` fs from now. Walks the
    /// list consuming each entry's delta from `delay` until it would go
    /// negative; that's the splice point. If there's a follower left at
    /// that point, its delta shrinks by the new entry's delta so the
    /// absolute wake times of everything after it are unchanged.
    pub fn insert(&mut self, delay: u64, process: ProcessId) {
        let mut idx = 0;
        let mut remaining = delay;
        while idx < self.entries.len() && remaining >= self.entries[idx].delta {
            remaining -= self.entries[idx].delta;
            idx += 1;
        }
        if idx < self.entries.len() {
            self.entries[idx].delta -= remaining;
        }
        self.entries.insert(idx, Entry { delta: remaining, process });
    }

    pub fn pop(&mut self) -> Option<Entry> {
        self.entries.pop_front()
    }
}
