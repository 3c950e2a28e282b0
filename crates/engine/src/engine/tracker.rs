//! Bounded per-instruction-pointer tracking table.
//!
//! The tracker table holds one tracking entry per observed instruction
//! pointer, up to a fixed capacity. It provides:
//! 1. **Resolution:** Constant-time lookup of the entry for a tag, creating
//!    a fresh entry on first sight.
//! 2. **FIFO Recycling:** At capacity, the earliest-inserted entry is evicted
//!    to admit a new tag. Eviction order is pure insertion order; a hit on an
//!    existing entry never refreshes its position.
//!
//! Entries fill the slot arena in insertion order, so once the table is full
//! a round-robin victim pointer over the slots walks exactly the insertion
//! order. Eviction discards every piece of per-tag state irrevocably.

use std::collections::HashMap;

use crate::engine::confidence::Confidence;
use crate::engine::history::DeltaHistory;
use crate::engine::replay::PatternReplay;

/// Tracking state for one instruction pointer.
#[derive(Clone, Debug)]
pub struct TrackerEntry {
    /// Tag identifying the tracked instruction pointer.
    pub ip_tag: u64,
    /// Cache-line number of the most recent access; `None` before the first.
    pub last_line: Option<u64>,
    /// Accesses observed by this entry; drives the spectral cadence. Runs
    /// continuously across locks, unlocks, and confidence resets.
    pub accesses: u64,
    /// Recent delta history for this stream.
    pub history: DeltaHistory,
    /// Pattern lock and replay state.
    pub replay: PatternReplay,
    /// Prediction confidence counter.
    pub confidence: Confidence,
    /// Delta predicted on the previous round, awaiting verification.
    pub pending: Option<i64>,
}

impl TrackerEntry {
    /// Creates a zeroed entry for a newly seen tag.
    pub const fn new(ip_tag: u64) -> Self {
        Self {
            ip_tag,
            last_line: None,
            accesses: 0,
            history: DeltaHistory::new(),
            replay: PatternReplay::new(),
            confidence: Confidence::new(),
            pending: None,
        }
    }
}

/// Bounded collection of tracking entries with FIFO replacement.
#[derive(Debug)]
pub struct TrackerTable {
    /// Slot arena; fills in insertion order up to capacity.
    slots: Vec<TrackerEntry>,
    /// Tag to slot index lookup.
    index: HashMap<u64, usize>,
    /// Round-robin victim pointer, meaningful once the arena is full.
    next_victim: usize,
    /// Maximum number of tracked tags.
    capacity: usize,
}

impl TrackerTable {
    /// Creates an empty table holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to one so resolution always has a slot.
    pub fn new(capacity: usize) -> Self {
        let safe_capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(safe_capacity),
            index: HashMap::with_capacity(safe_capacity),
            next_victim: 0,
            capacity: safe_capacity,
        }
    }

    /// Returns the number of tracked tags.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no tags are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the table capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the entry for `ip_tag`, creating one if the tag is new.
    ///
    /// Capacity pressure is not an error: at capacity, the earliest-inserted
    /// entry is recycled and its tag is returned so the caller can account
    /// for the eviction. All accumulated state for the evicted tag is lost.
    pub fn resolve(&mut self, ip_tag: u64) -> (&mut TrackerEntry, Option<u64>) {
        if let Some(&slot) = self.index.get(&ip_tag) {
            return (&mut self.slots[slot], None);
        }

        let (slot, evicted) = if self.slots.len() < self.capacity {
            self.slots.push(TrackerEntry::new(ip_tag));
            (self.slots.len() - 1, None)
        } else {
            let slot = self.next_victim;
            self.next_victim = (self.next_victim + 1) % self.capacity;
            let old_tag = self.slots[slot].ip_tag;
            let _ = self.index.remove(&old_tag);
            self.slots[slot] = TrackerEntry::new(ip_tag);
            (slot, Some(old_tag))
        };
        let _ = self.index.insert(ip_tag, slot);
        (&mut self.slots[slot], evicted)
    }

    /// Iterates the tracked entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackerEntry> {
        self.slots.iter()
    }
}
