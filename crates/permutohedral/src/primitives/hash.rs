//! Open-addressing hash index for lattice vertex keys.
//!
//! ## Purpose
//!
//! This module maps integer lattice-vertex keys (the (d+1)-tuples produced by
//! the embedding stage) to dense slot indices. Slots are handed out in
//! creation order, so the n-th distinct key observed always owns slot `n - 1`.
//!
//! ## Design notes
//!
//! * **Flat storage**: Keys live back to back in one `Vec<i32>` indexed by slot;
//!   the probe table stores slot ids only.
//! * **Linear probing**: Collisions walk forward (wrapping) and compare keys exactly.
//! * **Explicit growth**: The probe table doubles whenever it would reach half
//!   load. Slot ids never change on growth; only the probe table is rebuilt.
//!
//! ## Key concepts
//!
//! * **`slot_for`**: Insert-or-get. Used by splatting.
//! * **`lookup`**: Read-only. Used by blur neighbour discovery and by queries
//!   against an existing lattice; never creates vertices.
//!
//! ## Invariants
//!
//! * `len() <= capacity() / 2` after every insertion.
//! * Every stored key has exactly `key_size()` coordinates.
//! * Within one index, the same key always maps to the same slot.
//!
//! ## Non-goals
//!
//! * Deletion. The index is insertion-only for the lifetime of a lattice.
//! * Concurrent insertion. Slot assignment runs on one thread.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Probe-table marker for an unused cell.
const EMPTY: usize = usize::MAX;

/// Multiplier of the polynomial key hash.
const HASH_MULTIPLIER: u64 = 1_664_525;

/// Smallest probe table ever allocated.
const MIN_CAPACITY: usize = 16;

// ============================================================================
// Hash Index
// ============================================================================

/// Dense, insertion-only map from lattice keys to vertex slots.
#[derive(Debug, Clone)]
pub struct LatticeHashIndex {
    /// Number of coordinates per key (d + 1).
    key_size: usize,

    /// Keys in slot order, `key_size` coordinates each.
    keys: Vec<i32>,

    /// Probe table of slot ids (`EMPTY` for unused cells).
    table: Vec<usize>,
}

impl LatticeHashIndex {
    /// Create an index for keys of `key_size` coordinates sized for about
    /// `expected_vertices` distinct keys.
    pub fn with_capacity(key_size: usize, expected_vertices: usize) -> Self {
        let capacity = expected_vertices
            .saturating_mul(2)
            .max(MIN_CAPACITY)
            .next_power_of_two();
        Self {
            key_size,
            keys: Vec::with_capacity(expected_vertices.saturating_mul(key_size)),
            table: vec![EMPTY; capacity],
        }
    }

    /// Number of distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        if self.key_size == 0 {
            0
        } else {
            self.keys.len() / self.key_size
        }
    }

    /// Whether no key has been stored yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of cells in the probe table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Coordinates per key.
    #[inline]
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Key owned by `slot`.
    #[inline]
    pub fn key(&self, slot: usize) -> &[i32] {
        &self.keys[slot * self.key_size..(slot + 1) * self.key_size]
    }

    /// Return the slot of `key`, creating a new one if the key is unseen.
    pub fn slot_for(&mut self, key: &[i32]) -> usize {
        debug_assert_eq!(key.len(), self.key_size);

        if 2 * (self.len() + 1) > self.capacity() {
            self.grow();
        }

        match self.probe(key) {
            Ok(slot) => slot,
            Err(cell) => {
                let slot = self.len();
                self.keys.extend_from_slice(key);
                self.table[cell] = slot;
                slot
            }
        }
    }

    /// Return the slot of `key` without inserting it.
    #[inline]
    pub fn lookup(&self, key: &[i32]) -> Option<usize> {
        debug_assert_eq!(key.len(), self.key_size);
        self.probe(key).ok()
    }

    /// Walk the probe sequence of `key`.
    ///
    /// Returns `Ok(slot)` when the key is stored, or `Err(cell)` with the
    /// first empty cell where it would be inserted.
    fn probe(&self, key: &[i32]) -> Result<usize, usize> {
        let mask = self.capacity() - 1;
        let mut cell = (Self::hash(key) as usize) & mask;
        loop {
            let slot = self.table[cell];
            if slot == EMPTY {
                return Err(cell);
            }
            if self.key(slot) == key {
                return Ok(slot);
            }
            cell = (cell + 1) & mask;
        }
    }

    /// Double the probe table and reinsert every slot.
    fn grow(&mut self) {
        let capacity = self.capacity() * 2;
        let mask = capacity - 1;
        let mut table = vec![EMPTY; capacity];

        for slot in 0..self.len() {
            let mut cell = (Self::hash(self.key(slot)) as usize) & mask;
            while table[cell] != EMPTY {
                cell = (cell + 1) & mask;
            }
            table[cell] = slot;
        }

        self.table = table;
    }

    /// Polynomial hash over every coordinate of the key.
    #[inline]
    fn hash(key: &[i32]) -> u64 {
        key.iter().fold(0u64, |acc, &k| {
            acc.wrapping_add(k as i64 as u64)
                .wrapping_mul(HASH_MULTIPLIER)
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
