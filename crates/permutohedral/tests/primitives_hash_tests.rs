#![cfg(feature = "dev")]
//! Tests for the lattice hash index.
//!
//! These tests verify the insertion-only key-to-slot map used by every
//! lattice:
//! - Dense slot numbering in first-seen order
//! - Read-only lookups
//! - Growth at half load without renumbering
//!
//! ## Test Organization
//!
//! 1. **Slot Assignment** - Numbering and repeated keys
//! 2. **Lookup** - Absent keys and side effects
//! 3. **Growth** - Capacity doubling and slot stability

use permutohedral::internals::primitives::hash::LatticeHashIndex;

/// Zero-sum key with `d + 1` coordinates derived from `i`.
fn key(i: i32, d: usize) -> Vec<i32> {
    let dp1 = (d + 1) as i32;
    let mut k = vec![0; d + 1];
    k[0] = i * dp1;
    k[d] = -i * dp1;
    if d >= 2 {
        k[1] = (i % 7) * dp1;
        k[d] -= (i % 7) * dp1;
    }
    k
}

// ============================================================================
// Slot Assignment
// ============================================================================

/// Test that new keys get consecutive slots and repeats reuse them.
#[test]
fn test_slots_in_first_seen_order() {
    let mut index = LatticeHashIndex::with_capacity(4, 8);
    assert!(index.is_empty());

    for i in 0..10 {
        assert_eq!(index.slot_for(&key(i, 3)), i as usize);
    }
    for i in (0..10).rev() {
        assert_eq!(index.slot_for(&key(i, 3)), i as usize);
    }

    assert_eq!(index.len(), 10);
    assert_eq!(index.key_size(), 4);
    assert_eq!(index.key(7), key(7, 3).as_slice());
}

/// Test the initial capacity floor and power-of-two sizing.
#[test]
fn test_initial_capacity() {
    assert_eq!(LatticeHashIndex::with_capacity(3, 0).capacity(), 16);
    assert_eq!(LatticeHashIndex::with_capacity(3, 5).capacity(), 16);
    assert_eq!(LatticeHashIndex::with_capacity(3, 100).capacity(), 256);
}

// ============================================================================
// Lookup
// ============================================================================

/// Test that lookups never insert.
#[test]
fn test_lookup_is_read_only() {
    let mut index = LatticeHashIndex::with_capacity(3, 4);
    index.slot_for(&[0, 0, 0]);

    assert_eq!(index.lookup(&[0, 0, 0]), Some(0));
    assert_eq!(index.lookup(&[3, -3, 0]), None);
    assert_eq!(index.lookup(&[3, -3, 0]), None);
    assert_eq!(index.len(), 1);
}

// ============================================================================
// Growth
// ============================================================================

/// Test that the table doubles at half load and keeps every slot id.
#[test]
fn test_growth_keeps_slots() {
    let d = 2;
    let mut index = LatticeHashIndex::with_capacity(d + 1, 1);
    let initial = index.capacity();

    let n = 1000;
    for i in 0..n {
        index.slot_for(&key(i, d));
        assert!(2 * index.len() <= index.capacity());
    }

    assert!(index.capacity() > initial);
    assert!(index.capacity().is_power_of_two());
    assert_eq!(index.len(), n as usize);

    for i in 0..n {
        assert_eq!(index.lookup(&key(i, d)), Some(i as usize));
        assert_eq!(index.key(i as usize), key(i, d).as_slice());
    }
}

/// Test that keys differing in a single coordinate are distinct.
#[test]
fn test_near_keys_are_distinct() {
    let mut index = LatticeHashIndex::with_capacity(3, 4);
    let a = index.slot_for(&[1, 1, -2]);
    let b = index.slot_for(&[1, -2, 1]);
    let c = index.slot_for(&[-2, 1, 1]);

    assert_eq!((a, b, c), (0, 1, 2));
}
