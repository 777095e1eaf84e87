//! Splatting of point values onto lattice vertices.
//!
//! ## Purpose
//!
//! This module resolves every embedded simplex corner to a vertex slot and
//! scatters each point's value vector onto its corners, weighted by the
//! barycentric coordinates.
//!
//! ## Design notes
//!
//! * **Sequential slot assignment**: Slots are created in point order, then
//!   corner order, so slot numbering is reproducible run to run.
//! * **Homogeneous weight**: Each vertex record ends with an accumulator of
//!   the splatted weight; slicing divides by it after blurring.
//! * **Pure accumulation**: Shared vertices add contributions; nothing is
//!   normalized here.
//!
//! ## Invariants
//!
//! * The number of slots created never exceeds `N * (d + 1)`.
//! * Splatting into records of stride `M + 1` touches only the slots of the
//!   membership it is given.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::{EmbeddedPoints, Membership};
use crate::primitives::hash::LatticeHashIndex;

// ============================================================================
// Slot Assignment
// ============================================================================

/// Insert every corner key into the index and record the resulting slots.
pub fn assign_slots<T: Float>(
    embedded: &EmbeddedPoints<T>,
    index: &mut LatticeHashIndex,
) -> Membership<T> {
    let corners = embedded.key_size;
    let mut membership = Membership::with_capacity(corners, embedded.len());

    for point in 0..embedded.len() {
        for corner in 0..corners {
            membership
                .slots
                .push(Some(index.slot_for(embedded.key(point, corner))));
        }
        membership
            .weights
            .extend_from_slice(embedded.point_weights(point));
    }

    membership
}

/// Resolve corner keys against an existing index without inserting.
///
/// Corners outside the lattice resolve to `None`.
pub fn resolve_slots<T: Float>(
    embedded: &EmbeddedPoints<T>,
    index: &LatticeHashIndex,
) -> Membership<T> {
    let corners = embedded.key_size;
    let mut membership = Membership::with_capacity(corners, embedded.len());

    for point in 0..embedded.len() {
        for corner in 0..corners {
            membership
                .slots
                .push(index.lookup(embedded.key(point, corner)));
        }
        membership
            .weights
            .extend_from_slice(embedded.point_weights(point));
    }

    membership
}

// ============================================================================
// Splat Pass
// ============================================================================

/// Accumulate `weight * value` and `weight` for one point.
#[inline]
pub fn splat_point<T: Float>(
    slots: &[Option<usize>],
    weights: &[T],
    value: &[T],
    records: &mut [T],
    stride: usize,
) {
    let value_dim = stride - 1;
    for (&slot, &w) in slots.iter().zip(weights) {
        let Some(slot) = slot else { continue };
        let record = &mut records[slot * stride..(slot + 1) * stride];
        for k in 0..value_dim {
            record[k] = record[k] + w * value[k];
        }
        record[value_dim] = record[value_dim] + w;
    }
}

/// Splat a row-major `N x M` value matrix through `membership`.
///
/// `records` must hold `stride = M + 1` elements per vertex and is expected
/// to be zeroed by the caller.
pub fn splat_pass<T: Float>(
    membership: &Membership<T>,
    values: &[T],
    records: &mut [T],
    stride: usize,
) {
    let value_dim = stride - 1;
    for (point, value) in values.chunks_exact(value_dim).enumerate() {
        let (slots, weights) = membership.point(point);
        splat_point(slots, weights, value, records, stride);
    }
}
