//! Slicing of vertex records back to query points.
//!
//! ## Purpose
//!
//! This module interpolates the (blurred) vertex records at each query point
//! with the barycentric weights of its simplex and divides by the
//! interpolated homogeneous weight, which corrects for uneven sampling
//! density in feature space.
//!
//! ## Design notes
//!
//! * **Normalization**: `out = sum(w_i * value_i) / sum(w_i * weight_i)`.
//! * **Absent corners**: Corners without a slot contribute nothing.
//! * **Degenerate points**: A zero denominator yields an all-zero row here;
//!   the engine then applies the configured `ZeroWeightFallback`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::Membership;

// ============================================================================
// Zero-Weight Fallback Policy
// ============================================================================

/// Policy for query points whose accumulated weight is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroWeightFallback {
    /// Output an all-zero row (default).
    #[default]
    ReturnZero,

    /// Output the point's own input value when one exists.
    ReturnOriginal,

    /// Fail with `LatticeError::DegenerateNormalization`.
    Fail,
}

// ============================================================================
// Slice Pass
// ============================================================================

/// Slice one point into `out`; returns `false` when its weight is zero.
#[inline]
pub fn slice_point<T: Float>(
    slots: &[Option<usize>],
    weights: &[T],
    records: &[T],
    stride: usize,
    out: &mut [T],
) -> bool {
    let value_dim = stride - 1;
    out.fill(T::zero());
    let mut norm = T::zero();

    for (&slot, &w) in slots.iter().zip(weights) {
        let Some(slot) = slot else { continue };
        let record = &records[slot * stride..(slot + 1) * stride];
        for k in 0..value_dim {
            out[k] = out[k] + w * record[k];
        }
        norm = norm + w * record[value_dim];
    }

    if norm > T::zero() {
        for v in out.iter_mut() {
            *v = *v / norm;
        }
        true
    } else {
        out.fill(T::zero());
        false
    }
}

/// Slice every point of `membership` into the row-major `out` matrix.
///
/// Returns the indices of degenerate points in ascending order.
pub fn slice_pass<T: Float>(
    membership: &Membership<T>,
    records: &[T],
    stride: usize,
    out: &mut [T],
) -> Vec<usize> {
    let mut degenerate = Vec::new();
    for (point, row) in out.chunks_exact_mut(stride - 1).enumerate() {
        let (slots, weights) = membership.point(point);
        if !slice_point(slots, weights, records, stride, row) {
            degenerate.push(point);
        }
    }
    degenerate
}
