//! Separable blur along the d + 1 lattice axes.
//!
//! ## Purpose
//!
//! This module convolves the vertex records with the `[1, 2, 1] / 4` stencil
//! along each axis of the permutohedral lattice. One pass per axis reads the
//! previous pass's records and writes fresh ones.
//!
//! ## Design notes
//!
//! * **Precomputed neighbours**: Axis neighbours are found once per lattice
//!   with read-only lookups and stored as optional slots.
//! * **Double buffering**: Every vertex in a pass sees the same prior values.
//! * **Homogeneous weight**: The weight column is blurred with the values.
//!
//! ## Key concepts
//!
//! * **Axis neighbours**: Along axis `j`, the neighbours of key `k` are
//!   `k - 1` with `k[j] + d`, and `k + 1` with `k[j] - d`. Both preserve the
//!   zero-sum constraint.
//!
//! ## Invariants
//!
//! * Blurring never creates vertices.
//! * With `BoundaryPolicy::Zero` the total mass of a record column never grows.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::stencil::{BlurStencil, BoundaryPolicy};
use crate::primitives::hash::LatticeHashIndex;

// ============================================================================
// Neighbour Table
// ============================================================================

/// Axis neighbours of every vertex, indexed by `axis * vertices + vertex`.
#[derive(Debug, Clone)]
pub struct BlurNeighbors {
    /// Number of lattice axes, `d + 1`.
    axes: usize,

    /// Number of vertices when the table was built.
    vertices: usize,

    /// `(minus, plus)` neighbour slots.
    pairs: Vec<(Option<usize>, Option<usize>)>,
}

impl BlurNeighbors {
    /// Look up the two neighbours of every vertex along every axis.
    pub fn build(index: &LatticeHashIndex) -> Self {
        let axes = index.key_size();
        let vertices = index.len();
        let d = axes as i32 - 1;

        let mut pairs = Vec::with_capacity(axes * vertices);
        let mut minus = vec![0i32; axes];
        let mut plus = vec![0i32; axes];

        for axis in 0..axes {
            for vertex in 0..vertices {
                let key = index.key(vertex);
                for k in 0..axes {
                    minus[k] = key[k] - 1;
                    plus[k] = key[k] + 1;
                }
                minus[axis] = key[axis] + d;
                plus[axis] = key[axis] - d;

                pairs.push((index.lookup(&minus), index.lookup(&plus)));
            }
        }

        Self {
            axes,
            vertices,
            pairs,
        }
    }

    /// Number of lattice axes.
    #[inline]
    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Number of vertices covered.
    #[inline]
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Neighbours of `vertex` along `axis`.
    #[inline]
    pub fn get(&self, axis: usize, vertex: usize) -> (Option<usize>, Option<usize>) {
        self.pairs[axis * self.vertices + vertex]
    }

    /// Neighbour pairs of every vertex along `axis`.
    #[inline]
    pub fn axis(&self, axis: usize) -> &[(Option<usize>, Option<usize>)] {
        &self.pairs[axis * self.vertices..(axis + 1) * self.vertices]
    }
}

// ============================================================================
// Blur Pass
// ============================================================================

/// Blur one vertex record.
///
/// `src` holds all records of the previous pass; `dst` is the destination
/// record of `vertex`.
#[inline]
pub fn blur_vertex<T: Float>(
    neighbors: (Option<usize>, Option<usize>),
    vertex: usize,
    src: &[T],
    dst: &mut [T],
    stride: usize,
    boundary: BoundaryPolicy,
) {
    let stencil = BlurStencil::<T>::default();
    let center = &src[vertex * stride..(vertex + 1) * stride];
    let record = |slot: Option<usize>| match (slot, boundary) {
        (Some(s), _) => Some(&src[s * stride..(s + 1) * stride]),
        (None, BoundaryPolicy::Replicate) => Some(center),
        (None, BoundaryPolicy::Zero) => None,
    };
    let left = record(neighbors.0);
    let right = record(neighbors.1);

    for k in 0..stride {
        let l = left.map_or(T::zero(), |r| r[k]);
        let r = right.map_or(T::zero(), |r| r[k]);
        dst[k] = stencil.apply(l, center[k], r);
    }
}

/// Blur every vertex along `axis`, reading `src` and writing `dst`.
pub fn blur_axis<T: Float>(
    neighbors: &BlurNeighbors,
    axis: usize,
    src: &[T],
    dst: &mut [T],
    stride: usize,
    boundary: BoundaryPolicy,
) {
    for (vertex, (pair, out)) in neighbors
        .axis(axis)
        .iter()
        .zip(dst.chunks_exact_mut(stride))
        .enumerate()
    {
        blur_vertex(*pair, vertex, src, out, stride, boundary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_preserve_zero_sum() {
        let mut index = LatticeHashIndex::with_capacity(3, 4);
        index.slot_for(&[0, 0, 0]);
        index.slot_for(&[2, -1, -1]);
        index.slot_for(&[-1, 2, -1]);
        let table = BlurNeighbors::build(&index);

        // Axis 0 neighbours of the origin are [2, -1, -1] and [-2, 1, 1].
        assert_eq!(table.get(0, 0), (Some(1), None));
        // Axis 1 neighbours of the origin are [-1, 2, -1] and [1, -2, 1].
        assert_eq!(table.get(1, 0), (Some(2), None));
    }

    #[test]
    fn zero_padding_halves_an_isolated_vertex() {
        let mut index = LatticeHashIndex::with_capacity(2, 1);
        index.slot_for(&[0, 0]);
        let table = BlurNeighbors::build(&index);

        let src = [4.0, 2.0];
        let mut dst = [0.0; 2];
        blur_axis(&table, 0, &src, &mut dst, 2, BoundaryPolicy::Zero);
        assert_eq!(dst, [2.0, 1.0]);

        blur_axis(&table, 0, &src, &mut dst, 2, BoundaryPolicy::Replicate);
        assert_eq!(dst, [4.0, 2.0]);
    }
}
