//! Parallel stage passes for permutohedral lattice filtering.
//!
//! ## Purpose
//!
//! This module provides the parallel embedding, blur, and slice passes that
//! are injected into the `permutohedral` crate's execution engine through its
//! stage hooks.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacements for the sequential passes.
//! * **Parallelism**: Uses `rayon` for data-parallel execution across CPU cores.
//! * **Optimization**: One `Embedder` per worker, reused across points.
//! * **Determinism**: Every point and vertex runs exactly the arithmetic of the
//!   sequential pass, so results are bit-identical.
//!
//! ## Key concepts
//!
//! * **Embedding**: Points are independent; keys and weights land in disjoint rows.
//! * **Blur**: Each axis pass reads the previous records and writes disjoint
//!   destination records.
//! * **Slice**: Query points are independent; degenerate indices are collected
//!   in point order.
//!
//! ## Non-goals
//!
//! * Slot assignment and splatting stay sequential in the core engine.
//! * This module does not validate input data.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from permutohedral crate
use permutohedral::internals::algorithms::blur::{BlurNeighbors, blur_vertex};
use permutohedral::internals::algorithms::embedding::Embedder;
use permutohedral::internals::algorithms::slice::slice_point;
use permutohedral::internals::math::stencil::BoundaryPolicy;
use permutohedral::internals::primitives::buffer::{EmbeddedPoints, Membership};
use permutohedral::internals::primitives::errors::LatticeError;

// ============================================================================
// Parallel Embedding
// ============================================================================

/// Embed every row of a row-major `N x d` feature matrix in parallel.
#[cfg(feature = "cpu")]
pub fn embed_pass_parallel<T>(
    features: &[T],
    d: usize,
    with_blur: bool,
    out: &mut EmbeddedPoints<T>,
) -> Result<(), LatticeError>
where
    T: Float + Send + Sync,
{
    let key_size = out.key_size;
    let key_block = key_size * key_size;

    features
        .par_chunks_exact(d)
        .zip(out.keys.par_chunks_exact_mut(key_block))
        .zip(out.weights.par_chunks_exact_mut(key_size))
        .try_for_each_init(
            || Embedder::new(d, with_blur),
            |embedder, ((feature, keys), weights)| embedder.embed(feature, keys, weights),
        )
}

// ============================================================================
// Parallel Blur
// ============================================================================

/// Blur every vertex along `axis` in parallel.
#[cfg(feature = "cpu")]
pub fn blur_axis_parallel<T>(
    neighbors: &BlurNeighbors,
    axis: usize,
    src: &[T],
    dst: &mut [T],
    stride: usize,
    boundary: BoundaryPolicy,
) where
    T: Float + Send + Sync,
{
    dst.par_chunks_exact_mut(stride)
        .zip(neighbors.axis(axis).par_iter())
        .enumerate()
        .for_each(|(vertex, (out, pair))| {
            blur_vertex(*pair, vertex, src, out, stride, boundary);
        });
}

// ============================================================================
// Parallel Slice
// ============================================================================

/// Slice every point of `membership` in parallel.
///
/// Returns the indices of degenerate points in ascending order.
#[cfg(feature = "cpu")]
pub fn slice_pass_parallel<T>(
    membership: &Membership<T>,
    records: &[T],
    stride: usize,
    out: &mut [T],
) -> Vec<usize>
where
    T: Float + Send + Sync,
{
    out.par_chunks_exact_mut(stride - 1)
        .enumerate()
        .filter_map(|(point, row)| {
            let (slots, weights) = membership.point(point);
            (!slice_point(slots, weights, records, stride, row)).then_some(point)
        })
        .collect()
}
