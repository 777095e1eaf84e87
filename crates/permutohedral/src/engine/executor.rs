//! Execution engine for permutohedral lattice filtering.
//!
//! ## Purpose
//!
//! This module orchestrates the stages of the filter: it embeds features,
//! assigns vertex slots, splats values, blurs along every lattice axis,
//! and slices the result back to the points. It also owns the state a
//! session retains between calls, so that `apply` and `compute` can reuse
//! the geometry of the last initialization.
//!
//! ## Design notes
//!
//! * Stages run strictly in sequence; each borrows the buffers it needs.
//! * Slot assignment and splatting are always sequential, so slot numbering
//!   and accumulation order are reproducible.
//! * Embed, blur, and slice passes can be replaced through hooks on the
//!   configuration (used by the parallel crate).
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * Inputs are validated before reaching the executor.
//! * `compute` never mutates the retained state.
//! * Query slicing never inserts vertices.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not handle parallel execution directly (handled by hooks).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use tracing::{debug, trace};

// Internal dependencies
use crate::algorithms::blur::{BlurNeighbors, blur_axis};
use crate::algorithms::embedding::embed_pass;
use crate::algorithms::slice::{ZeroWeightFallback, slice_pass};
use crate::algorithms::splat::{assign_slots, resolve_slots, splat_pass};
use crate::math::stencil::{BlurOrder, BoundaryPolicy};
use crate::primitives::buffer::{EmbeddedPoints, LatticeBuffer, Membership};
use crate::primitives::errors::LatticeError;
use crate::primitives::hash::LatticeHashIndex;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom embedding pass function.
#[doc(hidden)]
pub type EmbedPassFn<T> = fn(
    &[T],                   // features (row-major N x d)
    usize,                  // d
    bool,                   // with_blur (selects the scale)
    &mut EmbeddedPoints<T>, // output keys and weights
) -> Result<(), LatticeError>;

/// Signature for custom blur pass function (one axis).
#[doc(hidden)]
pub type BlurPassFn<T> = fn(
    &BlurNeighbors, // neighbour table
    usize,          // axis
    &[T],           // source records
    &mut [T],       // destination records
    usize,          // stride (value_dim + 1)
    BoundaryPolicy, // boundary handling
);

/// Signature for custom slice pass function.
#[doc(hidden)]
pub type SlicePassFn<T> = fn(
    &Membership<T>, // slots and weights per point
    &[T],           // vertex records
    usize,          // stride (value_dim + 1)
    &mut [T],       // output (row-major N x value_dim)
) -> Vec<usize>; // degenerate point indices

/// Output from lattice execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Filtered values, row-major.
    pub values: Vec<T>,

    /// Points whose accumulated weight was zero.
    pub degenerate_points: usize,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for lattice execution.
#[derive(Debug, Clone)]
pub struct LatticeConfig<T> {
    /// Declared number of points, if any.
    pub num_points: Option<usize>,

    /// Value channels per point (M).
    pub value_dim: usize,

    /// Feature dimension (d).
    pub feature_dim: usize,

    /// Whether to blur by default.
    pub with_blur: bool,

    /// Handling of missing blur neighbours.
    pub boundary_policy: BoundaryPolicy,

    /// Axis order used by `init_with_values`.
    pub blur_order: BlurOrder,

    /// Handling of zero-weight slices.
    pub zero_weight_fallback: ZeroWeightFallback,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom embedding pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_embed_pass: Option<EmbedPassFn<T>>,

    /// Custom blur pass function.
    #[doc(hidden)]
    pub custom_blur_pass: Option<BlurPassFn<T>>,

    /// Custom slice pass function.
    #[doc(hidden)]
    pub custom_slice_pass: Option<SlicePassFn<T>>,
}

impl<T: Float> Default for LatticeConfig<T> {
    fn default() -> Self {
        Self {
            num_points: None,
            value_dim: 0,
            feature_dim: 0,
            with_blur: true,
            boundary_policy: BoundaryPolicy::default(),
            blur_order: BlurOrder::default(),
            zero_weight_fallback: ZeroWeightFallback::default(),
            custom_embed_pass: None,
            custom_blur_pass: None,
            custom_slice_pass: None,
        }
    }
}

// ============================================================================
// Retained State
// ============================================================================

/// Geometry and filtered records retained after `init_with_values`.
#[derive(Debug, Clone)]
pub struct LatticeState<T> {
    /// Vertex keys and slots.
    pub index: LatticeHashIndex,

    /// Simplex of every initialization point.
    pub membership: Membership<T>,

    /// Axis neighbours (present only when blurred).
    pub neighbors: Option<BlurNeighbors>,

    /// Vertex records after the last initialization.
    pub buffer: LatticeBuffer<T>,

    /// Whether the lattice was built with the blur scale.
    pub with_blur: bool,
}

impl<T> LatticeState<T> {
    /// Number of lattice vertices.
    #[inline]
    pub fn lattice_size(&self) -> usize {
        self.index.len()
    }

    /// Number of initialization points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.membership.len()
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Stage orchestrator for one lattice configuration.
#[derive(Debug, Clone)]
pub struct LatticeExecutor<T> {
    config: LatticeConfig<T>,
}

impl<T: Float> LatticeExecutor<T> {
    /// Create an executor from a `LatticeConfig`.
    pub fn from_config(config: &LatticeConfig<T>) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &LatticeConfig<T> {
        &self.config
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Build a lattice from `n` points and filter their values.
    pub fn build(
        &self,
        features: &[T],
        values: &[T],
        n: usize,
        with_blur: bool,
    ) -> Result<(LatticeState<T>, ExecutorOutput<T>), LatticeError> {
        let d = self.config.feature_dim;
        let m = self.config.value_dim;

        let embedded = self.embed(features, n, with_blur)?;

        let mut index = LatticeHashIndex::with_capacity(d + 1, n * (d + 1));
        let membership = assign_slots(&embedded, &mut index);
        debug!(
            points = n,
            vertices = index.len(),
            capacity = index.capacity(),
            "lattice vertices created"
        );

        let neighbors = with_blur.then(|| BlurNeighbors::build(&index));

        let mut buffer = LatticeBuffer::default();
        buffer.prepare(index.len(), m);
        let stride = buffer.stride();
        splat_pass(&membership, values, buffer.current_mut(), stride);

        if let Some(neighbors) = &neighbors {
            self.blur(neighbors, &mut buffer, self.config.blur_order);
        }

        let mut out = vec![T::zero(); n * m];
        let degenerate = self.slice(&membership, &buffer, &mut out);
        self.resolve_degenerate(&degenerate, Some(values), &mut out)?;

        let state = LatticeState {
            index,
            membership,
            neighbors,
            buffer,
            with_blur,
        };
        let output = ExecutorOutput {
            values: out,
            degenerate_points: degenerate.len(),
        };
        Ok((state, output))
    }

    /// Filter new values over the retained geometry.
    pub fn refilter(
        &self,
        state: &LatticeState<T>,
        values: &[T],
        order: BlurOrder,
    ) -> Result<ExecutorOutput<T>, LatticeError> {
        let n = state.num_points();
        let m = self.config.value_dim;

        let mut buffer = LatticeBuffer::default();
        buffer.prepare(state.lattice_size(), m);
        let stride = buffer.stride();
        splat_pass(&state.membership, values, buffer.current_mut(), stride);

        if let Some(neighbors) = &state.neighbors {
            self.blur(neighbors, &mut buffer, order);
        }

        let mut out = vec![T::zero(); n * m];
        let degenerate = self.slice(&state.membership, &buffer, &mut out);
        self.resolve_degenerate(&degenerate, Some(values), &mut out)?;

        Ok(ExecutorOutput {
            values: out,
            degenerate_points: degenerate.len(),
        })
    }

    /// Slice `q` query points against the retained records into `out`.
    ///
    /// Returns the number of degenerate query points.
    pub fn query(
        &self,
        state: &LatticeState<T>,
        features: &[T],
        q: usize,
        out: &mut [T],
    ) -> Result<usize, LatticeError> {
        let embedded = self.embed(features, q, state.with_blur)?;
        let membership = resolve_slots(&embedded, &state.index);

        let degenerate = self.slice(&membership, &state.buffer, out);
        self.resolve_degenerate(&degenerate, None, out)?;
        Ok(degenerate.len())
    }

    // ========================================================================
    // Stages
    // ========================================================================

    /// Embed `n` feature rows.
    fn embed(
        &self,
        features: &[T],
        n: usize,
        with_blur: bool,
    ) -> Result<EmbeddedPoints<T>, LatticeError> {
        let d = self.config.feature_dim;
        let pass = self.config.custom_embed_pass.unwrap_or(embed_pass::<T>);

        let mut embedded = EmbeddedPoints::new(n, d);
        pass(features, d, with_blur, &mut embedded)?;
        trace!(points = n, feature_dim = d, with_blur, "points embedded");
        Ok(embedded)
    }

    /// Run one blur pass per axis, swapping buffers after each.
    fn blur(&self, neighbors: &BlurNeighbors, buffer: &mut LatticeBuffer<T>, order: BlurOrder) {
        let axes = neighbors.axes();
        let stride = buffer.stride();
        let pass = self.config.custom_blur_pass.unwrap_or(blur_axis::<T>);

        for step in 0..axes {
            let axis = order.axis(step, axes);
            let (src, dst) = buffer.split();
            pass(neighbors, axis, src, dst, stride, self.config.boundary_policy);
            buffer.swap();
            trace!(axis, "blur pass");
        }
        debug!(axes, vertices = neighbors.vertices(), ?order, "lattice blurred");
    }

    /// Slice through `membership`, returning degenerate point indices.
    fn slice(
        &self,
        membership: &Membership<T>,
        buffer: &LatticeBuffer<T>,
        out: &mut [T],
    ) -> Vec<usize> {
        let pass = self.config.custom_slice_pass.unwrap_or(slice_pass::<T>);
        pass(membership, buffer.current(), buffer.stride(), out)
    }

    /// Apply the zero-weight fallback to degenerate rows.
    fn resolve_degenerate(
        &self,
        degenerate: &[usize],
        original: Option<&[T]>,
        out: &mut [T],
    ) -> Result<(), LatticeError> {
        let Some(&first) = degenerate.first() else {
            return Ok(());
        };
        debug!(count = degenerate.len(), first, "degenerate slices");

        let m = self.config.value_dim;
        match self.config.zero_weight_fallback {
            ZeroWeightFallback::ReturnZero => {}
            ZeroWeightFallback::ReturnOriginal => {
                if let Some(values) = original {
                    for &p in degenerate {
                        out[p * m..(p + 1) * m].copy_from_slice(&values[p * m..(p + 1) * m]);
                    }
                }
            }
            ZeroWeightFallback::Fail => {
                return Err(LatticeError::DegenerateNormalization { point: first });
            }
        }
        Ok(())
    }
}
