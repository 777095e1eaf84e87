//! High-level API for lattice filtering with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point of `fastPermutohedral`.
//! It wraps the `permutohedral` builder and session, injects the parallel
//! stage passes, and accepts any [`LatticeInput`] (slices, vectors, ndarray).
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `permutohedral` builder pattern.
//! * **Parallel-First**: Parallel passes are enabled unless `.parallel(false)`.
//! * **Validated**: Configuration is validated by the base builder.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ParallelPermutohedralBuilder`] via `Permutohedral::new()`.
//! 2. Chain configuration methods (`.value_dim()`, `.feature_dim()`, etc.).
//! 3. Call `.build()`, then `fit`, `apply`, and `compute`.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{blur_axis_parallel, embed_pass_parallel, slice_pass_parallel};

// External dependencies
use num_traits::Float;
use tracing::debug;

// Export dependencies from permutohedral crate
use permutohedral::internals::api::{PermutohedralBuilder, PermutohedralLattice};

// Internal dependencies
use crate::input::{LatticeInput, as_matrix};

// Publicly re-exported types
pub use permutohedral::internals::api::{
    ApplyStats, BlurOrder, BoundaryPolicy, FilterResult, LatticeError, ZeroWeightFallback,
};

// ============================================================================
// Extended Builder
// ============================================================================

/// Builder for a lattice with optional parallel stage passes.
#[derive(Debug, Clone)]
pub struct ParallelPermutohedralBuilder<T> {
    /// Base builder from the permutohedral crate.
    pub base: PermutohedralBuilder<T>,

    /// Whether to run the parallel passes (default: true).
    pub parallel: Option<bool>,
}

impl<T: Float + Send + Sync> Default for ParallelPermutohedralBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Send + Sync> ParallelPermutohedralBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base: PermutohedralBuilder::new(),
            parallel: None,
        }
    }

    /// Enable or disable parallel execution.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.base.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Declare the number of points `fit` will receive.
    pub fn num_points(mut self, n: usize) -> Self {
        self.base = self.base.num_points(n);
        self
    }

    /// Set the number of value channels per point.
    pub fn value_dim(mut self, m: usize) -> Self {
        self.base = self.base.value_dim(m);
        self
    }

    /// Set the feature dimension.
    pub fn feature_dim(mut self, d: usize) -> Self {
        self.base = self.base.feature_dim(d);
        self
    }

    /// Enable or disable the blur stage.
    pub fn blur(mut self, enable: bool) -> Self {
        self.base = self.base.blur(enable);
        self
    }

    /// Set the handling of missing blur neighbours.
    pub fn boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.base = self.base.boundary_policy(policy);
        self
    }

    /// Set the axis order of the blur run by `fit`.
    pub fn blur_order(mut self, order: BlurOrder) -> Self {
        self.base = self.base.blur_order(order);
        self
    }

    /// Set behavior for points whose accumulated weight is zero.
    pub fn zero_weight_fallback(mut self, policy: ZeroWeightFallback) -> Self {
        self.base = self.base.zero_weight_fallback(policy);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and create an uninitialized lattice.
    pub fn build(self) -> Result<ParallelPermutohedral<T>, LatticeError> {
        let mut base = self.base;
        let parallel = self.parallel.unwrap_or(true);

        #[cfg(feature = "cpu")]
        {
            if parallel {
                base = base
                    .custom_embed_pass(embed_pass_parallel)
                    .custom_blur_pass(blur_axis_parallel)
                    .custom_slice_pass(slice_pass_parallel);
            } else {
                base.custom_embed_pass = None;
                base.custom_blur_pass = None;
                base.custom_slice_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            base.custom_embed_pass = None;
            base.custom_blur_pass = None;
            base.custom_slice_pass = None;
        }

        let lattice = base.build()?;
        debug!(parallel, "lattice configured");

        Ok(ParallelPermutohedral { lattice, parallel })
    }
}

// ============================================================================
// Extended Session
// ============================================================================

/// A permutohedral lattice whose stage passes may run in parallel.
#[derive(Debug, Clone)]
pub struct ParallelPermutohedral<T> {
    lattice: PermutohedralLattice<T>,
    parallel: bool,
}

impl<T: Float> ParallelPermutohedral<T> {
    /// Build the lattice from `features` (N x d) and filter `values` (N x M).
    pub fn fit<I1, I2>(
        &mut self,
        features: &I1,
        values: &I2,
        enable_blur: bool,
    ) -> Result<FilterResult<T>, LatticeError>
    where
        I1: LatticeInput<T> + ?Sized,
        I2: LatticeInput<T> + ?Sized,
    {
        let features = as_matrix(features, self.lattice.feature_dim(), "features")?;
        let values = as_matrix(values, self.lattice.value_dim(), "values")?;
        self.lattice.init_with_values(features, values, enable_blur)
    }

    /// Slice the query `features` (Q x d) against the lattice into `out` (Q x M).
    pub fn apply<I>(&self, out: &mut [T], features: &I) -> Result<ApplyStats, LatticeError>
    where
        I: LatticeInput<T> + ?Sized,
    {
        let features = as_matrix(features, self.lattice.feature_dim(), "features")?;
        self.lattice.apply(out, features)
    }

    /// Filter new `values` (N x M) over the geometry of the last `fit`.
    pub fn compute<I>(&self, values: &I, order: BlurOrder) -> Result<FilterResult<T>, LatticeError>
    where
        I: LatticeInput<T> + ?Sized,
    {
        let values = as_matrix(values, self.lattice.value_dim(), "values")?;
        self.lattice.compute(values, order)
    }

    /// Whether the parallel passes are in use.
    pub fn is_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "cpu")
    }

    /// The underlying sequential-API lattice.
    pub fn lattice(&self) -> &PermutohedralLattice<T> {
        &self.lattice
    }

    /// Number of lattice vertices (0 before the first `fit`).
    pub fn lattice_size(&self) -> usize {
        self.lattice.lattice_size()
    }

    /// Whether `fit` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.lattice.is_initialized()
    }
}
