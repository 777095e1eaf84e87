//! High-level API for permutohedral lattice filtering.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: a fluent builder that
//! validates the lattice configuration, the `create_lattice` shortcut, and
//! the `PermutohedralLattice` session that owns one lattice at a time.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all policies.
//! * **Deferred validation**: Misconfiguration is reported by `build()`.
//! * **Session state**: `init_with_values` builds a lattice; `apply` and
//!   `compute` reuse it until the next initialization replaces it.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PermutohedralBuilder`] via `Permutohedral::new()`.
//! 2. Chain configuration methods (`.value_dim()`, `.feature_dim()`, etc.).
//! 3. Call `.build()` to get a [`PermutohedralLattice`].
//! 4. Call `init_with_values`, then `apply`/`compute` as often as needed.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{
    BlurPassFn, EmbedPassFn, LatticeConfig, LatticeExecutor, LatticeState, SlicePassFn,
};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::slice::ZeroWeightFallback;
pub use crate::engine::output::{ApplyStats, FilterResult};
pub use crate::math::stencil::{BlurOrder, BoundaryPolicy};
pub use crate::primitives::errors::LatticeError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a permutohedral lattice.
#[derive(Debug, Clone)]
pub struct PermutohedralBuilder<T> {
    /// Declared number of initialization points (N).
    pub num_points: Option<usize>,

    /// Value channels per point (M).
    pub value_dim: Option<usize>,

    /// Feature dimension (d).
    pub feature_dim: Option<usize>,

    /// Whether to blur by default (default: true).
    pub blur: Option<bool>,

    /// Handling of missing blur neighbours (default: Zero).
    pub boundary_policy: Option<BoundaryPolicy>,

    /// Axis order for the blur in `init_with_values` (default: Forward).
    pub blur_order: Option<BlurOrder>,

    /// Handling of zero-weight slices (default: ReturnZero).
    pub zero_weight_fallback: Option<ZeroWeightFallback>,

    // ======================================
    // DEV
    // ======================================
    /// Custom embedding pass function.
    #[doc(hidden)]
    pub custom_embed_pass: Option<EmbedPassFn<T>>,

    /// Custom blur pass function.
    #[doc(hidden)]
    pub custom_blur_pass: Option<BlurPassFn<T>>,

    /// Custom slice pass function.
    #[doc(hidden)]
    pub custom_slice_pass: Option<SlicePassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for PermutohedralBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PermutohedralBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            num_points: None,
            value_dim: None,
            feature_dim: None,
            blur: None,
            boundary_policy: None,
            blur_order: None,
            zero_weight_fallback: None,
            custom_embed_pass: None,
            custom_blur_pass: None,
            custom_slice_pass: None,
            duplicate_param: None,
        }
    }

    /// Declare the number of points `init_with_values` will receive.
    pub fn num_points(mut self, n: usize) -> Self {
        if self.num_points.is_some() {
            self.duplicate_param = Some("num_points");
        }
        self.num_points = Some(n);
        self
    }

    /// Set the number of value channels per point.
    pub fn value_dim(mut self, m: usize) -> Self {
        if self.value_dim.is_some() {
            self.duplicate_param = Some("value_dim");
        }
        self.value_dim = Some(m);
        self
    }

    /// Set the feature dimension.
    pub fn feature_dim(mut self, d: usize) -> Self {
        if self.feature_dim.is_some() {
            self.duplicate_param = Some("feature_dim");
        }
        self.feature_dim = Some(d);
        self
    }

    /// Enable or disable the blur stage.
    pub fn blur(mut self, enable: bool) -> Self {
        if self.blur.is_some() {
            self.duplicate_param = Some("blur");
        }
        self.blur = Some(enable);
        self
    }

    /// Set the handling of missing blur neighbours.
    pub fn boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        if self.boundary_policy.is_some() {
            self.duplicate_param = Some("boundary_policy");
        }
        self.boundary_policy = Some(policy);
        self
    }

    /// Set the axis order of the blur run by `init_with_values`.
    pub fn blur_order(mut self, order: BlurOrder) -> Self {
        if self.blur_order.is_some() {
            self.duplicate_param = Some("blur_order");
        }
        self.blur_order = Some(order);
        self
    }

    /// Set behavior for points whose accumulated weight is zero.
    pub fn zero_weight_fallback(mut self, policy: ZeroWeightFallback) -> Self {
        if self.zero_weight_fallback.is_some() {
            self.duplicate_param = Some("zero_weight_fallback");
        }
        self.zero_weight_fallback = Some(policy);
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set a custom embedding pass function.
    #[doc(hidden)]
    pub fn custom_embed_pass(mut self, pass: EmbedPassFn<T>) -> Self {
        self.custom_embed_pass = Some(pass);
        self
    }

    /// Set a custom blur pass function.
    #[doc(hidden)]
    pub fn custom_blur_pass(mut self, pass: BlurPassFn<T>) -> Self {
        self.custom_blur_pass = Some(pass);
        self
    }

    /// Set a custom slice pass function.
    #[doc(hidden)]
    pub fn custom_slice_pass(mut self, pass: SlicePassFn<T>) -> Self {
        self.custom_slice_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validate the configuration and create an uninitialized lattice.
    pub fn build(self) -> Result<PermutohedralLattice<T>, LatticeError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let value_dim = self.value_dim.unwrap_or(0);
        let feature_dim = self.feature_dim.unwrap_or(0);
        Validator::validate_dimension("value_dim", value_dim)?;
        Validator::validate_dimension("feature_dim", feature_dim)?;

        if self.num_points == Some(0) {
            return Err(LatticeError::EmptyInput);
        }

        let config = LatticeConfig {
            num_points: self.num_points,
            value_dim,
            feature_dim,
            with_blur: self.blur.unwrap_or(true),
            boundary_policy: self.boundary_policy.unwrap_or_default(),
            blur_order: self.blur_order.unwrap_or_default(),
            zero_weight_fallback: self.zero_weight_fallback.unwrap_or_default(),
            custom_embed_pass: self.custom_embed_pass,
            custom_blur_pass: self.custom_blur_pass,
            custom_slice_pass: self.custom_slice_pass,
        };

        Ok(PermutohedralLattice {
            with_blur: config.with_blur,
            executor: LatticeExecutor::from_config(&config),
            state: None,
        })
    }
}

/// Create a lattice for `num_points` points with `value_dim` channels and
/// `feature_dim`-dimensional features.
pub fn create_lattice<T: Float>(
    num_points: usize,
    value_dim: usize,
    feature_dim: usize,
    enable_blur: bool,
) -> Result<PermutohedralLattice<T>, LatticeError> {
    PermutohedralBuilder::new()
        .num_points(num_points)
        .value_dim(value_dim)
        .feature_dim(feature_dim)
        .blur(enable_blur)
        .build()
}

// ============================================================================
// Session
// ============================================================================

/// One permutohedral lattice and the geometry of its last initialization.
#[derive(Debug, Clone)]
pub struct PermutohedralLattice<T> {
    /// Stage orchestrator with the validated configuration.
    executor: LatticeExecutor<T>,

    /// Blur flag of the current (or next) lattice.
    with_blur: bool,

    /// Retained state, `None` until `init_with_values` succeeds.
    state: Option<LatticeState<T>>,
}

impl<T: Float> PermutohedralLattice<T> {
    /// Build the lattice from `features` (N x d) and filter `values` (N x M).
    ///
    /// Replaces any previous lattice of this session. `enable_blur` governs
    /// this lattice and every later `apply`/`compute` on it.
    pub fn init_with_values(
        &mut self,
        features: &[T],
        values: &[T],
        enable_blur: bool,
    ) -> Result<FilterResult<T>, LatticeError> {
        let config = self.executor.config();
        if features.is_empty() {
            return Err(LatticeError::EmptyInput);
        }
        let n = Validator::validate_features(features, config.feature_dim, config.num_points)?;
        Validator::validate_values(values, config.value_dim, n)?;

        let (state, output) = self.executor.build(features, values, n, enable_blur)?;
        let lattice_size = state.lattice_size();
        self.state = Some(state);
        self.with_blur = enable_blur;

        Ok(self.result(output.values, n, lattice_size, output.degenerate_points))
    }

    /// Slice the query `features` (Q x d) against the lattice into `out` (Q x M).
    ///
    /// Query vertices are looked up, never created.
    pub fn apply(&self, out: &mut [T], features: &[T]) -> Result<ApplyStats, LatticeError> {
        let state = self.state.as_ref().ok_or(LatticeError::UninitializedLattice)?;
        let config = self.executor.config();

        let q = Validator::validate_features(features, config.feature_dim, None)?;
        Validator::validate_output(out, config.value_dim, q)?;

        let degenerate_points = self.executor.query(state, features, q, out)?;
        Ok(ApplyStats {
            num_points: q,
            degenerate_points,
        })
    }

    /// Filter new `values` (N x M) over the geometry of the last initialization.
    ///
    /// The retained lattice is left untouched.
    pub fn compute(&self, values: &[T], order: BlurOrder) -> Result<FilterResult<T>, LatticeError> {
        let state = self.state.as_ref().ok_or(LatticeError::UninitializedLattice)?;
        if values.is_empty() {
            return Err(LatticeError::EmptyInput);
        }
        let n = state.num_points();
        Validator::validate_values(values, self.executor.config().value_dim, n)?;

        let output = self.executor.refilter(state, values, order)?;
        Ok(self.result(output.values, n, state.lattice_size(), output.degenerate_points))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of lattice vertices (0 before initialization).
    pub fn lattice_size(&self) -> usize {
        self.state.as_ref().map_or(0, LatticeState::lattice_size)
    }

    /// Whether `init_with_values` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Points of the current lattice, or the declared count before initialization.
    pub fn num_points(&self) -> Option<usize> {
        self.state
            .as_ref()
            .map(LatticeState::num_points)
            .or(self.executor.config().num_points)
    }

    /// Value channels per point.
    pub fn value_dim(&self) -> usize {
        self.executor.config().value_dim
    }

    /// Feature dimension.
    pub fn feature_dim(&self) -> usize {
        self.executor.config().feature_dim
    }

    /// Whether the current (or next) lattice is blurred.
    pub fn blur_enabled(&self) -> bool {
        self.with_blur
    }

    fn result(
        &self,
        values: Vec<T>,
        num_points: usize,
        lattice_size: usize,
        degenerate_points: usize,
    ) -> FilterResult<T> {
        FilterResult {
            values,
            num_points,
            value_dim: self.value_dim(),
            feature_dim: self.feature_dim(),
            lattice_size,
            blurred: self.with_blur,
            degenerate_points,
        }
    }
}
