//! Embedding scale factors for the permutohedral lattice.
//!
//! ## Purpose
//!
//! Features arrive in units of the Gaussian standard deviation. Before they
//! are elevated onto the lattice hyperplane, coordinate `i` is multiplied by
//! `inv_std_dev / sqrt((i + 1)(i + 2))`, the diagonal of the elevation matrix
//! (Adams et al. 2010, p. 5).
//!
//! ## Key concepts
//!
//! * **Blurred lattice**: `inv_std_dev = sqrt(2/3) * (d + 1)`. The `[1, 2, 1]`
//!   stencil applied on every axis supplies the remaining spread.
//! * **Unblurred lattice**: `inv_std_dev = sqrt(1/6) * (d + 1)`. Splat and
//!   slice alone act as a coarser tent filter.
//!
//! ## Invariants
//!
//! * Scale factors are strictly positive and decrease with the coordinate index.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

/// Convert an `f64` constant into `T`.
///
/// Every `Float` type represents the constants used here; the NaN fallback
/// only exists so the conversion is total.
#[inline]
pub fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Inverse standard deviation of the lattice filter for dimension `d`.
pub fn inv_std_dev<T: Float>(d: usize, with_blur: bool) -> T {
    let spread: f64 = if with_blur { 2.0 / 3.0 } else { 1.0 / 6.0 };
    constant::<T>(spread).sqrt() * constant::<T>((d + 1) as f64)
}

/// Per-coordinate scale factors applied before elevation.
pub fn scale_factors<T: Float>(d: usize, with_blur: bool) -> Vec<T> {
    let inv_std = inv_std_dev::<T>(d, with_blur);
    (0..d)
        .map(|i| {
            let denom = constant::<T>(((i + 1) * (i + 2)) as f64).sqrt();
            inv_std / denom
        })
        .collect()
}

/// Feature-space displacement along coordinate 0 that moves every point by
/// exactly one period of the lattice.
///
/// Coordinate 0 enters the elevated vector as `(c, -c, 0, ..)` with
/// `c = f0 * scale_0`; shifting `c` by `d + 1` maps the lattice onto itself.
pub fn lattice_period<T: Float>(d: usize, with_blur: bool) -> T {
    let scale0 = inv_std_dev::<T>(d, with_blur) / constant::<T>(2.0).sqrt();
    constant::<T>((d + 1) as f64) / scale0
}
