//! Blur stencil and blur policies.
//!
//! ## Purpose
//!
//! This module defines the 1-D stencil applied along each lattice axis and
//! the policies that control how the blur stage treats absent neighbours and
//! in which order it visits the axes.
//!
//! ## Key concepts
//!
//! * **Stencil**: `[1, 2, 1] / 4`, i.e. `0.25 * left + 0.5 * self + 0.25 * right`.
//! * **Boundary**: A neighbour key that no point ever touched has no slot.
//!   `Zero` treats it as an all-zero record (lattice zero padding);
//!   `Replicate` substitutes the centre vertex's own record.
//! * **Order**: Axes run `0..=d` (`Forward`) or `d..=0` (`Reverse`).
//!
//! ## Invariants
//!
//! * Stencil taps are non-negative and sum to one.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::scaling::constant;

// ============================================================================
// Stencil
// ============================================================================

/// Taps of the separable lattice blur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurStencil<T> {
    /// Weight of each axis neighbour.
    pub side: T,

    /// Weight of the centre vertex.
    pub center: T,
}

impl<T: Float> Default for BlurStencil<T> {
    fn default() -> Self {
        Self {
            side: constant(0.25),
            center: constant(0.5),
        }
    }
}

impl<T: Float> BlurStencil<T> {
    /// Combine the centre value with its two neighbours.
    #[inline]
    pub fn apply(&self, left: T, center: T, right: T) -> T {
        self.side * left + self.center * center + self.side * right
    }
}

// ============================================================================
// Boundary Policy
// ============================================================================

/// Treatment of axis neighbours that are not lattice vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Absent neighbours contribute nothing (zero padding).
    #[default]
    Zero,

    /// Absent neighbours take the centre vertex's record.
    Replicate,
}

// ============================================================================
// Blur Order
// ============================================================================

/// Order in which the d + 1 lattice axes are blurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurOrder {
    /// Axis 0 first.
    #[default]
    Forward,

    /// Axis d first.
    Reverse,
}

impl BlurOrder {
    /// The axis visited at step `step` of `axes` steps.
    #[inline]
    pub fn axis(self, step: usize, axes: usize) -> usize {
        match self {
            BlurOrder::Forward => step,
            BlurOrder::Reverse => axes - 1 - step,
        }
    }
}
