//! Error types for permutohedral lattice operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while building a
//! lattice, filtering values over it, or querying it with new points.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending sizes or point index.
//! * **Deferred**: Builder misconfiguration is stored and reported by `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Shape validation**: Feature, value, and output matrices must agree with N/M/d.
//! 2. **Numeric validation**: Non-finite inputs and out-of-range lattice coordinates.
//! 3. **Session state**: Querying a lattice that was never initialized.
//! 4. **Normalization**: Slices whose accumulated weight is zero, when asked to fail.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * Hash growth and vertex creation are internal and never surface as errors.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for permutohedral lattice operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// No points were supplied.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// A dimension parameter is zero or was never configured.
    InvalidDimension {
        /// Name of the parameter (`value_dim`, `feature_dim`).
        parameter: &'static str,
        /// The value provided (0 when unset).
        got: usize,
    },

    /// A matrix does not have the shape declared for the lattice.
    DimensionMismatch {
        /// Which matrix or axis disagrees (e.g. "features", "values", "points").
        matrix: &'static str,
        /// Expected number of elements (or columns).
        expected: usize,
        /// Number of elements (or columns) received.
        got: usize,
    },

    /// Input data contains NaN or infinite values, or a lattice coordinate overflowed.
    InvalidNumericValue(String),

    /// `apply` or `compute` was called before `init_with_values`.
    UninitializedLattice,

    /// A sliced point accumulated zero weight and the fallback policy is `Fail`.
    DegenerateNormalization {
        /// Row index of the query point.
        point: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for LatticeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input matrices are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::InvalidDimension { parameter, got } => {
                write!(f, "Invalid {parameter}: {got} (must be at least 1)")
            }
            Self::DimensionMismatch {
                matrix,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {matrix}: expected {expected}, got {got}"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::UninitializedLattice => {
                write!(f, "Lattice has not been initialized; call init_with_values first")
            }
            Self::DegenerateNormalization { point } => {
                write!(
                    f,
                    "Zero accumulated weight while slicing point {point}; it touches no populated lattice vertex"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for LatticeError {}
