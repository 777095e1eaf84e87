//! Input validation for lattice configuration and matrices.
//!
//! ## Purpose
//!
//! This module checks matrix shapes against the declared N/M/d of a lattice
//! and rejects non-finite inputs before any stage runs.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Shape checks run before the linear finiteness scan.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * A matrix that passes validation holds a whole number of rows of the
//!   expected width, and the expected number of rows when one was declared.
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transpose, copy, or repair input data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::LatticeError;
use crate::primitives::matrix::MatrixView;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for lattice configuration and input matrices.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a dimension parameter (`value_dim`, `feature_dim`).
    pub fn validate_dimension(parameter: &'static str, value: usize) -> Result<(), LatticeError> {
        if value == 0 {
            return Err(LatticeError::InvalidDimension {
                parameter,
                got: value,
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), LatticeError> {
        if let Some(param) = duplicate_param {
            return Err(LatticeError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Matrix Validation
    // ========================================================================

    /// Validate a row-major `N x d` feature matrix and return its row count.
    ///
    /// When `expected_points` is set, the row count must match it.
    pub fn validate_features<T: Float>(
        features: &[T],
        d: usize,
        expected_points: Option<usize>,
    ) -> Result<usize, LatticeError> {
        let view = MatrixView::new(features, d, "features")?;
        if let Some(n) = expected_points {
            if view.rows() != n {
                return Err(LatticeError::DimensionMismatch {
                    matrix: "features",
                    expected: n * d,
                    got: features.len(),
                });
            }
        }
        Self::validate_finite(features, view.cols(), "features")?;
        Ok(view.rows())
    }

    /// Validate a row-major `N x M` value matrix for `n` points.
    pub fn validate_values<T: Float>(
        values: &[T],
        m: usize,
        n: usize,
    ) -> Result<(), LatticeError> {
        if values.len() != n * m {
            return Err(LatticeError::DimensionMismatch {
                matrix: "values",
                expected: n * m,
                got: values.len(),
            });
        }
        Self::validate_finite(values, m, "values")
    }

    /// Validate an output buffer for `n` rows of width `m`.
    pub fn validate_output<T>(out: &[T], m: usize, n: usize) -> Result<(), LatticeError> {
        if out.len() != n * m {
            return Err(LatticeError::DimensionMismatch {
                matrix: "output",
                expected: n * m,
                got: out.len(),
            });
        }
        Ok(())
    }

    /// Validate that every element is finite, reporting `name[row][col]`.
    pub fn validate_finite<T: Float>(
        data: &[T],
        cols: usize,
        name: &str,
    ) -> Result<(), LatticeError> {
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(LatticeError::InvalidNumericValue(format!(
                "{}[{}][{}]={}",
                name,
                i / cols.max(1),
                i % cols.max(1),
                data[i].to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }
}
