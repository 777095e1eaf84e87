//! Input abstractions for lattice filtering.
//!
//! ## Purpose
//!
//! This module lets the `fit`, `apply`, and `compute` methods accept several
//! matrix formats (slices, vectors, ndarray arrays) through one trait.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Provides direct slice access to the underlying buffers.
//! * **Row-major only**: ndarray inputs must be in standard (C) layout so that
//!   the flat slice holds one row per point.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected before processing.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the input container.
//! * A 2-D array reports its column count so it can be checked against the
//!   configured dimension.
//!
//! ## Non-goals
//!
//! * This module does not transpose or copy data into a new layout.

// External dependencies
use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Float;

// Export dependencies from permutohedral crate
use permutohedral::internals::primitives::errors::LatticeError;

/// Trait for types that can be used as a row-major lattice matrix.
pub trait LatticeInput<T: Float> {
    /// Convert the input to a contiguous row-major slice.
    fn as_lattice_slice(&self) -> Result<&[T], LatticeError>;

    /// Number of columns, when the container knows its shape.
    fn columns(&self) -> Option<usize> {
        None
    }
}

impl<T: Float> LatticeInput<T> for [T] {
    fn as_lattice_slice(&self) -> Result<&[T], LatticeError> {
        Ok(self)
    }
}

impl<T: Float> LatticeInput<T> for Vec<T> {
    fn as_lattice_slice(&self) -> Result<&[T], LatticeError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S, D> LatticeInput<T> for ArrayBase<S, D>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    fn as_lattice_slice(&self) -> Result<&[T], LatticeError> {
        self.as_slice().ok_or_else(|| {
            LatticeError::InvalidInput(
                "ndarray input must be contiguous in standard (row-major) layout".to_string(),
            )
        })
    }

    fn columns(&self) -> Option<usize> {
        match self.shape() {
            [_, cols] => Some(*cols),
            _ => None,
        }
    }
}

/// Borrow `input` as a row-major matrix of `cols` columns.
///
/// Only the column count is checked here; row counts are validated by the
/// core engine.
pub fn as_matrix<'a, T, I>(
    input: &'a I,
    cols: usize,
    matrix: &'static str,
) -> Result<&'a [T], LatticeError>
where
    T: Float,
    I: LatticeInput<T> + ?Sized,
{
    if let Some(got) = input.columns() {
        if got != cols {
            return Err(LatticeError::DimensionMismatch {
                matrix,
                expected: cols,
                got,
            });
        }
    }
    input.as_lattice_slice()
}
