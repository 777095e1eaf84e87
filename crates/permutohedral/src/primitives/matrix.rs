//! Row-major matrix views over flat slices.
//!
//! Every matrix crossing the crate boundary is a flat slice holding one row
//! per point: features are `N x d`, values and outputs are `N x M`. This is
//! the only orientation the crate understands; nothing is transposed.

// Internal dependencies
use crate::primitives::errors::LatticeError;

/// Borrowed row-major matrix with a fixed column count.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    cols: usize,
}

impl<'a, T> MatrixView<'a, T> {
    /// Wrap `data` as rows of `cols` elements.
    ///
    /// Fails with `DimensionMismatch` when the length is not a whole number of rows.
    pub fn new(data: &'a [T], cols: usize, matrix: &'static str) -> Result<Self, LatticeError> {
        if cols == 0 || data.len() % cols != 0 {
            return Err(LatticeError::DimensionMismatch {
                matrix,
                expected: cols * (data.len() / cols.max(1) + 1),
                got: data.len(),
            });
        }
        Ok(Self { data, cols })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len() / self.cols
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
}
