//! Canonical simplex of the permutohedral lattice.
//!
//! Row `r` holds the offset of simplex corner `r` (the "remainder-r" vertex)
//! for each rank: `r` for ranks `0..=d-r`, and `r - (d + 1)` for the rest.
//! Every row sums to zero, so adding a row to a zero-sum base point keeps the
//! zero-sum constraint exact.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// `(d + 1) x (d + 1)` table of canonical corner offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSimplex {
    size: usize,
    offsets: Vec<i32>,
}

impl CanonicalSimplex {
    /// Build the table for feature dimension `d`.
    pub fn new(d: usize) -> Self {
        let size = d + 1;
        let mut offsets = Vec::with_capacity(size * size);
        for r in 0..size {
            let r_i = r as i32;
            for rank in 0..size {
                offsets.push(if rank <= d - r {
                    r_i
                } else {
                    r_i - size as i32
                });
            }
        }
        Self { size, offsets }
    }

    /// Offset of corner `remainder` for a coordinate of rank `rank`.
    #[inline]
    pub fn offset(&self, remainder: usize, rank: usize) -> i32 {
        self.offsets[remainder * self.size + rank]
    }

    /// Corners per simplex, `d + 1`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_sum_to_zero() {
        for d in 1..8 {
            let c = CanonicalSimplex::new(d);
            assert_eq!(c.size(), d + 1);
            for r in 0..=d {
                let sum: i32 = (0..=d).map(|k| c.offset(r, k)).sum();
                assert_eq!(sum, 0, "d={d} r={r}");
            }
        }
    }

    #[test]
    fn matches_two_dimensional_table() {
        let c = CanonicalSimplex::new(2);
        let rows: Vec<Vec<i32>> = (0..3)
            .map(|r| (0..3).map(|k| c.offset(r, k)).collect())
            .collect();
        assert_eq!(rows, vec![vec![0, 0, 0], vec![1, 1, -2], vec![2, -1, -1]]);
    }
}
