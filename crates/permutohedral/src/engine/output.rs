//! Output types for lattice filtering.
//!
//! ## Purpose
//!
//! This module defines `FilterResult`, the filtered matrix returned by
//! `init_with_values` and `compute`, and `ApplyStats`, the summary returned
//! by `apply` (which writes into a caller-supplied buffer).
//!
//! ## Design notes
//!
//! * **Row-major**: `values` holds one row of `value_dim` channels per point.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `values.len() == num_points * value_dim`.
//! * `degenerate_points <= num_points`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Result Structure
// ============================================================================

/// Filtered values together with lattice metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<T> {
    /// Filtered values, row-major `num_points x value_dim`.
    pub values: Vec<T>,

    /// Number of points (rows).
    pub num_points: usize,

    /// Value channels per point (columns).
    pub value_dim: usize,

    /// Feature dimension of the lattice.
    pub feature_dim: usize,

    /// Number of lattice vertices.
    pub lattice_size: usize,

    /// Whether the blur stage ran.
    pub blurred: bool,

    /// Points whose accumulated weight was zero.
    pub degenerate_points: usize,
}

impl<T: Float> FilterResult<T> {
    /// Filtered row of point `i`.
    pub fn row(&self, i: usize) -> &[T] {
        &self.values[i * self.value_dim..(i + 1) * self.value_dim]
    }

    /// Iterate over the filtered rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks_exact(self.value_dim.max(1))
    }

    /// Average number of points per lattice vertex.
    pub fn points_per_vertex(&self) -> Option<f64> {
        if self.lattice_size == 0 {
            None
        } else {
            Some(self.num_points as f64 / self.lattice_size as f64)
        }
    }
}

/// Summary of an `apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyStats {
    /// Number of query points sliced.
    pub num_points: usize,

    /// Query points whose simplex touched no populated vertex.
    pub degenerate_points: usize,
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for FilterResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Points:        {}", self.num_points)?;
        writeln!(f, "  Value dim:     {}", self.value_dim)?;
        writeln!(f, "  Feature dim:   {}", self.feature_dim)?;
        writeln!(f, "  Lattice size:  {}", self.lattice_size)?;
        writeln!(
            f,
            "  Blur:          {}",
            if self.blurred { "Applied" } else { "Skipped" }
        )?;
        if self.degenerate_points > 0 {
            writeln!(f, "  Degenerate:    {}", self.degenerate_points)?;
        }
        writeln!(f)?;

        writeln!(f, "Filtered Values:")?;
        write!(f, "{:>8}", "Point")?;
        for k in 0..self.value_dim {
            write!(f, " {:>12}", format!("V{}", k))?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<width$}", "", width = 8 + 13 * self.value_dim)?;

        // Show first 10 and last 10 rows if more than 20 points
        let n = self.num_points;
        let show_all = n <= 20;
        let rows_to_show: Vec<usize> = if show_all {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8}", idx)?;
            for v in self.row(idx) {
                write!(f, " {:>12.6}", v)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
