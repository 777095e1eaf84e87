#![cfg(feature = "dev")]
//! Tests for lattice output structures.
//!
//! These tests verify the FilterResult structure and its methods:
//! - Row access (row, rows)
//! - Lattice occupancy (points_per_vertex)
//! - Display formatting
//!
//! ## Test Organization
//!
//! 1. **Row Access** - Row-major views of the filtered values
//! 2. **Occupancy** - Points per lattice vertex
//! 3. **Display** - Summary and table formatting

use approx::assert_relative_eq;

use permutohedral::internals::engine::output::FilterResult;

fn result(num_points: usize, value_dim: usize, lattice_size: usize) -> FilterResult<f64> {
    FilterResult {
        values: (0..num_points * value_dim).map(|i| i as f64 * 0.5).collect(),
        num_points,
        value_dim,
        feature_dim: 3,
        lattice_size,
        blurred: true,
        degenerate_points: 0,
    }
}

// ============================================================================
// Row Access
// ============================================================================

/// Test that rows are row-major slices of `value_dim` channels.
#[test]
fn test_rows() {
    let res = result(3, 2, 8);

    assert_eq!(res.row(0), &[0.0, 0.5]);
    assert_eq!(res.row(2), &[2.0, 2.5]);

    let rows: Vec<&[f64]> = res.rows().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], &[1.0, 1.5]);
}

/// Test that an empty result has no rows.
#[test]
fn test_rows_empty() {
    let res = result(0, 2, 0);
    assert_eq!(res.rows().count(), 0);
}

// ============================================================================
// Occupancy
// ============================================================================

/// Test the average number of points per vertex.
#[test]
fn test_points_per_vertex() {
    let res = result(30, 1, 12);
    assert_relative_eq!(res.points_per_vertex().unwrap(), 2.5);

    assert_eq!(result(0, 1, 0).points_per_vertex(), None);
}

// ============================================================================
// Display
// ============================================================================

/// Test that short results print every row.
#[test]
fn test_display_short() {
    let mut res = result(3, 2, 8);
    res.blurred = false;
    res.degenerate_points = 1;

    let text = res.to_string();
    assert!(text.contains("Blur:          Skipped"));
    assert!(text.contains("Degenerate:    1"));
    assert!(text.contains("V0"));
    assert!(text.contains("V1"));
    assert!(!text.contains("..."));
    assert!(text.contains("2.500000"));
}

/// Test that long results show the first and last ten rows.
#[test]
fn test_display_truncated() {
    let res = result(25, 1, 10);
    let text = res.to_string();

    assert!(text.contains("..."));
    assert!(!text.contains("Degenerate"));
    // Row 12 (value 6.0) is hidden; row 24 (value 12.0) is shown.
    assert!(!text.contains("6.000000"));
    assert!(text.contains("12.000000"));
}
