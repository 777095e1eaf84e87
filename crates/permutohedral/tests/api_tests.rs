//! Tests for the public lattice API.
//!
//! These tests exercise the builder, `create_lattice`, and the session
//! operations (`init_with_values`, `apply`, `compute`) through the public
//! surface only.
//!
//! ## Test Organization
//!
//! 1. **Filtering Properties** - Known outputs for small point sets
//! 2. **Session Reuse** - `apply` and `compute` against a retained lattice
//! 3. **Fallback Policies** - Zero-weight handling for query points
//! 4. **Error Handling** - Every contract violation and its variant

use approx::{assert_abs_diff_eq, assert_relative_eq};

use permutohedral::prelude::*;

/// Deterministic, well-spread 2-D features and 1-D values.
fn cloud(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut features = Vec::with_capacity(2 * n);
    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64;
        features.push((t * 0.37).sin() * 3.0);
        features.push((t * 0.61).cos() * 2.0);
        values.push((t * 0.13).sin() + 2.0);
    }
    (features, values)
}

// ============================================================================
// Filtering Properties
// ============================================================================

/// Test that a single point without blur returns its own value.
#[test]
fn test_single_point_identity() {
    let mut lattice = create_lattice::<f64>(1, 3, 2, false).unwrap();
    let result = lattice
        .init_with_values(&[0.3, -1.2], &[1.0, -2.0, 5.5], false)
        .unwrap();

    assert_relative_eq!(result.values[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(result.values[1], -2.0, epsilon = 1e-12);
    assert_relative_eq!(result.values[2], 5.5, epsilon = 1e-12);
    assert!(!result.blurred);
    assert_eq!(result.degenerate_points, 0);
}

/// Test that a single point with blur still returns its own value.
///
/// Values and weights are blurred by the same linear operator, so their
/// ratio is preserved.
#[test]
fn test_single_point_identity_with_blur() {
    let mut lattice = create_lattice::<f64>(1, 1, 3, true).unwrap();
    let result = lattice
        .init_with_values(&[0.7, 0.1, -0.4], &[4.25], true)
        .unwrap();

    assert_relative_eq!(result.values[0], 4.25, epsilon = 1e-12);
    assert!(result.blurred);
}

/// Test that two coincident points average their values.
#[test]
fn test_coincident_points_average() {
    let mut lattice = create_lattice::<f64>(2, 1, 1, false).unwrap();
    let result = lattice
        .init_with_values(&[0.5, 0.5], &[1.0, 3.0], false)
        .unwrap();

    assert_relative_eq!(result.values[0], 2.0, epsilon = 1e-12);
    assert_relative_eq!(result.values[1], 2.0, epsilon = 1e-12);
}

/// Test that far-apart points keep their own values.
#[test]
fn test_far_apart_points_are_independent() {
    let features = vec![0.0, 0.0, 100.0, 0.0, 0.0, -100.0];
    let values = vec![1.0, 5.0, -3.0];

    for blur in [false, true] {
        let mut lattice = create_lattice::<f64>(3, 1, 2, blur).unwrap();
        let result = lattice.init_with_values(&features, &values, blur).unwrap();
        for (out, expected) in result.values.iter().zip(&values) {
            assert_relative_eq!(*out, *expected, epsilon = 1e-10);
        }
    }
}

/// Test that nearby points are smoothed towards each other.
#[test]
fn test_neighbours_are_smoothed() {
    let mut lattice = create_lattice::<f64>(2, 1, 1, true).unwrap();
    let result = lattice
        .init_with_values(&[0.0, 0.3], &[0.0, 1.0], true)
        .unwrap();

    assert!(result.values[0] > 0.0 && result.values[0] < 1.0);
    assert!(result.values[1] > 0.0 && result.values[1] < 1.0);
    assert!(result.values[0] < result.values[1]);
}

/// Test that a constant value field is reproduced exactly.
#[test]
fn test_constant_field_is_preserved() {
    let (features, _) = cloud(40);
    let values = vec![7.5; 40];

    let mut lattice = create_lattice::<f64>(40, 1, 2, true).unwrap();
    let result = lattice.init_with_values(&features, &values, true).unwrap();

    for v in &result.values {
        assert_relative_eq!(*v, 7.5, epsilon = 1e-10);
    }
}

/// Test that identical inputs produce bit-identical outputs.
#[test]
fn test_determinism() {
    let (features, values) = cloud(64);

    let run = || {
        let mut lattice = create_lattice::<f64>(64, 1, 2, true).unwrap();
        lattice.init_with_values(&features, &values, true).unwrap()
    };

    assert_eq!(run(), run());
}

/// Test that f32 is supported end to end.
#[test]
fn test_f32_support() {
    let mut lattice = create_lattice::<f32>(2, 1, 1, false).unwrap();
    let result = lattice
        .init_with_values(&[0.5f32, 0.5], &[1.0, 3.0], false)
        .unwrap();

    assert_abs_diff_eq!(result.values[0], 2.0f32, epsilon = 1e-5);
}

/// Test that constant feature dimensions leave outputs unchanged for
/// coincident and for well-separated point sets.
#[test]
fn test_constant_dimensions_do_not_change_output() {
    // Coincident: every point shares the same feature vector.
    let values = vec![1.0, 2.0, 6.0];
    let mut narrow = create_lattice::<f64>(3, 1, 1, true).unwrap();
    let base = narrow
        .init_with_values(&[0.4, 0.4, 0.4], &values, true)
        .unwrap();

    let mut wide = create_lattice::<f64>(3, 1, 3, true).unwrap();
    let padded = wide
        .init_with_values(&[0.4, 2.0, -1.0, 0.4, 2.0, -1.0, 0.4, 2.0, -1.0], &values, true)
        .unwrap();

    for (a, b) in base.values.iter().zip(&padded.values) {
        assert_relative_eq!(*a, 3.0, epsilon = 1e-10);
        assert_relative_eq!(*a, *b, epsilon = 1e-10);
    }

    // Well separated: every point keeps its own value.
    let mut narrow = create_lattice::<f64>(3, 1, 1, true).unwrap();
    let base = narrow
        .init_with_values(&[0.0, 80.0, -80.0], &values, true)
        .unwrap();

    let mut wide = create_lattice::<f64>(3, 1, 2, true).unwrap();
    let padded = wide
        .init_with_values(&[0.0, 5.0, 80.0, 5.0, -80.0, 5.0], &values, true)
        .unwrap();

    for ((a, b), v) in base.values.iter().zip(&padded.values).zip(&values) {
        assert_relative_eq!(*a, *v, epsilon = 1e-10);
        assert_relative_eq!(*b, *v, epsilon = 1e-10);
    }
}

/// Test that the number of vertices is bounded by N * (d + 1).
#[test]
fn test_lattice_size_bound() {
    let (features, values) = cloud(50);
    let mut lattice = create_lattice::<f64>(50, 1, 2, true).unwrap();
    assert_eq!(lattice.lattice_size(), 0);

    let result = lattice.init_with_values(&features, &values, true).unwrap();

    assert!(result.lattice_size > 0);
    assert!(result.lattice_size <= 50 * 3);
    assert_eq!(result.lattice_size, lattice.lattice_size());
}

// ============================================================================
// Session Reuse
// ============================================================================

/// Test that applying the init points reproduces the init output.
#[test]
fn test_apply_on_init_points_matches_init() {
    let (features, values) = cloud(30);
    let mut lattice = create_lattice::<f64>(30, 1, 2, true).unwrap();
    let init = lattice.init_with_values(&features, &values, true).unwrap();

    let mut out = vec![0.0; 30];
    let stats = lattice.apply(&mut out, &features).unwrap();

    assert_eq!(stats.num_points, 30);
    assert_eq!(stats.degenerate_points, 0);
    assert_eq!(out, init.values);
}

/// Test that `apply` never adds vertices.
#[test]
fn test_apply_does_not_grow_lattice() {
    let (features, values) = cloud(20);
    let mut lattice = create_lattice::<f64>(20, 1, 2, true).unwrap();
    lattice.init_with_values(&features, &values, true).unwrap();
    let size = lattice.lattice_size();

    let mut out = vec![0.0; 2];
    lattice
        .apply(&mut out, &[50.0, 50.0, -0.1, 0.2])
        .unwrap();

    assert_eq!(lattice.lattice_size(), size);
}

/// Test that `compute` with the init values reproduces the init output.
#[test]
fn test_compute_matches_init() {
    let (features, values) = cloud(25);
    let mut lattice = create_lattice::<f64>(25, 1, 2, true).unwrap();
    let init = lattice.init_with_values(&features, &values, true).unwrap();

    let again = lattice.compute(&values, Forward).unwrap();
    assert_eq!(again, init);

    // Axis passes need not commute on a sparse lattice, but a constant
    // field stays constant in either order.
    let reversed = lattice.compute(&vec![2.5; 25], Reverse).unwrap();
    assert_eq!(reversed.lattice_size, init.lattice_size);
    for v in &reversed.values {
        assert_relative_eq!(*v, 2.5, epsilon = 1e-10);
    }
}

/// Test that `compute` leaves the retained lattice untouched.
#[test]
fn test_compute_does_not_change_apply() {
    let (features, values) = cloud(25);
    let mut lattice = create_lattice::<f64>(25, 1, 2, true).unwrap();
    let init = lattice.init_with_values(&features, &values, true).unwrap();

    let other = vec![-1.0; 25];
    lattice.compute(&other, Forward).unwrap();

    let mut out = vec![0.0; 25];
    lattice.apply(&mut out, &features).unwrap();
    assert_eq!(out, init.values);
}

/// Test that a new initialization replaces the previous lattice.
#[test]
fn test_reinitialization_replaces_lattice() {
    let mut lattice = Permutohedral::<f64>::new()
        .value_dim(1)
        .feature_dim(1)
        .build()
        .unwrap();

    lattice.init_with_values(&[0.0], &[1.0], true).unwrap();
    assert_eq!(lattice.num_points(), Some(1));

    let result = lattice
        .init_with_values(&[0.0, 10.0, 20.0], &[1.0, 2.0, 3.0], false)
        .unwrap();
    assert_eq!(result.num_points, 3);
    assert_eq!(lattice.num_points(), Some(3));
    assert!(!lattice.blur_enabled());
}

// ============================================================================
// Fallback Policies
// ============================================================================

/// Test that a query far from the lattice is degenerate and zeroed.
#[test]
fn test_apply_far_query_is_degenerate() {
    let mut lattice = create_lattice::<f64>(2, 2, 1, true).unwrap();
    lattice
        .init_with_values(&[0.0, 0.2], &[1.0, 2.0, 3.0, 4.0], true)
        .unwrap();

    let mut out = vec![9.0; 4];
    let stats = lattice.apply(&mut out, &[0.1, 500.0]).unwrap();

    assert_eq!(stats.degenerate_points, 1);
    assert_eq!(&out[2..], &[0.0, 0.0]);
    assert!(out[0] > 0.0);
}

/// Test that the `Fail` policy reports the first degenerate query point.
#[test]
fn test_fail_policy_reports_point() {
    let mut lattice = Permutohedral::new()
        .value_dim(1)
        .feature_dim(1)
        .zero_weight_fallback(Fail)
        .build()
        .unwrap();
    lattice.init_with_values(&[0.0], &[1.0], true).unwrap();

    let mut out = vec![0.0; 3];
    let err = lattice.apply(&mut out, &[0.0, -400.0, 400.0]).unwrap_err();
    assert_eq!(err, LatticeError::DegenerateNormalization { point: 1 });
}

/// Test that `ReturnOriginal` zeroes degenerate query rows in `apply`.
#[test]
fn test_return_original_in_apply_is_zero() {
    let mut lattice = Permutohedral::new()
        .value_dim(1)
        .feature_dim(1)
        .zero_weight_fallback(ReturnOriginal)
        .build()
        .unwrap();
    lattice.init_with_values(&[0.0], &[1.0], true).unwrap();

    let mut out = vec![5.0];
    let stats = lattice.apply(&mut out, &[300.0]).unwrap();
    assert_eq!(stats.degenerate_points, 1);
    assert_eq!(out, vec![0.0]);
}

/// Test that the replicate boundary keeps an isolated point unchanged.
#[test]
fn test_boundary_policies_on_isolated_point() {
    for policy in [Zero, Replicate] {
        let mut lattice = Permutohedral::new()
            .value_dim(1)
            .feature_dim(2)
            .boundary_policy(policy)
            .build()
            .unwrap();
        let result = lattice.init_with_values(&[0.1, 0.2], &[3.0], true).unwrap();
        assert_relative_eq!(result.values[0], 3.0, epsilon = 1e-12);
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Test that missing dimensions are rejected at build time.
#[test]
fn test_missing_dimensions() {
    let err = Permutohedral::<f64>::new().feature_dim(2).build().unwrap_err();
    assert_eq!(
        err,
        LatticeError::InvalidDimension {
            parameter: "value_dim",
            got: 0
        }
    );

    let err = create_lattice::<f64>(4, 1, 0, true).unwrap_err();
    assert_eq!(
        err,
        LatticeError::InvalidDimension {
            parameter: "feature_dim",
            got: 0
        }
    );
}

/// Test that setting a parameter twice is rejected.
#[test]
fn test_duplicate_parameter() {
    let err = Permutohedral::<f64>::new()
        .value_dim(1)
        .feature_dim(1)
        .blur(true)
        .blur(false)
        .build()
        .unwrap_err();
    assert_eq!(err, LatticeError::DuplicateParameter { parameter: "blur" });
}

/// Test that zero points are rejected.
#[test]
fn test_empty_input() {
    assert_eq!(
        create_lattice::<f64>(0, 1, 1, true).unwrap_err(),
        LatticeError::EmptyInput
    );

    let mut lattice = Permutohedral::<f64>::new()
        .value_dim(1)
        .feature_dim(1)
        .build()
        .unwrap();
    assert_eq!(
        lattice.init_with_values(&[], &[], true).unwrap_err(),
        LatticeError::EmptyInput
    );
}

/// Test that shape mismatches are reported before any computation.
#[test]
fn test_dimension_mismatch() {
    let mut lattice = create_lattice::<f64>(3, 2, 2, true).unwrap();

    // Two rows where three were declared.
    let err = lattice
        .init_with_values(&[0.0, 0.0, 1.0, 1.0], &[0.0; 6], true)
        .unwrap_err();
    assert_eq!(
        err,
        LatticeError::DimensionMismatch {
            matrix: "features",
            expected: 6,
            got: 4
        }
    );

    // Value matrix of the wrong width.
    let err = lattice
        .init_with_values(&[0.0; 6], &[0.0; 3], true)
        .unwrap_err();
    assert_eq!(
        err,
        LatticeError::DimensionMismatch {
            matrix: "values",
            expected: 6,
            got: 3
        }
    );
    assert!(!lattice.is_initialized());

    lattice
        .init_with_values(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0], &[0.0; 6], true)
        .unwrap();

    // Output buffer too small for two query rows.
    let mut out = vec![0.0; 3];
    let err = lattice.apply(&mut out, &[0.0, 0.0, 1.0, 1.0]).unwrap_err();
    assert_eq!(
        err,
        LatticeError::DimensionMismatch {
            matrix: "output",
            expected: 4,
            got: 3
        }
    );

    // Ragged query features.
    let mut out = vec![0.0; 2];
    assert!(matches!(
        lattice.apply(&mut out, &[0.0, 0.0, 1.0]),
        Err(LatticeError::DimensionMismatch { matrix: "features", .. })
    ));

    // Wrong number of values for compute.
    assert!(matches!(
        lattice.compute(&[1.0; 4], Forward),
        Err(LatticeError::DimensionMismatch { matrix: "values", .. })
    ));
}

/// Test that non-finite and out-of-range inputs are rejected.
#[test]
fn test_invalid_numeric_values() {
    let mut lattice = create_lattice::<f64>(2, 1, 1, true).unwrap();

    assert!(matches!(
        lattice.init_with_values(&[0.0, f64::NAN], &[1.0, 2.0], true),
        Err(LatticeError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        lattice.init_with_values(&[0.0, 1.0], &[1.0, f64::INFINITY], true),
        Err(LatticeError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        lattice.init_with_values(&[0.0, 1e300], &[1.0, 2.0], true),
        Err(LatticeError::InvalidNumericValue(_))
    ));
}

/// Test that finite features near the end of the key range are rejected.
#[test]
fn test_coordinates_near_key_limit() {
    for d in [2, 3, 5] {
        // Coordinate 0 elevates to (c, -c, 0, ..) with c = x * (d + 1) / sqrt(3).
        let at_elevation = |c: f64| c * 3.0_f64.sqrt() / (d + 1) as f64;
        let mut near_limit = vec![0.0; d];
        near_limit[0] = at_elevation(2_147_483_646.0);

        let mut lattice = create_lattice::<f64>(1, 1, d, true).unwrap();
        assert!(matches!(
            lattice.init_with_values(&near_limit, &[1.0], true),
            Err(LatticeError::InvalidNumericValue(_))
        ));

        let mut large = vec![0.0; d];
        large[0] = at_elevation(1.0e9);
        let result = lattice.init_with_values(&large, &[4.0], true).unwrap();
        assert_relative_eq!(result.values[0], 4.0, epsilon = 1e-9);

        let mut out = [0.0];
        assert!(matches!(
            lattice.apply(&mut out, &near_limit),
            Err(LatticeError::InvalidNumericValue(_))
        ));
    }
}

/// Test that an uninitialized lattice refuses queries.
#[test]
fn test_uninitialized_lattice() {
    let lattice = create_lattice::<f64>(2, 1, 1, true).unwrap();
    assert!(!lattice.is_initialized());
    assert_eq!(lattice.num_points(), Some(2));

    let mut out = vec![0.0; 1];
    assert_eq!(
        lattice.apply(&mut out, &[0.0]).unwrap_err(),
        LatticeError::UninitializedLattice
    );
    assert_eq!(
        lattice.compute(&[1.0, 2.0], Forward).unwrap_err(),
        LatticeError::UninitializedLattice
    );
}

/// Test that errors have readable messages.
#[test]
fn test_error_display() {
    let err = LatticeError::DimensionMismatch {
        matrix: "values",
        expected: 6,
        got: 3,
    };
    assert_eq!(
        err.to_string(),
        "Dimension mismatch in values: expected 6, got 3"
    );
}

/// Test that the result summary prints a truncated table.
#[test]
fn test_result_display() {
    let (features, values) = cloud(30);
    let mut lattice = create_lattice::<f64>(30, 1, 2, true).unwrap();
    let result = lattice.init_with_values(&features, &values, true).unwrap();

    let text = result.to_string();
    assert!(text.contains("Points:        30"));
    assert!(text.contains("Blur:          Applied"));
    assert!(text.contains("..."));
}
