//! # Permutohedral: Fast High-Dimensional Gaussian Filtering for Rust
//!
//! A `no_std`-capable implementation of the permutohedral lattice
//! (Adams, Baek & Davis, 2010) for approximate Gaussian filtering of values
//! attached to points in a d-dimensional feature space.
//!
//! ## What is the permutohedral lattice?
//!
//! Filtering N points with a Gaussian kernel in feature space costs O(N²)
//! when done directly. The permutohedral lattice tiles feature space with
//! simplices whose vertices live on an integer lattice in the zero-sum
//! hyperplane of R^(d+1). Each point is *splatted* onto the d + 1 vertices
//! of its enclosing simplex, the vertex values are *blurred* with a small
//! separable stencil along the d + 1 lattice axes, and the result is
//! *sliced* back to the points by barycentric interpolation. The cost grows
//! linearly in N and polynomially in d.
//!
//! Typical uses are bilateral and joint-bilateral image filters, mean-field
//! inference in dense CRFs, and density-weighted smoothing in point-set
//! registration.
//!
//! ## Quick Start
//!
//! ```rust
//! use permutohedral::prelude::*;
//!
//! // Two coincident points in 1-D feature space, one value channel each.
//! let features = vec![0.5, 0.5];
//! let values = vec![1.0, 3.0];
//!
//! let mut lattice = Permutohedral::<f64>::new()
//!     .num_points(2)
//!     .value_dim(1)
//!     .feature_dim(1)
//!     .build()?;
//!
//! let result = lattice.init_with_values(&features, &values, false)?;
//!
//! // Coincident points share their simplex, so both see the average.
//! assert!((result.values[0] - 2.0).abs() < 1e-12);
//! assert!((result.values[1] - 2.0).abs() < 1e-12);
//! println!("{}", result);
//! # Result::<(), LatticeError>::Ok(())
//! ```
//!
//! ### Reusing the lattice
//!
//! A lattice keeps the geometry of its last `init_with_values`. `apply`
//! slices new query points against it; `compute` filters new values over the
//! same points without rebuilding anything.
//!
//! ```rust
//! use permutohedral::prelude::*;
//!
//! let features = vec![0.0, 0.0, 0.2, 0.1, 5.0, 5.0];
//! let values = vec![1.0, 1.0, 4.0];
//!
//! let mut lattice = create_lattice::<f64>(3, 1, 2, true)?;
//! lattice.init_with_values(&features, &values, true)?;
//!
//! // Query the lattice at a new location.
//! let mut out = vec![0.0; 1];
//! let stats = lattice.apply(&mut out, &[0.1, 0.05])?;
//! assert_eq!(stats.num_points, 1);
//!
//! // Filter a second channel over the same geometry.
//! let again = lattice.compute(&[2.0, 2.0, 2.0], Reverse)?;
//! assert_eq!(again.lattice_size, lattice.lattice_size());
//! # Result::<(), LatticeError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every operation returns `Result<_, LatticeError>`. Shapes are checked
//! against the configured dimensions before any computation:
//!
//! ```rust
//! use permutohedral::prelude::*;
//!
//! let mut lattice = create_lattice::<f64>(2, 1, 2, true)?;
//!
//! // Three feature coordinates do not form whole rows of width 2.
//! match lattice.init_with_values(&[0.0, 1.0, 2.0], &[1.0, 2.0], true) {
//!     Err(LatticeError::DimensionMismatch { matrix, .. }) => assert_eq!(matrix, "features"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! # Result::<(), LatticeError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! Disable default features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! permutohedral = { version = "0.3", default-features = false }
//! ```
//!
//! ## References
//!
//! - Adams, A., Baek, J., & Davis, M. A. (2010). "Fast High-Dimensional Filtering Using the Permutohedral Lattice"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - embedding, splat, blur, slice.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for lattice filtering.
mod api;

pub use api::{
    ApplyStats, BlurOrder, BoundaryPolicy, FilterResult, LatticeError, PermutohedralBuilder,
    PermutohedralLattice, ZeroWeightFallback, create_lattice,
};

// Standard permutohedral prelude.
pub mod prelude {
    pub use crate::api::{
        ApplyStats, BlurOrder::Forward, BlurOrder::Reverse, BoundaryPolicy::Replicate,
        BoundaryPolicy::Zero, FilterResult, LatticeError, PermutohedralBuilder as Permutohedral,
        PermutohedralLattice, ZeroWeightFallback::Fail, ZeroWeightFallback::ReturnOriginal,
        ZeroWeightFallback::ReturnZero, create_lattice,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
