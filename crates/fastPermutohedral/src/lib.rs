//! # fastPermutohedral: Parallel Permutohedral Lattice Filtering
//!
//! Multi-threaded front end for the [`permutohedral`] crate. It runs the
//! embedding, blur, and slice stages of the lattice filter on all CPU cores
//! with `rayon`, and accepts `ndarray` matrices as well as slices and vectors.
//!
//! Parallel output is bit-identical to the sequential engine: only the
//! distribution of points and vertices over threads changes, never the
//! arithmetic. Slot assignment and splatting stay sequential.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastPermutohedral::prelude::*;
//! use ndarray::{Array1, Array2};
//!
//! // Four points in 2-D feature space, one value channel.
//! let features = Array2::from_shape_vec(
//!     (4, 2),
//!     vec![0.0, 0.0, 0.1, 0.0, 0.0, 0.1, 9.0, 9.0],
//! ).unwrap();
//! let values = Array1::from_vec(vec![1.0, 2.0, 3.0, 10.0]);
//!
//! // Build the lattice with parallel execution (default)
//! let mut lattice = Permutohedral::<f64>::new()
//!     .value_dim(1)
//!     .feature_dim(2)
//!     .build()?;
//!
//! let result = lattice.fit(&features, &values, true)?;
//!
//! // The isolated point keeps its value.
//! assert!((result.values[3] - 10.0).abs() < 1e-9);
//! println!("{}", result);
//! # Result::<(), LatticeError>::Ok(())
//! ```
//!
//! ### Sequential execution
//!
//! ```rust
//! use fastPermutohedral::prelude::*;
//!
//! let mut lattice = Permutohedral::<f64>::new()
//!     .value_dim(1)
//!     .feature_dim(1)
//!     .parallel(false)
//!     .build()?;
//!
//! let features = vec![0.5, 0.5];
//! let values = vec![1.0, 3.0];
//! let result = lattice.fit(&features, &values, false)?;
//! assert!((result.values[0] - 2.0).abs() < 1e-12);
//! # Result::<(), LatticeError>::Ok(())
//! ```

#![allow(non_snake_case)]

// Layer 4: Engine - parallel stage passes.
mod engine;

// High-level fluent API for parallel lattice filtering.
mod api;

// Input data handling.
mod input;

pub use api::{ParallelPermutohedral, ParallelPermutohedralBuilder};
pub use input::LatticeInput;

// Standard fastPermutohedral prelude.
pub mod prelude {
    pub use crate::api::{
        ApplyStats,
        BlurOrder::{Forward, Reverse},
        BoundaryPolicy::{Replicate, Zero},
        FilterResult, LatticeError, ParallelPermutohedral, ParallelPermutohedralBuilder as Permutohedral,
        ZeroWeightFallback::{Fail, ReturnOriginal, ReturnZero},
    };
    pub use crate::input::LatticeInput;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
