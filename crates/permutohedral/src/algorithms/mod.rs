//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the four lattice stages: embedding points onto the
//! lattice, splatting their values onto simplex vertices, blurring along the
//! lattice axes, and slicing back to query points.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Simplex search and barycentric weights.
pub mod embedding;

/// Slot assignment and value scattering.
pub mod splat;

/// Separable lattice blur.
pub mod blur;

/// Normalized interpolation at query points.
pub mod slice;
