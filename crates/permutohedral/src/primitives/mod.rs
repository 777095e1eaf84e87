//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures shared by every stage: the
//! lattice hash index, the working buffers, matrix shape helpers, and the
//! error type. It has zero internal dependencies within the crate.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Lattice vertex hash index.
pub mod hash;

/// Buffer management.
pub mod buffer;

/// Row-major matrix views.
pub mod matrix;
