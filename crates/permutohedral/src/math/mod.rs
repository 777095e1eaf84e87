//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the fixed numerical ingredients of the permutohedral
//! lattice:
//! - Embedding scale factors tied to the lattice spacing
//! - The canonical simplex table
//! - The blur stencil and its boundary and ordering policies
//!
//! These are reusable building blocks with no stage-specific logic.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Embedding scale factors.
pub mod scaling;

/// Canonical simplex of the lattice.
pub mod canonical;

/// Blur stencil and policies.
pub mod stencil;
