//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer runs the filter stages in order (embed, splat, blur, slice),
//! validates inputs before any stage runs, and packages the results. It also
//! holds the state a lattice session retains between calls.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Stage orchestration and retained lattice state.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for lattice filtering.
pub mod output;
