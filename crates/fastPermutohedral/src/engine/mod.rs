//! Layer 4: Engine
//!
//! This layer provides the parallel stage passes for lattice filtering.
//! They are injected into the core engine and distribute work across CPU cores.

// Parallel stage passes using CPU threads
pub mod executor;
