//! Working memory for lattice construction and filtering.
//!
//! ## Purpose
//!
//! This module provides the owned buffers that the stages share: the
//! embedded simplices of every point, the per-point slot membership, and the
//! double-buffered vertex records that splatting fills and blurring rewrites.
//!
//! ## Design notes
//!
//! * **Centralized Ownership**: A lattice session owns all of its buffers; stages borrow them.
//! * **Flat layout**: Every buffer is a single `Vec` with a fixed row stride.
//! * **Lazy Expansion**: Buffers are resized on demand via `prepare` and never shrunk.
//!
//! ## Key concepts
//!
//! * **EmbeddedPoints**: (d+1) keys and (d+1) barycentric weights per point.
//! * **Membership**: (d+1) optional vertex slots and weights per point.
//! * **LatticeBuffer**: One record of `value_dim + 1` per vertex; the last
//!   column is the homogeneous weight used for normalization.
//!
//! ## Invariants
//!
//! * `LatticeBuffer::current` and `LatticeBuffer::scratch` always have the same length.
//! * Membership rows have exactly `d + 1` entries.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::mem::swap;
use num_traits::Zero;

// ============================================================================
// EmbeddedPoints - Simplex Corners Before Slot Assignment
// ============================================================================

/// Enclosing simplex of every embedded point.
///
/// Point `i` owns keys `[i * (d+1)^2, (i+1) * (d+1)^2)` (one key of `d + 1`
/// coordinates per corner) and weights `[i * (d+1), (i+1) * (d+1))`.
#[derive(Debug, Clone)]
pub struct EmbeddedPoints<T> {
    /// Coordinates per key, `d + 1`.
    pub key_size: usize,

    /// Corner keys, row-major by point then corner.
    pub keys: Vec<i32>,

    /// Barycentric weights, row-major by point.
    pub weights: Vec<T>,
}

impl<T: Zero + Clone> EmbeddedPoints<T> {
    /// Allocate storage for `n_points` points of feature dimension `d`.
    pub fn new(n_points: usize, d: usize) -> Self {
        let key_size = d + 1;
        Self {
            key_size,
            keys: vec![0; n_points * key_size * key_size],
            weights: vec![T::zero(); n_points * key_size],
        }
    }

    /// Number of embedded points.
    #[inline]
    pub fn len(&self) -> usize {
        if self.key_size == 0 {
            0
        } else {
            self.weights.len() / self.key_size
        }
    }

    /// Whether there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Key of `corner` for point `point`.
    #[inline]
    pub fn key(&self, point: usize, corner: usize) -> &[i32] {
        let start = (point * self.key_size + corner) * self.key_size;
        &self.keys[start..start + self.key_size]
    }

    /// Barycentric weights of point `point`.
    #[inline]
    pub fn point_weights(&self, point: usize) -> &[T] {
        &self.weights[point * self.key_size..(point + 1) * self.key_size]
    }
}

// ============================================================================
// Membership - Simplex Vertices Resolved to Slots
// ============================================================================

/// Slots and barycentric weights of every point's simplex.
///
/// A slot is `None` when a query corner is not part of the lattice.
#[derive(Debug, Clone)]
pub struct Membership<T> {
    /// Corners per point, `d + 1`.
    pub corners: usize,

    /// Vertex slot per corner, row-major by point.
    pub slots: Vec<Option<usize>>,

    /// Barycentric weight per corner, row-major by point.
    pub weights: Vec<T>,
}

impl<T> Membership<T> {
    /// Empty membership for simplices with `corners` vertices.
    pub fn with_capacity(corners: usize, n_points: usize) -> Self {
        Self {
            corners,
            slots: Vec::with_capacity(n_points * corners),
            weights: Vec::with_capacity(n_points * corners),
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        if self.corners == 0 {
            0
        } else {
            self.slots.len() / self.corners
        }
    }

    /// Whether there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots and weights of point `point`.
    #[inline]
    pub fn point(&self, point: usize) -> (&[Option<usize>], &[T]) {
        let range = point * self.corners..(point + 1) * self.corners;
        (&self.slots[range.clone()], &self.weights[range])
    }
}

// ============================================================================
// LatticeBuffer - Double-Buffered Vertex Records
// ============================================================================

/// Per-vertex accumulators, double-buffered for blurring.
///
/// Each vertex owns `stride = value_dim + 1` consecutive elements: the value
/// channels followed by the homogeneous weight.
#[derive(Debug, Clone)]
pub struct LatticeBuffer<T> {
    /// Elements per vertex record.
    stride: usize,

    /// Records visible to the next stage.
    current: Vec<T>,

    /// Destination of the running blur pass.
    scratch: Vec<T>,
}

impl<T> Default for LatticeBuffer<T> {
    fn default() -> Self {
        Self {
            stride: 1,
            current: Vec::new(),
            scratch: Vec::new(),
        }
    }
}

impl<T: Zero + Clone> LatticeBuffer<T> {
    /// Zero both buffers for `vertices` records of `value_dim` channels.
    pub fn prepare(&mut self, vertices: usize, value_dim: usize) {
        self.stride = value_dim + 1;
        let len = vertices * self.stride;
        self.current.clear();
        self.current.resize(len, T::zero());
        self.scratch.clear();
        self.scratch.resize(len, T::zero());
    }

    /// Elements per vertex record.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of vertex records.
    #[inline]
    pub fn vertices(&self) -> usize {
        self.current.len() / self.stride
    }

    /// Current records.
    #[inline]
    pub fn current(&self) -> &[T] {
        &self.current
    }

    /// Current records, mutably (splat target).
    #[inline]
    pub fn current_mut(&mut self) -> &mut [T] {
        &mut self.current
    }

    /// Read the current records while writing the scratch records.
    #[inline]
    pub fn split(&mut self) -> (&[T], &mut [T]) {
        (&self.current, &mut self.scratch)
    }

    /// Make the scratch records current.
    #[inline]
    pub fn swap(&mut self) {
        swap(&mut self.current, &mut self.scratch);
    }
}
