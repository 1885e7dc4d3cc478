//! Reusable scratch space for per-vertex neighbour queries.
//!
//! ## Purpose
//!
//! Interpolating a grid runs one k-nearest-neighbour query per vertex. This
//! module provides the buffers that are allocated once per grid and reused
//! for every query, so the hot loop does not touch the allocator.
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared between queries, never shrunk.

use std::collections::BinaryHeap;

// ============================================================================
// Search Buffer
// ============================================================================

/// Persistent heap and traversal stack for KD-tree search.
#[derive(Debug, Clone)]
pub struct NeighborSearchBuffer<N> {
    pub(crate) heap: BinaryHeap<N>,
    pub(crate) stack: Vec<usize>,
}

impl<N: Ord> NeighborSearchBuffer<N> {
    /// Create a search buffer sized for `k` neighbours.
    pub fn new(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k),
            stack: Vec::with_capacity(32),
        }
    }

    /// Clear both buffers for reuse.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.stack.clear();
    }
}

impl<N: Ord> Default for NeighborSearchBuffer<N> {
    fn default() -> Self {
        Self::new(16)
    }
}

// ============================================================================
// Weight Buffer
// ============================================================================

/// Scratch vectors for weighted averaging.
#[derive(Debug, Clone, Default)]
pub struct WeightBuffer {
    /// Neighbour weights.
    pub weights: Vec<f64>,
    /// Neighbour values.
    pub values: Vec<f64>,
}

impl WeightBuffer {
    /// Create a buffer with room for `k` neighbours.
    pub fn with_capacity(k: usize) -> Self {
        Self {
            weights: Vec::with_capacity(k),
            values: Vec::with_capacity(k),
        }
    }

    /// Clear both vectors.
    #[inline]
    pub fn clear(&mut self) {
        self.weights.clear();
        self.values.clear();
    }

    /// Push one weighted value.
    #[inline]
    pub fn push(&mut self, weight: f64, value: f64) {
        self.weights.push(weight);
        self.values.push(value);
    }

    /// Normalized weighted mean, or `None` when the weight sum is not positive.
    pub fn weighted_mean(&self) -> Option<f64> {
        let total: f64 = self.weights.iter().sum();
        if !(total > 0.0) || !total.is_finite() {
            return None;
        }
        let acc: f64 = self
            .weights
            .iter()
            .zip(self.values.iter())
            .map(|(&w, &v)| w * v)
            .sum();
        Some(acc / total)
    }
}
