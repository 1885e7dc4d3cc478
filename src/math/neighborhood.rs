//! KD-tree for k-nearest and fixed-radius sample search.
//!
//! ## Purpose
//!
//! Every interpolation method looks up the samples closest to a grid vertex.
//! This module implements a static KD-tree so that each lookup costs roughly
//! O(log n) instead of a full scan.
//!
//! ## Design notes
//!
//! * **Static Construction**: The tree is built once per sample set.
//! * **Eytzinger Layout**: Nodes live in a left-complete binary tree stored
//!   in an array; children of `i` are `2i + 1` and `2i + 2`.
//! * **Trait-based Distance**: Searches are generic over [`PointDistance`].
//!
//! ## Invariants
//!
//! * Queries return exact nearest neighbours (no approximation).
//! * Results are ordered by ascending distance.
//!
//! ## Non-goals
//!
//! * Dynamic insertion or deletion.

use core::cmp::Ordering::{self, Equal};
use num_traits::Float;

use crate::primitives::buffer::NeighborSearchBuffer;

// ============================================================================
// Helper Types
// ============================================================================

/// Heap entry ordered by distance (the second field).
#[derive(Debug, Clone, Copy)]
pub struct NodeDistance<T>(pub usize, pub T);

impl<T: PartialEq> PartialEq for NodeDistance<T> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}
impl<T: PartialEq> Eq for NodeDistance<T> {}

impl<T: PartialOrd> PartialOrd for NodeDistance<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialOrd> Ord for NodeDistance<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.1.partial_cmp(&other.1).unwrap_or(Equal)
    }
}

/// Distance used by KD-tree search.
pub trait PointDistance<T: Float> {
    /// Squared (comparison-space) distance between two points.
    fn distance_squared(&self, a: &[T], b: &[T]) -> T;

    /// Squared distance from the query to a splitting plane.
    fn split_distance_squared(&self, dim: usize, split_val: T, query_val: T) -> T;

    /// Convert a comparison-space distance back to the metric.
    fn post_process_distance(&self, d: T) -> T;
}

// ============================================================================
// Neighborhood Structure
// ============================================================================

/// Result of a neighbour search.
#[derive(Debug, Clone)]
pub struct Neighborhood<T> {
    /// Indices of the neighbours in the original point order.
    pub indices: Vec<usize>,
    /// Distances, aligned with `indices`.
    pub distances: Vec<T>,
}

impl<T: Float> Neighborhood<T> {
    /// Create an empty neighbourhood.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate room for `k` neighbours.
    pub fn with_capacity(k: usize) -> Self {
        Self {
            indices: Vec::with_capacity(k),
            distances: Vec::with_capacity(k),
        }
    }

    /// Number of neighbours stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no neighbours are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate `(index, distance)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.distances.iter().copied())
    }

    fn clear(&mut self) {
        self.indices.clear();
        self.distances.clear();
    }
}

impl<T: Float> Default for Neighborhood<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// KD-Tree Implementation
// ============================================================================

/// KD-tree over flattened `dimensions`-wide points.
#[derive(Debug, Clone)]
pub struct KDTree<T: Float> {
    /// Original point index for each Eytzinger slot.
    nodes: Vec<usize>,
    /// Points permuted into Eytzinger order.
    points: Vec<T>,
    dimensions: usize,
}

impl<T: Float> KDTree<T> {
    /// Build a tree from `[p0_0, p0_1, .., p1_0, ..]`.
    pub fn new(points: &[T], dimensions: usize) -> Self {
        let dimensions = dimensions.max(1);
        let n = points.len() / dimensions;
        let mut indices: Vec<usize> = (0..n).collect();
        let mut nodes = vec![0usize; n];
        let mut permuted = vec![T::zero(); n * dimensions];

        Self::build_recursive(
            points,
            dimensions,
            &mut indices,
            0,
            &mut nodes,
            &mut permuted,
            0,
        );

        Self {
            nodes,
            points: permuted,
            dimensions,
        }
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when no points are indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the `k` nearest points to `query`, nearest first.
    pub fn find_k_nearest<D: PointDistance<T>>(
        &self,
        query: &[T],
        k: usize,
        dist_calc: &D,
        buffer: &mut NeighborSearchBuffer<NodeDistance<T>>,
        neighborhood: &mut Neighborhood<T>,
    ) {
        neighborhood.clear();
        if k == 0 || self.nodes.is_empty() {
            return;
        }

        buffer.clear();
        self.search_iterative(query, k, dist_calc, buffer);

        let mut found: Vec<NodeDistance<T>> = buffer.heap.drain().collect();
        found.sort();
        for NodeDistance(idx, dist) in found {
            neighborhood.indices.push(idx);
            neighborhood
                .distances
                .push(dist_calc.post_process_distance(dist));
        }
    }

    /// Find every point within `radius` of `query`, nearest first.
    pub fn find_within_radius<D: PointDistance<T>>(
        &self,
        query: &[T],
        radius: T,
        dist_calc: &D,
        buffer: &mut NeighborSearchBuffer<NodeDistance<T>>,
        neighborhood: &mut Neighborhood<T>,
    ) {
        neighborhood.clear();
        if self.nodes.is_empty() || !(radius >= T::zero()) {
            return;
        }

        let d = self.dimensions;
        let r2 = radius * radius;
        buffer.clear();
        let stack = &mut buffer.stack;
        let mut hits: Vec<NodeDistance<T>> = Vec::new();

        stack.push(0);
        while let Some(packed) = stack.pop() {
            let axis = packed & 0xFF;
            let node_idx = packed >> 8;
            let offset = node_idx * d;
            let node_point = &self.points[offset..offset + d];

            let dist = dist_calc.distance_squared(query, node_point);
            if dist <= r2 {
                hits.push(NodeDistance(self.nodes[node_idx], dist));
            }

            let left_child = 2 * node_idx + 1;
            if left_child >= self.nodes.len() {
                continue;
            }
            let right_child = left_child + 1;
            let next_axis = if axis + 1 == d { 0 } else { axis + 1 };
            let split_val = node_point[axis];
            let diff = query[axis] - split_val;
            let plane = dist_calc.split_distance_squared(axis, split_val, query[axis]);

            // The near side is always searched; the far side only if the plane is within reach.
            let (near, far) = if diff <= T::zero() {
                (left_child, right_child)
            } else {
                (right_child, left_child)
            };
            if far < self.nodes.len() && plane <= r2 {
                stack.push((far << 8) | next_axis);
            }
            if near < self.nodes.len() {
                stack.push((near << 8) | next_axis);
            }
        }

        hits.sort();
        for NodeDistance(idx, dist) in hits {
            neighborhood.indices.push(idx);
            neighborhood
                .distances
                .push(dist_calc.post_process_distance(dist));
        }
    }

    // ------------------------------------------------------------------------
    // Private Helpers & Algorithms
    // ------------------------------------------------------------------------

    /// Recursively builds the tree in Eytzinger layout.
    fn build_recursive(
        points: &[T],
        dims: usize,
        indices: &mut [usize],
        depth: usize,
        nodes: &mut [usize],
        permuted: &mut [T],
        curr_idx: usize,
    ) {
        if indices.is_empty() {
            return;
        }

        let axis = depth % dims;
        let n = indices.len();
        let median_idx = Self::calculate_left_subtree_size(n);

        if median_idx < n {
            indices.select_nth_unstable_by(median_idx, |&a, &b| {
                points[a * dims + axis]
                    .partial_cmp(&points[b * dims + axis])
                    .unwrap_or(Equal)
            });
        }

        let point_idx = indices[median_idx];
        nodes[curr_idx] = point_idx;
        permuted[curr_idx * dims..curr_idx * dims + dims]
            .copy_from_slice(&points[point_idx * dims..point_idx * dims + dims]);

        let (left_part, right_with_median) = indices.split_at_mut(median_idx);
        let right_part = &mut right_with_median[1..];

        Self::build_recursive(
            points,
            dims,
            left_part,
            depth + 1,
            nodes,
            permuted,
            2 * curr_idx + 1,
        );
        Self::build_recursive(
            points,
            dims,
            right_part,
            depth + 1,
            nodes,
            permuted,
            2 * curr_idx + 2,
        );
    }

    /// Bounded max-heap search with an explicit stack.
    ///
    /// Stack entries pack `(node_idx << 8) | axis` into one `usize`.
    fn search_iterative<D: PointDistance<T>>(
        &self,
        query: &[T],
        k: usize,
        dist_calc: &D,
        buffer: &mut NeighborSearchBuffer<NodeDistance<T>>,
    ) {
        let d = self.dimensions;
        let heap = &mut buffer.heap;
        let stack = &mut buffer.stack;
        let nodes_len = self.nodes.len();

        let mut heap_full = false;
        let mut max_dist = T::infinity();

        stack.push(0);

        while let Some(packed) = stack.pop() {
            let axis = packed & 0xFF;
            let node_idx = packed >> 8;
            let offset = node_idx * d;
            let node_point = &self.points[offset..offset + d];
            let original = self.nodes[node_idx];

            let dist = dist_calc.distance_squared(query, node_point);
            if !heap_full {
                heap.push(NodeDistance(original, dist));
                if heap.len() == k {
                    heap_full = true;
                    max_dist = heap.peek().map(|nd| nd.1).unwrap_or(T::infinity());
                }
            } else if dist < max_dist {
                if let Some(mut top) = heap.peek_mut() {
                    *top = NodeDistance(original, dist);
                }
                max_dist = heap.peek().map(|nd| nd.1).unwrap_or(T::infinity());
            }

            let left_child = 2 * node_idx + 1;
            if left_child >= nodes_len {
                continue;
            }

            let split_val = node_point[axis];
            let diff = query[axis] - split_val;
            let right_child = left_child + 1;
            let has_right = right_child < nodes_len;
            let next_axis = if axis + 1 == d { 0 } else { axis + 1 };

            let packed_left = (left_child << 8) | next_axis;
            let packed_right = (right_child << 8) | next_axis;

            let (near_packed, far_packed, has_far, near_exists) = if diff <= T::zero() {
                (packed_left, packed_right, has_right, true)
            } else {
                (packed_right, packed_left, true, has_right)
            };

            if has_far {
                let dist_to_plane = dist_calc.split_distance_squared(axis, split_val, query[axis]);
                if !heap_full || dist_to_plane < max_dist {
                    stack.push(far_packed);
                }
            }
            if near_exists {
                stack.push(near_packed);
            }
        }
    }

    /// Number of nodes in the left subtree of a left-complete tree of size `n`.
    pub fn calculate_left_subtree_size(n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let h = (usize::BITS - n.leading_zeros() - 1) as usize;
        if h == 0 {
            return 0;
        }

        let max_leaf_capacity = 1 << h;
        let r = n - (max_leaf_capacity - 1);
        let left_part_leaves = r.min(max_leaf_capacity / 2);
        (max_leaf_capacity / 2) - 1 + left_part_leaves
    }
}
