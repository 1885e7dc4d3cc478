//! Graph model builder: node/link lists to a weighted adjacency matrix.
//!
//! ## Purpose
//!
//! This module turns the caller's node and link records into an indexed,
//! symmetric, non-negative adjacency matrix that every graph algorithm
//! consumes.
//!
//! ## Design notes
//!
//! * **Fail-soft**: links with unknown endpoints are dropped without error.
//! * **Coercion**: missing, non-finite or non-positive weights become 1.0.
//! * **Accumulation**: parallel links sum into one cell.
//!
//! ## Invariants
//!
//! * `matrix[(i, j)] == matrix[(j, i)]` and every cell is `>= 0`.
//! * Every node receives exactly one index, in input order.
//!
//! ## Non-goals
//!
//! * Directed adjacency (the anomaly scorer reads link direction itself).

use std::collections::HashMap;

use crate::math::linalg::Matrix;
use crate::primitives::data::{GraphLink, GraphNode, WeightField};

// ============================================================================
// Adjacency Matrix
// ============================================================================

/// Symmetric weighted adjacency matrix with id/index maps.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    /// n×n weights.
    pub matrix: Matrix,
    /// Node id for each index.
    pub ids: Vec<String>,
    /// Index for each node id.
    pub index: HashMap<String, usize>,
    /// Number of links dropped for referencing unknown nodes.
    pub dropped_links: usize,
}

impl AdjacencyMatrix {
    /// Build the adjacency of `nodes`/`links`, reading weights from `field`.
    pub fn build(nodes: &[GraphNode], links: &[GraphLink], field: &WeightField) -> Self {
        let mut ids = Vec::with_capacity(nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if !index.contains_key(&node.id) {
                index.insert(node.id.clone(), ids.len());
                ids.push(node.id.clone());
            }
        }

        let n = ids.len();
        let mut matrix = Matrix::zeros(n, n);
        let mut dropped_links = 0usize;

        for link in links {
            let (Some(&s), Some(&t)) = (index.get(&link.source), index.get(&link.target)) else {
                dropped_links += 1;
                continue;
            };
            let w = field.weight(link);
            if s == t {
                matrix[(s, s)] += w;
            } else {
                matrix[(s, t)] += w;
                matrix[(t, s)] += w;
            }
        }

        if dropped_links > 0 {
            log::debug!("dropped {} links with unknown endpoints", dropped_links);
        }

        Self {
            matrix,
            ids,
            index,
            dropped_links,
        }
    }

    /// Wrap an existing square matrix, naming nodes by their index.
    ///
    /// Negative or non-finite cells are replaced by zero and the matrix is
    /// symmetrized by averaging with its transpose.
    pub fn from_matrix(matrix: Matrix) -> Self {
        let n = matrix.nrows().min(matrix.ncols());
        let mut clean = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let a = sanitize(matrix[(i, j)]);
                let b = sanitize(matrix[(j, i)]);
                clean[(i, j)] = 0.5 * (a + b);
            }
        }
        let ids: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let index = ids.iter().cloned().enumerate().map(|(i, id)| (id, i)).collect();
        Self {
            matrix: clean,
            ids,
            index,
            dropped_links: 0,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Weighted degree (row sum) of every node.
    pub fn strengths(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.matrix.row(i).sum()).collect()
    }

    /// Sum of all cells, i.e. `2m` in modularity notation.
    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.matrix.sum()
    }

    /// Non-zero neighbours of `i` (excluding `i` itself) with their weights.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..self.len()).filter_map(move |j| {
            let w = self.matrix[(i, j)];
            (j != i && w > 0.0).then_some((j, w))
        })
    }

    /// Neighbour lists of every node, in ascending index order.
    pub fn neighbor_lists(&self) -> Vec<Vec<(usize, f64)>> {
        (0..self.len()).map(|i| self.neighbors(i).collect()).collect()
    }
}

#[inline]
fn sanitize(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 0.0 }
}
