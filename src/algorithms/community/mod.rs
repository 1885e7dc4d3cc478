//! Community detection over weighted undirected graphs.
//!
//! ## Purpose
//!
//! This module partitions an [`AdjacencyMatrix`] into communities and scores
//! the partition by modularity.
//!
//! ## Design notes
//!
//! * **Leiden** runs the single-level Louvain optimizer and **Infomap** runs
//!   label propagation. Both names are kept so callers selecting them get
//!   the same partitions they always have.
//! * **Fast-greedy** and **walktrap** are agglomerative and also return the
//!   merge dendrogram.
//!
//! ## Invariants
//!
//! * Community ids are dense `0..k` and partition every node exactly once.
//! * Modularity lies in `[-1, 1]`.

use rand::Rng;

use crate::algorithms::adjacency::AdjacencyMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Agglomerative variants.
pub mod agglomerative;

/// Weighted label propagation.
pub mod label_propagation;

/// Single-level Louvain.
pub mod louvain;

/// Modularity and id normalization.
pub mod modularity;

pub use agglomerative::{Linkage, Merge};

// ============================================================================
// Algorithm Selection
// ============================================================================

/// Community detection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommunityAlgorithm {
    /// Single-level Louvain modularity optimization (default).
    #[default]
    Louvain,

    /// Weighted label propagation.
    LabelPropagation,

    /// Alias of [`CommunityAlgorithm::Louvain`].
    Leiden,

    /// Alias of [`CommunityAlgorithm::LabelPropagation`].
    Infomap,

    /// Agglomerative merging by strongest edge.
    FastGreedy,

    /// Agglomerative merging by inverse weight distance.
    Walktrap,
}

impl CommunityAlgorithm {
    /// Whether the algorithm draws from the random generator.
    pub const fn is_randomized(&self) -> bool {
        matches!(
            self,
            CommunityAlgorithm::Louvain
                | CommunityAlgorithm::Leiden
                | CommunityAlgorithm::LabelPropagation
                | CommunityAlgorithm::Infomap
        )
    }
}

// ============================================================================
// Partition
// ============================================================================

/// Raw output of a detection run.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Community id per node index.
    pub assignments: Vec<usize>,
    /// Dendrogram for agglomerative algorithms.
    pub merges: Option<Vec<Merge>>,
}

/// Partition `adjacency` with `algorithm`.
pub fn detect<R: Rng + ?Sized>(
    adjacency: &AdjacencyMatrix,
    algorithm: CommunityAlgorithm,
    resolution: f64,
    iterations: usize,
    rng: &mut R,
) -> Partition {
    match algorithm {
        CommunityAlgorithm::Louvain | CommunityAlgorithm::Leiden => Partition {
            assignments: louvain::louvain(adjacency, resolution, iterations, rng),
            merges: None,
        },
        CommunityAlgorithm::LabelPropagation | CommunityAlgorithm::Infomap => Partition {
            assignments: label_propagation::label_propagation(adjacency, iterations, rng),
            merges: None,
        },
        CommunityAlgorithm::FastGreedy => {
            let d = agglomerative::agglomerate(adjacency, Linkage::StrongestEdge, resolution);
            Partition {
                assignments: d.assignments,
                merges: Some(d.merges),
            }
        }
        CommunityAlgorithm::Walktrap => {
            let d = agglomerative::agglomerate(adjacency, Linkage::InverseWeight, resolution);
            Partition {
                assignments: d.assignments,
                merges: Some(d.merges),
            }
        }
    }
}

// ============================================================================
// Community Structure
// ============================================================================

/// Summary of a partition.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommunityStructure {
    /// Community id per node index.
    pub assignments: Vec<usize>,
    /// Modularity of the partition (resolution 1).
    pub modularity: f64,
    /// Number of nodes in each community.
    pub sizes: Vec<usize>,
    /// Node ids in each community, in node order.
    pub members: Vec<Vec<String>>,
}

impl CommunityStructure {
    /// Summarize `assignments` (dense ids) over `adjacency`.
    pub fn from_assignments(adjacency: &AdjacencyMatrix, assignments: Vec<usize>) -> Self {
        let count = assignments.iter().copied().max().map_or(0, |c| c + 1);
        let mut sizes = vec![0usize; count];
        let mut members: Vec<Vec<String>> = vec![Vec::new(); count];
        for (i, &c) in assignments.iter().enumerate() {
            sizes[c] += 1;
            members[c].push(adjacency.ids[i].clone());
        }
        let modularity = modularity::modularity(&adjacency.matrix, &assignments, 1.0);
        Self {
            assignments,
            modularity,
            sizes,
            members,
        }
    }

    /// Number of communities.
    #[inline]
    pub fn community_count(&self) -> usize {
        self.sizes.len()
    }
}
