//! Agglomerative merging: fast-greedy and walktrap-style linkage.
//!
//! ## Purpose
//!
//! Both variants start from singleton communities and merge one pair at a
//! time, recording the dendrogram, until a single community remains (or no
//! connected pair is left). The reported partition is the dendrogram level
//! with the highest modularity.
//!
//! ## Key concepts
//!
//! * **Strongest edge** (fast-greedy): merge the pair joined by the heaviest
//!   single edge; the linkage of a merged community is the max of its parts.
//! * **Inverse weight distance** (walktrap): merge the pair minimizing
//!   `|A|·|B| / W(A, B)` where `W` is the summed inter-community weight.
//!
//! ## Invariants
//!
//! * Every merge joins two distinct live communities.
//! * Only pairs with positive connecting weight are merged.

use crate::algorithms::adjacency::AdjacencyMatrix;
use crate::algorithms::community::modularity::{modularity, renumber};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pair-selection rule for agglomerative merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Heaviest single edge between two communities.
    StrongestEdge,
    /// Smallest `|A|·|B| / W(A, B)`.
    InverseWeight,
}

/// One step of the dendrogram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Merge {
    /// Zero-based merge step.
    pub step: usize,
    /// Representative node index of the surviving community.
    pub into: usize,
    /// Representative node index of the absorbed community.
    pub absorbed: usize,
    /// Linkage value that selected the pair (edge weight or distance).
    pub linkage: f64,
    /// Modularity of the partition right after this merge.
    pub modularity: f64,
}

/// Result of an agglomerative run.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    /// Community id per node at the best-modularity level.
    pub assignments: Vec<usize>,
    /// All merges in order.
    pub merges: Vec<Merge>,
}

/// Merge communities bottom-up and cut at the best modularity.
pub fn agglomerate(adjacency: &AdjacencyMatrix, linkage: Linkage, resolution: f64) -> Dendrogram {
    let n = adjacency.len();
    if n == 0 {
        return Dendrogram {
            assignments: Vec::new(),
            merges: Vec::new(),
        };
    }

    let a = &adjacency.matrix;

    // Live communities keyed by representative index.
    let mut alive = vec![true; n];
    let mut size = vec![1usize; n];
    let mut label: Vec<usize> = (0..n).collect();
    // Strongest single edge and summed weight between communities.
    let mut strongest = a.clone();
    let mut summed = a.clone();
    for i in 0..n {
        strongest[(i, i)] = 0.0;
        summed[(i, i)] = 0.0;
    }

    let mut merges = Vec::new();
    let mut best_q = modularity(a, &label, resolution);
    let mut best_labels = label.clone();

    loop {
        let mut pick: Option<(usize, usize, f64)> = None;
        for p in (0..n).filter(|&p| alive[p]) {
            for q in ((p + 1)..n).filter(|&q| alive[q]) {
                let w = summed[(p, q)];
                if !(w > 0.0) {
                    continue;
                }
                let score = match linkage {
                    Linkage::StrongestEdge => strongest[(p, q)],
                    Linkage::InverseWeight => (size[p] * size[q]) as f64 / w,
                };
                let better = match (pick, linkage) {
                    (None, _) => true,
                    (Some((_, _, s)), Linkage::StrongestEdge) => score > s,
                    (Some((_, _, s)), Linkage::InverseWeight) => score < s,
                };
                if better {
                    pick = Some((p, q, score));
                }
            }
        }

        let Some((into, absorbed, score)) = pick else {
            break;
        };

        alive[absorbed] = false;
        size[into] += size[absorbed];
        for l in label.iter_mut() {
            if *l == absorbed {
                *l = into;
            }
        }
        for c in 0..n {
            if !alive[c] || c == into {
                continue;
            }
            let s = strongest[(into, c)].max(strongest[(absorbed, c)]);
            strongest[(into, c)] = s;
            strongest[(c, into)] = s;
            let w = summed[(into, c)] + summed[(absorbed, c)];
            summed[(into, c)] = w;
            summed[(c, into)] = w;
        }

        let q = modularity(a, &label, resolution);
        merges.push(Merge {
            step: merges.len(),
            into,
            absorbed,
            linkage: score,
            modularity: q,
        });
        if q > best_q {
            best_q = q;
            best_labels = label.clone();
        }
    }

    log::debug!(
        "agglomeration made {} merges, best modularity {:.4}",
        merges.len(),
        best_q
    );

    Dendrogram {
        assignments: renumber(&best_labels),
        merges,
    }
}
