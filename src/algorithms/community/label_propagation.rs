//! Weighted label propagation.
//!
//! Each sweep visits nodes in a seeded random order; a node adopts the label
//! carrying the largest total edge weight among its neighbours. Ties go to
//! the label encountered first while scanning neighbours by ascending index.
//! Sweeps stop when no label changes or the iteration cap is reached.

use rand::Rng;

use crate::algorithms::adjacency::AdjacencyMatrix;
use crate::algorithms::community::modularity::renumber;
use crate::primitives::random::shuffled_indices;

/// Run label propagation and return one community id per node.
pub fn label_propagation<R: Rng + ?Sized>(
    adjacency: &AdjacencyMatrix,
    max_iterations: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = adjacency.len();
    if n == 0 {
        return Vec::new();
    }

    let neighbors = adjacency.neighbor_lists();
    let mut labels: Vec<usize> = (0..n).collect();
    let mut votes = vec![0.0; n];
    let mut seen: Vec<usize> = Vec::new();

    let mut sweeps = 0usize;
    while sweeps < max_iterations {
        sweeps += 1;
        let mut changed = false;

        for i in shuffled_indices(n, rng) {
            if neighbors[i].is_empty() {
                continue;
            }

            for &l in &seen {
                votes[l] = 0.0;
            }
            seen.clear();
            for &(j, w) in &neighbors[i] {
                let l = labels[j];
                if !seen.contains(&l) {
                    seen.push(l);
                }
                votes[l] += w;
            }

            let mut best = seen[0];
            for &l in &seen[1..] {
                if votes[l] > votes[best] {
                    best = l;
                }
            }

            if best != labels[i] {
                labels[i] = best;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    log::debug!("label propagation stopped after {} sweeps", sweeps);
    renumber(&labels)
}
