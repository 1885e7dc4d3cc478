//! Single-level Louvain modularity optimization.
//!
//! ## Purpose
//!
//! Greedy local moving: every node starts in its own community and is moved
//! to the neighbouring community with the largest positive modularity gain
//! until a full pass moves nothing.
//!
//! ## Design notes
//!
//! * **Single level**: communities are not aggregated into super-nodes and
//!   re-optimized; one local-moving phase runs to convergence.
//! * **Seeded order**: each pass visits nodes in an order drawn from the
//!   caller's generator, so a fixed seed gives a fixed partition.
//!
//! ## Key concepts
//!
//! Gain of inserting node `i` into community `C` (after removing it from its
//! own community):
//!
//! ```text
//! ΔQ = (k_i,in − γ·Σ_tot·k_i / 2m) / m
//! ```
//!
//! ## Invariants
//!
//! * A node only leaves its community for a strictly larger, positive gain.
//! * Returned ids are dense `0..k`.

use rand::Rng;

use crate::algorithms::adjacency::AdjacencyMatrix;
use crate::algorithms::community::modularity::renumber;
use crate::primitives::random::shuffled_indices;

/// Run single-level Louvain and return one community id per node.
pub fn louvain<R: Rng + ?Sized>(
    adjacency: &AdjacencyMatrix,
    resolution: f64,
    max_passes: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = adjacency.len();
    if n == 0 {
        return Vec::new();
    }

    let strengths = adjacency.strengths();
    let two_m = adjacency.total_weight();
    if !(two_m > 0.0) {
        return (0..n).collect();
    }
    let m = two_m / 2.0;

    let neighbors = adjacency.neighbor_lists();
    let mut community: Vec<usize> = (0..n).collect();
    let mut sigma_tot = strengths.clone();

    // Weight from the current node to each community, plus the touched list to reset it.
    let mut weight_to = vec![0.0; n];
    let mut touched: Vec<usize> = Vec::new();

    let mut passes = 0usize;
    loop {
        let mut moved = 0usize;

        for i in shuffled_indices(n, rng) {
            let ci = community[i];
            let k_i = strengths[i];

            for &c in &touched {
                weight_to[c] = 0.0;
            }
            touched.clear();
            for &(j, w) in &neighbors[i] {
                let cj = community[j];
                if !touched.contains(&cj) {
                    touched.push(cj);
                }
                weight_to[cj] += w;
            }

            sigma_tot[ci] -= k_i;

            let gain = |c: usize, w_in: f64, tot: &[f64]| {
                (w_in - resolution * tot[c] * k_i / two_m) / m
            };

            let mut best = ci;
            let mut best_gain = gain(ci, weight_to[ci], &sigma_tot);
            for &c in &touched {
                if c == ci {
                    continue;
                }
                let g = gain(c, weight_to[c], &sigma_tot);
                if g > 0.0 && g > best_gain {
                    best = c;
                    best_gain = g;
                }
            }

            sigma_tot[best] += k_i;
            community[i] = best;
            if best != ci {
                moved += 1;
            }
        }

        passes += 1;
        log::trace!("louvain pass {} moved {} nodes", passes, moved);
        if moved == 0 || passes >= max_passes {
            break;
        }
    }

    log::debug!("louvain converged after {} passes", passes);
    renumber(&community)
}
