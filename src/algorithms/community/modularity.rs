//! Newman–Girvan modularity and community id normalization.

use crate::math::linalg::Matrix;

/// Modularity of a partition over the full adjacency matrix.
///
/// ```text
/// Q = (1 / 2m) Σ_ij [A_ij − γ·k_i·k_j / 2m] · 1(c_i = c_j)
/// ```
///
/// Computed per community as `Σ_c [in_c / 2m − γ·(tot_c / 2m)²]`.
/// Returns 0 for graphs without edges; the result is clamped into [−1, 1].
pub fn modularity(adjacency: &Matrix, communities: &[usize], resolution: f64) -> f64 {
    let n = adjacency.nrows();
    if n == 0 || communities.len() != n {
        return 0.0;
    }
    let two_m = adjacency.sum();
    if !(two_m > 0.0) {
        return 0.0;
    }

    let k = communities.iter().copied().max().map_or(0, |c| c + 1);
    let mut internal = vec![0.0; k];
    let mut total = vec![0.0; k];

    for i in 0..n {
        let ci = communities[i];
        for j in 0..n {
            let a = adjacency[(i, j)];
            if a == 0.0 {
                continue;
            }
            total[ci] += a;
            if communities[j] == ci {
                internal[ci] += a;
            }
        }
    }

    let q: f64 = internal
        .iter()
        .zip(total.iter())
        .map(|(&inner, &tot)| inner / two_m - resolution * (tot / two_m) * (tot / two_m))
        .sum();

    q.clamp(-1.0, 1.0)
}

/// Relabel community ids to a dense `0..k` range in order of first appearance.
pub fn renumber(communities: &[usize]) -> Vec<usize> {
    let mut mapping: Vec<Option<usize>> = Vec::new();
    let mut next = 0usize;
    communities
        .iter()
        .map(|&c| {
            if c >= mapping.len() {
                mapping.resize(c + 1, None);
            }
            *mapping[c].get_or_insert_with(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}
