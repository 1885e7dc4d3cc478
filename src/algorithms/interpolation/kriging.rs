//! Kriging weights from a heuristically fitted spherical semivariogram.
//!
//! ## Purpose
//!
//! Estimates the height at a query location as a covariance-weighted
//! average of nearby samples.
//!
//! ## Key concepts
//!
//! * **Semivariance** of a sample pair: `γ = ½ (z_i − z_j)²`.
//! * **Spherical model** with nugget `c0`, sill `s` and range `a`:
//!
//! ```text
//! γ(h) = 0                                         h = 0
//! γ(h) = c0 + (s − c0) · (1.5 h/a − 0.5 (h/a)³)     0 < h < a
//! γ(h) = s                                         h >= a
//! ```
//!
//! * **Covariance**: `C(h) = s − γ(h)`.
//! * **Heuristic fit**: `s` is the variance of the neighbour heights, `a`
//!   the largest distance among neighbours and the query padded by 10%,
//!   `c0` the smallest pair semivariance among pairs closer than `a / 3`,
//!   capped at `s / 2`.
//!
//! ## Invariants
//!
//! * Returned weights sum to one.
//! * Every neighbour lies strictly inside the range, so simplified weights
//!   are all positive whenever the heights vary.

use crate::math::distance::euclidean;
use crate::math::linalg::{InverseMethod, Matrix, Vector, invert_detailed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Factor applied to the largest observed distance to obtain the range.
const RANGE_PADDING: f64 = 1.1;

/// How kriging weights are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KrigingSystem {
    /// Covariances to the query, normalized by their sum (default).
    #[default]
    Simplified,

    /// The ordinary kriging system with a Lagrange multiplier, solved with
    /// the shared matrix inverse.
    Ordinary,
}

/// Fitted spherical semivariogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variogram {
    /// Semivariance at vanishing distance.
    pub nugget: f64,
    /// Plateau semivariance.
    pub sill: f64,
    /// Distance at which the sill is reached.
    pub range: f64,
}

impl Variogram {
    /// Fit a variogram to `neighbors` (`(x, y, z)`) around `query_distances`.
    pub fn fit(neighbors: &[(f64, f64, f64)], query_distances: &[f64]) -> Self {
        let k = neighbors.len();
        let mean = neighbors.iter().map(|p| p.2).sum::<f64>() / k.max(1) as f64;
        let sill = neighbors.iter().map(|p| (p.2 - mean).powi(2)).sum::<f64>() / k.max(1) as f64;

        let mut range = query_distances.iter().copied().fold(0.0, f64::max);
        let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for i in 0..k {
            for j in (i + 1)..k {
                let (xi, yi, zi) = neighbors[i];
                let (xj, yj, zj) = neighbors[j];
                let h = euclidean(&[xi, yi], &[xj, yj]);
                range = range.max(h);
                pairs.push((h, 0.5 * (zi - zj).powi(2)));
            }
        }

        let range = range * RANGE_PADDING;
        let nugget = pairs
            .iter()
            .filter(|(h, _)| *h < range / 3.0)
            .map(|&(_, g)| g)
            .fold(f64::INFINITY, f64::min);
        let nugget = if nugget.is_finite() {
            nugget.min(0.5 * sill)
        } else {
            0.0
        };

        Self {
            nugget,
            sill,
            range,
        }
    }

    /// Semivariance at distance `h`.
    pub fn semivariance(&self, h: f64) -> f64 {
        if h <= 0.0 {
            return 0.0;
        }
        if !(self.range > 0.0) || h >= self.range {
            return self.sill;
        }
        let r = h / self.range;
        self.nugget + (self.sill - self.nugget) * (1.5 * r - 0.5 * r * r * r)
    }

    /// Covariance at distance `h`.
    #[inline]
    pub fn covariance(&self, h: f64) -> f64 {
        self.sill - self.semivariance(h)
    }
}

/// Kriging weights for `neighbors` at distances `query_distances`.
///
/// Returns `None` when no usable weighting exists; the caller then falls
/// back to the nearest sample.
pub fn weights(
    neighbors: &[(f64, f64, f64)],
    query_distances: &[f64],
    system: KrigingSystem,
) -> Option<Vec<f64>> {
    let k = neighbors.len();
    if k == 0 {
        return None;
    }
    let variogram = Variogram::fit(neighbors, query_distances);

    // Constant heights: any normalized weighting reproduces them.
    if !(variogram.sill > 0.0) {
        return Some(vec![1.0 / k as f64; k]);
    }

    if system == KrigingSystem::Ordinary {
        match ordinary_weights(neighbors, query_distances, &variogram) {
            Some(w) => return Some(w),
            None => log::debug!("ordinary kriging system singular, using simplified weights"),
        }
    }

    simplified_weights(query_distances, &variogram)
}

fn simplified_weights(query_distances: &[f64], variogram: &Variogram) -> Option<Vec<f64>> {
    let raw: Vec<f64> = query_distances
        .iter()
        .map(|&d| variogram.covariance(d).max(0.0))
        .collect();
    let total: f64 = raw.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return None;
    }
    Some(raw.into_iter().map(|w| w / total).collect())
}

fn ordinary_weights(
    neighbors: &[(f64, f64, f64)],
    query_distances: &[f64],
    variogram: &Variogram,
) -> Option<Vec<f64>> {
    let k = neighbors.len();
    let mut a = Matrix::zeros(k + 1, k + 1);
    let mut b = Vector::zeros(k + 1);

    for i in 0..k {
        let (xi, yi, _) = neighbors[i];
        for j in 0..k {
            let (xj, yj, _) = neighbors[j];
            a[(i, j)] = variogram.semivariance(euclidean(&[xi, yi], &[xj, yj]));
        }
        a[(i, k)] = 1.0;
        a[(k, i)] = 1.0;
        b[i] = variogram.semivariance(query_distances[i]);
    }
    b[k] = 1.0;

    let inverse = invert_detailed(&a)?;
    if inverse.method != InverseMethod::Lu {
        return None;
    }
    let solution = inverse.matrix * b;
    let w: Vec<f64> = solution.iter().take(k).copied().collect();
    if w.iter().all(|v| v.is_finite()) {
        Some(w)
    } else {
        None
    }
}
