//! Descriptive statistics for feature scoring and interval estimation.
//!
//! ## Purpose
//!
//! This module provides the population moments, rank-based quartiles and
//! inverse normal CDF used by the anomaly scorer and confidence bands.
//!
//! ## Design notes
//!
//! * **Finite-only**: moment functions ignore NaN and infinite values.
//! * **Rank quartiles**: `Q1 = sorted[floor(0.25 n)]`, `Q3 = sorted[floor(0.75 n)]`
//!   with no interpolation between ranks.
//!
//! ## Invariants
//!
//! * Standard deviation is always >= 0.
//! * Quartiles satisfy `Q1 <= Q3`.

use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Moments
// ============================================================================

/// Population mean and standard deviation over the finite entries of `vals`.
///
/// Returns `None` when no entry is finite.
pub fn finite_mean_std<T: Float>(vals: &[T]) -> Option<(T, T)> {
    let mut count = 0usize;
    let mut sum = T::zero();
    for &v in vals.iter().filter(|v| v.is_finite()) {
        sum = sum + v;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = T::from(count).unwrap_or_else(T::one);
    let mean = sum / n;
    let var = vals
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| (v - mean) * (v - mean))
        .fold(T::zero(), |acc, x| acc + x)
        / n;
    Some((mean, var.max(T::zero()).sqrt()))
}

/// Arithmetic mean of `vals`, zero when empty.
#[inline]
pub fn mean<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let sum = vals.iter().copied().fold(T::zero(), |a, b| a + b);
    sum / T::from(vals.len()).unwrap_or_else(T::one)
}

// ============================================================================
// Quartiles
// ============================================================================

/// Rank-based first and third quartiles of the finite entries of `vals`.
///
/// Returns `None` when no entry is finite.
pub fn rank_quartiles<T: Float>(vals: &[T]) -> Option<(T, T)> {
    let mut sorted: Vec<T> = vals.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    let n = sorted.len();
    let q1 = sorted[(n / 4).min(n - 1)];
    let q3 = sorted[(n * 3 / 4).min(n - 1)];
    Some((q1, q3))
}

// ============================================================================
// Normal Distribution
// ============================================================================

/// Inverse of the standard normal CDF (Acklam's rational approximation,
/// relative error below 1.2e-9).
///
/// Returns `-inf`/`+inf` at `p = 0`/`p = 1` and NaN outside `[0, 1]`.
pub fn normal_quantile(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Two-sided z multiplier for a confidence level, e.g. 0.95 → 1.95996.
#[inline]
pub fn two_sided_z(level: f64) -> f64 {
    normal_quantile(0.5 + level / 2.0)
}
