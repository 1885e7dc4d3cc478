//! Planar distances for scattered surface samples.
//!
//! ## Purpose
//!
//! This module provides Euclidean distance on `(x, y)` coordinates, the
//! division-safe clamp used by every inverse-distance weight, and the mean
//! pairwise sample distance that sizes the natural-neighbour and kriging
//! search radii.
//!
//! ## Invariants
//!
//! * Distance is always non-negative.
//! * `clamp_distance` never returns a value below `MIN_DISTANCE`.

use num_traits::Float;

use crate::math::neighborhood::PointDistance;

/// Smallest distance used as a divisor.
pub const MIN_DISTANCE: f64 = 1e-10;

// ============================================================================
// Distance Functions
// ============================================================================

/// Euclidean distance between two points of equal dimension.
#[inline]
pub fn euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    squared_euclidean(a, b).sqrt()
}

/// Squared Euclidean distance between two points of equal dimension.
#[inline]
pub fn squared_euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
    a.iter()
        .zip(b.iter())
        .map(|(&ai, &bi)| {
            let diff = ai - bi;
            diff * diff
        })
        .fold(T::zero(), |acc, x| acc + x)
}

/// Clamp a distance away from zero before it is used as a divisor.
#[inline]
pub fn clamp_distance(d: f64) -> f64 {
    d.max(MIN_DISTANCE)
}

/// Mean of all pairwise distances between points stored as flat `[x0, y0, x1, y1, ..]`.
///
/// Returns zero for fewer than two points.
pub fn mean_pairwise_distance(coords: &[f64]) -> f64 {
    let n = coords.len() / 2;
    if n < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..n {
        let a = &coords[2 * i..2 * i + 2];
        for j in (i + 1)..n {
            total += euclidean(a, &coords[2 * j..2 * j + 2]);
            pairs += 1;
        }
    }
    total / pairs as f64
}

// ============================================================================
// KD-tree Adapter
// ============================================================================

/// Euclidean metric for KD-tree searches (compares squared distances).
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl<T: Float> PointDistance<T> for Euclidean {
    #[inline]
    fn distance_squared(&self, a: &[T], b: &[T]) -> T {
        squared_euclidean(a, b)
    }

    #[inline]
    fn split_distance_squared(&self, _dim: usize, split_val: T, query_val: T) -> T {
        let d = query_val - split_val;
        d * d
    }

    #[inline]
    fn post_process_distance(&self, d: T) -> T {
        d.sqrt()
    }
}
