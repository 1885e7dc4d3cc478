//! Scattered-data surface interpolation.
//!
//! ## Purpose
//!
//! This module estimates `z = f(x, y)` at arbitrary locations from a set of
//! scattered samples and evaluates it over regular grids (see [`mesh`]).
//!
//! ## Design notes
//!
//! * **KD-tree**: samples are indexed once; every query is a k-nearest or
//!   fixed-radius search.
//! * **Approximations**: bilinear, bicubic and natural-neighbour methods are
//!   inverse-distance weightings over 4 neighbours, 16 neighbours and a
//!   radius neighbourhood respectively.
//! * **Typed fallback**: when a method cannot run (too few samples, empty
//!   neighbourhood, degenerate weights) the method actually used is reported
//!   in [`InterpolatedValue::fallback`].
//!
//! ## Key concepts
//!
//! * **Exact match**: a sample within `1e-10` of the query returns its `z`
//!   unchanged, for every method.
//! * **Distance clamping**: weights use `max(d, 1e-10)`.
//!
//! ## Invariants
//!
//! * Non-finite samples are ignored.
//! * Apart from ordinary kriging, results are convex combinations of sample
//!   heights.
//!
//! ## Non-goals
//!
//! * True Delaunay-based natural neighbour or spline interpolation.

use crate::math::distance::{Euclidean, MIN_DISTANCE, clamp_distance, mean_pairwise_distance};
use crate::math::neighborhood::{KDTree, Neighborhood, NodeDistance};
use crate::primitives::buffer::{NeighborSearchBuffer, WeightBuffer};
use crate::primitives::data::SurfaceDataPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kriging weights and semivariogram.
pub mod kriging;

/// Grid evaluation and triangulation.
pub mod mesh;

pub use kriging::KrigingSystem;
pub use mesh::SurfaceMesh;

const BILINEAR_NEIGHBORS: usize = 4;
const BICUBIC_NEIGHBORS: usize = 16;
const KRIGING_NEIGHBORS: usize = 12;
const NATURAL_RADIUS_FACTOR: f64 = 2.0;
const KRIGING_RADIUS_FACTOR: f64 = 3.0;

// ============================================================================
// Method Selection
// ============================================================================

/// Interpolation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterpolationMethod {
    /// Height of the closest sample.
    Nearest,

    /// Inverse-distance weighting of the 4 nearest samples (default).
    #[default]
    Bilinear,

    /// Inverse-cubed-distance weighting of the 16 nearest samples.
    Bicubic,

    /// Inverse-squared-distance weighting of samples within twice the mean
    /// sample spacing.
    NaturalNeighbor,

    /// Spherical-variogram kriging over up to 12 nearby samples.
    Kriging,
}

/// One interpolated height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterpolatedValue {
    /// Estimated height.
    pub z: f64,
    /// Method actually used when the requested one could not run.
    pub fallback: Option<InterpolationMethod>,
}

impl InterpolatedValue {
    #[inline]
    fn direct(z: f64) -> Self {
        Self { z, fallback: None }
    }

    #[inline]
    fn fell_back(z: f64, method: InterpolationMethod) -> Self {
        Self {
            z,
            fallback: Some(method),
        }
    }
}

// ============================================================================
// Interpolator
// ============================================================================

/// Indexed sample set with reusable query buffers.
#[derive(Debug, Clone)]
pub struct Interpolator {
    coords: Vec<f64>,
    heights: Vec<f64>,
    tree: KDTree<f64>,
    mean_spacing: f64,
    method: InterpolationMethod,
    kriging: KrigingSystem,
    buffer: NeighborSearchBuffer<NodeDistance<f64>>,
    neighborhood: Neighborhood<f64>,
    weights: WeightBuffer,
}

impl Interpolator {
    /// Index the finite entries of `samples`.
    ///
    /// Returns `None` when no finite sample remains.
    pub fn new(
        samples: &[SurfaceDataPoint],
        method: InterpolationMethod,
        kriging: KrigingSystem,
    ) -> Option<Self> {
        let mut coords = Vec::with_capacity(samples.len() * 2);
        let mut heights = Vec::with_capacity(samples.len());
        for p in samples.iter().filter(|p| p.is_finite()) {
            coords.push(p.x);
            coords.push(p.y);
            heights.push(p.z);
        }
        if heights.is_empty() {
            return None;
        }

        let tree = KDTree::new(&coords, 2);
        let mean_spacing = mean_pairwise_distance(&coords);
        log::trace!(
            "indexed {} samples, mean spacing {:.4}",
            heights.len(),
            mean_spacing
        );

        Some(Self {
            coords,
            heights,
            tree,
            mean_spacing,
            method,
            kriging,
            buffer: NeighborSearchBuffer::new(BICUBIC_NEIGHBORS),
            neighborhood: Neighborhood::with_capacity(BICUBIC_NEIGHBORS),
            weights: WeightBuffer::with_capacity(BICUBIC_NEIGHBORS),
        })
    }

    /// Number of indexed samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns true when no samples are indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Configured method.
    #[inline]
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Mean pairwise distance between samples.
    #[inline]
    pub fn mean_spacing(&self) -> f64 {
        self.mean_spacing
    }

    /// Estimate the height at `(x, y)`.
    pub fn interpolate_point(&mut self, x: f64, y: f64) -> InterpolatedValue {
        let (nearest_z, nearest_d) = self.nearest(x, y);
        if nearest_d <= MIN_DISTANCE {
            return InterpolatedValue::direct(nearest_z);
        }

        match self.method {
            InterpolationMethod::Nearest => InterpolatedValue::direct(nearest_z),
            InterpolationMethod::Bilinear => self.bilinear(x, y, nearest_z),
            InterpolationMethod::Bicubic => self.bicubic(x, y, nearest_z),
            InterpolationMethod::NaturalNeighbor => self.natural_neighbor(x, y, nearest_z),
            InterpolationMethod::Kriging => self.kriging(x, y, nearest_z),
        }
    }

    // ------------------------------------------------------------------------
    // Methods
    // ------------------------------------------------------------------------

    fn bilinear(&mut self, x: f64, y: f64, nearest_z: f64) -> InterpolatedValue {
        if self.len() < BILINEAR_NEIGHBORS {
            return InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest);
        }
        self.search_k(x, y, BILINEAR_NEIGHBORS);
        match self.inverse_distance_mean(1) {
            Some(z) => InterpolatedValue::direct(z),
            None => InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest),
        }
    }

    fn bicubic(&mut self, x: f64, y: f64, nearest_z: f64) -> InterpolatedValue {
        if self.len() < BICUBIC_NEIGHBORS {
            let v = self.bilinear(x, y, nearest_z);
            return InterpolatedValue::fell_back(
                v.z,
                v.fallback.unwrap_or(InterpolationMethod::Bilinear),
            );
        }
        self.search_k(x, y, BICUBIC_NEIGHBORS);
        match self.inverse_distance_mean(3) {
            Some(z) => InterpolatedValue::direct(z),
            None => InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest),
        }
    }

    fn natural_neighbor(&mut self, x: f64, y: f64, nearest_z: f64) -> InterpolatedValue {
        let radius = NATURAL_RADIUS_FACTOR * self.mean_spacing;
        self.tree.find_within_radius(
            &[x, y],
            radius,
            &Euclidean,
            &mut self.buffer,
            &mut self.neighborhood,
        );
        if self.neighborhood.is_empty() {
            return InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest);
        }
        match self.inverse_distance_mean(2) {
            Some(z) => InterpolatedValue::direct(z),
            None => InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest),
        }
    }

    fn kriging(&mut self, x: f64, y: f64, nearest_z: f64) -> InterpolatedValue {
        let radius = KRIGING_RADIUS_FACTOR * self.mean_spacing;
        self.search_k(x, y, KRIGING_NEIGHBORS);

        let mut neighbors = Vec::with_capacity(self.neighborhood.len());
        let mut distances = Vec::with_capacity(self.neighborhood.len());
        for (idx, d) in self.neighborhood.iter() {
            if d <= radius {
                neighbors.push((self.coords[2 * idx], self.coords[2 * idx + 1], self.heights[idx]));
                distances.push(d);
            }
        }

        let Some(w) = kriging::weights(&neighbors, &distances, self.kriging) else {
            return InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest);
        };
        let z: f64 = w.iter().zip(neighbors.iter()).map(|(w, p)| w * p.2).sum();
        if z.is_finite() {
            InterpolatedValue::direct(z)
        } else {
            InterpolatedValue::fell_back(nearest_z, InterpolationMethod::Nearest)
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn nearest(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.search_k(x, y, 1);
        match self.neighborhood.iter().next() {
            Some((idx, d)) => (self.heights[idx], d),
            None => (f64::NAN, f64::INFINITY),
        }
    }

    fn search_k(&mut self, x: f64, y: f64, k: usize) {
        self.tree.find_k_nearest(
            &[x, y],
            k,
            &Euclidean,
            &mut self.buffer,
            &mut self.neighborhood,
        );
    }

    /// Weighted mean of the current neighbourhood with weights `1 / d^power`.
    fn inverse_distance_mean(&mut self, power: i32) -> Option<f64> {
        self.weights.clear();
        for (idx, d) in self.neighborhood.iter() {
            self.weights
                .push(1.0 / clamp_distance(d).powi(power), self.heights[idx]);
        }
        self.weights.weighted_mean()
    }
}
