//! Confidence bands around model predictions.
//!
//! ## Purpose
//!
//! Wraps every prediction in a symmetric band `z ± m·σ`, where `σ` is the
//! population standard deviation of the training residuals and `m` the
//! two-sided normal quantile of the requested confidence level.
//!
//! ## Invariants
//!
//! * `upper[i].z >= predictions[i].z >= lower[i].z` for every index.
//! * A non-finite residual spread collapses the band to zero width.

use crate::algorithms::regression::FittedModel;
use crate::math::stats::{finite_mean_std, two_sided_z};
use crate::primitives::data::SurfaceDataPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper and lower prediction bands.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfidenceBands {
    /// Upper band, aligned with the predictions.
    pub upper: Vec<SurfaceDataPoint>,
    /// Lower band, aligned with the predictions.
    pub lower: Vec<SurfaceDataPoint>,
    /// Two-sided confidence level.
    pub level: f64,
    /// Normal quantile applied to the residual spread.
    pub z_multiplier: f64,
    /// Population standard deviation of the training residuals.
    pub residual_std: f64,
}

/// Population standard deviation of `model`'s residuals on `training`.
pub fn residual_std(model: &FittedModel, training: &[SurfaceDataPoint]) -> f64 {
    let residuals: Vec<f64> = training
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| p.z - model.evaluate(p.x, p.y))
        .collect();
    match finite_mean_std(&residuals) {
        Some((_, std)) if std.is_finite() => std,
        _ => 0.0,
    }
}

/// Bands around `predictions` at confidence `level` (in `(0, 1)`).
pub fn confidence_bands(
    model: &FittedModel,
    training: &[SurfaceDataPoint],
    predictions: &[SurfaceDataPoint],
    level: f64,
) -> ConfidenceBands {
    let sigma = residual_std(model, training);
    let z_multiplier = two_sided_z(level);
    let half_width = if (z_multiplier * sigma).is_finite() {
        (z_multiplier * sigma).abs()
    } else {
        0.0
    };

    let shift = |p: &SurfaceDataPoint, dz: f64| SurfaceDataPoint { z: p.z + dz, ..*p };

    ConfidenceBands {
        upper: predictions.iter().map(|p| shift(p, half_width)).collect(),
        lower: predictions.iter().map(|p| shift(p, -half_width)).collect(),
        level,
        z_multiplier,
        residual_std: sigma,
    }
}
