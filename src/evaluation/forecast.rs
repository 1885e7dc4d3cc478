//! Grid predictions and forecasts from a fitted model.
//!
//! A forecast assumes a uniform step along x, taken from the last two
//! x-ordered samples, and holds y at the last observed value.

use core::cmp::Ordering::Equal;

use crate::algorithms::regression::FittedModel;
use crate::primitives::data::{AxisRange, SurfaceDataPoint};

/// Step used when the samples do not define one.
pub const DEFAULT_STEP: f64 = 1.0;

/// Evaluate `model` on an `r × r` grid, row-major, flagged `predicted`.
pub fn predict_grid(
    model: &FittedModel,
    x_range: AxisRange,
    y_range: AxisRange,
    resolution: usize,
) -> Vec<SurfaceDataPoint> {
    let r = resolution;
    let mut out = Vec::with_capacity(r * r);
    for j in 0..r {
        let y = y_range.lerp_step(j, r);
        for i in 0..r {
            let x = x_range.lerp_step(i, r);
            out.push(SurfaceDataPoint::predicted(x, y, model.evaluate(x, y)));
        }
    }
    out
}

/// Extrapolate `periods` steps past the last sample along x.
pub fn forecast(
    model: &FittedModel,
    points: &[SurfaceDataPoint],
    periods: usize,
) -> Vec<SurfaceDataPoint> {
    let mut sorted: Vec<SurfaceDataPoint> =
        points.iter().copied().filter(|p| p.is_finite()).collect();
    if sorted.is_empty() || periods == 0 {
        return Vec::new();
    }
    sorted.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Equal));

    let n = sorted.len();
    let last = sorted[n - 1];
    let step = if n >= 2 {
        let d = last.x - sorted[n - 2].x;
        if d > 0.0 && d.is_finite() { d } else { DEFAULT_STEP }
    } else {
        DEFAULT_STEP
    };
    log::trace!("forecasting {} periods with step {}", periods, step);

    (1..=periods)
        .map(|k| {
            let x = last.x + k as f64 * step;
            SurfaceDataPoint {
                x,
                y: last.y,
                z: model.evaluate(x, last.y),
                predicted: true,
                is_forecast: true,
            }
        })
        .collect()
}
