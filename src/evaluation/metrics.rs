//! Goodness-of-fit metrics.
//!
//! ## Key concepts
//!
//! ```text
//! R²  = 1 − RSS / TSS      (TSS = 0: 1 when RSS = 0, else 0)
//! MSE = RSS / n
//! MAE = Σ |residual| / n
//! ```
//!
//! ## Invariants
//!
//! * An empty test set yields all-zero metrics with `n = 0`.
//! * Points with a non-finite coordinate or prediction are skipped.

use core::fmt::{self, Display, Formatter};

use crate::algorithms::regression::FittedModel;
use crate::primitives::data::SurfaceDataPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fit quality of a model on a point set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelMetrics {
    /// Coefficient of determination.
    pub r2: f64,
    /// Mean squared error.
    pub mse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Number of points scored.
    pub n: usize,
}

impl ModelMetrics {
    /// Score `model` against `points`.
    pub fn evaluate(model: &FittedModel, points: &[SurfaceDataPoint]) -> Self {
        let mut actual = Vec::with_capacity(points.len());
        let mut predicted = Vec::with_capacity(points.len());
        for p in points.iter().filter(|p| p.is_finite()) {
            let z_hat = model.evaluate(p.x, p.y);
            if z_hat.is_finite() {
                actual.push(p.z);
                predicted.push(z_hat);
            }
        }
        Self::from_predictions(&actual, &predicted)
    }

    /// Metrics from aligned observed and predicted heights.
    pub fn from_predictions(actual: &[f64], predicted: &[f64]) -> Self {
        let n = actual.len().min(predicted.len());
        if n == 0 {
            return Self::default();
        }
        let nf = n as f64;
        let mean = actual[..n].iter().sum::<f64>() / nf;

        let mut rss = 0.0;
        let mut tss = 0.0;
        let mut abs = 0.0;
        for i in 0..n {
            let r = actual[i] - predicted[i];
            rss += r * r;
            abs += r.abs();
            tss += (actual[i] - mean).powi(2);
        }

        let r2 = if tss > 0.0 {
            1.0 - rss / tss
        } else if rss == 0.0 {
            1.0
        } else {
            0.0
        };

        Self {
            r2,
            mse: rss / nf,
            mae: abs / nf,
            n,
        }
    }

    /// Root mean squared error.
    #[inline]
    pub fn rmse(&self) -> f64 {
        self.mse.sqrt()
    }
}

impl Display for ModelMetrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Metrics:")?;
        writeln!(f, "  Points: {}", self.n)?;
        writeln!(f, "  R^2:    {:.6}", self.r2)?;
        writeln!(f, "  MSE:    {:.6}", self.mse)?;
        writeln!(f, "  RMSE:   {:.6}", self.rmse())?;
        write!(f, "  MAE:    {:.6}", self.mae)
    }
}
