//! Closed-form model training.
//!
//! ## Design notes
//!
//! * **Normal equations**: polynomial kinds accumulate `XᵀX` and `Xᵀz` one
//!   row at a time and add `λ` to every diagonal entry except the bias.
//! * **Kernel system**: RBF and Gaussian kinds solve `(K + λI) w = z` over
//!   the training points.
//! * **Fallback ladder**: LU inverse, then pseudo-inverse, then a constant
//!   model at the mean height. Anything below the first rung sets
//!   [`Training::used_fallback`].

use crate::algorithms::regression::model::FittedModel;
use crate::algorithms::regression::types::{ModelKind, build_terms, gaussian_kernel, num_terms};
use crate::math::linalg::{InverseMethod, Matrix, Vector, invert_detailed};
use crate::math::stats::mean;
use crate::primitives::data::SurfaceDataPoint;

/// Floor applied to heights before the exponential model takes logs.
pub const LOG_FLOOR: f64 = 1e-10;

/// Result of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    /// The fitted model.
    pub model: FittedModel,
    /// Set when the requested fit could not be solved exactly.
    pub used_fallback: bool,
}

impl Training {
    fn fallback(model: FittedModel) -> Self {
        Self {
            model,
            used_fallback: true,
        }
    }
}

/// Fit a model of `kind` to the finite entries of `points`.
pub fn train(points: &[SurfaceDataPoint], kind: ModelKind, regularization: f64) -> Training {
    let samples: Vec<SurfaceDataPoint> =
        points.iter().copied().filter(|p| p.is_finite()).collect();
    if samples.is_empty() {
        log::debug!("no finite training points, using constant zero model");
        return Training::fallback(FittedModel::constant(0.0));
    }

    match kind {
        ModelKind::Constant => Training {
            model: constant_mean(&samples),
            used_fallback: false,
        },
        ModelKind::Linear | ModelKind::Polynomial { .. } => {
            let degree = kind.degree().unwrap_or(1);
            let z: Vec<f64> = samples.iter().map(|p| p.z).collect();
            fit_polynomial(&samples, &z, kind, degree, regularization)
                .unwrap_or_else(|| Training::fallback(constant_mean(&samples)))
        }
        ModelKind::Exponential => {
            let z: Vec<f64> = samples.iter().map(|p| p.z.max(LOG_FLOOR).ln()).collect();
            fit_polynomial(&samples, &z, kind, 1, regularization)
                .unwrap_or_else(|| Training::fallback(constant_mean(&samples)))
        }
        ModelKind::Rbf { width } | ModelKind::Gaussian { width } => {
            fit_kernel(&samples, kind, width, regularization)
                .unwrap_or_else(|| Training::fallback(constant_mean(&samples)))
        }
    }
}

fn constant_mean(samples: &[SurfaceDataPoint]) -> FittedModel {
    let z: Vec<f64> = samples.iter().map(|p| p.z).collect();
    FittedModel::constant(mean(&z))
}

// ============================================================================
// Polynomial Fit
// ============================================================================

/// Accumulate `XᵀX` (row-major, `n × n`) and `Xᵀz` for polynomial terms.
pub fn accumulate_normal_equations(
    samples: &[SurfaceDataPoint],
    z: &[f64],
    degree: usize,
    xtx: &mut [f64],
    xtz: &mut [f64],
) {
    let n_coeffs = num_terms(degree);
    let mut terms = Vec::with_capacity(n_coeffs);

    for (p, &target) in samples.iter().zip(z.iter()) {
        build_terms(degree, p.x, p.y, &mut terms);
        for j in 0..n_coeffs {
            let tj = terms[j];
            for k in j..n_coeffs {
                xtx[j * n_coeffs + k] += tj * terms[k];
            }
            xtz[j] += tj * target;
        }
    }

    // Fill symmetric part
    for j in 0..n_coeffs {
        for k in 0..j {
            xtx[j * n_coeffs + k] = xtx[k * n_coeffs + j];
        }
    }
}

fn fit_polynomial(
    samples: &[SurfaceDataPoint],
    z: &[f64],
    kind: ModelKind,
    degree: usize,
    regularization: f64,
) -> Option<Training> {
    let n_coeffs = num_terms(degree);
    let mut xtx = vec![0.0; n_coeffs * n_coeffs];
    let mut xtz = vec![0.0; n_coeffs];
    accumulate_normal_equations(samples, z, degree, &mut xtx, &mut xtz);

    // The bias term stays unregularized.
    for j in 1..n_coeffs {
        xtx[j * n_coeffs + j] += regularization;
    }

    let a = Matrix::from_row_slice(n_coeffs, n_coeffs, &xtx);
    let b = Vector::from_vec(xtz);
    let (coefficients, method) = solve_with_inverse(&a, &b)?;

    Some(Training {
        model: FittedModel {
            kind,
            coefficients,
            centers: Vec::new(),
        },
        used_fallback: method != InverseMethod::Lu,
    })
}

// ============================================================================
// Kernel Fit
// ============================================================================

fn fit_kernel(
    samples: &[SurfaceDataPoint],
    kind: ModelKind,
    width: f64,
    regularization: f64,
) -> Option<Training> {
    let n = samples.len();
    let mut gram = Matrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let dx = samples[i].x - samples[j].x;
            let dy = samples[i].y - samples[j].y;
            let k = gaussian_kernel(dx * dx + dy * dy, width);
            gram[(i, j)] = k;
            gram[(j, i)] = k;
        }
        gram[(i, i)] += regularization;
    }

    let b = Vector::from_iterator(n, samples.iter().map(|p| p.z));
    let (coefficients, method) = solve_with_inverse(&gram, &b)?;

    Some(Training {
        model: FittedModel {
            kind,
            coefficients,
            centers: samples.iter().map(|p| [p.x, p.y]).collect(),
        },
        used_fallback: method != InverseMethod::Lu,
    })
}

/// `a⁻¹ · b` through the shared inverse.
fn solve_with_inverse(a: &Matrix, b: &Vector) -> Option<(Vec<f64>, InverseMethod)> {
    let inverse = invert_detailed(a)?;
    if inverse.method != InverseMethod::Lu {
        log::debug!(
            "normal equations singular ({}x{}), using pseudo-inverse",
            a.nrows(),
            a.ncols()
        );
    }
    let x = inverse.matrix * b;
    if x.iter().all(|v| v.is_finite()) {
        Some((x.iter().copied().collect(), inverse.method))
    } else {
        None
    }
}
