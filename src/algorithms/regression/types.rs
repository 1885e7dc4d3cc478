//! Model kinds and polynomial term generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported polynomial degree.
pub const MAX_POLYNOMIAL_DEGREE: usize = 6;

// ============================================================================
// Model Kind
// ============================================================================

/// Functional form of a predictive model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModelKind {
    /// A single constant (produced only as a fallback).
    Constant,

    /// Plane `b0 + b1·x + b2·y` (default).
    #[default]
    Linear,

    /// Full bivariate polynomial of the given degree.
    Polynomial {
        /// Total degree, 1 to 6.
        degree: usize,
    },

    /// Radial basis function interpolant with Gaussian kernel width `width`.
    Rbf {
        /// Kernel width.
        width: f64,
    },

    /// Same kernel system as [`ModelKind::Rbf`]; only the mean is
    /// predicted, no posterior variance.
    Gaussian {
        /// Kernel width.
        width: f64,
    },

    /// `exp(b0 + b1·x + b2·y)`, fitted on log heights.
    Exponential,
}

impl ModelKind {
    /// Polynomial degree of the design matrix, for non-kernel kinds.
    #[inline]
    pub const fn degree(&self) -> Option<usize> {
        match self {
            ModelKind::Constant => Some(0),
            ModelKind::Linear | ModelKind::Exponential => Some(1),
            ModelKind::Polynomial { degree } => Some(*degree),
            ModelKind::Rbf { .. } | ModelKind::Gaussian { .. } => None,
        }
    }

    /// Gaussian kernel width, for kernel kinds.
    #[inline]
    pub const fn kernel_width(&self) -> Option<f64> {
        match self {
            ModelKind::Rbf { width } | ModelKind::Gaussian { width } => Some(*width),
            _ => None,
        }
    }

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            ModelKind::Constant => "constant",
            ModelKind::Linear => "linear",
            ModelKind::Polynomial { .. } => "polynomial",
            ModelKind::Rbf { .. } => "rbf",
            ModelKind::Gaussian { .. } => "gaussian",
            ModelKind::Exponential => "exponential",
        }
    }
}

// ============================================================================
// Terms
// ============================================================================

/// Number of terms `[1, x^p y^q for p + q = 1..=degree]`.
#[inline]
pub const fn num_terms(degree: usize) -> usize {
    (degree + 1) * (degree + 2) / 2
}

/// Write the polynomial terms of `(x, y)` into `out`.
///
/// Order: `1`, then for each total degree `t` the monomials
/// `x^t, x^(t-1)·y, .., y^t`.
pub fn build_terms(degree: usize, x: f64, y: f64, out: &mut Vec<f64>) {
    out.clear();
    out.push(1.0);
    for t in 1..=degree {
        for q in 0..=t {
            let p = t - q;
            out.push(x.powi(p as i32) * y.powi(q as i32));
        }
    }
}

/// Gaussian kernel `exp(-d² / 2w²)` for a squared distance `d2`.
#[inline]
pub fn gaussian_kernel(d2: f64, width: f64) -> f64 {
    (-d2 / (2.0 * width * width)).exp()
}
