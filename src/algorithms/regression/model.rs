//! Fitted model value type.

use crate::algorithms::regression::types::{ModelKind, build_terms, gaussian_kernel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable fitted model `z = f(x, y)`.
///
/// For polynomial kinds `coefficients` follows the term order of
/// [`build_terms`]; for kernel kinds it holds one weight per entry of
/// `centers`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FittedModel {
    /// Functional form.
    pub kind: ModelKind,
    /// Term or kernel weights.
    pub coefficients: Vec<f64>,
    /// Kernel centers `[x, y]` (empty for polynomial kinds).
    pub centers: Vec<[f64; 2]>,
}

impl FittedModel {
    /// A model that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            kind: ModelKind::Constant,
            coefficients: vec![value],
            centers: Vec::new(),
        }
    }

    /// Evaluate the model at `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        match self.kind {
            ModelKind::Rbf { width } | ModelKind::Gaussian { width } => self
                .centers
                .iter()
                .zip(self.coefficients.iter())
                .map(|(c, w)| {
                    let dx = x - c[0];
                    let dy = y - c[1];
                    w * gaussian_kernel(dx * dx + dy * dy, width)
                })
                .sum(),
            ModelKind::Exponential => self.polynomial(1, x, y).exp(),
            ModelKind::Constant => self.coefficients.first().copied().unwrap_or(0.0),
            ModelKind::Linear => self.polynomial(1, x, y),
            ModelKind::Polynomial { degree } => self.polynomial(degree, x, y),
        }
    }

    fn polynomial(&self, degree: usize, x: f64, y: f64) -> f64 {
        let mut terms = Vec::with_capacity(self.coefficients.len());
        build_terms(degree, x, y, &mut terms);
        terms
            .iter()
            .zip(self.coefficients.iter())
            .map(|(t, c)| t * c)
            .sum()
    }
}
