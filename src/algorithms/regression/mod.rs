//! Predictive regression over surface points.
//!
//! ## Purpose
//!
//! This module fits closed-form models `z ≈ f(x, y)` (plane, bivariate
//! polynomial, Gaussian kernel, exponential) and evaluates them.
//!
//! ## Features
//!
//! - Regularized normal equations with an unregularized bias term.
//! - Gaussian-kernel systems for RBF and Gaussian models.
//! - Serializable fitted models.

/// Fitted model value type.
pub mod model;

/// Training.
pub mod trainer;

/// Model kinds and terms.
pub mod types;

pub use model::FittedModel;
pub use trainer::{Training, train};
pub use types::{MAX_POLYNOMIAL_DEGREE, ModelKind};
