//! Error types for analytics configuration.
//!
//! ## Purpose
//!
//! This module defines [`AnalyticsError`], the single error type returned by
//! builders and the top-level functions when a *configuration* is invalid.
//!
//! ## Design notes
//!
//! * **Configuration only**: degenerate data (empty arrays, zero variance,
//!   unknown link endpoints, too few samples) never produces an error; the
//!   engines return empty results or record a fallback instead.
//! * **Comparable**: implements `Clone` and `PartialEq` so tests can match on
//!   exact variants.
//!
//! ## Non-goals
//!
//! * This module does not report numerical failures of individual fits.

use core::fmt;

/// Errors raised while validating analytics configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Modularity resolution must be positive and finite.
    InvalidResolution(f64),

    /// Iteration cap outside `[1, 10000]`.
    InvalidIterations(usize),

    /// Detection threshold must be positive and finite.
    InvalidThreshold(f64),

    /// Contamination must lie in `(0, 0.5]`.
    InvalidContamination(f64),

    /// Grid resolution below the minimum number of vertices per axis.
    InvalidGridResolution {
        /// Requested resolution.
        got: usize,
        /// Minimum accepted resolution.
        min: usize,
    },

    /// Grid resolution whose vertex count overflows `u32` mesh indices.
    GridResolutionTooLarge {
        /// Requested resolution.
        got: usize,
        /// Maximum accepted resolution.
        max: usize,
    },

    /// Axis range with `min > max` or non-finite bounds.
    InvalidRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Confidence level must lie strictly between 0 and 1.
    InvalidConfidenceLevel(f64),

    /// Regularization must be non-negative and finite.
    InvalidRegularization(f64),

    /// Kernel width must be positive and finite.
    InvalidKernelWidth(f64),

    /// Polynomial degree outside the supported range.
    InvalidPolynomialDegree(usize),

    /// K-fold cross-validation needs at least two folds.
    InvalidFolds(usize),

    /// Cross-validation was configured without candidate models.
    EmptyCandidates,

    /// A builder parameter was configured more than once.
    DuplicateParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::InvalidResolution(r) => {
                write!(f, "Invalid resolution: {} (must be > 0 and finite)", r)
            }
            AnalyticsError::InvalidIterations(n) => {
                write!(f, "Invalid iterations: {} (must be in [1, 10000])", n)
            }
            AnalyticsError::InvalidThreshold(t) => {
                write!(f, "Invalid threshold: {} (must be > 0 and finite)", t)
            }
            AnalyticsError::InvalidContamination(c) => {
                write!(f, "Invalid contamination: {} (must be > 0 and <= 0.5)", c)
            }
            AnalyticsError::InvalidGridResolution { got, min } => {
                write!(f, "Invalid grid resolution: {} (must be at least {})", got, min)
            }
            AnalyticsError::GridResolutionTooLarge { got, max } => {
                write!(f, "Grid resolution too large: {} (must be at most {})", got, max)
            }
            AnalyticsError::InvalidRange { min, max } => {
                write!(
                    f,
                    "Invalid range: [{}, {}] (bounds must be finite and min <= max)",
                    min, max
                )
            }
            AnalyticsError::InvalidConfidenceLevel(l) => {
                write!(f, "Invalid confidence level: {} (must be > 0 and < 1)", l)
            }
            AnalyticsError::InvalidRegularization(l) => {
                write!(f, "Invalid regularization: {} (must be >= 0 and finite)", l)
            }
            AnalyticsError::InvalidKernelWidth(w) => {
                write!(f, "Invalid kernel width: {} (must be > 0 and finite)", w)
            }
            AnalyticsError::InvalidPolynomialDegree(d) => {
                write!(f, "Invalid polynomial degree: {} (must be in [1, 6])", d)
            }
            AnalyticsError::InvalidFolds(k) => {
                write!(f, "Invalid number of folds: {} (must be at least 2)", k)
            }
            AnalyticsError::EmptyCandidates => {
                write!(f, "Cross-validation requires at least one candidate model")
            }
            AnalyticsError::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
        }
    }
}

impl std::error::Error for AnalyticsError {}
