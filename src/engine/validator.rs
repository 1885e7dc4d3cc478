//! Validation of analytics configuration.
//!
//! ## Purpose
//!
//! This module checks every user-facing parameter (resolutions, iteration
//! caps, thresholds, ranges, model settings) before any engine runs.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Configuration only**: data is never rejected here; degenerate data is
//!   handled by the engines themselves.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

use crate::algorithms::regression::{MAX_POLYNOMIAL_DEGREE, ModelKind};
use crate::evaluation::cv::CVKind;
use crate::primitives::data::AxisRange;
use crate::primitives::errors::AnalyticsError;

/// Maximum iteration cap for the iterative community algorithms.
pub const MAX_ITERATIONS: usize = 10_000;

/// Minimum grid resolution (vertices per axis).
pub const MIN_GRID_RESOLUTION: usize = 2;

/// Maximum grid resolution; `r²` vertex indices must fit in a `u32`.
pub const MAX_GRID_RESOLUTION: usize = 65_535;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for analytics configuration.
///
/// Provides static methods for validating each parameter. All methods return
/// `Result<(), AnalyticsError>` and fail fast upon the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Community Detection
    // ========================================================================

    /// Validate the modularity resolution.
    pub fn validate_resolution(resolution: f64) -> Result<(), AnalyticsError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(AnalyticsError::InvalidResolution(resolution));
        }
        Ok(())
    }

    /// Validate the iteration cap.
    pub fn validate_iterations(iterations: usize) -> Result<(), AnalyticsError> {
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(AnalyticsError::InvalidIterations(iterations));
        }
        Ok(())
    }

    // ========================================================================
    // Anomaly Detection
    // ========================================================================

    /// Validate a detection threshold or fence multiplier.
    pub fn validate_threshold(threshold: f64) -> Result<(), AnalyticsError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AnalyticsError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    /// Validate the contamination fraction.
    pub fn validate_contamination(contamination: f64) -> Result<(), AnalyticsError> {
        if !contamination.is_finite() || contamination <= 0.0 || contamination > 0.5 {
            return Err(AnalyticsError::InvalidContamination(contamination));
        }
        Ok(())
    }

    // ========================================================================
    // Surfaces
    // ========================================================================

    /// Validate the number of grid vertices per axis.
    pub fn validate_grid_resolution(resolution: usize) -> Result<(), AnalyticsError> {
        if resolution < MIN_GRID_RESOLUTION {
            return Err(AnalyticsError::InvalidGridResolution {
                got: resolution,
                min: MIN_GRID_RESOLUTION,
            });
        }
        if resolution > MAX_GRID_RESOLUTION {
            return Err(AnalyticsError::GridResolutionTooLarge {
                got: resolution,
                max: MAX_GRID_RESOLUTION,
            });
        }
        Ok(())
    }

    /// Validate an axis range.
    pub fn validate_range(range: &AxisRange) -> Result<(), AnalyticsError> {
        if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
            return Err(AnalyticsError::InvalidRange {
                min: range.min,
                max: range.max,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Predictive Models
    // ========================================================================

    /// Validate a model kind's parameters.
    pub fn validate_model_kind(kind: &ModelKind) -> Result<(), AnalyticsError> {
        match *kind {
            ModelKind::Polynomial { degree } => {
                if degree == 0 || degree > MAX_POLYNOMIAL_DEGREE {
                    return Err(AnalyticsError::InvalidPolynomialDegree(degree));
                }
            }
            ModelKind::Rbf { width } | ModelKind::Gaussian { width } => {
                if !width.is_finite() || width <= 0.0 {
                    return Err(AnalyticsError::InvalidKernelWidth(width));
                }
            }
            ModelKind::Constant | ModelKind::Linear | ModelKind::Exponential => {}
        }
        Ok(())
    }

    /// Validate the ridge regularization strength.
    pub fn validate_regularization(lambda: f64) -> Result<(), AnalyticsError> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(AnalyticsError::InvalidRegularization(lambda));
        }
        Ok(())
    }

    /// Validate a two-sided confidence level.
    pub fn validate_confidence_level(level: f64) -> Result<(), AnalyticsError> {
        if !level.is_finite() || level <= 0.0 || level >= 1.0 {
            return Err(AnalyticsError::InvalidConfidenceLevel(level));
        }
        Ok(())
    }

    /// Validate a cross-validation strategy and its candidates.
    pub fn validate_cv(kind: CVKind, candidates: &[ModelKind]) -> Result<(), AnalyticsError> {
        if let CVKind::KFold(k) = kind {
            if k < 2 {
                return Err(AnalyticsError::InvalidFolds(k));
            }
        }
        if candidates.is_empty() {
            return Err(AnalyticsError::EmptyCandidates);
        }
        for kind in candidates {
            Self::validate_model_kind(kind)?;
        }
        Ok(())
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), AnalyticsError> {
        if let Some(param) = duplicate_param {
            return Err(AnalyticsError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
