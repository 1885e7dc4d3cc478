//! High-level API for graph and surface analytics.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: fluent builders for
//! each engine and one free function per operation.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called; the
//!   free functions validate their options on every call.
//! * **Fail-soft data**: errors are only returned for invalid configuration.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a builder, e.g. `Communities::new()`.
//! 2. Chain configuration methods (`.algorithm()`, `.resolution()`, etc.).
//! 3. Call `.build()` to obtain a validated engine.
//! 4. Run it on data (`.detect(&graph)`, `.interpolate(&points)`, ..).

use rand::Rng;

use crate::engine::executor::Executor;
use crate::engine::validator::Validator;
use crate::evaluation::forecast::predict_grid;
use crate::evaluation::intervals::confidence_bands;
use crate::primitives::random::rng_from_seed;

// Publicly re-exported types
pub use crate::algorithms::adjacency::AdjacencyMatrix;
pub use crate::algorithms::anomaly::{
    Anomaly, AnomalyMethod, AnomalyMetrics, AnomalyReport, AnomalySubject,
};
pub use crate::algorithms::community::{CommunityAlgorithm, CommunityStructure, Merge};
pub use crate::algorithms::interpolation::{
    InterpolatedValue, InterpolationMethod, Interpolator, KrigingSystem, SurfaceMesh,
};
pub use crate::algorithms::regression::{FittedModel, ModelKind};
pub use crate::engine::executor::{
    AnomalyOptions, CommunityOptions, CrossValidation, PredictiveOptions, SurfaceOptions,
};
pub use crate::engine::output::{CommunityDetection, PredictiveFit};
pub use crate::evaluation::cv::{CVConfig, CVKind, KFold, LOOCV};
pub use crate::evaluation::intervals::ConfidenceBands;
pub use crate::evaluation::metrics::ModelMetrics;
pub use crate::math::linalg::{InverseMethod, Matrix, Vector, invert, multiply, solve, transpose};
pub use crate::primitives::data::{
    AxisRange, Graph, GraphLink, GraphNode, SurfaceDataPoint, WeightField,
};
pub use crate::primitives::errors::AnalyticsError;

// ============================================================================
// Community Detection
// ============================================================================

/// Fluent builder for community detection.
#[derive(Debug, Clone, Default)]
pub struct CommunitiesBuilder {
    /// Detection algorithm.
    pub algorithm: Option<CommunityAlgorithm>,

    /// Modularity resolution.
    pub resolution: Option<f64>,

    /// Iteration cap.
    pub iterations: Option<usize>,

    /// Link weight field.
    pub weight_field: Option<WeightField>,

    /// Random seed.
    pub seed: Option<u64>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl CommunitiesBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detection algorithm.
    pub fn algorithm(mut self, algorithm: CommunityAlgorithm) -> Self {
        if self.algorithm.is_some() {
            self.duplicate_param = Some("algorithm");
        }
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the modularity resolution `γ` (default 1.0).
    pub fn resolution(mut self, resolution: f64) -> Self {
        if self.resolution.is_some() {
            self.duplicate_param = Some("resolution");
        }
        self.resolution = Some(resolution);
        self
    }

    /// Set the iteration cap (default 100).
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Select the link field used as edge weight.
    pub fn weight_field(mut self, field: WeightField) -> Self {
        if self.weight_field.is_some() {
            self.duplicate_param = Some("weight_field");
        }
        self.weight_field = Some(field);
        self
    }

    /// Fix the random seed for reproducible partitions.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and build the detector.
    pub fn build(self) -> Result<CommunityDetector, AnalyticsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = CommunityOptions::default();
        let options = CommunityOptions {
            algorithm: self.algorithm.unwrap_or(defaults.algorithm),
            resolution: self.resolution.unwrap_or(defaults.resolution),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            weight_field: self.weight_field.unwrap_or(defaults.weight_field),
            seed: self.seed,
        };
        options.validate()?;

        Ok(CommunityDetector { options })
    }
}

/// Validated community detector.
#[derive(Debug, Clone)]
pub struct CommunityDetector {
    options: CommunityOptions,
}

impl CommunityDetector {
    /// Partition `graph`, seeding a fresh generator from the configured seed.
    pub fn detect(&self, graph: &Graph) -> CommunityDetection {
        let mut rng = rng_from_seed(self.options.seed);
        Executor::detect_communities(graph, &self.options, &mut rng)
    }

    /// Partition `graph`, drawing randomness from `rng`.
    pub fn detect_with_rng<R: Rng + ?Sized>(
        &self,
        graph: &Graph,
        rng: &mut R,
    ) -> CommunityDetection {
        Executor::detect_communities(graph, &self.options, rng)
    }

    /// The validated options.
    pub fn options(&self) -> &CommunityOptions {
        &self.options
    }
}

// ============================================================================
// Anomaly Detection
// ============================================================================

/// Fluent builder for anomaly detection.
#[derive(Debug, Clone, Default)]
pub struct AnomaliesBuilder {
    /// Detection method.
    pub method: Option<AnomalyMethod>,

    /// Z-score threshold.
    pub threshold: Option<f64>,

    /// IQR fence multiplier.
    pub iqr_multiplier: Option<f64>,

    /// Ensemble contamination.
    pub contamination: Option<f64>,

    /// Link weight field.
    pub weight_field: Option<WeightField>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl AnomaliesBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detection method.
    pub fn method(mut self, method: AnomalyMethod) -> Self {
        if self.method.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method = Some(method);
        self
    }

    /// Set the z-score threshold (default 3.0).
    pub fn threshold(mut self, threshold: f64) -> Self {
        if self.threshold.is_some() {
            self.duplicate_param = Some("threshold");
        }
        self.threshold = Some(threshold);
        self
    }

    /// Set the IQR fence multiplier (default 1.5).
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        if self.iqr_multiplier.is_some() {
            self.duplicate_param = Some("iqr_multiplier");
        }
        self.iqr_multiplier = Some(k);
        self
    }

    /// Set the ensemble contamination (default 0.1).
    pub fn contamination(mut self, contamination: f64) -> Self {
        if self.contamination.is_some() {
            self.duplicate_param = Some("contamination");
        }
        self.contamination = Some(contamination);
        self
    }

    /// Select the link field used as edge weight.
    pub fn weight_field(mut self, field: WeightField) -> Self {
        if self.weight_field.is_some() {
            self.duplicate_param = Some("weight_field");
        }
        self.weight_field = Some(field);
        self
    }

    /// Validate the configuration and build the detector.
    pub fn build(self) -> Result<AnomalyDetector, AnalyticsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = AnomalyOptions::default();
        let options = AnomalyOptions {
            method: self.method.unwrap_or(defaults.method),
            threshold: self.threshold.unwrap_or(defaults.threshold),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            contamination: self.contamination.unwrap_or(defaults.contamination),
            weight_field: self.weight_field.unwrap_or(defaults.weight_field),
        };
        options.validate()?;

        Ok(AnomalyDetector { options })
    }
}

/// Validated anomaly detector.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    options: AnomalyOptions,
}

impl AnomalyDetector {
    /// Score the nodes and links of `graph`.
    pub fn detect(&self, graph: &Graph) -> AnomalyReport {
        Executor::detect_anomalies(graph, &self.options)
    }

    /// Score the heights of surface points.
    pub fn detect_points(&self, points: &[SurfaceDataPoint]) -> AnomalyReport {
        Executor::detect_point_anomalies(points, &self.options)
    }

    /// The validated options.
    pub fn options(&self) -> &AnomalyOptions {
        &self.options
    }
}

// ============================================================================
// Surface Interpolation
// ============================================================================

/// Fluent builder for surface interpolation.
#[derive(Debug, Clone, Default)]
pub struct SurfaceBuilder {
    /// Interpolation method.
    pub method: Option<InterpolationMethod>,

    /// Kriging weight system.
    pub kriging: Option<KrigingSystem>,

    /// Grid vertices per axis.
    pub resolution: Option<usize>,

    /// Grid x extent.
    pub x_range: Option<AxisRange>,

    /// Grid y extent.
    pub y_range: Option<AxisRange>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl SurfaceBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interpolation method (default bilinear).
    pub fn method(mut self, method: InterpolationMethod) -> Self {
        if self.method.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method = Some(method);
        self
    }

    /// Set the kriging weight system (default simplified).
    pub fn kriging_system(mut self, system: KrigingSystem) -> Self {
        if self.kriging.is_some() {
            self.duplicate_param = Some("kriging_system");
        }
        self.kriging = Some(system);
        self
    }

    /// Set the grid vertices per axis (default 50).
    pub fn resolution(mut self, resolution: usize) -> Self {
        if self.resolution.is_some() {
            self.duplicate_param = Some("resolution");
        }
        self.resolution = Some(resolution);
        self
    }

    /// Fix the grid x extent.
    pub fn x_range(mut self, range: impl Into<AxisRange>) -> Self {
        if self.x_range.is_some() {
            self.duplicate_param = Some("x_range");
        }
        self.x_range = Some(range.into());
        self
    }

    /// Fix the grid y extent.
    pub fn y_range(mut self, range: impl Into<AxisRange>) -> Self {
        if self.y_range.is_some() {
            self.duplicate_param = Some("y_range");
        }
        self.y_range = Some(range.into());
        self
    }

    /// Validate the configuration and build the interpolator.
    pub fn build(self) -> Result<SurfaceInterpolator, AnalyticsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = SurfaceOptions::default();
        let options = SurfaceOptions {
            method: self.method.unwrap_or(defaults.method),
            kriging: self.kriging.unwrap_or(defaults.kriging),
            resolution: self.resolution.unwrap_or(defaults.resolution),
            x_range: self.x_range,
            y_range: self.y_range,
        };
        options.validate()?;

        Ok(SurfaceInterpolator { options })
    }
}

/// Validated surface interpolator.
#[derive(Debug, Clone)]
pub struct SurfaceInterpolator {
    options: SurfaceOptions,
}

impl SurfaceInterpolator {
    /// Interpolate `points` onto the configured grid.
    pub fn interpolate(&self, points: &[SurfaceDataPoint]) -> SurfaceMesh {
        Executor::interpolate_surface(points, &self.options)
    }

    /// Index `points` for single-location queries.
    ///
    /// Returns `None` when no finite sample exists.
    pub fn interpolator(&self, points: &[SurfaceDataPoint]) -> Option<Interpolator> {
        Interpolator::new(points, self.options.method, self.options.kriging)
    }

    /// The validated options.
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }
}

// ============================================================================
// Predictive Models
// ============================================================================

/// Fluent builder for predictive modelling.
#[derive(Debug, Clone, Default)]
pub struct PredictorBuilder {
    /// Model kind.
    pub model: Option<ModelKind>,

    /// Ridge regularization.
    pub regularization: Option<f64>,

    /// Confidence level.
    pub confidence_level: Option<f64>,

    /// Model selection.
    pub(crate) cross_validation: Option<CrossValidation>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl PredictorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model kind (default linear).
    pub fn model(mut self, kind: ModelKind) -> Self {
        if self.model.is_some() {
            self.duplicate_param = Some("model");
        }
        self.model = Some(kind);
        self
    }

    /// Set the ridge regularization `λ` (default 1e-6).
    pub fn regularization(mut self, lambda: f64) -> Self {
        if self.regularization.is_some() {
            self.duplicate_param = Some("regularization");
        }
        self.regularization = Some(lambda);
        self
    }

    /// Set the two-sided confidence level of the bands (default 0.95).
    pub fn confidence_level(mut self, level: f64) -> Self {
        if self.confidence_level.is_some() {
            self.duplicate_param = Some("confidence_level");
        }
        self.confidence_level = Some(level);
        self
    }

    /// Select the model kind by cross-validation.
    pub fn cross_validate(mut self, config: CVConfig<'_>) -> Self {
        if self.cross_validation.is_some() {
            self.duplicate_param = Some("cross_validate");
        }
        self.cross_validation = Some(CrossValidation {
            kind: config.kind(),
            candidates: config.candidates().to_vec(),
            seed: config.seed,
        });
        self
    }

    /// Validate the configuration and build the modeler.
    pub fn build(self) -> Result<PredictiveModeler, AnalyticsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = PredictiveOptions::default();
        let options = PredictiveOptions {
            model: self.model.unwrap_or(defaults.model),
            regularization: self.regularization.unwrap_or(defaults.regularization),
            confidence_level: self.confidence_level.unwrap_or(defaults.confidence_level),
            cross_validation: self.cross_validation,
        };
        options.validate()?;

        Ok(PredictiveModeler { options })
    }
}

/// Validated predictive modeler.
#[derive(Debug, Clone)]
pub struct PredictiveModeler {
    options: PredictiveOptions,
}

impl PredictiveModeler {
    /// Fit a model to `points`.
    pub fn fit(&self, points: &[SurfaceDataPoint]) -> PredictiveFit {
        Executor::fit_model(points, &self.options)
    }

    /// Bands around `predictions` at the configured confidence level.
    pub fn confidence_intervals(
        &self,
        model: &FittedModel,
        training: &[SurfaceDataPoint],
        predictions: &[SurfaceDataPoint],
    ) -> ConfidenceBands {
        confidence_bands(model, training, predictions, self.options.confidence_level)
    }

    /// Fit a model and extrapolate `periods` steps along x.
    pub fn forecast(&self, points: &[SurfaceDataPoint], periods: usize) -> Vec<SurfaceDataPoint> {
        Executor::forecast(points, periods, &self.options)
    }

    /// The validated options.
    pub fn options(&self) -> &PredictiveOptions {
        &self.options
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Partition `graph` into communities and annotate a copy of it.
pub fn detect_communities(
    graph: &Graph,
    options: &CommunityOptions,
) -> Result<CommunityDetection, AnalyticsError> {
    options.validate()?;
    let mut rng = rng_from_seed(options.seed);
    Ok(Executor::detect_communities(graph, options, &mut rng))
}

/// Score the nodes and links of `graph`.
pub fn detect_anomalies(
    graph: &Graph,
    options: &AnomalyOptions,
) -> Result<AnomalyReport, AnalyticsError> {
    options.validate()?;
    Ok(Executor::detect_anomalies(graph, options))
}

/// Score the heights of surface points.
pub fn detect_point_anomalies(
    points: &[SurfaceDataPoint],
    options: &AnomalyOptions,
) -> Result<AnomalyReport, AnalyticsError> {
    options.validate()?;
    Ok(Executor::detect_point_anomalies(points, options))
}

/// Interpolate `points` onto a `resolution × resolution` triangulated grid.
///
/// Ranges default to the bounding box of the samples.
pub fn interpolate_surface(
    points: &[SurfaceDataPoint],
    resolution: usize,
    method: InterpolationMethod,
    x_range: Option<AxisRange>,
    y_range: Option<AxisRange>,
) -> Result<SurfaceMesh, AnalyticsError> {
    let options = SurfaceOptions {
        method,
        resolution,
        x_range,
        y_range,
        ..SurfaceOptions::default()
    };
    options.validate()?;
    Ok(Executor::interpolate_surface(points, &options))
}

/// Fit a predictive model to `points`.
pub fn create_predictive_model(
    points: &[SurfaceDataPoint],
    options: &PredictiveOptions,
) -> Result<PredictiveFit, AnalyticsError> {
    options.validate()?;
    Ok(Executor::fit_model(points, options))
}

/// Evaluate `model` on a `resolution × resolution` grid.
pub fn generate_predictions(
    model: &FittedModel,
    x_range: AxisRange,
    y_range: AxisRange,
    resolution: usize,
) -> Result<Vec<SurfaceDataPoint>, AnalyticsError> {
    Validator::validate_range(&x_range)?;
    Validator::validate_range(&y_range)?;
    Validator::validate_grid_resolution(resolution)?;
    Ok(predict_grid(model, x_range, y_range, resolution))
}

/// Score `model` against `test_points`.
pub fn evaluate_model(model: &FittedModel, test_points: &[SurfaceDataPoint]) -> ModelMetrics {
    ModelMetrics::evaluate(model, test_points)
}

/// Bands around `predictions` from the residual spread on `training`.
pub fn generate_confidence_intervals(
    model: &FittedModel,
    training: &[SurfaceDataPoint],
    predictions: &[SurfaceDataPoint],
    level: f64,
) -> Result<ConfidenceBands, AnalyticsError> {
    Validator::validate_confidence_level(level)?;
    Ok(confidence_bands(model, training, predictions, level))
}

/// Fit a model to `points` and extrapolate `periods` steps along x.
pub fn generate_forecast(
    points: &[SurfaceDataPoint],
    periods: usize,
    options: &PredictiveOptions,
) -> Result<Vec<SurfaceDataPoint>, AnalyticsError> {
    options.validate()?;
    Ok(Executor::forecast(points, periods, options))
}
