//! Execution engine for the analytics operations.
//!
//! ## Purpose
//!
//! This module holds the option sets of every operation and the executor
//! that turns validated options plus input data into results. It is the
//! only place where the algorithm layer is wired together with evaluation.
//!
//! ## Design notes
//!
//! * **Validated options**: every option struct carries a `validate` method
//!   built on [`Validator`]; the executor assumes it has been called.
//! * **Fresh state**: each call builds its own adjacency, index or model;
//!   nothing is cached between calls.
//! * **Caller-owned randomness**: community detection draws from a `&mut R`.
//!
//! ## Non-goals
//!
//! * This module does not format results (see `output`).

use rand::Rng;

use crate::algorithms::adjacency::AdjacencyMatrix;
use crate::algorithms::anomaly::{
    self, AnomalyMethod, AnomalyMetrics, AnomalyReport, ScoringParams, features,
};
use crate::algorithms::community::{self, CommunityAlgorithm, CommunityStructure};
use crate::algorithms::interpolation::mesh::{SurfaceMesh, build_mesh, sample_bounds};
use crate::algorithms::interpolation::{InterpolationMethod, Interpolator, KrigingSystem};
use crate::algorithms::regression::{ModelKind, train};
use crate::engine::output::{CommunityDetection, PredictiveFit};
use crate::engine::validator::Validator;
use crate::evaluation::cv::CVKind;
use crate::evaluation::forecast::forecast;
use crate::evaluation::metrics::ModelMetrics;
use crate::primitives::data::{AxisRange, Graph, GraphNode, SurfaceDataPoint, WeightField};
use crate::primitives::errors::AnalyticsError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Defaults
// ============================================================================

/// Default modularity resolution.
pub const DEFAULT_RESOLUTION: f64 = 1.0;

/// Default iteration cap for Louvain passes and label propagation sweeps.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default z-score threshold.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Default IQR fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default ensemble contamination.
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Default grid vertices per axis.
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

/// Default ridge regularization.
pub const DEFAULT_REGULARIZATION: f64 = 1e-6;

/// Default two-sided confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

// ============================================================================
// Options
// ============================================================================

/// Community detection options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommunityOptions {
    /// Detection algorithm.
    pub algorithm: CommunityAlgorithm,
    /// Modularity resolution `γ`.
    pub resolution: f64,
    /// Iteration cap for the iterative algorithms.
    pub iterations: usize,
    /// Link field used as edge weight.
    pub weight_field: WeightField,
    /// Seed for the visiting order (`None` seeds from the OS).
    pub seed: Option<u64>,
}

impl Default for CommunityOptions {
    fn default() -> Self {
        Self {
            algorithm: CommunityAlgorithm::default(),
            resolution: DEFAULT_RESOLUTION,
            iterations: DEFAULT_ITERATIONS,
            weight_field: WeightField::default(),
            seed: None,
        }
    }
}

impl CommunityOptions {
    /// Check every parameter.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        Validator::validate_resolution(self.resolution)?;
        Validator::validate_iterations(self.iterations)
    }
}

/// Anomaly detection options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnomalyOptions {
    /// Detection method.
    pub method: AnomalyMethod,
    /// Z-score threshold.
    pub threshold: f64,
    /// IQR fence multiplier.
    pub iqr_multiplier: f64,
    /// Fraction of elements an ensemble may flag.
    pub contamination: f64,
    /// Link field used as edge weight.
    pub weight_field: WeightField,
}

impl Default for AnomalyOptions {
    fn default() -> Self {
        Self {
            method: AnomalyMethod::default(),
            threshold: DEFAULT_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            contamination: DEFAULT_CONTAMINATION,
            weight_field: WeightField::default(),
        }
    }
}

impl AnomalyOptions {
    /// Check every parameter.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        Validator::validate_threshold(self.threshold)?;
        Validator::validate_threshold(self.iqr_multiplier)?;
        Validator::validate_contamination(self.contamination)
    }

    fn scoring(&self) -> ScoringParams {
        ScoringParams {
            method: self.method,
            threshold: self.threshold,
            iqr_multiplier: self.iqr_multiplier,
            contamination: self.contamination,
        }
    }
}

/// Surface interpolation options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceOptions {
    /// Interpolation method.
    pub method: InterpolationMethod,
    /// Kriging weight system.
    pub kriging: KrigingSystem,
    /// Grid vertices per axis.
    pub resolution: usize,
    /// Grid x extent (default: sample bounds).
    pub x_range: Option<AxisRange>,
    /// Grid y extent (default: sample bounds).
    pub y_range: Option<AxisRange>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::default(),
            kriging: KrigingSystem::default(),
            resolution: DEFAULT_GRID_RESOLUTION,
            x_range: None,
            y_range: None,
        }
    }
}

impl SurfaceOptions {
    /// Check every parameter.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        Validator::validate_grid_resolution(self.resolution)?;
        if let Some(r) = &self.x_range {
            Validator::validate_range(r)?;
        }
        if let Some(r) = &self.y_range {
            Validator::validate_range(r)?;
        }
        Ok(())
    }
}

/// Cross-validated model selection settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrossValidation {
    /// Strategy.
    pub kind: CVKind,
    /// Candidate model kinds.
    pub candidates: Vec<ModelKind>,
    /// Fold shuffling seed.
    pub seed: Option<u64>,
}

/// Predictive model options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictiveOptions {
    /// Model kind (ignored when cross-validation is set).
    pub model: ModelKind,
    /// Ridge regularization `λ`.
    pub regularization: f64,
    /// Two-sided confidence level for bands.
    pub confidence_level: f64,
    /// Optional model selection.
    pub cross_validation: Option<CrossValidation>,
}

impl Default for PredictiveOptions {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            regularization: DEFAULT_REGULARIZATION,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            cross_validation: None,
        }
    }
}

impl PredictiveOptions {
    /// Check every parameter.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        Validator::validate_model_kind(&self.model)?;
        Validator::validate_regularization(self.regularization)?;
        Validator::validate_confidence_level(self.confidence_level)?;
        if let Some(cv) = &self.cross_validation {
            Validator::validate_cv(cv.kind, &cv.candidates)?;
        }
        Ok(())
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs operations on validated options.
pub struct Executor;

impl Executor {
    /// Partition `graph` and annotate a copy of it.
    pub fn detect_communities<R: Rng + ?Sized>(
        graph: &Graph,
        options: &CommunityOptions,
        rng: &mut R,
    ) -> CommunityDetection {
        let adjacency = AdjacencyMatrix::build(&graph.nodes, &graph.links, &options.weight_field);

        let partition = community::detect(
            &adjacency,
            options.algorithm,
            options.resolution,
            options.iterations,
            rng,
        );
        let structure = CommunityStructure::from_assignments(&adjacency, partition.assignments);

        let nodes: Vec<GraphNode> = graph
            .nodes
            .iter()
            .map(|node| {
                let mut annotated = node.clone();
                annotated.community = adjacency
                    .index
                    .get(&node.id)
                    .map(|&i| structure.assignments[i]);
                annotated
            })
            .collect();

        log::debug!(
            "{:?} found {} communities, modularity {:.4}",
            options.algorithm,
            structure.community_count(),
            structure.modularity
        );

        CommunityDetection {
            graph: Graph::new(nodes, graph.links.clone()),
            structure,
            merges: partition.merges,
            algorithm: options.algorithm,
        }
    }

    /// Score the nodes and links of `graph`.
    pub fn detect_anomalies(graph: &Graph, options: &AnomalyOptions) -> AnomalyReport {
        let params = options.scoring();
        let node_table = features::node_features(graph, &options.weight_field);
        let link_table = features::link_features(graph, &options.weight_field);

        let node_anomalies = anomaly::score(&node_table, &params);
        let link_anomalies = anomaly::score(&link_table, &params);
        // Links with unknown endpoints are never scored, so they do not count.
        let total = node_table.len() + link_table.len();
        let metrics = AnomalyMetrics::from_anomalies(
            node_anomalies.iter().chain(link_anomalies.iter()),
            total,
        );

        AnomalyReport {
            node_anomalies,
            link_anomalies,
            point_anomalies: Vec::new(),
            metrics,
            method: options.method,
        }
    }

    /// Score the heights of surface points.
    pub fn detect_point_anomalies(
        points: &[SurfaceDataPoint],
        options: &AnomalyOptions,
    ) -> AnomalyReport {
        let table = features::point_features(points);
        let point_anomalies = anomaly::score(&table, &options.scoring());
        let metrics = AnomalyMetrics::from_anomalies(point_anomalies.iter(), points.len());

        AnomalyReport {
            node_anomalies: Vec::new(),
            link_anomalies: Vec::new(),
            point_anomalies,
            metrics,
            method: options.method,
        }
    }

    /// Interpolate `points` onto a triangulated grid.
    pub fn interpolate_surface(
        points: &[SurfaceDataPoint],
        options: &SurfaceOptions,
    ) -> SurfaceMesh {
        let Some(mut interpolator) = Interpolator::new(points, options.method, options.kriging)
        else {
            return SurfaceMesh::empty(options.resolution);
        };
        let Some((bx, by)) = sample_bounds(points) else {
            return SurfaceMesh::empty(options.resolution);
        };
        let x_range = options.x_range.unwrap_or(bx);
        let y_range = options.y_range.unwrap_or(by);

        build_mesh(&mut interpolator, options.resolution, x_range, y_range)
    }

    /// Fit a predictive model, selecting its kind by cross-validation when
    /// configured.
    pub fn fit_model(points: &[SurfaceDataPoint], options: &PredictiveOptions) -> PredictiveFit {
        let (kind, cv_scores) = match &options.cross_validation {
            Some(cv) => {
                let outcome = cv
                    .kind
                    .run(points, &cv.candidates, options.regularization, cv.seed);
                (outcome.best, Some(outcome.scores))
            }
            None => (options.model, None),
        };

        let training = train(points, kind, options.regularization);
        if training.used_fallback {
            log::debug!("{} model fit used a fallback", kind.name());
        }
        let metrics = ModelMetrics::evaluate(&training.model, points);

        PredictiveFit {
            model: training.model,
            metrics,
            used_fallback: training.used_fallback,
            cv_scores,
        }
    }

    /// Fit a model to `points` and extrapolate `periods` steps along x.
    pub fn forecast(
        points: &[SurfaceDataPoint],
        periods: usize,
        options: &PredictiveOptions,
    ) -> Vec<SurfaceDataPoint> {
        let fit = Self::fit_model(points, options);
        forecast(&fit.model, points, periods)
    }
}
