//! # graphsurf: Graph & Surface Analytics for Rust
//!
//! Numeric analytics behind interactive graph and 3D surface dashboards:
//! community detection and anomaly scoring on weighted graphs, scattered
//! height-field interpolation onto triangulated meshes, and regression
//! models with metrics, confidence bands and forecasts.
//!
//! ## What is in the box?
//!
//! | Engine               | Input                       | Output                                  |
//! |----------------------|-----------------------------|-----------------------------------------|
//! | Community detection  | [`Graph`](prelude::Graph)   | Annotated graph, modularity, dendrogram |
//! | Anomaly scoring      | Graph or surface points     | Scored anomalies with reasons           |
//! | Surface interpolation| Scattered `(x, y, z)` points| Row-major grid mesh with triangle list  |
//! | Predictive modelling | Scattered `(x, y, z)` points| Fitted model, R², MSE, MAE              |
//!
//! All engines are **fail-soft** on data: empty graphs, empty point sets,
//! singular systems and non-finite values produce neutral results instead of
//! errors. Errors are reserved for invalid configuration, reported as
//! [`AnalyticsError`](prelude::AnalyticsError).
//!
//! ## Quick Start
//!
//! ### Communities
//!
//! ```rust
//! use graphsurf::prelude::*;
//!
//! let nodes = (0..4).map(|i| GraphNode::new(format!("n{}", i))).collect();
//! let links = vec![
//!     GraphLink::new("n0", "n1", 1.0),
//!     GraphLink::new("n2", "n3", 1.0),
//! ];
//! let graph = Graph::new(nodes, links);
//!
//! let detector = Communities::new()
//!     .algorithm(Louvain)
//!     .resolution(1.0)
//!     .seed(42)
//!     .build()?;
//!
//! let result = detector.detect(&graph);
//! assert_eq!(result.community_count(), 2);
//! println!("{}", result);
//! # Result::<(), AnalyticsError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Algorithm: Louvain
//!   Nodes: 4
//!   Communities: 2
//!   Modularity: 0.5000
//!
//! Communities:
//!     Id   Size  Members
//!   ------------------------------
//!      0      2  n0, n1
//!      1      2  n2, n3
//! ```
//!
//! ### Anomalies
//!
//! ```rust
//! use graphsurf::prelude::*;
//!
//! let mut points: Vec<SurfaceDataPoint> = (0..20)
//!     .map(|i| SurfaceDataPoint::new(i as f64, 0.0, 10.0 + 0.1 * (i % 3) as f64))
//!     .collect();
//! points.push(SurfaceDataPoint::new(20.0, 0.0, 1000.0));
//!
//! let detector = Anomalies::new().method(ZScore).threshold(3.0).build()?;
//! let report = detector.detect_points(&points);
//!
//! assert_eq!(report.metrics.count, 1);
//! # Result::<(), AnalyticsError>::Ok(())
//! ```
//!
//! ### Surfaces
//!
//! ```rust
//! use graphsurf::prelude::*;
//!
//! let samples = vec![
//!     SurfaceDataPoint::new(0.0, 0.0, 5.0),
//!     SurfaceDataPoint::new(1.0, 0.0, 5.0),
//!     SurfaceDataPoint::new(0.0, 1.0, 5.0),
//!     SurfaceDataPoint::new(1.0, 1.0, 5.0),
//! ];
//!
//! let surface = Surface::new().method(Bilinear).resolution(3).build()?;
//! let mesh = surface.interpolate(&samples);
//!
//! assert_eq!(mesh.vertices.len(), 9);
//! assert_eq!(mesh.indices.len(), 24);
//! # Result::<(), AnalyticsError>::Ok(())
//! ```
//!
//! ### Predictive Models
//!
//! ```rust
//! use graphsurf::prelude::*;
//!
//! let points: Vec<SurfaceDataPoint> = (0..25)
//!     .map(|i| {
//!         let (x, y) = ((i % 5) as f64, (i / 5) as f64);
//!         SurfaceDataPoint::new(x, y, 2.0 * x - y + 1.0)
//!     })
//!     .collect();
//!
//! let modeler = Predictor::new()
//!     .model(Linear)
//!     .confidence_level(0.95)
//!     .build()?;
//!
//! let fit = modeler.fit(&points);
//! assert!(fit.metrics.r2 > 0.999);
//!
//! let grid = generate_predictions(&fit.model, (0.0, 4.0).into(), (0.0, 4.0).into(), 5)?;
//! let bands = modeler.confidence_intervals(&fit.model, &points, &grid);
//! assert_eq!(bands.upper.len(), grid.len());
//! # Result::<(), AnalyticsError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every `build()` and free function returns `Result<_, AnalyticsError>`.
//! Setting the same builder parameter twice is an error:
//!
//! ```rust
//! use graphsurf::prelude::*;
//!
//! let err = Communities::new().resolution(1.0).resolution(2.0).build();
//! assert!(matches!(
//!     err,
//!     Err(AnalyticsError::DuplicateParameter { parameter: "resolution" })
//! ));
//! ```
//!
//! ## Parameters
//!
//! | Builder       | Parameter          | Default        | Range / Options                                   |
//! |---------------|--------------------|----------------|---------------------------------------------------|
//! | `Communities` | `algorithm`        | `Louvain`      | Louvain, Leiden, LabelPropagation, Infomap, FastGreedy, Walktrap |
//! |               | `resolution`       | 1.0            | (0, ∞)                                            |
//! |               | `iterations`       | 100            | [1, 10000]                                        |
//! |               | `weight_field`     | `Value`        | `Value`, `Attribute(name)`                        |
//! |               | `seed`             | none           | any `u64`                                         |
//! | `Anomalies`   | `method`           | `ZScore`       | ZScore, Iqr, IsolationForest, Dbscan, Autoencoder |
//! |               | `threshold`        | 3.0            | (0, ∞)                                            |
//! |               | `iqr_multiplier`   | 1.5            | (0, ∞)                                            |
//! |               | `contamination`    | 0.1            | (0, 0.5]                                          |
//! | `Surface`     | `method`           | `Bilinear`     | Nearest, Bilinear, Bicubic, NaturalNeighbor, Kriging |
//! |               | `kriging_system`   | `Simplified`   | Simplified, Ordinary                              |
//! |               | `resolution`       | 50             | [2, ∞)                                            |
//! |               | `x_range`/`y_range`| sample bounds  | finite, `min <= max`                              |
//! | `Predictor`   | `model`            | `Linear`       | Constant, Linear, Polynomial, Rbf, Gaussian, Exponential |
//! |               | `regularization`   | 1e-6           | [0, ∞)                                            |
//! |               | `confidence_level` | 0.95           | (0, 1)                                            |
//! |               | `cross_validate`   | none           | `KFold(k, &kinds)`, `LOOCV(&kinds)`               |
//!
//! ### Ensemble Anomaly Methods
//!
//! `IsolationForest`, `Dbscan` and `Autoencoder` do not train models. Each
//! is a fixed pairing of the z-score and IQR detectors whose findings are
//! merged, deduplicated by subject and truncated to the top
//! `ceil(n · contamination)` by score:
//!
//! | Method            | z threshold | IQR multiplier |
//! |-------------------|-------------|----------------|
//! | `IsolationForest` | 2.5         | 1.5            |
//! | `Dbscan`          | 3.0         | 1.0            |
//! | `Autoencoder`     | 2.0         | 3.0            |
//!
//! ### Cross-Validation
//!
//! ```rust
//! use graphsurf::prelude::*;
//!
//! let points: Vec<SurfaceDataPoint> = (0..30)
//!     .map(|i| {
//!         let x = i as f64 / 3.0;
//!         SurfaceDataPoint::new(x, 0.0, x * x)
//!     })
//!     .collect();
//!
//! let candidates = [Linear, Polynomial { degree: 2 }];
//! let fit = Predictor::new()
//!     .cross_validate(KFold(5, &candidates).seed(7))
//!     .build()?
//!     .fit(&points);
//!
//! assert_eq!(fit.model.kind, Polynomial { degree: 2 });
//! assert_eq!(fit.cv_scores.map(|s| s.len()), Some(2));
//! # Result::<(), AnalyticsError>::Ok(())
//! ```
//!
//! ## Free Functions
//!
//! Each operation is also available as a function taking an options struct:
//! [`detect_communities`](prelude::detect_communities),
//! [`detect_anomalies`](prelude::detect_anomalies),
//! [`interpolate_surface`](prelude::interpolate_surface),
//! [`create_predictive_model`](prelude::create_predictive_model),
//! [`generate_predictions`](prelude::generate_predictions),
//! [`evaluate_model`](prelude::evaluate_model),
//! [`generate_confidence_intervals`](prelude::generate_confidence_intervals)
//! and [`generate_forecast`](prelude::generate_forecast).
//!
//! ## Logging
//!
//! Fallbacks (singular systems, reduced interpolation methods, dropped
//! links) are reported through the [`log`] facade at `debug` level. Install
//! any logger to see them.
//!
//! ## References
//!
//! - Blondel, V. D. et al. (2008). "Fast unfolding of communities in large networks"
//! - Newman, M. E. J. (2006). "Modularity and community structure in networks"
//! - Matheron, G. (1963). "Principles of geostatistics"
//! - Tukey, J. W. (1977). "Exploratory Data Analysis"

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the graph and surface data model, errors, scratch buffers and
// seeded random generators.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains dense linear algebra, distances, the KD-tree neighbor search and
// descriptive statistics.
mod math;

// Layer 3: Algorithms - core analytics algorithms.
//
// Contains the adjacency builder, community detection, anomaly detectors,
// surface interpolation and model training.
mod algorithms;

// Layer 4: Evaluation - post-processing and diagnostics.
//
// Contains fit metrics (R², MSE, MAE), confidence bands, grid prediction,
// forecasting and cross-validation.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains option validation, the executor and result assembly.
mod engine;

// High-level fluent API.
//
// Provides the `Communities`, `Anomalies`, `Surface` and `Predictor`
// builders and the free functions.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard graphsurf prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use graphsurf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        AnalyticsError, Anomaly, AnomaliesBuilder as Anomalies, AnomalyDetector, AnomalyMethod,
        AnomalyMethod::{Autoencoder, Dbscan, IsolationForest, Iqr, ZScore},
        AnomalyMetrics, AnomalyOptions, AnomalyReport, AnomalySubject, AxisRange,
        CommunitiesBuilder as Communities, CommunityAlgorithm,
        CommunityAlgorithm::{FastGreedy, Infomap, LabelPropagation, Leiden, Louvain, Walktrap},
        CVConfig, CVKind, CommunityDetection, CommunityDetector, CommunityOptions,
        CommunityStructure, ConfidenceBands, CrossValidation, FittedModel, Graph, GraphLink,
        GraphNode, InterpolatedValue, InterpolationMethod, Interpolator,
        InterpolationMethod::{Bicubic, Bilinear, Kriging, NaturalNeighbor, Nearest},
        KFold, KrigingSystem,
        KrigingSystem::{Ordinary, Simplified},
        LOOCV, Merge, ModelKind,
        ModelKind::{Constant, Exponential, Gaussian, Linear, Polynomial, Rbf},
        ModelMetrics, PredictiveFit, PredictiveModeler, PredictiveOptions,
        PredictorBuilder as Predictor, SurfaceBuilder as Surface, SurfaceDataPoint,
        SurfaceInterpolator, SurfaceMesh, SurfaceOptions, WeightField,
        create_predictive_model, detect_anomalies, detect_communities, detect_point_anomalies,
        evaluate_model, generate_confidence_intervals, generate_forecast, generate_predictions,
        interpolate_surface,
    };
}

/// Dense linear algebra helpers.
///
/// Thin wrappers over `nalgebra` that return `None` instead of panicking on
/// dimension mismatches, and fall back to a pseudo-inverse for singular
/// matrices.
pub mod linalg {
    pub use crate::api::{InverseMethod, Matrix, Vector, invert, multiply, solve, transpose};
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation and diagnostics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
