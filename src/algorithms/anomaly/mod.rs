//! Statistical anomaly scoring for graphs and surface points.
//!
//! ## Purpose
//!
//! This module flags graph nodes, graph links and surface points whose
//! features deviate from the rest of the data set.
//!
//! ## Design notes
//!
//! * **Feature-wise**: every detector scans one feature column at a time and
//!   keeps each element's strongest deviation.
//! * **Ensembles**: `IsolationForest`, `Dbscan` and `Autoencoder` are served
//!   by [`ensemble`], each with its own pair of thresholds.
//! * **Fail-soft**: empty inputs, missing values and constant features yield
//!   fewer (or no) anomalies, never an error.
//!
//! ## Key concepts
//!
//! ```text
//! Graph ──► node_features ──┐
//!       └─► link_features ──┼──► zscore | iqr | ensemble ──► AnomalyReport
//! Points ─► point_features ─┘
//! ```
//!
//! ## Invariants
//!
//! * Every score is finite and `>= 0`.
//! * A subject appears at most once per report section.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Union-of-detectors ensembles.
pub mod ensemble;

/// Feature extraction.
pub mod features;

/// Interquartile-range detector.
pub mod iqr;

/// Z-score detector.
pub mod zscore;

pub use ensemble::EnsembleThresholds;
pub use features::{AnomalySubject, FeatureTable};

// ============================================================================
// Method Selection
// ============================================================================

/// Anomaly detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnomalyMethod {
    /// Max absolute z-score over features (default).
    #[default]
    ZScore,

    /// Tukey fences on the interquartile range.
    Iqr,

    /// Ensemble of z-score 2.5 and IQR 1.5.
    IsolationForest,

    /// Ensemble of z-score 3.0 and IQR 1.0.
    Dbscan,

    /// Ensemble of z-score 2.0 and IQR 3.0.
    Autoencoder,
}

impl AnomalyMethod {
    /// Fixed detector thresholds of an ensemble method.
    pub const fn ensemble_thresholds(&self) -> Option<EnsembleThresholds> {
        match self {
            AnomalyMethod::ZScore | AnomalyMethod::Iqr => None,
            AnomalyMethod::IsolationForest => Some(EnsembleThresholds { z: 2.5, iqr_k: 1.5 }),
            AnomalyMethod::Dbscan => Some(EnsembleThresholds { z: 3.0, iqr_k: 1.0 }),
            AnomalyMethod::Autoencoder => Some(EnsembleThresholds { z: 2.0, iqr_k: 3.0 }),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// One flagged element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anomaly {
    /// The flagged node, link or point.
    pub subject: AnomalySubject,
    /// Non-negative severity; larger is more anomalous.
    pub score: f64,
    /// Human-readable explanation naming the feature.
    pub reason: String,
}

/// Aggregate figures over a report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnomalyMetrics {
    /// Number of flagged elements.
    pub count: usize,
    /// Flagged elements over scored elements.
    pub ratio: f64,
    /// Mean score of flagged elements (zero when none).
    pub mean_score: f64,
}

impl AnomalyMetrics {
    /// Summarize `flagged` anomalies out of `total` scored elements.
    pub fn from_anomalies<'a>(
        flagged: impl IntoIterator<Item = &'a Anomaly>,
        total: usize,
    ) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        for a in flagged {
            count += 1;
            sum += a.score;
        }
        Self {
            count,
            ratio: if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            },
            mean_score: if count > 0 { sum / count as f64 } else { 0.0 },
        }
    }
}

/// Anomalies found in one call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnomalyReport {
    /// Flagged graph nodes.
    pub node_anomalies: Vec<Anomaly>,
    /// Flagged graph links.
    pub link_anomalies: Vec<Anomaly>,
    /// Flagged surface points.
    pub point_anomalies: Vec<Anomaly>,
    /// Aggregates over all sections.
    pub metrics: AnomalyMetrics,
    /// Method that produced the report.
    pub method: AnomalyMethod,
}

impl AnomalyReport {
    /// All anomalies across sections, nodes first.
    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.node_anomalies
            .iter()
            .chain(self.link_anomalies.iter())
            .chain(self.point_anomalies.iter())
    }

    /// Returns true when nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.metrics.count == 0
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Detector settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Method to run.
    pub method: AnomalyMethod,
    /// Z-score threshold for [`AnomalyMethod::ZScore`].
    pub threshold: f64,
    /// Fence multiplier for [`AnomalyMethod::Iqr`].
    pub iqr_multiplier: f64,
    /// Fraction of elements an ensemble may flag.
    pub contamination: f64,
}

/// Score one feature table with `params`.
pub fn score(table: &FeatureTable, params: &ScoringParams) -> Vec<Anomaly> {
    match params.method {
        AnomalyMethod::ZScore => zscore::detect(table, params.threshold),
        AnomalyMethod::Iqr => iqr::detect(table, params.iqr_multiplier),
        AnomalyMethod::IsolationForest | AnomalyMethod::Dbscan | AnomalyMethod::Autoencoder => {
            match params.method.ensemble_thresholds() {
                Some(t) => ensemble::detect(table, t, params.contamination),
                None => Vec::new(),
            }
        }
    }
}
