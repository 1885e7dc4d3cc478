//! Ensemble detectors.
//!
//! ## Purpose
//!
//! The `IsolationForest`, `Dbscan` and `Autoencoder` methods are served by
//! one combiner: the union of the z-score and IQR detectors run at
//! method-specific thresholds, keeping only the most anomalous fraction.
//!
//! ## Invariants
//!
//! * Each subject appears at most once, with the highest score it received.
//! * Output is sorted by descending score.
//! * At most `ceil(n · contamination)` elements are returned.

use std::collections::HashMap;

use crate::algorithms::anomaly::features::{AnomalySubject, FeatureTable};
use crate::algorithms::anomaly::{Anomaly, iqr, zscore};

/// Detector thresholds used by one ensemble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleThresholds {
    /// Z-score threshold.
    pub z: f64,
    /// IQR fence multiplier.
    pub iqr_k: f64,
}

/// Union of z-score and IQR results, trimmed to the contamination budget.
pub fn detect(
    table: &FeatureTable,
    thresholds: EnsembleThresholds,
    contamination: f64,
) -> Vec<Anomaly> {
    let n = table.len();
    if n == 0 {
        return Vec::new();
    }

    let mut merged: Vec<Anomaly> = Vec::new();
    let mut position: HashMap<AnomalySubject, usize> = HashMap::new();

    let candidates = zscore::detect(table, thresholds.z)
        .into_iter()
        .chain(iqr::detect(table, thresholds.iqr_k));
    for anomaly in candidates {
        match position.get(&anomaly.subject) {
            Some(&p) => {
                if anomaly.score > merged[p].score {
                    merged[p] = anomaly;
                }
            }
            None => {
                position.insert(anomaly.subject.clone(), merged.len());
                merged.push(anomaly);
            }
        }
    }

    // Stable sort keeps discovery order among equal scores.
    merged.sort_by(|a, b| b.score.total_cmp(&a.score));

    let budget = (n as f64 * contamination).ceil() as usize;
    if merged.len() > budget {
        log::debug!(
            "ensemble kept {} of {} candidates (contamination {})",
            budget,
            merged.len(),
            contamination
        );
        merged.truncate(budget);
    }
    merged
}
