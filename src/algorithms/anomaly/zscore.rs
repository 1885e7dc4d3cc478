//! Z-score detector.
//!
//! Each feature is standardized with its population mean and standard
//! deviation over finite values. An element scores the largest `|z|` it
//! reaches on any feature and is flagged when that score exceeds the
//! threshold. Features with zero variance carry no signal and are skipped.

use crate::algorithms::anomaly::Anomaly;
use crate::algorithms::anomaly::features::FeatureTable;
use crate::math::stats::finite_mean_std;

/// Flag elements whose max `|z|` exceeds `threshold`, in subject order.
pub fn detect(table: &FeatureTable, threshold: f64) -> Vec<Anomaly> {
    let n = table.len();
    if n == 0 {
        return Vec::new();
    }

    // (score, feature index) of the strongest deviation per subject.
    let mut best: Vec<Option<(f64, usize)>> = vec![None; n];

    for (fi, feature) in table.features.iter().enumerate() {
        let Some((mean, std)) = finite_mean_std(&feature.values) else {
            continue;
        };
        if !(std > 0.0) || !std.is_finite() {
            continue;
        }
        for (i, &v) in feature.values.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let z = ((v - mean) / std).abs();
            if best[i].is_none_or(|(s, _)| z > s) {
                best[i] = Some((z, fi));
            }
        }
    }

    let mut flagged = Vec::new();
    for (i, entry) in best.into_iter().enumerate() {
        let Some((score, fi)) = entry else {
            continue;
        };
        if score > threshold {
            flagged.push(Anomaly {
                subject: table.subjects[i].clone(),
                score,
                reason: format!(
                    "{} z-score {:.2} exceeds {:.2}",
                    table.features[fi].name, score, threshold
                ),
            });
        }
    }

    log::debug!(
        "z-score flagged {} of {} elements at threshold {}",
        flagged.len(),
        n,
        threshold
    );
    flagged
}
