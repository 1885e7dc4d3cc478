//! Interquartile-range detector.
//!
//! Quartiles are read at sorted ranks `floor(n/4)` and `floor(3n/4)` with no
//! interpolation. Values outside `[Q1 - k·IQR, Q3 + k·IQR]` are flagged and
//! scored by their distance beyond the violated fence, in units of IQR.

use crate::algorithms::anomaly::Anomaly;
use crate::algorithms::anomaly::features::FeatureTable;
use crate::math::stats::rank_quartiles;

/// Which fence a value crossed.
#[derive(Debug, Clone, Copy)]
enum Fence {
    Below(f64),
    Above(f64),
}

/// Flag elements outside the `k`-scaled IQR fences of any feature.
pub fn detect(table: &FeatureTable, k: f64) -> Vec<Anomaly> {
    let n = table.len();
    if n == 0 {
        return Vec::new();
    }

    let mut best: Vec<Option<(f64, usize, Fence)>> = vec![None; n];

    for (fi, feature) in table.features.iter().enumerate() {
        let Some((q1, q3)) = rank_quartiles(&feature.values) else {
            continue;
        };
        let iqr = q3 - q1;
        if !(iqr > 0.0) {
            continue;
        }
        let lower = q1 - k * iqr;
        let upper = q3 + k * iqr;

        for (i, &v) in feature.values.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let (excess, fence) = if v < lower {
                (lower - v, Fence::Below(lower))
            } else if v > upper {
                (v - upper, Fence::Above(upper))
            } else {
                continue;
            };
            let score = excess / iqr;
            if best[i].is_none_or(|(s, _, _)| score > s) {
                best[i] = Some((score, fi, fence));
            }
        }
    }

    let flagged: Vec<Anomaly> = best
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let (score, fi, fence) = entry?;
            let name = table.features[fi].name;
            let reason = match fence {
                Fence::Below(b) => format!("{name} below lower fence {b:.2}"),
                Fence::Above(b) => format!("{name} above upper fence {b:.2}"),
            };
            Some(Anomaly {
                subject: table.subjects[i].clone(),
                score,
                reason,
            })
        })
        .collect();

    log::debug!(
        "IQR flagged {} of {} elements with k = {}",
        flagged.len(),
        n,
        k
    );
    flagged
}
