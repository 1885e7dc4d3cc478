//! Cross-validation for predictive model selection.
//!
//! ## Purpose
//!
//! This module picks the best model kind among a list of candidates by
//! k-fold or leave-one-out cross-validation on the training points.
//!
//! ## Design notes
//!
//! * **Generic Strategy**: Supports both k-fold and leave-one-out (LOOCV).
//! * **Scoring**: each candidate scores the mean test MSE over folds.
//! * **Seeded folds**: with a seed, indices are shuffled before fold
//!   assignment; without one, folds are contiguous in input order.
//!
//! ## Invariants
//!
//! * Training and test sets are disjoint in each fold.
//! * The selected kind has the lowest score (first one on ties).
//!
//! ## Non-goals
//!
//! * Tuning the regularization strength.

use crate::algorithms::regression::{ModelKind, train};
use crate::evaluation::metrics::ModelMetrics;
use crate::primitives::data::SurfaceDataPoint;
use crate::primitives::random::{rng_from_seed, shuffled_indices};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Cross-validation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CVKind {
    /// K-fold cross-validation with k folds.
    KFold(usize),
    /// Leave-one-out cross-validation.
    #[allow(clippy::upper_case_acronyms)]
    LOOCV,
}

/// Cross-validation configuration combining strategy, candidates and seed.
#[derive(Debug, Clone)]
pub struct CVConfig<'a> {
    pub(crate) kind: CVKind,
    pub(crate) candidates: &'a [ModelKind],
    pub(crate) seed: Option<u64>,
}

impl<'a> CVConfig<'a> {
    /// Set the random seed for reproducible K-Fold shuffling.
    ///
    /// LOOCV is deterministic and ignores the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Candidate model kinds.
    pub fn candidates(&self) -> &[ModelKind] {
        self.candidates
    }

    /// Strategy.
    pub fn kind(&self) -> CVKind {
        self.kind
    }
}

/// Create a K-fold cross-validation configuration.
#[allow(non_snake_case)]
pub fn KFold(k: usize, candidates: &[ModelKind]) -> CVConfig<'_> {
    CVConfig {
        kind: CVKind::KFold(k),
        candidates,
        seed: None,
    }
}

/// Create a leave-one-out cross-validation configuration.
#[allow(non_snake_case)]
pub fn LOOCV(candidates: &[ModelKind]) -> CVConfig<'_> {
    CVConfig {
        kind: CVKind::LOOCV,
        candidates,
        seed: None,
    }
}

/// Selected kind and per-candidate scores.
#[derive(Debug, Clone, PartialEq)]
pub struct CVOutcome {
    /// Lowest-scoring candidate.
    pub best: ModelKind,
    /// Mean test MSE per candidate, aligned with the candidate list.
    pub scores: Vec<f64>,
}

// ============================================================================
// Execution
// ============================================================================

impl CVKind {
    /// Score every candidate and select the best.
    pub fn run(
        self,
        points: &[SurfaceDataPoint],
        candidates: &[ModelKind],
        regularization: f64,
        seed: Option<u64>,
    ) -> CVOutcome {
        let samples: Vec<SurfaceDataPoint> =
            points.iter().copied().filter(|p| p.is_finite()).collect();
        let n = samples.len();
        let k = match self {
            CVKind::KFold(k) => k,
            CVKind::LOOCV => n,
        };

        if n < k || k < 2 {
            return CVOutcome {
                best: candidates.first().copied().unwrap_or_default(),
                scores: vec![0.0; candidates.len()],
            };
        }

        let order: Vec<usize> = match (self, seed) {
            (CVKind::KFold(_), Some(s)) => shuffled_indices(n, &mut rng_from_seed(Some(s))),
            _ => (0..n).collect(),
        };

        let scores: Vec<f64> = candidates
            .iter()
            .map(|&kind| Self::score_candidate(&samples, &order, k, kind, regularization))
            .collect();

        let best = Self::select_best(candidates, &scores);
        log::debug!("cross-validation selected {:?} from {:?}", best, scores);
        CVOutcome { best, scores }
    }

    /// Build a point subset from a list of indices into a scratch buffer.
    pub fn build_subset_inplace(
        points: &[SurfaceDataPoint],
        indices: &[usize],
        out: &mut Vec<SurfaceDataPoint>,
    ) {
        out.clear();
        out.extend(indices.iter().map(|&i| points[i]));
    }

    fn score_candidate(
        samples: &[SurfaceDataPoint],
        order: &[usize],
        k: usize,
        kind: ModelKind,
        regularization: f64,
    ) -> f64 {
        let n = order.len();
        let fold_size = n / k;
        let mut train_set = Vec::with_capacity(n);
        let mut test_set = Vec::with_capacity(fold_size + n % k);
        let mut train_idx = Vec::with_capacity(n);
        let mut total = 0.0;

        for fold in 0..k {
            let test_start = fold * fold_size;
            // Last fold includes the remainder
            let test_end = if fold == k - 1 {
                n
            } else {
                (fold + 1) * fold_size
            };

            train_idx.clear();
            train_idx.extend_from_slice(&order[..test_start]);
            train_idx.extend_from_slice(&order[test_end..]);
            Self::build_subset_inplace(samples, &train_idx, &mut train_set);
            Self::build_subset_inplace(samples, &order[test_start..test_end], &mut test_set);

            let model = train(&train_set, kind, regularization).model;
            total += ModelMetrics::evaluate(&model, &test_set).mse;
        }

        total / k as f64
    }

    fn select_best(candidates: &[ModelKind], scores: &[f64]) -> ModelKind {
        let mut best: Option<(ModelKind, f64)> = None;
        for (&kind, &score) in candidates.iter().zip(scores.iter()) {
            if !score.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((kind, score));
            }
        }
        best.map(|(kind, _)| kind)
            .or_else(|| candidates.first().copied())
            .unwrap_or_default()
    }
}
