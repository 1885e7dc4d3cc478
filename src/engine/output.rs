//! Result types and their text summaries.
//!
//! ## Purpose
//!
//! This module defines the owned results returned by the top-level
//! operations and implements `Display` for them, printing a short summary
//! followed by a table.

use core::fmt::{self, Display, Formatter};

use crate::algorithms::anomaly::{AnomalyReport, AnomalySubject};
use crate::algorithms::community::{CommunityAlgorithm, CommunityStructure, Merge};
use crate::algorithms::interpolation::SurfaceMesh;
use crate::algorithms::regression::FittedModel;
use crate::evaluation::intervals::ConfidenceBands;
use crate::evaluation::metrics::ModelMetrics;
use crate::primitives::data::Graph;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows printed before a table is elided.
const MAX_ROWS: usize = 10;

// ============================================================================
// Community Detection
// ============================================================================

/// Output of community detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommunityDetection {
    /// Copy of the input graph with `community` set on every node.
    pub graph: Graph,
    /// Partition summary.
    pub structure: CommunityStructure,
    /// Dendrogram of the agglomerative algorithms.
    pub merges: Option<Vec<Merge>>,
    /// Algorithm that produced the partition.
    pub algorithm: CommunityAlgorithm,
}

impl CommunityDetection {
    /// Number of communities.
    #[inline]
    pub fn community_count(&self) -> usize {
        self.structure.community_count()
    }

    /// Modularity of the partition.
    #[inline]
    pub fn modularity(&self) -> f64 {
        self.structure.modularity
    }
}

impl Display for CommunityDetection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Algorithm: {:?}", self.algorithm)?;
        writeln!(f, "  Nodes: {}", self.graph.nodes.len())?;
        writeln!(f, "  Communities: {}", self.community_count())?;
        writeln!(f, "  Modularity: {:.4}", self.modularity())?;
        if let Some(merges) = &self.merges {
            writeln!(f, "  Merges: {}", merges.len())?;
        }
        writeln!(f)?;
        writeln!(f, "Communities:")?;
        writeln!(f, "  {:>4} {:>6}  Members", "Id", "Size")?;
        writeln!(f, "  {}", "-".repeat(30))?;
        for (c, members) in self.structure.members.iter().enumerate().take(MAX_ROWS) {
            writeln!(f, "  {:>4} {:>6}  {}", c, members.len(), members.join(", "))?;
        }
        if self.structure.members.len() > MAX_ROWS {
            writeln!(f, "  ... ({} more)", self.structure.members.len() - MAX_ROWS)?;
        }
        Ok(())
    }
}

// ============================================================================
// Anomaly Report
// ============================================================================

impl Display for AnomalySubject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AnomalySubject::Node(id) => write!(f, "node {}", id),
            AnomalySubject::Link { source, target, .. } => {
                write!(f, "link {} -> {}", source, target)
            }
            AnomalySubject::Point(i) => write!(f, "point {}", i),
        }
    }
}

impl Display for AnomalyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Method: {:?}", self.method)?;
        writeln!(f, "  Anomalies: {}", self.metrics.count)?;
        writeln!(f, "  Ratio: {:.4}", self.metrics.ratio)?;
        writeln!(f, "  Mean score: {:.4}", self.metrics.mean_score)?;
        if self.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Anomalies:")?;
        writeln!(f, "  {:>9}  {:<24} Reason", "Score", "Subject")?;
        writeln!(f, "  {}", "-".repeat(60))?;
        for a in self.iter().take(MAX_ROWS) {
            writeln!(
                f,
                "  {:>9.4}  {:<24} {}",
                a.score,
                a.subject.to_string(),
                a.reason
            )?;
        }
        if self.metrics.count > MAX_ROWS {
            writeln!(f, "  ... ({} more)", self.metrics.count - MAX_ROWS)?;
        }
        Ok(())
    }
}

// ============================================================================
// Surface Mesh
// ============================================================================

impl Display for SurfaceMesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Resolution: {0}x{0}", self.resolution)?;
        writeln!(f, "  Vertices: {}", self.vertices.len())?;
        writeln!(f, "  Triangles: {}", self.triangle_count())?;
        write!(f, "  Fallback vertices: {}", self.fallback_count)
    }
}

// ============================================================================
// Predictive Fit
// ============================================================================

/// Output of model training.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictiveFit {
    /// The fitted model.
    pub model: FittedModel,
    /// Fit quality on the training points.
    pub metrics: ModelMetrics,
    /// Set when the requested fit could not be solved exactly.
    pub used_fallback: bool,
    /// Cross-validation score per candidate, when model selection ran.
    pub cv_scores: Option<Vec<f64>>,
}

impl Display for PredictiveFit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Model: {}", self.model.kind.name())?;
        writeln!(f, "  Coefficients: {}", self.model.coefficients.len())?;
        writeln!(
            f,
            "  Fallback: {}",
            if self.used_fallback { "Applied" } else { "None" }
        )?;
        if let Some(scores) = &self.cv_scores {
            let formatted: Vec<String> = scores.iter().map(|s| format!("{:.6}", s)).collect();
            writeln!(f, "  CV scores: [{}]", formatted.join(", "))?;
        }
        writeln!(f)?;
        write!(f, "{}", self.metrics)
    }
}

// ============================================================================
// Confidence Bands
// ============================================================================

impl Display for ConfidenceBands {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Level: {}", self.level)?;
        writeln!(f, "  Multiplier: {:.5}", self.z_multiplier)?;
        writeln!(f, "  Residual SD: {:.6}", self.residual_std)?;
        writeln!(f)?;
        writeln!(f, "Bands:")?;
        writeln!(
            f,
            "  {:>10} {:>10} {:>12} {:>12}",
            "X", "Y", "Lower", "Upper"
        )?;
        writeln!(f, "  {}", "-".repeat(47))?;
        for (lo, hi) in self.lower.iter().zip(self.upper.iter()).take(MAX_ROWS) {
            writeln!(
                f,
                "  {:>10.3} {:>10.3} {:>12.5} {:>12.5}",
                lo.x, lo.y, lo.z, hi.z
            )?;
        }
        if self.lower.len() > MAX_ROWS {
            writeln!(f, "  ... ({} more)", self.lower.len() - MAX_ROWS)?;
        }
        Ok(())
    }
}
