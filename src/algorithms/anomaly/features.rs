//! Feature extraction for anomaly scoring.
//!
//! ## Purpose
//!
//! Converts graph nodes, graph links and surface points into a column-wise
//! [`FeatureTable`] that the statistical detectors scan feature by feature.
//!
//! ## Key concepts
//!
//! * **Node features**: `in_degree`, `out_degree`, `in_flow`, `out_flow`,
//!   `flow_ratio`, `centrality`, and `value` when any node carries one.
//! * **Link features**: `value`, `source_share`, `target_share`.
//! * **Point features**: `z`.
//!
//! ## Invariants
//!
//! * Every feature column has one entry per subject.
//! * Links with unknown endpoints contribute neither rows nor flows.

use std::collections::HashMap;

use crate::primitives::data::{Graph, SurfaceDataPoint, WeightField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Subjects and Tables
// ============================================================================

/// The element an anomaly refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnomalySubject {
    /// A node, by id.
    Node(String),
    /// A link, by endpoints and position in the input list.
    Link {
        /// Source node id.
        source: String,
        /// Target node id.
        target: String,
        /// Position in the input link list.
        index: usize,
    },
    /// A surface point, by position in the input list.
    Point(usize),
}

/// One named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Column name used in anomaly reasons.
    pub name: &'static str,
    /// One value per subject.
    pub values: Vec<f64>,
}

/// Column-oriented features for a list of subjects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    /// Scored elements.
    pub subjects: Vec<AnomalySubject>,
    /// Feature columns.
    pub features: Vec<Feature>,
}

impl FeatureTable {
    /// Number of subjects.
    #[inline]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Returns true when there are no subjects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Look up a column by name.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Directed degree and flow totals per node index.
struct Flows {
    in_degree: Vec<f64>,
    out_degree: Vec<f64>,
    in_flow: Vec<f64>,
    out_flow: Vec<f64>,
}

/// Valid links as `(link index, source index, target index, weight)`.
type ResolvedLink = (usize, usize, usize, f64);

fn resolve(graph: &Graph, field: &WeightField) -> Vec<ResolvedLink> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
    for (i, node) in graph.nodes.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(i);
    }
    graph
        .links
        .iter()
        .enumerate()
        .filter_map(|(li, link)| {
            let s = *index.get(link.source.as_str())?;
            let t = *index.get(link.target.as_str())?;
            Some((li, s, t, field.weight(link)))
        })
        .collect()
}

fn flows(n: usize, links: &[ResolvedLink]) -> Flows {
    let mut f = Flows {
        in_degree: vec![0.0; n],
        out_degree: vec![0.0; n],
        in_flow: vec![0.0; n],
        out_flow: vec![0.0; n],
    };
    for &(_, s, t, w) in links {
        f.out_degree[s] += 1.0;
        f.in_degree[t] += 1.0;
        f.out_flow[s] += w;
        f.in_flow[t] += w;
    }
    f
}

/// In/out flow ratio: +inf when only inflow exists, 1 when neither does.
#[inline]
pub fn flow_ratio(in_flow: f64, out_flow: f64) -> f64 {
    if out_flow > 0.0 {
        in_flow / out_flow
    } else if in_flow > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

/// Per-node features.
pub fn node_features(graph: &Graph, field: &WeightField) -> FeatureTable {
    let n = graph.nodes.len();
    if n == 0 {
        return FeatureTable::default();
    }
    let links = resolve(graph, field);
    let f = flows(n, &links);

    let flow_ratio: Vec<f64> = (0..n).map(|i| flow_ratio(f.in_flow[i], f.out_flow[i])).collect();
    let centrality: Vec<f64> = (0..n)
        .map(|i| (f.in_degree[i] + f.out_degree[i]) / (2.0 * n as f64))
        .collect();

    let mut features = vec![
        Feature {
            name: "in_degree",
            values: f.in_degree,
        },
        Feature {
            name: "out_degree",
            values: f.out_degree,
        },
        Feature {
            name: "in_flow",
            values: f.in_flow,
        },
        Feature {
            name: "out_flow",
            values: f.out_flow,
        },
        Feature {
            name: "flow_ratio",
            values: flow_ratio,
        },
        Feature {
            name: "centrality",
            values: centrality,
        },
    ];

    if graph.nodes.iter().any(|node| node.value.is_some()) {
        features.push(Feature {
            name: "value",
            values: graph
                .nodes
                .iter()
                .map(|node| node.value.unwrap_or(f64::NAN))
                .collect(),
        });
    }

    FeatureTable {
        subjects: graph
            .nodes
            .iter()
            .map(|node| AnomalySubject::Node(node.id.clone()))
            .collect(),
        features,
    }
}

/// Per-link features for links whose endpoints exist.
pub fn link_features(graph: &Graph, field: &WeightField) -> FeatureTable {
    let links = resolve(graph, field);
    if links.is_empty() {
        return FeatureTable::default();
    }
    let f = flows(graph.nodes.len(), &links);

    let mut subjects = Vec::with_capacity(links.len());
    let mut value = Vec::with_capacity(links.len());
    let mut source_share = Vec::with_capacity(links.len());
    let mut target_share = Vec::with_capacity(links.len());

    for &(li, s, t, w) in &links {
        let link = &graph.links[li];
        subjects.push(AnomalySubject::Link {
            source: link.source.clone(),
            target: link.target.clone(),
            index: li,
        });
        value.push(w);
        source_share.push(share(w, f.out_flow[s]));
        target_share.push(share(w, f.in_flow[t]));
    }

    FeatureTable {
        subjects,
        features: vec![
            Feature {
                name: "value",
                values: value,
            },
            Feature {
                name: "source_share",
                values: source_share,
            },
            Feature {
                name: "target_share",
                values: target_share,
            },
        ],
    }
}

/// Height feature of surface points.
pub fn point_features(points: &[SurfaceDataPoint]) -> FeatureTable {
    FeatureTable {
        subjects: (0..points.len()).map(AnomalySubject::Point).collect(),
        features: if points.is_empty() {
            Vec::new()
        } else {
            vec![Feature {
                name: "z",
                values: points.iter().map(|p| p.z).collect(),
            }]
        },
    }
}

#[inline]
fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total } else { 0.0 }
}
