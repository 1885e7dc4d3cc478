//! Input and output data model shared by every engine.
//!
//! ## Purpose
//!
//! This module defines the graph (`GraphNode`, `GraphLink`, `Graph`) and point
//! (`SurfaceDataPoint`) records that callers hand to the engines, and that
//! the engines hand back as annotated copies.
//!
//! ## Invariants
//!
//! * Engines never mutate caller-owned records; derived fields are written to
//!   fresh copies.
//! * Node ids are expected to be unique; when they are not, the first
//!   occurrence wins during indexing.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Graph Records
// ============================================================================

/// A vertex of the activity graph.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphNode {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional caller-defined group.
    pub group: Option<String>,

    /// Optional numeric value attached to the node.
    pub value: Option<f64>,

    /// Community assigned by community detection.
    pub community: Option<usize>,
}

impl GraphNode {
    /// Create a node whose name equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the numeric value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// A weighted connection between two nodes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphLink {
    /// Source node id.
    pub source: String,

    /// Target node id.
    pub target: String,

    /// Primary weight.
    pub value: f64,

    /// Optional display color.
    pub color: Option<String>,

    /// Optional display label.
    pub label: Option<String>,

    /// Extra named numeric fields selectable as weights.
    pub attributes: BTreeMap<String, f64>,
}

impl GraphLink {
    /// Create a link with the given weight.
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
            ..Self::default()
        }
    }

    /// Attach a named numeric attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A node/link list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Graph {
    /// Vertices.
    pub nodes: Vec<GraphNode>,

    /// Edges.
    pub links: Vec<GraphLink>,
}

impl Graph {
    /// Create a graph from its parts.
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        Self { nodes, links }
    }

    /// Returns true when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Which numeric field of a link is used as its weight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeightField {
    /// The link's `value`.
    #[default]
    Value,

    /// A named entry of the link's `attributes`.
    Attribute(String),
}

impl WeightField {
    /// Read the raw (uncoerced) weight of a link.
    pub fn raw(&self, link: &GraphLink) -> Option<f64> {
        match self {
            WeightField::Value => Some(link.value),
            WeightField::Attribute(name) => link.attributes.get(name).copied(),
        }
    }

    /// Read the weight of a link, coercing missing, non-finite or
    /// non-positive values to 1.0.
    #[inline]
    pub fn weight(&self, link: &GraphLink) -> f64 {
        match self.raw(link) {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }
}

// ============================================================================
// Surface Records
// ============================================================================

/// A sample or generated vertex of a z = f(x, y) surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceDataPoint {
    /// Horizontal coordinate.
    pub x: f64,

    /// Depth coordinate.
    pub y: f64,

    /// Height.
    pub z: f64,

    /// Set on points produced by a fitted model.
    pub predicted: bool,

    /// Set on points produced by forecasting.
    pub is_forecast: bool,
}

impl SurfaceDataPoint {
    /// Create an observed point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            predicted: false,
            is_forecast: false,
        }
    }

    /// Create a point flagged as a model prediction.
    pub const fn predicted(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            predicted: true,
            is_forecast: false,
        }
    }

    /// Returns true when all three coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Closed interval `[min, max]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisRange {
    /// Create a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Value at step `i` of `n` evenly spaced stops (`n >= 2`).
    #[inline]
    pub fn lerp_step(&self, i: usize, n: usize) -> f64 {
        if n < 2 {
            return self.min;
        }
        self.min + (self.max - self.min) * i as f64 / (n - 1) as f64
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}
