//! Regular-grid evaluation and triangulation.
//!
//! ## Key concepts
//!
//! Vertices are stored row-major: vertex `(i, j)` (column `i` along x, row
//! `j` along y) lives at `j·r + i`. Each grid cell with corners
//!
//! ```text
//! c ─ d      a = j·r + i    b = a + 1
//! │ ╲ │      c = a + r      d = c + 1
//! a ─ b
//! ```
//!
//! emits the triangles `(a, c, b)` and `(b, c, d)`, which share a winding.
//!
//! ## Invariants
//!
//! * `vertices.len() == r²` and `indices.len() == 6·(r − 1)²` for non-empty
//!   meshes.

use crate::algorithms::interpolation::Interpolator;
use crate::primitives::data::{AxisRange, SurfaceDataPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangulated grid surface.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// Row-major grid vertices.
    pub vertices: Vec<SurfaceDataPoint>,
    /// Triangle list, three vertex indices per triangle.
    pub indices: Vec<u32>,
    /// Vertices per axis.
    pub resolution: usize,
    /// Number of vertices evaluated with a fallback method.
    pub fallback_count: usize,
}

impl SurfaceMesh {
    /// Mesh with no vertices.
    pub fn empty(resolution: usize) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Returns true when the mesh holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex at column `i`, row `j`.
    pub fn vertex(&self, i: usize, j: usize) -> Option<&SurfaceDataPoint> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.vertices.get(j * self.resolution + i)
    }
}

/// Default axis ranges: the bounding box of the finite samples.
pub fn sample_bounds(samples: &[SurfaceDataPoint]) -> Option<(AxisRange, AxisRange)> {
    let mut finite = samples.iter().filter(|p| p.is_finite());
    let first = finite.next()?;
    let init = (first.x, first.x, first.y, first.y);
    let (x0, x1, y0, y1) = finite.fold(init, |(x0, x1, y0, y1), p| {
        (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y))
    });
    Some((AxisRange::new(x0, x1), AxisRange::new(y0, y1)))
}

/// Evaluate `interpolator` on an `r × r` grid spanning `x_range × y_range`.
pub fn build_mesh(
    interpolator: &mut Interpolator,
    resolution: usize,
    x_range: AxisRange,
    y_range: AxisRange,
) -> SurfaceMesh {
    let r = resolution;
    let mut vertices = Vec::with_capacity(r * r);
    let mut fallback_count = 0usize;

    for j in 0..r {
        let y = y_range.lerp_step(j, r);
        for i in 0..r {
            let x = x_range.lerp_step(i, r);
            let value = interpolator.interpolate_point(x, y);
            if value.fallback.is_some() {
                fallback_count += 1;
            }
            vertices.push(SurfaceDataPoint::new(x, y, value.z));
        }
    }

    if fallback_count > 0 {
        log::debug!(
            "{} of {} vertices used a fallback method",
            fallback_count,
            r * r
        );
    }

    SurfaceMesh {
        vertices,
        indices: grid_indices(r),
        resolution: r,
        fallback_count,
    }
}

/// Triangle indices of an `r × r` grid.
pub fn grid_indices(resolution: usize) -> Vec<u32> {
    let r = resolution;
    if r < 2 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity(6 * (r - 1) * (r - 1));
    for j in 0..r - 1 {
        for i in 0..r - 1 {
            let a = (j * r + i) as u32;
            let b = a + 1;
            let c = a + r as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    indices
}
