//! Tests for surface interpolation through the public API.
//!
//! Covers exactness at samples for every method, fallbacks, mesh layout and
//! triangulation, explicit ranges and degenerate sample sets.

use approx::assert_relative_eq;
use graphsurf::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn unit_square(z: f64) -> Vec<SurfaceDataPoint> {
    vec![
        SurfaceDataPoint::new(0.0, 0.0, z),
        SurfaceDataPoint::new(1.0, 0.0, z),
        SurfaceDataPoint::new(0.0, 1.0, z),
        SurfaceDataPoint::new(1.0, 1.0, z),
    ]
}

/// `n × n` samples of `z = f(x, y)` on an integer lattice.
fn lattice(n: usize, f: impl Fn(f64, f64) -> f64) -> Vec<SurfaceDataPoint> {
    let mut points = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f64, j as f64);
            points.push(SurfaceDataPoint::new(x, y, f(x, y)));
        }
    }
    points
}

const ALL_METHODS: [InterpolationMethod; 5] =
    [Nearest, Bilinear, Bicubic, NaturalNeighbor, Kriging];

// ============================================================================
// Point Queries
// ============================================================================

#[test]
fn test_bilinear_constant_square_centroid() {
    let surface = Surface::new().method(Bilinear).build().unwrap();
    let mut interpolator = surface.interpolator(&unit_square(5.0)).unwrap();

    let value = interpolator.interpolate_point(0.5, 0.5);
    assert_relative_eq!(value.z, 5.0, epsilon = 1e-12);
    assert!(value.fallback.is_none());
}

#[test]
fn test_every_method_is_exact_at_samples() {
    let samples = lattice(5, |x, y| (x * 0.7).sin() + y * y - 2.0 * x);
    for method in ALL_METHODS {
        for system in [Simplified, Ordinary] {
            let surface = Surface::new()
                .method(method)
                .kriging_system(system)
                .build()
                .unwrap();
            let mut interpolator = surface.interpolator(&samples).unwrap();
            for p in &samples {
                let value = interpolator.interpolate_point(p.x, p.y);
                assert_eq!(value.z, p.z, "{:?} at ({}, {})", method, p.x, p.y);
            }
        }
    }
}

#[test]
fn test_constant_field_is_reproduced_everywhere() {
    let samples = lattice(5, |_, _| 3.5);
    for method in ALL_METHODS {
        let surface = Surface::new().method(method).build().unwrap();
        let mut interpolator = surface.interpolator(&samples).unwrap();
        for &(x, y) in &[(0.5, 0.5), (1.25, 3.75), (2.9, 0.1)] {
            let value = interpolator.interpolate_point(x, y);
            assert_relative_eq!(value.z, 3.5, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_weighted_methods_stay_within_sample_range() {
    let samples = lattice(6, |x, y| x + 2.0 * y);
    for method in ALL_METHODS {
        let surface = Surface::new().method(method).build().unwrap();
        let mut interpolator = surface.interpolator(&samples).unwrap();
        for &(x, y) in &[(0.3, 0.3), (2.5, 2.5), (4.9, 1.1), (1.5, 4.5)] {
            let z = interpolator.interpolate_point(x, y).z;
            assert!((0.0..=15.0).contains(&z), "{:?} gave {}", method, z);
        }
    }
}

#[test]
fn test_nearest_returns_closest_sample() {
    let surface = Surface::new().method(Nearest).build().unwrap();
    let samples = vec![
        SurfaceDataPoint::new(0.0, 0.0, 1.0),
        SurfaceDataPoint::new(10.0, 0.0, 2.0),
    ];
    let mut interpolator = surface.interpolator(&samples).unwrap();
    assert_eq!(interpolator.interpolate_point(2.0, 1.0).z, 1.0);
    assert_eq!(interpolator.interpolate_point(8.0, -1.0).z, 2.0);
}

#[test]
fn test_bilinear_with_few_samples_falls_back_to_nearest() {
    let samples = vec![
        SurfaceDataPoint::new(0.0, 0.0, 1.0),
        SurfaceDataPoint::new(4.0, 0.0, 9.0),
    ];
    let surface = Surface::new().method(Bilinear).build().unwrap();
    let mut interpolator = surface.interpolator(&samples).unwrap();

    let value = interpolator.interpolate_point(1.0, 0.0);
    assert_eq!(value.z, 1.0);
    assert_eq!(value.fallback, Some(Nearest));
}

#[test]
fn test_bicubic_with_few_samples_falls_back_to_bilinear() {
    let surface = Surface::new().method(Bicubic).build().unwrap();
    let mut interpolator = surface.interpolator(&unit_square(2.0)).unwrap();

    let value = interpolator.interpolate_point(0.5, 0.25);
    assert_relative_eq!(value.z, 2.0, epsilon = 1e-12);
    assert_eq!(value.fallback, Some(Bilinear));
}

#[test]
fn test_kriging_off_axis_query_weights_both_samples() {
    let samples = vec![
        SurfaceDataPoint::new(0.0, 0.0, 1.0),
        SurfaceDataPoint::new(1.0, 0.0, 3.0),
    ];
    for system in [Simplified, Ordinary] {
        let surface = Surface::new()
            .method(Kriging)
            .kriging_system(system)
            .build()
            .unwrap();
        let mut interpolator = surface.interpolator(&samples).unwrap();

        let value = interpolator.interpolate_point(0.5, 2.0);
        assert_relative_eq!(value.z, 2.0, epsilon = 1e-9);
        assert!(value.fallback.is_none(), "{:?}", system);
    }
}

#[test]
fn test_interpolator_skips_non_finite_samples() {
    let mut samples = unit_square(1.0);
    samples.push(SurfaceDataPoint::new(0.5, 0.5, f64::NAN));
    samples.push(SurfaceDataPoint::new(f64::INFINITY, 0.0, 1.0));

    let surface = Surface::new().build().unwrap();
    let interpolator = surface.interpolator(&samples).unwrap();
    assert_eq!(interpolator.len(), 4);

    assert!(surface.interpolator(&[]).is_none());
}

// ============================================================================
// Meshes
// ============================================================================

#[test]
fn test_mesh_layout_is_row_major() {
    let surface = Surface::new().resolution(3).build().unwrap();
    let mesh = surface.interpolate(&unit_square(5.0));

    assert_eq!(mesh.resolution, 3);
    assert_eq!(mesh.vertices.len(), 9);
    for j in 0..3 {
        for i in 0..3 {
            let v = mesh.vertex(i, j).unwrap();
            assert_relative_eq!(v.x, i as f64 * 0.5);
            assert_relative_eq!(v.y, j as f64 * 0.5);
            assert_relative_eq!(v.z, 5.0, epsilon = 1e-12);
        }
    }
    assert!(mesh.vertex(3, 0).is_none());
}

#[test]
fn test_mesh_triangulation() {
    let mesh = Surface::new()
        .resolution(3)
        .build()
        .unwrap()
        .interpolate(&unit_square(0.0));

    assert_eq!(mesh.indices.len(), 6 * 2 * 2);
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(&mesh.indices[..6], &[0, 3, 1, 1, 3, 4]);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
}

#[test]
fn test_mesh_explicit_ranges() {
    let surface = Surface::new()
        .resolution(2)
        .x_range((-1.0, 3.0))
        .y_range(AxisRange::new(10.0, 20.0))
        .build()
        .unwrap();
    let mesh = surface.interpolate(&unit_square(1.0));

    let xs: Vec<f64> = mesh.vertices.iter().map(|v| v.x).collect();
    let ys: Vec<f64> = mesh.vertices.iter().map(|v| v.y).collect();
    assert_eq!(xs, vec![-1.0, 3.0, -1.0, 3.0]);
    assert_eq!(ys, vec![10.0, 10.0, 20.0, 20.0]);
}

#[test]
fn test_mesh_counts_fallback_vertices() {
    let mesh = Surface::new()
        .method(Bicubic)
        .resolution(3)
        .build()
        .unwrap()
        .interpolate(&unit_square(1.0));

    // Four corners coincide with samples; the rest fall back to bilinear.
    assert_eq!(mesh.fallback_count, 5);
}

#[test]
fn test_empty_samples_give_empty_mesh() {
    let surface = Surface::new().resolution(4).build().unwrap();
    let mesh = surface.interpolate(&[]);
    assert!(mesh.is_empty());
    assert!(mesh.indices.is_empty());

    let nan_only = vec![SurfaceDataPoint::new(f64::NAN, 0.0, 1.0)];
    assert!(surface.interpolate(&nan_only).is_empty());
}

#[test]
fn test_single_sample_surface_is_flat() {
    let samples = vec![SurfaceDataPoint::new(2.0, 2.0, 7.0)];
    for method in ALL_METHODS {
        let mesh = Surface::new()
            .method(method)
            .resolution(2)
            .x_range((0.0, 4.0))
            .y_range((0.0, 4.0))
            .build()
            .unwrap()
            .interpolate(&samples);
        assert_eq!(mesh.vertices.len(), 4);
        assert!(mesh.vertices.iter().all(|v| v.z == 7.0), "{:?}", method);
    }
}

// ============================================================================
// Free Function
// ============================================================================

#[test]
fn test_interpolate_surface_free_function() {
    let mesh = interpolate_surface(&unit_square(5.0), 4, Bilinear, None, None).unwrap();
    assert_eq!(mesh.vertices.len(), 16);
    assert_eq!(mesh.indices.len(), 54);

    assert_eq!(
        interpolate_surface(&unit_square(5.0), 1, Bilinear, None, None).unwrap_err(),
        AnalyticsError::InvalidGridResolution { got: 1, min: 2 }
    );
    // Rejected before any vertex is generated.
    assert_eq!(
        interpolate_surface(&unit_square(5.0), 100_000, Bilinear, None, None).unwrap_err(),
        AnalyticsError::GridResolutionTooLarge {
            got: 100_000,
            max: 65_535
        }
    );
    assert_eq!(
        interpolate_surface(
            &unit_square(5.0),
            4,
            Bilinear,
            Some(AxisRange::new(2.0, 1.0)),
            None
        )
        .unwrap_err(),
        AnalyticsError::InvalidRange { min: 2.0, max: 1.0 }
    );
}
