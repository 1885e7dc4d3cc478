#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use graphsurf::internals::algorithms::interpolation::kriging::{KrigingSystem, Variogram, weights};

/// Two samples one unit apart with heights 0 and 2.
const PAIR: [(f64, f64, f64); 2] = [(0.0, 0.0, 0.0), (1.0, 0.0, 2.0)];

// ============================================================================
// Variogram
// ============================================================================

#[test]
fn test_variogram_fit() {
    let v = Variogram::fit(&PAIR, &[0.5, 0.5]);
    assert_relative_eq!(v.sill, 1.0);
    // Largest distance padded by 10%.
    assert_relative_eq!(v.range, 1.1);
    // The only pair is not closer than range / 3.
    assert_eq!(v.nugget, 0.0);
}

#[test]
fn test_variogram_range_covers_query_distances() {
    let v = Variogram::fit(&PAIR, &[4.0, 3.0]);
    assert_relative_eq!(v.range, 4.4);
    assert!(v.covariance(4.0) > 0.0);
}

#[test]
fn test_spherical_semivariance() {
    let v = Variogram {
        nugget: 0.0,
        sill: 1.0,
        range: 1.0,
    };
    assert_eq!(v.semivariance(0.0), 0.0);
    assert_relative_eq!(v.semivariance(0.5), 0.6875);
    assert_eq!(v.semivariance(1.0), 1.0);
    assert_eq!(v.semivariance(5.0), 1.0);
    assert_relative_eq!(v.covariance(0.5), 0.3125);
}

#[test]
fn test_semivariance_without_range_is_sill() {
    let v = Variogram {
        nugget: 0.1,
        sill: 2.0,
        range: 0.0,
    };
    assert_eq!(v.semivariance(0.3), 2.0);
}

// ============================================================================
// Weights
// ============================================================================

#[test]
fn test_symmetric_query_gets_equal_weights() {
    for system in [KrigingSystem::Simplified, KrigingSystem::Ordinary] {
        let w = weights(&PAIR, &[0.5, 0.5], system).unwrap();
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_simplified_weights_favour_close_samples() {
    let w = weights(&PAIR, &[0.0, 1.0], KrigingSystem::Simplified).unwrap();
    assert!(w[0] > 0.95);
    assert!(w[1] > 0.0);
    assert_relative_eq!(w[0] + w[1], 1.0, epsilon = 1e-12);
}

#[test]
fn test_farthest_neighbours_keep_positive_weight() {
    // Both samples are farther from the query than from each other.
    let d = (0.5f64 * 0.5 + 2.0 * 2.0).sqrt();
    let w = weights(&PAIR, &[d, d], KrigingSystem::Simplified).unwrap();
    assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(w[1], 0.5, epsilon = 1e-12);
}

#[test]
fn test_constant_heights_get_uniform_weights() {
    let flat = [(0.0, 0.0, 3.0), (1.0, 0.0, 3.0), (0.0, 1.0, 3.0), (1.0, 1.0, 3.0)];
    let w = weights(&flat, &[0.1, 0.9, 0.9, 1.2], KrigingSystem::Ordinary).unwrap();
    assert!(w.iter().all(|&x| x == 0.25));
}

#[test]
fn test_no_neighbours_no_weights() {
    assert!(weights(&[], &[], KrigingSystem::Simplified).is_none());
}

#[test]
fn test_default_system_is_simplified() {
    assert_eq!(KrigingSystem::default(), KrigingSystem::Simplified);
}
