//! Tests for builder configuration and parameter validation.

use graphsurf::prelude::*;

// ============================================================================
// Duplicate Parameters
// ============================================================================

#[test]
fn test_duplicate_parameters_are_rejected() {
    let dup = |parameter| AnalyticsError::DuplicateParameter { parameter };

    assert_eq!(
        Communities::new().seed(1).seed(2).build().unwrap_err(),
        dup("seed")
    );
    assert_eq!(
        Communities::new()
            .algorithm(Louvain)
            .algorithm(Walktrap)
            .build()
            .unwrap_err(),
        dup("algorithm")
    );
    assert_eq!(
        Anomalies::new()
            .contamination(0.1)
            .contamination(0.2)
            .build()
            .unwrap_err(),
        dup("contamination")
    );
    assert_eq!(
        Surface::new().x_range((0.0, 1.0)).x_range((0.0, 2.0)).build().unwrap_err(),
        dup("x_range")
    );
    assert_eq!(
        Predictor::new()
            .cross_validate(LOOCV(&[Linear]))
            .cross_validate(LOOCV(&[Constant]))
            .build()
            .unwrap_err(),
        dup("cross_validate")
    );
}

#[test]
fn test_duplicate_check_runs_before_value_checks() {
    let err = Anomalies::new().threshold(-1.0).threshold(-2.0).build().unwrap_err();
    assert_eq!(
        err,
        AnalyticsError::DuplicateParameter {
            parameter: "threshold"
        }
    );
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_builder_defaults() {
    let communities = Communities::new().build().unwrap();
    assert_eq!(communities.options(), &CommunityOptions::default());
    assert_eq!(communities.options().algorithm, Louvain);
    assert_eq!(communities.options().resolution, 1.0);
    assert_eq!(communities.options().iterations, 100);

    let anomalies = Anomalies::new().build().unwrap();
    assert_eq!(anomalies.options().method, ZScore);
    assert_eq!(anomalies.options().threshold, 3.0);
    assert_eq!(anomalies.options().iqr_multiplier, 1.5);
    assert_eq!(anomalies.options().contamination, 0.1);

    let surface = Surface::new().build().unwrap();
    assert_eq!(surface.options().method, Bilinear);
    assert_eq!(surface.options().kriging, Simplified);
    assert_eq!(surface.options().resolution, 50);
    assert!(surface.options().x_range.is_none());

    let predictor = Predictor::new().build().unwrap();
    assert_eq!(predictor.options().model, Linear);
    assert_eq!(predictor.options().regularization, 1e-6);
    assert_eq!(predictor.options().confidence_level, 0.95);
    assert!(predictor.options().cross_validation.is_none());
}

// ============================================================================
// Value Checks
// ============================================================================

#[test]
fn test_community_parameter_ranges() {
    assert_eq!(
        Communities::new().resolution(0.0).build().unwrap_err(),
        AnalyticsError::InvalidResolution(0.0)
    );
    assert!(Communities::new().resolution(f64::NAN).build().is_err());
    assert_eq!(
        Communities::new().iterations(0).build().unwrap_err(),
        AnalyticsError::InvalidIterations(0)
    );
    assert_eq!(
        Communities::new().iterations(10_001).build().unwrap_err(),
        AnalyticsError::InvalidIterations(10_001)
    );
    assert!(Communities::new().iterations(10_000).build().is_ok());
}

#[test]
fn test_anomaly_parameter_ranges() {
    assert_eq!(
        Anomalies::new().threshold(0.0).build().unwrap_err(),
        AnalyticsError::InvalidThreshold(0.0)
    );
    assert!(Anomalies::new().iqr_multiplier(-1.5).build().is_err());
    assert_eq!(
        Anomalies::new().contamination(0.0).build().unwrap_err(),
        AnalyticsError::InvalidContamination(0.0)
    );
    assert!(Anomalies::new().contamination(0.5).build().is_ok());
    assert!(Anomalies::new().contamination(0.51).build().is_err());
}

#[test]
fn test_surface_parameter_ranges() {
    assert_eq!(
        Surface::new().resolution(1).build().unwrap_err(),
        AnalyticsError::InvalidGridResolution { got: 1, min: 2 }
    );
    assert!(Surface::new().resolution(2).build().is_ok());
    assert!(Surface::new().resolution(65_535).build().is_ok());
    assert_eq!(
        Surface::new().resolution(65_536).build().unwrap_err(),
        AnalyticsError::GridResolutionTooLarge {
            got: 65_536,
            max: 65_535
        }
    );
    assert_eq!(
        Surface::new().y_range((5.0, 4.0)).build().unwrap_err(),
        AnalyticsError::InvalidRange { min: 5.0, max: 4.0 }
    );
    assert!(Surface::new().x_range((f64::NEG_INFINITY, 0.0)).build().is_err());
    // A degenerate range is accepted.
    assert!(Surface::new().x_range((2.0, 2.0)).build().is_ok());
}

#[test]
fn test_predictor_parameter_ranges() {
    assert_eq!(
        Predictor::new().model(Polynomial { degree: 0 }).build().unwrap_err(),
        AnalyticsError::InvalidPolynomialDegree(0)
    );
    assert!(Predictor::new().model(Polynomial { degree: 6 }).build().is_ok());
    assert!(Predictor::new().model(Polynomial { degree: 7 }).build().is_err());
    assert_eq!(
        Predictor::new().model(Rbf { width: 0.0 }).build().unwrap_err(),
        AnalyticsError::InvalidKernelWidth(0.0)
    );
    assert!(Predictor::new().model(Gaussian { width: f64::INFINITY }).build().is_err());
    assert_eq!(
        Predictor::new().regularization(-1e-3).build().unwrap_err(),
        AnalyticsError::InvalidRegularization(-1e-3)
    );
    assert!(Predictor::new().regularization(0.0).build().is_ok());
    assert_eq!(
        Predictor::new().confidence_level(0.0).build().unwrap_err(),
        AnalyticsError::InvalidConfidenceLevel(0.0)
    );
}

#[test]
fn test_options_validate_directly() {
    let options = PredictiveOptions {
        cross_validation: Some(CrossValidation {
            kind: CVKind::KFold(0),
            candidates: vec![Linear],
            seed: None,
        }),
        ..PredictiveOptions::default()
    };
    assert_eq!(options.validate().unwrap_err(), AnalyticsError::InvalidFolds(0));
    assert_eq!(
        create_predictive_model(&[], &options).unwrap_err(),
        AnalyticsError::InvalidFolds(0)
    );

    let surface = SurfaceOptions {
        resolution: 0,
        ..SurfaceOptions::default()
    };
    assert!(surface.validate().is_err());
}

#[test]
fn test_errors_are_displayable() {
    let err = Communities::new().iterations(0).build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid iterations: 0 (must be in [1, 10000])"
    );
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(!boxed.to_string().is_empty());
}
