#![cfg(feature = "dev")]

use graphsurf::internals::primitives::errors::AnalyticsError;

#[test]
fn test_error_messages() {
    let cases = [
        (
            AnalyticsError::InvalidResolution(-1.0),
            "Invalid resolution: -1 (must be > 0 and finite)",
        ),
        (
            AnalyticsError::InvalidContamination(0.9),
            "Invalid contamination: 0.9 (must be > 0 and <= 0.5)",
        ),
        (
            AnalyticsError::InvalidGridResolution { got: 1, min: 2 },
            "Invalid grid resolution: 1 (must be at least 2)",
        ),
        (
            AnalyticsError::GridResolutionTooLarge {
                got: 70_000,
                max: 65_535,
            },
            "Grid resolution too large: 70000 (must be at most 65535)",
        ),
        (
            AnalyticsError::InvalidRange { min: 3.0, max: 1.0 },
            "Invalid range: [3, 1] (bounds must be finite and min <= max)",
        ),
        (
            AnalyticsError::InvalidPolynomialDegree(7),
            "Invalid polynomial degree: 7 (must be in [1, 6])",
        ),
        (
            AnalyticsError::InvalidFolds(1),
            "Invalid number of folds: 1 (must be at least 2)",
        ),
        (
            AnalyticsError::EmptyCandidates,
            "Cross-validation requires at least one candidate model",
        ),
        (
            AnalyticsError::DuplicateParameter { parameter: "seed" },
            "Parameter 'seed' was set multiple times. Each parameter can only be configured once.",
        ),
    ];
    for (err, msg) in cases {
        assert_eq!(err.to_string(), msg);
    }
}

#[test]
fn test_errors_compare_by_value() {
    assert_eq!(
        AnalyticsError::InvalidThreshold(2.0),
        AnalyticsError::InvalidThreshold(2.0)
    );
    assert_ne!(
        AnalyticsError::InvalidThreshold(2.0),
        AnalyticsError::InvalidKernelWidth(2.0)
    );
}
