//! Tests for anomaly detection through the public API.
//!
//! Covers the z-score and IQR detectors on graphs and surface points, the
//! ensemble methods, report metrics and degenerate inputs.

use approx::assert_relative_eq;
use graphsurf::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Twenty heights near 10 followed by one at 1000.
fn heights_with_outlier() -> Vec<SurfaceDataPoint> {
    let mut points: Vec<SurfaceDataPoint> = (0..20)
        .map(|i| SurfaceDataPoint::new(i as f64, 0.0, 10.0 + 0.1 * (i % 3) as f64))
        .collect();
    points.push(SurfaceDataPoint::new(20.0, 0.0, 1000.0));
    points
}

/// A chain `n0 → n1 → … → n20` of unit links ending in one heavy link to `n21`.
fn chain_with_heavy_link() -> Graph {
    let nodes = (0..22).map(|i| GraphNode::new(format!("n{}", i))).collect();
    let mut links: Vec<GraphLink> = (0..20)
        .map(|i| GraphLink::new(format!("n{}", i), format!("n{}", i + 1), 1.0))
        .collect();
    links.push(GraphLink::new("n20", "n21", 1000.0));
    Graph::new(nodes, links)
}

// ============================================================================
// Z-Score
// ============================================================================

#[test]
fn test_zscore_flags_only_the_outlier() {
    let detector = Anomalies::new().method(ZScore).threshold(3.0).build().unwrap();
    let report = detector.detect_points(&heights_with_outlier());

    assert_eq!(report.point_anomalies.len(), 1);
    let anomaly = &report.point_anomalies[0];
    assert_eq!(anomaly.subject, AnomalySubject::Point(20));
    assert!(anomaly.score > 3.0);
    assert!(anomaly.reason.contains('z'));
    assert!(report.node_anomalies.is_empty());
    assert!(report.link_anomalies.is_empty());
}

#[test]
fn test_zscore_scores_are_non_negative() {
    let detector = Anomalies::new().threshold(0.5).build().unwrap();
    let report = detector.detect_points(&heights_with_outlier());

    assert!(!report.is_empty());
    assert!(report.iter().all(|a| a.score >= 0.0));
}

#[test]
fn test_zscore_constant_heights_flag_nothing() {
    let points: Vec<SurfaceDataPoint> = (0..10)
        .map(|i| SurfaceDataPoint::new(i as f64, 0.0, 4.0))
        .collect();
    let report = Anomalies::new().build().unwrap().detect_points(&points);

    assert!(report.is_empty());
    assert_eq!(report.metrics.count, 0);
    assert_eq!(report.metrics.mean_score, 0.0);
}

#[test]
fn test_zscore_ignores_non_finite_heights() {
    let mut points = heights_with_outlier();
    points.push(SurfaceDataPoint::new(21.0, 0.0, f64::NAN));
    let report = Anomalies::new().build().unwrap().detect_points(&points);

    assert_eq!(report.point_anomalies.len(), 1);
    assert_eq!(report.point_anomalies[0].subject, AnomalySubject::Point(20));
}

#[test]
fn test_graph_heavy_link_is_flagged() {
    let detector = Anomalies::new().method(ZScore).build().unwrap();
    let report = detector.detect(&chain_with_heavy_link());

    assert_eq!(report.link_anomalies.len(), 1);
    match &report.link_anomalies[0].subject {
        AnomalySubject::Link {
            source,
            target,
            index,
        } => {
            assert_eq!(source, "n20");
            assert_eq!(target, "n21");
            assert_eq!(*index, 20);
        }
        other => panic!("unexpected subject {:?}", other),
    }
    assert!(report.point_anomalies.is_empty());
}

#[test]
fn test_graph_metrics_use_all_elements() {
    let graph = chain_with_heavy_link();
    let report = Anomalies::new().build().unwrap().detect(&graph);

    let total = graph.nodes.len() + graph.links.len();
    assert_eq!(report.metrics.count, report.iter().count());
    assert_relative_eq!(
        report.metrics.ratio,
        report.metrics.count as f64 / total as f64
    );
    let mean = report.iter().map(|a| a.score).sum::<f64>() / report.metrics.count as f64;
    assert_relative_eq!(report.metrics.mean_score, mean);
}

#[test]
fn test_ratio_ignores_links_with_unknown_endpoints() {
    let mut graph = chain_with_heavy_link();
    graph.links.push(GraphLink::new("n0", "ghost", 1.0));
    graph.links.push(GraphLink::new("ghost", "n5", 1.0));
    let report = Anomalies::new().build().unwrap().detect(&graph);

    // 22 nodes and the 21 links whose endpoints both exist.
    assert!(report.metrics.count > 0);
    assert_relative_eq!(
        report.metrics.ratio,
        report.metrics.count as f64 / 43.0
    );
}

#[test]
fn test_node_value_outlier_is_flagged() {
    let nodes: Vec<GraphNode> = (0..15)
        .map(|i| {
            let value = if i == 7 { 500.0 } else { 1.0 + (i % 2) as f64 };
            GraphNode::new(format!("n{}", i)).with_value(value)
        })
        .collect();
    let report = Anomalies::new().build().unwrap().detect(&Graph::new(nodes, Vec::new()));

    assert_eq!(report.node_anomalies.len(), 1);
    assert_eq!(report.node_anomalies[0].subject, AnomalySubject::Node("n7".into()));
    assert!(report.node_anomalies[0].reason.contains("value"));
}

// ============================================================================
// IQR
// ============================================================================

#[test]
fn test_iqr_flags_value_above_upper_fence() {
    let mut points: Vec<SurfaceDataPoint> = (1..=20)
        .map(|i| SurfaceDataPoint::new(i as f64, 0.0, i as f64))
        .collect();
    points.push(SurfaceDataPoint::new(21.0, 0.0, 100.0));

    let detector = Anomalies::new().method(Iqr).iqr_multiplier(1.5).build().unwrap();
    let report = detector.detect_points(&points);

    // Q1 = 6, Q3 = 16, upper fence 31.
    assert_eq!(report.point_anomalies.len(), 1);
    let anomaly = &report.point_anomalies[0];
    assert_eq!(anomaly.subject, AnomalySubject::Point(20));
    assert_relative_eq!(anomaly.score, 6.9, epsilon = 1e-12);
    assert!(anomaly.reason.contains("upper fence"));
}

#[test]
fn test_iqr_flags_value_below_lower_fence() {
    let mut points: Vec<SurfaceDataPoint> = (1..=20)
        .map(|i| SurfaceDataPoint::new(i as f64, 0.0, 50.0 + i as f64))
        .collect();
    points.push(SurfaceDataPoint::new(21.0, 0.0, -100.0));

    let report = Anomalies::new()
        .method(Iqr)
        .build()
        .unwrap()
        .detect_points(&points);

    assert_eq!(report.point_anomalies.len(), 1);
    assert!(report.point_anomalies[0].reason.contains("lower fence"));
}

// ============================================================================
// Ensembles
// ============================================================================

#[test]
fn test_ensembles_deduplicate_subjects() {
    for method in [IsolationForest, Dbscan, Autoencoder] {
        let detector = Anomalies::new().method(method).build().unwrap();
        let report = detector.detect_points(&heights_with_outlier());

        assert_eq!(report.method, method);
        assert_eq!(report.point_anomalies.len(), 1, "{:?}", method);
        assert_eq!(report.point_anomalies[0].subject, AnomalySubject::Point(20));
    }
}

#[test]
fn test_ensemble_respects_contamination_cap() {
    // Half the points sit far from the rest, so both detectors flag many.
    let points: Vec<SurfaceDataPoint> = (0..40)
        .map(|i| {
            let z = if i % 8 == 0 { 1000.0 + i as f64 } else { (i % 5) as f64 };
            SurfaceDataPoint::new(i as f64, 0.0, z)
        })
        .collect();

    let detector = Anomalies::new()
        .method(Autoencoder)
        .contamination(0.05)
        .build()
        .unwrap();
    let report = detector.detect_points(&points);

    // ceil(40 * 0.05) = 2
    assert!(report.point_anomalies.len() <= 2);
    let scores: Vec<f64> = report.point_anomalies.iter().map(|a| a.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

// ============================================================================
// Degenerate Inputs and Free Functions
// ============================================================================

#[test]
fn test_empty_inputs_give_empty_reports() {
    let detector = Anomalies::new().build().unwrap();

    let report = detector.detect(&Graph::new(Vec::new(), Vec::new()));
    assert!(report.is_empty());
    assert_eq!(report.metrics.ratio, 0.0);

    let report = detector.detect_points(&[]);
    assert!(report.is_empty());
}

#[test]
fn test_free_functions_validate_options() {
    let options = AnomalyOptions {
        contamination: 0.9,
        ..AnomalyOptions::default()
    };
    assert_eq!(
        detect_anomalies(&chain_with_heavy_link(), &options).unwrap_err(),
        AnalyticsError::InvalidContamination(0.9)
    );
    assert!(detect_point_anomalies(&heights_with_outlier(), &options).is_err());

    let report =
        detect_point_anomalies(&heights_with_outlier(), &AnomalyOptions::default()).unwrap();
    assert_eq!(report.metrics.count, 1);
}

#[test]
fn test_display_lists_anomalies() {
    let report = Anomalies::new()
        .build()
        .unwrap()
        .detect_points(&heights_with_outlier());
    let text = report.to_string();
    assert!(text.contains("Anomalies: 1"));
    assert!(text.contains("point 20"));
}
