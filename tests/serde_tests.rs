#![cfg(feature = "serde")]

use approx::assert_relative_eq;
use graphsurf::prelude::*;

#[test]
fn test_graph_from_minimal_json() {
    let json = r#"{
        "nodes": [{"id": "a"}, {"id": "b", "value": 2.5}, {"id": "c"}],
        "links": [
            {"source": "a", "target": "b", "value": 3.0},
            {"source": "b", "target": "c", "value": 1.0, "attributes": {"trips": 4.0}}
        ]
    }"#;
    let graph: Graph = serde_json::from_str(json).unwrap();

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.nodes[1].value, Some(2.5));
    assert!(graph.nodes[0].community.is_none());
    assert!(graph.links[0].attributes.is_empty());
    assert_eq!(graph.links[1].attributes["trips"], 4.0);
}

#[test]
fn test_community_detection_serializes() {
    let graph = Graph::new(
        vec![GraphNode::new("a"), GraphNode::new("b")],
        vec![GraphLink::new("a", "b", 1.0)],
    );
    let result = Communities::new().seed(1).build().unwrap().detect(&graph);

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"community\":0"));
    let back: CommunityDetection = serde_json::from_str(&json).unwrap();
    assert_eq!(back.graph, result.graph);
    assert_eq!(back.structure.assignments, result.structure.assignments);
    assert_relative_eq!(back.modularity(), result.modularity(), epsilon = 1e-12);
}

#[test]
fn test_fitted_model_round_trips() {
    let points: Vec<SurfaceDataPoint> = (0..9)
        .map(|i| {
            let (x, y) = ((i % 3) as f64, (i / 3) as f64);
            SurfaceDataPoint::new(x, y, 1.0 + x * x - y)
        })
        .collect();
    let fit = Predictor::new()
        .model(Polynomial { degree: 2 })
        .build()
        .unwrap()
        .fit(&points);

    let json = serde_json::to_string(&fit.model).unwrap();
    let model: FittedModel = serde_json::from_str(&json).unwrap();
    assert_eq!(model.kind, fit.model.kind);
    assert_relative_eq!(
        model.evaluate(1.5, 0.5),
        fit.model.evaluate(1.5, 0.5),
        epsilon = 1e-9
    );
}

#[test]
fn test_options_deserialize() {
    let options: AnomalyOptions = serde_json::from_str(
        r#"{"method": "Iqr", "threshold": 2.0, "iqr_multiplier": 3.0,
            "contamination": 0.2, "weight_field": "Value"}"#,
    )
    .unwrap();
    assert_eq!(options.method, Iqr);
    assert!(options.validate().is_ok());
}
