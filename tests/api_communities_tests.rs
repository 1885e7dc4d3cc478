//! Tests for community detection through the public API.
//!
//! Covers Louvain and its alias, label propagation, the agglomerative
//! variants with their dendrograms, graph annotation and degenerate graphs.

use approx::assert_relative_eq;
use graphsurf::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Two 4-cliques with heavy internal links joined by one weak bridge.
fn two_cliques() -> Graph {
    let nodes = (0..8).map(|i| GraphNode::new(format!("n{}", i))).collect();
    let mut links = Vec::new();
    for base in [0, 4] {
        for i in base..base + 4 {
            for j in (i + 1)..base + 4 {
                links.push(GraphLink::new(format!("n{}", i), format!("n{}", j), 5.0));
            }
        }
    }
    links.push(GraphLink::new("n3", "n4", 0.01));
    Graph::new(nodes, links)
}

fn community_of(result: &CommunityDetection, id: &str) -> usize {
    result
        .graph
        .nodes
        .iter()
        .find(|n| n.id == id)
        .and_then(|n| n.community)
        .unwrap()
}

fn assert_cliques_separated(result: &CommunityDetection) {
    assert_eq!(result.community_count(), 2);
    let left = community_of(result, "n0");
    let right = community_of(result, "n4");
    assert_ne!(left, right);
    for i in 0..4 {
        assert_eq!(community_of(result, &format!("n{}", i)), left);
        assert_eq!(community_of(result, &format!("n{}", i + 4)), right);
    }
}

// ============================================================================
// Louvain
// ============================================================================

#[test]
fn test_louvain_separates_weakly_bridged_cliques() {
    let detector = Communities::new().algorithm(Louvain).seed(42).build().unwrap();
    let result = detector.detect(&two_cliques());

    assert_cliques_separated(&result);
    assert!(result.modularity() > 0.3);
    assert!(result.merges.is_none());
}

#[test]
fn test_louvain_is_reproducible_with_seed() {
    let graph = two_cliques();
    let detector = Communities::new().seed(7).build().unwrap();

    let a = detector.detect(&graph);
    let b = detector.detect(&graph);
    assert_eq!(a.structure.assignments, b.structure.assignments);
}

#[test]
fn test_leiden_matches_louvain() {
    let graph = two_cliques();
    let louvain = Communities::new().algorithm(Louvain).seed(3).build().unwrap();
    let leiden = Communities::new().algorithm(Leiden).seed(3).build().unwrap();

    assert_eq!(
        louvain.detect(&graph).structure.assignments,
        leiden.detect(&graph).structure.assignments
    );
}

#[test]
fn test_detect_with_external_rng() {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let detector = Communities::new().build().unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let result = detector.detect_with_rng(&two_cliques(), &mut rng);
    assert_cliques_separated(&result);
}

// ============================================================================
// Label Propagation
// ============================================================================

#[test]
fn test_label_propagation_separates_cliques() {
    let detector = Communities::new()
        .algorithm(LabelPropagation)
        .seed(5)
        .build()
        .unwrap();
    let result = detector.detect(&two_cliques());
    assert_cliques_separated(&result);
}

#[test]
fn test_label_propagation_keeps_isolated_nodes_apart() {
    let nodes = vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")];
    let graph = Graph::new(nodes, Vec::new());

    let detector = Communities::new().algorithm(Infomap).build().unwrap();
    let result = detector.detect(&graph);

    assert_eq!(result.community_count(), 3);
    assert_eq!(result.modularity(), 0.0);
}

// ============================================================================
// Agglomerative
// ============================================================================

#[test]
fn test_fast_greedy_records_full_dendrogram() {
    let detector = Communities::new().algorithm(FastGreedy).build().unwrap();
    let result = detector.detect(&two_cliques());

    assert_cliques_separated(&result);
    let merges = result.merges.as_ref().unwrap();
    assert_eq!(merges.len(), 7);
    for (step, merge) in merges.iter().enumerate() {
        assert_eq!(merge.step, step);
        assert_ne!(merge.into, merge.absorbed);
    }
    // The bridge is merged last.
    assert_relative_eq!(merges[6].linkage, 0.01);
    assert_relative_eq!(merges[6].modularity, 0.0, epsilon = 1e-12);
}

#[test]
fn test_walktrap_cuts_at_best_modularity() {
    let detector = Communities::new().algorithm(Walktrap).build().unwrap();
    let result = detector.detect(&two_cliques());

    assert_cliques_separated(&result);
    let merges = result.merges.as_ref().unwrap();
    let best = merges
        .iter()
        .map(|m| m.modularity)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(result.modularity(), best, epsilon = 1e-12);
}

// ============================================================================
// Annotation and Degenerate Graphs
// ============================================================================

#[test]
fn test_annotation_preserves_graph() {
    let graph = two_cliques();
    let result = Communities::new().seed(1).build().unwrap().detect(&graph);

    assert_eq!(result.graph.links, graph.links);
    assert_eq!(result.graph.nodes.len(), graph.nodes.len());
    for (before, after) in graph.nodes.iter().zip(result.graph.nodes.iter()) {
        assert_eq!(before.id, after.id);
        assert!(before.community.is_none());
        assert!(after.community.is_some());
    }
    // The input graph is not touched.
    assert!(graph.nodes.iter().all(|n| n.community.is_none()));
}

#[test]
fn test_partition_covers_every_node_once() {
    let result = Communities::new().seed(9).build().unwrap().detect(&two_cliques());

    let total: usize = result.structure.sizes.iter().sum();
    assert_eq!(total, 8);
    let members: usize = result.structure.members.iter().map(|m| m.len()).sum();
    assert_eq!(members, 8);
    let k = result.community_count();
    assert!(result.structure.assignments.iter().all(|&c| c < k));
    assert!((-1.0..=1.0).contains(&result.modularity()));
}

#[test]
fn test_empty_graph_has_no_communities() {
    let graph = Graph::new(Vec::new(), Vec::new());
    for algorithm in [Louvain, LabelPropagation, FastGreedy, Walktrap] {
        let detector = Communities::new().algorithm(algorithm).build().unwrap();
        let result = detector.detect(&graph);
        assert_eq!(result.community_count(), 0);
        assert_eq!(result.modularity(), 0.0);
    }
}

#[test]
fn test_links_with_unknown_endpoints_are_ignored() {
    let nodes = vec![GraphNode::new("a"), GraphNode::new("b")];
    let links = vec![
        GraphLink::new("a", "b", 1.0),
        GraphLink::new("a", "ghost", 100.0),
    ];
    let result = Communities::new()
        .seed(2)
        .build()
        .unwrap()
        .detect(&Graph::new(nodes, links));

    assert_eq!(result.community_count(), 1);
    assert_eq!(result.graph.links.len(), 2);
}

#[test]
fn test_attribute_weight_field() {
    let nodes = (0..4).map(|i| GraphNode::new(format!("n{}", i))).collect();
    let links = vec![
        GraphLink::new("n0", "n1", 0.0).with_attribute("trips", 10.0),
        GraphLink::new("n2", "n3", 0.0).with_attribute("trips", 10.0),
        GraphLink::new("n1", "n2", 0.0).with_attribute("trips", 0.1),
    ];
    let detector = Communities::new()
        .weight_field(WeightField::Attribute("trips".into()))
        .seed(4)
        .build()
        .unwrap();
    let result = detector.detect(&Graph::new(nodes, links));

    assert_eq!(result.community_count(), 2);
    assert_eq!(community_of(&result, "n0"), community_of(&result, "n1"));
    assert_eq!(community_of(&result, "n2"), community_of(&result, "n3"));
}

// ============================================================================
// Free Function and Display
// ============================================================================

#[test]
fn test_detect_communities_free_function() {
    let options = CommunityOptions {
        seed: Some(42),
        ..CommunityOptions::default()
    };
    let result = detect_communities(&two_cliques(), &options).unwrap();
    assert_cliques_separated(&result);

    let bad = CommunityOptions {
        resolution: -1.0,
        ..CommunityOptions::default()
    };
    assert_eq!(
        detect_communities(&two_cliques(), &bad).unwrap_err(),
        AnalyticsError::InvalidResolution(-1.0)
    );
}

#[test]
fn test_display_summary() {
    let result = Communities::new().seed(42).build().unwrap().detect(&two_cliques());
    let text = result.to_string();
    assert!(text.contains("Communities: 2"));
    assert!(text.contains("n0, n1, n2, n3"));
}
