use ordo_graph::scc::{assign_clusters, assign_scc, clusters, cycles};
use ordo_graph::{DependencyGraph, EdgeKind, NodeStateTable};

fn s(v: &str) -> String {
    v.to_string()
}

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph<String> {
    let mut g = DependencyGraph::new();
    for n in nodes {
        g.add_node(s(n));
    }
    for (a, b) in edges {
        g.add_edge(&s(a), &s(b), EdgeKind::Include);
    }
    g
}

#[test]
fn test_acyclic_graph_has_singleton_components() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
    let mut table = NodeStateTable::for_graph(&g);
    assert_eq!(assign_scc(&g, &mut table), 3);
    assert!(cycles(&g).is_empty());
}

#[test]
fn test_scc_ids_match_mutual_reachability() {
    let g = graph(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
    );
    let mut table = NodeStateTable::for_graph(&g);
    assign_scc(&g, &mut table);

    let id = |n: &str| table.scc_of(g.find(&s(n)).unwrap()).unwrap();
    assert_eq!(id("a"), id("b"));
    assert_eq!(id("b"), id("c"));
    assert_ne!(id("a"), id("d"));
    assert_eq!(cycles(&g), vec![vec![s("a"), s("b"), s("c")]]);
}

#[test]
fn test_clusters_ignore_edge_direction() {
    let g = graph(
        &["m1", "h1", "m2", "pt", "m3", "lonely"],
        &[("m1", "h1"), ("m2", "h1"), ("m3", "pt")],
    );
    assert_eq!(
        clusters(&g),
        vec![
            vec![s("h1"), s("m1"), s("m2")],
            vec![s("lonely")],
            vec![s("m3"), s("pt")],
        ]
    );
}

#[test]
fn test_cluster_table_ids() {
    let g = graph(&["a", "b", "c"], &[("a", "b")]);
    let mut table = NodeStateTable::for_graph(&g);
    assert_eq!(assign_clusters(&g, &mut table), 2);
    let id = |n: &str| table.cluster_of(g.find(&s(n)).unwrap()).unwrap();
    assert_eq!(id("a"), id("b"));
    assert_ne!(id("a"), id("c"));
    assert!(table.scc_of(g.find(&s("a")).unwrap()).is_none());
}
