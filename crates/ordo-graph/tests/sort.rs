use ordo_graph::scc::{cycles, strongly_connected};
use ordo_graph::{sort, DependencyGraph, EdgeKind};

fn s(v: &str) -> String {
    v.to_string()
}

fn position(order: &[String], id: &str) -> usize {
    order.iter().position(|n| n == id).unwrap()
}

#[test]
fn test_empty_graph_sorts_to_empty_order() {
    let g: DependencyGraph<String> = DependencyGraph::new();
    let outcome = sort(&g);
    assert!(outcome.is_acyclic());
    assert!(outcome.order.is_empty());
}

#[test]
fn test_header_sorted_before_including_module() {
    let mut g = DependencyGraph::new();
    g.add_node(s("M1"));
    g.add_node(s("H1"));
    g.add_edge(&s("M1"), &s("H1"), EdgeKind::Include);

    let order = sort(&g).into_order().unwrap();
    assert_eq!(order, vec!["H1", "M1"]);
}

#[test]
fn test_diamond_respects_every_edge() {
    let mut g = DependencyGraph::new();
    for n in ["app", "left", "right", "base"] {
        g.add_node(s(n));
    }
    g.add_edge(&s("app"), &s("left"), EdgeKind::Transform);
    g.add_edge(&s("app"), &s("right"), EdgeKind::Interface);
    g.add_edge(&s("left"), &s("base"), EdgeKind::Include);
    g.add_edge(&s("right"), &s("base"), EdgeKind::Include);

    let order = sort(&g).into_order().unwrap();
    assert_eq!(order.len(), 4);
    assert!(position(&order, "base") < position(&order, "left"));
    assert!(position(&order, "base") < position(&order, "right"));
    assert!(position(&order, "left") < position(&order, "app"));
    assert!(position(&order, "right") < position(&order, "app"));
}

#[test]
fn test_independent_nodes_keep_insertion_order() {
    let mut g = DependencyGraph::new();
    for n in ["c", "a", "b"] {
        g.add_node(s(n));
    }
    assert_eq!(sort(&g).order, vec!["c", "a", "b"]);
}

#[test]
fn test_mutual_dependency_reports_both_files() {
    let mut g = DependencyGraph::new();
    g.add_node(s("M1"));
    g.add_node(s("M2"));
    g.add_edge(&s("M1"), &s("M2"), EdgeKind::Transform);
    g.add_edge(&s("M2"), &s("M1"), EdgeKind::Interface);

    let outcome = sort(&g);
    assert_eq!(outcome.first_cycle_edge, Some((s("M2"), s("M1"))));
    assert_eq!(outcome.order.len(), 2);

    let err = outcome.into_order().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("M1"), "got: {msg}");
    assert!(msg.contains("M2"), "got: {msg}");

    let groups = strongly_connected(&g);
    assert_eq!(groups.len(), 1);
    let mut group = groups[0].clone();
    group.sort();
    assert_eq!(group, vec!["M1", "M2"]);
}

#[test]
fn test_first_back_edge_is_reported_once() {
    let mut g = DependencyGraph::new();
    for n in ["a", "b", "c", "d"] {
        g.add_node(s(n));
    }
    g.add_edge(&s("a"), &s("b"), EdgeKind::Include);
    g.add_edge(&s("b"), &s("a"), EdgeKind::Include);
    g.add_edge(&s("c"), &s("d"), EdgeKind::Include);
    g.add_edge(&s("d"), &s("c"), EdgeKind::Include);

    let outcome = sort(&g);
    assert_eq!(outcome.first_cycle_edge, Some((s("b"), s("a"))));
    assert_eq!(cycles(&g), vec![vec![s("a"), s("b")], vec![s("c"), s("d")]]);
}

#[test]
fn test_long_chain_does_not_overflow_the_stack() {
    let mut g = DependencyGraph::new();
    let n = 50_000;
    for i in 0..n {
        g.add_node(i);
    }
    for i in 1..n {
        g.add_edge(&i, &(i - 1), EdgeKind::Include);
    }
    let order = sort(&g).into_order().unwrap();
    assert_eq!(order.first(), Some(&0));
    assert_eq!(order.last(), Some(&(n - 1)));
}
