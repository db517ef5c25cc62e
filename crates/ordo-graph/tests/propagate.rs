use ordo_graph::{propagate, DependencyGraph, EdgeKind};

fn s(v: &str) -> String {
    v.to_string()
}

#[test]
fn test_dirty_header_dirties_includer() {
    let mut g = DependencyGraph::new();
    g.add_node(s("H1"));
    g.add_node(s("M1"));
    g.add_edge(&s("M1"), &s("H1"), EdgeKind::Include);

    let dirty = propagate(&g, [&s("H1")]);
    assert_eq!(dirty.to_sorted_vec(), vec!["H1", "M1"]);
}

#[test]
fn test_dirty_transform_leaves_unrelated_module_clean() {
    let mut g = DependencyGraph::new();
    g.add_node(s("PT1"));
    g.add_node(s("M1"));
    g.add_node(s("M2"));
    g.add_edge(&s("M1"), &s("PT1"), EdgeKind::Transform);

    let dirty = propagate(&g, [&s("PT1")]);
    assert_eq!(dirty.to_sorted_vec(), vec!["M1", "PT1"]);
    assert!(!dirty.contains(&s("M2")));
}

#[test]
fn test_dependencies_of_dirty_node_stay_clean() {
    let mut g = DependencyGraph::new();
    for n in ["top", "mid", "leaf"] {
        g.add_node(s(n));
    }
    g.add_edge(&s("top"), &s("mid"), EdgeKind::Include);
    g.add_edge(&s("mid"), &s("leaf"), EdgeKind::Include);

    let dirty = propagate(&g, [&s("mid")]);
    assert_eq!(dirty.to_sorted_vec(), vec!["mid", "top"]);
}

#[test]
fn test_empty_seed_yields_empty_set() {
    let mut g = DependencyGraph::new();
    g.add_node(s("a"));
    let dirty = propagate(&g, std::iter::empty::<&String>());
    assert!(dirty.is_empty());
}

#[test]
fn test_unknown_seed_is_ignored() {
    let mut g = DependencyGraph::new();
    g.add_node(s("a"));
    g.add_node(s("b"));
    g.add_edge(&s("b"), &s("a"), EdgeKind::Include);

    let dirty = propagate(&g, [&s("a"), &s("deleted.erl")]);
    assert_eq!(dirty.to_sorted_vec(), vec!["a", "b"]);
}

#[test]
fn test_propagation_terminates_on_cycles() {
    let mut g = DependencyGraph::new();
    for n in ["a", "b", "c"] {
        g.add_node(s(n));
    }
    g.add_edge(&s("a"), &s("b"), EdgeKind::Include);
    g.add_edge(&s("b"), &s("a"), EdgeKind::Include);
    g.add_edge(&s("c"), &s("a"), EdgeKind::Include);

    let dirty = propagate(&g, [&s("b")]);
    assert_eq!(dirty.to_sorted_vec(), vec!["a", "b", "c"]);
}
