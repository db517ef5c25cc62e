use std::fs;

use ordo_compiler::fingerprint::{storage_path, Snapshot};
use ordo_compiler::store::{DependencyTree, TreeNode, FORMAT_VERSION};
use tempfile::TempDir;

fn path_of(tmp: &TempDir, name: &str) -> String {
    tmp.path().join(name).to_string_lossy().into_owned()
}

fn tree(nodes: &[(&String, &[&String])]) -> DependencyTree {
    DependencyTree {
        version: FORMAT_VERSION,
        nodes: nodes
            .iter()
            .map(|(path, deps)| TreeNode {
                path: (*path).clone(),
                dependencies: deps.iter().map(|d| (*d).clone()).collect(),
            })
            .collect(),
    }
}

#[test]
fn test_unchanged_files_produce_no_changes() {
    let tmp = TempDir::new().unwrap();
    let a = path_of(&tmp, "a.erl");
    fs::write(&a, "-module(a).\n").unwrap();

    let t = tree(&[(&a, &[])]);
    let before = Snapshot::capture(&t);
    let after = Snapshot::capture(&t);
    assert!(before.changes(&after).is_empty());
    assert!(before.changes(&after).seeds(&before).is_empty());
}

#[test]
fn test_added_modified_and_removed_files() {
    let tmp = TempDir::new().unwrap();
    let (a, b, c) = (path_of(&tmp, "a.erl"), path_of(&tmp, "b.erl"), path_of(&tmp, "c.erl"));
    fs::write(&a, "v1").unwrap();
    fs::write(&b, "v1").unwrap();
    let before = Snapshot::capture(&tree(&[(&a, &[]), (&b, &[])]));

    fs::write(&a, "v2").unwrap();
    fs::remove_file(&b).unwrap();
    fs::write(&c, "new").unwrap();
    let after = Snapshot::capture(&tree(&[(&a, &[]), (&b, &[]), (&c, &[])]));

    let changes = before.changes(&after);
    assert_eq!(changes.added, vec![c.clone()]);
    assert_eq!(changes.modified, vec![a.clone()]);
    assert_eq!(changes.removed, vec![b.clone()]);
    assert_eq!(changes.seeds(&before), vec![a, c]);
}

#[test]
fn test_dependents_of_removed_files_become_seeds() {
    let tmp = TempDir::new().unwrap();
    let (h, m, other) = (path_of(&tmp, "h.hrl"), path_of(&tmp, "m.erl"), path_of(&tmp, "o.erl"));
    fs::write(&h, "").unwrap();
    fs::write(&m, "").unwrap();
    fs::write(&other, "").unwrap();
    let before = Snapshot::capture(&tree(&[(&h, &[]), (&m, &[&h]), (&other, &[])]));

    fs::remove_file(&h).unwrap();
    let after = Snapshot::capture(&tree(&[(&m, &[]), (&other, &[])]));
    let changes = before.changes(&after);

    assert_eq!(changes.removed, vec![h]);
    assert_eq!(changes.seeds(&before), vec![m]);
}

#[test]
fn test_snapshot_save_and_load() {
    let tmp = TempDir::new().unwrap();
    let a = path_of(&tmp, "a.erl");
    let b = path_of(&tmp, "b.erl");
    fs::write(&a, "x").unwrap();
    fs::write(&b, "y").unwrap();
    let snapshot = Snapshot::capture(&tree(&[(&a, &[]), (&b, &[&a])]));
    assert_eq!(snapshot.dependencies[&b], vec![a.clone()]);

    let path = storage_path(&tmp.path().join(".ordo"));
    snapshot.save(&path).unwrap();
    assert_eq!(Snapshot::load(&path), Some(snapshot));

    fs::write(&path, "garbage").unwrap();
    assert_eq!(Snapshot::load(&path), None);
}
