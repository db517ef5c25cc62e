use std::fs;
use std::path::{Path, PathBuf};

use ordo_ops::ops_clusters::{clusters, cycles};
use ordo_ops::ops_tree::{tree, TreeOptions};
use ordo_ops::ProjectContext;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> (TempDir, ProjectContext) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "Ordo.toml", "[project]\nname = \"inspect\"\n\n[unit.core]\n");
    write(root, "core/include/types.hrl", "");
    write(root, "core/src/a.erl", "-module(a).\n-include(\"types.hrl\").\n");
    write(root, "core/src/b.erl", "-module(b).\n-include(\"types.hrl\").\n");
    write(root, "core/src/solo.erl", "-module(solo).\n");
    let ctx = ProjectContext::load(&root.join("Ordo.toml"), Some(&root.join(".ordo"))).unwrap();
    (tmp, ctx)
}

#[test]
fn test_discover_finds_manifest_in_parent() {
    let (tmp, _ctx) = project();
    let ctx = ProjectContext::discover(&tmp.path().join("core/src"), None).unwrap();
    assert_eq!(ctx.root, tmp.path());
    assert_eq!(ctx.units.len(), 1);
    assert_eq!(ctx.unit("core").unwrap().name, "core");
}

#[test]
fn test_discover_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(ProjectContext::discover(tmp.path(), None).is_err());
}

#[test]
fn test_relative_state_dir_is_under_root() {
    let (tmp, _ctx) = project();
    let ctx = ProjectContext::load(&tmp.path().join("Ordo.toml"), Some(Path::new("state"))).unwrap();
    assert_eq!(ctx.state_dir, tmp.path().join("state"));
    assert_eq!(ctx.store.dir(), tmp.path().join("state/build-order"));
}

#[test]
fn test_tree_uses_relative_labels() {
    let (tmp, ctx) = project();
    let output = tree(&ctx, &TreeOptions::default()).unwrap();
    assert!(output.contains("core/src/a.erl\n"), "{output}");
    assert!(output.contains("core/include/types.hrl (include)"), "{output}");
    assert!(!output.contains(&tmp.path().to_string_lossy().into_owned()), "{output}");
}

#[test]
fn test_inverted_tree_by_file_name() {
    let (_tmp, ctx) = project();
    let opts = TreeOptions {
        inverted: Some(PathBuf::from("types.hrl")),
    };
    let output = tree(&ctx, &opts).unwrap();
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("core/include/types.hrl"));
    assert!(output.contains("core/src/a.erl"));
    assert!(output.contains("core/src/b.erl"));
    assert!(!output.contains("solo.erl"));
}

#[test]
fn test_inverted_tree_by_root_relative_path() {
    let (_tmp, ctx) = project();
    let opts = TreeOptions {
        inverted: Some(PathBuf::from("core/src/solo.erl")),
    };
    let output = tree(&ctx, &opts).unwrap();
    assert_eq!(output, "core/src/solo.erl\n");
}

#[test]
fn test_inverted_tree_unknown_file() {
    let (_tmp, ctx) = project();
    let opts = TreeOptions {
        inverted: Some(PathBuf::from("missing.erl")),
    };
    let err = tree(&ctx, &opts).unwrap_err().to_string();
    assert!(err.contains("missing.erl"), "{err}");
}

#[test]
fn test_clusters_group_connected_files() {
    let (tmp, ctx) = project();
    let id = |rel: &str| tmp.path().join(rel).to_string_lossy().into_owned();
    let groups = clusters(&ctx).unwrap();
    assert_eq!(
        groups,
        vec![
            vec![id("core/include/types.hrl"), id("core/src/a.erl"), id("core/src/b.erl")],
            vec![id("core/src/solo.erl")],
        ]
    );
    assert!(cycles(&ctx).unwrap().is_empty());
}

#[test]
fn test_cycles_report_mutual_transforms() {
    let (tmp, ctx) = project();
    write(tmp.path(), "core/src/a.erl", "-module(a).\n-compile({parse_transform, b}).\n");
    write(tmp.path(), "core/src/b.erl", "-module(b).\n-compile({parse_transform, a}).\n");
    let id = |rel: &str| tmp.path().join(rel).to_string_lossy().into_owned();
    assert_eq!(cycles(&ctx).unwrap(), vec![vec![id("core/src/a.erl"), id("core/src/b.erl")]]);
}
