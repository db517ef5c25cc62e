use std::fs;
use std::path::Path;

use ordo_compiler::discovery::{FsEnumerator, SourceRootEnumerator};
use ordo_core::artifact::{ArtifactKind, Role};
use ordo_core::manifest::Manifest;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn rel(root: &Path, path: &str) -> String {
    Path::new(path)
        .strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_enumerates_roots_by_role() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "app/src/b.erl", "");
    write(root, "app/src/a.erl", "");
    write(root, "app/src/nested/c.erl", "");
    write(root, "app/src/local.hrl", "");
    write(root, "app/src/app.app.src", "");
    write(root, "app/test/a_tests.erl", "");
    write(root, "app/include/defs.hrl", "");
    write(root, "app/include/stray.erl", "");

    let manifest = Manifest::from_str("[project]\nname = \"p\"\n\n[unit.app]\n").unwrap();
    let units = manifest.units(root);
    let enumerator = FsEnumerator::new(root, manifest.extensions(), &[]).unwrap();
    let sources = enumerator.enumerate(&units[0]).unwrap();

    let found: Vec<(String, ArtifactKind, Role)> = sources
        .artifacts
        .iter()
        .map(|a| (rel(root, &a.path), a.kind, a.role))
        .collect();
    assert_eq!(
        found,
        vec![
            ("app/src/a.erl".to_string(), ArtifactKind::Module, Role::Production),
            ("app/src/b.erl".to_string(), ArtifactKind::Module, Role::Production),
            ("app/src/local.hrl".to_string(), ArtifactKind::Header, Role::Production),
            ("app/src/nested/c.erl".to_string(), ArtifactKind::Module, Role::Production),
            ("app/test/a_tests.erl".to_string(), ArtifactKind::Module, Role::Test),
            ("app/include/defs.hrl".to_string(), ArtifactKind::Header, Role::Production),
        ]
    );
    assert!(sources.artifacts.iter().all(|a| a.unit == "app"));
}

#[test]
fn test_missing_roots_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let manifest = Manifest::from_str("[project]\nname = \"p\"\n\n[unit.empty]\n").unwrap();
    let units = manifest.units(tmp.path());
    let enumerator = FsEnumerator::new(tmp.path(), manifest.extensions(), &[]).unwrap();
    let sources = enumerator.enumerate(&units[0]).unwrap();
    assert!(sources.artifacts.is_empty());
    assert_eq!(sources.source_roots, units[0].source_roots);
}

#[test]
fn test_exclude_patterns_are_relative_to_project() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "app/src/keep.erl", "");
    write(root, "app/src/generated/skip.erl", "");

    let manifest = Manifest::from_str(
        "[project]\nname = \"p\"\nexclude = [\"app/src/generated/**\"]\n\n[unit.app]\n",
    )
    .unwrap();
    let units = manifest.units(root);
    let enumerator =
        FsEnumerator::new(root, manifest.extensions(), &manifest.project.exclude).unwrap();
    let sources = enumerator.enumerate(&units[0]).unwrap();
    let names: Vec<String> = sources.artifacts.iter().map(|a| rel(root, &a.path)).collect();
    assert_eq!(names, vec!["app/src/keep.erl"]);
}

#[test]
fn test_file_under_two_roots_is_reported_once() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "lib/src/shared.hrl", "");

    let manifest = Manifest::from_str(
        "[project]\nname = \"p\"\n\n[unit.lib]\nsources = [\"lib/src\"]\ninclude = [\"lib/src\"]\n",
    )
    .unwrap();
    let units = manifest.units(root);
    let enumerator = FsEnumerator::new(root, manifest.extensions(), &[]).unwrap();
    let sources = enumerator.enumerate(&units[0]).unwrap();
    assert_eq!(sources.artifacts.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_directory_links_are_not_followed() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "app/src/m.erl", "");
    std::os::unix::fs::symlink(root.join("app/src"), root.join("app/src/loop")).unwrap();

    let manifest = Manifest::from_str("[project]\nname = \"p\"\n\n[unit.app]\n").unwrap();
    let units = manifest.units(root);
    let enumerator = FsEnumerator::new(root, manifest.extensions(), &[]).unwrap();
    let sources = enumerator.enumerate(&units[0]).unwrap();

    let found: Vec<String> = sources.artifacts.iter().map(|a| rel(root, &a.path)).collect();
    assert_eq!(found, vec!["app/src/m.erl".to_string()]);
}
