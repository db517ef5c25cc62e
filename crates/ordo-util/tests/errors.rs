use std::path::PathBuf;

use ordo_util::errors::OrdoError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = OrdoError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = OrdoError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_cycle_error_names_both_files() {
    let err = OrdoError::CyclicDependency {
        first: "/p/src/a.erl".to_string(),
        second: "/p/src/b.erl".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("/p/src/a.erl"), "got: {msg}");
    assert!(msg.contains("/p/src/b.erl"), "got: {msg}");
}

#[test]
fn test_cycle_error_help_mentions_declaration_kinds() {
    use miette::Diagnostic;

    let err = OrdoError::CyclicDependency {
        first: "a".to_string(),
        second: "b".to_string(),
    };
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("include"));
    assert!(help.contains("parse_transform"));
    assert!(help.contains("behaviour"));
}

#[test]
fn test_unit_cycle_display() {
    let err = OrdoError::UnitCycle {
        units: vec!["app".into(), "lib".into(), "app".into()],
    };
    assert_eq!(
        err.to_string(),
        "Cyclic unit dependency detected: app -> lib -> app"
    );
}

#[test]
fn test_store_write_display() {
    let err = OrdoError::StoreWrite {
        path: PathBuf::from("/state/deps-tree.json"),
        message: "disk full".to_string(),
    };
    assert_eq!(err.to_string(), "Cannot write /state/deps-tree.json: disk full");
}

#[test]
fn test_source_root_mismatch_display() {
    let err = OrdoError::SourceRootMismatch {
        path: "/elsewhere/x.erl".to_string(),
    };
    assert!(err.to_string().contains("/elsewhere/x.erl"));
}

#[test]
fn test_generic_error_display() {
    let err = OrdoError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let ordo_err: OrdoError = io_err.into();
    assert!(matches!(ordo_err, OrdoError::Io(_)));
}
