use ordo_core::artifact::{Artifact, ArtifactKind, Role};

#[test]
fn test_module_name_is_file_stem() {
    let a = Artifact::new("/p/app/src/shop_cart.erl", ArtifactKind::Module, "app", Role::Production);
    assert_eq!(a.module_name(), Some("shop_cart"));
    assert_eq!(a.file_name(), Some("shop_cart.erl"));
    assert!(a.is_module());
    assert!(!a.is_header());
}

#[test]
fn test_role_display() {
    assert_eq!(Role::Production.to_string(), "production");
    assert_eq!(Role::Test.to_string(), "test");
    assert!(Role::Test.is_test());
}

#[test]
fn test_artifact_display_is_path() {
    let a = Artifact::new("/p/include/defs.hrl", ArtifactKind::Header, "app", Role::Production);
    assert_eq!(a.to_string(), "/p/include/defs.hrl");
}
