use super::*;
use crate::resolver::version::Comparator;
use std::fs;
use tempfile::TempDir;

fn registry(packages: Vec<Package>) -> Registry {
    let mut registry = Registry::new();
    for package in packages {
        registry.insert(package).unwrap();
    }
    registry
}

// ============================================================================
// Package nodes
// ============================================================================

#[test]
fn test_world_package_is_static_virtual() {
    let world = Package::world();
    assert_eq!(world.id, WORLD_ID);
    assert_eq!(world.realname, WORLD_NAME);
    assert!(world.is_virtual());
    assert!(world.is_static());
    assert!(world.required.is_empty());
    assert!(world.requires_private.is_empty());
}

#[test]
fn test_package_builders_parse_atoms() {
    let package = Package::new("libfoo")
        .with_name("Foo library")
        .with_version("1.0")
        .with_requires("libbar >= 2, zlib")
        .with_requires_private("libm");

    assert_eq!(package.realname, "Foo library");
    assert_eq!(package.required.len(), 2);
    assert_eq!(package.requires_private.len(), 1);
    assert_eq!(package.requires_private[0].package, "libm");
    assert!(!package.is_virtual());
}

#[test]
fn test_flags_combine() {
    let mut flags = PackageFlags::NONE;
    assert!(!flags.contains(PackageFlags::STATIC));
    flags.insert(PackageFlags::STATIC);
    assert!(flags.contains(PackageFlags::STATIC));
    assert!(!flags.contains(PackageFlags::STATIC | PackageFlags::VIRTUAL));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_insert_rejects_duplicates() {
    let mut registry = Registry::new();
    registry.insert(Package::new("libfoo")).unwrap();
    let err = registry.insert(Package::new("libfoo")).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicatePackage { id } if id == "libfoo"));
}

#[test]
fn test_insert_rejects_world_id() {
    let mut registry = Registry::new();
    let err = registry.insert(Package::world()).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPackageId { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_find_by_id_and_provider() {
    let registry = registry(vec![
        Package::new("libjpeg-turbo")
            .with_version("3.0.1")
            .with_provides("libjpeg = 8.0"),
        Package::new("zlib").with_version("1.3"),
    ]);

    assert_eq!(registry.find("zlib"), Some(PackageId::from_index(1)));
    assert_eq!(registry.find("libjpeg"), None);
    assert_eq!(
        registry.find_provider("libjpeg", None),
        Some(PackageId::from_index(0))
    );

    let wants_8 = Constraint::new(Comparator::GreaterThanEqual, "8");
    let wants_9 = Constraint::new(Comparator::GreaterThanEqual, "9");
    assert!(registry.find_provider("libjpeg", Some(&wants_8)).is_some());
    assert!(registry.find_provider("libjpeg", Some(&wants_9)).is_none());
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_verify_dependency_counts_fresh_resolutions() {
    let mut registry = registry(vec![Package::new("zlib").with_version("1.3")]);
    let mut dep = Dependency::new("zlib");

    let id = registry.verify_dependency(&mut dep, None).unwrap();
    assert_eq!(dep.matched(), Some(id));
    assert_eq!(registry.package(id).hits(), 1);

    // Cached match: no extra hit
    registry.verify_dependency(&mut dep, None).unwrap();
    assert_eq!(registry.package(id).hits(), 1);

    // Copy made before resolution counts on its own
    let mut fresh = Dependency::new("zlib");
    registry.verify_dependency(&mut fresh, None).unwrap();
    assert_eq!(registry.package(id).hits(), 2);

    // Copy of a resolved record shares the match
    let mut copy = dep.clone();
    registry.verify_dependency(&mut copy, None).unwrap();
    assert_eq!(registry.package(id).hits(), 2);
}

#[test]
fn test_verify_dependency_not_found() {
    let mut registry = Registry::new();
    let mut dep = Dependency::new("missing");

    let err = registry.verify_dependency(&mut dep, None).unwrap_err();
    assert_eq!(
        err,
        MatchError::NotFound {
            package: "missing".to_string()
        }
    );
    assert_eq!(dep.matched(), None);
}

#[test]
fn test_verify_dependency_version_mismatch() {
    let mut registry = registry(vec![Package::new("zlib").with_version("1.2")]);
    let mut dep = Dependency::new("zlib").with_constraint(Comparator::GreaterThanEqual, "1.3");

    let err = registry.verify_dependency(&mut dep, None).unwrap_err();
    assert!(matches!(err, MatchError::VersionMismatch { found, .. } if found == "1.2"));
    assert_eq!(dep.matched(), None);
    assert_eq!(registry.package(PackageId::from_index(0)).hits(), 0);
}

#[test]
fn test_verify_dependency_constraint_override() {
    let mut registry = registry(vec![Package::new("zlib").with_version("1.2")]);
    let mut dep = Dependency::new("zlib").with_constraint(Comparator::GreaterThanEqual, "1.3");
    let relaxed = Constraint::new(Comparator::GreaterThanEqual, "1.0");

    assert!(registry.verify_dependency(&mut dep, Some(&relaxed)).is_ok());
}

#[test]
fn test_verify_dependency_through_provider() {
    let mut registry = registry(vec![
        Package::new("libjpeg-turbo")
            .with_version("3.0.1")
            .with_provides("libjpeg = 8.0"),
    ]);
    let mut dep = Dependency::new("libjpeg").with_constraint(Comparator::GreaterThanEqual, "8");

    let id = registry.verify_dependency(&mut dep, None).unwrap();
    assert_eq!(registry.package(id).id, "libjpeg-turbo");
    assert_eq!(registry.package(id).hits(), 1);
}

// ============================================================================
// Manifest loading
// ============================================================================

const MANIFEST: &str = r#"
[[package]]
id = "libfoo"
name = "Foo library"
version = "1.2.0"
requires = "libbar >= 1.0"
requires_private = "zlib"

[[package]]
id = "libbar"
version = "1.1"
provides = "bar-compat = 1.1"
static = true

[[package]]
id = "zlib"
version = "1.3"
"#;

#[test]
fn test_from_toml_str() {
    let registry = Registry::from_toml_str(MANIFEST).unwrap();
    assert_eq!(registry.len(), 3);

    let foo = registry.package(registry.find("libfoo").unwrap());
    assert_eq!(foo.realname, "Foo library");
    assert_eq!(foo.version.as_deref(), Some("1.2.0"));
    assert_eq!(foo.required[0].to_atom(), "libbar >= 1.0");
    assert_eq!(foo.requires_private[0].package, "zlib");

    let bar = registry.package(registry.find("libbar").unwrap());
    assert!(bar.is_static());
    assert_eq!(bar.provides[0].package, "bar-compat");

    let zlib = registry.package(registry.find("zlib").unwrap());
    assert_eq!(zlib.realname, "zlib");
}

#[test]
fn test_from_toml_str_rejects_duplicates() {
    let manifest = "[[package]]\nid = \"a\"\n[[package]]\nid = \"a\"\n";
    assert!(matches!(
        Registry::from_toml_str(manifest),
        Err(RegistryError::DuplicatePackage { .. })
    ));
}

#[test]
fn test_from_toml_str_invalid() {
    assert!(matches!(
        Registry::from_toml_str("[[package]]\nname = 3\n"),
        Err(RegistryError::TomlParseError { .. })
    ));
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.toml");
    fs::write(&path, MANIFEST).unwrap();

    let registry = Registry::load(&path).unwrap();
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Registry::load(&temp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, RegistryError::FileReadError { .. }));
}

#[test]
#[should_panic]
fn test_package_lookup_panics_on_foreign_id() {
    let mut larger = registry(vec![Package::new("a"), Package::new("b")]);
    let id = larger.insert(Package::new("c")).unwrap();

    let smaller = registry(vec![Package::new("a")]);
    let _ = smaller.package(id);
}

#[test]
fn test_reset_pass_clears_hits_and_cached_matches() {
    let mut registry = registry(vec![
        Package::new("libfoo").with_requires("zlib"),
        Package::new("zlib"),
    ]);
    let foo = registry.find("libfoo").unwrap();
    let zlib = registry.find("zlib").unwrap();

    let mut dep = registry.package_mut(foo).required.remove(0);
    registry.verify_dependency(&mut dep, None).unwrap();
    registry.package_mut(foo).required.push(dep);
    assert_eq!(registry.package(zlib).hits(), 1);

    registry.reset_pass();

    assert_eq!(registry.package(zlib).hits(), 0);
    assert_eq!(registry.package(foo).required[0].matched(), None);
}
