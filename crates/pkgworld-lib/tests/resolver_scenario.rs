use pkgworld_lib::resolver::{
    DependentCollector, MaxDepth, Package, PackageMatcher, Queue, Registry, ResolveError,
    Session, SessionFlags, TraversalError, WORLD_ID,
};

const MANIFEST: &str = r#"
[[package]]
id = "pkgA"
version = "1.0"
requires = "pkgC"

[[package]]
id = "pkgB"
version = "1.0"
requires-private = "pkgC"

[[package]]
id = "pkgC"
version = "1.0"

[[package]]
id = "openssl"
version = "3.0.2"
requires = "libcrypto = 3.0.2, zlib"
requires_private = "libdl"

[[package]]
id = "libcrypto"
version = "3.0.2"

[[package]]
id = "zlib"
version = "1.3"
provides = "libz = 1.3"

[[package]]
id = "libdl"
version = "2.38"
"#;

fn session() -> Session {
    Session::new(Registry::from_toml_str(MANIFEST).unwrap())
}

fn ids(session: &Session, list: &[pkgworld_lib::resolver::Dependency]) -> Vec<String> {
    list.iter()
        .map(|dep| session.matcher().package(dep.matched().unwrap()).id.clone())
        .collect()
}

#[test]
fn test_abc_scenario() {
    let mut session = session();
    let queue: Queue = ["pkgA", "pkgB"].into_iter().collect();

    let world = session.resolve(&queue, MaxDepth::Unlimited).unwrap();

    assert_eq!(world.id, WORLD_ID);
    assert_eq!(ids(&session, &world.required), ["pkgC", "pkgA", "pkgB"]);
    assert_eq!(ids(&session, &world.requires_private), ["pkgC"]);
}

#[test]
fn test_static_resolution_pulls_private_chain() {
    let mut session = session().with_flags(SessionFlags {
        search_private: true,
        ..SessionFlags::default()
    });
    let queue: Queue = ["openssl >= 3.0"].into_iter().collect();

    let world = session.resolve(&queue, MaxDepth::Unlimited).unwrap();

    let required = ids(&session, &world.required);
    assert_eq!(required.len(), 3);
    for id in ["openssl", "libcrypto", "zlib"] {
        assert!(required.iter().any(|found| found == id), "missing {id}");
    }
    assert_eq!(ids(&session, &world.requires_private), ["libdl"]);
}

#[test]
fn test_virtual_provider_resolves() {
    let mut session = session();
    let queue: Queue = ["libz >= 1.2"].into_iter().collect();

    let world = session.resolve(&queue, MaxDepth::Unlimited).unwrap();
    assert_eq!(ids(&session, &world.required), ["zlib"]);
}

#[test]
fn test_version_mismatch_names_the_requester() {
    let mut session = session();
    let queue: Queue = ["openssl < 3.0"].into_iter().collect();

    let err = session.resolve(&queue, MaxDepth::Unlimited).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Traversal(TraversalError::VersionMismatch { ref package, .. })
            if package == "openssl"
    ));
}

#[test]
fn test_empty_request_is_graph_break() {
    let mut session = session();
    let err = session.resolve(&Queue::new(), MaxDepth::Unlimited).unwrap_err();
    assert_eq!(err, ResolveError::GraphBreak);
}

#[test]
fn test_manual_pipeline_with_collector() {
    let mut session = session();
    let queue: Queue = ["pkgA"].into_iter().collect();
    let mut world = Package::world();

    assert!(queue.compile(&mut world));
    let mut collector = DependentCollector::new(&world);
    session
        .traverse(&mut world, &mut collector, MaxDepth::Unlimited)
        .unwrap();
    assert_eq!(collector.required().len(), 1);

    collector.into_world(&mut world);
    session.flatten(&mut world.required).unwrap();
    assert_eq!(ids(&session, &world.required), ["pkgC", "pkgA"]);
}

#[test]
fn test_validate_and_apply_agree() {
    let mut session = session();
    let queue: Queue = ["pkgB"].into_iter().collect();

    assert!(session.validate(&queue, MaxDepth::Unlimited));
    assert!(session.apply(&queue, |_, world, _| !world.required.is_empty(), MaxDepth::Unlimited));
}
