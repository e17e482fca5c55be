use super::*;
use crate::resolver::package::Registry;
use crate::resolver::session::SessionFlags;

fn session(packages: Vec<Package>) -> Session {
    let mut registry = Registry::new();
    for package in packages {
        registry.insert(package).unwrap();
    }
    Session::new(registry)
}

fn root(requires: &str) -> Package {
    Package::world().with_requires(requires)
}

/// Collect the ids of every visited package, in visit order
fn visit_order(session: &mut Session, root: &mut Package, depth: MaxDepth) -> (Vec<String>, Result<(), TraversalError>) {
    let mut seen = Vec::new();
    let result = session.traverse(root, &mut |node: &Package| seen.push(node.id.clone()), depth);
    (seen, result)
}

// ============================================================================
// Depth handling
// ============================================================================

#[test]
fn test_max_depth_from_raw() {
    assert_eq!(MaxDepth::from_raw(-1), MaxDepth::Unlimited);
    assert_eq!(MaxDepth::from_raw(-42), MaxDepth::Unlimited);
    assert_eq!(MaxDepth::from_raw(0), MaxDepth::Limited(0));
    assert_eq!(MaxDepth::from_raw(3), MaxDepth::Limited(3));
    assert_eq!(MaxDepth::Unlimited.as_raw(), -1);
    assert_eq!(MaxDepth::Limited(3).as_raw(), 3);
}

#[test]
fn test_max_depth_normalized() {
    assert_eq!(MaxDepth::Limited(0).normalized(), MaxDepth::Unlimited);
    assert_eq!(MaxDepth::Limited(1).normalized(), MaxDepth::Limited(1));
    assert_eq!(MaxDepth::Unlimited.normalized(), MaxDepth::Unlimited);
}

// ============================================================================
// Walk order and coverage
// ============================================================================

#[test]
fn test_traverse_visits_depth_first_in_list_order() {
    let mut session = session(vec![
        Package::new("a").with_requires("c"),
        Package::new("b"),
        Package::new("c").with_requires("d"),
        Package::new("d"),
    ]);
    let mut world = root("a, b");

    let (seen, result) = visit_order(&mut session, &mut world, MaxDepth::Unlimited);
    assert!(result.is_ok());
    assert_eq!(seen, vec!["virtual:world", "a", "c", "d", "b"]);
}

#[test]
fn test_traverse_visits_shared_package_once() {
    let mut session = session(vec![
        Package::new("a").with_requires("c"),
        Package::new("b").with_requires("c"),
        Package::new("c"),
    ]);
    let mut world = root("a, b");

    let (seen, _) = visit_order(&mut session, &mut world, MaxDepth::Unlimited);
    assert_eq!(seen, vec!["virtual:world", "a", "c", "b"]);
}

#[test]
fn test_traverse_terminates_on_cycle() {
    let mut session = session(vec![
        Package::new("a").with_requires("b"),
        Package::new("b").with_requires("a"),
    ]);
    let mut world = root("a");

    let (seen, result) = visit_order(&mut session, &mut world, MaxDepth::Unlimited);
    assert!(result.is_ok());
    assert_eq!(seen, vec!["virtual:world", "a", "b"]);
}

#[test]
fn test_traverse_depth_one_visits_only_root() {
    let mut session = session(vec![Package::new("a").with_requires("b"), Package::new("b")]);
    let mut world = root("a");

    let (seen, result) = visit_order(&mut session, &mut world, MaxDepth::Limited(1));
    assert!(result.is_ok());
    assert_eq!(seen, vec!["virtual:world"]);
    // Direct requirements are still resolved
    assert!(world.required[0].matched().is_some());
}

#[test]
fn test_traverse_depth_two_stops_below_direct_requests() {
    let mut session = session(vec![Package::new("a").with_requires("b"), Package::new("b")]);
    let mut world = root("a");

    let (seen, _) = visit_order(&mut session, &mut world, MaxDepth::Limited(2));
    assert_eq!(seen, vec!["virtual:world", "a"]);
}

#[test]
fn test_traverse_depth_zero_visits_nothing() {
    let mut session = session(vec![Package::new("a")]);
    let mut world = root("a");

    let (seen, result) = visit_order(&mut session, &mut world, MaxDepth::Limited(0));
    assert!(result.is_ok());
    assert!(seen.is_empty());
    assert_eq!(world.required[0].matched(), None);
}

#[test]
fn test_traverse_skip_root_virtual() {
    let mut session = session(vec![Package::new("a")]).with_flags(SessionFlags {
        skip_root_virtual: true,
        ..SessionFlags::default()
    });
    let mut world = root("a");

    let (seen, _) = visit_order(&mut session, &mut world, MaxDepth::Unlimited);
    assert_eq!(seen, vec!["a"]);
}

#[test]
fn test_traverse_private_edges_only_when_searching_private() {
    let packages = || {
        vec![
            Package::new("a").with_requires_private("p"),
            Package::new("p"),
        ]
    };

    let mut shared = session(packages());
    let (seen, _) = visit_order(&mut shared, &mut root("a"), MaxDepth::Unlimited);
    assert_eq!(seen, vec!["virtual:world", "a"]);

    let mut static_link = session(packages()).with_flags(SessionFlags {
        search_private: true,
        ..SessionFlags::default()
    });
    let (seen, _) = visit_order(&mut static_link, &mut root("a"), MaxDepth::Unlimited);
    assert_eq!(seen, vec!["virtual:world", "a", "p"]);
}

#[test]
fn test_traverse_restores_detached_lists() {
    let mut session = session(vec![Package::new("a").with_requires("b"), Package::new("b")]);
    let mut world = root("a");

    session.traverse(&mut world, &mut |_: &Package| {}, MaxDepth::Unlimited).unwrap();

    let registry = session.matcher();
    let a = registry.package(registry.find("a").unwrap());
    assert_eq!(a.required.len(), 1);
    assert!(a.required[0].matched().is_some());
}

#[test]
fn test_traverse_advances_serial() {
    let mut session = session(vec![Package::new("a")]);
    let before = session.serial();
    session
        .traverse(&mut root("a"), &mut |_: &Package| {}, MaxDepth::Unlimited)
        .unwrap();
    assert_eq!(session.serial(), before + 1);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_traverse_reports_missing_package_and_keeps_walking() {
    let mut session = session(vec![Package::new("a").with_requires("ghost"), Package::new("b")]);
    let mut world = root("a, b");

    let (seen, result) = visit_order(&mut session, &mut world, MaxDepth::Unlimited);
    assert_eq!(seen, vec!["virtual:world", "a", "b"]);
    assert_eq!(
        result,
        Err(TraversalError::PackageNotFound {
            package: "ghost".to_string(),
            required_by: "a".to_string(),
        })
    );
}

#[test]
fn test_traverse_reports_missing_package_at_depth_boundary() {
    let mut session = session(vec![]);
    let mut world = root("ghost");

    let (_, result) = visit_order(&mut session, &mut world, MaxDepth::Limited(1));
    assert!(matches!(result, Err(TraversalError::PackageNotFound { .. })));
}

#[test]
fn test_traverse_returns_first_failure() {
    let mut session = session(vec![Package::new("zlib").with_version("1.2")]);
    let mut world = root("zlib >= 2.0, ghost");

    let (_, result) = visit_order(&mut session, &mut world, MaxDepth::Unlimited);
    assert_eq!(
        result,
        Err(TraversalError::VersionMismatch {
            package: "zlib".to_string(),
            wanted: ">= 2.0".to_string(),
            found: "1.2".to_string(),
            required_by: "virtual:world".to_string(),
        })
    );
}
