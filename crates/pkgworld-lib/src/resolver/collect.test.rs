use super::*;
use crate::resolver::package::Registry;
use crate::resolver::session::Session;
use crate::resolver::traverse::MaxDepth;

fn packages(list: &[Dependency]) -> Vec<&str> {
    list.iter().map(|dep| dep.package.as_str()).collect()
}

#[test]
fn test_collector_ignores_its_world() {
    let world = Package::world().with_requires("a, b");
    let mut collector = DependentCollector::new(&world);

    collector.visit(&world);
    assert!(collector.required().is_empty());
    assert!(collector.requires_private().is_empty());
}

#[test]
fn test_collector_copies_both_lists_in_order() {
    let world = Package::world();
    let mut collector = DependentCollector::new(&world);

    collector.visit(&Package::new("a").with_requires("x, y").with_requires_private("p"));
    collector.visit(&Package::new("b").with_requires("z, x"));

    assert_eq!(packages(collector.required()), vec!["x", "y", "z", "x"]);
    assert_eq!(packages(collector.requires_private()), vec!["p"]);
}

#[test]
fn test_collector_only_appends_to_world() {
    let mut world = Package::world().with_requires("a");
    let mut collector = DependentCollector::new(&world);
    collector.visit(&Package::new("a").with_requires("b").with_requires_private("c"));

    collector.into_world(&mut world);
    assert_eq!(packages(&world.required), vec!["a", "b"]);
    assert_eq!(packages(&world.requires_private), vec!["c"]);
}

#[test]
fn test_collector_copies_share_matches() {
    let mut registry = Registry::new();
    registry.insert(Package::new("a").with_requires("b")).unwrap();
    registry.insert(Package::new("b")).unwrap();
    let mut session = Session::new(registry);

    // First pass resolves a's records in the registry
    let mut first = Package::world().with_requires("a");
    session
        .traverse(&mut first, &mut |_: &Package| {}, MaxDepth::Unlimited)
        .unwrap();

    let mut world = Package::world().with_requires("a");
    let mut collector = DependentCollector::new(&world);
    session
        .traverse(&mut world, &mut collector, MaxDepth::Unlimited)
        .unwrap();

    let b = session.matcher().find("b");
    assert_eq!(collector.required()[0].matched(), b);
}

#[test]
fn test_collector_through_traversal() {
    let mut registry = Registry::new();
    registry
        .insert(Package::new("a").with_requires("c").with_requires_private("p"))
        .unwrap();
    registry.insert(Package::new("b").with_requires("c")).unwrap();
    registry.insert(Package::new("c").with_requires("d")).unwrap();
    registry.insert(Package::new("d")).unwrap();
    registry.insert(Package::new("p")).unwrap();
    let mut session = Session::new(registry);

    let mut world = Package::world().with_requires("a, b");
    let mut collector = DependentCollector::new(&world);
    session
        .traverse(&mut world, &mut collector, MaxDepth::Unlimited)
        .unwrap();
    collector.into_world(&mut world);

    // a, c, d, b visited in that order
    assert_eq!(packages(&world.required), vec!["a", "b", "c", "d", "c"]);
    assert_eq!(packages(&world.requires_private), vec!["p"]);
}
