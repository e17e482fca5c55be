use super::*;
use crate::resolver::dependency::Dependency;
use crate::resolver::package::{MatchError, PackageId, Registry, WORLD_ID};
use crate::resolver::session::SessionFlags;
use crate::resolver::traverse::TraversalError;
use crate::resolver::version::Constraint;
use std::cell::Cell;

// ============================================================================
// Test Utilities
// ============================================================================

fn registry(packages: Vec<Package>) -> Registry {
    let mut registry = Registry::new();
    for package in packages {
        registry.insert(package).unwrap();
    }
    registry
}

fn queue(atoms: &[&str]) -> Queue {
    atoms.iter().copied().collect()
}

fn ids<M: PackageMatcher>(session: &Session<M>, list: &[Dependency]) -> Vec<String> {
    list.iter()
        .map(|dep| {
            let id = dep.matched().expect("flattened records are matched");
            session.matcher().package(id).id.clone()
        })
        .collect()
}

/// pkgA requires pkgC publicly, pkgB requires pkgC privately
fn abc_registry() -> Registry {
    registry(vec![
        Package::new("pkgA").with_version("1.0").with_requires("pkgC"),
        Package::new("pkgB").with_version("1.0").with_requires_private("pkgC"),
        Package::new("pkgC").with_version("1.0"),
    ])
}

struct ForgetfulMatcher(Registry);

impl PackageMatcher for ForgetfulMatcher {
    fn package(&self, id: PackageId) -> &Package {
        self.0.package(id)
    }

    fn package_mut(&mut self, id: PackageId) -> &mut Package {
        self.0.package_mut(id)
    }

    fn verify_dependency(
        &mut self,
        dep: &mut Dependency,
        constraint: Option<&Constraint>,
    ) -> Result<PackageId, MatchError> {
        let id = self.0.verify_dependency(dep, constraint)?;
        dep.set_match(None);
        Ok(id)
    }

    fn reset_pass(&mut self) {
        self.0.reset_pass();
    }
}

// ============================================================================
// verify
// ============================================================================

#[test]
fn test_verify_empty_queue_is_graph_break() {
    let mut session = Session::new(abc_registry());
    let mut world = Package::world();

    let result = session.verify(&mut world, &Queue::new(), MaxDepth::Unlimited);
    assert_eq!(result, Err(ResolveError::GraphBreak));
    assert!(world.required.is_empty());
}

#[test]
fn test_verify_malformed_only_queue_is_graph_break() {
    let mut session = Session::new(abc_registry());
    let mut world = Package::world();

    let result = session.verify(&mut world, &queue(&[">= 1"]), MaxDepth::Unlimited);
    assert_eq!(result, Err(ResolveError::GraphBreak));
}

#[test]
fn test_verify_collects_transitive_requirements() {
    let mut session = Session::new(abc_registry());
    let mut world = Package::world();

    session
        .verify(&mut world, &queue(&["pkgA", "pkgB"]), MaxDepth::Unlimited)
        .unwrap();

    assert_eq!(ids(&session, &world.required), vec!["pkgC", "pkgA", "pkgB"]);
    assert_eq!(ids(&session, &world.requires_private), vec!["pkgC"]);
}

#[test]
fn test_verify_scenario_hits_order_pkg_c_first() {
    let mut session = Session::new(abc_registry());
    let mut world = Package::world();
    session
        .verify(&mut world, &queue(&["pkgA", "pkgB"]), MaxDepth::Unlimited)
        .unwrap();

    let registry = session.matcher();
    let hits = |name: &str| registry.package(registry.find(name).unwrap()).hits();
    // pkgC: pkgA's record during traversal plus the world's copy at flatten
    assert!(hits("pkgC") > hits("pkgA"));
    assert_eq!(hits("pkgA"), 1);
    assert_eq!(hits("pkgB"), 1);
}

#[test]
fn test_verify_no_duplicates_in_either_list() {
    let mut session = Session::new(registry(vec![
        Package::new("a").with_requires("c, d").with_requires_private("c"),
        Package::new("b").with_requires("c, a").with_requires_private("c, d"),
        Package::new("c").with_requires("d"),
        Package::new("d"),
    ]));
    let mut world = Package::world();

    session
        .verify(&mut world, &queue(&["a", "b", "a"]), MaxDepth::Unlimited)
        .unwrap();

    for list in [&world.required, &world.requires_private] {
        let mut seen = ids(&session, list);
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }
    assert_eq!(world.required.len(), 4);
    assert_eq!(world.requires_private.len(), 2);
}

#[test]
fn test_verify_world_never_in_its_own_lists() {
    let mut session = Session::new(abc_registry()).with_flags(SessionFlags {
        search_private: true,
        ..SessionFlags::default()
    });

    for _ in 0..3 {
        let mut world = Package::world();
        session
            .verify(&mut world, &queue(&["pkgA", "pkgB"]), MaxDepth::Unlimited)
            .unwrap();
        assert!(world.required.iter().all(|dep| dep.package != WORLD_ID));
        assert!(world.requires_private.iter().all(|dep| dep.package != WORLD_ID));
    }
}

#[test]
fn test_verify_depth_one_collects_nothing() {
    let mut session = Session::new(abc_registry());
    let mut world = Package::world();

    session
        .verify(&mut world, &queue(&["pkgA", "pkgB"]), MaxDepth::Limited(1))
        .unwrap();

    assert_eq!(ids(&session, &world.required), vec!["pkgA", "pkgB"]);
    assert!(world.requires_private.is_empty());
}

#[test]
fn test_verify_propagates_traversal_error() {
    let mut session = Session::new(registry(vec![Package::new("a").with_requires("ghost")]));
    let mut world = Package::world();

    let result = session.verify(&mut world, &queue(&["a"]), MaxDepth::Unlimited);
    assert_eq!(
        result,
        Err(ResolveError::Traversal(TraversalError::PackageNotFound {
            package: "ghost".to_string(),
            required_by: "a".to_string(),
        }))
    );
    // Nothing was merged or flattened
    assert_eq!(world.required.len(), 1);
}

#[test]
fn test_verify_advances_serial_per_step() {
    let mut session = Session::new(abc_registry());
    let mut world = Package::world();

    session
        .verify(&mut world, &queue(&["pkgA"]), MaxDepth::Unlimited)
        .unwrap();
    // traversal + one flatten per list
    assert_eq!(session.serial(), 3);
}

#[test]
fn test_verify_surfaces_internal_defect() {
    let mut session = Session::new(ForgetfulMatcher(abc_registry()));
    let mut world = Package::world();

    let err = session
        .verify(&mut world, &queue(&["pkgC"]), MaxDepth::Unlimited)
        .unwrap_err();
    assert!(err.is_internal_defect());
}

// ============================================================================
// resolve / apply / validate
// ============================================================================

#[test]
fn test_resolve_is_deterministic_across_sessions() {
    let run = || {
        let mut session = Session::new(abc_registry());
        let world = session
            .resolve(&queue(&["pkgB", "pkgA"]), MaxDepth::Unlimited)
            .unwrap();
        (
            ids(&session, &world.required),
            ids(&session, &world.requires_private),
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn test_resolve_twice_on_one_session_keeps_order() {
    let mut session = Session::new(registry(vec![
        Package::new("P").with_requires("R"),
        Package::new("Q"),
        Package::new("R"),
    ]));
    let queue = queue(&["P", "Q"]);

    let first = session.resolve(&queue, MaxDepth::Unlimited).unwrap();
    let first = ids(&session, &first.required);
    let second = session.resolve(&queue, MaxDepth::Unlimited).unwrap();
    let second = ids(&session, &second.required);

    assert_eq!(first, vec!["R", "P", "Q"]);
    assert_eq!(first, second);
}

#[test]
fn test_validate_then_apply_matches_apply_alone() {
    let expected = {
        let mut session = Session::new(abc_registry());
        let world = session
            .resolve(&queue(&["pkgA", "pkgB"]), MaxDepth::Unlimited)
            .unwrap();
        (
            ids(&session, &world.required),
            ids(&session, &world.requires_private),
        )
    };

    let mut session = Session::new(abc_registry());
    assert!(session.validate(&queue(&["pkgA", "pkgB"]), MaxDepth::Unlimited));
    let ok = session.apply(
        &queue(&["pkgA", "pkgB"]),
        |session, world, _| {
            (
                ids(session, &world.required),
                ids(session, &world.requires_private),
            ) == expected
        },
        MaxDepth::Unlimited,
    );
    assert!(ok);
}

#[test]
fn test_hits_count_the_current_pass_only() {
    let mut session = Session::new(abc_registry());
    let queue = queue(&["pkgA", "pkgB"]);
    let hits = |session: &Session| {
        let registry = session.matcher();
        ["pkgA", "pkgB", "pkgC"].map(|name| registry.package(registry.find(name).unwrap()).hits())
    };

    session.resolve(&queue, MaxDepth::Unlimited).unwrap();
    let first = hits(&session);
    session.resolve(&queue, MaxDepth::Unlimited).unwrap();

    assert_eq!(hits(&session), first);
}

#[test]
fn test_resolve_depth_zero_is_unlimited() {
    let mut session = Session::new(abc_registry());
    let world = session
        .resolve(&queue(&["pkgA"]), MaxDepth::Limited(0))
        .unwrap();
    assert_eq!(ids(&session, &world.required), vec!["pkgC", "pkgA"]);
}

#[test]
fn test_apply_passes_flattened_world_and_depth() {
    let mut session = Session::new(abc_registry());
    let called = Cell::new(false);

    let ok = session.apply(
        &queue(&["pkgA"]),
        |session, world, depth| {
            called.set(true);
            assert_eq!(world.id, WORLD_ID);
            assert_eq!(depth, MaxDepth::Unlimited);
            assert_eq!(ids(session, &world.required), vec!["pkgC", "pkgA"]);
            true
        },
        MaxDepth::Limited(0),
    );

    assert!(ok);
    assert!(called.get());
}

#[test]
fn test_apply_returns_continuation_result() {
    let mut session = Session::new(abc_registry());
    assert!(!session.apply(&queue(&["pkgA"]), |_, _, _| false, MaxDepth::Unlimited));
}

#[test]
fn test_apply_skips_continuation_on_failure() {
    let mut session = Session::new(abc_registry());
    let called = Cell::new(false);

    let ok = session.apply(
        &queue(&["ghost"]),
        |_, _, _| {
            called.set(true);
            true
        },
        MaxDepth::Unlimited,
    );

    assert!(!ok);
    assert!(!called.get());
}

#[test]
fn test_apply_keeps_limited_depth() {
    let mut session = Session::new(abc_registry());
    let ok = session.apply(
        &queue(&["pkgA"]),
        |session, world, depth| {
            assert_eq!(depth, MaxDepth::Limited(1));
            ids(session, &world.required) == vec!["pkgA"]
        },
        MaxDepth::Limited(1),
    );
    assert!(ok);
}

#[test]
fn test_validate() {
    let mut session = Session::new(abc_registry());
    assert!(session.validate(&queue(&["pkgA", "pkgB"]), MaxDepth::Unlimited));
    assert!(!session.validate(&Queue::new(), MaxDepth::Unlimited));
    assert!(!session.validate(&queue(&["pkgA >= 2.0"]), MaxDepth::Unlimited));
}

#[test]
fn test_validate_reports_internal_defect_as_failure() {
    let mut session = Session::new(ForgetfulMatcher(abc_registry()));
    assert!(!session.validate(&queue(&["pkgC"]), MaxDepth::Unlimited));
}
