use super::*;
use crate::resolver::dependency::parse;
use crate::resolver::package::{MatchError, Package, Registry};
use crate::resolver::version::Constraint;

fn session(packages: Vec<Package>) -> Session {
    let mut registry = Registry::new();
    for package in packages {
        registry.insert(package).unwrap();
    }
    Session::new(registry)
}

fn packages(list: &[Dependency]) -> Vec<&str> {
    list.iter().map(|dep| dep.package.as_str()).collect()
}

/// Matcher that resolves records but forgets to record the match
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
// Deduplication
// ============================================================================

#[test]
fn test_flatten_keeps_one_record_per_package() {
    let mut session = session(vec![Package::new("a"), Package::new("b")]);
    let mut list = parse("a, b, a, a");

    session.flatten(&mut list).unwrap();

    // a resolved three times, b once
    assert_eq!(packages(&list), vec!["a", "b"]);
}

#[test]
fn test_flatten_drops_unresolved_records() {
    let mut session = session(vec![Package::new("a")]);
    let mut list = parse("ghost, a");

    session.flatten(&mut list).unwrap();
    assert_eq!(packages(&list), vec!["a"]);
}

#[test]
fn test_flatten_dedups_aliases_of_one_package() {
    let mut session = session(vec![
        Package::new("libjpeg-turbo").with_provides("libjpeg"),
    ]);
    let mut list = parse("libjpeg, libjpeg-turbo, libjpeg");

    session.flatten(&mut list).unwrap();
    assert_eq!(packages(&list), vec!["libjpeg"]);
}

#[test]
fn test_flatten_dedups_by_requested_name() {
    let mut session = session(vec![Package::new("foo"), Package::new("foo-legacy")]);
    let legacy = session.matcher().find("foo-legacy");

    // Two records asking for "foo" that ended up on different packages
    let mut stale = Dependency::new("foo");
    stale.set_match(legacy);
    let mut list = vec![stale, Dependency::new("foo")];

    session.flatten(&mut list).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].matched(), legacy);
}

#[test]
fn test_flatten_empty_list() {
    let mut session = session(vec![]);
    let mut list = Vec::new();
    session.flatten(&mut list).unwrap();
    assert!(list.is_empty());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_flatten_sorts_by_descending_hits() {
    let mut session = session(vec![Package::new("a"), Package::new("b"), Package::new("c")]);
    let mut list = parse("a, b, c, c, b, c");

    session.flatten(&mut list).unwrap();
    assert_eq!(packages(&list), vec!["c", "b", "a"]);
}

#[test]
fn test_flatten_ties_keep_first_accepted_order() {
    let mut session = session(vec![Package::new("a"), Package::new("b"), Package::new("c")]);
    let mut list = parse("b, c, a");

    session.flatten(&mut list).unwrap();
    assert_eq!(packages(&list), vec!["b", "c", "a"]);
}

#[test]
fn test_flatten_is_idempotent_on_flattened_list() {
    let mut session = session(vec![Package::new("a"), Package::new("b"), Package::new("c")]);
    let mut list = parse("a, b, b, c, b, c");

    session.flatten(&mut list).unwrap();
    let once = list.clone();
    session.flatten(&mut list).unwrap();

    assert_eq!(list, once);
}

#[test]
fn test_flatten_does_not_touch_serial() {
    let mut session = session(vec![Package::new("a")]);
    session.next_serial();
    let mut list = parse("a");

    session.flatten(&mut list).unwrap();
    assert_eq!(session.serial(), 1);
}

// ============================================================================
// Internal defects
// ============================================================================

#[test]
fn test_flatten_reports_unmatched_record_as_internal_defect() {
    let mut registry = Registry::new();
    registry.insert(Package::new("a")).unwrap();
    let mut session = Session::new(ForgetfulMatcher(registry));
    let mut list = parse("a");

    let err = session.flatten(&mut list).unwrap_err();
    assert!(err.is_internal_defect());
    assert!(matches!(err, ResolveError::InternalDefect { package } if package == "a"));
}
