use super::*;

fn atoms(deps: &[Dependency]) -> Vec<String> {
    deps.iter().map(Dependency::to_atom).collect()
}

// ============================================================================
// Atom parsing
// ============================================================================

#[test]
fn test_parse_single_name() {
    let deps = parse("libfoo");
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].package, "libfoo");
    assert_eq!(deps[0].constraint, None);
    assert_eq!(deps[0].matched(), None);
}

#[test]
fn test_parse_name_with_constraint() {
    let deps = parse("libfoo >= 1.2");
    assert_eq!(deps.len(), 1);
    assert_eq!(
        deps[0].constraint,
        Some(Constraint::new(Comparator::GreaterThanEqual, "1.2"))
    );
}

#[test]
fn test_parse_constraint_without_spaces() {
    let deps = parse("libfoo>=1.2,libbar<2");
    assert_eq!(atoms(&deps), vec!["libfoo >= 1.2", "libbar < 2"]);
}

#[test]
fn test_parse_mixed_separators() {
    let deps = parse("a b >= 1.0, c");
    assert_eq!(atoms(&deps), vec!["a", "b >= 1.0", "c"]);
}

#[test]
fn test_parse_preserves_duplicates_and_order() {
    let deps = parse("zlib, libpng, zlib");
    assert_eq!(atoms(&deps), vec!["zlib", "libpng", "zlib"]);
}

#[test]
fn test_parse_empty_input() {
    assert!(parse("").is_empty());
    assert!(parse("  ,, ").is_empty());
}

#[test]
fn test_parse_skips_operator_without_name() {
    let deps = parse(">= 1.0, libfoo");
    assert_eq!(atoms(&deps), vec!["libfoo"]);
}

#[test]
fn test_parse_skips_operator_without_version() {
    let deps = parse("libfoo >=, libbar");
    assert_eq!(atoms(&deps), vec!["libbar"]);

    let deps = parse("libbar, libfoo >=");
    assert_eq!(atoms(&deps), vec!["libbar"]);
}

#[test]
fn test_parse_skips_unknown_operator() {
    let deps = parse("libfoo => 1.0 libbar");
    assert_eq!(atoms(&deps), vec!["libbar"]);
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_clone_shares_match_handle() {
    let mut dep = Dependency::new("libfoo");
    dep.set_match(Some(PackageId::from_index(3)));

    let mut copy = dep.clone();
    assert_eq!(copy.matched(), dep.matched());

    copy.set_match(None);
    assert_eq!(dep.matched(), Some(PackageId::from_index(3)));
}

#[test]
fn test_display_renders_atom() {
    let dep = Dependency::new("libfoo").with_constraint(Comparator::Equal, "1.0");
    assert_eq!(dep.to_string(), "libfoo = 1.0");
}
