use super::*;

#[test]
fn test_compare_equal_strings() {
    assert_eq!(compare("1.2.3", "1.2.3"), Ordering::Equal);
    assert_eq!(compare("", ""), Ordering::Equal);
}

#[test]
fn test_compare_numeric_segments() {
    assert_eq!(compare("1.2", "1.10"), Ordering::Less);
    assert_eq!(compare("2.0", "1.99"), Ordering::Greater);
    assert_eq!(compare("1.002", "1.2"), Ordering::Equal);
}

#[test]
fn test_compare_extra_segments_are_newer() {
    assert_eq!(compare("1.0", "1.0.1"), Ordering::Less);
    assert_eq!(compare("1.0.1", "1.0"), Ordering::Greater);
}

#[test]
fn test_compare_numeric_beats_alpha() {
    assert_eq!(compare("1.0a", "1.0.1"), Ordering::Less);
    assert_eq!(compare("1.0.1", "1.0a"), Ordering::Greater);
}

#[test]
fn test_compare_alpha_segments() {
    assert_eq!(compare("1.0alpha", "1.0beta"), Ordering::Less);
    assert_eq!(compare("1.0b", "1.0a"), Ordering::Greater);
}

#[test]
fn test_compare_tilde_is_prerelease() {
    assert_eq!(compare("1.0~rc1", "1.0"), Ordering::Less);
    assert_eq!(compare("1.0", "1.0~rc1"), Ordering::Greater);
    assert_eq!(compare("1.0~rc1", "1.0~rc2"), Ordering::Less);
}

#[test]
fn test_compare_ignores_separator_kind() {
    assert_eq!(compare("1_2", "1.2"), Ordering::Equal);
    assert_eq!(compare("1-2", "1+2"), Ordering::Equal);
}

#[test]
fn test_comparator_from_operator() {
    assert_eq!(Comparator::from_operator("<"), Some(Comparator::LessThan));
    assert_eq!(Comparator::from_operator("<="), Some(Comparator::LessThanEqual));
    assert_eq!(Comparator::from_operator("="), Some(Comparator::Equal));
    assert_eq!(Comparator::from_operator("=="), Some(Comparator::Equal));
    assert_eq!(Comparator::from_operator("!="), Some(Comparator::NotEqual));
    assert_eq!(Comparator::from_operator(">="), Some(Comparator::GreaterThanEqual));
    assert_eq!(Comparator::from_operator(">"), Some(Comparator::GreaterThan));
    assert_eq!(Comparator::from_operator("=>"), None);
    assert_eq!(Comparator::from_operator("!"), None);
}

#[test]
fn test_comparator_eval() {
    assert!(Comparator::GreaterThanEqual.eval("1.2", "1.2"));
    assert!(Comparator::GreaterThanEqual.eval("1.3", "1.2"));
    assert!(!Comparator::GreaterThanEqual.eval("1.1", "1.2"));
    assert!(Comparator::LessThan.eval("1.1", "1.2"));
    assert!(!Comparator::LessThan.eval("1.2", "1.2"));
    assert!(Comparator::NotEqual.eval("1.1", "1.2"));
    assert!(Comparator::Equal.eval("1.02", "1.2"));
    assert!(Comparator::GreaterThan.eval("2", "1.9.9"));
    assert!(Comparator::LessThanEqual.eval("1.2", "1.2"));
}

#[test]
fn test_constraint_requires_version() {
    let constraint = Constraint::new(Comparator::GreaterThanEqual, "1.0");
    assert!(constraint.satisfied_by(Some("1.0")));
    assert!(!constraint.satisfied_by(Some("0.9")));
    assert!(!constraint.satisfied_by(None));
}

#[test]
fn test_constraint_display() {
    let constraint = Constraint::new(Comparator::LessThan, "2.0");
    assert_eq!(constraint.to_string(), "< 2.0");
}
