use super::*;

#[test]
fn test_filter_directive_scopes_crate_levels() {
    assert_eq!(
        filter_directive(LogLevel::Debug),
        "pkgworld=debug,pkgworld_lib=debug,warn"
    );
    assert_eq!(
        filter_directive(LogLevel::Trace),
        "pkgworld=trace,pkgworld_lib=trace,warn"
    );
}

#[test]
fn test_filter_directive_error_silences_dependencies() {
    assert_eq!(
        filter_directive(LogLevel::Error),
        "pkgworld=error,pkgworld_lib=error,error"
    );
}

#[test]
fn test_filter_directive_parses() {
    for verbosity in 0..=4 {
        let directive = filter_directive(LogLevel::from_verbosity(verbosity));
        assert!(EnvFilter::try_new(&directive).is_ok(), "{directive}");
    }
}

#[test]
fn test_use_ansi_explicit_choices() {
    assert!(use_ansi(ColorChoice::Always, LogOutput::Stderr));
    assert!(use_ansi(ColorChoice::Always, LogOutput::Stdout));
    assert!(!use_ansi(ColorChoice::Never, LogOutput::Stderr));
    assert!(!use_ansi(ColorChoice::Never, LogOutput::Stdout));
}
