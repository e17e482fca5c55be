use super::*;
use crate::primitives::ColorChoice;
use std::path::PathBuf;

#[test]
fn test_load_with_applies_cli_values() {
    let cli = AppConfig {
        registry: Some(PathBuf::from("cli.toml")),
        max_depth: 2,
        color: ColorChoice::Never,
        ..AppConfig::default()
    };

    let config = AppConfig::load_with(cli).unwrap();
    assert_eq!(config.registry, Some(PathBuf::from("cli.toml")));
    assert_eq!(config.max_depth, 2);
    assert_eq!(config.color, ColorChoice::Never);
}

#[test]
fn test_load_with_validates() {
    let cli = AppConfig {
        log_level: 7,
        ..AppConfig::default()
    };
    assert!(matches!(
        AppConfig::load_with(cli),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_load_with_fills_default_registry() {
    let config = AppConfig::load_with(AppConfig::default()).unwrap();
    assert!(config.registry.is_some());
}

#[test]
fn test_init_global_once() {
    let first = AppConfig::init_global(AppConfig::default());
    let second = AppConfig::init_global(AppConfig::default());

    // Another test may have initialized first; at most one call succeeds
    assert!(first.is_err() || second.is_err());
    assert!(matches!(second, Err(ConfigError::AlreadyInitialized)));
    assert!(AppConfig::global().is_some());
}
