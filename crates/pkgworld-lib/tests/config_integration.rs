use pkgworld_lib::application::config::AppConfig;
use pkgworld_lib::application::{Cli, Commands};
use pkgworld_lib::primitives::{ColorChoice, ConfigError, LogFormat};
use pkgworld_lib::resolver::MaxDepth;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.max_depth(), MaxDepth::Limited(0));
    assert_eq!(config.max_depth().normalized(), MaxDepth::Unlimited);
    assert_eq!(config.color, ColorChoice::Auto);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig {
        registry: Some(PathBuf::from("from-env.toml")),
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        static_link: true,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.log_format, LogFormat::Json);
    assert!(merged.static_link);
    assert!(merged.to_session_flags().search_private);
    assert_eq!(merged.registry, Some(PathBuf::from("from-env.toml")));
}

#[test]
fn test_cli_flags_flow_into_loaded_config() {
    let cli = Cli::try_parse_from([
        "pkgworld",
        "--registry",
        "packages.toml",
        "--max-depth",
        "2",
        "validate",
        "zlib",
    ])
    .unwrap();

    let config = AppConfig::load_with(cli.config).unwrap();
    assert_eq!(config.registry, Some(PathBuf::from("packages.toml")));
    assert_eq!(config.max_depth(), MaxDepth::Limited(2));
    assert!(matches!(cli.command, Some(Commands::Validate { .. })));
}

#[test]
fn test_config_validation_error_display() {
    let mut config = AppConfig {
        log_level: 12,
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    assert!(err.to_string().contains("12"));
}
