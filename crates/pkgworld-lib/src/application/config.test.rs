use super::*;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.registry, None);
    assert_eq!(config.max_depth, 0);
    assert!(!config.static_link);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorChoice::Auto);
}

#[test]
fn test_config_merging_takes_non_defaults() {
    let base = AppConfig {
        registry: Some(PathBuf::from("base.toml")),
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        max_depth: 3,
        static_link: true,
        log_level: 4,
        color: ColorChoice::Never,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.registry, Some(PathBuf::from("base.toml")));
    assert_eq!(merged.max_depth, 3);
    assert!(merged.static_link);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorChoice::Never);
    assert_eq!(merged.log_format, LogFormat::Text);
}

#[test]
fn test_config_merging_registry_override() {
    let base = AppConfig {
        registry: Some(PathBuf::from("base.toml")),
        ..AppConfig::default()
    };
    let merged = base.merge_with(AppConfig {
        registry: Some(PathBuf::from("cli.toml")),
        ..AppConfig::default()
    });
    assert_eq!(merged.registry, Some(PathBuf::from("cli.toml")));
}

#[test]
fn test_max_depth_mapping() {
    let depth = |raw| {
        AppConfig {
            max_depth: raw,
            ..AppConfig::default()
        }
        .max_depth()
        .normalized()
    };
    assert_eq!(depth(0), MaxDepth::Unlimited);
    assert_eq!(depth(-1), MaxDepth::Unlimited);
    assert_eq!(depth(2), MaxDepth::Limited(2));
}

#[test]
fn test_session_flags_follow_static_link() {
    let config = AppConfig {
        static_link: true,
        ..AppConfig::default()
    };
    assert!(config.to_session_flags().search_private);
    assert!(!AppConfig::default().to_session_flags().search_private);
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        log_output: LogOutput::Stdout,
        color: ColorChoice::Always,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Debug);
    assert_eq!(logger.format, LogFormat::Json);
    assert_eq!(logger.output, LogOutput::Stdout);
    assert_eq!(logger.color, ColorChoice::Always);
}

#[test]
fn test_validate_defaults_registry_to_working_directory() {
    let mut config = AppConfig::default();
    config.validate().unwrap();

    let registry = config.registry.unwrap();
    assert!(registry.ends_with(defaults::REGISTRY_FILE));
    assert!(registry.is_absolute());
}

#[test]
fn test_validate_keeps_explicit_registry() {
    let mut config = AppConfig {
        registry: Some(PathBuf::from("custom/registry.toml")),
        ..AppConfig::default()
    };
    config.validate().unwrap();
    assert_eq!(config.registry, Some(PathBuf::from("custom/registry.toml")));
}

#[test]
fn test_validate_rejects_log_level_out_of_range() {
    let mut config = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_config_parses_from_args() {
    let config = AppConfig::try_parse_from([
        "pkgworld",
        "--registry",
        "r.toml",
        "--max-depth",
        "-1",
        "--static",
        "--log-format",
        "json",
    ])
    .unwrap();
    assert_eq!(config.registry, Some(PathBuf::from("r.toml")));
    assert_eq!(config.max_depth, -1);
    assert!(config.static_link);
    assert_eq!(config.log_format, LogFormat::Json);
}
