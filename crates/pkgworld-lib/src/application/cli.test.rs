use super::*;
use clap::CommandFactory;
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_resolve_with_global_options() {
    let cli = Cli::try_parse_from([
        "pkgworld",
        "--registry",
        "world.toml",
        "--static",
        "resolve",
        "libfoo >= 1.2",
        "zlib",
        "--json",
    ])
    .unwrap();

    assert_eq!(cli.config.registry, Some(PathBuf::from("world.toml")));
    assert!(cli.config.static_link);
    assert_eq!(
        cli.command,
        Some(Commands::Resolve {
            atoms: vec!["libfoo >= 1.2".to_string(), "zlib".to_string()],
            json: true,
        })
    );
}

#[test]
fn test_parse_validate() {
    let cli = Cli::try_parse_from(["pkgworld", "validate", "zlib"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Validate {
            atoms: vec!["zlib".to_string()],
        })
    );
}

#[test]
fn test_resolve_requires_atoms() {
    assert!(Cli::try_parse_from(["pkgworld", "resolve"]).is_err());
}

#[test]
fn test_parse_list_and_no_command() {
    let cli = Cli::try_parse_from(["pkgworld", "list"]).unwrap();
    assert_eq!(cli.command, Some(Commands::List));

    let cli = Cli::try_parse_from(["pkgworld"]).unwrap();
    assert_eq!(cli.command, None);
}

#[test]
fn test_cli_config_from_cli() {
    let cli = Cli::try_parse_from(["pkgworld", "--max-depth", "3", "list"]).unwrap();
    let config = CliConfig::from(cli);
    assert_eq!(config.app_config.max_depth, 3);
    assert_eq!(config.command, Some(Commands::List));
}
