use super::*;
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[package]]
id = "pkgA"
version = "1.0"
requires = "pkgC"

[[package]]
id = "pkgB"
version = "1.0"
requires-private = "pkgC"

[[package]]
id = "pkgC"
name = "Package C"
version = "1.0"
"#;

fn write_manifest(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("pkgworld.toml");
    std::fs::write(&path, MANIFEST).unwrap();
    path
}

fn config_for(dir: &TempDir) -> AppConfig {
    AppConfig {
        registry: Some(write_manifest(dir.path())),
        ..AppConfig::default()
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_config(command, config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn atoms(list: &[&str]) -> Vec<String> {
    list.iter().map(|atom| atom.to_string()).collect()
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn test_resolve_text_output() {
    let dir = TempDir::new().unwrap();
    let output = run(
        Commands::Resolve {
            atoms: atoms(&["pkgA", "pkgB"]),
            json: false,
        },
        &config_for(&dir),
    )
    .unwrap();

    assert_eq!(
        output,
        "[required]\npkgC\npkgA\npkgB\n[requires_private]\npkgC\n"
    );
}

#[test]
fn test_resolve_json_output() {
    let dir = TempDir::new().unwrap();
    let output = run(
        Commands::Resolve {
            atoms: atoms(&["pkgA >= 1.0"]),
            json: true,
        },
        &config_for(&dir),
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["max_depth"], -1);
    assert_eq!(value["required"][0]["id"], "pkgC");
    assert_eq!(value["required"][0]["name"], "Package C");
    assert_eq!(value["required"][1]["atom"], "pkgA >= 1.0");
    assert_eq!(value["requires_private"], serde_json::json!([]));
}

#[test]
fn test_resolve_respects_max_depth() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        max_depth: 1,
        ..config_for(&dir)
    };
    let output = run(
        Commands::Resolve {
            atoms: atoms(&["pkgA"]),
            json: false,
        },
        &config,
    )
    .unwrap();

    assert_eq!(output, "[required]\npkgA\n[requires_private]\n");
}

#[test]
fn test_resolve_unknown_package_fails() {
    let dir = TempDir::new().unwrap();
    let err = run(
        Commands::Resolve {
            atoms: atoms(&["ghost"]),
            json: false,
        },
        &config_for(&dir),
    )
    .unwrap_err();

    assert!(err.to_string().contains("ghost"));
}

// ============================================================================
// validate / list
// ============================================================================

#[test]
fn test_validate_success_and_failure() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    let output = run(
        Commands::Validate {
            atoms: atoms(&["pkgB"]),
        },
        &config,
    )
    .unwrap();
    assert_eq!(output, "ok\n");

    assert!(
        run(
            Commands::Validate {
                atoms: atoms(&["pkgA > 1.0"]),
            },
            &config,
        )
        .is_err()
    );
}

#[test]
fn test_list_prints_registry_in_manifest_order() {
    let dir = TempDir::new().unwrap();
    let output = run(Commands::List, &config_for(&dir)).unwrap();
    assert_eq!(output, "pkgA 1.0\npkgB 1.0\npkgC 1.0\n");
}

#[test]
fn test_missing_registry_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        registry: Some(dir.path().join("absent.toml")),
        ..AppConfig::default()
    };

    let err = run(Commands::List, &config).unwrap_err();
    assert!(err.to_string().contains("Failed to load registry"));
}

#[test]
fn test_no_command_prints_usage_hint() {
    let mut out = Vec::new();
    execute_command(
        CliConfig {
            app_config: AppConfig::default(),
            command: None,
        },
        &mut out,
    )
    .unwrap();
    assert!(String::from_utf8(out).unwrap().contains("pkgworld --help"));
}
