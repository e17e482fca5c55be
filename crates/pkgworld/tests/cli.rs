use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
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
version = "1.0"
"#;

fn write_manifest(dir: &Path) -> PathBuf {
    let path = dir.join("pkgworld.toml");
    std::fs::write(&path, MANIFEST).unwrap();
    path
}

fn pkgworld(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pkgworld"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("PKGWORLD_REGISTRY")
        .env_remove("PKGWORLD_MAX_DEPTH")
        .env_remove("PKGWORLD_STATIC");
    cmd
}

#[test]
fn test_resolve_uses_registry_in_working_directory() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path());

    pkgworld(&dir)
        .args(["resolve", "pkgA", "pkgB"])
        .assert()
        .success()
        .stdout("[required]\npkgC\npkgA\npkgB\n[requires_private]\npkgC\n");
}

#[test]
fn test_resolve_json() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path());

    pkgworld(&dir)
        .arg("--registry")
        .arg(&manifest)
        .args(["resolve", "--json", "pkgA >= 1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_depth\": -1"))
        .stdout(predicate::str::contains("\"atom\": \"pkgA >= 1.0\""));
}

#[test]
fn test_registry_from_environment() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path());
    let elsewhere = TempDir::new().unwrap();

    pkgworld(&elsewhere)
        .env("PKGWORLD_REGISTRY", &manifest)
        .arg("list")
        .assert()
        .success()
        .stdout("pkgA 1.0\npkgB 1.0\npkgC 1.0\n");
}

#[test]
fn test_validate_exit_status() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path());

    pkgworld(&dir)
        .args(["validate", "pkgA"])
        .assert()
        .success()
        .stdout("ok\n");

    pkgworld(&dir)
        .args(["validate", "pkgA > 1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_unknown_package_fails() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path());

    pkgworld(&dir)
        .args(["resolve", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve: ghost"));
}

#[test]
fn test_missing_registry_reports_path() {
    let dir = TempDir::new().unwrap();

    pkgworld(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pkgworld.toml"));
}
