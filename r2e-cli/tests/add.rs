use r2e_cli::commands::add;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn new(path: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        CwdGuard { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

fn minimal_cargo_toml() -> &'static str {
    "[package]\nname = \"test-app\"\nversion = \"0.1.0\"\n\n[dependencies]\nr2e = \"0.1\"\n"
}

#[test]
#[serial]
fn add_ws_feature() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("Cargo.toml", minimal_cargo_toml()).unwrap();

    add::run("ws").unwrap();

    let cargo = fs::read_to_string("Cargo.toml").unwrap();
    assert!(cargo.contains("features = [\"ws\"]"));
}

#[test]
#[serial]
fn add_multipart_feature() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("Cargo.toml", minimal_cargo_toml()).unwrap();

    add::run("multipart").unwrap();

    let cargo = fs::read_to_string("Cargo.toml").unwrap();
    assert!(cargo.contains("multipart"));
}

#[test]
#[serial]
fn add_unknown_feature_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("Cargo.toml", minimal_cargo_toml()).unwrap();

    let result = add::run("unknown-thing");
    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Unknown feature"));
    assert!(err.contains("Available:"));
}

#[test]
#[serial]
fn add_already_present_no_duplicate() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write(
        "Cargo.toml",
        "[package]\nname = \"test-app\"\nversion = \"0.1.0\"\n\n[dependencies]\nr2e = { version = \"0.1\", features = [\"ws\"] }\n",
    )
    .unwrap();

    // Should succeed without error (prints warning)
    add::run("ws").unwrap();

    let cargo = fs::read_to_string("Cargo.toml").unwrap();
    let count = cargo.matches("\"ws\"").count();
    assert_eq!(count, 1);
}

#[test]
#[serial]
fn add_no_cargo_toml_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    // No Cargo.toml

    let result = add::run("ws");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No Cargo.toml"));
}

#[test]
#[serial]
fn add_no_r2e_dependency_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write(
        "Cargo.toml",
        "[package]\nname = \"test-app\"\nversion = \"0.1.0\"\n\n[dependencies]\n",
    )
    .unwrap();

    let result = add::run("ws");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("r2e"));
}

#[test]
#[serial]
fn add_multiple_features() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("Cargo.toml", minimal_cargo_toml()).unwrap();

    add::run("ws").unwrap();
    add::run("multipart").unwrap();
    add::run("validation").unwrap();

    let cargo = fs::read_to_string("Cargo.toml").unwrap();
    assert!(cargo.contains("ws"));
    assert!(cargo.contains("multipart"));
    assert!(cargo.contains("validation"));
}

#[test]
#[serial]
fn add_all_known_features() {
    let known = ["ws", "multipart", "validation", "dev-reload"];

    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::write("Cargo.toml", minimal_cargo_toml()).unwrap();

    for feature in &known {
        add::run(feature).unwrap();
    }

    let cargo = fs::read_to_string("Cargo.toml").unwrap();
    for feature in &known {
        assert!(cargo.contains(feature), "Expected feature '{feature}' in Cargo.toml");
    }
}
