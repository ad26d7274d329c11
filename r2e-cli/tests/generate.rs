use r2e_cli::commands::generate;
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

// ── Controller generation ────────────────────────────────────────────

#[test]
#[serial]
fn generate_controller_creates_file() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/controllers").unwrap();

    generate::controller("UserController").unwrap();

    assert!(Path::new("src/controllers/user_controller.rs").exists());
}

#[test]
#[serial]
fn generate_controller_valid_content() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/controllers").unwrap();

    generate::controller("UserController").unwrap();

    let content = fs::read_to_string("src/controllers/user_controller.rs").unwrap();
    assert!(content.contains("#[derive(Controller)]"));
    assert!(content.contains("pub struct UserController"));
    assert!(content.contains("#[routes]"));
    assert!(content.contains("impl UserController"));
}

#[test]
#[serial]
fn generate_controller_updates_mod_rs() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/controllers").unwrap();
    fs::write("src/controllers/mod.rs", "pub mod hello;\n").unwrap();

    generate::controller("UserController").unwrap();

    let mod_content = fs::read_to_string("src/controllers/mod.rs").unwrap();
    assert!(mod_content.contains("pub mod user_controller;"));
    assert!(mod_content.contains("pub mod hello;"));
}

#[test]
#[serial]
fn generate_controller_no_mod_rs_no_error() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/controllers").unwrap();
    // No mod.rs exists

    generate::controller("UserController").unwrap();

    assert!(Path::new("src/controllers/user_controller.rs").exists());
    // mod.rs should NOT be created when it didn't exist
    assert!(!Path::new("src/controllers/mod.rs").exists());
}

#[test]
#[serial]
fn generate_controller_already_exists_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/controllers").unwrap();
    fs::write("src/controllers/user_controller.rs", "existing").unwrap();

    let result = generate::controller("UserController");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

// ── Service generation ───────────────────────────────────────────────

#[test]
#[serial]
fn generate_service_creates_file() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src").unwrap();

    generate::service("UserService").unwrap();

    assert!(Path::new("src/user_service.rs").exists());
}

#[test]
#[serial]
fn generate_service_valid_content() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src").unwrap();

    generate::service("UserService").unwrap();

    let content = fs::read_to_string("src/user_service.rs").unwrap();
    assert!(content.contains("#[derive(Clone)]"));
    assert!(content.contains("pub struct UserService"));
    assert!(content.contains("pub fn new()"));
}

#[test]
#[serial]
fn generate_service_already_exists_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src").unwrap();
    fs::write("src/user_service.rs", "existing").unwrap();

    let result = generate::service("UserService");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

// ── CRUD generation ──────────────────────────────────────────────────

#[test]
#[serial]
fn generate_crud_creates_model_controller_and_service() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    generate::crud("User", &["name:String".into(), "email:String".into()]).unwrap();

    assert!(Path::new("src/models/user.rs").exists());
    assert!(Path::new("src/controllers/user_controller.rs").exists());
    assert!(Path::new("src/user_service.rs").exists());
}

#[test]
#[serial]
fn generate_crud_model_has_fields() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    generate::crud("User", &["name:String".into(), "age:i64".into()]).unwrap();

    let model = fs::read_to_string("src/models/user.rs").unwrap();
    assert!(model.contains("pub struct User"));
    assert!(model.contains("pub name: String"));
    assert!(model.contains("pub age: i64"));
}

#[test]
#[serial]
fn generate_crud_defaults_to_id_field_without_explicit_fields() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    generate::crud("User", &[]).unwrap();

    let model = fs::read_to_string("src/models/user.rs").unwrap();
    assert!(model.contains("pub id: i64"));
}

#[test]
#[serial]
fn generate_crud_controller_named_after_entity() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    generate::crud("User", &["name:String".into()]).unwrap();

    let controller = fs::read_to_string("src/controllers/user_controller.rs").unwrap();
    assert!(controller.contains("pub struct UserController"));
}

// ── Middleware generation ────────────────────────────────────────────

#[test]
#[serial]
fn generate_middleware_creates_file() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    generate::middleware("AuditLog").unwrap();

    assert!(Path::new("src/middleware/audit_log.rs").exists());
}

#[test]
#[serial]
fn generate_middleware_has_interceptor() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    generate::middleware("AuditLog").unwrap();

    let content = fs::read_to_string("src/middleware/audit_log.rs").unwrap();
    assert!(content.contains("pub struct AuditLog"));
    assert!(content.contains("Interceptor<R, S>"));
    assert!(content.contains("fn around"));
}

#[test]
#[serial]
fn generate_middleware_already_exists_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    fs::create_dir_all("src/middleware").unwrap();
    fs::write("src/middleware/audit_log.rs", "existing").unwrap();

    let result = generate::middleware("AuditLog");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}
