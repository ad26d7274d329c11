use r2e_cli::commands::new_project::{self, CliNewOpts};
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

fn default_opts() -> CliNewOpts {
    CliNewOpts {
        ws: false,
        multipart: false,
        validation: false,
        full: false,
        no_interactive: true,
    }
}

// ── Basic project creation ──────────────────────────────────────────

#[test]
#[serial]
fn new_creates_project_dir() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    assert!(Path::new("myapp").is_dir());
}

#[test]
#[serial]
fn new_creates_cargo_toml() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    let cargo = fs::read_to_string("myapp/Cargo.toml").unwrap();
    assert!(cargo.contains("name = \"myapp\""));
    assert!(cargo.contains("r2e"));
    assert!(cargo.contains("tokio"));
}

#[test]
#[serial]
fn new_creates_main_rs() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    let main = fs::read_to_string("myapp/src/main.rs").unwrap();
    assert!(main.contains("#[r2e::main]"));
    assert!(main.contains("serve("));
    assert!(main.contains("AppBuilder"));
}

#[test]
#[serial]
fn new_creates_state_rs() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    let state = fs::read_to_string("myapp/src/state.rs").unwrap();
    assert!(state.contains("pub struct AppState"));
    assert!(state.contains("BeanState"));
}

#[test]
#[serial]
fn new_creates_hello_controller() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    assert!(Path::new("myapp/src/controllers/hello.rs").exists());
    let hello = fs::read_to_string("myapp/src/controllers/hello.rs").unwrap();
    assert!(hello.contains("HelloController"));

    let mod_rs = fs::read_to_string("myapp/src/controllers/mod.rs").unwrap();
    assert!(mod_rs.contains("pub mod hello;"));
}

#[test]
#[serial]
fn new_creates_application_yaml() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    let yaml = fs::read_to_string("myapp/application.yaml").unwrap();
    assert!(yaml.contains("myapp"));
}

#[test]
#[serial]
fn new_creates_gitignore() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    new_project::run("myapp", default_opts()).unwrap();

    let gitignore = fs::read_to_string("myapp/.gitignore").unwrap();
    assert!(gitignore.contains("/target"));
}

// ── Feature flags ───────────────────────────────────────────────────

#[test]
#[serial]
fn new_with_ws() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    let mut opts = default_opts();
    opts.ws = true;
    new_project::run("myapp", opts).unwrap();

    let cargo = fs::read_to_string("myapp/Cargo.toml").unwrap();
    assert!(cargo.contains("\"ws\""));
}

#[test]
#[serial]
fn new_with_multipart_and_validation() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    let mut opts = default_opts();
    opts.multipart = true;
    opts.validation = true;
    new_project::run("myapp", opts).unwrap();

    let cargo = fs::read_to_string("myapp/Cargo.toml").unwrap();
    assert!(cargo.contains("\"multipart\""));
    assert!(cargo.contains("\"validation\""));
}

#[test]
#[serial]
fn new_full_enables_every_feature() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    let mut opts = default_opts();
    opts.full = true;
    new_project::run("myapp", opts).unwrap();

    let cargo = fs::read_to_string("myapp/Cargo.toml").unwrap();
    assert!(cargo.contains("\"ws\""));
    assert!(cargo.contains("\"multipart\""));
    assert!(cargo.contains("\"validation\""));
}

#[test]
#[serial]
fn new_no_interactive_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    // no_interactive with no flags → minimal project, no feature list at all
    new_project::run("myapp", default_opts()).unwrap();

    let cargo = fs::read_to_string("myapp/Cargo.toml").unwrap();
    assert!(!cargo.contains("features"));
}

#[test]
#[serial]
fn new_already_exists_errors() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());

    fs::create_dir("myapp").unwrap();

    let result = new_project::run("myapp", default_opts());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}
