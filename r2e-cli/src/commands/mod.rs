//! Command implementations for the `r2e` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

/// Feature management — `r2e add <feature>`.
///
/// Enables an `r2e` Cargo feature in the project's `Cargo.toml`.
/// Known features: ws, multipart, validation, dev-reload.
pub mod add;

/// Development server — `r2e dev`.
///
/// Wraps `cargo watch` with R2E-specific defaults (watched paths,
/// `R2E_PROFILE=dev`, route listing before start).
pub mod dev;

/// Project diagnostics — `r2e doctor`.
///
/// Runs 8 health checks: Cargo.toml, R2E dependency, config file,
/// controllers directory, Rust toolchain, cargo-watch, migrations,
/// and application entrypoint.
pub mod doctor;

/// Code generation — `r2e generate`.
///
/// Subcommands: `controller`, `service`, `crud`, `middleware`.
/// Generates skeleton source files and updates `mod.rs` declarations.
pub mod generate;

/// Project scaffolding — `r2e new <name>`.
///
/// Creates a new R2E project directory with Cargo.toml, main.rs, state.rs,
/// application.yaml, and optional ws/multipart/validation scaffolding.
pub mod new_project;

/// Route listing — `r2e routes`.
///
/// Static source parsing of `src/controllers/*.rs` to extract declared
/// routes, HTTP methods, handler names, and role annotations.
pub mod routes;

/// Shared template helpers and code templates.
///
/// Provides string utilities (`to_snake_case`, `to_pascal_case`, `pluralize`,
/// `render`) and code generation templates for projects and middleware.
pub mod templates;
