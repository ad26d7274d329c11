use colored::Colorize;
use dialoguer::MultiSelect;
use std::fs;
use std::path::Path;

use super::templates;

/// Resolved project options after CLI flag parsing or interactive prompts.
pub struct ProjectOptions {
    pub name: String,
    pub ws: bool,
    pub multipart: bool,
    pub validation: bool,
}

/// Raw CLI flags for `r2e new`, before resolution into [`ProjectOptions`].
pub struct CliNewOpts {
    pub ws: bool,
    pub multipart: bool,
    pub validation: bool,
    pub full: bool,
    pub no_interactive: bool,
}

impl CliNewOpts {
    fn has_any_flag(&self) -> bool {
        self.ws || self.multipart || self.validation
    }
}

/// Create a new R2E project.
///
/// Resolves feature flags from `cli_opts`:
/// - `--full` enables `ws`, `multipart`, and `validation`.
/// - `--no-interactive` or any explicit flag uses provided values.
/// - Otherwise, prompts interactively with `dialoguer`.
///
/// Creates the project directory and all scaffold files (Cargo.toml, main.rs,
/// state.rs, hello controller, application.yaml, etc.).
pub fn run(name: &str, cli_opts: CliNewOpts) -> Result<(), Box<dyn std::error::Error>> {
    let opts = if cli_opts.full {
        ProjectOptions {
            name: name.to_string(),
            ws: true,
            multipart: true,
            validation: true,
        }
    } else if cli_opts.no_interactive || cli_opts.has_any_flag() {
        ProjectOptions {
            name: name.to_string(),
            ws: cli_opts.ws,
            multipart: cli_opts.multipart,
            validation: cli_opts.validation,
        }
    } else {
        prompt_options(name)?
    };

    generate_project(&opts)
}

fn prompt_options(name: &str) -> Result<ProjectOptions, Box<dyn std::error::Error>> {
    println!(
        "{} Creating a new R2E project: {}",
        "->".blue(),
        name.green()
    );
    println!();

    let feature_choices = &["WebSocket support", "Multipart uploads", "Request validation"];
    let selected = MultiSelect::new()
        .with_prompt("Select features (space to toggle, enter to confirm)")
        .items(feature_choices)
        .interact()?;

    Ok(ProjectOptions {
        name: name.to_string(),
        ws: selected.contains(&0),
        multipart: selected.contains(&1),
        validation: selected.contains(&2),
    })
}

fn generate_project(opts: &ProjectOptions) -> Result<(), Box<dyn std::error::Error>> {
    let project_dir = Path::new(&opts.name);
    if project_dir.exists() {
        return Err(format!("Directory '{}' already exists", opts.name).into());
    }

    println!(
        "{} Creating new R2E project: {}",
        "->".blue(),
        opts.name.green()
    );

    fs::create_dir_all(project_dir.join("src/controllers"))?;

    fs::write(
        project_dir.join("Cargo.toml"),
        templates::project::cargo_toml(opts),
    )?;

    fs::write(
        project_dir.join("src/state.rs"),
        templates::project::state_rs(opts),
    )?;

    fs::write(
        project_dir.join("src/main.rs"),
        templates::project::main_rs(opts),
    )?;

    fs::write(
        project_dir.join("src/controllers/hello.rs"),
        templates::project::hello_controller(),
    )?;
    fs::write(
        project_dir.join("src/controllers/mod.rs"),
        "pub mod hello;\n",
    )?;

    fs::write(
        project_dir.join("application.yaml"),
        templates::project::application_yaml(opts),
    )?;

    fs::write(project_dir.join(".gitignore"), "/target\n")?;

    println!(
        "{} Project '{}' created successfully!",
        "v".green(),
        opts.name.green()
    );
    println!();
    println!("  cd {}", opts.name);
    println!("  cargo run");
    println!();
    println!("  Health:   {}", "http://localhost:8080/health".cyan());

    Ok(())
}
