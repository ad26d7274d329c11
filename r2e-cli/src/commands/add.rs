use colored::Colorize;
use std::path::Path;

const KNOWN_FEATURES: &[&str] = &["ws", "multipart", "validation", "dev-reload"];

/// Enable an `r2e` Cargo feature in the project's `Cargo.toml`.
///
/// Parses `Cargo.toml` with `toml_edit` and adds `feature` to the `r2e`
/// dependency's `features` array.
///
/// Returns an error if:
/// - `Cargo.toml` does not exist
/// - The `r2e` dependency is missing
/// - `feature` is not a known feature
///
/// Prints a warning (but returns `Ok`) if the feature is already present.
pub fn run(feature: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cargo_path = Path::new("Cargo.toml");
    if !cargo_path.exists() {
        return Err("No Cargo.toml found in current directory. Are you in a R2E project?".into());
    }

    if !KNOWN_FEATURES.contains(&feature) {
        return Err(format!(
            "Unknown feature '{}'. Available: {}",
            feature,
            KNOWN_FEATURES.join(", ")
        )
        .into());
    }

    let content = std::fs::read_to_string(cargo_path)?;
    let mut doc = content.parse::<toml_edit::DocumentMut>()?;

    let deps = doc
        .get_mut("dependencies")
        .and_then(|d| d.as_table_mut())
        .ok_or("no [dependencies] table in Cargo.toml")?;

    let r2e = deps
        .get_mut("r2e")
        .ok_or("no `r2e` dependency in Cargo.toml")?;

    // Normalize a bare version string ("0.1") into an inline table so we can
    // attach a `features` array to it.
    if r2e.is_str() {
        let version = r2e.as_str().unwrap().to_string();
        let mut table = toml_edit::InlineTable::new();
        table.insert("version", version.into());
        *r2e = toml_edit::Item::Value(toml_edit::Value::InlineTable(table));
    }

    let table = r2e
        .as_inline_table_mut()
        .or_else(|| r2e.as_table_mut().map(|_| unreachable!()))
        .ok_or("`r2e` dependency entry is not a table")?;

    let features = table
        .entry("features")
        .or_insert_with(|| toml_edit::Value::Array(toml_edit::Array::new()))
        .as_array_mut()
        .ok_or("`r2e.features` is not an array")?;

    if features.iter().any(|v| v.as_str() == Some(feature)) {
        println!(
            "{} Feature '{}' is already enabled",
            "!".yellow(),
            feature.cyan()
        );
        return Ok(());
    }

    features.push(feature);

    std::fs::write(cargo_path, doc.to_string())?;

    println!(
        "{} Enabled r2e feature '{}' in Cargo.toml",
        "✓".green(),
        feature.cyan()
    );
    println!("  Run `cargo build` to pick up the change.");

    Ok(())
}
