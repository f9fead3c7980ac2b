//! Catalog listing commands.

use super::output::{format_capitals_text, JsonCapitals};
use super::{continent_set, load_catalog, CliError, OutputFormat};
use std::path::PathBuf;

/// Execute the continents command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn continents(catalog: Option<PathBuf>) -> Result<(), CliError> {
    let catalog = load_catalog(catalog.as_deref())?;

    for (continent, count) in catalog.continent_counts() {
        println!("{continent:<16} {count:>4} capitals");
    }

    Ok(())
}

/// Execute the capitals command.
///
/// With no continents given, every capital is listed.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a continent is unknown.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn capitals(
    continents: Vec<String>,
    catalog: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let catalog = load_catalog(catalog.as_deref())?;

    let selection = if continents.is_empty() {
        catalog.continents().into_iter().collect()
    } else {
        continent_set(&catalog, &continents)?
    };
    let filtered = catalog.filter_by_continents(&selection)?;

    match format {
        OutputFormat::Text => print!("{}", format_capitals_text(filtered.entries())),
        OutputFormat::Json => {
            let listing = JsonCapitals {
                continents: filtered.continents().iter().map(String::as_str).collect(),
                capitals: filtered.entries(),
            };
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
