//! `dux list`: list stored blueprints.

use tracing::warn;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let app = super::application(config)?;
    let names = app.store().list(&args.pattern)?;

    match args.format {
        ListFormat::Table => {
            if names.is_empty() {
                output.info("No blueprints found. Create one with: dux create <NAME>")?;
                return Ok(());
            }
            output.header("Blueprints:")?;
            let width = names.iter().map(String::len).max().unwrap_or_default();
            for name in &names {
                match app.store().get(name) {
                    Ok(blueprint) => output.print(&format!(
                        "  {name:<width$}  {} file(s)  {}",
                        blueprint.file_count(),
                        blueprint.description()
                    ))?,
                    Err(e) => {
                        warn!(blueprint = %name, error = %e, "unreadable blueprint");
                        output.warning(&format!("  {name:<width$}  unreadable: {e}"))?;
                    }
                }
            }
        }

        ListFormat::List => {
            for name in &names {
                output.print(name)?;
            }
        }

        // JSON must stay parseable in pipes, so it bypasses quiet mode.
        ListFormat::Json => {
            let blueprints = names
                .iter()
                .map(|name| app.store().get(name))
                .collect::<Result<Vec<_>, _>>()?;
            output.json(&blueprints)?;
        }
    }

    Ok(())
}
