//! `dux show`: print a blueprint's description, files and templates.

use serde_json::json;

use dux_core::domain::{EventKind, ListTemplates};

use crate::{
    cli::{OutputFormat, ShowArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ShowArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let app = super::application(config)?;
    let blueprint = app.store().get(&args.blueprint)?;

    let templates: Vec<String> = app
        .capture(&ListTemplates::new(blueprint.name()).into())?
        .iter()
        .filter(|e| e.kind() == EventKind::BlueprintTemplateFound)
        .filter_map(|e| e.get_str("name").map(str::to_owned))
        .collect();

    if output.format() == OutputFormat::Json {
        output.json(&json!({ "blueprint": blueprint, "templates": templates }))?;
        return Ok(());
    }

    output.header(blueprint.name())?;
    if !blueprint.description().is_empty() {
        output.print(blueprint.description())?;
    }

    output.print("")?;
    output.print("Files:")?;
    if blueprint.file_count() == 0 {
        output.print("  (none)")?;
    }
    for (destination, template) in blueprint.files() {
        output.print(&format!("  {destination} <- {template}"))?;
    }

    output.print("")?;
    output.print("Templates:")?;
    if templates.is_empty() {
        output.print("  (none)")?;
    }
    for template in &templates {
        output.print(&format!("  {template}"))?;
    }

    Ok(())
}
