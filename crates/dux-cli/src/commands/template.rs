//! `dux template`: store a template under a blueprint.

use std::io::{self, Read};

use tracing::{debug, instrument};

use dux_core::domain::DefineBlueprintTemplate;

use crate::{
    cli::TemplateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(blueprint = %args.blueprint, template = %args.name))]
pub fn execute(args: TemplateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let contents = match args.contents {
        Some(contents) => contents,
        None => read_stdin()?,
    };
    debug!(bytes = contents.len(), "template contents read");

    let app = super::application(config)?;
    super::run_and_report(
        &app,
        DefineBlueprintTemplate::new(args.blueprint, args.name, contents),
        output,
    )
}

fn read_stdin() -> CliResult<String> {
    let mut contents = String::new();
    io::stdin()
        .read_to_string(&mut contents)
        .with_cli_context(|| "Failed to read template contents from stdin")?;
    Ok(contents)
}
