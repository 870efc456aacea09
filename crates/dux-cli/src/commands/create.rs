//! `dux create`: store a new, empty blueprint.

use tracing::instrument;

use dux_core::domain::CreateBlueprint;

use crate::{cli::CreateArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(blueprint = %args.name))]
pub fn execute(args: CreateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let app = super::application(config)?;
    super::run_and_report(&app, CreateBlueprint::new(args.name), output)
}
