//! `dux file`: map a destination file name to a template.

use tracing::instrument;

use dux_core::domain::DefineBlueprintFile;

use crate::{cli::FileArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(blueprint = %args.blueprint, destination = %args.destination))]
pub fn execute(args: FileArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let app = super::application(config)?;
    super::run_and_report(
        &app,
        DefineBlueprintFile::new(args.blueprint, args.destination, args.template),
        output,
    )
}
