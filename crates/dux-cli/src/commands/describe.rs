//! `dux describe`: set a blueprint's description.

use dux_core::domain::DescribeBlueprint;

use crate::{cli::DescribeArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(args: DescribeArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let app = super::application(config)?;
    super::run_and_report(
        &app,
        DescribeBlueprint::new(args.blueprint, args.description),
        output,
    )
}
