//! One module per subcommand.
//!
//! Commands translate arguments into core [`Command`]s, run them through the
//! [`Application`] and print the resulting events. No business logic lives
//! here.

pub mod completions;
pub mod create;
pub mod describe;
pub mod file;
pub mod init;
pub mod list;
pub mod new;
pub mod show;
pub mod template;

use std::sync::Arc;

use tracing::debug;

use dux_adapters::LocalFilesystem;
use dux_core::{application::Application, domain::Command};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

/// Wire the core against the local filesystem, rooted at the working directory.
pub fn application(config: &AppConfig) -> CliResult<Application> {
    let fs = LocalFilesystem::current_dir()?;
    debug!(
        root = %fs.root().display(),
        blueprints = %config.storage.blueprints_dir.display(),
        strict = config.render.strict,
        "wiring application"
    );
    Ok(dux_adapters::application(
        Arc::new(fs),
        config.storage.blueprints_dir.clone(),
        config.render.strict,
    ))
}

/// Execute `command` and print every event it emitted.
pub fn run_and_report(
    app: &Application,
    command: impl Into<Command>,
    output: &OutputManager,
) -> CliResult<()> {
    for event in app.capture(&command.into())? {
        output.event(&event)?;
    }
    Ok(())
}
