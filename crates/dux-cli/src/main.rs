//! # Dux CLI
//!
//! Blueprint-based code scaffolding.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Load configuration (defaults + file + `DUX_*` env + flag overrides).
//! 3. Initialise the tracing subscriber (needs `logging.file`).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, ErrorCategory},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too; clap picks the stream and code.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Load configuration ─────────────────────────────────────────────
    // `init` writes the config file, so it must not require one to exist.
    let config = if matches!(cli.command, Commands::Init(_)) {
        AppConfig::default()
    } else {
        match AppConfig::load(cli.global.config.as_ref()) {
            Ok(cfg) => cfg.with_overrides(&cli.global),
            Err(e) => return handle_error(CliError::config(e), &cli.global, cli.command.name()),
        }
    };

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        command = cli.command.name(),
        "CLI started"
    );

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let command = cli.command.name();
    match run(cli.command, &cli.global, &config, &output) {
        Ok(()) => {
            info!("dux completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &cli.global, command),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(
    command: Commands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match command {
        Commands::Create(args) => commands::create::execute(args, config, output),
        Commands::Describe(args) => commands::describe::execute(args, config, output),
        Commands::Template(args) => commands::template::execute(args, config, output),
        Commands::File(args) => commands::file::execute(args, config, output),
        Commands::Show(args) => commands::show::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, config, output),
        Commands::New(args) => commands::new::execute(args, global, config, output),
        Commands::Init(args) => commands::init::execute(args, global, output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// User errors are followed by the failing subcommand's usage line.
fn handle_error(err: CliError, global: &GlobalArgs, command: &str) -> ExitCode {
    err.log();

    let verbose = global.verbose > 0;
    let colored = !global.no_color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    if err.category() == ErrorCategory::UserError {
        if let Some(usage) = usage_line(command) {
            eprintln!("\n{usage}");
        }
    }

    ExitCode::from(err.exit_code())
}

/// Rendered `Usage: dux <command> ...` line for a subcommand.
fn usage_line(command: &str) -> Option<String> {
    let mut cli = Cli::command().bin_name("dux");
    cli.build();
    let sub = cli.find_subcommand_mut(command)?;
    Some(sub.render_usage().to_string())
}

// ── tests ─────────────────────────────────────────────────────────────────────
