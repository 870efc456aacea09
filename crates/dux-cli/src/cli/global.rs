//! Flags accepted by every `dux` subcommand.
//!
//! Flattened into [`super::Cli`]. Besides presentation flags this carries
//! the per-invocation overrides for the blueprint store and rendering, which
//! take precedence over the config file and `DUX_*` variables.

use std::path::PathBuf;

use clap::Args;

/// Global arguments for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log verbosity: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Commands and handlers
    -vv     - Events and store access
    -vvv    - Everything"
    )]
    pub verbose: u8,

    /// Only report failures.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes. Honours `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Directory holding blueprint documents and their templates.
    #[arg(
        long = "blueprints-dir",
        global = true,
        value_name = "DIR",
        help = "Blueprint store directory (overrides storage.blueprints_dir)"
    )]
    pub blueprints_dir: Option<PathBuf>,

    /// Fail rendering on variables the template references but `new` did
    /// not supply.
    #[arg(
        long = "strict",
        global = true,
        help = "Treat missing template variables as errors"
    )]
    pub strict: bool,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI renders events and listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured lines with status symbols.
    Human,
    /// Status symbols without colour.
    Plain,
    /// One JSON object per event.
    Json,
}
