//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "dux",
    bin_name = "dux",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Blueprint-based code scaffolding",
    long_about = "Dux generates files from blueprints: named sets of templates \
                  whose destination names are templates too.",
    after_help = "EXAMPLES:\n\
        \x20 dux create component\n\
        \x20 dux template component view.tmpl --contents 'pub struct {{pascal name}};'\n\
        \x20 dux file component 'src/{{snake name}}.rs' view.tmpl\n\
        \x20 dux new component name='user profile'",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new, empty blueprint.
    #[command(
        about = "Create a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 dux create component"
    )]
    Create(CreateArgs),

    /// Set a blueprint's description.
    #[command(
        about = "Describe a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 dux describe component 'A view with its test'"
    )]
    Describe(DescribeArgs),

    /// Store a template under a blueprint.
    #[command(
        visible_alias = "t",
        about = "Define a blueprint template",
        after_help = "EXAMPLES:\n\
            \x20 dux template component view.tmpl --contents 'pub struct {{pascal name}};'\n\
            \x20 dux template component test.tmpl < test.tmpl"
    )]
    Template(TemplateArgs),

    /// Map a destination file to a template.
    #[command(
        visible_alias = "f",
        about = "Add a file to a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 dux file component 'src/{{snake name}}.rs' view.tmpl"
    )]
    File(FileArgs),

    /// Print a blueprint's description, files and templates.
    #[command(
        about = "Show a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 dux show component\n\
            \x20 dux show component --output-format json"
    )]
    Show(ShowArgs),

    /// List stored blueprints.
    #[command(
        visible_alias = "ls",
        about = "List blueprints",
        after_help = "EXAMPLES:\n\
            \x20 dux list\n\
            \x20 dux list --pattern 'react-*'\n\
            \x20 dux list --format json"
    )]
    List(ListArgs),

    /// Render a blueprint and install the result in the current directory.
    #[command(
        visible_alias = "n",
        about = "Generate files from a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 dux new component name=user\n\
            \x20 dux new component name=user --dry-run\n\
            \x20 dux new component name=user --yes"
    )]
    New(NewArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 dux init                     # default location\n\
            \x20 dux --config dux.toml init   # explicit path"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 dux completions bash > ~/.local/share/bash-completion/completions/dux\n\
            \x20 dux completions zsh  > ~/.zfunc/_dux\n\
            \x20 dux completions fish > ~/.config/fish/completions/dux.fish"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Describe(_) => "describe",
            Self::Template(_) => "template",
            Self::File(_) => "file",
            Self::Show(_) => "show",
            Self::List(_) => "list",
            Self::New(_) => "new",
            Self::Init(_) => "init",
            Self::Completions(_) => "completions",
        }
    }
}

// ── blueprint authoring ───────────────────────────────────────────────────────

/// Arguments for `dux create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(value_name = "NAME", help = "Blueprint name")]
    pub name: String,
}

/// Arguments for `dux describe`.
#[derive(Debug, Args)]
pub struct DescribeArgs {
    #[arg(value_name = "BLUEPRINT", help = "Blueprint name")]
    pub blueprint: String,

    #[arg(value_name = "DESCRIPTION", help = "Short text describing the blueprint")]
    pub description: String,
}

/// Arguments for `dux template`.
#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[arg(value_name = "BLUEPRINT", help = "Blueprint name")]
    pub blueprint: String,

    #[arg(value_name = "NAME", help = "Template name, e.g. view.tmpl")]
    pub name: String,

    /// Template text. Read from stdin when omitted.
    #[arg(
        long = "contents",
        value_name = "TEXT",
        help = "Template text (default: read stdin)"
    )]
    pub contents: Option<String>,
}

/// Arguments for `dux file`.
#[derive(Debug, Args)]
pub struct FileArgs {
    #[arg(value_name = "BLUEPRINT", help = "Blueprint name")]
    pub blueprint: String,

    /// Destination file name; rendered with the same data as the template.
    #[arg(value_name = "DESTINATION", help = "Destination file name (a template)")]
    pub destination: String,

    #[arg(value_name = "TEMPLATE", help = "Template rendered into the destination")]
    pub template: String,
}

// ── inspection ────────────────────────────────────────────────────────────────

/// Arguments for `dux show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "BLUEPRINT", help = "Blueprint name")]
    pub blueprint: String,
}

/// Arguments for `dux list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Glob over blueprint names.
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "GLOB",
        default_value = "*",
        help = "Only list blueprints matching this glob"
    )]
    pub pattern: String,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Names with descriptions.
    Table,
    /// One name per line.
    List,
    /// JSON array of blueprints.
    Json,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `dux new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(value_name = "BLUEPRINT", help = "Blueprint to generate from")]
    pub blueprint: String,

    /// Template variables.
    #[arg(
        value_name = "VAR=VALUE",
        value_parser = parse_variable,
        help = "Template variables, e.g. name=user"
    )]
    pub variables: Vec<(String, String)>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Install without asking")]
    pub yes: bool,

    /// Render into the staging directory but install nothing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

fn parse_variable(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected VAR=VALUE, got '{s}'"))?;
    if key.trim().is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    Ok((key.trim().to_owned(), value.to_owned()))
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `dux init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `dux completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
