//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use dux_core::domain::{Event, EventKind};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silenced() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Success, msg)
    }

    /// Error indicator: `✗ <msg>`. *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(&self.line(Tone::Error, msg))
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Warning, msg)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silenced() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Report an event: one JSON object per line in JSON mode, otherwise a
    /// success or error line.
    pub fn event(&self, event: &Event) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(event);
        }
        let line = describe(event);
        if event.kind().is_failure() {
            self.error(&line)
        } else {
            self.success(&line)
        }
    }

    /// Write `value` as a single JSON line, regardless of quiet mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let line = serde_json::to_string(value).map_err(io::Error::other)?;
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn silenced(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    fn marked(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.silenced() {
            return Ok(());
        }
        self.term.write_line(&self.line(tone, msg))
    }

    fn line(&self, tone: Tone, msg: &str) -> String {
        let symbol = tone.symbol();
        if self.no_color {
            return format!("{symbol} {msg}");
        }
        match tone {
            Tone::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Tone::Error => format!("{} {}", symbol.red().bold(), msg.red()),
            Tone::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Tone::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Error => "\u{2717}",   // ✗
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }
}

/// One-line human description of an event.
pub fn describe(event: &Event) -> String {
    let field = |key: &str| event.get_str(key).unwrap_or_default();

    let message = match event.kind() {
        EventKind::BlueprintCreated => format!("Created blueprint '{}'", field("name")),
        EventKind::BlueprintDescriptionSet => {
            format!("Described blueprint '{}'", field("blueprintName"))
        }
        EventKind::BlueprintTemplateDefined => format!(
            "Defined template '{}' in '{}'",
            field("templateName"),
            field("blueprintName")
        ),
        EventKind::BlueprintFileAdded => format!(
            "Added file '{}' from template '{}' to '{}'",
            field("filename"),
            field("templateName"),
            field("blueprintName")
        ),
        EventKind::BlueprintTemplateFound => field("name").to_owned(),
        EventKind::TemplateRendered => format!("Rendered {}", field("filename")),
        EventKind::RenderDestinationFilenameFailed => {
            format!("Could not render file name '{}'", field("filename"))
        }
        EventKind::CreateDestinationFileFailed => {
            format!("Could not create {}", field("filename"))
        }
        EventKind::RenderTemplateFailed => format!(
            "Could not render '{}' into {}",
            field("templateName"),
            field("filename")
        ),
        EventKind::FileRenamed => format!("Created {}", field("to")),
        EventKind::FileRenameFailed => format!("Could not install {}", field("to")),
    };

    match event.error() {
        Some(error) => format!("{message}: {error}"),
        None => message,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dux_core::application::ApplicationError;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool, output_format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            output_format,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn plain_output_is_never_colored() {
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
    }

    #[test]
    fn uncolored_lines_keep_their_symbol() {
        let out = make_manager(false, true, OutputFormat::Plain);
        assert_eq!(out.line(Tone::Success, "done"), "\u{2713} done");
        assert_eq!(out.line(Tone::Error, "failed"), "\u{2717} failed");
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(false, false, OutputFormat::Json);
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn describe_renamed_file() {
        let event = Event::new(EventKind::FileRenamed)
            .with("from", ".dux/staging/x/src/a.rs")
            .with("to", "src/a.rs");
        assert_eq!(describe(&event), "Created src/a.rs");
    }

    #[test]
    fn describe_failure_appends_error() {
        let event = Event::new(EventKind::CreateDestinationFileFailed)
            .with("filename", "out/a")
            .with_error(
                ApplicationError::FilesystemError {
                    path: "out/a".into(),
                    reason: "denied".into(),
                }
                .into(),
            );
        let line = describe(&event);
        assert!(line.starts_with("Could not create out/a: "), "{line}");
        assert!(line.contains("denied"));
    }
}
