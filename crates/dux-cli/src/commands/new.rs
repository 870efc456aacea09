//! Implementation of the `dux new` command.
//!
//! Rendering never touches the working tree directly: the blueprint is
//! rendered into a staging directory, and only the files that rendered
//! cleanly are then installed with a single `Install` command.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use dux_core::domain::{Event, EventKind, Install, RenderBlueprint};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Sub-directory of `render.staging_dir` that receives rendered files.
const STAGING_SUBDIR: &str = "staging";

/// Execute the `dux new` command.
///
/// 1. Render the blueprint into `<staging_dir>/staging/<blueprint>`
/// 2. Early-exit with the staged file list on `--dry-run`
/// 3. Confirm with the user unless `--yes`, `--quiet` or stdin is not a TTY
/// 4. Install every staged file at the same path below the working directory
#[instrument(skip_all, fields(blueprint = %args.blueprint))]
pub fn execute(
    args: NewArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let app = super::application(config)?;
    let staging = staging_dir(config, &args.blueprint);
    let data = template_data(&args.variables);
    debug!(staging = %staging.display(), data = %data, "rendering");

    // 1. Render
    let rendered = app.capture(&RenderBlueprint::new(&args.blueprint, &staging, data).into())?;
    for event in rendered.iter().filter(|e| e.kind().is_failure()) {
        output.event(event)?;
    }
    let pairs = staged_pairs(&rendered, &staging);
    let render_failures = rendered.len() - pairs.len();

    // 2. Dry run
    if args.dry_run {
        output.header(&format!("Dry run: '{}' would create", args.blueprint))?;
        for (_, target) in &pairs {
            output.print(&format!("  {}", target.display()))?;
        }
        return finish(render_failures, rendered.len());
    }

    if pairs.is_empty() {
        output.warning(&format!("Blueprint '{}' produced no files", args.blueprint))?;
        return finish(render_failures, rendered.len());
    }

    // 3. Confirm
    if !args.yes && !global.quiet && std::io::stdin().is_terminal() && !confirm(&pairs)? {
        return Err(CliError::Cancelled);
    }

    // 4. Install
    let installed = app.capture(&Install::from_pairs(pairs).into())?;
    for event in &installed {
        output.event(event)?;
    }

    let install_failures = installed.iter().filter(|e| e.kind().is_failure()).count();
    info!(
        rendered = rendered.len(),
        installed = installed.len() - install_failures,
        "blueprint generated"
    );
    finish(render_failures + install_failures, rendered.len())
}

/// Where `blueprint` is rendered before installation.
fn staging_dir(config: &AppConfig, blueprint: &str) -> PathBuf {
    config
        .render
        .staging_dir
        .join(STAGING_SUBDIR)
        .join(blueprint)
}

/// `VAR=VALUE` pairs as the JSON object handed to the templates.
fn template_data(variables: &[(String, String)]) -> Value {
    let map: Map<String, Value> = variables
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    Value::Object(map)
}

/// Staged file → install target, for every file that rendered.
///
/// The target is the staged path with the staging prefix removed, so it
/// resolves against the working directory.
fn staged_pairs(events: &[Event], staging: &Path) -> Vec<(PathBuf, PathBuf)> {
    events
        .iter()
        .filter(|e| e.kind() == EventKind::TemplateRendered)
        .filter_map(|e| e.get_str("filename"))
        .filter_map(|staged| {
            let staged = PathBuf::from(staged);
            let target = staged.strip_prefix(staging).ok()?.to_path_buf();
            Some((staged, target))
        })
        .collect()
}

fn finish(failed: usize, total: usize) -> CliResult<()> {
    if failed > 0 {
        Err(CliError::Incomplete { failed, total })
    } else {
        Ok(())
    }
}

#[cfg(feature = "interactive")]
fn confirm(pairs: &[(PathBuf, PathBuf)]) -> CliResult<bool> {
    use dialoguer::Confirm;

    Confirm::new()
        .with_prompt(format!("Install {} file(s) into the current directory?", pairs.len()))
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "Confirmation prompt failed".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_pairs: &[(PathBuf, PathBuf)]) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(filename: &str) -> Event {
        Event::new(EventKind::TemplateRendered)
            .with("filename", filename)
            .with("templateName", "x.tmpl")
            .with("blueprintName", "component")
    }

    #[test]
    fn staging_dir_is_per_blueprint() {
        let config = AppConfig::default();
        assert_eq!(
            staging_dir(&config, "component"),
            PathBuf::from(".dux/staging/component")
        );
    }

    #[test]
    fn variables_become_string_fields() {
        let data = template_data(&[("name".into(), "user".into()), ("n".into(), "1".into())]);
        assert_eq!(data, serde_json::json!({ "name": "user", "n": "1" }));
    }

    #[test]
    fn staged_files_map_to_working_directory() {
        let staging = Path::new(".dux/staging/component");
        let events = vec![
            rendered(".dux/staging/component/src/user.rs"),
            Event::new(EventKind::RenderTemplateFailed).with("filename", ".dux/staging/component/bad"),
            rendered(".dux/staging/component/README.md"),
        ];

        assert_eq!(
            staged_pairs(&events, staging),
            vec![
                (
                    PathBuf::from(".dux/staging/component/src/user.rs"),
                    PathBuf::from("src/user.rs")
                ),
                (
                    PathBuf::from(".dux/staging/component/README.md"),
                    PathBuf::from("README.md")
                ),
            ]
        );
    }

    #[test]
    fn failures_make_the_run_incomplete() {
        assert!(finish(0, 3).is_ok());
        assert!(matches!(
            finish(2, 3),
            Err(CliError::Incomplete { failed: 2, total: 3 })
        ));
    }
}
