//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.
//! The CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 0. `--blueprints-dir` and `--strict`, applied by [`AppConfig::with_overrides`]
//! 1. Environment variables: `DUX_` prefix, `__` between sections
//!    (`DUX_STORAGE__BLUEPRINTS_DIR=/srv/blueprints`)
//! 2. Config file: `--config FILE`, else the platform config dir
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;

const ENV_PREFIX: &str = "DUX";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where blueprints live.
    pub storage: StorageConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub blueprints_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Files are rendered here before being installed.
    pub staging_dir: PathBuf,
    /// Missing template variables are errors instead of empty strings.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                blueprints_dir: Self::default_blueprints_dir(),
            },
            render: RenderConfig {
                staging_dir: PathBuf::from(".dux"),
                strict: false,
            },
            output: OutputConfig { no_color: false },
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then `DUX_*` env vars.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    /// Apply per-invocation command-line overrides.
    pub fn with_overrides(mut self, global: &GlobalArgs) -> Self {
        if let Some(dir) = &global.blueprints_dir {
            self.storage.blueprints_dir = dir.clone();
        }
        self.render.strict |= global.strict;
        self
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default(
                "storage.blueprints_dir",
                defaults.storage.blueprints_dir.to_string_lossy().into_owned(),
            )?
            .set_default(
                "render.staging_dir",
                defaults.render.staging_dir.to_string_lossy().into_owned(),
            )?
            .set_default("render.strict", defaults.render.strict)?
            .set_default("output.no_color", defaults.output.no_color)?
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.dux.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "dux", "dux")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".dux.toml"))
    }

    fn default_blueprints_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "dux", "dux")
            .map(|d| d.data_dir().join("blueprints"))
            .unwrap_or_else(|| PathBuf::from(".dux/blueprints"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_lenient_and_colored() {
        let cfg = AppConfig::default();
        assert!(!cfg.render.strict);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.render.staging_dir, PathBuf::from(".dux"));
        assert!(cfg.logging.file.is_none());
        assert!(cfg.storage.blueprints_dir.ends_with("blueprints"));
    }

    #[test]
    fn command_line_overrides_win() {
        let global = GlobalArgs {
            blueprints_dir: Some(PathBuf::from("elsewhere")),
            strict: true,
            ..GlobalArgs::default()
        };
        let cfg = AppConfig::default().with_overrides(&global);
        assert_eq!(cfg.storage.blueprints_dir, PathBuf::from("elsewhere"));
        assert!(cfg.render.strict);

        let untouched = AppConfig::default().with_overrides(&GlobalArgs::default());
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.render, AppConfig::default().render);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dux.toml");
        fs::write(
            &path,
            "[storage]\nblueprints_dir = \"/srv/blueprints\"\n\n[render]\nstrict = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.storage.blueprints_dir, PathBuf::from("/srv/blueprints"));
        assert!(cfg.render.strict);
        assert_eq!(cfg.render.staging_dir, PathBuf::from(".dux"));
    }

    #[test]
    fn default_config_serialises_to_loadable_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dux.toml");
        fs::write(&path, toml::to_string_pretty(&AppConfig::default()).unwrap()).unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.render, AppConfig::default().render);
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
