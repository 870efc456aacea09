//! Blueprint records as JSON files.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::Pattern;
use tracing::{debug, instrument};

use dux_core::{
    application::{ApplicationError, ports::{BlueprintStore, FileSystem}},
    domain::{Blueprint, DomainValidator, RECORD_SUFFIX},
    error::DuxResult,
};

/// Stores each blueprint as `<dir>/<name>.json` on a [`FileSystem`].
#[derive(Clone)]
pub struct JsonBlueprintStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl JsonBlueprintStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{RECORD_SUFFIX}"))
    }
}

impl BlueprintStore for JsonBlueprintStore {
    #[instrument(skip(self))]
    fn get(&self, name: &str) -> DuxResult<Blueprint> {
        DomainValidator::validate_blueprint_name(name)?;

        let reader = self.fs.open(&self.record_path(name)).map_err(|e| {
            if e.is_not_found() {
                ApplicationError::BlueprintNotFound { name: name.into() }.into()
            } else {
                e
            }
        })?;

        serde_json::from_reader(reader).map_err(|e| {
            ApplicationError::StorageFailed {
                name: name.into(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    #[instrument(skip_all, fields(blueprint = blueprint.name()))]
    fn put(&self, blueprint: &Blueprint) -> DuxResult<()> {
        let path = self.record_path(blueprint.name());
        let mut out = self.fs.create(&path)?;

        let storage_failed = |reason: String| ApplicationError::StorageFailed {
            name: blueprint.name().into(),
            reason,
        };
        serde_json::to_writer_pretty(&mut out, blueprint).map_err(|e| storage_failed(e.to_string()))?;
        out.flush().map_err(|e| storage_failed(e.to_string()))?;

        debug!(path = %path.display(), "blueprint stored");
        Ok(())
    }

    fn list(&self, pattern: &str) -> DuxResult<Vec<String>> {
        let pattern = Pattern::new(pattern).map_err(|e| ApplicationError::InvalidCommand {
            reason: format!("invalid pattern '{pattern}': {e}"),
        })?;

        let mut names = Vec::new();
        for entry in self.fs.list(&self.dir)? {
            let Some(name) = entry.strip_suffix(RECORD_SUFFIX) else {
                continue;
            };
            // Skips stray files no blueprint could have been stored under.
            if DomainValidator::validate_blueprint_name(name).is_err() || !pattern.matches(name) {
                continue;
            }
            // A record has no children; a template directory does.
            if !self.fs.list(&self.dir.join(&entry))?.is_empty() {
                continue;
            }
            names.push(name.to_owned());
        }
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for JsonBlueprintStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonBlueprintStore")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
