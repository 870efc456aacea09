//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the handlers need from external systems.
//! The `dux-adapters` crate provides implementations.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::application::Subscription;
use crate::domain::{Blueprint, Event};
use crate::error::DuxResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `dux_adapters::filesystem::LocalFilesystem` (production)
/// - `dux_adapters::filesystem::MemoryFilesystem` (testing)
/// - `dux_adapters::filesystem::FailingFilesystem` (fault injection)
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Open a file for reading.
    ///
    /// Fails with `FileNotFound` when nothing exists at `path`.
    fn open(&self, path: &Path) -> DuxResult<Box<dyn Read>>;

    /// Create or truncate a file, creating missing parent directories.
    fn create(&self, path: &Path) -> DuxResult<Box<dyn Write>>;

    /// Names of the immediate children of `dir`, sorted.
    ///
    /// A missing directory yields an empty list.
    fn list(&self, dir: &Path) -> DuxResult<Vec<String>>;

    /// Move a file, creating missing parent directories of `to`.
    fn rename(&self, from: &Path, to: &Path) -> DuxResult<()>;
}

/// Port for blueprint persistence.
///
/// Implemented by:
/// - `dux_adapters::store::JsonBlueprintStore`
#[cfg_attr(test, mockall::automock)]
pub trait BlueprintStore: Send + Sync {
    /// Load a blueprint by name.
    ///
    /// Fails with `BlueprintNotFound` when no record exists.
    fn get(&self, name: &str) -> DuxResult<Blueprint>;

    /// Persist the full record, replacing any previous one of the same name.
    fn put(&self, blueprint: &Blueprint) -> DuxResult<()>;

    /// Names of stored blueprints matching a glob pattern, sorted.
    fn list(&self, pattern: &str) -> DuxResult<Vec<String>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `dux_adapters::renderer::HandlebarsEngine`
pub trait TemplateEngine: Send + Sync {
    /// Render template `name` from `template_dir` into `out`.
    ///
    /// Other templates in the same directory are available to it.
    fn render_template(
        &self,
        out: &mut dyn Write,
        template_dir: &Path,
        name: &str,
        data: &Value,
    ) -> DuxResult<()>;

    /// Render an inline template string.
    fn render_string(&self, text: &str, data: &Value) -> DuxResult<String>;
}

/// Callback invoked for every emitted event.
pub type Subscriber = Arc<dyn Fn(&Event) + Send + Sync>;

/// Port for the event log.
///
/// Implemented by:
/// - `crate::application::TransientEventStore` (in-memory)
pub trait EventStore: Send + Sync {
    /// Append events in order and notify live subscribers of each.
    fn emit(&self, events: Vec<Event>);

    /// Register a subscriber; it stays live until the handle is
    /// unsubscribed or dropped.
    fn subscribe(&self, subscriber: Subscriber) -> Subscription;

    /// Every event emitted so far, in emission order.
    fn all(&self) -> Vec<Event>;
}
