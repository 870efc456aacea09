//! Infrastructure adapters for Dux.
//!
//! This crate implements the ports defined in `dux-core::application::ports`.
//! It contains all external dependencies and I/O operations, plus the
//! wiring that assembles a ready-to-use [`Application`].

pub mod filesystem;
pub mod renderer;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use dux_core::application::{
    Application, DEFAULT_BLUEPRINTS_DIR, TransientEventStore, ports::FileSystem,
};

// Re-export commonly used adapters
pub use filesystem::{FailingFilesystem, FailureAction, LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsEngine;
pub use store::JsonBlueprintStore;

/// Build an application whose store, templates and output all live on `fs`.
pub fn application(fs: Arc<dyn FileSystem>, blueprints_dir: impl Into<PathBuf>, strict: bool) -> Application {
    let blueprints_dir = blueprints_dir.into();
    let store = JsonBlueprintStore::new(fs.clone(), &blueprints_dir);
    let engine = HandlebarsEngine::new(fs.clone()).strict(strict);

    Application::new(
        fs,
        Arc::new(store),
        Arc::new(engine),
        Arc::new(TransientEventStore::new()),
        blueprints_dir,
    )
}

/// Application over a fresh [`MemoryFilesystem`], returned alongside it.
pub fn in_memory_application() -> (MemoryFilesystem, Application) {
    let memory = MemoryFilesystem::new();
    let app = application(Arc::new(memory.clone()), DEFAULT_BLUEPRINTS_DIR, false);
    (memory, app)
}
