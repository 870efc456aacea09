//! The application facade.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::handlers::{
    CreateBlueprintHandler, DefineBlueprintFileHandler, DefineBlueprintTemplateHandler,
    DescribeBlueprintHandler, InstallHandler, ListTemplatesHandler, RenderBlueprintHandler,
};
use crate::application::ports::{BlueprintStore, EventStore, FileSystem, TemplateEngine};
use crate::application::{CommandBus, Handler, Subscription};
use crate::domain::{Command, CommandSpec, Event};
use crate::error::DuxResult;

/// Directory holding blueprint records and templates unless configured.
pub const DEFAULT_BLUEPRINTS_DIR: &str = "blueprints";

/// Owns the ports and the command bus, with every default handler
/// registered.
pub struct Application {
    fs: Arc<dyn FileSystem>,
    store: Arc<dyn BlueprintStore>,
    engine: Arc<dyn TemplateEngine>,
    events: Arc<dyn EventStore>,
    blueprints_dir: PathBuf,
    bus: CommandBus,
}

impl Application {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn BlueprintStore>,
        engine: Arc<dyn TemplateEngine>,
        events: Arc<dyn EventStore>,
        blueprints_dir: impl Into<PathBuf>,
    ) -> Self {
        let blueprints_dir = blueprints_dir.into();
        let mut bus = CommandBus::new();

        bus.handle(CreateBlueprintHandler::new(store.clone(), events.clone()));
        bus.handle(DescribeBlueprintHandler::new(store.clone(), events.clone()));
        bus.handle(DefineBlueprintTemplateHandler::new(
            fs.clone(),
            store.clone(),
            events.clone(),
            &blueprints_dir,
        ));
        bus.handle(DefineBlueprintFileHandler::new(store.clone(), events.clone()));
        bus.handle(RenderBlueprintHandler::new(
            fs.clone(),
            store.clone(),
            engine.clone(),
            events.clone(),
            &blueprints_dir,
        ));
        bus.handle(InstallHandler::new(fs.clone(), events.clone()));
        bus.handle(ListTemplatesHandler::new(fs.clone(), events.clone(), &blueprints_dir));

        Self {
            fs,
            store,
            engine,
            events,
            blueprints_dir,
            bus,
        }
    }

    /// Dispatch a command through the bus.
    pub fn execute(&self, command: &Command) -> DuxResult<()> {
        self.bus.execute(command)
    }

    /// Replace the handler for the handler's command type.
    pub fn handle<H: Handler + 'static>(&mut self, handler: H) {
        self.bus.handle(handler);
    }

    /// Replace the handler for command type `C` with a closure.
    pub fn handle_fn<C, F>(&mut self, f: F)
    where
        C: CommandSpec,
        F: Fn(&C) -> DuxResult<()> + Send + Sync + 'static,
    {
        self.bus.handle_fn(f);
    }

    /// Listen to every event emitted from now on.
    pub fn subscribe(&self, f: impl Fn(&Event) + Send + Sync + 'static) -> Subscription {
        self.events.subscribe(Arc::new(f))
    }

    /// Execute `command` and return exactly the events it emitted.
    ///
    /// # Errors
    /// Whatever `execute` returns; events emitted before the failure are
    /// discarded.
    pub fn capture(&self, command: &Command) -> DuxResult<Vec<Event>> {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);

        let mut subscription = self.subscribe(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        });
        let result = self.execute(command);
        subscription.unsubscribe();
        result?;

        let events = std::mem::take(&mut *captured.lock().unwrap_or_else(PoisonError::into_inner));
        Ok(events)
    }

    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn store(&self) -> &Arc<dyn BlueprintStore> {
        &self.store
    }

    pub fn engine(&self) -> &Arc<dyn TemplateEngine> {
        &self.engine
    }

    pub fn events(&self) -> &Arc<dyn EventStore> {
        &self.events
    }

    pub fn blueprints_dir(&self) -> &Path {
        &self.blueprints_dir
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("blueprints_dir", &self.blueprints_dir)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
