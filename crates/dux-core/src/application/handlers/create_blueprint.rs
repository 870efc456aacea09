use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::Handler;
use crate::application::ports::{BlueprintStore, EventStore};
use crate::domain::{Blueprint, CreateBlueprint, Event, EventKind};
use crate::error::DuxResult;

/// Persists a fresh, empty blueprint.
///
/// An existing blueprint of the same name is replaced.
pub struct CreateBlueprintHandler {
    store: Arc<dyn BlueprintStore>,
    events: Arc<dyn EventStore>,
}

impl CreateBlueprintHandler {
    pub fn new(store: Arc<dyn BlueprintStore>, events: Arc<dyn EventStore>) -> Self {
        Self { store, events }
    }
}

impl Handler for CreateBlueprintHandler {
    type Command = CreateBlueprint;

    #[instrument(skip_all, fields(blueprint = %command.name))]
    fn handle(&self, command: &CreateBlueprint) -> DuxResult<()> {
        let blueprint = Blueprint::new(&command.name)?;
        self.store.put(&blueprint)?;

        info!("blueprint created");
        self.events
            .emit(vec![Event::new(EventKind::BlueprintCreated).with("name", blueprint.name())]);
        Ok(())
    }
}
