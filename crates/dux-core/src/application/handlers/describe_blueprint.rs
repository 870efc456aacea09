use std::sync::Arc;

use tracing::instrument;

use crate::application::Handler;
use crate::application::ports::{BlueprintStore, EventStore};
use crate::domain::{DescribeBlueprint, Event, EventKind};
use crate::error::DuxResult;

pub struct DescribeBlueprintHandler {
    store: Arc<dyn BlueprintStore>,
    events: Arc<dyn EventStore>,
}

impl DescribeBlueprintHandler {
    pub fn new(store: Arc<dyn BlueprintStore>, events: Arc<dyn EventStore>) -> Self {
        Self { store, events }
    }
}

impl Handler for DescribeBlueprintHandler {
    type Command = DescribeBlueprint;

    #[instrument(skip_all, fields(blueprint = %command.blueprint_name))]
    fn handle(&self, command: &DescribeBlueprint) -> DuxResult<()> {
        let mut blueprint = self.store.get(&command.blueprint_name)?;
        blueprint.set_description(&command.description);
        self.store.put(&blueprint)?;

        self.events.emit(vec![
            Event::new(EventKind::BlueprintDescriptionSet)
                .with("blueprintName", blueprint.name())
                .with("description", blueprint.description()),
        ]);
        Ok(())
    }
}
