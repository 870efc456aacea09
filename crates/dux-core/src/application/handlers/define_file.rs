use std::sync::Arc;

use tracing::instrument;

use crate::application::Handler;
use crate::application::ports::{BlueprintStore, EventStore};
use crate::domain::{DefineBlueprintFile, Event, EventKind};
use crate::error::DuxResult;

/// Maps a destination file name to one of the blueprint's templates.
pub struct DefineBlueprintFileHandler {
    store: Arc<dyn BlueprintStore>,
    events: Arc<dyn EventStore>,
}

impl DefineBlueprintFileHandler {
    pub fn new(store: Arc<dyn BlueprintStore>, events: Arc<dyn EventStore>) -> Self {
        Self { store, events }
    }
}

impl Handler for DefineBlueprintFileHandler {
    type Command = DefineBlueprintFile;

    #[instrument(skip_all, fields(blueprint = %command.blueprint_name, file = %command.file_name))]
    fn handle(&self, command: &DefineBlueprintFile) -> DuxResult<()> {
        let mut blueprint = self.store.get(&command.blueprint_name)?;
        blueprint.define_file(&command.file_name, &command.template_name)?;
        self.store.put(&blueprint)?;

        self.events.emit(vec![
            Event::new(EventKind::BlueprintFileAdded)
                .with("blueprintName", blueprint.name())
                .with("filename", command.file_name.as_str())
                .with("templateName", command.template_name.as_str()),
        ]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TransientEventStore;
    use crate::application::ports::MockBlueprintStore;
    use crate::domain::Blueprint;
    use crate::error::DuxError;

    fn store_returning_put(result: fn() -> DuxResult<()>) -> MockBlueprintStore {
        let mut store = MockBlueprintStore::new();
        store
            .expect_get()
            .returning(|name| Ok(Blueprint::new(name).unwrap()));
        store.expect_put().returning(move |_| result());
        store
    }

    #[test]
    fn adds_mapping_and_emits() {
        let events = Arc::new(TransientEventStore::new());

        DefineBlueprintFileHandler::new(Arc::new(store_returning_put(|| Ok(()))), events.clone())
            .handle(&DefineBlueprintFile::new("web", "{{name}}.rs", "mod.tmpl"))
            .unwrap();

        let all = events.all();
        assert_eq!(all[0].name(), "blueprint-file-added");
        assert_eq!(all[0].get_str("blueprintName"), Some("web"));
        assert_eq!(all[0].get_str("filename"), Some("{{name}}.rs"));
        assert_eq!(all[0].get_str("templateName"), Some("mod.tmpl"));
    }

    #[test]
    fn persistence_failure_emits_nothing() {
        let events = Arc::new(TransientEventStore::new());
        let failing = || {
            Err(DuxError::Internal {
                message: "read-only".into(),
            })
        };

        let result = DefineBlueprintFileHandler::new(Arc::new(store_returning_put(failing)), events.clone())
            .handle(&DefineBlueprintFile::new("web", "a.rs", "mod.tmpl"));

        assert!(result.is_err());
        assert!(events.all().is_empty());
    }
}
