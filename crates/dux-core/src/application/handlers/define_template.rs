use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::{BlueprintStore, EventStore, FileSystem};
use crate::application::{ApplicationError, Handler};
use crate::domain::{Blueprint, DefineBlueprintTemplate, DomainValidator, Event, EventKind};
use crate::error::DuxResult;

/// Writes template text below the blueprint's template directory.
///
/// The blueprint record itself is left untouched.
pub struct DefineBlueprintTemplateHandler {
    fs: Arc<dyn FileSystem>,
    store: Arc<dyn BlueprintStore>,
    events: Arc<dyn EventStore>,
    root: PathBuf,
}

impl DefineBlueprintTemplateHandler {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn BlueprintStore>,
        events: Arc<dyn EventStore>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            store,
            events,
            root: root.into(),
        }
    }
}

impl Handler for DefineBlueprintTemplateHandler {
    type Command = DefineBlueprintTemplate;

    #[instrument(skip_all, fields(blueprint = %command.blueprint_name, template = %command.template_name))]
    fn handle(&self, command: &DefineBlueprintTemplate) -> DuxResult<()> {
        DomainValidator::validate_template_name(&command.template_name)?;
        let blueprint = self.store.get(&command.blueprint_name)?;

        let path = Blueprint::template_path(&self.root, blueprint.name(), &command.template_name);
        let mut out = self.fs.create(&path)?;
        out.write_all(command.contents.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| ApplicationError::filesystem(&path, &e))?;
        debug!(path = %path.display(), bytes = command.contents.len(), "template written");

        self.events.emit(vec![
            Event::new(EventKind::BlueprintTemplateDefined)
                .with("blueprintName", blueprint.name())
                .with("templateName", command.template_name.as_str()),
        ]);
        Ok(())
    }
}
