use std::path::PathBuf;
use std::sync::Arc;

use tracing::instrument;

use crate::application::Handler;
use crate::application::ports::{EventStore, FileSystem};
use crate::domain::{Blueprint, Event, EventKind, ListTemplates};
use crate::error::DuxResult;

/// Reports each stored template of a blueprint as an event.
pub struct ListTemplatesHandler {
    fs: Arc<dyn FileSystem>,
    events: Arc<dyn EventStore>,
    root: PathBuf,
}

impl ListTemplatesHandler {
    pub fn new(fs: Arc<dyn FileSystem>, events: Arc<dyn EventStore>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            events,
            root: root.into(),
        }
    }
}

impl Handler for ListTemplatesHandler {
    type Command = ListTemplates;

    #[instrument(skip_all, fields(blueprint = %command.blueprint_name))]
    fn handle(&self, command: &ListTemplates) -> DuxResult<()> {
        let dir = Blueprint::template_dir(&self.root, &command.blueprint_name);
        let found = self
            .fs
            .list(&dir)?
            .into_iter()
            .map(|name| {
                Event::new(EventKind::BlueprintTemplateFound)
                    .with("name", name)
                    .with("blueprintName", command.blueprint_name.as_str())
            })
            .collect();

        self.events.emit(found);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TransientEventStore;
    use crate::application::ports::MockFileSystem;
    use std::path::Path;

    #[test]
    fn emits_one_event_per_template() {
        let mut fs = MockFileSystem::new();
        fs.expect_list()
            .withf(|dir: &Path| dir == Path::new("bps/web/templates"))
            .returning(|_| Ok(vec!["a.tmpl".into(), "b.tmpl".into()]));
        let events = Arc::new(TransientEventStore::new());

        ListTemplatesHandler::new(Arc::new(fs), events.clone(), "bps")
            .handle(&ListTemplates::new("web"))
            .unwrap();

        let names: Vec<_> = events
            .all()
            .iter()
            .map(|e| e.get_str("name").unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["a.tmpl", "b.tmpl"]);
        assert!(events.all().iter().all(|e| e.get_str("blueprintName") == Some("web")));
    }

    #[test]
    fn empty_directory_emits_nothing() {
        let mut fs = MockFileSystem::new();
        fs.expect_list().returning(|_| Ok(Vec::new()));
        let events = Arc::new(TransientEventStore::new());

        ListTemplatesHandler::new(Arc::new(fs), events.clone(), "bps")
            .handle(&ListTemplates::new("web"))
            .unwrap();

        assert!(events.all().is_empty());
    }
}
