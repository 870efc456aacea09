use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::{BlueprintStore, EventStore, FileSystem, TemplateEngine};
use crate::application::{ApplicationError, Handler};
use crate::domain::{Blueprint, DomainValidator, Event, EventKind, RenderBlueprint};
use crate::error::{DuxError, DuxResult};

/// Renders every file of a blueprint below a destination directory.
///
/// Only loading the blueprint is fatal. Each file is reported on its own,
/// as `template-rendered` or as the failure that stopped it.
pub struct RenderBlueprintHandler {
    fs: Arc<dyn FileSystem>,
    store: Arc<dyn BlueprintStore>,
    engine: Arc<dyn TemplateEngine>,
    events: Arc<dyn EventStore>,
    root: PathBuf,
}

impl RenderBlueprintHandler {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn BlueprintStore>,
        engine: Arc<dyn TemplateEngine>,
        events: Arc<dyn EventStore>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            store,
            engine,
            events,
            root: root.into(),
        }
    }

    fn render_file(
        &self,
        command: &RenderBlueprint,
        template_dir: &Path,
        destination: &str,
        template: &str,
    ) -> Event {
        let event = |kind: EventKind, filename: &str| {
            Event::new(kind)
                .with("filename", filename)
                .with("templateName", template)
                .with("blueprintName", command.name.as_str())
        };
        let failed = |kind: EventKind, filename: &str, error: DuxError| {
            warn!(file = filename, event = kind.as_str(), error = %error, "file not rendered");
            event(kind, filename).with_error(error)
        };

        let filename = match self
            .engine
            .render_string(destination, &command.data)
            .and_then(|name| {
                DomainValidator::validate_destination(&name)?;
                Ok(name)
            }) {
            Ok(name) => name,
            Err(e) => return failed(EventKind::RenderDestinationFilenameFailed, destination, e),
        };

        let path = command.destination.join(&filename);
        let staged = path.to_string_lossy();

        // Rendered in memory first so a broken template leaves no file behind.
        let mut body = Vec::new();
        if let Err(e) = self
            .engine
            .render_template(&mut body, template_dir, template, &command.data)
        {
            return failed(EventKind::RenderTemplateFailed, &staged, e);
        }

        let mut out = match self.fs.create(&path) {
            Ok(out) => out,
            Err(e) => return failed(EventKind::CreateDestinationFileFailed, &staged, e),
        };
        if let Err(e) = out.write_all(&body).and_then(|()| out.flush()) {
            let error: DuxError = ApplicationError::filesystem(&path, &e).into();
            return failed(EventKind::RenderTemplateFailed, &staged, error);
        }

        debug!(file = %staged, template, "rendered");
        event(EventKind::TemplateRendered, &staged)
    }
}

impl Handler for RenderBlueprintHandler {
    type Command = RenderBlueprint;

    #[instrument(skip_all, fields(blueprint = %command.name, destination = %command.destination.display()))]
    fn handle(&self, command: &RenderBlueprint) -> DuxResult<()> {
        let blueprint = self.store.get(&command.name)?;
        let template_dir = Blueprint::template_dir(&self.root, blueprint.name());

        for (destination, template) in blueprint.files() {
            let event = self.render_file(command, &template_dir, destination, template);
            self.events.emit(vec![event]);
        }

        info!(files = blueprint.file_count(), "blueprint rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TransientEventStore;
    use crate::application::ports::{MockBlueprintStore, MockFileSystem};
    use serde_json::{Value, json};
    use std::io;

    /// Substitutes `{{n}}` and writes the template name as the body.
    struct FakeEngine;

    impl TemplateEngine for FakeEngine {
        fn render_template(
            &self,
            out: &mut dyn Write,
            _: &Path,
            name: &str,
            _: &Value,
        ) -> DuxResult<()> {
            if name == "broken.tmpl" {
                return Err(ApplicationError::RenderingFailed {
                    reason: "unclosed tag".into(),
                }
                .into());
            }
            out.write_all(name.as_bytes()).map_err(|e| ApplicationError::filesystem(name, &e))?;
            Ok(())
        }

        fn render_string(&self, text: &str, data: &Value) -> DuxResult<String> {
            let n = match &data["n"] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(text.replace("{{n}}", &n))
        }
    }

    fn store_with(files: &[(&str, &str)]) -> MockBlueprintStore {
        let mut bp = Blueprint::new("web").unwrap();
        for (destination, template) in files {
            bp.define_file(*destination, *template).unwrap();
        }
        let mut store = MockBlueprintStore::new();
        store.expect_get().returning(move |_| Ok(bp.clone()));
        store
    }

    fn handler(fs: MockFileSystem, store: MockBlueprintStore, events: Arc<TransientEventStore>) -> RenderBlueprintHandler {
        RenderBlueprintHandler::new(Arc::new(fs), Arc::new(store), Arc::new(FakeEngine), events, "bps")
    }

    fn render(name: &str) -> RenderBlueprint {
        RenderBlueprint::new(name, "staging", json!({ "n": 1 }))
    }

    #[test]
    fn missing_blueprint_is_fatal() {
        let mut store = MockBlueprintStore::new();
        store.expect_get().returning(|name| {
            Err(ApplicationError::BlueprintNotFound { name: name.into() }.into())
        });
        let events = Arc::new(TransientEventStore::new());

        let err = handler(MockFileSystem::new(), store, events.clone())
            .handle(&render("nope"))
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(events.all().is_empty());
    }

    #[test]
    fn renders_into_destination_with_templated_name() {
        let mut fs = MockFileSystem::new();
        fs.expect_create()
            .withf(|p: &Path| p == Path::new("staging/1-file"))
            .times(1)
            .returning(|_| Ok(Box::new(io::sink())));
        let events = Arc::new(TransientEventStore::new());

        handler(fs, store_with(&[("{{n}}-file", "t.tmpl")]), events.clone())
            .handle(&render("web"))
            .unwrap();

        let all = events.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "template-rendered");
        assert_eq!(all[0].get_str("filename"), Some("staging/1-file"));
        assert_eq!(all[0].get_str("templateName"), Some("t.tmpl"));
        assert_eq!(all[0].get_str("blueprintName"), Some("web"));
    }

    #[test]
    fn failures_are_reported_per_file() {
        let mut fs = MockFileSystem::new();
        fs.expect_create().returning(|p| {
            if p == Path::new("staging/locked") {
                Err(ApplicationError::FilesystemError {
                    path: p.into(),
                    reason: "permission denied".into(),
                }
                .into())
            } else {
                Ok(Box::new(io::sink()))
            }
        });
        let events = Arc::new(TransientEventStore::new());

        handler(
            fs,
            store_with(&[("bad", "broken.tmpl"), ("good", "t.tmpl"), ("locked", "t.tmpl")]),
            events.clone(),
        )
        .handle(&render("web"))
        .unwrap();

        let names: Vec<_> = events.all().iter().map(Event::name).collect();
        assert_eq!(
            names,
            vec!["render-template-failed", "template-rendered", "create-destination-file-failed"]
        );
        assert!(events.all()[0].error().is_some());
    }

    #[test]
    fn broken_template_creates_no_file() {
        let mut fs = MockFileSystem::new();
        fs.expect_create().never();
        let events = Arc::new(TransientEventStore::new());

        handler(fs, store_with(&[("bad", "broken.tmpl")]), events.clone())
            .handle(&render("web"))
            .unwrap();

        let all = events.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "render-template-failed");
        assert_eq!(all[0].get_str("filename"), Some("staging/bad"));
    }

    #[test]
    fn rendered_name_escaping_destination_is_rejected() {
        let mut fs = MockFileSystem::new();
        fs.expect_create().never();
        let events = Arc::new(TransientEventStore::new());

        handler(fs, store_with(&[("{{n}}", "t.tmpl")]), events.clone())
            .handle(&RenderBlueprint::new("web", "staging", json!({ "n": "../../etc" })))
            .unwrap();

        let all = events.all();
        assert_eq!(all[0].name(), "render-destination-filename-failed");
        assert_eq!(all[0].get_str("filename"), Some("{{n}}"));
    }
}
