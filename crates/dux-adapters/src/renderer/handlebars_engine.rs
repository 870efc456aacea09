//! Handlebars template engine.
//!
//! Templates use `{{var}}` interpolation. Every template stored next to the
//! one being rendered is registered under its file name, so templates can
//! include each other as partials (`{{> header}}`).
//!
//! Identifier helpers are available in every template:
//!
//! | Helper                      | `{{helper "user profile"}}` |
//! |-----------------------------|-----------------------------|
//! | `snake`                     | `user_profile`              |
//! | `kebab`                     | `user-profile`              |
//! | `camel`                     | `userProfile`               |
//! | `pascal`                    | `UserProfile`               |
//! | `screaming_snake`           | `USER_PROFILE`              |

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use handlebars::{Handlebars, handlebars_helper, no_escape};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use dux_core::{
    application::{ApplicationError, ports::{FileSystem, TemplateEngine}},
    domain::identifier,
    error::{DuxError, DuxResult},
};

handlebars_helper!(snake: |s: str| identifier::to_snake_case(s));
handlebars_helper!(kebab: |s: str| identifier::to_kebab_case(s));
handlebars_helper!(camel: |s: str| identifier::to_camel_case(s));
handlebars_helper!(pascal: |s: str| identifier::to_pascal_case(s));
handlebars_helper!(screaming_snake: |s: str| identifier::to_screaming_snake_case(s));

/// Renders templates read from a [`FileSystem`] with Handlebars.
///
/// Output is source code, so nothing is HTML-escaped.
#[derive(Clone)]
pub struct HandlebarsEngine {
    fs: Arc<dyn FileSystem>,
    strict: bool,
}

impl HandlebarsEngine {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs, strict: false }
    }

    /// Fail on variables missing from the data instead of rendering them empty.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn registry(&self) -> Handlebars<'static> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(self.strict);
        hb.register_escape_fn(no_escape);
        hb.register_helper("snake", Box::new(snake));
        hb.register_helper("kebab", Box::new(kebab));
        hb.register_helper("camel", Box::new(camel));
        hb.register_helper("pascal", Box::new(pascal));
        hb.register_helper("screaming_snake", Box::new(screaming_snake));
        hb
    }

    fn read(&self, path: &Path) -> DuxResult<String> {
        let mut text = String::new();
        self.fs
            .open(path)?
            .read_to_string(&mut text)
            .map_err(|e| ApplicationError::filesystem(path, &e))?;
        Ok(text)
    }

    /// Register `name` and every readable sibling in `template_dir`.
    ///
    /// Siblings that fail to load are skipped; only `name` itself must load.
    fn load(&self, hb: &mut Handlebars<'static>, template_dir: &Path, name: &str) -> DuxResult<()> {
        for sibling in self.fs.list(template_dir)? {
            if sibling == name {
                continue;
            }
            let registered = self
                .read(&template_dir.join(&sibling))
                .and_then(|text| hb.register_template_string(&sibling, text).map_err(rendering_failed));
            if let Err(e) = registered {
                warn!(template = %sibling, error = %e, "skipping unusable sibling template");
            }
        }

        let text = self.read(&template_dir.join(name))?;
        hb.register_template_string(name, text)
            .map_err(rendering_failed)
    }
}

impl TemplateEngine for HandlebarsEngine {
    #[instrument(skip(self, out, data), fields(dir = %template_dir.display()))]
    fn render_template(
        &self,
        out: &mut dyn Write,
        template_dir: &Path,
        name: &str,
        data: &Value,
    ) -> DuxResult<()> {
        let mut hb = self.registry();
        self.load(&mut hb, template_dir, name)?;

        hb.render_to_write(name, data, out).map_err(rendering_failed)?;
        debug!("template rendered");
        Ok(())
    }

    fn render_string(&self, text: &str, data: &Value) -> DuxResult<String> {
        self.registry()
            .render_template(text, data)
            .map_err(rendering_failed)
    }
}

impl std::fmt::Debug for HandlebarsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsEngine")
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

fn rendering_failed(e: impl std::fmt::Display) -> DuxError {
    ApplicationError::RenderingFailed {
        reason: e.to_string(),
    }
    .into()
}
