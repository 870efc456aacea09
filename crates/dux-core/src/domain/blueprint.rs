//! The blueprint aggregate.
//!
//! A blueprint is a named recipe for generating files: it maps destination
//! file names (which are themselves templates) to the names of templates
//! stored alongside the blueprint.
//!
//! ```text
//! blueprints/
//! ├── component.json            ← serialized Blueprint
//! └── component/
//!     └── templates/
//!         ├── view.tmpl         ← raw template text
//!         └── test.tmpl
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, validation::DomainValidator};

/// Directory, relative to the blueprint root, holding a blueprint's templates.
const TEMPLATES_DIR: &str = "templates";

/// Collects information about files to generate.
///
/// The name is fixed at construction and doubles as the storage key; every
/// other field is mutated in place and the whole record is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    name: String,

    /// Destination file name (a template itself) -> template name.
    #[serde(default)]
    files: BTreeMap<String, String>,

    /// A short text describing the purpose of the blueprint.
    #[serde(default)]
    description: String,
}

impl Blueprint {
    /// Create an empty blueprint.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidBlueprintName`] when `name` cannot be
    /// used as a storage key.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        DomainValidator::validate_blueprint_name(&name)?;
        Ok(Self {
            name,
            files: BTreeMap::new(),
            description: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// File mapping in destination order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(d, t)| (d.as_str(), t.as_str()))
    }

    /// Template behind `destination`, if one is mapped.
    pub fn template_for(&self, destination: &str) -> Option<&str> {
        self.files.get(destination).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Map `destination` to `template`, replacing any previous mapping for
    /// the same destination.
    pub fn define_file(
        &mut self,
        destination: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<&mut Self, DomainError> {
        let destination = destination.into();
        let template = template.into();
        DomainValidator::validate_destination(&destination)?;
        DomainValidator::validate_template_name(&template)?;

        self.files.insert(destination, template);
        Ok(self)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Directory holding the templates of the blueprint called `name`.
    pub fn template_dir(root: &Path, name: &str) -> PathBuf {
        root.join(name).join(TEMPLATES_DIR)
    }

    /// Path of template `template` of the blueprint called `name`.
    pub fn template_path(root: &Path, name: &str, template: &str) -> PathBuf {
        Self::template_dir(root, name).join(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blueprint_is_empty() {
        let bp = Blueprint::new("a").unwrap();
        assert_eq!(bp.name(), "a");
        assert_eq!(bp.file_count(), 0);
        assert_eq!(bp.description(), "");
    }

    #[test]
    fn new_rejects_invalid_names() {
        assert!(matches!(
            Blueprint::new("a/b"),
            Err(DomainError::InvalidBlueprintName { .. })
        ));
    }

    #[test]
    fn define_file_replaces_existing_mapping() {
        let mut bp = Blueprint::new("a").unwrap();
        bp.define_file("EXAMPLE", "x.tmpl").unwrap();
        bp.define_file("EXAMPLE", "y.tmpl").unwrap();

        assert_eq!(bp.file_count(), 1);
        assert_eq!(bp.template_for("EXAMPLE"), Some("y.tmpl"));
    }

    #[test]
    fn define_file_rejects_escaping_destination() {
        let mut bp = Blueprint::new("a").unwrap();
        assert!(bp.define_file("../EXAMPLE", "x.tmpl").is_err());
        assert_eq!(bp.file_count(), 0);
    }

    #[test]
    fn files_iterate_in_destination_order() {
        let mut bp = Blueprint::new("a").unwrap();
        bp.define_file("b", "t").unwrap();
        bp.define_file("a", "t").unwrap();

        let destinations: Vec<_> = bp.files().map(|(d, _)| d).collect();
        assert_eq!(destinations, vec!["a", "b"]);
    }

    #[test]
    fn serialized_shape_is_stable() {
        let mut bp = Blueprint::new("a").unwrap();
        bp.define_file("EXAMPLE", "x.tmpl").unwrap();
        bp.set_description("A test");

        let json = serde_json::to_value(&bp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "a",
                "files": { "EXAMPLE": "x.tmpl" },
                "description": "A test"
            })
        );
    }

    #[test]
    fn records_without_description_still_load() {
        let bp: Blueprint = serde_json::from_str(r#"{"name":"old","files":{}}"#).unwrap();
        assert_eq!(bp.description(), "");
    }

    #[test]
    fn template_paths_are_scoped_by_blueprint() {
        let root = Path::new("blueprints");
        assert_eq!(
            Blueprint::template_path(root, "a", "x.tmpl"),
            PathBuf::from("blueprints/a/templates/x.tmpl")
        );
    }
}
