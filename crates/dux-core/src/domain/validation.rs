use std::path::{Component, Path};

use crate::domain::error::DomainError;

/// Suffix of stored blueprint records. A blueprint named with it would have
/// its template directory mistaken for another blueprint's record.
pub const RECORD_SUFFIX: &str = ".json";

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Blueprint names become file names in the store, so they must be a
    /// single, visible path segment.
    pub fn validate_blueprint_name(name: &str) -> Result<(), DomainError> {
        let problem = file_name_problem(name).or_else(|| {
            name.ends_with(RECORD_SUFFIX)
                .then_some("name cannot end with '.json'")
        });
        problem.map_or(Ok(()), |reason| {
            Err(DomainError::InvalidBlueprintName {
                name: name.into(),
                reason: reason.into(),
            })
        })
    }

    /// Template names are stored as files below the blueprint's template
    /// directory.
    pub fn validate_template_name(name: &str) -> Result<(), DomainError> {
        file_name_problem(name).map_or(Ok(()), |reason| {
            Err(DomainError::InvalidTemplateName {
                name: name.into(),
                reason: reason.into(),
            })
        })
    }

    /// Destinations may span directories but must stay below the render
    /// destination.
    pub fn validate_destination(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidDestination {
            name: name.into(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("destination cannot be empty"));
        }

        for component in Path::new(name).components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("destination cannot contain '..'")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("destination cannot be absolute"));
                }
            }
        }

        Ok(())
    }
}

fn file_name_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("name cannot be empty");
    }
    if name.starts_with('.') {
        return Some("name cannot start with '.'");
    }
    if name.contains('/') || name.contains('\\') {
        return Some("name cannot contain path separators");
    }
    None
}
