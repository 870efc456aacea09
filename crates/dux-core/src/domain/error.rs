// ============================================================================
// domain/error.rs - VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel on failure events)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid blueprint name '{name}': {reason}")]
    InvalidBlueprintName { name: String, reason: String },

    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    #[error("Invalid destination '{name}': {reason}")]
    InvalidDestination { name: String, reason: String },

    #[error("Install has {sources} sources but {destinations} destinations")]
    MismatchedInstallPaths { sources: usize, destinations: usize },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidBlueprintName { name, reason } => vec![
                format!("Blueprint name '{name}' is invalid: {reason}"),
                "Use letters, digits, hyphens and underscores".into(),
                "Examples: component, rust-module, http_handler".into(),
            ],
            Self::InvalidTemplateName { name, reason } => vec![
                format!("Template name '{name}' is invalid: {reason}"),
                "Template names are plain file names, e.g. main.rs.tmpl".into(),
            ],
            Self::InvalidDestination { name, .. } => vec![
                format!("Destination '{name}' must be a relative path"),
                "Destinations may contain directories, e.g. src/{{name}}.rs".into(),
            ],
            Self::MismatchedInstallPaths { .. } => {
                vec!["Every staged source needs exactly one destination".into()]
            }
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
