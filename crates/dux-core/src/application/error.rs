//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during command dispatch and handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No handler is registered for the command.
    #[error("Command not implemented: {command}")]
    CommandNotImplemented { command: String },

    /// Blueprint record does not exist.
    #[error("Blueprint not found: {name}")]
    BlueprintNotFound { name: String },

    /// Path does not exist in the filesystem.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Blueprint record could not be read or written.
    #[error("Blueprint storage failed for '{name}': {reason}")]
    StorageFailed { name: String, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Handler received a command it was not bound to.
    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    /// Shared state lock poisoned.
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Wrap an I/O error raised while touching `path`.
    pub fn filesystem(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FilesystemError {
                path,
                reason: err.to_string(),
            }
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandNotImplemented { command } => vec![
                format!("No handler is registered for '{command}'"),
                "This is likely a wiring error in the application".into(),
            ],
            Self::BlueprintNotFound { name } => vec![
                format!("Create it first: dux create {name}"),
                "Try: dux list to see available blueprints".into(),
            ],
            Self::FileNotFound { path } => {
                vec![format!("Check that {} exists", path.display())]
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StorageFailed { .. } => vec![
                "The blueprint record may be corrupt".into(),
                "Inspect the blueprints directory (see dux init for its location)".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the template syntax, e.g. {{name}}".into(),
                "Pass every variable the template uses as VAR=VALUE".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            Self::InvalidCommand { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BlueprintNotFound { .. } | Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::CommandNotImplemented { .. }
            | Self::FilesystemError { .. }
            | Self::StorageFailed { .. }
            | Self::InvalidCommand { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
