// Rust guideline compliant 2026-10-12

//! Error handling for EstateHub application services.

use estatehub_core::{Error as CoreError, LifecycleError, RecordKind, ValidationError};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command and envelope responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested record was not found.
    NotFound,
    /// The requested status change is not in the transition table.
    InvalidTransition,
    /// The requested status equals the current status.
    NoOpTransition,
    /// A filter, sort, page or value failed validation.
    ValidationError,
    /// The configuration file is malformed.
    ConfigError,
    /// IO failure while reading or writing repository data.
    IoError,
    /// The repository has not been initialized.
    RepoNotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
    /// JSON serialization or parsing failed.
    JsonError,
    /// A stored record line cannot be read back.
    CorruptRecord,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository is missing or not initialized.
    #[error("EstateHub repository not initialized at {path}. Run 'estate init' first.")]
    RepoNotInitialized {
        /// Path where `.estatehub` was expected.
        path: PathBuf,
    },

    /// No record of the kind has the id.
    #[error("No {kind} with id '{id}'")]
    NotFound {
        /// Record kind searched.
        kind: RecordKind,
        /// Requested id.
        id: String,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A line in the record store does not parse; writes are refused.
    #[error("Malformed record at {}:{line}: {reason}", path.display())]
    CorruptRecord {
        /// Record store file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Parser message.
        reason: String,
    },

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Core(error.into())
    }
}

impl From<LifecycleError> for AppError {
    fn from(error: LifecycleError) -> Self {
        AppError::Core(error.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Core(error.into())
    }
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RepoNotInitialized { .. } => ErrorCode::RepoNotInitialized,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::CorruptRecord { .. } => ErrorCode::CorruptRecord,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::Validation(_) => ErrorCode::ValidationError,
                CoreError::Lifecycle(LifecycleError::InvalidTransition { .. }) => {
                    ErrorCode::InvalidTransition
                }
                CoreError::Lifecycle(LifecycleError::NoOpTransition { .. }) => {
                    ErrorCode::NoOpTransition
                }
                CoreError::Config(_) => ErrorCode::ConfigError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::RepoNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::CorruptRecord { path, line, .. } => Some(serde_json::json!({
                "path": path,
                "line": line,
            })),
            AppError::NotFound { kind, id } => Some(serde_json::json!({
                "kind": kind,
                "id": id,
            })),
            AppError::Core(CoreError::Lifecycle(LifecycleError::InvalidTransition {
                kind,
                from,
                to,
            })) => Some(serde_json::json!({
                "kind": kind,
                "from": from,
                "to": to,
            })),
            AppError::Core(CoreError::Validation(
                ValidationError::UnknownField { kind, field }
                | ValidationError::NotFilterable { kind, field }
                | ValidationError::NotSortable { kind, field }
                | ValidationError::NotSearchable { kind, field },
            )) => Some(serde_json::json!({
                "kind": kind,
                "field": field,
            })),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_codes_are_distinct() {
        let invalid: AppError = LifecycleError::InvalidTransition {
            kind: RecordKind::Listing,
            from: "sold".to_string(),
            to: "available".to_string(),
        }
        .into();
        let no_op: AppError = LifecycleError::NoOpTransition {
            kind: RecordKind::Listing,
            status: "sold".to_string(),
        }
        .into();

        assert_eq!(invalid.code(), ErrorCode::InvalidTransition);
        assert_eq!(no_op.code(), ErrorCode::NoOpTransition);
        assert_eq!(invalid.details().unwrap()["from"], "sold");
        assert!(no_op.details().is_none());
    }

    #[test]
    fn test_validation_details_name_field() {
        let error: AppError = ValidationError::NotSortable {
            kind: RecordKind::Inquiry,
            field: "message".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert_eq!(error.details().unwrap()["field"], "message");
    }
}
