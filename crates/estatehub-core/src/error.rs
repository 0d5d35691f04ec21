// Rust guideline compliant 2026-10-12

//! Error types for the EstateHub core library.

use crate::models::RecordKind;
use crate::schema::FieldType;
use thiserror::Error;

/// Result type alias for EstateHub core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A malformed filter, sort or page request, or an unparseable value.
///
/// Always a caller bug and always recoverable by correcting the request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The field does not exist on this record kind.
    #[error("Unknown field '{field}' for {kind}")]
    UnknownField {
        /// Record kind the request was built for.
        kind: RecordKind,
        /// Offending field name.
        field: String,
    },

    /// The field exists but cannot be filtered on.
    #[error("Field '{field}' of {kind} is not filterable")]
    NotFilterable {
        /// Record kind the request was built for.
        kind: RecordKind,
        /// Offending field name.
        field: String,
    },

    /// The field exists but cannot be sorted on.
    #[error("Field '{field}' of {kind} is not sortable")]
    NotSortable {
        /// Record kind the request was built for.
        kind: RecordKind,
        /// Offending field name.
        field: String,
    },

    /// The field exists but is not part of free-text search.
    #[error("Field '{field}' of {kind} is not searchable")]
    NotSearchable {
        /// Record kind the request was built for.
        kind: RecordKind,
        /// Offending field name.
        field: String,
    },

    /// The predicate or value does not fit the field's type.
    #[error("Field '{field}' is {expected}; {detail}")]
    TypeMismatch {
        /// Offending field name.
        field: String,
        /// Declared type of the field.
        expected: FieldType,
        /// What was attempted.
        detail: String,
    },

    /// A range whose lower bound lies above its upper bound.
    #[error("Empty range on field '{field}': lower bound exceeds upper bound")]
    EmptyRange {
        /// Offending field name.
        field: String,
    },

    /// Negative page index or non-positive page size.
    #[error("Invalid page request: {0}")]
    InvalidPage(String),

    /// Unknown record kind name.
    #[error("Unknown record kind: {0}")]
    UnknownKind(String),

    /// Value not in the kind's status enum.
    #[error("Unknown {kind} status: {value}")]
    UnknownStatus {
        /// Record kind whose status space was searched.
        kind: RecordKind,
        /// Offending value.
        value: String,
    },

    /// A value that cannot be parsed for its field.
    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        /// Field the value was meant for.
        field: String,
        /// Offending value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The field is not an unconditional boolean toggle.
    #[error("Field '{field}' of {kind} cannot be toggled")]
    NotToggleable {
        /// Record kind of the target record.
        kind: RecordKind,
        /// Offending field name.
        field: String,
    },

    /// A schema loaded from configuration does not fit the record kind.
    #[error("Invalid schema for {kind}: {reason}")]
    InvalidSchema {
        /// Record kind the schema was declared for.
        kind: RecordKind,
        /// Why the schema was rejected.
        reason: String,
    },

    /// A filter and a sort built for different record kinds.
    #[error("Cannot sort a {filter} query by a {sort} field")]
    KindMismatch {
        /// Kind the filter targets.
        filter: RecordKind,
        /// Kind the sort targets.
        sort: RecordKind,
    },
}

/// A requested status change that violates the transition policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The `(from, to)` pair is not in the kind's transition table.
    #[error("Cannot transition {kind} from '{from}' to '{to}'")]
    InvalidTransition {
        /// Record kind of the target record.
        kind: RecordKind,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// The requested status equals the current status.
    #[error("{kind} is already '{status}'")]
    NoOpTransition {
        /// Record kind of the target record.
        kind: RecordKind,
        /// Current (and requested) status.
        status: String,
    },
}

/// Error types for EstateHub core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Request validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Status transition rejected.
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
