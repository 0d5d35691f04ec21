// Rust guideline compliant 2026-10-12

//! Status change services.
//!
//! Each change runs through `RecordStore::update`: the store is loaded under
//! its lock, the change is delegated to the core, and the new record is
//! written back. A failed change leaves the file untouched.

use crate::error::{AppError, Result};
use crate::store::RecordStore;
use estatehub_core::{Entity, LifecycleController, Record, RecordKind, Role, Status};

/// Returns the statuses a stored record may move to.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist.
pub fn allowed_targets(
    store: &RecordStore,
    controller: &LifecycleController,
    kind: RecordKind,
    id: &str,
) -> Result<Vec<Status>> {
    let record = store.find(kind, id)?;
    Ok(controller.allowed_record_targets(&record))
}

/// Moves a stored record to `target` and commits it.
///
/// # Errors
///
/// Returns `NotFound`, `InvalidTransition` or `NoOpTransition`. The store is
/// unchanged on error.
pub fn apply_transition(
    store: &RecordStore,
    controller: &LifecycleController,
    kind: RecordKind,
    id: &str,
    target: Status,
) -> Result<Record> {
    let record = store.update(kind, id, |record| {
        Ok(controller.transition_record(record, target)?)
    })?;
    tracing::info!(kind = %kind, id, status = %target, "status changed");
    Ok(record)
}

/// Flips a boolean toggle on a stored record and commits it.
///
/// # Errors
///
/// Returns `NotFound`, or `NotToggleable` if `field` is not a toggle.
pub fn apply_toggle(
    store: &RecordStore,
    kind: RecordKind,
    id: &str,
    field: &str,
) -> Result<Record> {
    let record = store.update(kind, id, |record| Ok(record.toggle_flag(field)?))?;
    tracing::info!(kind = %kind, id, field, value = ?record.field(field), "flag toggled");
    Ok(record)
}

/// Sets an account's role and commits it.
///
/// # Errors
///
/// Returns `NotFound` if no account has the id.
pub fn apply_role(store: &RecordStore, id: &str, role: Role) -> Result<Record> {
    let record = store.update(RecordKind::Account, id, |record| match record {
        Record::Account(account) => Ok(Record::Account(account.with_role(role))),
        other => Err(AppError::NotFound {
            kind: RecordKind::Account,
            id: other.id().to_string(),
        }),
    })?;
    tracing::info!(id, role = %role, "role changed");
    Ok(record)
}
