// Rust guideline compliant 2026-10-12

//! Implementation of the `estate transition` command.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::{apply_transition, parse_kind, parse_status};

/// Moves a record to a new status and commits it.
///
/// The record set is left untouched when the change is refused.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The kind or status name is unknown
/// - No record has the id
/// - The transition is not allowed, or the record already has the status
pub fn execute(
    kind: String,
    id: String,
    status: String,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let (repo, store) = open_repo()?;
    let kind = parse_kind(&kind)?;
    let target = parse_status(kind, &status)?;
    let controller = repo.controller()?;

    let record = apply_transition(&store, &controller, kind, &id, target)?;
    println!(
        "{}",
        formatter.format_updated(&format!("{kind} {id} moved to {target}"), &record)
    );
    Ok(())
}
