// Rust guideline compliant 2026-10-12

//! Implementation of the `estate toggle` command.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::{apply_toggle, parse_kind};

/// Flips `featured` on a listing or `email_verified` on an account.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, no record has
/// the id, or the field is not a toggle of the kind.
pub fn execute(
    kind: String,
    id: String,
    field: String,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let (_repo, store) = open_repo()?;
    let kind = parse_kind(&kind)?;

    let record = apply_toggle(&store, kind, &id, &field)?;
    println!(
        "{}",
        formatter.format_updated(&format!("Toggled {field} on {kind} {id}"), &record)
    );
    Ok(())
}
