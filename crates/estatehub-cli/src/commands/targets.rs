// Rust guideline compliant 2026-10-12

//! Implementation of the `estate targets` command.
//!
//! Prints the statuses a record may move to under the configured
//! transition tables. An empty answer means the status is terminal.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::parse_kind;

/// Shows the allowed status targets of one record.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, the config is
/// invalid, or no record has the id.
pub fn execute(kind: String, id: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let (repo, store) = open_repo()?;
    let kind = parse_kind(&kind)?;
    let controller = repo.controller()?;

    let record = store.find(kind, &id)?;
    let targets = controller.allowed_record_targets(&record);

    println!("{}", formatter.format_targets(&record, &targets));
    Ok(())
}
