// Rust guideline compliant 2026-10-12

//! Implementation of the `estate show` command.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::parse_kind;

/// Shows one record by kind and id.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, the kind is
/// unknown, or no record has the id.
pub fn execute(kind: String, id: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let (_repo, store) = open_repo()?;
    let kind = parse_kind(&kind)?;
    let record = store.find(kind, &id)?;

    println!("{}", formatter.format_record(&record));
    Ok(())
}
