// Rust guideline compliant 2026-10-12

//! Implementation of the `estate list` command.
//!
//! Runs the query engine over one record kind and prints a single page.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::{list_records, parse_kind, ListOptions};

/// Lists one page of records of a kind.
///
/// # Arguments
///
/// * `kind` - Record kind name (`listing`, `inquiry`, `account`, `amenity`)
/// * `options` - Search, clauses, sort and paging
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The kind, a clause, the sort field or the page size is invalid
/// - The store or config cannot be read
pub fn execute(kind: String, options: ListOptions, formatter: &dyn OutputFormatter) -> Result<()> {
    let (repo, store) = open_repo()?;
    let kind = parse_kind(&kind)?;
    let config = repo.load_config()?;
    let records = store.load_all()?;

    let page = list_records(&records, kind, &config, &options)?;
    tracing::debug!(kind = %kind, rows = page.rows.len(), matched = page.total_matched, "list page built");

    println!("{}", formatter.format_page(&page));
    Ok(())
}
