// Rust guideline compliant 2026-10-12

//! Implementation of the `estate catalog` command: the public listing view.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::{catalog_page, CatalogOptions};

/// Prints one page of the public catalog.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, a facet or sort
/// preset is malformed, or the store cannot be read.
pub fn execute(options: CatalogOptions, formatter: &dyn OutputFormatter) -> Result<()> {
    let (repo, store) = open_repo()?;
    let config = repo.load_config()?;
    let records = store.load_all()?;

    let page = catalog_page(&records, &config, &options)?;
    println!("{}", formatter.format_page(&page));
    Ok(())
}
