// Rust guideline compliant 2026-10-12

//! Implementation of the `estate role` command.

use super::open_repo;
use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::{apply_role, parse_role};

/// Changes an account's console role.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, the role name is
/// unknown, or no account has the id.
pub fn execute(id: String, role: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let (_repo, store) = open_repo()?;
    let role = parse_role(&role)?;

    let record = apply_role(&store, &id, role)?;
    println!(
        "{}",
        formatter.format_updated(&format!("account {id} is now {role}"), &record)
    );
    Ok(())
}
