// Rust guideline compliant 2026-10-12

//! Command implementations for the EstateHub CLI.

pub mod catalog;
pub mod init;
pub mod list;
pub mod role;
pub mod show;
pub mod targets;
pub mod toggle;
pub mod transition;

use anyhow::Result;
use estatehub_app::{RecordStore, RepoContext};

/// Discovers the repository in the current directory and opens its store.
fn open_repo() -> Result<(RepoContext, RecordStore)> {
    let repo = RepoContext::discover(None)?;
    let store = repo.open_store()?;
    Ok((repo, store))
}
