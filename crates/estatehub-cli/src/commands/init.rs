// Rust guideline compliant 2026-10-12

//! Implementation of the `estate init` command.

use crate::OutputFormatter;
use anyhow::Result;
use estatehub_app::RepoContext;

/// Initializes an EstateHub repository in the current directory.
///
/// Creates `.estatehub/` with an empty `records.jsonl` and a default
/// `config.toml`. Existing files are kept.
///
/// # Errors
///
/// Returns an error if the current directory cannot be resolved or a file
/// cannot be created.
pub fn execute(formatter: &dyn OutputFormatter) -> Result<()> {
    let root = std::env::current_dir()?;
    let repo = RepoContext::init(&root)?;

    println!(
        "{}",
        formatter.format_message(&format!(
            "Initialized EstateHub repository in {}",
            repo.data_dir().display()
        ))
    );
    Ok(())
}
