// Rust guideline compliant 2026-10-12

//! Repository discovery and path management utilities.

use crate::error::{AppError, Result};
use crate::store::RecordStore;
use estatehub_core::{Config, LifecycleController};
use std::path::{Path, PathBuf};

/// Name of the data directory inside a repository root.
pub const DATA_DIR: &str = ".estatehub";

/// Repository path metadata for an EstateHub workspace.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    data_dir: PathBuf,
    records_path: PathBuf,
    config_path: PathBuf,
}

impl RepoContext {
    fn at(root: PathBuf) -> Self {
        let data_dir = root.join(DATA_DIR);
        Self {
            root,
            records_path: data_dir.join("records.jsonl"),
            config_path: data_dir.join("config.toml"),
            data_dir,
        }
    }

    /// Discovers a repository starting from an optional root.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The `.estatehub` directory is missing
    pub fn discover(repo_root: Option<&Path>) -> Result<Self> {
        let root = match repo_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let context = Self::at(root);
        if !context.data_dir.exists() {
            return Err(AppError::RepoNotInitialized {
                path: context.data_dir,
            });
        }
        Ok(context)
    }

    /// Creates `.estatehub/` with an empty record file and default config.
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn init(root: &Path) -> Result<Self> {
        let context = Self::at(root.to_path_buf());
        std::fs::create_dir_all(&context.data_dir)?;

        if !context.records_path.exists() {
            std::fs::File::create(&context.records_path)?;
        }
        if !context.config_path.exists() {
            Config::default().save(&context.data_dir)?;
        }

        tracing::info!(path = %context.data_dir.display(), "repository initialized");
        Ok(context)
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the `.estatehub` directory path.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    /// Returns the records JSONL path.
    #[must_use]
    pub fn records_path(&self) -> &Path {
        self.records_path.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens the record store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_store(&self) -> Result<RecordStore> {
        RecordStore::new(self.records_path.clone())
    }

    /// Loads repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.data_dir())?)
    }

    /// Builds a lifecycle controller from the repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn controller(&self) -> Result<LifecycleController> {
        Ok(LifecycleController::new(self.load_config()?.transition_policy()))
    }
}
