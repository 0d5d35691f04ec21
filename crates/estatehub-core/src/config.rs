// Rust guideline compliant 2026-10-12

//! Configuration management for EstateHub.

use crate::error::{Error, Result};
use crate::lifecycle::TransitionPolicy;
use crate::models::RecordKind;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Configuration for EstateHub behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rows per page when the caller does not ask for a size.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Whether sold and rented listings may return to available.
    #[serde(default)]
    pub allow_relisting: bool,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Schema overrides, at most one per record kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<Schema>,

    /// Transition tables replacing the default policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<TransitionPolicy>,
}

/// Default page size, matching the catalog grid.
fn default_page_size() -> usize {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            allow_relisting: false,
            output_format: OutputFormat::default(),
            schemas: Vec::new(),
            transitions: None,
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.estatehub/config.toml`
    /// 3. Environment variables with `ESTATEHUB_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML or a self-transition
    /// - Configuration values fail validation
    pub fn load(dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file: {e}")))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        tracing::debug!(
            path = %config_path.display(),
            page_size = config.default_page_size,
            allow_relisting = config.allow_relisting,
            schema_overrides = config.schemas.len(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ESTATEHUB_DEFAULT_PAGE_SIZE` - Default page size (positive number)
    /// - `ESTATEHUB_ALLOW_RELISTING` - Allow re-listing (true/false)
    /// - `ESTATEHUB_OUTPUT_FORMAT` - Output format (json/table/plain)
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ESTATEHUB_DEFAULT_PAGE_SIZE") {
            self.default_page_size = val.parse().map_err(|_| {
                Error::Config("ESTATEHUB_DEFAULT_PAGE_SIZE must be a positive number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("ESTATEHUB_ALLOW_RELISTING") {
            self.allow_relisting = val.parse().map_err(|_| {
                Error::Config("ESTATEHUB_ALLOW_RELISTING must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("ESTATEHUB_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::Config(
                        "ESTATEHUB_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(Error::Config(
                "default_page_size must be greater than 0".to_string(),
            ));
        }

        let mut seen = Vec::with_capacity(self.schemas.len());
        for schema in &self.schemas {
            if seen.contains(&schema.kind) {
                return Err(Error::Config(format!(
                    "schema for {} is declared more than once",
                    schema.kind
                )));
            }
            seen.push(schema.kind);
            schema
                .validate()
                .map_err(|e| Error::Config(e.to_string()))?;
        }

        Ok(())
    }

    /// Returns the schema for a kind: the configured override, else the builtin.
    #[must_use]
    pub fn schema(&self, kind: RecordKind) -> Schema {
        self.schemas
            .iter()
            .find(|schema| schema.kind == kind)
            .cloned()
            .unwrap_or_else(|| Schema::builtin(kind))
    }

    /// Returns the transition policy in effect.
    ///
    /// The re-listing allowance is applied on top of whichever listing table
    /// is configured.
    #[must_use]
    pub fn transition_policy(&self) -> TransitionPolicy {
        let policy = self.transitions.clone().unwrap_or_default();
        if self.allow_relisting {
            policy.with_relisting()
        } else {
            policy
        }
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, dir: &Path) -> Result<()> {
        let config_path = dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingStatus;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching ESTATEHUB_* variables must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        std::env::remove_var("ESTATEHUB_DEFAULT_PAGE_SIZE");
        std::env::remove_var("ESTATEHUB_ALLOW_RELISTING");
        std::env::remove_var("ESTATEHUB_OUTPUT_FORMAT");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_page_size, 12);
        assert!(!config.allow_relisting);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.schemas.is_empty());
        assert!(config.transitions.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
default_page_size = 6
allow_relisting = true
output_format = "json"
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_page_size, 6);
        assert!(config.allow_relisting);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_config_validation_zero_page_size() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "default_page_size = 0").unwrap();

        let result = Config::load(temp_dir.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_transitions_replace_table() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
[[transitions.listing]]
from = "sold"
to = ["off_market"]
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        let policy = config.transition_policy();
        assert!(policy.listing.allows(ListingStatus::Sold, ListingStatus::OffMarket));
        assert!(!policy.listing.allows(ListingStatus::Available, ListingStatus::Sold));
        assert_eq!(policy.inquiry, TransitionPolicy::default().inquiry);
    }

    #[test]
    fn test_config_rejects_self_transition() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
[[transitions.listing]]
from = "sold"
to = ["sold"]
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_rejects_unknown_schema_field() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
[[schemas]]
kind = "amenity"
fields = [{ name = "rating", type = "number", filterable = true, sortable = true, searchable = false }]
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        assert!(matches!(Config::load(temp_dir.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_env_override_page_size() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ESTATEHUB_DEFAULT_PAGE_SIZE", "24");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_page_size, 24);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_override_relisting() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ESTATEHUB_ALLOW_RELISTING", "true");
        let config = Config::load(temp_dir.path()).unwrap();
        assert!(config
            .transition_policy()
            .listing
            .allows(ListingStatus::Sold, ListingStatus::Available));

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_format() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ESTATEHUB_OUTPUT_FORMAT", "invalid");
        let result = Config::load(temp_dir.path());
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "default_page_size = 6").unwrap();

        std::env::set_var("ESTATEHUB_DEFAULT_PAGE_SIZE", "9");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.default_page_size, 9);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let original = Config {
            default_page_size: 8,
            allow_relisting: true,
            output_format: OutputFormat::Plain,
            schemas: vec![Schema::builtin(RecordKind::Amenity)],
            transitions: Some(TransitionPolicy::default()),
        };

        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(original, loaded);
    }
}
