use std::path::Path;

use serde::Deserialize;

use crate::compiler::{Compilation, compile};
use crate::error::ConfigError;

/// Keyspace filter configuration, loaded from TOML.
///
/// # Example
///
/// ```toml
/// label = "s0"
///
/// [metadata.schema]
/// refreshed-keyspaces = ["!system", "!/^system_.*/"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Prefix for log output, usually the session name.
    #[serde(default = "default_label")]
    pub label: String,
    /// Schema metadata settings.
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// The `[metadata]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataConfig {
    /// The `[metadata.schema]` table.
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// The `[metadata.schema]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaConfig {
    /// Filter specs selecting which keyspaces a refresh retrieves.
    ///
    /// Defaults to excluding the server's internal keyspaces.
    #[serde(default = "default_refreshed_keyspaces")]
    pub refreshed_keyspaces: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            metadata: MetadataConfig::default(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            refreshed_keyspaces: default_refreshed_keyspaces(),
        }
    }
}

impl FilterConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The configured keyspace specs.
    pub fn refreshed_keyspaces(&self) -> &[String] {
        &self.metadata.schema.refreshed_keyspaces
    }

    /// Compile the configured specs under the configured label.
    pub fn compile(&self) -> Compilation {
        compile(&self.label, self.refreshed_keyspaces())
    }
}

fn default_label() -> String {
    "s0".to_owned()
}

/// Server-internal keyspaces hidden from refreshes unless configured otherwise.
const DEFAULT_REFRESHED_KEYSPACES: &[&str] = &[
    "!system",
    "!/^system_.*/",
    "!/^dse_.*/",
    "!solr_admin",
    "!OpsCenter",
];

fn default_refreshed_keyspaces() -> Vec<String> {
    DEFAULT_REFRESHED_KEYSPACES
        .iter()
        .map(|&spec| spec.to_owned())
        .collect()
}
