//! Adapter configuration via `kindstore.toml`
//!
//! Every setting has a default, so an empty file (or no file) is a valid
//! configuration. Query ceilings feed [`QueryLimits`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use kindstore_core::{Error, QueryLimits, Result, MAX_QUERY_COMPONENTS, MAX_QUERY_OFFSET};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "kindstore.toml";

/// Adapter configuration loaded from `kindstore.toml`
///
/// # Example
///
/// ```toml
/// app_id = "guestbook"
/// require_indexes = true
/// max_query_offset = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Application id used when a command names none
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Fail queries whose composite index is missing
    #[serde(default)]
    pub require_indexes: bool,
    /// Largest accepted query offset
    #[serde(default = "default_max_query_offset")]
    pub max_query_offset: u64,
    /// Largest accepted filters + orders + ancestor count
    #[serde(default = "default_max_query_components")]
    pub max_query_components: usize,
}

fn default_app_id() -> String {
    "default".to_string()
}

fn default_max_query_offset() -> u64 {
    MAX_QUERY_OFFSET
}

fn default_max_query_components() -> usize {
    MAX_QUERY_COMPONENTS
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            require_indexes: false,
            max_query_offset: default_max_query_offset(),
            max_query_components: default_max_query_components(),
        }
    }
}

impl AdapterConfig {
    /// Query ceilings derived from this config
    pub fn limits(&self) -> QueryLimits {
        QueryLimits {
            max_query_offset: self.max_query_offset,
            max_query_components: self.max_query_components,
        }
    }

    /// Check the settings for consistency
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an empty app id or a zero component ceiling.
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(Error::bad_request("app_id cannot be empty"));
        }
        if self.max_query_components == 0 {
            return Err(Error::bad_request("max_query_components must be positive"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kindstore adapter configuration
#
# Application id used when a request names none.
app_id = "default"

# Fail queries that need a composite index which does not exist (default: false).
require_indexes = false

# Query ceilings. Requests over them fail as bad requests.
max_query_offset = 1000
max_query_components = 100
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AdapterConfig = toml::from_str(content)
            .map_err(|e| Error::bad_request(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::BadRequest(reason) => {
                Error::bad_request(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::internal(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
