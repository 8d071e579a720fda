// ABOUTME: Environment-driven configuration for the adapter core
// ABOUTME: Template directory and suffix, placeholder markers, separated-content toggle

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{AdapterError, AdapterResult};

fn default_suffix() -> String {
    ".sql".to_string()
}

fn default_prefix() -> String {
    "$".to_string()
}

/// Everything the adapter needs to know about a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Directory holding one template file per supported operation type.
    pub query_dir: PathBuf,
    /// Appended to each template's base name to form its file name.
    #[serde(default = "default_suffix")]
    pub file_suffix: String,
    /// Placeholder markers; `$name` with an empty postfix by default.
    #[serde(default = "default_prefix")]
    pub parameter_prefix: String,
    #[serde(default)]
    pub parameter_postfix: String,
    /// Re-send post content/image fields as follow-up statements.
    #[serde(default)]
    pub separated_content: bool,
}

impl AdapterConfig {
    /// Configuration for `query_dir` with all defaults.
    #[must_use]
    pub fn new(query_dir: impl Into<PathBuf>) -> Self {
        Self {
            query_dir: query_dir.into(),
            file_suffix: default_suffix(),
            parameter_prefix: default_prefix(),
            parameter_postfix: String::new(),
            separated_content: false,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `SNB_QUERY_DIR` is required; `SNB_QUERY_SUFFIX`,
    /// `SNB_PARAMETER_PREFIX`, `SNB_PARAMETER_POSTFIX` and
    /// `SNB_SEPARATED_CONTENT` override their defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `SNB_QUERY_DIR` is unset.
    pub fn from_env() -> AdapterResult<Self> {
        let query_dir = env::var("SNB_QUERY_DIR")
            .map_err(|_| AdapterError::Config("SNB_QUERY_DIR is not set".to_string()))?;
        let mut config = Self::new(query_dir);
        if let Ok(suffix) = env::var("SNB_QUERY_SUFFIX") {
            config.file_suffix = suffix;
        }
        if let Ok(prefix) = env::var("SNB_PARAMETER_PREFIX") {
            config.parameter_prefix = prefix;
        }
        if let Ok(postfix) = env::var("SNB_PARAMETER_POSTFIX") {
            config.parameter_postfix = postfix;
        }
        if let Ok(separated) = env::var("SNB_SEPARATED_CONTENT") {
            config.separated_content = matches!(separated.as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }
}
