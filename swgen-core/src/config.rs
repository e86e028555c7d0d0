use serde::Deserialize;

use crate::schema::CollectionFormat;

/// Tunables of a [`Generator`](crate::Generator).
///
/// Every field has a default, so a YAML document only needs the keys it
/// wants to change:
///
/// ```yaml
/// qualify_names: true
/// definition_prefix: "#/definitions/"
/// default_collection_format: csv
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Try `{Namespace}{Name}` before falling back to `{Name}Type{n}` when
    /// two distinct types want the same definition name.
    pub qualify_names: bool,
    /// Prefix prepended to definition names in reference pointers.
    pub definition_prefix: String,
    /// Collection format used for array parameters in query and form data.
    pub default_collection_format: CollectionFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            qualify_names: false,
            definition_prefix: "#/definitions/".to_string(),
            default_collection_format: CollectionFormat::Multi,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qualified_names(mut self, qualify: bool) -> Self {
        self.qualify_names = qualify;
        self
    }

    pub fn with_definition_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.definition_prefix = prefix.into();
        self
    }

    pub fn with_default_collection_format(mut self, format: CollectionFormat) -> Self {
        self.default_collection_format = format;
        self
    }

    /// Parse a configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Read and parse a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
