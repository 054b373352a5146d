//! # Resolution Configuration
//!
//! [`ResolveConfig`] controls how generated models are named. It can be
//! built in code or loaded from a JSON or YAML file:
//!
//! ```yaml
//! class_prefix: TS
//! root_name: ""
//! name_override_key: nameOverride
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default extension field used to override model and property names.
pub const DEFAULT_NAME_OVERRIDE_KEY: &str = "nameOverride";

/// Naming configuration for one resolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// Prepended to every generated model name.
    pub class_prefix: String,
    /// Base name of the root model. Empty yields `<prefix>Model`.
    pub root_name: String,
    /// Schema field that overrides a model name (on schema nodes) or a
    /// property name (on property entries).
    pub name_override_key: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            class_prefix: String::new(),
            root_name: String::new(),
            name_override_key: DEFAULT_NAME_OVERRIDE_KEY.to_string(),
        }
    }
}

impl ResolveConfig {
    /// Default configuration with the given class prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            class_prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Set the root model's base name.
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_use_name_override() {
        let config = ResolveConfig::default();
        assert_eq!(config.class_prefix, "");
        assert_eq!(config.root_name, "");
        assert_eq!(config.name_override_key, "nameOverride");
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = ResolveConfig::from_yaml_str("class_prefix: TS\n").unwrap();
        assert_eq!(config, ResolveConfig::with_prefix("TS"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ResolveConfig::from_json_str(r#"{"prefix": "TS"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("config.json");
        std::fs::File::create(&json_path)
            .unwrap()
            .write_all(br#"{"class_prefix": "AB", "root_name": "feed"}"#)
            .unwrap();
        let config = ResolveConfig::from_path(&json_path).unwrap();
        assert_eq!(config, ResolveConfig::with_prefix("AB").with_root_name("feed"));

        let yml_path = dir.path().join("config.yml");
        std::fs::write(&yml_path, "name_override_key: x-name\n").unwrap();
        let config = ResolveConfig::from_path(&yml_path).unwrap();
        assert_eq!(config.name_override_key, "x-name");

        let toml_path = dir.path().join("config.toml");
        std::fs::write(&toml_path, "").unwrap();
        assert!(matches!(
            ResolveConfig::from_path(&toml_path),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = ResolveConfig::from_path(Path::new("/nonexistent/schemod.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
