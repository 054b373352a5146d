//! # Model and Property Naming
//!
//! A model name is `<prefix><Stem>Model`. The stem is chosen by precedence:
//!
//! 1. the schema node's name override, capitalized;
//! 2. the last `$ref` segment that reached the node, capitalized;
//! 3. the parent model's stem followed by the capitalized declaring
//!    property key (`value` → `obj` gives `ValueObj`), plus the entry's
//!    index for inline objects in a positional `items` list or `anyOf`.
//!
//! Overrides and references start a fresh stem, so models reached through
//! a definition are named the same wherever they are referenced from.
//!
//! A property is named by its schema key in lower camelCase, unless its
//! entry carries a name override, which is used verbatim.

use convert_case::{Case, Casing};
use serde_json::Value;

use schemod_core::{ResolveConfig, ResolveError};

/// Suffix appended to every generated model name.
pub const MODEL_SUFFIX: &str = "Model";

/// Derives model and property names from a [`ResolveConfig`].
#[derive(Debug, Clone)]
pub struct NamingStrategy<'c> {
    config: &'c ResolveConfig,
}

impl<'c> NamingStrategy<'c> {
    /// Naming over the given configuration.
    pub fn new(config: &'c ResolveConfig) -> Self {
        Self { config }
    }

    /// Stem of the root model: the configured root name, capitalized.
    pub fn root_stem(&self) -> String {
        capitalize(&self.config.root_name)
    }

    /// Full model name for a stem.
    pub fn model_name(&self, stem: &str) -> String {
        format!("{}{}{}", self.config.class_prefix, stem, MODEL_SUFFIX)
    }

    /// Stem of a nested model declared by `key` inside the model with
    /// `parent_stem`.
    pub fn nested_stem(&self, parent_stem: &str, key: &str) -> String {
        format!("{parent_stem}{}", capitalize(key))
    }

    /// Stem of the inline object at `index` in a positional `items` list
    /// or `anyOf` (`Pair` at 1 gives `Pair1`).
    pub fn positional_stem(&self, stem: &str, index: usize) -> String {
        format!("{stem}{index}")
    }

    /// Stem for an object schema, applying override and `$ref` precedence
    /// before falling back to `path_stem`.
    pub fn model_stem(
        &self,
        node: &Value,
        ref_name: Option<&str>,
        path_stem: String,
        path: &str,
    ) -> Result<String, ResolveError> {
        if let Some(name) = self.override_value(node, path)? {
            return Ok(capitalize(name));
        }
        Ok(match ref_name {
            Some(name) => capitalize(name),
            None => path_stem,
        })
    }

    /// Accessor name of a property declared under `key`.
    pub fn property_name(&self, key: &str, entry: &Value, path: &str) -> Result<String, ResolveError> {
        Ok(match self.override_value(entry, path)? {
            Some(name) => name.to_string(),
            None => self.key_name(key),
        })
    }

    /// Schema key in lower camelCase (`int_value` → `intValue`).
    pub fn key_name(&self, key: &str) -> String {
        key.to_case(Case::Camel)
    }

    fn override_value<'v>(&self, node: &'v Value, path: &str) -> Result<Option<&'v str>, ResolveError> {
        match node.get(&self.config.name_override_key) {
            None => Ok(None),
            Some(Value::String(name)) if !name.is_empty() => Ok(Some(name.as_str())),
            Some(other) => Err(ResolveError::MalformedSchema {
                path: path.to_string(),
                reason: format!(
                    "`{}` must be a non-empty string, found {other}",
                    self.config.name_override_key
                ),
            }),
        }
    }
}

/// UpperCamelCase a name segment (`other_object` → `OtherObject`).
fn capitalize(segment: &str) -> String {
    segment.to_case(Case::Pascal)
}
