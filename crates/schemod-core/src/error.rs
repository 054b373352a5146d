//! # Error Types: Resolution and Configuration Failures
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every [`ResolveError`] is fatal to the resolution run that raised it.
//!   There is no partial output and no retry.
//! - Errors that concern a particular schema node carry its location as a
//!   JSON-Pointer-like path (`/properties/value/items/0`), so the caller can
//!   find and fix the offending node.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a schema document cannot be resolved into a model graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A schema node declares neither `type`, `enum`, nor `$ref`.
    #[error("schema node at '{path}' declares neither `type`, `enum`, nor `$ref`")]
    UndefinedType {
        /// Location of the node.
        path: String,
    },

    /// `enum` is present but is not an array.
    #[error("`enum` at '{path}' must be an array")]
    NonArrayEnum {
        /// Location of the node declaring the enum.
        path: String,
    },

    /// An `enum` literal is itself an array or an object.
    #[error("`enum` at '{path}' contains an array or object literal")]
    UnsupportedEnumType {
        /// Location of the node declaring the enum.
        path: String,
    },

    /// A `type` name outside the JSON Schema primitive set.
    #[error("unsupported type '{type_name}' at '{path}'")]
    UnsupportedType {
        /// Location of the node.
        path: String,
        /// The unrecognized type name.
        type_name: String,
    },

    /// A `$ref` names a definition that does not exist.
    #[error("`$ref` '{reference}' points to missing definition '{name}'")]
    MissingDefinition {
        /// The full reference string.
        reference: String,
        /// The definition name extracted from the reference.
        name: String,
    },

    /// A `$ref` that is not of the form `#/definitions/<name>`.
    #[error("`$ref` '{reference}' is not of the form '#/definitions/<name>'")]
    UnsupportedReference {
        /// The full reference string.
        reference: String,
    },

    /// A `$ref` chain revisits a definition already on the chain.
    #[error("cyclic `$ref` chain: {}", .chain.join(" -> "))]
    CyclicReference {
        /// Definition names in the order they were followed, ending with
        /// the revisited name.
        chain: Vec<String>,
    },

    /// Two structurally distinct schemas were assigned the same model name.
    #[error("model name '{name}' was generated for two structurally distinct schemas (second at '{path}')")]
    NameCollision {
        /// The contested model name.
        name: String,
        /// Location of the schema that lost the name.
        path: String,
    },

    /// The schema has a shape no well-formed document can have.
    #[error("malformed schema at '{path}': {reason}")]
    MalformedSchema {
        /// Location of the node.
        path: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Error loading a [`ResolveConfig`](crate::ResolveConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration text is not valid YAML.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported config format for '{}' (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },
}
