//! # Type Inference
//!
//! Collapses a (reference-free) schema node into a [`PropertyTag`] plus an
//! updated optionality flag.
//!
//! ## Dispatch
//!
//! 1. `enum` present: classify each literal's JSON kind and feed the
//!    distinct kinds through the multi-type rule.
//! 2. `type` is a string (or absent): the simple-type rule.
//! 3. `type` is an array: the multi-type rule.
//!
//! The optionality flag is threaded explicitly: callers pass the ambient
//! flag in and receive the (possibly forced) flag back alongside the tag.
//! A `null` anywhere in a type union or enum forces it to `true`.

use std::collections::BTreeSet;

use serde_json::Value;

use schemod_core::{PropertyTag, ResolveError};

/// JSON Schema primitive type names this engine understands.
pub const KNOWN_TYPES: &[&str] = &[
    "array", "boolean", "integer", "null", "number", "object", "string",
];

/// Types that stay unboxed as a `Number` when unioned without `null`.
const SIMPLE_NUMBERS: &[&str] = &["integer", "number"];

/// Types that can share a boxed numeric representation.
const BOXABLE_NUMBERS: &[&str] = &["boolean", "integer", "number"];

/// Infer the tag of `node`, starting from the ambient `optional` flag.
///
/// `path` locates `node` in the document for error reporting.
pub fn infer_tag(
    node: &Value,
    optional: bool,
    path: &str,
) -> Result<(PropertyTag, bool), ResolveError> {
    if let Some(values) = node.get("enum") {
        let kinds = enum_kinds(values, path)?;
        return multi_type(kinds, optional, node, path);
    }

    match node.get("type") {
        None => simple_type(None, optional, node, path),
        Some(Value::String(name)) => simple_type(Some(name.as_str()), optional, node, path),
        Some(Value::Array(names)) => {
            let names = type_names(names, path)?;
            multi_type(names, optional, node, path)
        }
        Some(other) => Err(ResolveError::MalformedSchema {
            path: path.to_string(),
            reason: format!("`type` must be a string or an array of strings, found {other}"),
        }),
    }
}

/// Classify every literal of an `enum` by its JSON value kind.
pub fn enum_kinds(values: &Value, path: &str) -> Result<BTreeSet<&'static str>, ResolveError> {
    let values = values.as_array().ok_or_else(|| ResolveError::NonArrayEnum {
        path: path.to_string(),
    })?;
    if values.is_empty() {
        return Err(ResolveError::MalformedSchema {
            path: path.to_string(),
            reason: "`enum` must list at least one value".to_string(),
        });
    }

    values
        .iter()
        .map(|value| match value {
            Value::Null => Ok("null"),
            Value::Bool(_) => Ok("boolean"),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok("integer"),
            Value::Number(_) => Ok("number"),
            Value::String(_) => Ok("string"),
            Value::Array(_) | Value::Object(_) => Err(ResolveError::UnsupportedEnumType {
                path: path.to_string(),
            }),
        })
        .collect()
}

/// Collect the names of a `type` array, rejecting non-strings and unknown names.
fn type_names<'v>(names: &'v [Value], path: &str) -> Result<BTreeSet<&'v str>, ResolveError> {
    if names.is_empty() {
        return Err(ResolveError::MalformedSchema {
            path: path.to_string(),
            reason: "`type` array must not be empty".to_string(),
        });
    }
    names
        .iter()
        .map(|name| {
            let name = name.as_str().ok_or_else(|| ResolveError::MalformedSchema {
                path: path.to_string(),
                reason: format!("`type` array entries must be strings, found {name}"),
            })?;
            ensure_known_type(name, path)?;
            Ok(name)
        })
        .collect()
}

/// Reject type names outside [`KNOWN_TYPES`].
pub fn ensure_known_type(name: &str, path: &str) -> Result<(), ResolveError> {
    if KNOWN_TYPES.contains(&name) {
        Ok(())
    } else {
        Err(ResolveError::UnsupportedType {
            path: path.to_string(),
            type_name: name.to_string(),
        })
    }
}

/// The simple-type rule for a single type name.
pub fn simple_type(
    type_name: Option<&str>,
    optional: bool,
    node: &Value,
    path: &str,
) -> Result<(PropertyTag, bool), ResolveError> {
    let Some(type_name) = type_name else {
        return Err(ResolveError::UndefinedType {
            path: path.to_string(),
        });
    };

    let tag = match type_name {
        "boolean" if optional => PropertyTag::BoxedNumber,
        "boolean" => PropertyTag::Boolean,
        "number" if optional => PropertyTag::BoxedNumber,
        "number" => PropertyTag::Number,
        "integer" if optional => PropertyTag::BoxedNumber,
        "integer" if non_negative_minimum(node, path)? => PropertyTag::UnsignedInt,
        "integer" => PropertyTag::SignedInt,
        "null" => return Ok((PropertyTag::Dynamic, true)),
        "string" => PropertyTag::String,
        "object" => PropertyTag::Object,
        "array" => PropertyTag::Array,
        other => {
            return Err(ResolveError::UnsupportedType {
                path: path.to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok((tag, optional))
}

/// The multi-type rule for a union of type names.
pub fn multi_type(
    mut names: BTreeSet<&str>,
    mut optional: bool,
    node: &Value,
    path: &str,
) -> Result<(PropertyTag, bool), ResolveError> {
    if names.remove("null") {
        optional = true;
        // A union of nothing but `null` behaves like `type: "null"`.
        if names.is_empty() {
            return simple_type(Some("null"), optional, node, path);
        }
    }

    if names.len() == 1 {
        let name = names.iter().next().copied();
        return simple_type(name, optional, node, path);
    }

    let tag = if is_subset(&names, SIMPLE_NUMBERS) && !optional {
        PropertyTag::Number
    } else if is_subset(&names, BOXABLE_NUMBERS) {
        PropertyTag::BoxedNumber
    } else {
        PropertyTag::Dynamic
    };
    Ok((tag, optional))
}

fn is_subset(names: &BTreeSet<&str>, allowed: &[&str]) -> bool {
    names.iter().all(|name| allowed.contains(name))
}

fn non_negative_minimum(node: &Value, path: &str) -> Result<bool, ResolveError> {
    match node.get("minimum") {
        None => Ok(false),
        Some(Value::Number(min)) => Ok(min.as_f64().is_some_and(|m| m >= 0.0)),
        Some(other) => Err(ResolveError::MalformedSchema {
            path: path.to_string(),
            reason: format!("`minimum` must be a number, found {other}"),
        }),
    }
}
