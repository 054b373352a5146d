//! # Reference Resolution
//!
//! Follows `$ref` pointers of the form `#/definitions/<name>` against the
//! document's root `definitions` table until a node without `$ref` is
//! reached.
//!
//! The resolver reports the name of the last reference followed, since a
//! terminal object schema is named after it. Intermediate links of a chain
//! never produce a model of their own.
//!
//! Cycles (`a -> b -> a`) are detected on the chain being followed and
//! rejected with [`ResolveError::CyclicReference`].

use serde_json::{Map, Value};

use schemod_core::ResolveError;

/// Prefix every supported `$ref` must carry.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// JSON Pointer of the `definitions` table itself.
pub const DEFINITIONS_PATH: &str = "#/definitions";

/// A schema node with all `$ref` indirection removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'s> {
    /// The first node on the chain without a `$ref`.
    pub node: &'s Value,
    /// Definition name of the reference that pointed directly at `node`,
    /// or `None` if the input had no `$ref`.
    pub ref_name: Option<&'s str>,
}

/// Resolves `$ref` chains against a document's `definitions`.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'s> {
    definitions: Option<&'s Map<String, Value>>,
}

impl<'s> RefResolver<'s> {
    /// Build a resolver over the `definitions` of a document root.
    ///
    /// A root without `definitions` is valid; every `$ref` then fails with
    /// [`ResolveError::MissingDefinition`].
    pub fn new(root: &'s Value) -> Result<Self, ResolveError> {
        let definitions = match root.get("definitions") {
            None => None,
            Some(Value::Object(defs)) => Some(defs),
            Some(_) => {
                return Err(ResolveError::MalformedSchema {
                    path: DEFINITIONS_PATH.to_string(),
                    reason: "`definitions` must be a mapping".to_string(),
                })
            }
        };
        Ok(Self { definitions })
    }

    /// Follow `node`'s `$ref` chain to its terminal node.
    pub fn resolve(&self, node: &'s Value) -> Result<Resolved<'s>, ResolveError> {
        let mut current = node;
        let mut ref_name = None;
        let mut chain: Vec<&'s str> = Vec::new();

        while let Some(reference) = current.get("$ref") {
            let reference = reference.as_str().ok_or_else(|| ResolveError::UnsupportedReference {
                reference: reference.to_string(),
            })?;
            let name = definition_name(reference)?;

            if chain.contains(&name) {
                let mut names: Vec<String> = chain.iter().map(|n| n.to_string()).collect();
                names.push(name.to_string());
                return Err(ResolveError::CyclicReference { chain: names });
            }
            chain.push(name);

            tracing::trace!(reference, depth = chain.len(), "following $ref");
            current = self.lookup(reference, name)?;
            ref_name = Some(name);
        }

        Ok(Resolved {
            node: current,
            ref_name,
        })
    }

    fn lookup(&self, reference: &str, name: &str) -> Result<&'s Value, ResolveError> {
        self.definitions
            .and_then(|defs| defs.get(name))
            .ok_or_else(|| ResolveError::MissingDefinition {
                reference: reference.to_string(),
                name: name.to_string(),
            })
    }
}

/// Extract `<name>` from `#/definitions/<name>`.
fn definition_name(reference: &str) -> Result<&str, ResolveError> {
    match reference.strip_prefix(DEFINITIONS_PREFIX) {
        Some(name) if !name.is_empty() && !name.contains('/') => Ok(name),
        _ => Err(ResolveError::UnsupportedReference {
            reference: reference.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_without_ref_is_returned_unchanged() {
        let root = json!({});
        let node = json!({"type": "string"});
        let resolver = RefResolver::new(&root).unwrap();
        let resolved = resolver.resolve(&node).unwrap();
        assert_eq!(resolved.node, &node);
        assert_eq!(resolved.ref_name, None);
    }

    #[test]
    fn chain_reports_last_segment() {
        let root = json!({
            "definitions": {
                "value2": {"$ref": "#/definitions/value3"},
                "value3": {"type": "object", "properties": {"value4": {"type": "string"}}}
            }
        });
        let node = json!({"$ref": "#/definitions/value2"});
        let resolver = RefResolver::new(&root).unwrap();
        let resolved = resolver.resolve(&node).unwrap();
        assert_eq!(resolved.ref_name, Some("value3"));
        assert_eq!(resolved.node, &root["definitions"]["value3"]);
    }

    #[test]
    fn missing_definition_is_fatal() {
        let root = json!({"definitions": {}});
        let node = json!({"$ref": "#/definitions/absent"});
        let err = RefResolver::new(&root).unwrap().resolve(&node).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingDefinition {
                reference: "#/definitions/absent".into(),
                name: "absent".into(),
            }
        );
    }

    #[test]
    fn no_definitions_table_means_missing_definition() {
        let root = json!({"type": "object"});
        let node = json!({"$ref": "#/definitions/x"});
        let err = RefResolver::new(&root).unwrap().resolve(&node).unwrap_err();
        assert!(matches!(err, ResolveError::MissingDefinition { .. }));
    }

    #[test]
    fn cycles_are_detected() {
        let root = json!({
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"$ref": "#/definitions/a"}
            }
        });
        let node = json!({"$ref": "#/definitions/a"});
        let err = RefResolver::new(&root).unwrap().resolve(&node).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CyclicReference {
                chain: vec!["a".into(), "b".into(), "a".into()],
            }
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let root = json!({"definitions": {"loop": {"$ref": "#/definitions/loop"}}});
        let node = json!({"$ref": "#/definitions/loop"});
        let err = RefResolver::new(&root).unwrap().resolve(&node).unwrap_err();
        assert!(matches!(err, ResolveError::CyclicReference { .. }));
    }

    #[test]
    fn foreign_pointers_are_rejected() {
        let root = json!({"definitions": {}});
        for reference in ["other.json#/definitions/x", "#/properties/x", "#/definitions/", "#/definitions/a/b"] {
            let node = json!({"$ref": reference});
            let err = RefResolver::new(&root).unwrap().resolve(&node).unwrap_err();
            assert!(
                matches!(err, ResolveError::UnsupportedReference { .. }),
                "{reference} should be unsupported, got {err:?}"
            );
        }
    }

    #[test]
    fn non_mapping_definitions_are_malformed() {
        let root = json!({"definitions": []});
        assert!(matches!(
            RefResolver::new(&root),
            Err(ResolveError::MalformedSchema { .. })
        ));
    }
}
