//! # Model Builder
//!
//! Walks an object schema in declaration order and turns each declared
//! property into a [`Property`]:
//!
//! 1. resolve the entry's `$ref` chain;
//! 2. infer its tag, starting optional unless the parent's `required`
//!    lists it;
//! 3. for an object with declared properties, build (or reuse) the nested
//!    model and record it as a dependency;
//! 4. for an array, derive the element type names from `items` and record
//!    each as a dependency.
//!
//! Nested models are built depth-first and completed before the parent that
//! references them. Any error aborts the whole run; no partial registry is
//! ever returned.
//!
//! Schema locations in errors use `#`-rooted JSON Pointers. A node reached
//! through a `$ref` is located under its definition
//! (`#/definitions/<name>`), not under the referencing property.

use std::collections::{BTreeSet, HashSet};

use serde_json::{Map, Value};

use schemod_core::{Model, ModelMap, Property, PropertyTag, ResolveConfig, ResolveError};

use crate::infer::{ensure_known_type, infer_tag, simple_type};
use crate::naming::NamingStrategy;
use crate::registry::{ModelRegistry, Reservation};
use crate::resolve::{RefResolver, Resolved, DEFINITIONS_PATH};

/// Location of the document root.
const ROOT_PATH: &str = "#";

/// Resolve `schema` into its model graph.
pub fn resolve_models(schema: &Value, config: &ResolveConfig) -> Result<ModelMap, ResolveError> {
    ModelBuilder::new(schema, config)?.run()
}

/// Drives one resolution run over a single document.
#[derive(Debug)]
pub struct ModelBuilder<'s, 'c> {
    root: &'s Value,
    resolver: RefResolver<'s>,
    naming: NamingStrategy<'c>,
    registry: ModelRegistry<'s>,
}

impl<'s, 'c> ModelBuilder<'s, 'c> {
    /// Prepare a run over `root`. Fails if the `definitions` table is malformed.
    pub fn new(root: &'s Value, config: &'c ResolveConfig) -> Result<Self, ResolveError> {
        Ok(Self {
            root,
            resolver: RefResolver::new(root)?,
            naming: NamingStrategy::new(config),
            registry: ModelRegistry::new(),
        })
    }

    /// Walk the document from its root and return every registered model.
    ///
    /// An object root becomes the root model. An array root contributes the
    /// models of its items and no root model of its own. Any other root
    /// yields no models.
    pub fn run(mut self) -> Result<ModelMap, ResolveError> {
        let resolved = self.resolver.resolve(self.root)?;
        let path = located(&resolved, ROOT_PATH);
        let (tag, _) = infer_tag(resolved.node, false, &path)?;
        let root_stem = self.naming.root_stem();

        match tag {
            PropertyTag::Object if declared_properties(resolved.node, &path)?.is_some() => {
                self.register(resolved, root_stem, &path)?;
            }
            PropertyTag::Array => {
                let mut optional = false;
                self.element_types(resolved.node, &root_stem, &path, &mut optional)?;
            }
            other => {
                tracing::warn!(tag = %other, "root schema declares no object properties; no models produced");
            }
        }

        self.registry.finish()
    }

    /// Name the object schema `resolved`, building its model on first sight.
    fn register(
        &mut self,
        resolved: Resolved<'s>,
        path_stem: String,
        path: &str,
    ) -> Result<String, ResolveError> {
        let stem = self
            .naming
            .model_stem(resolved.node, resolved.ref_name, path_stem, path)?;
        let name = self.naming.model_name(&stem);

        if let Reservation::New(id) = self.registry.reserve(&name, resolved.node, path)? {
            let model = self.build_model(&name, resolved.node, &stem, path)?;
            self.registry.complete(id, model);
        }
        Ok(name)
    }

    fn build_model(
        &mut self,
        name: &str,
        node: &'s Value,
        stem: &str,
        path: &str,
    ) -> Result<Model, ResolveError> {
        let mut model = Model::new(name);
        let Some(properties) = declared_properties(node, path)? else {
            return Ok(model);
        };
        let required = required_names(node, path)?;

        for (key, entry) in properties {
            let prop_path = pointer(&pointer(path, "properties"), key);
            let property =
                self.build_property(key, entry, &required, stem, &prop_path, &mut model.dependencies)?;
            model.properties.push(property);
        }
        Ok(model)
    }

    fn build_property(
        &mut self,
        key: &str,
        entry: &'s Value,
        required: &HashSet<&str>,
        stem: &str,
        path: &str,
        dependencies: &mut BTreeSet<String>,
    ) -> Result<Property, ResolveError> {
        let resolved = self.resolver.resolve(entry)?;
        let node_path = located(&resolved, path);

        // Absence from `required` makes the property optional before its
        // type is inferred; a `null` branch can only add optionality.
        let ambient = !required.contains(key);
        let (tag, optional) = infer_tag(resolved.node, ambient, &node_path)?;

        let owns_model =
            tag == PropertyTag::Object && declared_properties(resolved.node, &node_path)?.is_some();

        // An override on an inline object schema names its model, not the property.
        let name = if owns_model && resolved.ref_name.is_none() {
            self.naming.key_name(key)
        } else {
            self.naming.property_name(key, entry, path)?
        };
        let mut property = Property::new(name, tag, optional);
        property.description = description(entry).or_else(|| description(resolved.node));

        match tag {
            PropertyTag::Object if owns_model => {
                let nested = self.naming.nested_stem(stem, key);
                let model_name = self.register(resolved, nested, &node_path)?;
                dependencies.insert(model_name.clone());
                property.object_model_name = Some(model_name);
            }
            PropertyTag::Array => {
                let nested = self.naming.nested_stem(stem, key);
                let types =
                    self.element_types(resolved.node, &nested, &node_path, &mut property.optional)?;
                dependencies.extend(types.iter().cloned());
                property.collection_element_types = types;
            }
            _ => {}
        }

        tracing::trace!(
            property = %property.name,
            tag = %property.tag,
            optional = property.optional,
            "inferred property"
        );
        Ok(property)
    }

    /// Element type names of an array schema's `items`.
    ///
    /// `optional` is raised when a positional `null` entry or a `null` in a
    /// scalar-union shorthand admits absent elements.
    fn element_types(
        &mut self,
        node: &'s Value,
        stem: &str,
        path: &str,
        optional: &mut bool,
    ) -> Result<Vec<String>, ResolveError> {
        let items_path = pointer(path, "items");
        match node.get("items") {
            None => Ok(Vec::new()),
            Some(Value::Array(entries)) if entries.iter().all(Value::is_string) => {
                scalar_union(entries, &items_path, optional)
            }
            Some(Value::Array(entries)) => self.positional(entries, stem, &items_path, optional),
            Some(items) if items.is_object() => match items.get("anyOf") {
                Some(Value::Array(alternatives)) => {
                    self.positional(alternatives, stem, &pointer(&items_path, "anyOf"), optional)
                }
                Some(_) => Err(ResolveError::MalformedSchema {
                    path: items_path,
                    reason: "`anyOf` must be an array of schemas".to_string(),
                }),
                None => self.single_item(items, stem, &items_path),
            },
            Some(other) => Err(ResolveError::MalformedSchema {
                path: items_path,
                reason: format!("`items` must be a schema or an array, found {other}"),
            }),
        }
    }

    /// A single `items` schema: one model name if it is an object with
    /// properties, otherwise a homogeneous element type needing no list.
    fn single_item(
        &mut self,
        items: &'s Value,
        stem: &str,
        path: &str,
    ) -> Result<Vec<String>, ResolveError> {
        let resolved = self.resolver.resolve(items)?;
        let node_path = located(&resolved, path);
        let (tag, _) = infer_tag(resolved.node, false, &node_path)?;

        if tag == PropertyTag::Object && declared_properties(resolved.node, &node_path)?.is_some() {
            let name = self.register(resolved, stem.to_string(), &node_path)?;
            return Ok(vec![name]);
        }
        Ok(Vec::new())
    }

    /// Positional `items` or `anyOf` alternatives: one type name per entry,
    /// in declaration order. `null` entries only make the array optional.
    /// Inline object entries are named by their position.
    fn positional(
        &mut self,
        entries: &'s [Value],
        stem: &str,
        path: &str,
        optional: &mut bool,
    ) -> Result<Vec<String>, ResolveError> {
        let mut types = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let entry_path = pointer(path, &index.to_string());

            if let Value::String(type_name) = entry {
                if type_name == "null" {
                    *optional = true;
                } else {
                    types.push(scalar_tag(type_name, &entry_path)?.as_str().to_string());
                }
                continue;
            }

            let resolved = self.resolver.resolve(entry)?;
            let node_path = located(&resolved, &entry_path);
            if is_null_schema(resolved.node) {
                *optional = true;
                continue;
            }

            let (tag, _) = infer_tag(resolved.node, false, &node_path)?;
            let type_name = match tag {
                PropertyTag::Object if declared_properties(resolved.node, &node_path)?.is_some() => {
                    let entry_stem = self.naming.positional_stem(stem, index);
                    self.register(resolved, entry_stem, &node_path)?
                }
                other => other.as_str().to_string(),
            };
            types.push(type_name);
        }
        Ok(types)
    }
}

/// `items` given as bare type names, e.g. `["string", "null"]`.
///
/// `null` is stripped. A single remaining type is uniform and needs no
/// enumeration; several remaining types are listed by their tags.
fn scalar_union(
    entries: &[Value],
    path: &str,
    optional: &mut bool,
) -> Result<Vec<String>, ResolveError> {
    let mut names: Vec<&str> = Vec::new();
    for entry in entries.iter().filter_map(Value::as_str) {
        if entry == "null" {
            *optional = true;
        } else if !names.contains(&entry) {
            names.push(entry);
        }
    }

    if names.len() <= 1 {
        if let Some(name) = names.first() {
            ensure_known_type(name, path)?;
        }
        return Ok(Vec::new());
    }
    names
        .into_iter()
        .map(|name| Ok(scalar_tag(name, path)?.as_str().to_string()))
        .collect()
}

/// Tag of a bare type name with no surrounding schema.
fn scalar_tag(type_name: &str, path: &str) -> Result<PropertyTag, ResolveError> {
    ensure_known_type(type_name, path)?;
    let (tag, _) = simple_type(Some(type_name), false, &Value::Null, path)?;
    Ok(tag)
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
}

/// Non-empty `properties` of an object schema.
fn declared_properties<'s>(
    node: &'s Value,
    path: &str,
) -> Result<Option<&'s Map<String, Value>>, ResolveError> {
    match node.get("properties") {
        None => Ok(None),
        Some(Value::Object(props)) if props.is_empty() => Ok(None),
        Some(Value::Object(props)) => Ok(Some(props)),
        Some(other) => Err(ResolveError::MalformedSchema {
            path: pointer(path, "properties"),
            reason: format!("`properties` must be a mapping, found {other}"),
        }),
    }
}

fn required_names<'s>(node: &'s Value, path: &str) -> Result<HashSet<&'s str>, ResolveError> {
    let malformed = || ResolveError::MalformedSchema {
        path: pointer(path, "required"),
        reason: "`required` must be an array of property names".to_string(),
    };
    match node.get("required") {
        None => Ok(HashSet::new()),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| name.as_str().ok_or_else(malformed))
            .collect(),
        Some(_) => Err(malformed()),
    }
}

fn description(node: &Value) -> Option<String> {
    node.get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Location of a resolved node: its definition if reached by `$ref`,
/// otherwise where it was found.
fn located(resolved: &Resolved<'_>, path: &str) -> String {
    match resolved.ref_name {
        Some(name) => pointer(DEFINITIONS_PATH, name),
        None => path.to_string(),
    }
}

/// Append an escaped JSON Pointer segment.
fn pointer(base: &str, segment: &str) -> String {
    format!("{base}/{}", segment.replace('~', "~0").replace('/', "~1"))
}
