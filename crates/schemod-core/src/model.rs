//! # Model Graph: Resolved Output of a Resolution Run
//!
//! A run turns one schema document into a [`ModelMap`]: named [`Model`]s,
//! each an ordered list of [`Property`]s tagged with a [`PropertyTag`].
//! Models refer to each other by name only (`object_model_name`,
//! `collection_element_types`, `dependencies`), never by embedding, so a
//! schema that refers back to an ancestor produces no ownership cycle.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Canonical classification of a property's type.
///
/// JSON Schema's union-typed, nullable, enum-based type grammar collapses
/// into exactly these nine tags. Every consumer matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyTag {
    /// Ordered collection.
    Array,
    /// Non-nullable boolean.
    Boolean,
    /// Non-nullable integer that may be negative.
    SignedInt,
    /// Non-nullable integer with a non-negative `minimum`.
    UnsignedInt,
    /// Non-nullable floating point, or a non-nullable integer/number union.
    Number,
    /// Nullable numeric or boolean wrapper.
    BoxedNumber,
    /// Text.
    String,
    /// Nested record. Named by `object_model_name` when it has properties.
    Object,
    /// Untyped or heterogeneous value.
    Dynamic,
}

impl PropertyTag {
    /// Returns all tags in declaration order.
    pub fn all_tags() -> &'static [PropertyTag] {
        &[
            Self::Array,
            Self::Boolean,
            Self::SignedInt,
            Self::UnsignedInt,
            Self::Number,
            Self::BoxedNumber,
            Self::String,
            Self::Object,
            Self::Dynamic,
        ]
    }

    /// Returns the camelCase identifier for this tag.
    ///
    /// This matches the serde serialization format and is the literal used
    /// for scalar entries in `collection_element_types` and `dependencies`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::SignedInt => "signedInt",
            Self::UnsignedInt => "unsignedInt",
            Self::Number => "number",
            Self::BoxedNumber => "boxedNumber",
            Self::String => "string",
            Self::Object => "object",
            Self::Dynamic => "dynamic",
        }
    }

    /// True for tags whose values need reference/ownership semantics
    /// downstream; false for plain scalars.
    pub fn is_reference_like(&self) -> bool {
        match self {
            Self::Array | Self::BoxedNumber | Self::String | Self::Object | Self::Dynamic => true,
            Self::Boolean | Self::SignedInt | Self::UnsignedInt | Self::Number => false,
        }
    }
}

impl fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyTag {
    type Err = String;

    /// Parse a tag from the identifiers produced by [`PropertyTag::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_tags()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown property tag: {s:?}"))
    }
}

/// One field of a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Accessor name: the camelCased schema key, or its override verbatim.
    pub name: String,
    /// Canonical type classification.
    pub tag: PropertyTag,
    /// True if the value may be absent or null.
    pub optional: bool,
    /// Human text carried through from the schema.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Name of the referenced model; only set for `Object` properties whose
    /// schema declares properties.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub object_model_name: Option<String>,
    /// Element type names of an `Array` property, in declaration order.
    /// Empty when the elements are a single homogeneous scalar.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub collection_element_types: Vec<String>,
}

impl Property {
    /// A property with no description, model reference, or element types.
    pub fn new(name: impl Into<String>, tag: PropertyTag, optional: bool) -> Self {
        Self {
            name: name.into(),
            tag,
            optional,
            description: None,
            object_model_name: None,
            collection_element_types: Vec::new(),
        }
    }

    /// See [`PropertyTag::is_reference_like`].
    pub fn is_reference_like(&self) -> bool {
        self.tag.is_reference_like()
    }

    /// True for an `Object` property that names a registered model.
    pub fn has_model(&self) -> bool {
        self.object_model_name.is_some()
    }
}

/// One generated named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique within one resolution run.
    pub name: String,
    /// Properties in schema declaration order.
    pub properties: Vec<Property>,
    /// Model names and scalar tag literals referenced by the properties.
    pub dependencies: BTreeSet<String>,
}

impl Model {
    /// An empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Look up a property by its (post-override) name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Stable position of a model inside a [`ModelMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

/// Ordered mapping of model name to [`Model`].
///
/// Models are stored in discovery order: a parent appears before the models
/// nested inside it. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMap {
    models: Vec<Model>,
    index: HashMap<String, ModelId>,
}

impl ModelMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a model. Returns `None` (leaving the map unchanged) if a model
    /// with the same name is already present.
    pub fn insert(&mut self, model: Model) -> Option<ModelId> {
        if self.index.contains_key(&model.name) {
            return None;
        }
        let id = ModelId(self.models.len());
        self.index.insert(model.name.clone(), id);
        self.models.push(model);
        Some(id)
    }

    /// Look up a model by name.
    pub fn get(&self, name: &str) -> Option<&Model> {
        self.index.get(name).map(|id| &self.models[id.0])
    }

    /// True if a model with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True if no models were produced.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Models in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    /// Model names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }
}

impl Serialize for ModelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.models.len()))?;
        for model in &self.models {
            map.serialize_entry(&model.name, model)?;
        }
        map.end()
    }
}
