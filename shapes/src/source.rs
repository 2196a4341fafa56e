//! Declarative source shapes, as authored in JSON shape files.
//!
//! ```json
//! {
//!   "namespace": "https://example.org/shapes#",
//!   "prefix": "ex",
//!   "shapes": [
//!     { "name": "ahu-shape", "types": ["ahu"], "tags": ["ahu", "equip"],
//!       "predicates": { "requires": [
//!         { "path": "equipRef", "path-type": "inverse", "shapes": ["fan-shape"] }
//!       ] } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tasty_ontology::Namespace;

use crate::error::{Result, ShapeError};

/// One shape file: a namespace and the shapes it defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeFile {
    /// Namespace IRI giving each shape its identity.
    pub namespace: String,
    /// Prefix bound to the namespace in serialized output.
    pub prefix: String,
    /// The shapes.
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
}

impl ShapeFile {
    /// Decodes a shape file from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Decode`] for malformed input.
    pub fn from_json(src: &str) -> Result<Self> {
        serde_json::from_str(src).map_err(|e| ShapeError::Decode(e.to_string()))
    }

    /// The namespace binding of this file.
    #[must_use]
    pub fn binding(&self) -> Namespace {
        Namespace::new(self.prefix.clone(), self.namespace.clone())
    }

    /// Full IRI of a shape in this file's namespace.
    #[must_use]
    pub fn shape_iri(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }
}

/// A declarative shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSpec {
    /// Local name of the shape.
    pub name: String,
    /// Ontology classes instances must belong to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Ontology tags instances must carry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Project-specific tags outside the ontology.
    #[serde(rename = "tags-custom", default, skip_serializing_if = "Vec::is_empty")]
    pub tags_custom: Vec<String>,
    /// Shapes whose constraints this shape also imposes.
    #[serde(rename = "shape-mixins", default, skip_serializing_if = "Vec::is_empty")]
    pub shape_mixins: Vec<String>,
    /// Relationship constraints.
    #[serde(default, skip_serializing_if = "Predicates::is_empty")]
    pub predicates: Predicates,
}

impl ShapeSpec {
    /// Returns `true` if the shape depends on other shapes through mixins.
    #[must_use]
    pub fn has_mixins(&self) -> bool {
        !self.shape_mixins.is_empty()
    }
}

/// Required and optional relationship constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicates {
    /// Missing matches are violations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<PredicateSpec>,
    /// Missing matches are warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<PredicateSpec>,
}

impl Predicates {
    /// Returns `true` if there are no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requires.is_empty() && self.optional.is_empty()
    }
}

/// One relationship constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSpec {
    /// Ontology property traversed (e.g., `equipRef`).
    pub path: String,
    /// Traversal direction.
    #[serde(rename = "path-type", default)]
    pub path_type: PathType,
    /// Classes expected at the end of the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Shapes expected at the end of the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<String>,
}

impl PredicateSpec {
    /// Number of nodes this predicate requires.
    #[must_use]
    pub fn required_nodes(&self) -> usize {
        self.types.len() + self.shapes.len()
    }
}

/// Direction of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Focus node is the subject.
    #[default]
    Direct,
    /// Focus node is the object.
    Inverse,
}
