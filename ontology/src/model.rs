//! Core ontology model types.
//!
//! These types describe one versioned ontology as plain Rust data: namespace
//! bindings, class definitions with their `rdfs:subClassOf` parents, and
//! property definitions. Built-in ontologies are assembled from the tables in
//! [`crate::namespaces`]; loaded ontologies come from
//! [`crate::loader::from_turtle`]. Either way the model is indexed into an
//! [`OntologyView`](crate::OntologyView) before it is queried.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OntologyError, Result};
use crate::schema::Schema;

/// A namespace binding: a prefix and the IRI it abbreviates.
///
/// Equality is structural over both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace {
    /// The prefix (e.g., `"phIoT"`).
    pub prefix: String,
    /// The full namespace IRI (e.g., `"https://project-haystack.org/def/phIoT/3.9.9#"`).
    pub iri: String,
}

impl Namespace {
    /// Creates a namespace binding.
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }

    /// Returns the full IRI of `local` in this namespace.
    #[must_use]
    pub fn iri_of(&self, local: &str) -> String {
        format!("{}{}", self.iri, local)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: <{}>", self.prefix, self.iri)
    }
}

/// An OWL class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Full IRI.
    pub id: String,
    /// Full IRIs of parent classes (`rdfs:subClassOf`).
    pub subclass_of: Vec<String>,
}

/// Whether a property relates a resource to a literal or to another resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `owl:DatatypeProperty`.
    Datatype,
    /// `owl:ObjectProperty`.
    Object,
}

/// A property definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Full IRI.
    pub id: String,
    /// Datatype or object property.
    pub kind: PropertyKind,
}

/// A complete namespace module: the binding plus every class and property it defines.
#[derive(Debug, Clone)]
pub struct NamespaceModule {
    /// Namespace binding.
    pub namespace: Namespace,
    /// All classes defined in this namespace.
    pub classes: Vec<Class>,
    /// All properties defined in this namespace.
    pub properties: Vec<Property>,
}

impl NamespaceModule {
    /// Builds a module from compact tables.
    ///
    /// Class entries are `(local name, parent CURIEs)`; parents are expanded
    /// against `bindings`, so a single table serves every schema version.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::UnknownPrefix`] if a parent CURIE uses a prefix
    /// that is not bound.
    pub fn from_tables(
        namespace: Namespace,
        classes: &[(&str, &[&str])],
        properties: &[(&str, PropertyKind)],
        bindings: &[Namespace],
    ) -> Result<Self> {
        let classes = classes
            .iter()
            .map(|(local, parents)| {
                let subclass_of = parents
                    .iter()
                    .map(|curie| expand_curie(curie, bindings))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Class {
                    id: namespace.iri_of(local),
                    subclass_of,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let properties = properties
            .iter()
            .map(|(local, kind)| Property {
                id: namespace.iri_of(local),
                kind: *kind,
            })
            .collect();
        Ok(Self {
            namespace,
            classes,
            properties,
        })
    }
}

/// One versioned ontology.
#[derive(Debug, Clone)]
pub struct Ontology {
    /// The schema this ontology encodes.
    pub schema: Schema,
    /// Schema version (e.g., `"3.9.9"`).
    pub version: String,
    /// Namespace bindings, including ones that define no subjects.
    pub bindings: Vec<Namespace>,
    /// Namespace modules in dependency order.
    pub namespaces: Vec<NamespaceModule>,
}

impl Ontology {
    /// Looks up a class by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&Class> {
        self.namespaces
            .iter()
            .flat_map(|m| m.classes.iter())
            .find(|c| c.id == iri)
    }

    /// Returns the total number of classes across all namespaces.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.namespaces.iter().map(|m| m.classes.len()).sum()
    }

    /// Returns the total number of properties across all namespaces.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.namespaces.iter().map(|m| m.properties.len()).sum()
    }
}

/// Expands a CURIE such as `phIoT:point` against a set of bindings.
///
/// # Errors
///
/// Returns [`OntologyError::UnknownPrefix`] if the prefix is unbound or the
/// input has no `:` separator.
pub fn expand_curie(curie: &str, bindings: &[Namespace]) -> Result<String> {
    let unknown = |prefix: &str| OntologyError::UnknownPrefix {
        prefix: prefix.to_string(),
        curie: curie.to_string(),
    };
    let (prefix, local) = curie.split_once(':').ok_or_else(|| unknown(""))?;
    bindings
        .iter()
        .find(|ns| ns.prefix == prefix)
        .map(|ns| ns.iri_of(local))
        .ok_or_else(|| unknown(prefix))
}

/// Splits a full IRI into its namespace IRI and local name.
///
/// The split happens after the last `#`, or after the last `/` when there is
/// no fragment. Returns `None` if neither separator occurs or the local name
/// would be empty.
#[must_use]
pub fn split_iri(iri: &str) -> Option<(&str, &str)> {
    let cut = iri.rfind('#').or_else(|| iri.rfind('/'))? + 1;
    let (ns, local) = iri.split_at(cut);
    (!local.is_empty()).then_some((ns, local))
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// XML namespace.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// SKOS namespace.
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    /// SHACL namespace.
    pub const SH: &str = "http://www.w3.org/ns/shacl#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:boolean`.
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// Haystack datashapes namespace.
    pub const PH_SHAPES: &str = "https://project-haystack.org/datashapes/core#";
    /// Namespace for project-specific Haystack tags.
    pub const PH_CUSTOM: &str = "https://project-haystack.org/def/custom#";
}
