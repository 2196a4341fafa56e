//! Supported schemas, versions, and their namespace bindings.
//!
//! | Schema | Versions | Namespaces |
//! |--------|----------|------------|
//! | Haystack | 3.9.9, 3.9.10 | `ph`, `phIct`, `phScience`, `phIoT` |
//! | Brick | 1.1 | `brick`, `tag`, `bsh` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OntologyError, Result};
use crate::model::{iris, Namespace};

/// Haystack version 3.9.9.
pub const V3_9_9: &str = "3.9.9";
/// Haystack version 3.9.10.
pub const V3_9_10: &str = "3.9.10";
/// Brick version 1.1.
pub const V1_1: &str = "1.1";

/// A supported tagging/ontology schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Schema {
    /// Brick.
    Brick,
    /// Project Haystack.
    Haystack,
}

/// Every supported schema with its versions.
pub const SUPPORTED_SCHEMAS: &[(Schema, &[&str])] = &[
    (Schema::Brick, &[V1_1]),
    (Schema::Haystack, &[V3_9_9, V3_9_10]),
];

/// The root concepts every schema defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootConcept {
    /// Every first-class entity type descends from this.
    Entity,
    /// Descriptive tags that are not entity types.
    Marker,
    /// Equipment types.
    Equipment,
    /// Point types.
    Point,
}

impl Schema {
    /// Every supported schema, in catalogue order.
    pub const ALL: [Schema; 2] = [Schema::Brick, Schema::Haystack];

    /// Returns the schema name as written in templates (`"Brick"`, `"Haystack"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Schema::Brick => "Brick",
            Schema::Haystack => "Haystack",
        }
    }

    /// Returns the versions supported for this schema.
    #[must_use]
    pub fn supported_versions(self) -> &'static [&'static str] {
        SUPPORTED_SCHEMAS
            .iter()
            .find_map(|&(schema, versions)| (schema == self).then_some(versions))
            .unwrap_or_default()
    }

    /// Returns the supported version string equal to `version`.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::UnsupportedVersion`] listing the supported versions.
    pub fn check_version(self, version: &str) -> Result<&'static str> {
        self.supported_versions()
            .iter()
            .copied()
            .find(|v| *v == version)
            .ok_or_else(|| OntologyError::UnsupportedVersion {
                schema: self.as_str().to_string(),
                version: version.to_string(),
                supported: self.supported_versions().to_vec(),
            })
    }

    /// Returns the CURIE of a root concept in this schema.
    #[must_use]
    pub fn root_curie(self, root: RootConcept) -> &'static str {
        match (self, root) {
            (Schema::Haystack, RootConcept::Entity) => "ph:entity",
            (Schema::Haystack, RootConcept::Marker) => "ph:marker",
            (Schema::Haystack, RootConcept::Equipment) => "phIoT:equip",
            (Schema::Haystack, RootConcept::Point) => "phIoT:point",
            (Schema::Brick, RootConcept::Entity) => "brick:Class",
            (Schema::Brick, RootConcept::Marker) => "brick:Tag",
            (Schema::Brick, RootConcept::Equipment) => "brick:Equipment",
            (Schema::Brick, RootConcept::Point) => "brick:Point",
        }
    }

    /// Returns the CURIE of the predicate linking an entity to its tags.
    #[must_use]
    pub fn has_tag_curie(self) -> &'static str {
        match self {
            Schema::Haystack => "ph:hasTag",
            Schema::Brick => "brick:hasTag",
        }
    }

    /// Returns the namespace bindings for one version of this schema.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::UnsupportedVersion`] for unknown versions.
    pub fn bindings(self, version: &str) -> Result<Vec<Namespace>> {
        let version = self.check_version(version)?;
        Ok(match self {
            Schema::Haystack => ["ph", "phIct", "phScience", "phIoT"]
                .iter()
                .map(|lib| {
                    Namespace::new(
                        *lib,
                        format!("https://project-haystack.org/def/{lib}/{version}#"),
                    )
                })
                .chain([
                    Namespace::new("phShapes", iris::PH_SHAPES),
                    Namespace::new("phCustom", iris::PH_CUSTOM),
                ])
                .collect(),
            Schema::Brick => vec![
                Namespace::new(
                    "brick",
                    format!("https://brickschema.org/schema/{version}/Brick#"),
                ),
                Namespace::new(
                    "tag",
                    format!("https://brickschema.org/schema/{version}/BrickTag#"),
                ),
                Namespace::new(
                    "bsh",
                    format!("https://brickschema.org/schema/{version}/BrickShape#"),
                ),
            ],
        })
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Schema {
    type Err = OntologyError;

    fn from_str(s: &str) -> Result<Self> {
        Schema::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or_else(|| OntologyError::UnsupportedSchema {
                schema: s.to_string(),
                supported: Schema::ALL.iter().map(|s| s.as_str()).collect(),
            })
    }
}

/// Checks that a schema name and version are supported.
///
/// # Errors
///
/// Returns [`OntologyError::UnsupportedSchema`] or
/// [`OntologyError::UnsupportedVersion`] naming the supported alternatives.
pub fn validate_schema_and_version(schema: &str, version: &str) -> Result<(Schema, &'static str)> {
    let schema: Schema = schema.parse()?;
    let version = schema.check_version(version)?;
    Ok((schema, version))
}

/// Standard vocabularies that never hold building-automation terms.
///
/// They are bound on every view so their terms resolve, but the classifier
/// never searches them for entity classes.
#[must_use]
pub fn reserved_namespaces() -> Vec<Namespace> {
    vec![
        Namespace::new("rdf", iris::RDF),
        Namespace::new("rdfs", iris::RDFS),
        Namespace::new("owl", iris::OWL),
        Namespace::new("xsd", iris::XSD),
        Namespace::new("xml", iris::XML),
        Namespace::new("skos", iris::SKOS),
        Namespace::new("sh", iris::SH),
    ]
}

/// Returns `true` if `iri` is one of the [`reserved_namespaces`].
#[must_use]
pub fn is_reserved(iri: &str) -> bool {
    [
        iris::RDF,
        iris::RDFS,
        iris::OWL,
        iris::XSD,
        iris::XML,
        iris::SKOS,
        iris::SH,
    ]
    .contains(&iri)
}
