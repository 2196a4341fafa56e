//! Turtle ontology loading.
//!
//! Only the facts the engine queries are kept: every IRI that appears as a
//! subject, and every `rdfs:subClassOf` edge between IRIs. Namespaces are
//! named with the schema's bindings for the version; anything else gets a
//! generated prefix.

use sophia_api::source::TripleSource;
use sophia_api::term::Term;
use sophia_api::triple::Triple;
use tracing::debug;

use crate::error::{OntologyError, Result};
use crate::model::iris;
use crate::schema::Schema;
use crate::view::OntologyView;

/// Parses a Turtle document into an [`OntologyView`].
///
/// # Errors
///
/// Returns [`OntologyError::UnsupportedVersion`] for an unsupported version
/// and [`OntologyError::Parse`] if the document is not valid Turtle.
pub fn from_turtle(schema: Schema, version: &str, src: &str) -> Result<OntologyView> {
    let bindings = schema.bindings(version)?;
    let mut builder = OntologyView::builder(schema, version);
    for ns in bindings {
        builder.bind(ns);
    }

    let mut triples = 0usize;
    let mut edges = 0usize;
    sophia_turtle::parser::turtle::parse_str(src)
        .for_each_triple(|t| {
            triples += 1;
            let Some(subject) = t.s().iri().map(|iri| iri.as_str().to_string()) else {
                return;
            };
            let is_subclass = t
                .p()
                .iri()
                .is_some_and(|iri| iri.as_str() == iris::RDFS_SUBCLASS_OF);
            match t.o().iri() {
                Some(parent) if is_subclass => {
                    edges += 1;
                    builder.subclass(subject, parent.as_str());
                }
                _ => {
                    builder.subject(subject);
                }
            }
        })
        .map_err(|e| OntologyError::Parse(e.to_string()))?;

    debug!(%schema, version, triples, edges, "parsed turtle ontology");
    Ok(builder.build())
}

impl OntologyView {
    /// Parses a Turtle document; see [`from_turtle`].
    ///
    /// # Errors
    ///
    /// Returns an error if the version is unsupported or the document is invalid.
    pub fn from_turtle(schema: Schema, version: &str, src: &str) -> Result<Self> {
        from_turtle(schema, version, src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RootConcept;
    use crate::view::OntologyQuery;

    const DEFS: &str = r#"
@prefix ph: <https://project-haystack.org/def/ph/3.9.9#> .
@prefix phIoT: <https://project-haystack.org/def/phIoT/3.9.9#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .

ph:marker a owl:Class .
ph:entity a owl:Class ; rdfs:subClassOf ph:marker .
phIoT:point a owl:Class ; rdfs:subClassOf ph:entity .
phIoT:cur-point a owl:Class ; rdfs:subClassOf phIoT:point .
<https://example.org/ext#gadget> rdfs:subClassOf ph:entity .
"#;

    #[test]
    fn loads_subjects_and_edges() {
        let view = from_turtle(Schema::Haystack, "3.9.9", DEFS).unwrap();
        let entity = view.root(RootConcept::Entity).unwrap();
        let names: Vec<String> = view
            .subclass_closure(&entity)
            .iter()
            .map(|t| t.curie())
            .collect();
        assert!(names.contains(&"phIoT:cur-point".to_string()));
        assert!(names.contains(&"ns1:gadget".to_string()));
        assert!(!names.contains(&"ph:marker".to_string()));
    }

    #[test]
    fn rejects_malformed_turtle() {
        let err = from_turtle(Schema::Haystack, "3.9.9", "ph:entity a .").unwrap_err();
        assert!(matches!(err, OntologyError::Parse(_)));
    }

    #[test]
    fn rejects_unsupported_version() {
        assert!(matches!(
            from_turtle(Schema::Brick, "9.0", DEFS),
            Err(OntologyError::UnsupportedVersion { .. })
        ));
    }
}
