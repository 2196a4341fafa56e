//! Versioned Haystack and Brick ontologies, term resolution and tag-set
//! classification.
//!
//! The `tasty-ontology` crate ships subsets of the Haystack (3.9.9, 3.9.10)
//! and Brick (1.1) ontologies as typed Rust data, indexes them into
//! read-only [`OntologyView`]s, and classifies hyphen-joined tag strings into
//! the most specific entity classes they describe.
//!
//! # Entry Point
//!
//! ```
//! use tasty_ontology::{builtin, classify_tags, ClassifierConfig, Schema};
//!
//! let view = builtin(Schema::Haystack, "3.9.9").unwrap();
//! let c = classify_tags(&*view, "discharge-air-temp-sensor-cur-point", &ClassifierConfig::default())
//!     .unwrap();
//! assert_eq!(c.classes.iter().next().unwrap().curie(), "phIoT:cur-point");
//! ```
//!
//! # Loading
//!
//! Full defs files can be loaded with [`OntologyView::from_turtle`] and
//! registered in an [`OntologyCatalog`] in place of the built-ins.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod error;
pub mod loader;
pub mod model;
pub mod namespaces;
pub mod resolve;
pub mod schema;
pub mod term;
pub mod view;

pub use classify::{
    classify, classify_tags, most_specific, search_candidate_classes, CandidateSearch,
    Classification, ClassifierConfig,
};
pub use error::{OntologyError, Result};
pub use model::{Class, Namespace, NamespaceModule, Ontology, Property, PropertyKind};
pub use resolve::{resolve_properties, resolve_tags, resolve_term, Literal, PropertyValue};
pub use schema::{validate_schema_and_version, RootConcept, Schema, SUPPORTED_SCHEMAS};
pub use term::NamespacedTerm;
pub use view::{builtin, OntologyCatalog, OntologyQuery, OntologyView, OntologyViewBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_count() {
        let haystack = namespaces::ontology(Schema::Haystack, schema::V3_9_9).unwrap();
        assert_eq!(haystack.namespaces.len(), 4);
        assert!(haystack.class_count() > 80);
        assert!(haystack.property_count() > 10);
        let brick = namespaces::ontology(Schema::Brick, schema::V1_1).unwrap();
        assert_eq!(brick.namespaces.len(), 2);
    }

    #[test]
    fn versions_share_structure() {
        let a = builtin(Schema::Haystack, schema::V3_9_9).unwrap();
        let b = builtin(Schema::Haystack, schema::V3_9_10).unwrap();
        assert_eq!(a.subject_count(), b.subject_count());
        assert_ne!(
            a.namespace_for_prefix("phIoT").map(|ns| ns.iri.clone()),
            b.namespace_for_prefix("phIoT").map(|ns| ns.iri.clone())
        );
    }

    #[test]
    fn views_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OntologyView>();
    }
}
