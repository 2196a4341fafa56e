//! Ontology, resolution and classification errors.

use thiserror::Error;

/// Result type for ontology operations.
pub type Result<T> = std::result::Result<T, OntologyError>;

/// Errors raised while loading, querying or classifying against an ontology.
///
/// Every variant reflects an authoring or data defect; none is transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OntologyError {
    /// The term is not a subject in any namespace of the ontology.
    #[error("Candidate '{term}' not found in any namespaces in the provided ontology")]
    TermNotFound {
        /// The plain term that was looked up.
        term: String,
    },

    /// The term is a subject in more than one namespace.
    #[error("Candidate '{term}' found in multiple namespaces: {candidates:?}")]
    AmbiguousTerm {
        /// The plain term that was looked up.
        term: String,
        /// IRIs of every namespace defining the term.
        candidates: Vec<String>,
    },

    /// The tag set exceeds the permutation search ceiling.
    #[error("Tag set has {count} tokens, exceeding the classifier limit of {limit}")]
    TooManyTokens {
        /// Number of distinct tokens supplied.
        count: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// The schema name is not in the supported catalogue.
    #[error("Schema: {schema} not supported.  Supported schemas include: {supported:?}")]
    UnsupportedSchema {
        /// The requested schema name.
        schema: String,
        /// Names of every supported schema.
        supported: Vec<&'static str>,
    },

    /// The version is not supported for a known schema.
    #[error(
        "Schema: {schema} with version: {version} not supported.  Supported versions include: {supported:?}"
    )]
    UnsupportedVersion {
        /// The schema name.
        schema: String,
        /// The requested version.
        version: String,
        /// Supported versions for the schema.
        supported: Vec<&'static str>,
    },

    /// A root concept required by the operation is absent from the ontology.
    #[error("Root concept {iri} is not defined in the {schema} {version} ontology")]
    MissingRoot {
        /// Full IRI of the expected root.
        iri: String,
        /// Schema name.
        schema: String,
        /// Schema version.
        version: String,
    },

    /// A compact IRI uses a prefix with no binding for the schema version.
    #[error("No namespace bound to prefix '{prefix}' (in '{curie}')")]
    UnknownPrefix {
        /// The unbound prefix.
        prefix: String,
        /// The compact IRI being expanded.
        curie: String,
    },

    /// The ontology source could not be parsed.
    #[error("Failed to parse ontology source: {0}")]
    Parse(String),
}
