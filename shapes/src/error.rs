//! Shape compilation errors.

use tasty_ontology::OntologyError;
use thiserror::Error;

/// Result type for shape operations.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Errors raised while loading or compiling shape specifications.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Mixin shapes whose dependencies never compiled.
    #[error("Unable to resolve shape mixins for: {}", .stuck.join(", "))]
    UnresolvedMixin {
        /// Names of every shape left in the worklist.
        stuck: Vec<String>,
    },

    /// A shape references a shape name that no loaded file defines.
    #[error("Shape '{shape}' references unknown shape '{reference}'")]
    UnknownShapeReference {
        /// The referencing shape.
        shape: String,
        /// The missing shape name.
        reference: String,
    },

    /// A shape name occurs twice in one namespace.
    #[error("Shape '{name}' is defined more than once in <{namespace}>")]
    DuplicateShape {
        /// The repeated shape name.
        name: String,
        /// The namespace IRI.
        namespace: String,
    },

    /// A tag, type or path did not resolve against the ontology.
    #[error(transparent)]
    Term(#[from] OntologyError),

    /// A shape file could not be decoded.
    #[error("Failed to decode shape file: {0}")]
    Decode(String),
}
