//! Shape compilation for building-automation ontologies.
//!
//! Reads declarative JSON shape files ([`ShapeFile`]) and compiles them into
//! a SHACL [`ConstraintGraph`] against an
//! [`OntologyView`](tasty_ontology::OntologyView). Tags become qualified
//! `hasTag` constraints, types become `sh:class` constraints, predicates
//! become qualified property constraints over direct or inverse paths, and
//! mixins become `sh:node` edges once the shapes they name are compiled.
//!
//! ```
//! use tasty_ontology::{builtin, Schema};
//! use tasty_shapes::{ShapeFile, ShapeLibrary};
//!
//! let file = ShapeFile::from_json(r#"{
//!     "namespace": "https://example.org/shapes#",
//!     "prefix": "ex",
//!     "shapes": [{"name": "fan-shape", "types": ["fan-motor"], "tags": ["fan", "motor"]}]
//! }"#).unwrap();
//! let mut library = ShapeLibrary::new();
//! library.add_file(file).unwrap();
//! let view = builtin(Schema::Haystack, "3.9.9").unwrap();
//! let graph = library.compile_all(&view).unwrap();
//! assert!(tasty_shapes::to_turtle(&graph).contains("ex:fan-shape"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod compiler;
pub mod error;
pub mod graph;
pub mod library;
pub mod serializer;
pub mod source;
pub mod vocab;

pub use compiler::ShapeCompiler;
pub use error::{Result, ShapeError};
pub use graph::{ConstraintGraph, Node, Statement};
pub use library::ShapeLibrary;
pub use serializer::{to_ntriples, to_turtle};
pub use source::{PathType, PredicateSpec, Predicates, ShapeFile, ShapeSpec};
