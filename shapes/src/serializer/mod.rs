//! Serializers for compiled constraint graphs.
//!
//! - **Turtle** ([`turtle`]): prefixed, grouped by subject, for humans and RDF tooling
//! - **N-Triples** ([`ntriples`]): one statement per line, for bulk loading and diffs

pub mod ntriples;
pub mod turtle;

pub use ntriples::to_ntriples;
pub use turtle::to_turtle;
