//! Built-in ontology namespace modules.
//!
//! Each sub-module encodes the subset of one namespace that the engine ships
//! with as compact Rust tables. Tables are version-independent: parent
//! references are CURIEs expanded against the bindings of the requested
//! version, so the same data backs Haystack 3.9.9 and 3.9.10.

pub mod brick;
pub mod ph;
pub mod phict;
pub mod phiot;
pub mod phscience;

use crate::error::{OntologyError, Result};
use crate::model::{Namespace, Ontology};
use crate::schema::Schema;

/// Assembles the built-in ontology for a supported (schema, version) pair.
///
/// # Errors
///
/// Returns an error if the version is unsupported for the schema.
pub fn ontology(schema: Schema, version: &str) -> Result<Ontology> {
    let bindings = schema.bindings(version)?;
    let namespaces = match schema {
        Schema::Haystack => vec![
            ph::module(&bindings)?,
            phscience::module(&bindings)?,
            phiot::module(&bindings)?,
            phict::module(&bindings)?,
        ],
        Schema::Brick => vec![brick::module(&bindings)?, brick::tag_module(&bindings)?],
    };
    Ok(Ontology {
        schema,
        version: version.to_string(),
        bindings,
        namespaces,
    })
}

/// Returns the binding for `prefix`.
fn binding(bindings: &[Namespace], prefix: &str) -> Result<Namespace> {
    bindings
        .iter()
        .find(|ns| ns.prefix == prefix)
        .cloned()
        .ok_or_else(|| OntologyError::UnknownPrefix {
            prefix: prefix.to_string(),
            curie: format!("{prefix}:"),
        })
}
