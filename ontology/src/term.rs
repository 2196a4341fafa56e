//! Namespaced terms.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::Namespace;

/// A term bound to the unique namespace that defines it.
///
/// Values are only produced by an [`OntologyView`](crate::OntologyView)
/// (directly or through [`resolve_term`](crate::resolve_term)), so holding one
/// means the term was checked against an ontology. Ordering and equality are
/// structural: namespace first, then local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedTerm {
    namespace: Namespace,
    name: String,
}

impl NamespacedTerm {
    pub(crate) fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// The namespace defining this term.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The local name (e.g., `"cur-point"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full IRI.
    #[must_use]
    pub fn iri(&self) -> String {
        self.namespace.iri_of(&self.name)
    }

    /// The compact form, `prefix:name`.
    #[must_use]
    pub fn curie(&self) -> String {
        format!("{}:{}", self.namespace.prefix, self.name)
    }
}

impl fmt::Display for NamespacedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix, self.name)
    }
}

impl Serialize for NamespacedTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
