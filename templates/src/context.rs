//! Resolution context.

use tasty_ontology::{ClassifierConfig, OntologyCatalog};

/// Where templates find their ontologies and how they classify.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Ontology views by (schema, version).
    pub catalog: OntologyCatalog,
    /// Classifier limits.
    pub config: ClassifierConfig,
}

impl TemplateContext {
    /// A context over `catalog` with the given classifier limits.
    #[must_use]
    pub fn new(catalog: OntologyCatalog, config: ClassifierConfig) -> Self {
        Self { catalog, config }
    }
}
