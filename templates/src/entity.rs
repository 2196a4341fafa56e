//! Entity templates: a classification pinned to a schema and version.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};
use tasty_ontology::{
    classify_tags, resolve_properties, ClassifierConfig, Classification, OntologyView,
    PropertyValue, Schema,
};
use tracing::debug;

use crate::error::{Result, TemplateError};

/// A fully classified entity.
///
/// Two templates with the same schema, version and classification are the same
/// logical template; [`TemplateRegistry::intern`](crate::TemplateRegistry::intern)
/// hands out one shared instance per value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityTemplate {
    schema: Schema,
    version: String,
    #[serde(flatten)]
    classification: Classification,
}

impl EntityTemplate {
    /// Wraps an existing classification.
    #[must_use]
    pub fn new(schema: Schema, version: impl Into<String>, classification: Classification) -> Self {
        Self {
            schema,
            version: version.into(),
            classification,
        }
    }

    /// Classifies `tags` and merges explicit property metadata.
    ///
    /// Supplied metadata replaces the null default of a property found in the
    /// tag string; new keys are added.
    ///
    /// # Errors
    ///
    /// Fails if a tag or property key does not resolve, if classification
    /// fails, or with [`TemplateError::Validation`] if a supplied key names a
    /// class or marker of the same template.
    pub fn resolve(
        view: &OntologyView,
        tags: &str,
        properties: Option<&Map<String, Value>>,
        config: &ClassifierConfig,
    ) -> Result<Self> {
        let mut classification = classify_tags(view, tags, config)?;
        if let Some(properties) = properties {
            for (term, value) in resolve_properties(view, properties)? {
                let clashes = classification
                    .classes
                    .iter()
                    .chain(classification.markers.iter())
                    .any(|t| t.name() == term.name());
                if clashes {
                    return Err(TemplateError::validation(format!(
                        "property '{}' of '{tags}' is already a class or marker",
                        term.name()
                    )));
                }
                classification.properties.insert(term, value);
            }
        }
        debug!(tags, schema = %view.schema(), version = view.version(), "resolved entity template");
        Ok(Self::new(view.schema(), view.version(), classification))
    }

    /// Schema the template was classified against.
    #[must_use]
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Ontology version the template was classified against.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The underlying classification.
    #[must_use]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Local names of the entity classes.
    #[must_use]
    pub fn entity_type(&self) -> BTreeSet<String> {
        self.classification
            .classes
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Local names of the classes and markers.
    #[must_use]
    pub fn typing_info(&self) -> BTreeSet<String> {
        self.classification
            .classes
            .iter()
            .chain(self.classification.markers.iter())
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Properties keyed by local name.
    #[must_use]
    pub fn other_properties(&self) -> BTreeMap<String, PropertyValue> {
        self.classification
            .properties
            .iter()
            .map(|(t, v)| (t.name().to_string(), v.clone()))
            .collect()
    }

    /// Everything as one JSON object; classes and markers map to `null`.
    #[must_use]
    pub fn all_metadata_simple(&self) -> Map<String, Value> {
        let mut meta: Map<String, Value> = self
            .other_properties()
            .into_iter()
            .map(|(k, v)| (k, serde_json::to_value(v).unwrap_or(Value::Null)))
            .collect();
        for name in self.typing_info() {
            meta.insert(name, Value::Null);
        }
        meta
    }
}
