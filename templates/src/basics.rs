//! Identity fields shared by every template kind.

use serde_json::{Map, Value};
use tasty_ontology::{validate_schema_and_version, Schema};
use uuid::Uuid;

use crate::error::{Result, TemplateError};
use crate::schema::version_text;

/// The identity and catalogue fields of a validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBasics {
    /// Globally unique id.
    pub id: Uuid,
    /// Short lookup name.
    pub symbol: String,
    /// Free text.
    pub description: String,
    /// Ontology schema.
    pub schema: Schema,
    /// Ontology version.
    pub version: String,
}

impl TemplateBasics {
    /// Reads the basics from a record that passed structural validation.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Validation`] if a field is missing or
    /// malformed, or an ontology error for an unsupported schema or version.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self> {
        let text = |key: &str| -> Result<String> {
            record
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| TemplateError::validation(format!("'{key}' is a required property")))
        };
        let id = Uuid::parse_str(&text("id")?).map_err(|e| TemplateError::validation(e.to_string()))?;
        let version = record
            .get("version")
            .ok_or_else(|| TemplateError::validation("'version' is a required property"))
            .and_then(|v| version_text(v).map_err(TemplateError::validation))?;
        let (schema, version) = validate_schema_and_version(&text("schema_name")?, &version)?;
        Ok(Self {
            id,
            symbol: text("symbol")?,
            description: text("description")?,
            schema,
            version: version.to_string(),
        })
    }
}
