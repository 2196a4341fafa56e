//! Template file decoding.
//!
//! A file holds either a list of records or a single record.

use serde_json::Value;

use crate::error::{Result, TemplateError};
use crate::schema::TemplateType;

/// Decodes YAML template records.
///
/// # Errors
///
/// Returns [`TemplateError::Decode`] for malformed YAML or a top level that is
/// neither a list nor a mapping.
pub fn load_templates_yaml(src: &str) -> Result<Vec<Value>> {
    let value: Value = serde_yaml::from_str(src).map_err(|e| TemplateError::Decode(e.to_string()))?;
    into_records(value)
}

/// Decodes JSON template records.
///
/// # Errors
///
/// Returns [`TemplateError::Decode`] for malformed JSON or a top level that is
/// neither an array nor an object.
pub fn load_templates_json(src: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(src).map_err(|e| TemplateError::Decode(e.to_string()))?;
    into_records(value)
}

fn into_records(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(records) => Ok(records),
        record @ Value::Object(_) => Ok(vec![record]),
        Value::Null => Ok(Vec::new()),
        other => Err(TemplateError::Decode(format!(
            "expected a list of templates, found {other}"
        ))),
    }
}

/// The declared `template_type` of a record, if it is a known one.
#[must_use]
pub fn template_type(record: &Value) -> Option<TemplateType> {
    record.get("template_type")?.as_str()?.parse().ok()
}
