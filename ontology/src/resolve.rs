//! Plain term → namespaced term resolution.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{OntologyError, Result};
use crate::term::NamespacedTerm;
use crate::view::OntologyQuery;

/// Key of the kind discriminator inside a property-map value.
pub const KIND_KEY: &str = "_kind";
/// Key of the literal inside a property-map value.
pub const VAL_KEY: &str = "val";

/// Resolves a plain term to the unique namespace that defines it.
///
/// # Errors
///
/// Returns [`OntologyError::TermNotFound`] if no namespace defines the term
/// and [`OntologyError::AmbiguousTerm`] if more than one does.
pub fn resolve_term<Q: OntologyQuery + ?Sized>(view: &Q, term: &str) -> Result<NamespacedTerm> {
    let mut found = view.namespaces_containing(term);
    match found.len() {
        0 => Err(OntologyError::TermNotFound {
            term: term.to_string(),
        }),
        1 => Ok(NamespacedTerm::new(found.remove(0), term)),
        _ => Err(OntologyError::AmbiguousTerm {
            term: term.to_string(),
            candidates: found.into_iter().map(|ns| ns.iri).collect(),
        }),
    }
}

/// Splits a tag string on `-` into distinct, non-empty tokens.
#[must_use]
pub fn split_tags(tags: &str) -> BTreeSet<&str> {
    tags.split('-').filter(|t| !t.is_empty()).collect()
}

/// Resolves every token of a hyphen-joined tag string.
///
/// # Errors
///
/// Fails on the first token that is unknown or ambiguous.
pub fn resolve_tags<Q: OntologyQuery + ?Sized>(
    view: &Q,
    tags: &str,
) -> Result<BTreeSet<NamespacedTerm>> {
    split_tags(tags)
        .into_iter()
        .map(|tag| resolve_term(view, tag))
        .collect()
}

/// A literal value carried by a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Literal {
    /// No value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, kept in its JSON lexical form.
    Number(String),
    /// String.
    Str(String),
    /// Arrays and objects, kept as compact JSON.
    Json(String),
}

impl From<&Value> for Literal {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(*b),
            Value::Number(n) => Literal::Number(n.to_string()),
            Value::String(s) => Literal::Str(s.clone()),
            other => Literal::Json(other.to_string()),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => n
                .parse::<serde_json::Number>()
                .map_or_else(|_| Value::String(n.clone()), Value::Number),
            Literal::Str(s) => Value::String(s.clone()),
            Literal::Json(j) => serde_json::from_str(j).unwrap_or_else(|_| Value::String(j.clone())),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}

/// Metadata attached to a property: an optional kind and a literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PropertyValue {
    /// The resolved `_kind` discriminator, if one was supplied.
    #[serde(rename = "_kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NamespacedTerm>,
    /// The literal value.
    pub val: Literal,
}

impl PropertyValue {
    /// The null-value record used for properties discovered in tag strings.
    #[must_use]
    pub fn null() -> Self {
        Self {
            kind: None,
            val: Literal::Null,
        }
    }

    /// Returns `true` for the null-value record.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind.is_none() && self.val == Literal::Null
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::null()
    }
}

/// Resolves a property map such as
/// `{"curVal": {"_kind": "number", "val": null}, "unit": "cfm"}`.
///
/// Object values may carry a `_kind` discriminator, resolved as a term, and a
/// `val` literal. Any other value becomes the literal itself.
///
/// # Errors
///
/// Fails if a key or `_kind` is unknown or ambiguous.
pub fn resolve_properties<Q: OntologyQuery + ?Sized>(
    view: &Q,
    properties: &Map<String, Value>,
) -> Result<BTreeMap<NamespacedTerm, PropertyValue>> {
    properties
        .iter()
        .map(|(key, value)| {
            let term = resolve_term(view, key)?;
            let value = match value {
                Value::Object(fields) => {
                    let kind = match fields.get(KIND_KEY) {
                        Some(Value::String(kind)) => Some(resolve_term(view, kind)?),
                        _ => None,
                    };
                    let val = fields.get(VAL_KEY).map_or(Literal::Null, Literal::from);
                    PropertyValue { kind, val }
                }
                scalar => PropertyValue {
                    kind: None,
                    val: Literal::from(scalar),
                },
            };
            Ok((term, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, V1_1, V3_9_9};
    use crate::view::builtin;
    use serde_json::json;

    #[test]
    fn resolves_unique_term() {
        let view = builtin(Schema::Haystack, V3_9_9).unwrap();
        let term = resolve_term(&*view, "cur-point").unwrap();
        assert_eq!(term.curie(), "phIoT:cur-point");
        assert_eq!(
            term.iri(),
            "https://project-haystack.org/def/phIoT/3.9.9#cur-point"
        );
    }

    #[test]
    fn unknown_term_message() {
        let view = builtin(Schema::Haystack, V3_9_9).unwrap();
        let err = resolve_term(&*view, "bogus").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Candidate 'bogus' not found in any namespaces in the provided ontology"
        );
    }

    #[test]
    fn ambiguous_term_names_every_namespace() {
        let view = builtin(Schema::Brick, V1_1).unwrap();
        match resolve_term(&*view, "Sensor").unwrap_err() {
            OntologyError::AmbiguousTerm { term, candidates } => {
                assert_eq!(term, "Sensor");
                assert_eq!(
                    candidates,
                    vec![
                        "https://brickschema.org/schema/1.1/Brick#".to_string(),
                        "https://brickschema.org/schema/1.1/BrickTag#".to_string(),
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn split_dedupes_and_drops_empty_tokens() {
        let tokens: Vec<&str> = split_tags("air--temp-air-").into_iter().collect();
        assert_eq!(tokens, vec!["air", "temp"]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn property_map_normalization() {
        let view = builtin(Schema::Haystack, V3_9_9).unwrap();
        let map = json!({
            "curVal": {"_kind": "number", "val": null},
            "unit": "cfm",
            "writeLevel": null,
        });
        let Value::Object(map) = map else { unreachable!() };
        let resolved = resolve_properties(&*view, &map).unwrap();

        let by_name: BTreeMap<&str, &PropertyValue> =
            resolved.iter().map(|(k, v)| (k.name(), v)).collect();
        assert_eq!(
            by_name["curVal"].kind.as_ref().map(NamespacedTerm::curie),
            Some("ph:number".to_string())
        );
        assert_eq!(by_name["curVal"].val, Literal::Null);
        assert_eq!(by_name["unit"].val, Literal::Str("cfm".into()));
        assert!(by_name["writeLevel"].is_null());
    }

    #[test]
    fn property_value_serializes_like_the_input_form() {
        let view = builtin(Schema::Haystack, V3_9_9).unwrap();
        let value = PropertyValue {
            kind: Some(resolve_term(&*view, "number").unwrap()),
            val: Literal::Number("72.5".into()),
        };
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"_kind": "ph:number", "val": 72.5})
        );
        assert_eq!(
            serde_json::to_value(PropertyValue::null()).unwrap(),
            json!({"val": null})
        );
    }
}
