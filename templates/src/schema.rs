//! Structural template schema.
//!
//! Every record must carry `id`, `symbol`, `description`, `template_type`,
//! `schema_name` and `version`. The `template_type` selects further fields:
//!
//! | template_type | required | optional |
//! |---------------|----------|----------|
//! | `point-group-template` | `telemetry_point_types` | |
//! | `equipment-template` | `extends`, `telemetry_points` | `properties` |
//! | `system-template` | | |
//!
//! Validation never touches an ontology; it only checks shape and value domains.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tasty_ontology::Schema;
use uuid::Uuid;

use crate::error::TemplateError;
use crate::report::{CheckResult, ValidationReport};

/// The kind of template a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateType {
    /// A named group of telemetry points.
    PointGroup,
    /// A piece of equipment and the telemetry it requires.
    Equipment,
    /// A system of equipment.
    System,
}

impl TemplateType {
    /// Every template type, in schema order.
    pub const ALL: [TemplateType; 3] = [
        TemplateType::PointGroup,
        TemplateType::Equipment,
        TemplateType::System,
    ];

    /// The `template_type` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::PointGroup => "point-group-template",
            TemplateType::Equipment => "equipment-template",
            TemplateType::System => "system-template",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TemplateError::validation(not_one_of(s, &TEMPLATE_TYPES)))
    }
}

const TEMPLATE_TYPES: [&str; 3] = [
    "point-group-template",
    "equipment-template",
    "system-template",
];
const SCHEMA_NAMES: [&str; 2] = ["Brick", "Haystack"];

/// How a field's value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Any string.
    Text,
    /// A string holding a version-4 UUID.
    UuidV4,
    /// One of a fixed set of strings.
    OneOf(&'static [&'static str]),
    /// A version supported by the record's `schema_name`.
    SupportedVersion,
    /// A mapping from tag strings to `null` or a property map.
    TelemetryMap,
    /// A property map.
    PropertyMap,
}

/// One field of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the record.
    pub name: &'static str,
    /// Whether the key must be present.
    pub required: bool,
    /// Value check.
    pub rule: Rule,
}

impl FieldSpec {
    const fn required(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            required: true,
            rule,
        }
    }

    const fn optional(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            required: false,
            rule,
        }
    }
}

const COMMON: &[FieldSpec] = &[
    FieldSpec::required("id", Rule::UuidV4),
    FieldSpec::required("symbol", Rule::Text),
    FieldSpec::required("description", Rule::Text),
    FieldSpec::required("template_type", Rule::OneOf(&TEMPLATE_TYPES)),
    FieldSpec::required("schema_name", Rule::OneOf(&SCHEMA_NAMES)),
    FieldSpec::required("version", Rule::SupportedVersion),
];

const POINT_GROUP: &[FieldSpec] = &[FieldSpec::required(
    "telemetry_point_types",
    Rule::TelemetryMap,
)];

const EQUIPMENT: &[FieldSpec] = &[
    FieldSpec::required("extends", Rule::Text),
    FieldSpec::required("telemetry_points", Rule::TelemetryMap),
    FieldSpec::optional("properties", Rule::PropertyMap),
];

/// The declarative schema every template record is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSchema {
    common: &'static [FieldSpec],
    point_group: &'static [FieldSpec],
    equipment: &'static [FieldSpec],
}

impl Default for TemplateSchema {
    fn default() -> Self {
        Self {
            common: COMMON,
            point_group: POINT_GROUP,
            equipment: EQUIPMENT,
        }
    }
}

impl TemplateSchema {
    /// Fields checked for a template type, common fields first.
    pub fn fields(&self, template_type: Option<TemplateType>) -> impl Iterator<Item = &FieldSpec> {
        let specific: &[FieldSpec] = match template_type {
            Some(TemplateType::PointGroup) => self.point_group,
            Some(TemplateType::Equipment) => self.equipment,
            Some(TemplateType::System) | None => &[],
        };
        self.common.iter().chain(specific.iter())
    }

    /// Validates a record, reporting every problem found.
    #[must_use]
    pub fn validate(&self, record: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();
        let Value::Object(fields) = record else {
            report.push(CheckResult::fail("$", format!("{record} is not of type 'object'")));
            return report;
        };
        let template_type = fields
            .get("template_type")
            .and_then(Value::as_str)
            .and_then(|t| t.parse().ok());

        for spec in self.fields(template_type) {
            match fields.get(spec.name) {
                None if spec.required => report.push(CheckResult::fail(
                    spec.name,
                    format!("'{}' is a required property", spec.name),
                )),
                None => {}
                Some(value) => report.push(check(spec, value, fields)),
            }
        }
        if template_type.is_some() {
            for key in fields.keys() {
                if !self.fields(template_type).any(|spec| spec.name == key) {
                    report.push(CheckResult::warn(
                        key.as_str(),
                        format!("'{key}' is not a recognised property"),
                    ));
                }
            }
        }
        report
    }
}

fn check(spec: &FieldSpec, value: &Value, record: &Map<String, Value>) -> CheckResult {
    let outcome = match spec.rule {
        Rule::Text => expect_str(value).map(|_| ()),
        Rule::UuidV4 => expect_str(value).and_then(|s| {
            Uuid::parse_str(s)
                .ok()
                .filter(|id| id.get_version_num() == 4)
                .map(|_| ())
                .ok_or_else(|| format!("'{s}' is not a valid UUID v4"))
        }),
        Rule::OneOf(allowed) => expect_str(value).and_then(|s| {
            if allowed.contains(&s) {
                Ok(())
            } else {
                Err(not_one_of(s, allowed))
            }
        }),
        Rule::SupportedVersion => version_text(value).and_then(|v| {
            let supported: Vec<&str> = match record
                .get("schema_name")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Schema>().ok())
            {
                Some(schema) => schema.supported_versions().to_vec(),
                None => Schema::ALL
                    .iter()
                    .flat_map(|s| s.supported_versions().iter().copied())
                    .collect(),
            };
            if supported.contains(&v.as_str()) {
                Ok(())
            } else {
                Err(not_one_of(&v, &supported))
            }
        }),
        Rule::TelemetryMap => match value {
            Value::Object(entries) => {
                let bad: Vec<&String> = entries
                    .iter()
                    .filter(|(k, v)| k.is_empty() || !(v.is_null() || v.is_object()))
                    .map(|(k, _)| k)
                    .collect();
                match bad.first() {
                    Some(first) => {
                        return CheckResult::fail_with_details(
                            spec.name,
                            format!("'{first}' must map to null or a property map"),
                            bad.iter().map(|k| format!("'{k}': {}", entries[k.as_str()])).collect(),
                        )
                    }
                    None => Ok(()),
                }
            }
            other => Err(format!("{other} is not of type 'object'")),
        },
        Rule::PropertyMap => match value {
            Value::Object(_) => Ok(()),
            other => Err(format!("{other} is not of type 'object'")),
        },
    };
    match outcome {
        Ok(()) => CheckResult::pass(spec.name, "ok"),
        Err(message) => CheckResult::fail(spec.name, message),
    }
}

fn expect_str(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("{value} is not of type 'string'"))
}

/// Versions may be written unquoted in YAML (`1.1`), so numbers are accepted.
pub(crate) fn version_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("{other} is not of type 'string'")),
    }
}

fn not_one_of(value: &str, allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|a| format!("'{a}'")).collect();
    format!("'{value}' is not one of [{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use serde_json::json;

    fn point_group() -> Value {
        json!({
            "id": "6b1f3c1e-8a59-4a57-9a57-2f6b3cc1b7a4",
            "symbol": "DAT",
            "description": "Discharge air temperature",
            "template_type": "point-group-template",
            "schema_name": "Haystack",
            "version": "3.9.9",
            "telemetry_point_types": {
                "discharge-air-temp-sensor-point": {"curVal": {"_kind": "number", "val": null}}
            }
        })
    }

    fn with(mut record: Value, key: &str, value: Value) -> Value {
        record[key] = value;
        record
    }

    fn without(mut record: Value, key: &str) -> Value {
        if let Value::Object(map) = &mut record {
            map.remove(key);
        }
        record
    }

    #[test]
    fn exemplary_record_is_valid() {
        let report = TemplateSchema::default().validate(&point_group());
        assert!(report.all_passed(), "{report}");
    }

    #[test]
    fn missing_keys_are_reported() {
        for key in ["id", "symbol", "description", "telemetry_point_types"] {
            let report = TemplateSchema::default().validate(&without(point_group(), key));
            assert_eq!(
                report.first_failure(),
                Some(format!("'{key}' is a required property").as_str())
            );
        }
    }

    #[test]
    fn enumerated_values_are_checked() {
        let schema = TemplateSchema::default();
        let report = schema.validate(&with(point_group(), "schema_name", json!("BAD")));
        assert_eq!(
            report.first_failure(),
            Some("'BAD' is not one of ['Brick', 'Haystack']")
        );
        let report = schema.validate(&with(point_group(), "version", json!("1234")));
        assert_eq!(
            report.first_failure(),
            Some("'1234' is not one of ['3.9.9', '3.9.10']")
        );
        let report = schema.validate(&with(point_group(), "template_type", json!("widget")));
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn every_problem_is_reported() {
        let record = with(
            with(without(point_group(), "symbol"), "id", json!("not-a-uuid")),
            "version",
            json!(true),
        );
        let report = TemplateSchema::default().validate(&record);
        assert_eq!(report.failure_count(), 3);
        assert!(report
            .failures()
            .any(|r| r.message == "'not-a-uuid' is not a valid UUID v4"));
    }

    #[test]
    fn uuid_must_be_version_four() {
        let v1 = "c232ab00-9414-11ec-b3c8-9e6bdeced846";
        let report = TemplateSchema::default().validate(&with(point_group(), "id", json!(v1)));
        assert_eq!(report.failures().next().map(|r| r.field.as_str()), Some("id"));
    }

    #[test]
    fn numeric_versions_are_accepted() {
        let record = with(
            with(point_group(), "schema_name", json!("Brick")),
            "version",
            json!(1.1),
        );
        assert!(TemplateSchema::default().validate(&record).all_passed());
    }

    #[test]
    fn equipment_fields_depend_on_type() {
        let record = with(point_group(), "template_type", json!("equipment-template"));
        let report = TemplateSchema::default().validate(&record);
        let missing: Vec<&str> = report.failures().map(|r| r.field.as_str()).collect();
        assert_eq!(missing, vec!["extends", "telemetry_points"]);

        let record = with(
            with(
                with(record, "extends", json!("ahu")),
                "telemetry_points",
                json!({"DAT": null}),
            ),
            "properties",
            json!("x"),
        );
        let report = TemplateSchema::default().validate(&record);
        assert_eq!(report.first_failure(), Some("\"x\" is not of type 'object'"));
    }

    #[test]
    fn telemetry_entries_must_be_null_or_maps() {
        let record = with(point_group(), "telemetry_point_types", json!({"cur-point": 3}));
        let report = TemplateSchema::default().validate(&record);
        assert_eq!(
            report.first_failure(),
            Some("'cur-point' must map to null or a property map")
        );
        assert_eq!(report.failures().next().map(|r| r.details.len()), Some(1));
    }

    #[test]
    fn unknown_keys_only_warn() {
        let record = with(point_group(), "owner", json!("ops"));
        let report = TemplateSchema::default().validate(&record);
        assert!(report.all_passed());
        let warning = report
            .results
            .iter()
            .find(|r| r.severity == Severity::Warning)
            .map(|r| r.field.as_str());
        assert_eq!(warning, Some("owner"));
    }
}
