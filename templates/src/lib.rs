//! Validated entity, point-group and equipment templates.
//!
//! Template records (YAML or JSON) pass two phases. Structural validation
//! against [`TemplateSchema`] never touches an ontology. Only valid records
//! are populated and resolved against the ontology catalogue in a
//! [`TemplateContext`]. Resolved entities are interned in a shared
//! [`TemplateRegistry`], which also tracks ids and registered point groups.
//!
//! ```
//! use tasty_templates::{load_templates_yaml, PointGroupTemplate, TemplateContext, TemplateRegistry};
//!
//! let records = load_templates_yaml(r#"
//! - id: 6b1f3c1e-8a59-4a57-9a57-2f6b3cc1b7a4
//!   symbol: DAT
//!   description: Discharge air temperature
//!   template_type: point-group-template
//!   schema_name: Haystack
//!   version: 3.9.9
//!   telemetry_point_types:
//!     discharge-air-temp-sensor-point: null
//! "#).unwrap();
//!
//! let registry = TemplateRegistry::new();
//! let pg = PointGroupTemplate::build(records[0].clone(), &TemplateContext::default(), &registry).unwrap();
//! let classes = pg.telemetry_points()[0].entity_type();
//! assert!(classes.contains("point"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod basics;
pub mod context;
pub mod entity;
pub mod equipment;
pub mod error;
pub mod loader;
pub mod point_group;
pub mod registry;
pub mod report;
pub mod schema;
pub mod state;

pub use basics::TemplateBasics;
pub use context::TemplateContext;
pub use entity::EntityTemplate;
pub use equipment::{EquipmentTemplate, TelemetryResolution};
pub use error::{Result, TemplateError};
pub use loader::{load_templates_json, load_templates_yaml, template_type};
pub use point_group::PointGroupTemplate;
pub use registry::TemplateRegistry;
pub use report::{CheckResult, Severity, ValidationReport};
pub use schema::{FieldSpec, Rule, TemplateSchema, TemplateType};
pub use state::TemplateState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateRegistry>();
        assert_send_sync::<PointGroupTemplate>();
        assert_send_sync::<EntityTemplate>();
    }
}
