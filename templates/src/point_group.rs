//! Point-group templates.
//!
//! A point group names a set of telemetry point types, each a tag string with
//! optional property metadata:
//!
//! ```yaml
//! - id: 6b1f3c1e-8a59-4a57-9a57-2f6b3cc1b7a4
//!   symbol: DAT
//!   template_type: point-group-template
//!   schema_name: Haystack
//!   version: 3.9.9
//!   telemetry_point_types:
//!     discharge-air-temp-sensor-point:
//!       curVal: {_kind: number}
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};
use tasty_ontology::Schema;
use tracing::debug;
use uuid::Uuid;

use crate::basics::TemplateBasics;
use crate::context::TemplateContext;
use crate::entity::EntityTemplate;
use crate::error::{Result, TemplateError};
use crate::registry::TemplateRegistry;
use crate::report::{CheckResult, ValidationReport};
use crate::schema::{TemplateSchema, TemplateType};
use crate::state::TemplateState;

/// A point-group template moving through its lifecycle.
#[derive(Debug, Clone)]
pub struct PointGroupTemplate {
    raw: Value,
    report: ValidationReport,
    state: TemplateState,
    basics: Option<TemplateBasics>,
    telemetry_point_types: Map<String, Value>,
    telemetry_points: Vec<Arc<EntityTemplate>>,
}

impl PointGroupTemplate {
    /// Validates a raw record; the result is [`TemplateState::Valid`] or
    /// [`TemplateState::Invalid`].
    #[must_use]
    pub fn new(raw: Value) -> Self {
        let mut report = TemplateSchema::default().validate(&raw);
        let declared = raw.get("template_type").and_then(Value::as_str);
        if declared.is_some_and(|t| t != TemplateType::PointGroup.as_str()) && report.all_passed() {
            report.push(CheckResult::fail(
                "template_type",
                format!("expected '{}'", TemplateType::PointGroup),
            ));
        }
        let state = if report.all_passed() {
            TemplateState::Valid
        } else {
            TemplateState::Invalid
        };
        Self {
            raw,
            report,
            state,
            basics: None,
            telemetry_point_types: Map::new(),
            telemetry_points: Vec::new(),
        }
    }

    /// Validates, populates and resolves a record, then registers it.
    ///
    /// # Errors
    ///
    /// Fails with [`TemplateError::Validation`] for an invalid record,
    /// [`TemplateError::DuplicateIdentity`] for a reused id, or any error from
    /// classifying a telemetry point type. A failed build leaves its id
    /// unclaimed.
    pub fn build(
        raw: Value,
        ctx: &TemplateContext,
        registry: &TemplateRegistry,
    ) -> Result<Arc<Self>> {
        let mut template = Self::new(raw);
        if !template.is_valid() {
            return Err(TemplateError::validation(template.report.to_string()));
        }
        template.populate_template_basics(registry)?;
        if let Err(e) = template.resolve_telemetry_point_types(ctx, registry) {
            registry.release_id(&template.id());
            return Err(e);
        }
        let template = Arc::new(template);
        registry.register_point_group(Arc::clone(&template));
        Ok(template)
    }

    /// Returns `true` unless structural validation failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state != TemplateState::Invalid
    }

    /// Structural validation results.
    #[must_use]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TemplateState {
        self.state
    }

    /// The record as supplied.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Reads identity fields and claims the id.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidState`] unless the template is
    /// [`TemplateState::Valid`], and [`TemplateError::DuplicateIdentity`] if
    /// the id is taken.
    pub fn populate_template_basics(&mut self, registry: &TemplateRegistry) -> Result<()> {
        self.expect_state("populate", TemplateState::Valid)?;
        let Value::Object(record) = &self.raw else {
            return Err(TemplateError::validation("record is not a mapping"));
        };
        let basics = TemplateBasics::from_record(record)?;
        let types = record
            .get("telemetry_point_types")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        registry.claim_id(basics.id)?;
        self.basics = Some(basics);
        self.telemetry_point_types = types;
        self.state = TemplateState::Populated;
        Ok(())
    }

    /// Classifies every telemetry point type and interns the results.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidState`] unless the template is
    /// [`TemplateState::Populated`], or the first classification error.
    pub fn resolve_telemetry_point_types(
        &mut self,
        ctx: &TemplateContext,
        registry: &TemplateRegistry,
    ) -> Result<()> {
        self.expect_state("resolve", TemplateState::Populated)?;
        let basics = self.basics()?;
        let view = ctx.catalog.get(basics.schema, &basics.version)?;
        let entities = self
            .telemetry_point_types
            .iter()
            .map(|(tags, properties)| {
                EntityTemplate::resolve(&view, tags, properties.as_object(), &ctx.config)
            })
            .collect::<Result<Vec<_>>>()?;
        let points: Vec<_> = entities.into_iter().map(|e| registry.intern(e)).collect();
        debug!(symbol = %basics.symbol, points = points.len(), "resolved point group");
        self.telemetry_points.extend(points);
        self.state = TemplateState::Resolved;
        Ok(())
    }

    /// Adds an already resolved entity.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidState`] before basics are populated and
    /// [`TemplateError::Validation`] if the entity's schema or version differ.
    pub fn add_telemetry_point(&mut self, entity: Arc<EntityTemplate>) -> Result<()> {
        if self.state < TemplateState::Populated {
            return Err(TemplateError::InvalidState {
                operation: "add a telemetry point to",
                state: self.state,
            });
        }
        let basics = self.basics()?;
        if entity.schema() != basics.schema || entity.version() != basics.version {
            return Err(TemplateError::validation(format!(
                "telemetry point is {} {}, template '{}' is {} {}",
                entity.schema(),
                entity.version(),
                basics.symbol,
                basics.schema,
                basics.version
            )));
        }
        if !self.telemetry_points.iter().any(|p| Arc::ptr_eq(p, &entity) || **p == *entity) {
            self.telemetry_points.push(entity);
        }
        Ok(())
    }

    /// Resolved telemetry points.
    #[must_use]
    pub fn telemetry_points(&self) -> &[Arc<EntityTemplate>] {
        &self.telemetry_points
    }

    /// Identity fields, once populated.
    #[must_use]
    pub fn template_basics(&self) -> Option<&TemplateBasics> {
        self.basics.as_ref()
    }

    /// Template id; nil before population.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.basics.as_ref().map_or(Uuid::nil(), |b| b.id)
    }

    /// Symbol; empty before population.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.basics.as_ref().map_or("", |b| b.symbol.as_str())
    }

    /// Schema; read from the record before population.
    #[must_use]
    pub fn schema(&self) -> Schema {
        match &self.basics {
            Some(b) => b.schema,
            None => self
                .raw
                .get("schema_name")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or(Schema::Haystack),
        }
    }

    /// Version; empty before population.
    #[must_use]
    pub fn version(&self) -> &str {
        self.basics.as_ref().map_or("", |b| b.version.as_str())
    }

    fn basics(&self) -> Result<&TemplateBasics> {
        self.basics.as_ref().ok_or(TemplateError::InvalidState {
            operation: "read basics of",
            state: self.state,
        })
    }

    fn expect_state(&self, operation: &'static str, expected: TemplateState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(TemplateError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
