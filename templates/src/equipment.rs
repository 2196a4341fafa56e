//! Equipment templates.
//!
//! An equipment template `extends` one ontology equipment class and lists the
//! telemetry it needs. A `null` requirement refers to a registered point group
//! by symbol; a mapping is classified in place as an entity.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tasty_ontology::{
    classify_tags, resolve_properties, NamespacedTerm, OntologyQuery, OntologyView,
    PropertyValue, RootConcept,
};
use tracing::{debug, warn};

use crate::basics::TemplateBasics;
use crate::context::TemplateContext;
use crate::entity::EntityTemplate;
use crate::error::{Result, TemplateError};
use crate::point_group::PointGroupTemplate;
use crate::registry::TemplateRegistry;
use crate::report::{CheckResult, ValidationReport};
use crate::schema::{TemplateSchema, TemplateType};
use crate::state::TemplateState;

/// How one telemetry requirement was satisfied.
#[derive(Debug, Clone)]
pub enum TelemetryResolution {
    /// No registered point group matched.
    Unresolved,
    /// A registered point group with the requirement's symbol.
    PointGroup(Arc<PointGroupTemplate>),
    /// An inline entity definition.
    Entity(Arc<EntityTemplate>),
}

impl TelemetryResolution {
    /// Returns `true` unless the requirement is unresolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, TelemetryResolution::Unresolved)
    }
}

/// An equipment template moving through its lifecycle.
#[derive(Debug, Clone)]
pub struct EquipmentTemplate {
    raw: Value,
    report: ValidationReport,
    state: TemplateState,
    basics: Option<TemplateBasics>,
    extends_tags: String,
    property_spec: Map<String, Value>,
    telemetry_spec: Map<String, Value>,
    extends: Option<NamespacedTerm>,
    properties: BTreeMap<NamespacedTerm, PropertyValue>,
    telemetry_points: BTreeMap<String, TelemetryResolution>,
}

impl EquipmentTemplate {
    /// Validates a raw record.
    #[must_use]
    pub fn new(raw: Value) -> Self {
        let mut report = TemplateSchema::default().validate(&raw);
        let declared = raw.get("template_type").and_then(Value::as_str);
        if declared.is_some_and(|t| t != TemplateType::Equipment.as_str()) && report.all_passed() {
            report.push(CheckResult::fail(
                "template_type",
                format!("expected '{}'", TemplateType::Equipment),
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
            extends_tags: String::new(),
            property_spec: Map::new(),
            telemetry_spec: Map::new(),
            extends: None,
            properties: BTreeMap::new(),
            telemetry_points: BTreeMap::new(),
        }
    }

    /// Validates, populates and resolves a record.
    ///
    /// Point groups referenced by symbol must already be registered.
    ///
    /// # Errors
    ///
    /// Fails with [`TemplateError::Validation`] for an invalid record or an
    /// `extends` that is not a single equipment class,
    /// [`TemplateError::MultipleResults`] for ambiguous lookups, or
    /// [`TemplateError::DuplicateIdentity`] for a reused id. A failed build
    /// leaves its id unclaimed.
    pub fn build(raw: Value, ctx: &TemplateContext, registry: &TemplateRegistry) -> Result<Self> {
        let mut template = Self::new(raw);
        if !template.is_valid() {
            return Err(TemplateError::validation(template.report.to_string()));
        }
        template.populate_template_basics(registry)?;
        if let Err(e) = template.resolve(ctx, registry) {
            if let Some(basics) = &template.basics {
                registry.release_id(&basics.id);
            }
            return Err(e);
        }
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

    /// Reads identity fields, `extends`, properties and telemetry
    /// requirements, and claims the id.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidState`] unless the template is
    /// [`TemplateState::Valid`], and [`TemplateError::DuplicateIdentity`] if
    /// the id is taken.
    pub fn populate_template_basics(&mut self, registry: &TemplateRegistry) -> Result<()> {
        if self.state != TemplateState::Valid {
            return Err(TemplateError::InvalidState {
                operation: "populate",
                state: self.state,
            });
        }
        let Value::Object(record) = &self.raw else {
            return Err(TemplateError::validation("record is not a mapping"));
        };
        let basics = TemplateBasics::from_record(record)?;
        let object = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default()
        };
        let extends_tags = record
            .get("extends")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let property_spec = object("properties");
        let telemetry_spec = object("telemetry_points");
        registry.claim_id(basics.id)?;
        self.basics = Some(basics);
        self.extends_tags = extends_tags;
        self.property_spec = property_spec;
        self.telemetry_spec = telemetry_spec;
        self.state = TemplateState::Populated;
        Ok(())
    }

    /// Resolves `extends`, equipment properties and telemetry requirements.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidState`] unless the template is
    /// [`TemplateState::Populated`], plus any error from the individual steps.
    pub fn resolve(&mut self, ctx: &TemplateContext, registry: &TemplateRegistry) -> Result<()> {
        if self.state != TemplateState::Populated {
            return Err(TemplateError::InvalidState {
                operation: "resolve",
                state: self.state,
            });
        }
        let (schema, version) = match &self.basics {
            Some(b) => (b.schema, b.version.clone()),
            None => {
                return Err(TemplateError::InvalidState {
                    operation: "resolve",
                    state: self.state,
                })
            }
        };
        let view = ctx.catalog.get(schema, &version)?;

        let extends = resolve_extends(&view, &self.extends_tags, ctx)?;
        let properties = resolve_properties(&*view, &self.property_spec)?;

        let mut inline = Vec::new();
        let mut telemetry_points = BTreeMap::new();
        for (key, spec) in &self.telemetry_spec {
            match spec.as_object() {
                Some(properties) => inline.push((
                    key.clone(),
                    EntityTemplate::resolve(&view, key, Some(properties), &ctx.config)?,
                )),
                None => {
                    telemetry_points.insert(
                        key.clone(),
                        lookup_point_group(registry, key, schema, &version)?,
                    );
                }
            }
        }
        // interned only once every requirement resolved
        for (key, entity) in inline {
            telemetry_points.insert(key, TelemetryResolution::Entity(registry.intern(entity)));
        }

        self.extends = Some(extends);
        self.properties = properties;
        self.telemetry_points = telemetry_points;
        self.state = TemplateState::Resolved;
        debug!(
            symbol = self.symbol(),
            resolved = self.telemetry_points.values().filter(|r| r.is_resolved()).count(),
            required = self.telemetry_points.len(),
            "resolved equipment template"
        );
        Ok(())
    }

    /// The equipment class, once resolved.
    #[must_use]
    pub fn extends(&self) -> Option<&NamespacedTerm> {
        self.extends.as_ref()
    }

    /// Equipment-level properties.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<NamespacedTerm, PropertyValue> {
        &self.properties
    }

    /// Resolution of every telemetry requirement, by key.
    #[must_use]
    pub fn telemetry_points(&self) -> &BTreeMap<String, TelemetryResolution> {
        &self.telemetry_points
    }

    /// Keys of requirements nothing satisfied.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.telemetry_points
            .iter()
            .filter(|(_, r)| !r.is_resolved())
            .map(|(k, _)| k.as_str())
    }

    /// Returns `true` once resolved with every requirement satisfied.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.state == TemplateState::Resolved && self.unresolved().next().is_none()
    }

    /// Identity fields, once populated.
    #[must_use]
    pub fn template_basics(&self) -> Option<&TemplateBasics> {
        self.basics.as_ref()
    }

    /// Symbol; empty before population.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.basics.as_ref().map_or("", |b| b.symbol.as_str())
    }
}

/// The single equipment class `tags` describes.
fn resolve_extends(
    view: &OntologyView,
    tags: &str,
    ctx: &TemplateContext,
) -> Result<NamespacedTerm> {
    let classification = classify_tags(view, tags, &ctx.config)?;
    let mut classes = classification.classes.into_iter();
    let class = match (classes.next(), classes.next()) {
        (None, _) => {
            return Err(TemplateError::validation(format!(
                "extends '{tags}' does not name an ontology class"
            )))
        }
        (Some(class), None) => class,
        (Some(first), Some(second)) => {
            let candidates = [first, second]
                .into_iter()
                .chain(classes)
                .map(|c| c.curie())
                .collect();
            return Err(TemplateError::MultipleResults {
                subject: format!("extends '{tags}'"),
                candidates,
            });
        }
    };
    let equip = view.root(RootConcept::Equipment)?;
    if !view.is_subclass_of(&class, &equip) {
        return Err(TemplateError::validation(format!(
            "{} is not a subclass of {}",
            class.curie(),
            equip.curie()
        )));
    }
    Ok(class)
}

fn lookup_point_group(
    registry: &TemplateRegistry,
    symbol: &str,
    schema: tasty_ontology::Schema,
    version: &str,
) -> Result<TelemetryResolution> {
    let mut found = registry.find_point_groups(symbol, schema, version);
    match found.len() {
        0 => {
            warn!(symbol, %schema, version, "no point group registered");
            Ok(TelemetryResolution::Unresolved)
        }
        1 => Ok(TelemetryResolution::PointGroup(found.remove(0))),
        _ => Err(TemplateError::MultipleResults {
            subject: format!("point group '{symbol}'"),
            candidates: found.iter().map(|pg| pg.id().to_string()).collect(),
        }),
    }
}
