//! Loading and resolving template files end to end.

use std::sync::Arc;

use tasty_ontology::Schema;
use tasty_templates::{
    load_templates_yaml, template_type, EquipmentTemplate, PointGroupTemplate,
    TelemetryResolution, TemplateContext, TemplateError, TemplateRegistry, TemplateType,
};

const POINT_GROUPS: &str = include_str!("fixtures/point_groups.yaml");
const EQUIPMENT: &str = include_str!("fixtures/equipment.yaml");

fn register_point_groups(ctx: &TemplateContext, registry: &TemplateRegistry) -> Vec<Arc<PointGroupTemplate>> {
    load_templates_yaml(POINT_GROUPS)
        .unwrap()
        .into_iter()
        .map(|raw| PointGroupTemplate::build(raw, ctx, registry).unwrap())
        .collect()
}

#[test]
fn point_groups_resolve_and_register() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    let groups = register_point_groups(&ctx, &registry);
    assert_eq!(groups.len(), 2);
    assert_eq!(registry.point_group_count(), 2);

    let dat = &registry.find_point_groups("DAT", Schema::Haystack, "3.9.9")[0];
    let mut typing: Vec<_> = dat
        .telemetry_points()
        .iter()
        .map(|p| p.typing_info().into_iter().collect::<Vec<_>>().join(" "))
        .collect();
    typing.sort();
    assert_eq!(
        typing,
        vec![
            "air discharge his-point sensor temp",
            "air discharge point sensor temp",
        ]
    );
    assert!(registry
        .find_point_groups("DAT", Schema::Haystack, "3.9.10")
        .is_empty());
}

#[test]
fn equipment_links_registered_point_groups() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    register_point_groups(&ctx, &registry);

    let records = load_templates_yaml(EQUIPMENT).unwrap();
    assert!(records
        .iter()
        .all(|r| template_type(r) == Some(TemplateType::Equipment)));
    let ahu = EquipmentTemplate::build(records[0].clone(), &ctx, &registry).unwrap();

    assert_eq!(ahu.extends().unwrap().curie(), "phIoT:ahu");
    assert!(ahu.is_fully_resolved());
    match &ahu.telemetry_points()["DAT"] {
        TelemetryResolution::PointGroup(pg) => assert_eq!(pg.symbol(), "DAT"),
        other => unreachable!("DAT resolved to {other:?}"),
    }
    match &ahu.telemetry_points()["outside-air-temp-sensor-point"] {
        TelemetryResolution::Entity(e) => {
            assert_eq!(e.other_properties()["unit"].val.to_string(), "\"°F\"");
        }
        other => unreachable!("inline point resolved to {other:?}"),
    }
}

#[test]
fn equipment_extending_a_point_names_the_term() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    let records = load_templates_yaml(EQUIPMENT).unwrap();
    let err = EquipmentTemplate::build(records[1].clone(), &ctx, &registry).unwrap_err();
    assert!(matches!(err, TemplateError::Validation { .. }));
    assert!(err.to_string().contains("cur-point"));
}

#[test]
fn duplicate_point_group_symbols_are_ambiguous() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    register_point_groups(&ctx, &registry);

    let mut copy = load_templates_yaml(POINT_GROUPS).unwrap().remove(0);
    copy["id"] = uuid::Uuid::new_v4().to_string().into();
    PointGroupTemplate::build(copy, &ctx, &registry).unwrap();

    let records = load_templates_yaml(EQUIPMENT).unwrap();
    let err = EquipmentTemplate::build(records[0].clone(), &ctx, &registry).unwrap_err();
    assert!(matches!(err, TemplateError::MultipleResults { ref candidates, .. } if candidates.len() == 2));
}

#[test]
fn ids_are_unique_across_template_kinds() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    register_point_groups(&ctx, &registry);

    let mut clash = load_templates_yaml(EQUIPMENT).unwrap().remove(0);
    clash["id"] = "6b1f3c1e-8a59-4a57-9a57-2f6b3cc1b7a4".into();
    assert!(matches!(
        EquipmentTemplate::build(clash, &ctx, &registry),
        Err(TemplateError::DuplicateIdentity { .. })
    ));

    registry.clear();
    assert_eq!(register_point_groups(&ctx, &registry).len(), 2);
}

#[test]
fn entities_are_shared_between_templates() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    let groups = register_point_groups(&ctx, &registry);
    let before = registry.entity_count();

    let mut copy = load_templates_yaml(POINT_GROUPS).unwrap().remove(0);
    copy["id"] = uuid::Uuid::new_v4().to_string().into();
    copy["symbol"] = "DAT-2".into();
    let again = PointGroupTemplate::build(copy, &ctx, &registry).unwrap();

    assert_eq!(registry.entity_count(), before);
    assert!(again
        .telemetry_points()
        .iter()
        .all(|p| groups[0].telemetry_points().iter().any(|q| Arc::ptr_eq(p, q))));
}

#[test]
fn failed_build_leaves_id_free_for_the_corrected_record() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    let good = load_templates_yaml(POINT_GROUPS).unwrap().remove(0);
    let id = uuid::Uuid::parse_str("6b1f3c1e-8a59-4a57-9a57-2f6b3cc1b7a4").unwrap();

    let mut typo = good.clone();
    typo["telemetry_point_types"] = serde_json::json!({ "discharge-air-tmep-sensor-point": null });
    assert!(PointGroupTemplate::build(typo, &ctx, &registry).is_err());
    assert!(!registry.is_claimed(&id));
    assert_eq!(registry.point_group_count(), 0);
    assert_eq!(registry.entity_count(), 0);

    PointGroupTemplate::build(good, &ctx, &registry).unwrap();
    assert!(registry.is_claimed(&id));
    assert_eq!(registry.point_group_count(), 1);
}

#[test]
fn failed_equipment_build_can_be_retried_with_the_same_id() {
    let ctx = TemplateContext::default();
    let registry = TemplateRegistry::new();
    register_point_groups(&ctx, &registry);
    let entities_before = registry.entity_count();

    let mut equipment = load_templates_yaml(EQUIPMENT).unwrap().remove(0);
    equipment["extends"] = "cur-point".into();
    assert!(EquipmentTemplate::build(equipment.clone(), &ctx, &registry).is_err());
    assert_eq!(registry.entity_count(), entities_before);

    equipment["extends"] = "ahu".into();
    let ahu = EquipmentTemplate::build(equipment, &ctx, &registry).unwrap();
    assert!(ahu.is_fully_resolved());
}
