//! End-to-end classification against the built-in Haystack and Brick ontologies.

use std::collections::BTreeSet;

use tasty_ontology::{
    builtin, classify_tags, resolve_tags, resolve_term, ClassifierConfig, NamespacedTerm,
    OntologyCatalog, OntologyError, OntologyQuery, OntologyView, RootConcept, Schema,
};

fn curies(set: &BTreeSet<NamespacedTerm>) -> BTreeSet<String> {
    set.iter().map(NamespacedTerm::curie).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn point_with_two_point_types_and_equipment() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let c = classify_tags(
        &*view,
        "cur-air-writable-motor-temp-sensor-point",
        &ClassifierConfig::default(),
    )
    .unwrap();
    assert_eq!(
        curies(&c.classes),
        set(&["phIoT:cur-point", "phIoT:motor", "phIoT:writable-point"])
    );
    assert_eq!(
        curies(&c.markers),
        set(&["phScience:air", "phScience:temp", "phIoT:sensor"])
    );
    assert!(c.properties.is_empty());
}

#[test]
fn property_token_is_kept_with_null_value() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let c = classify_tags(
        &*view,
        "fan-air-writable-motor-sensor-curVal-point",
        &ClassifierConfig::default(),
    )
    .unwrap();
    assert_eq!(
        curies(&c.classes),
        set(&["phIoT:fan-motor", "phIoT:writable-point"])
    );
    assert_eq!(curies(&c.markers), set(&["phScience:air", "phIoT:sensor"]));
    let props: Vec<(String, bool)> = c
        .properties
        .iter()
        .map(|(k, v)| (k.curie(), v.is_null()))
        .collect();
    assert_eq!(props, vec![("phIoT:curVal".to_string(), true)]);
}

#[test]
fn token_order_does_not_matter() {
    let view = builtin(Schema::Haystack, "3.9.10").unwrap();
    let config = ClassifierConfig::default();
    let a = classify_tags(&*view, "point-sensor-temp-air-discharge", &config).unwrap();
    let b = classify_tags(&*view, "discharge-air-temp-sensor-point", &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(curies(&a.classes), set(&["phIoT:point"]));
}

#[test]
fn equipment_classes_descend_from_equip() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let c = classify_tags(&*view, "damper-actuator", &ClassifierConfig::default()).unwrap();
    let equip = view.root(RootConcept::Equipment).unwrap();
    let equipment = view.subclass_closure(&equip);
    assert_eq!(curies(&c.classes), set(&["phIoT:damper-actuator"]));
    assert!(c.classes.iter().all(|class| equipment.contains(class)));
}

#[test]
fn unknown_token_fails_resolution() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let err = classify_tags(&*view, "air-flux-capacitor", &ClassifierConfig::default())
        .unwrap_err();
    assert!(matches!(err, OntologyError::TermNotFound { term } if term == "capacitor" || term == "flux"));
}

#[test]
fn brick_single_token_class() {
    let view = builtin(Schema::Brick, "1.1").unwrap();
    let c = classify_tags(
        &*view,
        "Discharge_Air_Temperature_Sensor",
        &ClassifierConfig::default(),
    )
    .unwrap();
    assert_eq!(
        curies(&c.classes),
        set(&["brick:Discharge_Air_Temperature_Sensor"])
    );
    assert!(matches!(
        resolve_tags(&*view, "Point-Air"),
        Err(OntologyError::AmbiguousTerm { term, .. }) if term == "Point"
    ));
}

#[test]
fn loaded_ontology_replaces_builtin_in_catalog() {
    let defs = r#"
@prefix ph: <https://project-haystack.org/def/ph/3.9.9#> .
@prefix phIoT: <https://project-haystack.org/def/phIoT/3.9.9#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

ph:marker rdfs:label "marker" .
ph:entity rdfs:subClassOf ph:marker .
phIoT:point rdfs:subClassOf ph:entity .
phIoT:sensor rdfs:subClassOf ph:marker .
phIoT:gizmo rdfs:subClassOf phIoT:point .
phIoT:gizmo-point rdfs:subClassOf phIoT:gizmo .
"#;
    let loaded = OntologyView::from_turtle(Schema::Haystack, "3.9.9", defs).unwrap();
    let mut catalog = OntologyCatalog::new();
    catalog.insert(std::sync::Arc::new(loaded));
    let view = catalog.get(Schema::Haystack, "3.9.9").unwrap();

    assert!(resolve_term(&*view, "motor").is_err());
    let c = classify_tags(&*view, "gizmo-sensor-point", &ClassifierConfig::default()).unwrap();
    assert_eq!(curies(&c.classes), set(&["phIoT:gizmo-point"]));
    assert_eq!(curies(&c.markers), set(&["phIoT:sensor"]));
}
