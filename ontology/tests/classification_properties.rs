//! Property-based tests for the classifier.
//!
//! Random tag sets are drawn from tokens that resolve uniquely in the
//! built-in Haystack 3.9.9 ontology.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tasty_ontology::{
    builtin, classify, classify_tags, resolve_tags, ClassifierConfig, OntologyQuery, RootConcept,
    Schema,
};

const TOKENS: &[&str] = &[
    "cur", "his", "writable", "point", "air", "water", "temp", "flow", "pressure", "sensor",
    "cmd", "sp", "motor", "fan", "pump", "discharge", "return", "zone", "equip", "ahu", "curVal",
    "unit", "vav", "damper", "actuator", "elec", "meter",
];

fn tag_string() -> impl Strategy<Value = String> {
    prop::sample::subsequence(TOKENS.to_vec(), 0..=6)
        .prop_shuffle()
        .prop_map(|tokens| tokens.join("-"))
}

proptest! {
    /// Classifying the same tags twice yields the same result.
    #[test]
    fn prop_idempotent(tags in tag_string()) {
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let config = ClassifierConfig::default();
        let first = classify_tags(&*view, &tags, &config).unwrap();
        let second = classify_tags(&*view, &tags, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Token order never changes the classification.
    #[test]
    fn prop_order_independent(tags in tag_string()) {
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let config = ClassifierConfig::default();
        let mut reversed: Vec<&str> = tags.split('-').collect();
        reversed.reverse();
        let a = classify_tags(&*view, &tags, &config).unwrap();
        let b = classify_tags(&*view, &reversed.join("-"), &config).unwrap();
        prop_assert_eq!(a, b);
    }

    /// No class is an ancestor of another, and all are entities.
    #[test]
    fn prop_most_specific(tags in tag_string()) {
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let c = classify_tags(&*view, &tags, &ClassifierConfig::default()).unwrap();
        let entity = view.root(RootConcept::Entity).unwrap();
        let entities = view.subclass_closure(&entity);
        for class in &c.classes {
            prop_assert!(entities.contains(class));
            let closure = view.subclass_closure(class);
            for other in c.classes.iter().filter(|o| *o != class) {
                prop_assert!(!closure.contains(other), "{} is an ancestor of {}", class, other);
            }
        }
    }

    /// Classes, markers and properties never share a local name.
    #[test]
    fn prop_partition(tags in tag_string()) {
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let resolved = resolve_tags(&*view, &tags).unwrap();
        let c = classify(&*view, &resolved, &ClassifierConfig::default()).unwrap();

        let classes: BTreeSet<&str> = c.classes.iter().map(|t| t.name()).collect();
        let markers: BTreeSet<&str> = c.markers.iter().map(|t| t.name()).collect();
        let props: BTreeSet<&str> = c.properties.keys().map(|t| t.name()).collect();
        prop_assert!(classes.is_disjoint(&markers));
        prop_assert!(classes.is_disjoint(&props));
        prop_assert!(markers.is_disjoint(&props));

        let tokens: BTreeSet<&str> = resolved.iter().map(|t| t.name()).collect();
        prop_assert!(markers.is_subset(&tokens));
        prop_assert!(props.is_subset(&tokens));
        prop_assert!(classes.iter().chain(&markers).chain(&props).all(|n| c.contains_name(n)));
    }
}
