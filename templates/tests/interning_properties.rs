//! Property tests for entity interning.

use std::sync::Arc;

use proptest::prelude::*;
use tasty_ontology::{builtin, ClassifierConfig, Schema};
use tasty_templates::{EntityTemplate, TemplateRegistry};

const TOKENS: &[&str] = &[
    "air", "temp", "sensor", "point", "cur", "his", "discharge", "fan", "motor", "curVal",
];

fn tag_string() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(TOKENS, 1..=5).prop_shuffle()
}

proptest! {
    #[test]
    fn prop_interning_ignores_tag_order(tags in tag_string()) {
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let config = ClassifierConfig::default();
        let registry = TemplateRegistry::new();

        let forward = tags.join("-");
        let mut reversed = tags.clone();
        reversed.reverse();
        let backward = reversed.join("-");

        let a = registry.intern(EntityTemplate::resolve(&view, &forward, None, &config).unwrap());
        let b = registry.intern(EntityTemplate::resolve(&view, &backward, None, &config).unwrap());
        prop_assert!(Arc::ptr_eq(&a, &b));
        prop_assert_eq!(registry.entity_count(), 1);
    }
}
