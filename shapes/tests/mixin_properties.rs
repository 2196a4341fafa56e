//! Property-based tests for mixin resolution.

use proptest::prelude::*;
use tasty_ontology::{builtin, Schema};
use tasty_shapes::{vocab, Node, ShapeError, ShapeFile, ShapeLibrary, ShapeSpec};

/// Shapes `s0..sN` where each shape mixes in a subset of earlier ones,
/// listed in arbitrary order.
fn acyclic_file() -> impl Strategy<Value = ShapeFile> {
    (1usize..8)
        .prop_flat_map(|n| {
            let parents: Vec<_> = (0..n)
                .map(|i| prop::collection::vec(0..i.max(1), 0..=i.min(3)))
                .collect();
            (Just(n), parents)
        })
        .prop_map(|(n, parents)| {
            (0..n)
                .map(|i| {
                    let mut mixins: Vec<String> = parents[i]
                        .iter()
                        .filter(|&&p| p < i)
                        .map(|p| format!("s{p}"))
                        .collect();
                    mixins.sort();
                    mixins.dedup();
                    ShapeSpec {
                        name: format!("s{i}"),
                        tags: vec!["point".to_string()],
                        shape_mixins: mixins,
                        ..ShapeSpec::default()
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
        .prop_map(|shapes| ShapeFile {
            namespace: "urn:p#".to_string(),
            prefix: "p".to_string(),
            shapes,
        })
}

proptest! {
    /// Any acyclic mixin structure compiles completely, whatever the order.
    #[test]
    fn prop_acyclic_mixins_terminate(file in acyclic_file()) {
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let mut library = ShapeLibrary::new();
        library.add_file(file.clone()).unwrap();
        let graph = library.compile_all(&view).unwrap();

        prop_assert_eq!(graph.compiled_shapes().len(), file.shapes.len());
        for shape in &file.shapes {
            let subject = Node::iri(file.shape_iri(&shape.name));
            let nodes: Vec<&Node> = graph.objects(&subject, vocab::NODE).collect();
            prop_assert_eq!(nodes.len(), shape.shape_mixins.len());
        }
    }

    /// A cycle of any length leaves every member stuck.
    #[test]
    fn prop_cycles_are_reported(len in 1usize..6) {
        let shapes = (0..len)
            .map(|i| ShapeSpec {
                name: format!("c{i}"),
                shape_mixins: vec![format!("c{}", (i + 1) % len)],
                ..ShapeSpec::default()
            })
            .collect();
        let mut library = ShapeLibrary::new();
        library
            .add_file(ShapeFile {
                namespace: "urn:c#".to_string(),
                prefix: "c".to_string(),
                shapes,
            })
            .unwrap();
        let view = builtin(Schema::Haystack, "3.9.9").unwrap();
        let err = library.compile_all(&view).unwrap_err();
        let mut expected: Vec<String> = (0..len).map(|i| format!("c{i}")).collect();
        expected.sort();
        prop_assert_eq!(err, ShapeError::UnresolvedMixin { stuck: expected });
    }
}
