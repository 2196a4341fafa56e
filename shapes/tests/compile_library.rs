//! Compiling multi-file shape libraries.

use tasty_ontology::{builtin, Schema};
use tasty_shapes::{
    to_ntriples, to_turtle, vocab, Node, ShapeCompiler, ShapeError, ShapeFile, ShapeLibrary,
};

const CORE: &str = r#"{
  "namespace": "https://example.org/core#",
  "prefix": "core",
  "shapes": [
    {"name": "discharge-air-temp-sensor", "types": ["point"],
     "tags": ["discharge", "air", "temp", "sensor", "point"]},
    {"name": "damper-cmd", "types": ["point"], "tags": ["damper", "cmd", "point"]},
    {"name": "vav-base", "types": ["vav"], "tags": ["vav", "equip"]}
  ]
}"#;

const SYSTEMS: &str = r#"{
  "namespace": "https://example.org/systems#",
  "prefix": "sys",
  "shapes": [
    {"name": "vav-cooling-only", "shape-mixins": ["vav-base"],
     "predicates": {
       "requires": [{"path": "equipRef", "path-type": "inverse",
                     "shapes": ["discharge-air-temp-sensor", "damper-cmd"]}],
       "optional": [{"path": "siteRef", "types": ["site"]}]
     }},
    {"name": "damper-cmd", "tags": ["damper"]}
  ]
}"#;

fn library() -> ShapeLibrary {
    let mut library = ShapeLibrary::new();
    library.add_file(ShapeFile::from_json(CORE).unwrap()).unwrap();
    library.add_file(ShapeFile::from_json(SYSTEMS).unwrap()).unwrap();
    library
}

#[test]
fn references_resolve_across_files() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let graph = library().compile_all(&view).unwrap();

    assert_eq!(graph.compiled_shapes().len(), 5);
    let system = Node::iri("https://example.org/systems#vav-cooling-only");
    let mixins: Vec<&Node> = graph.objects(&system, vocab::NODE).collect();
    assert_eq!(mixins, vec![&Node::iri("https://example.org/core#vav-base")]);

    // duplicated name: references use the first definition
    let referenced: Vec<Node> = graph
        .objects(&system, vocab::PROPERTY)
        .flat_map(|p| graph.objects(p, vocab::QUALIFIED_VALUE_SHAPE).cloned())
        .filter(|n| matches!(n, Node::Iri(_)))
        .collect();
    assert_eq!(
        referenced,
        vec![
            Node::iri("https://example.org/core#discharge-air-temp-sensor"),
            Node::iri("https://example.org/core#damper-cmd"),
        ]
    );
}

#[test]
fn compilation_is_idempotent() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let library = library();
    let first = library.compile_all(&view).unwrap();
    let second = library.compile_all(&view).unwrap();
    assert_eq!(first.statements(), second.statements());
    assert_eq!(to_turtle(&first), to_turtle(&second));
}

#[test]
fn serializations_agree_on_statement_count() {
    use sophia_api::source::TripleSource;

    let view = builtin(Schema::Haystack, "3.9.10").unwrap();
    let graph = library().compile_all(&view).unwrap();

    let nt = to_ntriples(&graph);
    assert_eq!(nt.lines().count(), graph.len());

    let mut parsed = 0;
    sophia_turtle::parser::turtle::parse_str(&to_turtle(&graph))
        .for_each_triple(|_| parsed += 1)
        .unwrap();
    assert_eq!(parsed, graph.len());

    let mut parsed = 0;
    sophia_turtle::parser::nt::parse_str(&nt)
        .for_each_triple(|_| parsed += 1)
        .unwrap();
    assert_eq!(parsed, graph.len());
}

#[test]
fn single_file_compile_needs_its_mixins_compiled_first() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let library = library();
    let compiler = ShapeCompiler::new(&view, &library).unwrap();
    let mut graph = compiler.new_graph();
    let err = compiler
        .compile_file(&library.files()[1], &mut graph)
        .unwrap_err();
    assert_eq!(
        err,
        ShapeError::UnresolvedMixin {
            stuck: vec!["vav-cooling-only".to_string()]
        }
    );
}

#[test]
fn mixins_across_files_compile_in_any_load_order() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let children = r#"{"namespace": "urn:a#", "prefix": "a", "shapes": [
        {"name": "child", "shape-mixins": ["base"], "tags": ["point"]}
    ]}"#;
    let bases = r#"{"namespace": "urn:b#", "prefix": "b", "shapes": [
        {"name": "base", "tags": ["equip"]}
    ]}"#;

    let compile = |order: [&str; 2]| {
        let mut library = ShapeLibrary::new();
        for src in order {
            library.add_file(ShapeFile::from_json(src).unwrap()).unwrap();
        }
        library.compile_all(&view).unwrap()
    };
    for graph in [compile([bases, children]), compile([children, bases])] {
        assert_eq!(graph.compiled_shapes().len(), 2);
        let child = Node::iri("urn:a#child");
        let mixins: Vec<&Node> = graph.objects(&child, vocab::NODE).collect();
        assert_eq!(mixins, vec![&Node::iri("urn:b#base")]);
    }
}

#[test]
fn shared_worklist_still_reports_cycles_across_files() {
    let view = builtin(Schema::Haystack, "3.9.9").unwrap();
    let mut library = ShapeLibrary::new();
    for src in [
        r#"{"namespace": "urn:a#", "prefix": "a", "shapes": [{"name": "x", "shape-mixins": ["y"]}]}"#,
        r#"{"namespace": "urn:b#", "prefix": "b", "shapes": [{"name": "y", "shape-mixins": ["x"]}]}"#,
    ] {
        library.add_file(ShapeFile::from_json(src).unwrap()).unwrap();
    }
    assert_eq!(
        library.compile_all(&view).unwrap_err(),
        ShapeError::UnresolvedMixin {
            stuck: vec!["x".to_string(), "y".to_string()]
        }
    );
}

#[test]
fn file_count_differs_from_distinct_shape_names() {
    let mut library = ShapeLibrary::new();
    for src in [
        r#"{"namespace": "urn:a#", "prefix": "a", "shapes": [{"name": "x"}]}"#,
        r#"{"namespace": "urn:b#", "prefix": "b", "shapes": [{"name": "x"}]}"#,
        r#"{"namespace": "urn:c#", "prefix": "c", "shapes": [{"name": "x"}]}"#,
    ] {
        library.add_file(ShapeFile::from_json(src).unwrap()).unwrap();
    }
    assert_eq!(library.files().len(), 3);
    assert_eq!(library.len(), 1);
}

#[test]
fn brick_shapes_use_brick_has_tag() {
    let view = builtin(Schema::Brick, "1.1").unwrap();
    let mut library = ShapeLibrary::new();
    library
        .add_file(
            ShapeFile::from_json(
                r#"{"namespace": "urn:b#", "prefix": "b", "shapes": [
                    {"name": "dat", "types": ["Discharge_Air_Temperature_Sensor"],
                     "tags": ["Discharge", "Air", "Temperature"]}
                ]}"#,
            )
            .unwrap(),
        )
        .unwrap();
    let graph = library.compile_all(&view).unwrap();
    let ttl = to_turtle(&graph);
    assert!(ttl.contains("sh:path brick:hasTag"));
    assert!(ttl.contains("sh:hasValue tag:Temperature"));
    assert!(ttl.contains("sh:class brick:Discharge_Air_Temperature_Sensor"));
}
