//! Shape compilation.
//!
//! Each source shape is resolved against the ontology first, so unknown
//! tags, types, paths and shape references fail before anything is emitted.
//! Shapes without mixins are then emitted directly. Shapes with mixins wait
//! in a worklist until every mixin has been compiled; the worklist gets at
//! most one pass per queued shape and stops early once a pass makes no
//! progress.

use std::collections::HashSet;

use tasty_ontology::model::iris;
use tasty_ontology::schema::reserved_namespaces;
use tasty_ontology::{resolve_term, Namespace, OntologyQuery, OntologyView};
use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::graph::{ConstraintGraph, Node};
use crate::library::ShapeLibrary;
use crate::source::{PathType, PredicateSpec, ShapeFile, ShapeSpec};
use crate::vocab;

/// A source shape with every name resolved to an IRI.
#[derive(Debug, Clone)]
struct ResolvedShape {
    name: String,
    iri: String,
    tags: Vec<String>,
    types: Vec<String>,
    requires: Vec<ResolvedPredicate>,
    optional: Vec<ResolvedPredicate>,
    mixins: Vec<String>,
}

#[derive(Debug, Clone)]
struct ResolvedPredicate {
    path: String,
    path_type: PathType,
    types: Vec<String>,
    shapes: Vec<String>,
}

impl ResolvedPredicate {
    fn required_nodes(&self) -> i64 {
        i64::try_from(self.types.len() + self.shapes.len()).unwrap_or(i64::MAX)
    }
}

/// Compiles source shapes against one ontology and shape library.
#[derive(Debug)]
pub struct ShapeCompiler<'a> {
    view: &'a OntologyView,
    library: &'a ShapeLibrary,
    has_tag: Node,
}

impl<'a> ShapeCompiler<'a> {
    /// Creates a compiler.
    ///
    /// # Errors
    ///
    /// Returns an error if the ontology does not define the schema's
    /// `hasTag` property.
    pub fn new(view: &'a OntologyView, library: &'a ShapeLibrary) -> Result<Self> {
        let has_tag = view.term_from_curie(view.schema().has_tag_curie())?;
        Ok(Self {
            view,
            library,
            has_tag: Node::Iri(has_tag.iri()),
        })
    }

    /// Creates an empty graph with the standard, ontology and shape-file
    /// prefixes bound.
    #[must_use]
    pub fn new_graph(&self) -> ConstraintGraph {
        let mut graph = ConstraintGraph::new();
        for ns in reserved_namespaces() {
            graph.bind(ns);
        }
        for ns in self.view.namespaces() {
            graph.bind(ns.clone());
        }
        for file in self.library.files() {
            graph.bind(file.binding());
        }
        graph
    }

    /// Compiles every shape of one file into `graph`.
    ///
    /// Returns the number of shapes compiled. Mixins defined in other files
    /// must already be in `graph`; use [`compile_files`](Self::compile_files)
    /// to compile files that mix in each other's shapes.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Term`] for unresolvable tags, types or paths,
    /// [`ShapeError::UnknownShapeReference`] for references to shapes that
    /// are not in the library, [`ShapeError::DuplicateShape`] if a shape was
    /// already compiled into the graph, and [`ShapeError::UnresolvedMixin`]
    /// naming every shape whose mixins never became available. The graph
    /// must be discarded after an error.
    pub fn compile_file(&self, file: &ShapeFile, graph: &mut ConstraintGraph) -> Result<usize> {
        self.compile_files(std::slice::from_ref(file), graph)
    }

    /// Compiles several files into `graph` with one shared mixin worklist.
    ///
    /// The result does not depend on the order of `files`.
    ///
    /// # Errors
    ///
    /// Same as [`compile_file`](Self::compile_file); a shape IRI defined
    /// twice across `files` is also [`ShapeError::DuplicateShape`].
    pub fn compile_files(&self, files: &[ShapeFile], graph: &mut ConstraintGraph) -> Result<usize> {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();
        for file in files {
            for shape in &file.shapes {
                let shape = self.resolve_shape(file, shape)?;
                if graph.is_compiled(&shape.iri) || !seen.insert(shape.iri.clone()) {
                    return Err(ShapeError::DuplicateShape {
                        name: shape.name,
                        namespace: file.namespace.clone(),
                    });
                }
                resolved.push(shape);
            }
        }

        for file in files {
            graph.bind(file.binding());
        }
        if files
            .iter()
            .flat_map(|f| &f.shapes)
            .any(|s| !s.tags_custom.is_empty())
        {
            graph.bind(Namespace::new("phCustom", iris::PH_CUSTOM));
        }

        let (mut pending, ready): (Vec<_>, Vec<_>) =
            resolved.into_iter().partition(|s| !s.mixins.is_empty());
        let mut compiled = ready.len();
        for shape in &ready {
            self.emit_shape(shape, graph);
        }

        let passes = pending.len();
        for pass in 0..passes {
            if pending.is_empty() {
                break;
            }
            let before = pending.len();
            let mut waiting = Vec::with_capacity(before);
            for shape in pending {
                let missing: Vec<&str> = shape
                    .mixins
                    .iter()
                    .filter(|m| !graph.is_compiled(m))
                    .map(String::as_str)
                    .collect();
                if missing.is_empty() {
                    self.emit_shape(&shape, graph);
                    for mixin in &shape.mixins {
                        graph.add(
                            Node::iri(shape.iri.clone()),
                            vocab::NODE,
                            Node::iri(mixin.clone()),
                        );
                    }
                    compiled += 1;
                } else {
                    debug!(shape = %shape.iri, ?missing, pass, "mixins not yet compiled");
                    waiting.push(shape);
                }
            }
            pending = waiting;
            if pending.len() == before {
                break;
            }
        }

        if !pending.is_empty() {
            let mut stuck: Vec<String> = pending.into_iter().map(|s| s.name).collect();
            stuck.sort();
            return Err(ShapeError::UnresolvedMixin { stuck });
        }
        debug!(files = files.len(), compiled, "compiled shape files");
        Ok(compiled)
    }

    fn resolve_shape(&self, file: &ShapeFile, shape: &ShapeSpec) -> Result<ResolvedShape> {
        let mut tags = shape
            .tags
            .iter()
            .map(|tag| -> Result<String> { Ok(resolve_term(self.view, tag)?.iri()) })
            .collect::<Result<Vec<_>>>()?;
        tags.extend(
            shape
                .tags_custom
                .iter()
                .map(|tag| format!("{}{tag}", iris::PH_CUSTOM)),
        );
        let types = self.resolve_terms(&shape.types)?;
        let mixins = shape
            .shape_mixins
            .iter()
            .map(|mixin| {
                if file.shapes.iter().any(|s| &s.name == mixin) {
                    Ok(file.shape_iri(mixin))
                } else {
                    self.shape_reference(shape, mixin)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        let resolve_all = |preds: &[PredicateSpec]| {
            preds
                .iter()
                .map(|p| self.resolve_predicate(shape, p))
                .collect::<Result<Vec<_>>>()
        };
        Ok(ResolvedShape {
            name: shape.name.clone(),
            iri: file.shape_iri(&shape.name),
            tags,
            types,
            requires: resolve_all(&shape.predicates.requires)?,
            optional: resolve_all(&shape.predicates.optional)?,
            mixins,
        })
    }

    fn resolve_predicate(&self, shape: &ShapeSpec, pred: &PredicateSpec) -> Result<ResolvedPredicate> {
        Ok(ResolvedPredicate {
            path: resolve_term(self.view, &pred.path)?.iri(),
            path_type: pred.path_type,
            types: self.resolve_terms(&pred.types)?,
            shapes: pred
                .shapes
                .iter()
                .map(|name| self.shape_reference(shape, name))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    fn resolve_terms(&self, terms: &[String]) -> Result<Vec<String>> {
        terms
            .iter()
            .map(|t| -> Result<String> { Ok(resolve_term(self.view, t)?.iri()) })
            .collect()
    }

    fn shape_reference(&self, shape: &ShapeSpec, name: &str) -> Result<String> {
        self.library
            .shape_iri(name)
            .ok_or_else(|| ShapeError::UnknownShapeReference {
                shape: shape.name.clone(),
                reference: name.to_string(),
            })
    }

    fn emit_shape(&self, shape: &ResolvedShape, graph: &mut ConstraintGraph) {
        let subject = Node::iri(shape.iri.clone());
        graph.add(subject.clone(), vocab::RDF_TYPE, Node::iri(vocab::NODE_SHAPE));

        if !shape.tags.is_empty() {
            for tag in &shape.tags {
                let prop = graph.blank();
                let value_shape = graph.blank();
                graph.add(subject.clone(), vocab::PROPERTY, prop.clone());
                graph.add(prop.clone(), vocab::PATH, self.has_tag.clone());
                graph.add(prop.clone(), vocab::QUALIFIED_VALUE_SHAPE, value_shape.clone());
                graph.add(prop, vocab::QUALIFIED_MIN_COUNT, Node::Integer(1));
                graph.add(value_shape, vocab::HAS_VALUE, Node::iri(tag.clone()));
            }
            let total = graph.blank();
            graph.add(subject.clone(), vocab::PROPERTY, total.clone());
            graph.add(total.clone(), vocab::PATH, self.has_tag.clone());
            graph.add(
                total,
                vocab::MIN_COUNT,
                Node::Integer(i64::try_from(shape.tags.len()).unwrap_or(i64::MAX)),
            );
        }

        for class in &shape.types {
            graph.add(subject.clone(), vocab::CLASS, Node::iri(class.clone()));
        }

        for pred in &shape.requires {
            self.emit_predicate(&subject, pred, vocab::VIOLATION, graph);
            if pred.required_nodes() > 0 {
                let min = graph.blank();
                graph.add(subject.clone(), vocab::PROPERTY, min.clone());
                graph.add(min.clone(), vocab::MIN_COUNT, Node::Integer(pred.required_nodes()));
                Self::emit_path(&min, pred, graph);
            }
        }
        for pred in &shape.optional {
            self.emit_predicate(&subject, pred, vocab::WARNING, graph);
        }

        graph.mark_compiled(&shape.iri);
        debug!(shape = %shape.iri, "compiled shape");
    }

    fn emit_predicate(
        &self,
        subject: &Node,
        pred: &ResolvedPredicate,
        severity: &str,
        graph: &mut ConstraintGraph,
    ) {
        for shape in &pred.shapes {
            let prop = Self::qualified_property(subject, pred, graph);
            graph.add(prop.clone(), vocab::QUALIFIED_VALUE_SHAPE, Node::iri(shape.clone()));
            graph.add(prop, vocab::SEVERITY, Node::iri(severity));
        }
        for class in &pred.types {
            let prop = Self::qualified_property(subject, pred, graph);
            let node_shape = graph.blank();
            graph.add(prop.clone(), vocab::QUALIFIED_VALUE_SHAPE, node_shape.clone());
            graph.add(node_shape.clone(), vocab::RDF_TYPE, Node::iri(vocab::NODE_SHAPE));
            graph.add(node_shape, vocab::CLASS, Node::iri(class.clone()));
            graph.add(prop, vocab::SEVERITY, Node::iri(severity));
        }
    }

    /// Adds `[ sh:path ...; sh:qualifiedMinCount 1; sh:qualifiedMaxCount 1;
    /// sh:qualifiedValueShapesDisjoint true ]` to the shape and returns it.
    fn qualified_property(
        subject: &Node,
        pred: &ResolvedPredicate,
        graph: &mut ConstraintGraph,
    ) -> Node {
        let prop = graph.blank();
        graph.add(subject.clone(), vocab::PROPERTY, prop.clone());
        Self::emit_path(&prop, pred, graph);
        graph.add(prop.clone(), vocab::QUALIFIED_MIN_COUNT, Node::Integer(1));
        graph.add(prop.clone(), vocab::QUALIFIED_MAX_COUNT, Node::Integer(1));
        graph.add(
            prop.clone(),
            vocab::QUALIFIED_VALUE_SHAPES_DISJOINT,
            Node::Boolean(true),
        );
        prop
    }

    fn emit_path(prop: &Node, pred: &ResolvedPredicate, graph: &mut ConstraintGraph) {
        let path = Node::iri(pred.path.clone());
        match pred.path_type {
            PathType::Direct => graph.add(prop.clone(), vocab::PATH, path),
            PathType::Inverse => {
                let inverse = graph.blank();
                graph.add(prop.clone(), vocab::PATH, inverse.clone());
                graph.add(inverse, vocab::INVERSE_PATH, path);
            }
        }
    }
}
