//! The set of loaded shape files and the name → namespace lookup.

use std::collections::{HashMap, HashSet};

use tasty_ontology::{Namespace, OntologyView};
use tracing::{debug, warn};

use crate::compiler::ShapeCompiler;
use crate::error::{Result, ShapeError};
use crate::graph::ConstraintGraph;
use crate::source::ShapeFile;

/// Every loaded shape file, in load order.
///
/// Shape references in predicates and mixins are plain names; the library
/// maps each name to the namespace of the first file that defines it.
#[derive(Debug, Clone, Default)]
pub struct ShapeLibrary {
    files: Vec<ShapeFile>,
    lookup: HashMap<String, Namespace>,
}

impl ShapeLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape file.
    ///
    /// A name already defined by an earlier file keeps its first namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DuplicateShape`] if the file defines a name twice.
    pub fn add_file(&mut self, file: ShapeFile) -> Result<()> {
        let mut names = HashSet::new();
        for shape in &file.shapes {
            if !names.insert(shape.name.as_str()) {
                return Err(ShapeError::DuplicateShape {
                    name: shape.name.clone(),
                    namespace: file.namespace.clone(),
                });
            }
        }
        for shape in &file.shapes {
            match self.lookup.get(&shape.name) {
                Some(existing) => warn!(
                    shape = %shape.name,
                    kept = %existing.iri,
                    ignored = %file.namespace,
                    "shape exists in multiple namespaces"
                ),
                None => {
                    self.lookup.insert(shape.name.clone(), file.binding());
                }
            }
        }
        debug!(prefix = %file.prefix, shapes = file.shapes.len(), "loaded shape file");
        self.files.push(file);
        Ok(())
    }

    /// Loaded files, in load order.
    #[must_use]
    pub fn files(&self) -> &[ShapeFile] {
        &self.files
    }

    /// Number of distinct shape names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns `true` if no shapes are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Full IRI of a shape name.
    #[must_use]
    pub fn shape_iri(&self, name: &str) -> Option<String> {
        self.lookup.get(name).map(|ns| ns.iri_of(name))
    }

    /// Compiles every file into one fresh graph.
    ///
    /// Mixins may name shapes in any file; load order does not matter.
    ///
    /// # Errors
    ///
    /// Returns the first compilation error; no partial graph is returned.
    pub fn compile_all(&self, view: &OntologyView) -> Result<ConstraintGraph> {
        let compiler = ShapeCompiler::new(view, self)?;
        let mut graph = compiler.new_graph();
        compiler.compile_files(&self.files, &mut graph)?;
        Ok(graph)
    }
}
