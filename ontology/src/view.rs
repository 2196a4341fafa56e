//! Read-only query façade over one (schema, version) ontology.
//!
//! An [`OntologyView`] indexes subjects and `rdfs:subClassOf` edges once and
//! is never mutated afterwards, so it can be shared across threads behind an
//! `Arc`. Built-in views are cached process-wide by [`builtin`];
//! [`OntologyCatalog`] lets callers layer loaded ontologies over them.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::error::{OntologyError, Result};
use crate::model::{expand_curie, split_iri, Namespace, Ontology};
use crate::namespaces;
use crate::schema::{is_reserved, reserved_namespaces, RootConcept, Schema};
use crate::term::NamespacedTerm;

/// The query interface the resolver, classifier and compilers consume.
///
/// Implementations must return deterministic, order-independent answers for a
/// fixed ontology version.
pub trait OntologyQuery {
    /// Returns `root` and every class that is transitively a subclass of it.
    fn subclass_closure(&self, root: &NamespacedTerm) -> BTreeSet<NamespacedTerm>;

    /// Returns every bound namespace in which `local_name` is a subject.
    fn namespaces_containing(&self, local_name: &str) -> Vec<Namespace>;

    /// Returns `true` if the term is a subject of the ontology.
    fn is_subject(&self, term: &NamespacedTerm) -> bool;

    /// Returns the namespaces searched for entity classes, in binding order.
    ///
    /// Reserved vocabularies (`rdf`, `rdfs`, `owl`, ...) are excluded.
    fn namespaces(&self) -> &[Namespace];

    /// Returns a root concept of the schema.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::MissingRoot`] if the ontology does not define it.
    fn root(&self, root: RootConcept) -> Result<NamespacedTerm>;
}

/// An indexed, immutable ontology for one (schema, version) pair.
#[derive(Debug)]
pub struct OntologyView {
    schema: Schema,
    version: String,
    bindings: Vec<Namespace>,
    by_iri: HashMap<String, Namespace>,
    searchable: Vec<Namespace>,
    subjects: HashSet<String>,
    children: HashMap<String, Vec<String>>,
}

impl OntologyView {
    /// Starts building a view by hand.
    pub fn builder(schema: Schema, version: impl Into<String>) -> OntologyViewBuilder {
        OntologyViewBuilder::new(schema, version)
    }

    /// Indexes an ontology model.
    #[must_use]
    pub fn from_model(ontology: &Ontology) -> Self {
        let mut builder = OntologyViewBuilder::new(ontology.schema, ontology.version.clone());
        for ns in &ontology.bindings {
            builder.bind(ns.clone());
        }
        for module in &ontology.namespaces {
            for class in &module.classes {
                builder.subject(class.id.clone());
                for parent in &class.subclass_of {
                    builder.subclass(class.id.clone(), parent.clone());
                }
            }
            for prop in &module.properties {
                builder.subject(prop.id.clone());
            }
        }
        builder.build()
    }

    /// The schema of this view.
    #[must_use]
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The schema version of this view.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Every namespace binding, reserved vocabularies included.
    #[must_use]
    pub fn bindings(&self) -> &[Namespace] {
        &self.bindings
    }

    /// Returns the namespace bound to `prefix`.
    #[must_use]
    pub fn namespace_for_prefix(&self, prefix: &str) -> Option<&Namespace> {
        self.bindings.iter().find(|ns| ns.prefix == prefix)
    }

    /// Number of indexed subjects.
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Maps a full IRI onto a term, if its namespace is bound and it is a subject.
    #[must_use]
    pub fn term_for_iri(&self, iri: &str) -> Option<NamespacedTerm> {
        if !self.subjects.contains(iri) {
            return None;
        }
        let (ns, local) = split_iri(iri)?;
        let namespace = self.by_iri.get(ns)?;
        Some(NamespacedTerm::new(namespace.clone(), local))
    }

    /// Resolves a CURIE (e.g., `ph:hasTag`) to a term of this ontology.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::UnknownPrefix`] for unbound prefixes and
    /// [`OntologyError::TermNotFound`] if the IRI is not a subject.
    pub fn term_from_curie(&self, curie: &str) -> Result<NamespacedTerm> {
        let iri = expand_curie(curie, &self.bindings)?;
        self.term_for_iri(&iri)
            .ok_or_else(|| OntologyError::TermNotFound {
                term: curie.to_string(),
            })
    }

    /// Returns `true` if `descendant` lies in the subclass closure of `ancestor`.
    #[must_use]
    pub fn is_subclass_of(&self, descendant: &NamespacedTerm, ancestor: &NamespacedTerm) -> bool {
        self.closure_iris(&ancestor.iri()).contains(&descendant.iri())
    }

    /// Returns the IRIs of `root` and all of its transitive subclasses.
    pub(crate) fn closure_iris(&self, root: &str) -> HashSet<String> {
        let mut seen = HashSet::from([root.to_string()]);
        let mut queue = VecDeque::from([root.to_string()]);
        while let Some(iri) = queue.pop_front() {
            for child in self.children.get(&iri).into_iter().flatten() {
                if seen.insert(child.clone()) {
                    queue.push_back(child.clone());
                }
            }
        }
        seen
    }
}

impl OntologyQuery for OntologyView {
    fn subclass_closure(&self, root: &NamespacedTerm) -> BTreeSet<NamespacedTerm> {
        let mut closure: BTreeSet<NamespacedTerm> = self
            .closure_iris(&root.iri())
            .iter()
            .filter_map(|iri| self.term_for_iri(iri))
            .collect();
        closure.insert(root.clone());
        closure
    }

    fn namespaces_containing(&self, local_name: &str) -> Vec<Namespace> {
        self.bindings
            .iter()
            .filter(|ns| self.subjects.contains(&ns.iri_of(local_name)))
            .cloned()
            .collect()
    }

    fn is_subject(&self, term: &NamespacedTerm) -> bool {
        self.subjects.contains(&term.iri())
    }

    fn namespaces(&self) -> &[Namespace] {
        &self.searchable
    }

    fn root(&self, root: RootConcept) -> Result<NamespacedTerm> {
        let iri = expand_curie(self.schema.root_curie(root), &self.bindings)?;
        self.term_for_iri(&iri)
            .ok_or_else(|| OntologyError::MissingRoot {
                iri,
                schema: self.schema.to_string(),
                version: self.version.clone(),
            })
    }
}

/// Incremental builder for an [`OntologyView`].
///
/// Reserved vocabularies are pre-bound. Namespaces of subjects that have no
/// binding when [`build`](Self::build) runs get generated prefixes
/// (`ns1`, `ns2`, ... in IRI order).
#[derive(Debug)]
pub struct OntologyViewBuilder {
    schema: Schema,
    version: String,
    bindings: Vec<Namespace>,
    subjects: HashSet<String>,
    edges: Vec<(String, String)>,
}

impl OntologyViewBuilder {
    /// Creates an empty builder.
    pub fn new(schema: Schema, version: impl Into<String>) -> Self {
        Self {
            schema,
            version: version.into(),
            bindings: reserved_namespaces(),
            subjects: HashSet::new(),
            edges: Vec::new(),
        }
    }

    /// Binds a namespace. Rebinding an IRI keeps the first prefix.
    pub fn bind(&mut self, namespace: Namespace) -> &mut Self {
        if !self.bindings.iter().any(|ns| ns.iri == namespace.iri) {
            self.bindings.push(namespace);
        }
        self
    }

    /// Declares a subject IRI.
    pub fn subject(&mut self, iri: impl Into<String>) -> &mut Self {
        self.subjects.insert(iri.into());
        self
    }

    /// Declares `child rdfs:subClassOf parent`; the child becomes a subject.
    pub fn subclass(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        let child = child.into();
        self.subjects.insert(child.clone());
        self.edges.push((child, parent.into()));
        self
    }

    /// Finishes the index.
    #[must_use]
    pub fn build(self) -> OntologyView {
        let mut bindings = self.bindings;
        let mut unbound: BTreeSet<&str> = BTreeSet::new();
        for iri in &self.subjects {
            if let Some((ns, _)) = split_iri(iri) {
                if !bindings.iter().any(|b| b.iri == ns) {
                    unbound.insert(ns);
                }
            }
        }
        for (i, ns) in unbound.into_iter().enumerate() {
            bindings.push(Namespace::new(format!("ns{}", i + 1), ns));
        }

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for (child, parent) in self.edges {
            let siblings = children.entry(parent).or_default();
            if !siblings.contains(&child) {
                siblings.push(child);
            }
        }

        let by_iri = bindings
            .iter()
            .map(|ns| (ns.iri.clone(), ns.clone()))
            .collect();
        let searchable = bindings
            .iter()
            .filter(|ns| !is_reserved(&ns.iri))
            .cloned()
            .collect();

        debug!(
            schema = %self.schema,
            version = %self.version,
            subjects = self.subjects.len(),
            "ontology view indexed"
        );

        OntologyView {
            schema: self.schema,
            version: self.version,
            bindings,
            by_iri,
            searchable,
            subjects: self.subjects,
            children,
        }
    }
}

/// Returns the cached built-in view for a supported (schema, version) pair.
///
/// Each pair is assembled and indexed at most once per process.
///
/// # Errors
///
/// Returns an error if the pair is unsupported.
pub fn builtin(schema: Schema, version: &str) -> Result<Arc<OntologyView>> {
    static CACHE: OnceLock<Mutex<HashMap<(Schema, &'static str), Arc<OntologyView>>>> =
        OnceLock::new();

    let version = schema.check_version(version)?;
    let mut cache = CACHE
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(view) = cache.get(&(schema, version)) {
        return Ok(Arc::clone(view));
    }
    let view = Arc::new(OntologyView::from_model(&namespaces::ontology(
        schema, version,
    )?));
    cache.insert((schema, version), Arc::clone(&view));
    Ok(view)
}

/// Maps (schema, version) pairs to views, falling back to the built-ins.
#[derive(Debug, Clone, Default)]
pub struct OntologyCatalog {
    views: HashMap<(Schema, String), Arc<OntologyView>>,
}

impl OntologyCatalog {
    /// Creates a catalogue that serves only the built-in views.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view, replacing any earlier one for the same pair.
    pub fn insert(&mut self, view: Arc<OntologyView>) -> Option<Arc<OntologyView>> {
        self.views
            .insert((view.schema(), view.version().to_string()), view)
    }

    /// Returns the view for a pair.
    ///
    /// # Errors
    ///
    /// Returns an error if no view was registered and the pair has no built-in.
    pub fn get(&self, schema: Schema, version: &str) -> Result<Arc<OntologyView>> {
        match self.views.get(&(schema, version.to_string())) {
            Some(view) => Ok(Arc::clone(view)),
            None => builtin(schema, version),
        }
    }
}
