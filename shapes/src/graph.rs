//! The accumulating constraint graph.
//!
//! Statements are kept in insertion order and deduplicated, and blank nodes
//! are numbered from zero, so compiling the same shapes into a fresh graph
//! always produces the same statements.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use tasty_ontology::Namespace;

/// A statement subject or object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// A full IRI.
    Iri(String),
    /// A graph-local blank node.
    Blank(u64),
    /// An `xsd:integer` literal.
    Integer(i64),
    /// An `xsd:boolean` literal.
    Boolean(bool),
}

impl Node {
    /// Creates an IRI node.
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    /// Returns the IRI, if this node is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{iri}>"),
            Node::Blank(id) => write!(f, "_:b{id}"),
            Node::Integer(n) => write!(f, "{n}"),
            Node::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// One (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement {
    /// Subject.
    pub subject: Node,
    /// Predicate IRI.
    pub predicate: String,
    /// Object.
    pub object: Node,
}

/// Append-only set of constraint statements plus the shapes compiled into it.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    statements: Vec<Statement>,
    seen: HashSet<Statement>,
    next_blank: u64,
    prefixes: Vec<Namespace>,
    compiled: BTreeSet<String>,
}

impl ConstraintGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a prefix for serialization. The first binding of an IRI wins.
    pub fn bind(&mut self, namespace: Namespace) {
        if !self.prefixes.iter().any(|ns| ns.iri == namespace.iri) {
            self.prefixes.push(namespace);
        }
    }

    /// Prefix bindings in binding order.
    #[must_use]
    pub fn prefixes(&self) -> &[Namespace] {
        &self.prefixes
    }

    /// Allocates a fresh blank node.
    pub fn blank(&mut self) -> Node {
        let node = Node::Blank(self.next_blank);
        self.next_blank += 1;
        node
    }

    /// Adds a statement; duplicates are ignored.
    pub fn add(&mut self, subject: Node, predicate: &str, object: Node) {
        let statement = Statement {
            subject,
            predicate: predicate.to_string(),
            object,
        };
        if self.seen.insert(statement.clone()) {
            self.statements.push(statement);
        }
    }

    /// Statements in insertion order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns `true` if the graph has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns `true` if `node` is the subject of any statement.
    #[must_use]
    pub fn contains_subject(&self, node: &Node) -> bool {
        self.statements.iter().any(|s| &s.subject == node)
    }

    /// Statements with the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Node,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.statements
            .iter()
            .filter(move |s| &s.subject == subject && s.predicate == predicate)
            .map(|s| &s.object)
    }

    /// Records a shape IRI as compiled.
    pub(crate) fn mark_compiled(&mut self, iri: &str) {
        self.compiled.insert(iri.to_string());
    }

    /// Returns `true` if the shape with this IRI has been compiled.
    #[must_use]
    pub fn is_compiled(&self, iri: &str) -> bool {
        self.compiled.contains(iri)
    }

    /// IRIs of every compiled shape, in order.
    #[must_use]
    pub fn compiled_shapes(&self) -> &BTreeSet<String> {
        &self.compiled
    }
}
