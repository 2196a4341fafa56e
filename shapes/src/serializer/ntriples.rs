//! N-Triples serializer for constraint graphs.
//!
//! One statement per line with absolute IRIs and typed literals.

use crate::graph::{ConstraintGraph, Node};

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// Serializes a constraint graph to N-Triples, in insertion order.
#[must_use]
pub fn to_ntriples(graph: &ConstraintGraph) -> String {
    let mut out = String::with_capacity(128 * graph.len());
    for s in graph.statements() {
        triple(&mut out, &term(&s.subject), &s.predicate, &term(&s.object));
    }
    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push_str(" <");
    out.push_str(pred);
    out.push_str("> ");
    out.push_str(obj);
    out.push_str(" .\n");
}

fn term(node: &Node) -> String {
    match node {
        Node::Iri(iri) => format!("<{iri}>"),
        Node::Blank(id) => format!("_:b{id}"),
        Node::Integer(n) => format!("\"{n}\"^^<{XSD_INTEGER}>"),
        Node::Boolean(b) => format!("\"{b}\"^^<{XSD_BOOLEAN}>"),
    }
}
