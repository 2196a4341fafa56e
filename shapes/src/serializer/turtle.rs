//! Turtle 1.1 serializer for constraint graphs.

use std::fmt::Write as FmtWrite;

use crate::graph::{ConstraintGraph, Node};
use crate::vocab;

/// Serializes a constraint graph to Turtle.
///
/// Subjects appear in order of first use; each subject's statements keep
/// their insertion order. IRIs are compacted with the graph's prefixes where
/// the local name is a plain Turtle local name.
#[must_use]
pub fn to_turtle(graph: &ConstraintGraph) -> String {
    let mut out = String::with_capacity(64 * graph.len() + 512);

    for ns in graph.prefixes() {
        let _ = writeln!(out, "@prefix {}: <{}> .", ns.prefix, ns.iri);
    }
    out.push('\n');

    let mut subjects: Vec<&Node> = Vec::new();
    for statement in graph.statements() {
        if !subjects.contains(&&statement.subject) {
            subjects.push(&statement.subject);
        }
    }

    for subject in subjects {
        let lines: Vec<String> = graph
            .statements()
            .iter()
            .filter(|s| &s.subject == subject)
            .map(|s| {
                let predicate = if s.predicate == vocab::RDF_TYPE {
                    "a".to_string()
                } else {
                    compact(graph, &s.predicate)
                };
                format!("  {} {}", predicate, node(graph, &s.object))
            })
            .collect();
        let _ = write!(
            out,
            "{}\n{} .\n\n",
            node(graph, subject),
            lines.join(" ;\n")
        );
    }

    out
}

fn node(graph: &ConstraintGraph, node: &Node) -> String {
    match node {
        Node::Iri(iri) => compact(graph, iri),
        other => other.to_string(),
    }
}

fn compact(graph: &ConstraintGraph, iri: &str) -> String {
    graph
        .prefixes()
        .iter()
        .filter_map(|ns| {
            let local = iri.strip_prefix(ns.iri.as_str())?;
            is_plain_local(local).then(|| (ns.iri.len(), format!("{}:{}", ns.prefix, local)))
        })
        .max_by_key(|(len, _)| *len)
        .map_or_else(|| format!("<{iri}>"), |(_, curie)| curie)
}

fn is_plain_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
