//! Tag-set classification.
//!
//! A tag set such as `cur-air-writable-motor-temp-sensor-point` describes an
//! entity by conjunction. Multi-word classes (`cur-point`, `writable-point`)
//! only surface when the right tokens are joined in the right order, so the
//! classifier tries every permutation of every order against the entity
//! closure, keeps the most specific hits, and files the remaining tokens as
//! markers or properties.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OntologyError, Result};
use crate::model::Namespace;
use crate::resolve::{resolve_tags, PropertyValue};
use crate::schema::RootConcept;
use crate::term::NamespacedTerm;
use crate::view::OntologyQuery;

/// Default ceiling on distinct tokens per tag set.
pub const DEFAULT_MAX_TOKENS: usize = 8;

/// Classifier limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Tag sets with more distinct tokens fail with
    /// [`OntologyError::TooManyTokens`] before any search.
    pub max_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// The result of classifying a tag set.
///
/// Local names of classes, markers and properties never overlap, and no
/// class is an ancestor of another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    /// Most specific entity classes.
    pub classes: BTreeSet<NamespacedTerm>,
    /// Descriptive markers.
    pub markers: BTreeSet<NamespacedTerm>,
    /// Properties with their value metadata.
    pub properties: BTreeMap<NamespacedTerm, PropertyValue>,
}

impl Classification {
    /// Returns `true` if nothing was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.markers.is_empty() && self.properties.is_empty()
    }

    /// Returns `true` if any class, marker or property has this local name.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.classes
            .iter()
            .chain(self.markers.iter())
            .chain(self.properties.keys())
            .any(|t| t.name() == name)
    }
}

/// Outcome of the permutation search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSearch {
    /// Every class hit, before pruning.
    pub candidates: BTreeSet<NamespacedTerm>,
    /// Tokens used by at least one hit.
    pub consumed: BTreeSet<String>,
}

/// Searches every permutation of every order of `tokens` for entity classes.
///
/// For each permutation the tokens are joined with `-` and looked up in every
/// namespace; a hit in `entity_subclasses` is a candidate and consumes its
/// tokens. Duplicate tokens are ignored.
///
/// # Errors
///
/// Returns [`OntologyError::TooManyTokens`] if the distinct tokens exceed
/// `config.max_tokens`.
pub fn search_candidate_classes(
    tokens: &[&str],
    namespaces: &[Namespace],
    entity_subclasses: &BTreeSet<NamespacedTerm>,
    config: &ClassifierConfig,
) -> Result<CandidateSearch> {
    let tokens: Vec<&str> = tokens
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if tokens.len() > config.max_tokens {
        return Err(OntologyError::TooManyTokens {
            count: tokens.len(),
            limit: config.max_tokens,
        });
    }

    let closure: HashSet<String> = entity_subclasses.iter().map(NamespacedTerm::iri).collect();
    let mut search = CandidateSearch::default();
    let mut used = vec![false; tokens.len()];
    let mut path = Vec::with_capacity(tokens.len());
    permute(&tokens, &mut used, &mut path, &mut |path| {
        let words: Vec<&str> = path.iter().map(|&i| tokens[i]).collect();
        let joined = words.join("-");
        for ns in namespaces {
            if closure.contains(&ns.iri_of(&joined)) {
                debug!(candidate = %joined, namespace = %ns.prefix, "candidate class");
                search
                    .candidates
                    .insert(NamespacedTerm::new(ns.clone(), joined.clone()));
                search.consumed.extend(words.iter().map(|w| (*w).to_string()));
            }
        }
    });
    Ok(search)
}

/// Depth-first walk over all partial permutations; each node is visited once.
fn permute(
    tokens: &[&str],
    used: &mut [bool],
    path: &mut Vec<usize>,
    visit: &mut dyn FnMut(&[usize]),
) {
    for i in 0..tokens.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        path.push(i);
        visit(path);
        permute(tokens, used, path, visit);
        path.pop();
        used[i] = false;
    }
}

/// Drops every candidate that is a strict ancestor of another candidate.
pub fn most_specific<Q: OntologyQuery + ?Sized>(
    view: &Q,
    candidates: BTreeSet<NamespacedTerm>,
) -> BTreeSet<NamespacedTerm> {
    let ancestors: Vec<NamespacedTerm> = candidates
        .iter()
        .filter(|c| {
            let closure = view.subclass_closure(c);
            candidates.iter().any(|d| d != *c && closure.contains(d))
        })
        .cloned()
        .collect();
    candidates
        .into_iter()
        .filter(|c| !ancestors.contains(c))
        .collect()
}

/// Classifies a set of resolved tags.
///
/// # Errors
///
/// Returns [`OntologyError::TooManyTokens`] for oversized tag sets and
/// [`OntologyError::MissingRoot`] if the ontology lacks its entity or marker
/// root.
pub fn classify<Q: OntologyQuery + ?Sized>(
    view: &Q,
    tags: &BTreeSet<NamespacedTerm>,
    config: &ClassifierConfig,
) -> Result<Classification> {
    if tags.is_empty() {
        return Ok(Classification::default());
    }
    let tokens: Vec<&str> = tags.iter().map(NamespacedTerm::name).collect();
    let entity = view.root(RootConcept::Entity)?;
    let entity_subclasses = view.subclass_closure(&entity);
    let search = search_candidate_classes(&tokens, view.namespaces(), &entity_subclasses, config)?;

    let marker_closure = view.subclass_closure(&view.root(RootConcept::Marker)?);
    let mut classification = Classification {
        classes: most_specific(view, search.candidates),
        ..Classification::default()
    };
    for tag in tags.iter().filter(|t| !search.consumed.contains(t.name())) {
        if marker_closure.contains(tag) {
            classification.markers.insert(tag.clone());
        } else {
            classification
                .properties
                .insert(tag.clone(), PropertyValue::null());
        }
    }

    debug!(
        classes = classification.classes.len(),
        markers = classification.markers.len(),
        properties = classification.properties.len(),
        "classified tag set"
    );
    Ok(classification)
}

/// Resolves and classifies a hyphen-joined tag string.
///
/// # Errors
///
/// Fails if a token does not resolve uniquely or classification fails.
pub fn classify_tags<Q: OntologyQuery + ?Sized>(
    view: &Q,
    tags: &str,
    config: &ClassifierConfig,
) -> Result<Classification> {
    classify(view, &resolve_tags(view, tags)?, config)
}
