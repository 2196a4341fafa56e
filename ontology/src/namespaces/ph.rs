//! `ph` namespace: Haystack core library.
//!
//! Defines the root concepts (`entity`, `marker`), the value kinds used as
//! `_kind` discriminators in property maps, and the `hasTag` predicate used by
//! compiled shapes.

use super::binding;
use crate::error::Result;
use crate::model::{Namespace, NamespaceModule, PropertyKind};

const CLASSES: &[(&str, &[&str])] = &[
    // kinds
    ("val", &[]),
    ("scalar", &["ph:val"]),
    ("marker", &["ph:scalar"]),
    ("bool", &["ph:scalar"]),
    ("number", &["ph:scalar"]),
    ("str", &["ph:scalar"]),
    ("ref", &["ph:scalar"]),
    ("uri", &["ph:scalar"]),
    ("date", &["ph:scalar"]),
    ("dateTime", &["ph:scalar"]),
    ("collection", &["ph:val"]),
    ("dict", &["ph:collection"]),
    ("list", &["ph:collection"]),
    ("grid", &["ph:collection"]),
    // root concepts
    ("entity", &["ph:marker"]),
    ("choice", &["ph:marker"]),
    ("phenomenon", &["ph:marker"]),
    ("lib", &["ph:entity"]),
    ("site", &["ph:entity"]),
    ("space", &["ph:entity"]),
];

const PROPERTIES: &[(&str, PropertyKind)] = &[
    ("hasTag", PropertyKind::Object),
    ("is", PropertyKind::Object),
    ("tagOn", PropertyKind::Object),
    ("id", PropertyKind::Datatype),
    ("dis", PropertyKind::Datatype),
    ("doc", PropertyKind::Datatype),
    ("unit", PropertyKind::Datatype),
    ("tz", PropertyKind::Datatype),
    ("area", PropertyKind::Datatype),
];

/// Returns the `ph` namespace module for the given version bindings.
///
/// # Errors
///
/// Returns an error if a required prefix is unbound.
pub fn module(bindings: &[Namespace]) -> Result<NamespaceModule> {
    NamespaceModule::from_tables(binding(bindings, "ph")?, CLASSES, PROPERTIES, bindings)
}
