//! `phScience` namespace: substances and measured quantities.

use super::binding;
use crate::error::Result;
use crate::model::{Namespace, NamespaceModule, PropertyKind};

const CLASSES: &[(&str, &[&str])] = &[
    ("substance", &["ph:phenomenon"]),
    ("fluid", &["phScience:substance"]),
    ("air", &["phScience:fluid"]),
    ("water", &["phScience:fluid"]),
    ("steam", &["phScience:fluid"]),
    ("co2", &["phScience:substance"]),
    ("elec", &["phScience:substance"]),
    ("quantity", &["ph:phenomenon"]),
    ("temp", &["phScience:quantity"]),
    ("flow", &["phScience:quantity"]),
    ("pressure", &["phScience:quantity"]),
    ("humidity", &["phScience:quantity"]),
    ("power", &["phScience:quantity"]),
    ("energy", &["phScience:quantity"]),
    ("concentration", &["phScience:quantity"]),
];

const PROPERTIES: &[(&str, PropertyKind)] = &[("quantityOf", PropertyKind::Object)];

/// Returns the `phScience` namespace module for the given version bindings.
///
/// # Errors
///
/// Returns an error if a required prefix is unbound.
pub fn module(bindings: &[Namespace]) -> Result<NamespaceModule> {
    NamespaceModule::from_tables(
        binding(bindings, "phScience")?,
        CLASSES,
        PROPERTIES,
        bindings,
    )
}
