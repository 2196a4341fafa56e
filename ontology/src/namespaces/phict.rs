//! `phIct` namespace: networks and communication protocols.

use super::binding;
use crate::error::Result;
use crate::model::{Namespace, NamespaceModule, PropertyKind};

const CLASSES: &[(&str, &[&str])] = &[
    ("network", &["ph:entity"]),
    ("protocol", &["ph:choice"]),
    ("bacnet", &["phIct:protocol"]),
    ("modbus", &["phIct:protocol"]),
];

const PROPERTIES: &[(&str, PropertyKind)] = &[
    ("networkRef", PropertyKind::Object),
    ("deviceRef", PropertyKind::Object),
];

/// Returns the `phIct` namespace module for the given version bindings.
///
/// # Errors
///
/// Returns an error if a required prefix is unbound.
pub fn module(bindings: &[Namespace]) -> Result<NamespaceModule> {
    NamespaceModule::from_tables(binding(bindings, "phIct")?, CLASSES, PROPERTIES, bindings)
}
