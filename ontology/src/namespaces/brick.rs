//! `brick` and `tag` namespaces: Brick classes and tags.
//!
//! Brick names classes with underscore-joined words, so a Brick class is
//! usually resolved as a single term. Several tag names (`Point`, `Sensor`,
//! `Equipment`) also exist as classes, which makes them ambiguous as plain
//! terms.

use super::binding;
use crate::error::Result;
use crate::model::{Namespace, NamespaceModule, PropertyKind};

const CLASSES: &[(&str, &[&str])] = &[
    ("Class", &[]),
    ("Tag", &[]),
    ("Point", &["brick:Class"]),
    ("Sensor", &["brick:Point"]),
    ("Temperature_Sensor", &["brick:Sensor"]),
    ("Air_Temperature_Sensor", &["brick:Temperature_Sensor"]),
    ("Discharge_Air_Temperature_Sensor", &["brick:Air_Temperature_Sensor"]),
    ("Flow_Sensor", &["brick:Sensor"]),
    ("Air_Flow_Sensor", &["brick:Flow_Sensor"]),
    ("Discharge_Air_Flow_Sensor", &["brick:Air_Flow_Sensor"]),
    ("Command", &["brick:Point"]),
    ("Setpoint", &["brick:Point"]),
    ("Equipment", &["brick:Class"]),
    ("HVAC", &["brick:Equipment"]),
    ("AHU", &["brick:HVAC"]),
    ("Terminal_Unit", &["brick:HVAC"]),
    ("VAV", &["brick:Terminal_Unit"]),
    ("Fan", &["brick:HVAC"]),
    ("Location", &["brick:Class"]),
];

const PROPERTIES: &[(&str, PropertyKind)] = &[
    ("hasTag", PropertyKind::Object),
    ("hasPoint", PropertyKind::Object),
    ("isPointOf", PropertyKind::Object),
    ("feeds", PropertyKind::Object),
    ("hasLocation", PropertyKind::Object),
];

const TAGS: &[(&str, &[&str])] = &[
    ("Air", &["brick:Tag"]),
    ("Discharge", &["brick:Tag"]),
    ("Flow", &["brick:Tag"]),
    ("Temperature", &["brick:Tag"]),
    ("Point", &["brick:Tag"]),
    ("Sensor", &["brick:Tag"]),
    ("Equipment", &["brick:Tag"]),
];

/// Returns the `brick` namespace module for the given version bindings.
///
/// # Errors
///
/// Returns an error if a required prefix is unbound.
pub fn module(bindings: &[Namespace]) -> Result<NamespaceModule> {
    NamespaceModule::from_tables(binding(bindings, "brick")?, CLASSES, PROPERTIES, bindings)
}

/// Returns the `tag` namespace module for the given version bindings.
///
/// # Errors
///
/// Returns an error if a required prefix is unbound.
pub fn tag_module(bindings: &[Namespace]) -> Result<NamespaceModule> {
    NamespaceModule::from_tables(binding(bindings, "tag")?, TAGS, &[], bindings)
}
