//! `phIoT` namespace: points, equipment and their relationships.
//!
//! Multi-word classes (`cur-point`, `fan-motor`, `damper-actuator`, ...) are
//! the reason classification has to search tag permutations: their names are
//! hyphen-joined conjunctions of other terms.

use super::binding;
use crate::error::Result;
use crate::model::{Namespace, NamespaceModule, PropertyKind};

const CLASSES: &[(&str, &[&str])] = &[
    // entities
    ("equip", &["ph:entity"]),
    ("point", &["ph:entity"]),
    ("device", &["ph:entity"]),
    // point types
    ("cur", &["ph:marker"]),
    ("his", &["ph:marker"]),
    ("writable", &["ph:marker"]),
    ("cur-point", &["phIoT:point"]),
    ("his-point", &["phIoT:point"]),
    ("writable-point", &["phIoT:point"]),
    ("pointFunction", &["ph:choice"]),
    ("sensor", &["phIoT:pointFunction"]),
    ("cmd", &["phIoT:pointFunction"]),
    ("sp", &["phIoT:pointFunction"]),
    // equipment
    ("motor", &["phIoT:equip"]),
    ("fan", &["ph:marker"]),
    ("pump", &["ph:marker"]),
    ("fan-motor", &["phIoT:motor"]),
    ("pump-motor", &["phIoT:motor"]),
    ("vfd", &["phIoT:equip"]),
    ("airHandlingEquip", &["phIoT:equip"]),
    ("ahu", &["phIoT:airHandlingEquip"]),
    ("rtu", &["phIoT:ahu"]),
    ("doas", &["phIoT:airHandlingEquip"]),
    ("airTerminalUnit", &["phIoT:equip"]),
    ("vav", &["phIoT:airTerminalUnit"]),
    ("cav", &["phIoT:airTerminalUnit"]),
    ("actuator", &["phIoT:equip"]),
    ("damper", &["ph:marker"]),
    ("valve", &["ph:marker"]),
    ("damper-actuator", &["phIoT:actuator"]),
    ("valve-actuator", &["phIoT:actuator"]),
    ("meter", &["phIoT:equip"]),
    ("elec-meter", &["phIoT:meter"]),
    ("plant", &["phIoT:equip"]),
    ("chiller", &["phIoT:equip"]),
    ("boiler", &["phIoT:equip"]),
    // descriptive markers
    ("discharge", &["ph:marker"]),
    ("return", &["ph:marker"]),
    ("outside", &["ph:marker"]),
    ("mixed", &["ph:marker"]),
    ("exhaust", &["ph:marker"]),
    ("zone", &["ph:marker"]),
    ("occupied", &["ph:marker"]),
    ("unocc", &["ph:marker"]),
    ("standby", &["ph:marker"]),
    ("enable", &["ph:marker"]),
    ("run", &["ph:marker"]),
    ("effective", &["ph:marker"]),
    ("heating", &["ph:marker"]),
    ("cooling", &["ph:marker"]),
    ("min", &["ph:marker"]),
    ("max", &["ph:marker"]),
];

const PROPERTIES: &[(&str, PropertyKind)] = &[
    ("equipRef", PropertyKind::Object),
    ("siteRef", PropertyKind::Object),
    ("spaceRef", PropertyKind::Object),
    ("airRef", PropertyKind::Object),
    ("hotWaterRef", PropertyKind::Object),
    ("chilledWaterRef", PropertyKind::Object),
    ("condenserWaterRef", PropertyKind::Object),
    ("curVal", PropertyKind::Datatype),
    ("curStatus", PropertyKind::Datatype),
    ("writeVal", PropertyKind::Datatype),
    ("writeLevel", PropertyKind::Datatype),
    ("hisMode", PropertyKind::Datatype),
];

/// Returns the `phIoT` namespace module for the given version bindings.
///
/// # Errors
///
/// Returns an error if a required prefix is unbound.
pub fn module(bindings: &[Namespace]) -> Result<NamespaceModule> {
    NamespaceModule::from_tables(binding(bindings, "phIoT")?, CLASSES, PROPERTIES, bindings)
}
