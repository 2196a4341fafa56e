//! SHACL and RDF vocabulary used by compiled shapes.

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `sh:NodeShape`.
pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
/// `sh:class`.
pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
/// `sh:property`.
pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
/// `sh:path`.
pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
/// `sh:inversePath`.
pub const INVERSE_PATH: &str = "http://www.w3.org/ns/shacl#inversePath";
/// `sh:hasValue`.
pub const HAS_VALUE: &str = "http://www.w3.org/ns/shacl#hasValue";
/// `sh:node`.
pub const NODE: &str = "http://www.w3.org/ns/shacl#node";
/// `sh:qualifiedValueShape`.
pub const QUALIFIED_VALUE_SHAPE: &str = "http://www.w3.org/ns/shacl#qualifiedValueShape";
/// `sh:qualifiedMinCount`.
pub const QUALIFIED_MIN_COUNT: &str = "http://www.w3.org/ns/shacl#qualifiedMinCount";
/// `sh:qualifiedMaxCount`.
pub const QUALIFIED_MAX_COUNT: &str = "http://www.w3.org/ns/shacl#qualifiedMaxCount";
/// `sh:qualifiedValueShapesDisjoint`.
pub const QUALIFIED_VALUE_SHAPES_DISJOINT: &str =
    "http://www.w3.org/ns/shacl#qualifiedValueShapesDisjoint";
/// `sh:minCount`.
pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
/// `sh:maxCount`.
pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
/// `sh:severity`.
pub const SEVERITY: &str = "http://www.w3.org/ns/shacl#severity";
/// `sh:Violation`.
pub const VIOLATION: &str = "http://www.w3.org/ns/shacl#Violation";
/// `sh:Warning`.
pub const WARNING: &str = "http://www.w3.org/ns/shacl#Warning";
