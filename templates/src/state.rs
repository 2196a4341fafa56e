//! Template lifecycle.

use std::fmt;

/// Lifecycle of point-group and equipment templates.
///
/// `Invalid → Valid → Populated → Resolved`; each step requires the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateState {
    /// Failed structural validation.
    Invalid,
    /// Passed structural validation; nothing resolved yet.
    Valid,
    /// Identity and basic fields parsed; id claimed.
    Populated,
    /// Resolved against the ontology.
    Resolved,
}

impl fmt::Display for TemplateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemplateState::Invalid => "invalid",
            TemplateState::Valid => "valid",
            TemplateState::Populated => "populated",
            TemplateState::Resolved => "resolved",
        })
    }
}
