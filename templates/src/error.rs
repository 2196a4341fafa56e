//! Template errors.

use tasty_ontology::OntologyError;
use thiserror::Error;
use uuid::Uuid;

use crate::state::TemplateState;

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors raised while validating, resolving or registering templates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The record or its resolution violates a template invariant.
    #[error("Template validation failed: {message}")]
    Validation {
        /// What was wrong.
        message: String,
    },

    /// A lookup that must be unique matched several results.
    #[error("{subject} resolved to multiple results: {candidates:?}")]
    MultipleResults {
        /// What was being resolved.
        subject: String,
        /// Every match.
        candidates: Vec<String>,
    },

    /// A template id is already registered.
    #[error("Template id {id} is already registered")]
    DuplicateIdentity {
        /// The colliding id.
        id: Uuid,
    },

    /// An operation ran in the wrong lifecycle state.
    #[error("Cannot {operation} a template in state {state}")]
    InvalidState {
        /// The attempted operation.
        operation: &'static str,
        /// The template's state.
        state: TemplateState,
    },

    /// Term resolution or classification failed.
    #[error(transparent)]
    Ontology(#[from] OntologyError),

    /// Template source text could not be decoded.
    #[error("Failed to decode templates: {0}")]
    Decode(String),
}

impl TemplateError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TemplateError::Validation {
            message: message.into(),
        }
    }
}
