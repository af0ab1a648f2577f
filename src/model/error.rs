//! Error types for document operations.

use thiserror::Error;

use super::ItemType;

/// Errors that can occur while querying or restructuring a survey.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No node of the given kind carries this id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: ItemType, id: String },

    /// Inserting the node would break id uniqueness.
    #[error("id already present in survey: {0}")]
    DuplicateId(String),

    /// Free-text validation pattern does not compile.
    #[error("invalid free-text pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ModelError {
    pub(crate) fn not_found(kind: ItemType, id: impl ToString) -> Self {
        ModelError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound { .. })
    }
}
