//! Errors reported by the survey store.

use thiserror::Error;

use crate::data::PersistenceError;
use crate::model::{ModelError, SurveyParseError};

/// Why an intent could not be applied.
///
/// The store never leaves a half-applied intent behind: when `dispatch`
/// returns one of these, the aggregate state is what it was before the call.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Not a valid item type for {operation}: {item_type}")]
    InvalidItemType {
        item_type: String,
        operation: &'static str,
    },

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("Nothing to undo")]
    EmptyHistory,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Malformed survey: {0}")]
    MalformedSurvey(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid free-text pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl StoreError {
    /// Fatal to the operation, as opposed to a user-level miss.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::InvalidItemType { .. })
    }

    pub(crate) fn invalid_item_type(item_type: impl ToString, operation: &'static str) -> Self {
        StoreError::InvalidItemType {
            item_type: item_type.to_string(),
            operation,
        }
    }
}

impl From<ModelError> for StoreError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { kind, id } => StoreError::NotFound {
                kind: kind.as_str(),
                id,
            },
            ModelError::DuplicateId(id) => StoreError::DuplicateId(id),
            ModelError::InvalidPattern { pattern, reason } => {
                StoreError::InvalidPattern { pattern, reason }
            }
        }
    }
}

impl From<SurveyParseError> for StoreError {
    fn from(err: SurveyParseError) -> Self {
        match err {
            SurveyParseError::Json(e) => StoreError::MalformedSurvey(e.to_string()),
            SurveyParseError::Model(e) => e.into(),
        }
    }
}
