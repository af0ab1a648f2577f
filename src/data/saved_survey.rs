//! Saved survey list kept under a single storage key.
//!
//! The whole list is read and rewritten on every save; there is no locking,
//! so the last writer wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, PersistenceError};
use crate::model::{Survey, SurveyParseError};

/// One entry of the persisted list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSurvey {
    pub title: String,
    #[serde(rename = "createdAt", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Survey document as plain nested JSON
    pub data: serde_json::Value,
}

impl SavedSurvey {
    pub fn new(title: impl Into<String>, survey: &Survey) -> Self {
        Self {
            title: title.into(),
            created_at: Utc::now(),
            data: survey.to_json(),
        }
    }

    /// Decode the stored document
    pub fn survey(&self) -> Result<Survey, SurveyParseError> {
        Survey::from_json(self.data.clone())
    }
}

/// Data access object for the saved survey list
pub struct SavedSurveyStore {
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for SavedSurveyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedSurveyStore")
            .field("key", &self.key)
            .finish()
    }
}

impl SavedSurveyStore {
    pub fn new(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the whole list; a missing key is an empty list
    pub fn list(&self) -> Result<Vec<SavedSurvey>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
            key: self.key.clone(),
            source,
        })
    }

    /// Append one entry and rewrite the list. Returns the list as stored.
    pub fn append(&self, entry: SavedSurvey) -> Result<Vec<SavedSurvey>, PersistenceError> {
        let mut surveys = self.list()?;
        surveys.push(entry);
        let encoded = serde_json::to_string(&surveys)?;
        self.storage.set(&self.key, &encoded)?;
        tracing::info!(
            key = %self.key,
            count = surveys.len(),
            "Saved survey list updated"
        );
        self.list()
    }

    /// Most recent entry with the given title
    pub fn find(&self, title: &str) -> Result<Option<SavedSurvey>, PersistenceError> {
        Ok(self.list()?.into_iter().rev().find(|s| s.title == title))
    }
}
